//! Conversions between the host's integer parameter codes, musical pitch
//! spaces and the physical quantities the filter sections consume.
//!
//! Every function is total: integer codes are clamped to their declared range
//! before conversion.

/// Lowest cutoff reachable from the parameter scale, in Hz.
pub const CUTOFF_MIN_HZ: f32 = 20.0;
/// Highest cutoff reachable from the parameter scale, in Hz.
pub const CUTOFF_MAX_HZ: f32 = 20_000.0;
/// Full-scale value of the cutoff and resonance parameter codes.
pub const PARAM_SCALE: i32 = 1000;

/// Damping at zero resonance (Butterworth, Q = 0.707).
pub const DAMPING_MAX: f32 = 0.707;
/// Damping at full resonance, just short of self-oscillation.
pub const DAMPING_MIN: f32 = 0.01;

/// Frequency of MIDI note 69 (A4).
pub const A4_HZ: f32 = 440.0;
/// Frequency at 0 V on a V/OCT input (C4).
pub const C4_HZ: f32 = 261.625_565_3;

/// Maps the cutoff code (0..=1000) onto an exponential 20 Hz..20 kHz sweep:
/// `20 * 1000^(p / 1000)`.
#[inline]
pub fn cutoff_param_to_hz(param: i32) -> f32 {
    let t = param.clamp(0, PARAM_SCALE) as f32 / PARAM_SCALE as f32;
    CUTOFF_MIN_HZ * 1000.0f32.powf(t)
}

/// Inverse of [`cutoff_param_to_hz`], returning the fractional code for a
/// frequency. Frequencies outside 20 Hz..20 kHz map to the scale ends.
#[inline]
pub fn hz_to_cutoff_param(hz: f32) -> f32 {
    let hz = hz.clamp(CUTOFF_MIN_HZ, CUTOFF_MAX_HZ);
    (hz / CUTOFF_MIN_HZ).log10() / 3.0 * PARAM_SCALE as f32
}

/// Maps the resonance code (0..=1000) to a state-variable damping factor,
/// linearly from 0.707 down to 0.01. Lower damping gives a sharper peak.
#[inline]
pub fn resonance_to_damping(param: i32) -> f32 {
    let t = param.clamp(0, PARAM_SCALE) as f32 / PARAM_SCALE as f32;
    DAMPING_MAX * (1.0 - t) + DAMPING_MIN * t
}

/// Equal-tempered frequency of a (possibly fractional) MIDI note.
#[inline]
pub fn midi_note_to_freq(note: f32) -> f32 {
    A4_HZ * ((note - 69.0) / 12.0).exp2()
}

/// Absolute frequency for a V/OCT voltage, 0 V being middle C.
#[inline]
pub fn voct_to_freq(volts: f32) -> f32 {
    C4_HZ * volts.exp2()
}

/// Frequency multiplier for an exponential control voltage: 1 V doubles.
#[inline]
pub fn voct_to_mult(volts: f32) -> f32 {
    volts.exp2()
}

/// Frequency multiplier for an offset in semitones.
#[inline]
pub fn semitones_to_mult(semitones: f32) -> f32 {
    (semitones / 12.0).exp2()
}

/// Converts a 0..=1000 code to a 0.0..=1.0 amount.
#[inline]
pub fn permille_to_unit(param: i32) -> f32 {
    param.clamp(0, PARAM_SCALE) as f32 / PARAM_SCALE as f32
}

/// Converts a -1000..=1000 code to a -1.0..=1.0 amount.
#[inline]
pub fn permille_to_bipolar(param: i32) -> f32 {
    param.clamp(-PARAM_SCALE, PARAM_SCALE) as f32 / PARAM_SCALE as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn cutoff_scale_endpoints() {
        assert!(close(cutoff_param_to_hz(0), 20.0, 0.1));
        assert!(close(cutoff_param_to_hz(500), 632.46, 1.0));
        assert!(close(cutoff_param_to_hz(1000), 20_000.0, 1.0));
    }

    #[test]
    fn cutoff_codes_are_clamped() {
        assert_eq!(cutoff_param_to_hz(-50), cutoff_param_to_hz(0));
        assert_eq!(cutoff_param_to_hz(5000), cutoff_param_to_hz(1000));
    }

    #[test]
    fn cutoff_inverse() {
        for code in [0, 125, 500, 873, 1000] {
            let back = hz_to_cutoff_param(cutoff_param_to_hz(code));
            assert!(close(back, code as f32, 0.05), "{code} -> {back}");
        }
    }

    #[test]
    fn damping_range() {
        assert!(close(resonance_to_damping(0), 0.707, 0.001));
        let d = resonance_to_damping(1000);
        assert!(d > 0.0 && d < 0.02);
    }

    #[test]
    fn pitch_references() {
        assert!(close(midi_note_to_freq(69.0), 440.0, 0.01));
        assert!(close(midi_note_to_freq(60.0), 261.63, 0.01));
        assert!(close(voct_to_freq(0.0), 261.63, 0.01));
        assert!(close(voct_to_freq(1.0), 523.25, 0.1));
        assert_eq!(voct_to_mult(0.0), 1.0);
        assert_eq!(voct_to_mult(1.0), 2.0);
        assert!(close(semitones_to_mult(12.0), 2.0, 1e-6));
    }

    #[test]
    fn permille() {
        assert_eq!(permille_to_unit(1000), 1.0);
        assert_eq!(permille_to_unit(-3), 0.0);
        assert_eq!(permille_to_bipolar(-1000), -1.0);
        assert_eq!(permille_to_bipolar(250), 0.25);
    }
}

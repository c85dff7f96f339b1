use vortex_dsp::mapping::cutoff_param_to_hz;

/// Cutoff code as "Hz" below 1 kHz and "kHz" above, with fewer decimals as
/// the magnitude grows.
pub fn format_cutoff(code: i32) -> String {
    let hz = cutoff_param_to_hz(code);
    if hz >= 1000.0 {
        let khz = hz / 1000.0;
        let places = if khz < 10.0 { 2 } else { 1 };
        format!("{khz:.places$} kHz")
    } else {
        let places = if hz < 100.0 { 1 } else { 0 };
        format!("{hz:.places$} Hz")
    }
}

/// Resonance code as a percentage with one decimal.
pub fn format_resonance(code: i32) -> String {
    format!("{:.1}%", code as f32 / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_strings() {
        assert_eq!(format_cutoff(0), "20.0 Hz");
        assert_eq!(format_cutoff(500), "632 Hz");
        assert_eq!(format_cutoff(800), "5.02 kHz");
        assert_eq!(format_cutoff(1000), "20.0 kHz");
    }

    #[test]
    fn resonance_strings() {
        assert_eq!(format_resonance(0), "0.0%");
        assert_eq!(format_resonance(505), "50.5%");
        assert_eq!(format_resonance(1000), "100.0%");
    }
}

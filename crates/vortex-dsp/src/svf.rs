use core::f32::consts::PI;

use crate::utils::flush_denormal;

/// Response read from the shared state of an [`Svf`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SvfTap {
    #[default]
    Lowpass,
    Highpass,
    Bandpass,
    Notch,
    Allpass,
}

/// Every response produced by one state update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SvfOutputs {
    pub lowpass: f32,
    pub highpass: f32,
    pub bandpass: f32,
    pub notch: f32,
    pub allpass: f32,
}

impl SvfOutputs {
    #[inline]
    pub fn select(&self, tap: SvfTap) -> f32 {
        match tap {
            SvfTap::Lowpass => self.lowpass,
            SvfTap::Highpass => self.highpass,
            SvfTap::Bandpass => self.bandpass,
            SvfTap::Notch => self.notch,
            SvfTap::Allpass => self.allpass,
        }
    }
}

/// Second-order trapezoidal state-variable filter (12 dB/oct).
///
/// Two integrator memories are shared by all five responses. With
/// `k = 2 * damping`:
///
/// * notch = input - k * bandpass (equal to lowpass + highpass)
/// * allpass = lowpass + highpass - k * bandpass
///
/// The structure is stable for any positive damping; the orchestrator keeps
/// damping inside 0.01..=0.707.
#[derive(Clone, Copy, Debug)]
pub struct Svf {
    k: f32,
    a1: f32,
    a2: f32,
    a3: f32,
    tap: SvfTap,
    ic1eq: f32,
    ic2eq: f32,
}

impl Default for Svf {
    fn default() -> Self {
        Self::new()
    }
}

impl Svf {
    #[inline]
    pub const fn new() -> Self {
        Self {
            k: 0.0,
            a1: 0.0,
            a2: 0.0,
            a3: 0.0,
            tap: SvfTap::Lowpass,
            ic1eq: 0.0,
            ic2eq: 0.0,
        }
    }

    /// Configures coefficients and the output tap. The cutoff is held below
    /// Nyquist so the prewarped gain stays finite at any sample rate.
    #[inline]
    pub fn configure(&mut self, sample_rate: f32, cutoff_hz: f32, damping: f32, tap: SvfTap) {
        let sr = sample_rate.max(1.0);
        let cutoff = cutoff_hz.clamp(1.0, 0.49 * sr);
        let g = (PI * (cutoff / sr)).tan();
        let k = 2.0 * damping;
        let a1 = 1.0 / (1.0 + g * (g + k));
        let a2 = g * a1;
        let a3 = g * a2;
        self.k = k;
        self.a1 = a1;
        self.a2 = a2;
        self.a3 = a3;
        self.tap = tap;
    }

    /// Runs one state update and returns the configured tap.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.tick(input).select(self.tap)
    }

    /// Runs one state update and returns all responses.
    #[inline]
    pub fn tick(&mut self, input: f32) -> SvfOutputs {
        let v3 = input - self.ic2eq;
        let v1 = self.a1 * self.ic1eq + self.a2 * v3;
        let v2 = self.ic2eq + self.a2 * self.ic1eq + self.a3 * v3;
        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        let lowpass = v2;
        let bandpass = v1;
        let notch = input - self.k * bandpass;
        let highpass = notch - lowpass;
        let allpass = notch - self.k * bandpass;
        SvfOutputs {
            lowpass,
            highpass,
            bandpass,
            notch,
            allpass,
        }
    }

    #[inline]
    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    #[inline]
    pub fn flush_denormals(&mut self) {
        self.ic1eq = flush_denormal(self.ic1eq);
        self.ic2eq = flush_denormal(self.ic2eq);
    }

    #[inline]
    pub fn tap(&self) -> SvfTap {
        self.tap
    }

    #[inline]
    pub fn state(&self) -> (f32, f32) {
        (self.ic1eq, self.ic2eq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48_000.0;

    fn configured(cutoff: f32, damping: f32, tap: SvfTap) -> Svf {
        let mut svf = Svf::new();
        svf.configure(SR, cutoff, damping, tap);
        svf
    }

    #[test]
    fn taps_share_one_state_update() {
        let mut a = configured(1_000.0, 0.3, SvfTap::Lowpass);
        let mut b = configured(1_000.0, 0.3, SvfTap::Notch);
        for n in 0..256 {
            let x = ((n as f32) * 0.37).sin();
            let outs = a.tick(x);
            assert_eq!(outs.notch, b.process(x));
            assert!((outs.notch - (outs.lowpass + outs.highpass)).abs() < 1e-5);
            let ap = outs.lowpass + outs.highpass - 2.0 * 0.3 * outs.bandpass;
            assert!((outs.allpass - ap).abs() < 1e-5);
        }
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn lowpass_passes_dc_highpass_blocks_it() {
        let mut lp = configured(500.0, 0.707, SvfTap::Lowpass);
        let mut hp = configured(500.0, 0.707, SvfTap::Highpass);
        let (mut yl, mut yh) = (0.0, 1.0);
        for _ in 0..10_000 {
            yl = lp.process(1.0);
            yh = hp.process(1.0);
        }
        assert!((yl - 1.0).abs() < 1e-3);
        assert!(yh.abs() < 1e-3);
    }

    #[test]
    fn allpass_passes_dc_with_unity_gain() {
        let mut ap = configured(2_000.0, 0.5, SvfTap::Allpass);
        let mut y = 0.0;
        for _ in 0..10_000 {
            y = ap.process(1.0);
        }
        assert!((y - 1.0).abs() < 1e-3);
    }

    #[test]
    fn cutoff_above_nyquist_stays_finite() {
        let mut svf = Svf::new();
        svf.configure(32_000.0, 20_000.0, 0.01, SvfTap::Bandpass);
        for n in 0..10_000 {
            let y = svf.process(if n == 0 { 1.0 } else { 0.0 });
            assert!(y.is_finite());
        }
    }

    #[test]
    fn reset_zeroes_both_integrators() {
        let mut svf = configured(1_000.0, 0.1, SvfTap::Bandpass);
        svf.process(1.0);
        assert_ne!(svf.state(), (0.0, 0.0));
        svf.reset();
        assert_eq!(svf.state(), (0.0, 0.0));
    }
}

use core::f32::consts::TAU;

use crate::utils::flush_denormal;

/// First-order (6 dB/oct) filter section with a single integrator cell.
///
/// The same state serves both responses: low-pass reads the smoothed state,
/// high-pass is the input minus it. Reconfiguring only touches the
/// coefficient, so it is cheap enough to do every sample.
#[derive(Clone, Copy, Debug, Default)]
pub struct OnePole {
    coeff: f32,
    state: f32,
}

impl OnePole {
    #[inline]
    pub const fn new() -> Self {
        Self {
            coeff: 0.0,
            state: 0.0,
        }
    }

    #[inline]
    pub fn configure_lp(&mut self, sample_rate: f32, cutoff_hz: f32) {
        self.coeff = smoothing_coeff(sample_rate, cutoff_hz);
    }

    #[inline]
    pub fn configure_hp(&mut self, sample_rate: f32, cutoff_hz: f32) {
        self.coeff = smoothing_coeff(sample_rate, cutoff_hz);
    }

    #[inline]
    pub fn process_lp(&mut self, input: f32) -> f32 {
        self.state += self.coeff * (input - self.state);
        self.state
    }

    #[inline]
    pub fn process_hp(&mut self, input: f32) -> f32 {
        input - self.process_lp(input)
    }

    #[inline]
    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    #[inline]
    pub fn flush_denormals(&mut self) {
        self.state = flush_denormal(self.state);
    }

    #[inline]
    pub fn state(&self) -> f32 {
        self.state
    }

    #[inline]
    pub fn coeff(&self) -> f32 {
        self.coeff
    }
}

/// One-pole smoothing coefficient for a time constant of `1 / (2π fc)`.
#[inline]
fn smoothing_coeff(sample_rate: f32, cutoff_hz: f32) -> f32 {
    let sr = sample_rate.max(1.0);
    let cutoff = cutoff_hz.clamp(0.0, 0.5 * sr);
    (1.0 - (-TAU * cutoff / sr).exp()).clamp(0.0, 1.0)
}

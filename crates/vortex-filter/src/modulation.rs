//! Per-sample combination of base parameters with live CV.
//!
//! Every resolver takes `None` for an unrouted input and clamps its result
//! to the quantity's valid domain.

use vortex_dsp::mapping::{voct_to_mult, CUTOFF_MAX_HZ, CUTOFF_MIN_HZ, DAMPING_MAX, DAMPING_MIN};
use vortex_dsp::saturator::drive_gain;
use vortex_dsp::soft_clip;

use crate::params::FilterMode;

/// Mode steps per volt; +-5 V sweeps the whole mode list.
pub const MODE_STEPS_PER_VOLT: f32 = 1.4;
/// Linear amount per volt for damping, drive and mix CV.
pub const LINEAR_CV_PER_VOLT: f32 = 0.2;

#[inline]
pub fn resolve_mode(base: FilterMode, cv: Option<f32>) -> FilterMode {
    match cv {
        Some(volts) => FilterMode::from_index(base.index() + (volts * MODE_STEPS_PER_VOLT) as i32),
        None => base,
    }
}

/// Effective cutoff in Hz.
///
/// A held MIDI note replaces the base cutoff, then V/OCT and
/// depth-scaled FM CV multiply it exponentially.
#[inline]
pub fn resolve_cutoff(
    base_hz: f32,
    keyboard_hz: Option<f32>,
    voct: Option<f32>,
    fm: Option<f32>,
    fm_depth: f32,
) -> f32 {
    let mut cutoff = keyboard_hz.unwrap_or(base_hz);
    if let Some(volts) = voct {
        cutoff *= voct_to_mult(volts);
    }
    if let Some(volts) = fm {
        cutoff *= voct_to_mult(volts * fm_depth);
    }
    cutoff.clamp(CUTOFF_MIN_HZ, CUTOFF_MAX_HZ)
}

/// Positive resonance CV lowers damping.
#[inline]
pub fn resolve_damping(base: f32, cv: Option<f32>) -> f32 {
    let offset = cv.map_or(0.0, |volts| volts * LINEAR_CV_PER_VOLT);
    (base - offset).clamp(DAMPING_MIN, DAMPING_MAX)
}

/// Drive or mix amount with its CV added, in 0..=1.
#[inline]
pub fn modulate_unit(base: f32, cv: Option<f32>) -> f32 {
    let offset = cv.map_or(0.0, |volts| volts * LINEAR_CV_PER_VOLT);
    (base + offset).clamp(0.0, 1.0)
}

/// Pre-filter saturation. Zero drive leaves the signal untouched.
#[inline]
pub fn apply_drive(sample: f32, drive: f32) -> f32 {
    if drive > 0.0 {
        soft_clip(sample * drive_gain(drive))
    } else {
        sample
    }
}

#[inline]
pub fn mix(dry: f32, wet: f32, amount: f32) -> f32 {
    dry * (1.0 - amount) + wet * amount
}

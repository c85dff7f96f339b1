//! Per-sample DSP building blocks for the Vortex filter.
//!
//! Everything in this crate is allocation free and safe to call from a
//! real-time audio callback. Host concerns (buses, parameters, MIDI) live in
//! `vortex-plugin-sdk` and `vortex-filter`.

pub mod mapping;
pub mod one_pole;
pub mod saturator;
pub mod svf;
pub mod utils;

pub use one_pole::OnePole;
pub use saturator::soft_clip;
pub use svf::{Svf, SvfOutputs, SvfTap};
pub use utils::flush_denormal;

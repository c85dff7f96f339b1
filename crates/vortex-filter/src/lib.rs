//! Vortex: a multi-mode filter effect.
//!
//! Low/high-pass at 6 or 12 dB/oct, bandpass, notch and allpass, optionally
//! cascaded to four poles, with pre-filter drive, dry/wet mix, per-sample CV
//! modulation and a MIDI control surface for keyboard tracking and CC.

pub mod control;
pub mod display;
pub mod factory;
pub mod modulation;
pub mod params;
pub mod processor;
pub mod stages;

pub use control::{ControlSurface, MidiTracking};
pub use factory::{vortex_descriptor, VortexFactory, PLUGIN_ID};
pub use params::{filter_layout, FilterMode, FilterState, OutputMode, Param, Poles, Routing};
pub use processor::VortexFilter;

//! Vortex Plugin SDK
//! =================
//!
//! The host-facing surface of a Vortex effect: plugin metadata, the numbered
//! bus buffer the host hands to every audio block, raw MIDI decoding, and the
//! integer-coded parameter registry. The [`AudioProcessor`] trait is the
//! audio-thread contract; [`NativePlugin`] adds parameter access for the
//! control path.

mod buffer;
mod edits;
mod midi;
mod parameters;
mod plugin;

pub use buffer::{BufferConfig, BusBuffer, DEFAULT_BUS_COUNT};
pub use edits::{ParameterEdit, ParameterEditQueue, ParameterEditSender};
pub use midi::MidiEvent;
pub use parameters::{
    ParameterDefinition, ParameterId, ParameterLayout, ParameterPage, ParameterScaling,
    ParameterSet, ParameterUnit, PluginParameterError,
};
pub use plugin::{
    AudioProcessor, NativePlugin, PluginDescriptor, PluginError, PluginFactory, PluginTag,
};

/// Common imports for plugin authors.
pub mod prelude {
    pub use crate::{
        AudioProcessor, BufferConfig, BusBuffer, MidiEvent, NativePlugin, ParameterDefinition,
        ParameterEdit, ParameterEditSender, ParameterId, ParameterLayout, ParameterPage,
        ParameterScaling, ParameterSet, ParameterUnit, PluginDescriptor, PluginFactory,
        PluginParameterError, PluginTag,
    };
}

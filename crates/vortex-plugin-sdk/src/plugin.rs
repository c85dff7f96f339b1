use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    BufferConfig, BusBuffer, MidiEvent, ParameterEditSender, ParameterId, ParameterLayout,
    ParameterSet, PluginParameterError,
};

/// Host browser category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PluginTag {
    Effect,
    Instrument,
    FilterEq,
}

/// Metadata describing a plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub id: String,
    pub name: String,
    pub vendor: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<PluginTag>,
}

impl PluginDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            vendor: vendor.into(),
            version: None,
            description: None,
            tags: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: &[PluginTag]) -> Self {
        self.tags = tags.to_vec();
        self
    }
}

impl fmt::Display for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.vendor)
    }
}

/// Errors that can be returned by plugin operations.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("plugin reported an invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Audio-thread contract.
///
/// `process` runs once per block on a hard real-time callback and must not
/// block, allocate or lock.
pub trait AudioProcessor: Send + Sync {
    fn descriptor(&self) -> PluginDescriptor;
    fn prepare(&mut self, config: &BufferConfig) -> anyhow::Result<()>;
    fn process(&mut self, buses: &mut BusBuffer) -> anyhow::Result<()>;

    /// Processing latency in samples.
    fn latency_samples(&self) -> usize {
        0
    }

    /// Consumes MIDI delivered since the previous block. Called on the same
    /// thread as `process`, between blocks, so implementations may apply
    /// the result to their own state directly. The default implementation
    /// ignores incoming data.
    fn process_midi(&mut self, _events: &[MidiEvent]) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Control-path access to a plugin's parameters.
pub trait NativePlugin: AudioProcessor {
    fn parameters(&self) -> &ParameterSet;

    /// Handle for posting edits from other threads; they are applied at the
    /// start of the next block.
    fn edit_sender(&self) -> ParameterEditSender;

    fn parameter_layout(&self) -> &ParameterLayout {
        self.parameters().layout()
    }

    fn parameter_value(&self, id: ParameterId) -> Result<i32, PluginParameterError> {
        self.parameters()
            .get(id)
            .ok_or(PluginParameterError::UnknownParameter(id))
    }

    /// Stores a validated code and brings any state derived from it up to
    /// date. The parameter set is only writable through this method.
    fn set_parameter(&mut self, id: ParameterId, value: i32) -> Result<(), PluginParameterError>;

    /// Custom display string for a parameter code, or `None` to let the host
    /// format it.
    fn parameter_string(&self, _id: ParameterId, _value: i32) -> Option<String> {
        None
    }
}

pub trait PluginFactory: Send + Sync {
    fn descriptor(&self) -> PluginDescriptor;
    fn parameter_layout(&self) -> Arc<ParameterLayout>;
    fn create(&self) -> Box<dyn NativePlugin>;
}

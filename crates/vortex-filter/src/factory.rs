use std::sync::Arc;

use vortex_plugin_sdk::{NativePlugin, ParameterLayout, PluginDescriptor, PluginFactory, PluginTag};

use crate::params::{filter_layout, VERSION};
use crate::processor::VortexFilter;

pub const PLUGIN_ID: &str = "vortex.effects.multimode_filter";

pub fn vortex_descriptor() -> PluginDescriptor {
    PluginDescriptor::new(PLUGIN_ID, "Vortex", "Vortex")
        .with_version(VERSION)
        .with_description(format!("Vortex v{VERSION} - multi-mode filter"))
        .with_tags(&[PluginTag::Effect, PluginTag::FilterEq])
}

/// Creates [`VortexFilter`] instances for a host.
#[derive(Debug, Default, Clone, Copy)]
pub struct VortexFactory;

impl PluginFactory for VortexFactory {
    fn descriptor(&self) -> PluginDescriptor {
        vortex_descriptor()
    }

    fn parameter_layout(&self) -> Arc<ParameterLayout> {
        Arc::new(filter_layout())
    }

    fn create(&self) -> Box<dyn NativePlugin> {
        Box::new(VortexFilter::new())
    }
}

use vortex_plugin_sdk::{
    AudioProcessor, BufferConfig, BusBuffer, MidiEvent, NativePlugin, ParameterEdit,
    ParameterEditQueue, ParameterEditSender, ParameterId, ParameterSet, PluginDescriptor,
    PluginError, PluginParameterError,
};

use crate::control::{ControlSurface, MidiTracking};
use crate::display::{format_cutoff, format_resonance};
use crate::factory::vortex_descriptor;
use crate::modulation::{
    apply_drive, mix, modulate_unit, resolve_cutoff, resolve_damping, resolve_mode,
};
use crate::params::{filter_layout, FilterState, OutputMode, Param, Routing};
use crate::stages::CascadeStages;

/// Pending edits held between blocks before new ones are dropped.
pub const EDIT_QUEUE_CAPACITY: usize = 256;

const FALLBACK_SAMPLE_RATE: f32 = 48_000.0;

/// The Vortex multi-mode filter.
///
/// Parameter codes live in a [`ParameterSet`] and are converted into a
/// [`FilterState`] and [`Routing`] whenever they change. MIDI CC write-backs
/// land immediately, in message order. Edits posted through
/// [`NativePlugin::edit_sender`] are queued and applied at the start of the
/// next [`AudioProcessor::process`] call, which then works from a copy of the
/// state for the whole block.
#[derive(Debug)]
pub struct VortexFilter {
    sample_rate: f32,
    parameters: ParameterSet,
    state: FilterState,
    routing: Routing,
    control: ControlSurface,
    stages: CascadeStages,
    edits: ParameterEditQueue,
}

impl VortexFilter {
    pub fn new() -> Self {
        let parameters = ParameterSet::new(filter_layout());
        Self {
            sample_rate: FALLBACK_SAMPLE_RATE,
            state: FilterState::from_parameters(&parameters),
            routing: Routing::from_parameters(&parameters),
            parameters,
            control: ControlSurface::new(),
            stages: CascadeStages::new(),
            edits: ParameterEditQueue::new(EDIT_QUEUE_CAPACITY),
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn routing(&self) -> &Routing {
        &self.routing
    }

    pub fn tracking(&self) -> &MidiTracking {
        self.control.tracking()
    }

    pub fn stages(&self) -> &CascadeStages {
        &self.stages
    }

    /// Sets a parameter by its table entry.
    pub fn set(&mut self, param: Param, value: i32) -> Result<(), PluginParameterError> {
        self.set_parameter(param.id(), value)
    }

    /// Decodes raw 3-byte messages and feeds them to the control surface.
    pub fn process_midi_bytes(&mut self, messages: &[[u8; 3]]) {
        for bytes in messages {
            if let Some(event) = MidiEvent::from_bytes(*bytes) {
                self.handle_midi(&event);
            }
        }
    }

    fn handle_midi(&mut self, event: &MidiEvent) {
        let channel = self.state.midi_channel;
        if let Some(edit) = self
            .control
            .handle(event, channel, self.parameters.layout())
        {
            tracing::trace!(id = %edit.id, value = edit.value, "control change");
            self.apply_edit(edit);
        }
    }

    fn drain_edits(&mut self) {
        while let Some(edit) = self.edits.pop() {
            self.apply_edit(edit);
        }
    }

    /// Rejected edits are dropped; neither MIDI nor the audio path has
    /// anywhere to report them.
    fn apply_edit(&mut self, edit: ParameterEdit) {
        if let Ok(previous) = self.parameters.set(edit.id, edit.value) {
            self.on_parameter_changed(edit.id, previous, edit.value);
        }
    }

    fn on_parameter_changed(&mut self, id: ParameterId, previous: i32, value: i32) {
        let Some(param) = Param::from_id(id) else {
            return;
        };
        if !self.state.apply(param, value) {
            self.routing.apply(param, value);
        }
        if param == Param::Mode && previous != value {
            self.stages.reset();
        }
    }
}

impl Default for VortexFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn read(buses: &BusBuffer, slot: Option<usize>, frame: usize) -> Option<f32> {
    slot.map(|slot| buses.read(slot, frame))
}

impl AudioProcessor for VortexFilter {
    fn descriptor(&self) -> PluginDescriptor {
        vortex_descriptor()
    }

    fn prepare(&mut self, config: &BufferConfig) -> anyhow::Result<()> {
        if !config.sample_rate.is_finite() || config.sample_rate <= 0.0 {
            return Err(PluginError::InvalidConfig(format!(
                "sample rate must be positive, got {}",
                config.sample_rate
            ))
            .into());
        }
        if config.block_size == 0 {
            return Err(PluginError::InvalidConfig("block size must be non-zero".into()).into());
        }

        self.sample_rate = config.sample_rate;
        self.stages.reset();
        tracing::info!(
            sample_rate = config.sample_rate,
            block_size = config.block_size,
            buses = config.bus_count,
            "prepared Vortex"
        );
        Ok(())
    }

    fn process(&mut self, buses: &mut BusBuffer) -> anyhow::Result<()> {
        self.drain_edits();

        let state = self.state;
        let routing = self.routing;
        let keyboard_hz = self.control.tracking().cutoff_override();
        let sample_rate = self.sample_rate;

        let input = buses
            .resolve(routing.input)
            .or_else(|| buses.resolve(routing.cv_audio_in));
        let output = buses.resolve(routing.output);
        let cv_voct = buses.resolve(routing.cv_voct);
        let cv_fm = buses.resolve(routing.cv_fm);
        let cv_resonance = buses.resolve(routing.cv_resonance);
        let cv_mode = buses.resolve(routing.cv_mode);
        let cv_drive = buses.resolve(routing.cv_drive);
        let cv_mix = buses.resolve(routing.cv_mix);

        for frame in 0..buses.frames() {
            let dry = read(buses, input, frame).unwrap_or(0.0);

            let mode = resolve_mode(state.mode, read(buses, cv_mode, frame));
            let cutoff = resolve_cutoff(
                state.cutoff_hz,
                keyboard_hz,
                read(buses, cv_voct, frame),
                read(buses, cv_fm, frame),
                state.fm_depth,
            );
            let damping = resolve_damping(state.damping, read(buses, cv_resonance, frame));
            let drive = modulate_unit(state.drive, read(buses, cv_drive, frame));
            let amount = modulate_unit(state.mix, read(buses, cv_mix, frame));

            let driven = apply_drive(dry, drive);
            let wet = self
                .stages
                .process(mode, state.poles, sample_rate, cutoff, damping, driven);
            let out = mix(dry, wet, amount);

            if let Some(slot) = output {
                match routing.output_mode {
                    OutputMode::Replace => buses.write(slot, frame, out),
                    OutputMode::Add => buses.accumulate(slot, frame, out),
                }
            }
        }
        Ok(())
    }

    fn process_midi(&mut self, events: &[MidiEvent]) -> anyhow::Result<()> {
        for event in events {
            self.handle_midi(event);
        }
        Ok(())
    }
}

impl NativePlugin for VortexFilter {
    fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    fn edit_sender(&self) -> ParameterEditSender {
        self.edits.sender()
    }

    fn set_parameter(&mut self, id: ParameterId, value: i32) -> Result<(), PluginParameterError> {
        let previous = self.parameters.set(id, value)?;
        tracing::debug!(%id, previous, value, "parameter changed");
        if id == Param::Mode.id() && previous != value {
            tracing::debug!(from = previous, to = value, "mode changed, resetting filter stages");
        }
        self.on_parameter_changed(id, previous, value);
        Ok(())
    }

    fn parameter_string(&self, id: ParameterId, value: i32) -> Option<String> {
        match Param::from_id(id)? {
            Param::Cutoff => Some(format_cutoff(value)),
            Param::Resonance => Some(format_resonance(value)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FilterMode;

    const FRAMES: usize = 64;

    fn prepared() -> (VortexFilter, BusBuffer) {
        let mut filter = VortexFilter::new();
        let config = BufferConfig::new(48_000.0, FRAMES, 8);
        filter.prepare(&config).expect("prepare");
        filter.set(Param::Input, 1).expect("input");
        (filter, BusBuffer::from_config(&config))
    }

    fn cc(control: u8, value: u8) -> MidiEvent {
        MidiEvent::ControlChange {
            channel: 0,
            control,
            value,
        }
    }

    fn fill(buses: &mut BusBuffer, code: i32, value: f32) {
        if let Some(bus) = buses.bus_mut(code) {
            bus.fill(value);
        }
    }

    #[test]
    fn prepare_rejects_bad_configs() {
        let mut filter = VortexFilter::new();
        assert!(filter.prepare(&BufferConfig::new(0.0, 64, 8)).is_err());
        assert!(filter.prepare(&BufferConfig::new(f32::NAN, 64, 8)).is_err());
        assert!(filter.prepare(&BufferConfig::new(44_100.0, 0, 8)).is_err());
        assert!(filter.prepare(&BufferConfig::new(44_100.0, 64, 8)).is_ok());
        assert_eq!(filter.sample_rate(), 44_100.0);
    }

    #[test]
    fn zero_mix_passes_dry_signal() {
        let (mut filter, mut buses) = prepared();
        filter.set(Param::Mix, 0).expect("mix");
        filter.set(Param::Drive, 1000).expect("drive");
        fill(&mut buses, 1, 0.25);
        filter.process(&mut buses).expect("process");
        assert!(buses.bus(1).is_some_and(|bus| bus.iter().all(|&s| s == 0.25)));
    }

    #[test]
    fn unrouted_input_falls_back_to_audio_cv() {
        let (mut filter, mut buses) = prepared();
        filter.set(Param::Input, 0).expect("input");
        filter.set(Param::CvAudioIn, 3).expect("cv in");
        filter.set(Param::Output, 2).expect("output");
        filter.set(Param::Mix, 0).expect("mix");
        fill(&mut buses, 3, 0.5);
        filter.process(&mut buses).expect("process");
        assert!(buses.bus(2).is_some_and(|bus| bus.iter().all(|&s| s == 0.5)));
    }

    #[test]
    fn add_mode_accumulates_into_output() {
        let (mut filter, mut buses) = prepared();
        filter.set(Param::Input, 1).expect("input");
        filter.set(Param::Output, 2).expect("output");
        filter.set(Param::OutputMode, 1).expect("output mode");
        filter.set(Param::Mix, 0).expect("mix");
        fill(&mut buses, 1, 0.25);
        fill(&mut buses, 2, 0.5);
        filter.process(&mut buses).expect("process");
        assert!(buses.bus(2).is_some_and(|bus| bus.iter().all(|&s| s == 0.75)));
    }

    #[test]
    fn mode_change_resets_only_on_new_value() {
        let (mut filter, mut buses) = prepared();
        fill(&mut buses, 1, 0.5);
        filter.process(&mut buses).expect("process");
        assert!(!filter.stages().is_silent());

        filter.set(Param::Mode, 1).expect("same mode");
        assert!(!filter.stages().is_silent());

        filter.set(Param::Mode, 4).expect("new mode");
        assert!(filter.stages().is_silent());
        assert_eq!(filter.state().mode, FilterMode::Bandpass);
    }

    #[test]
    fn queued_edits_apply_on_next_block() {
        let (mut filter, mut buses) = prepared();
        let sender = filter.edit_sender();
        sender.post(ParameterEdit::new(Param::Poles.id(), 1));
        assert_eq!(filter.parameter_value(Param::Poles.id()), Ok(0));
        filter.process(&mut buses).expect("process");
        assert_eq!(filter.parameter_value(Param::Poles.id()), Ok(1));
    }

    #[test]
    fn input_starts_unrouted() {
        let filter = VortexFilter::new();
        assert_eq!(filter.parameter_value(Param::Input.id()), Ok(0));
        assert_eq!(filter.routing().input, 0);
    }

    #[test]
    fn cc_burst_keeps_the_last_value() {
        let (mut filter, _) = prepared();
        let mut burst = vec![cc(14, 0); EDIT_QUEUE_CAPACITY + 44];
        burst.push(cc(14, 127));
        filter.process_midi(&burst).expect("midi");
        assert_eq!(filter.parameter_value(Param::Mode.id()), Ok(6));
        assert_eq!(filter.state().mode, FilterMode::Allpass);
    }

    #[test]
    fn cc_channel_change_applies_to_later_messages() {
        let (mut filter, _) = prepared();
        // CC21 = 16 selects MIDI channel 2.
        let moved = MidiEvent::ControlChange {
            channel: 1,
            control: 16,
            value: 64,
        };
        filter
            .process_midi(&[cc(21, 16), cc(16, 127), moved])
            .expect("midi");
        assert_eq!(filter.parameter_value(Param::MidiChannel.id()), Ok(2));
        assert_eq!(filter.parameter_value(Param::Resonance.id()), Ok(503));
    }

    #[test]
    fn cc_mode_change_resets_stages() {
        let (mut filter, mut buses) = prepared();
        fill(&mut buses, 1, 0.5);
        filter.process(&mut buses).expect("process");
        assert!(!filter.stages().is_silent());
        filter.process_midi(&[cc(14, 127)]).expect("midi");
        assert!(filter.stages().is_silent());
    }

    #[test]
    fn version_is_read_only() {
        let mut filter = VortexFilter::new();
        assert_eq!(
            filter.set(Param::Version, 0),
            Err(PluginParameterError::ReadOnly(Param::Version.id()))
        );
    }

    #[test]
    fn display_strings_for_cutoff_and_resonance() {
        let filter = VortexFilter::new();
        assert_eq!(
            filter.parameter_string(Param::Cutoff.id(), 0).as_deref(),
            Some("20.0 Hz")
        );
        assert_eq!(
            filter.parameter_string(Param::Resonance.id(), 250).as_deref(),
            Some("25.0%")
        );
        assert_eq!(filter.parameter_string(Param::Mix.id(), 500), None);
    }
}

use vortex_dsp::mapping::{
    cutoff_param_to_hz, permille_to_bipolar, permille_to_unit, resonance_to_damping,
};
use vortex_dsp::SvfTap;
use vortex_plugin_sdk::{
    ParameterDefinition, ParameterId, ParameterLayout, ParameterPage, ParameterScaling,
    ParameterSet, ParameterUnit, DEFAULT_BUS_COUNT,
};

/// Parameter indices, in layout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    Input,
    Output,
    OutputMode,
    Mode,
    Cutoff,
    Resonance,
    Poles,
    Drive,
    Mix,
    FmDepth,
    MidiChannel,
    Version,
    CvAudioIn,
    CvCutoffVoct,
    CvCutoffFm,
    CvResonance,
    CvMode,
    CvDrive,
    CvMix,
}

impl Param {
    pub const COUNT: usize = 19;

    pub const ALL: [Param; Param::COUNT] = [
        Param::Input,
        Param::Output,
        Param::OutputMode,
        Param::Mode,
        Param::Cutoff,
        Param::Resonance,
        Param::Poles,
        Param::Drive,
        Param::Mix,
        Param::FmDepth,
        Param::MidiChannel,
        Param::Version,
        Param::CvAudioIn,
        Param::CvCutoffVoct,
        Param::CvCutoffFm,
        Param::CvResonance,
        Param::CvMode,
        Param::CvDrive,
        Param::CvMix,
    ];

    pub const fn id(self) -> ParameterId {
        ParameterId::new(self as usize)
    }

    pub fn from_id(id: ParameterId) -> Option<Self> {
        Self::ALL.get(id.index()).copied()
    }
}

impl From<Param> for ParameterId {
    fn from(param: Param) -> Self {
        param.id()
    }
}

pub const MODE_NAMES: [&str; 7] = [
    "LP 6dB", "LP 12dB", "HP 6dB", "HP 12dB", "Bandpass", "Notch", "Allpass",
];
pub const POLES_NAMES: [&str; 2] = ["2-pole", "4-pole"];
pub const OUTPUT_MODE_NAMES: [&str; 2] = ["Replace", "Add"];
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter topology, indexed as the Mode parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    Lp6,
    Lp12,
    Hp6,
    Hp12,
    Bandpass,
    Notch,
    Allpass,
}

/// Which section a mode runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    OnePoleLowpass,
    OnePoleHighpass,
    TwoPole(SvfTap),
}

impl FilterMode {
    pub const MAX_INDEX: i32 = 6;

    /// Mode for an index, clamped into 0..=6.
    pub fn from_index(index: i32) -> Self {
        match index.clamp(0, Self::MAX_INDEX) {
            0 => FilterMode::Lp6,
            1 => FilterMode::Lp12,
            2 => FilterMode::Hp6,
            3 => FilterMode::Hp12,
            4 => FilterMode::Bandpass,
            5 => FilterMode::Notch,
            _ => FilterMode::Allpass,
        }
    }

    pub fn index(self) -> i32 {
        self as i32
    }

    pub fn section(self) -> Section {
        match self {
            FilterMode::Lp6 => Section::OnePoleLowpass,
            FilterMode::Hp6 => Section::OnePoleHighpass,
            FilterMode::Lp12 => Section::TwoPole(SvfTap::Lowpass),
            FilterMode::Hp12 => Section::TwoPole(SvfTap::Highpass),
            FilterMode::Bandpass => Section::TwoPole(SvfTap::Bandpass),
            FilterMode::Notch => Section::TwoPole(SvfTap::Notch),
            FilterMode::Allpass => Section::TwoPole(SvfTap::Allpass),
        }
    }

    pub fn name(self) -> &'static str {
        MODE_NAMES[self as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poles {
    Two,
    Four,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Replace,
    Add,
}

/// Control-rate parameter state read by the audio path.
///
/// Each field is already converted to its physical unit and clamped to its
/// range; the audio path copies this once per block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterState {
    pub mode: FilterMode,
    pub cutoff_hz: f32,
    pub damping: f32,
    pub poles: Poles,
    pub drive: f32,
    pub mix: f32,
    pub fm_depth: f32,
    /// Zero-based MIDI channel.
    pub midi_channel: u8,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            mode: FilterMode::Lp12,
            cutoff_hz: cutoff_param_to_hz(500),
            damping: resonance_to_damping(0),
            poles: Poles::Two,
            drive: 0.0,
            mix: 1.0,
            fm_depth: 0.0,
            midi_channel: 0,
        }
    }
}

impl FilterState {
    pub fn from_parameters(parameters: &ParameterSet) -> Self {
        let mut state = Self::default();
        for param in Param::ALL {
            if let Some(code) = parameters.get(param.id()) {
                state.apply(param, code);
            }
        }
        state
    }

    /// Converts a parameter code into state. Returns `false` for parameters
    /// that live elsewhere (routing, version).
    pub fn apply(&mut self, param: Param, code: i32) -> bool {
        match param {
            Param::Mode => self.mode = FilterMode::from_index(code),
            Param::Cutoff => self.cutoff_hz = cutoff_param_to_hz(code),
            Param::Resonance => self.damping = resonance_to_damping(code),
            Param::Poles => {
                self.poles = if code >= 1 { Poles::Four } else { Poles::Two };
            }
            Param::Drive => self.drive = permille_to_unit(code),
            Param::Mix => self.mix = permille_to_unit(code),
            Param::FmDepth => self.fm_depth = permille_to_bipolar(code),
            Param::MidiChannel => self.midi_channel = (code.clamp(1, 16) - 1) as u8,
            _ => return false,
        }
        true
    }
}

/// Bus assignments, as host bus codes (0 = unrouted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Routing {
    pub input: i32,
    pub output: i32,
    pub output_mode: OutputMode,
    pub cv_audio_in: i32,
    pub cv_voct: i32,
    pub cv_fm: i32,
    pub cv_resonance: i32,
    pub cv_mode: i32,
    pub cv_drive: i32,
    pub cv_mix: i32,
}

impl Default for Routing {
    fn default() -> Self {
        Self {
            input: 0,
            output: 1,
            output_mode: OutputMode::Replace,
            cv_audio_in: 0,
            cv_voct: 0,
            cv_fm: 0,
            cv_resonance: 0,
            cv_mode: 0,
            cv_drive: 0,
            cv_mix: 0,
        }
    }
}

impl Routing {
    pub fn from_parameters(parameters: &ParameterSet) -> Self {
        let mut routing = Self::default();
        for param in Param::ALL {
            if let Some(code) = parameters.get(param.id()) {
                routing.apply(param, code);
            }
        }
        routing
    }

    pub fn apply(&mut self, param: Param, code: i32) -> bool {
        match param {
            Param::Input => self.input = code,
            Param::Output => self.output = code,
            Param::OutputMode => {
                self.output_mode = if code >= 1 {
                    OutputMode::Add
                } else {
                    OutputMode::Replace
                };
            }
            Param::CvAudioIn => self.cv_audio_in = code,
            Param::CvCutoffVoct => self.cv_voct = code,
            Param::CvCutoffFm => self.cv_fm = code,
            Param::CvResonance => self.cv_resonance = code,
            Param::CvMode => self.cv_mode = code,
            Param::CvDrive => self.cv_drive = code,
            Param::CvMix => self.cv_mix = code,
            _ => return false,
        }
        true
    }
}

pub fn filter_layout() -> ParameterLayout {
    let bus = DEFAULT_BUS_COUNT;
    let cv = |param: Param, name: &str| {
        ParameterDefinition::bus(param, name, ParameterUnit::CvInput, 0, bus, 0)
    };
    ParameterLayout::new(vec![
        ParameterDefinition::bus(Param::Input, "Input", ParameterUnit::AudioInput, 0, bus, 0),
        ParameterDefinition::bus(Param::Output, "Output", ParameterUnit::AudioOutput, 1, bus, 1),
        ParameterDefinition::choice(Param::OutputMode, "Output mode", &OUTPUT_MODE_NAMES, 0)
            .with_unit(ParameterUnit::OutputMode),
        ParameterDefinition::choice(Param::Mode, "Mode", &MODE_NAMES, 1)
            .with_description("Filter topology"),
        ParameterDefinition::range(Param::Cutoff, "Cutoff", 0..=1000, 500)
            .with_unit(ParameterUnit::HasStrings)
            .with_description("Exponential 20 Hz to 20 kHz"),
        ParameterDefinition::range(Param::Resonance, "Resonance", 0..=1000, 0)
            .with_unit(ParameterUnit::HasStrings)
            .with_scaling(ParameterScaling::Tenths),
        ParameterDefinition::choice(Param::Poles, "Poles", &POLES_NAMES, 0),
        ParameterDefinition::range(Param::Drive, "Drive", 0..=1000, 0)
            .with_unit(ParameterUnit::Percent)
            .with_scaling(ParameterScaling::Tenths),
        ParameterDefinition::range(Param::Mix, "Mix", 0..=1000, 1000)
            .with_unit(ParameterUnit::Percent)
            .with_scaling(ParameterScaling::Tenths),
        ParameterDefinition::range(Param::FmDepth, "FM Depth", -1000..=1000, 0)
            .with_unit(ParameterUnit::Percent)
            .with_scaling(ParameterScaling::Tenths)
            .with_description("Attenuverter for the cutoff FM input"),
        ParameterDefinition::range(Param::MidiChannel, "MIDI Channel", 1..=16, 1),
        ParameterDefinition::choice(Param::Version, "Version", &[VERSION], 0).read_only(),
        ParameterDefinition::bus(
            Param::CvAudioIn,
            "Audio In CV",
            ParameterUnit::AudioInput,
            0,
            bus,
            0,
        ),
        cv(Param::CvCutoffVoct, "Cutoff V/OCT CV"),
        cv(Param::CvCutoffFm, "Cutoff FM CV"),
        cv(Param::CvResonance, "Resonance CV"),
        cv(Param::CvMode, "Mode CV"),
        cv(Param::CvDrive, "Drive CV"),
        cv(Param::CvMix, "Mix CV"),
    ])
    .with_pages(vec![
        ParameterPage::new(
            "I/O",
            &[Param::Input.id(), Param::Output.id(), Param::OutputMode.id()],
        ),
        ParameterPage::new(
            "Filter",
            &[
                Param::Mode.id(),
                Param::Cutoff.id(),
                Param::Resonance.id(),
                Param::Poles.id(),
                Param::Drive.id(),
            ],
        ),
        ParameterPage::new(
            "Global",
            &[Param::Mix.id(), Param::FmDepth.id(), Param::Version.id()],
        ),
        ParameterPage::new("MIDI", &[Param::MidiChannel.id()]),
        ParameterPage::new(
            "CV",
            &[
                Param::CvAudioIn.id(),
                Param::CvCutoffVoct.id(),
                Param::CvCutoffFm.id(),
                Param::CvResonance.id(),
                Param::CvMode.id(),
                Param::CvDrive.id(),
                Param::CvMix.id(),
            ],
        ),
    ])
}

//! MIDI control surface: keyboard tracking, pitch bend and the fixed CC table.

use vortex_dsp::mapping::{midi_note_to_freq, semitones_to_mult};
use vortex_plugin_sdk::{MidiEvent, ParameterEdit, ParameterLayout};

use crate::params::Param;

/// First controller number of the CC table.
pub const CC_FIRST: u8 = 14;

/// Contiguous CC block starting at [`CC_FIRST`].
pub const CC_MAP: [Param; 9] = [
    Param::Mode,
    Param::Cutoff,
    Param::Resonance,
    Param::Poles,
    Param::Drive,
    Param::Mix,
    Param::FmDepth,
    Param::MidiChannel,
    Param::Version,
];

/// Pitch wheel range in semitones each way.
pub const PITCH_BEND_SEMITONES: f32 = 2.0;

/// Parameter a controller number drives, if it is in the table.
pub fn cc_target(control: u8) -> Option<Param> {
    let offset = control.checked_sub(CC_FIRST)?;
    CC_MAP.get(offset as usize).copied()
}

/// Rescales a 7-bit controller value into `min..=max`, truncating.
pub fn scale_cc(value: u8, min: i32, max: i32) -> i32 {
    min + (value.min(127) as i32 * (max - min)) / 127
}

/// Pitch-bend multiplier for a 14-bit wheel position.
pub fn pitch_bend_mult(value: u16) -> f32 {
    let center = MidiEvent::PITCH_BEND_CENTER as f32;
    let norm = (value.min(16_383) as f32 - center) / center;
    semitones_to_mult(norm * PITCH_BEND_SEMITONES)
}

/// Monophonic keyboard-tracking state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MidiTracking {
    pub note: u8,
    pub gate: bool,
    /// Cutoff from the last note-on, 0 until a note has been played.
    pub cutoff_hz: f32,
    pub bend_mult: f32,
}

impl Default for MidiTracking {
    fn default() -> Self {
        Self {
            note: 60,
            gate: false,
            cutoff_hz: 0.0,
            bend_mult: 1.0,
        }
    }
}

impl MidiTracking {
    /// Keyboard-tracked cutoff while a note is held.
    #[inline]
    pub fn cutoff_override(&self) -> Option<f32> {
        (self.gate && self.cutoff_hz > 0.0).then(|| self.cutoff_hz * self.bend_mult)
    }
}

/// Turns channel-voice MIDI into tracking updates and parameter edits.
#[derive(Debug, Clone, Default)]
pub struct ControlSurface {
    tracking: MidiTracking,
}

impl ControlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracking(&self) -> &MidiTracking {
        &self.tracking
    }

    /// Applies one event received while listening on `channel` (zero-based).
    ///
    /// Note and bend messages update tracking in place. A mapped CC yields
    /// the parameter edit to post; events on other channels, unmapped CCs and
    /// CCs aimed at read-only parameters do nothing.
    pub fn handle(
        &mut self,
        event: &MidiEvent,
        channel: u8,
        layout: &ParameterLayout,
    ) -> Option<ParameterEdit> {
        if event.channel() != channel {
            return None;
        }

        match *event {
            MidiEvent::NoteOn { note, velocity, .. } if velocity > 0 => {
                self.tracking.note = note;
                self.tracking.gate = true;
                self.tracking.cutoff_hz = midi_note_to_freq(note as f32);
                None
            }
            MidiEvent::NoteOn { note, .. } | MidiEvent::NoteOff { note, .. } => {
                if note == self.tracking.note {
                    self.tracking.gate = false;
                }
                None
            }
            MidiEvent::PitchBend { value, .. } => {
                self.tracking.bend_mult = pitch_bend_mult(value);
                None
            }
            MidiEvent::ControlChange { control, value, .. } => {
                let param = cc_target(control)?;
                let definition = layout.find(param.id())?;
                if definition.read_only {
                    return None;
                }
                let code = scale_cc(value, definition.min, definition.max);
                Some(ParameterEdit::new(param.id(), code))
            }
        }
    }
}

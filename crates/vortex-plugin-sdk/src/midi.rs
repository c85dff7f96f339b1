use serde::{Deserialize, Serialize};

/// Channel-voice MIDI message as delivered by the host's MIDI transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MidiEvent {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
    ControlChange { channel: u8, control: u8, value: u8 },
    /// 14-bit bend, 0..=16383 centred at 8192.
    PitchBend { channel: u8, value: u16 },
}

impl MidiEvent {
    /// Centre position of the pitch wheel.
    pub const PITCH_BEND_CENTER: u16 = 8192;

    /// Decodes a 3-byte channel-voice message. Status bytes other than note
    /// on/off, control change and pitch bend yield `None`.
    pub fn from_bytes(bytes: [u8; 3]) -> Option<Self> {
        let status = bytes[0] & 0xF0;
        let channel = bytes[0] & 0x0F;
        let data1 = bytes[1] & 0x7F;
        let data2 = bytes[2] & 0x7F;

        match status {
            0x80 => Some(MidiEvent::NoteOff {
                channel,
                note: data1,
                velocity: data2,
            }),
            0x90 => Some(MidiEvent::NoteOn {
                channel,
                note: data1,
                velocity: data2,
            }),
            0xB0 => Some(MidiEvent::ControlChange {
                channel,
                control: data1,
                value: data2,
            }),
            0xE0 => Some(MidiEvent::PitchBend {
                channel,
                value: ((data2 as u16) << 7) | data1 as u16,
            }),
            _ => None,
        }
    }

    pub fn to_bytes(self) -> [u8; 3] {
        match self {
            MidiEvent::NoteOff {
                channel,
                note,
                velocity,
            } => [0x80 | channel, note, velocity],
            MidiEvent::NoteOn {
                channel,
                note,
                velocity,
            } => [0x90 | channel, note, velocity],
            MidiEvent::ControlChange {
                channel,
                control,
                value,
            } => [0xB0 | channel, control, value],
            MidiEvent::PitchBend { channel, value } => {
                [0xE0 | channel, (value & 0x7F) as u8, ((value >> 7) & 0x7F) as u8]
            }
        }
    }

    /// Zero-based MIDI channel.
    pub fn channel(&self) -> u8 {
        match *self {
            MidiEvent::NoteOn { channel, .. }
            | MidiEvent::NoteOff { channel, .. }
            | MidiEvent::ControlChange { channel, .. }
            | MidiEvent::PitchBend { channel, .. } => channel,
        }
    }
}

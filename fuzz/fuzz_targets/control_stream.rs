#![no_main]

use libfuzzer_sys::fuzz_target;
use vortex_filter::{Param, VortexFilter};
use vortex_plugin_sdk::{AudioProcessor, BufferConfig, BusBuffer, NativePlugin, ParameterId};

// Each 4-byte record is either a raw MIDI message (tag bit clear) or a host
// parameter write (tag bit set), followed by one processed block.
fuzz_target!(|data: &[u8]| {
    let config = BufferConfig::new(48_000.0, 32, 8);
    let mut filter = VortexFilter::new();
    if filter.prepare(&config).is_err() || filter.set(Param::Input, 1).is_err() {
        return;
    }
    let mut buses = BusBuffer::from_config(&config);

    for record in data.chunks_exact(4) {
        if record[0] & 0x80 == 0 {
            filter.process_midi_bytes(&[[record[1] | 0x80, record[2], record[3]]]);
        } else {
            let id = ParameterId((record[0] & 0x1F) as usize);
            let value = i16::from_le_bytes([record[2], record[3]]) as i32;
            let _ = filter.set_parameter(id, value);
        }

        for slot in 0..buses.bus_count() {
            for frame in 0..buses.frames() {
                let phase = (frame + slot * 7) as f32 * 0.1;
                buses.write(slot, frame, phase.sin() * (1 + slot) as f32);
            }
        }
        if filter.process(&mut buses).is_err() {
            return;
        }
        for code in 1..=8 {
            if let Some(bus) = buses.bus(code) {
                assert!(bus.iter().all(|sample| sample.is_finite()));
            }
        }
    }
});

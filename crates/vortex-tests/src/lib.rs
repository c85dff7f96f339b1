//! Offline rig shared by the scenario tests: a prepared [`VortexFilter`]
//! driven block by block with a signal on bus 1 and its output on bus 2.

use std::f32::consts::TAU;

use vortex_filter::{Param, VortexFilter};
use vortex_plugin_sdk::{AudioProcessor, BufferConfig, BusBuffer};

pub const SAMPLE_RATE: f32 = 48_000.0;
pub const BLOCK: usize = 64;
pub const BUSES: usize = 8;
pub const INPUT_BUS: i32 = 1;
pub const OUTPUT_BUS: i32 = 2;

pub struct Rig {
    pub filter: VortexFilter,
    pub buses: BusBuffer,
}

impl Rig {
    pub fn new() -> anyhow::Result<Self> {
        let config = BufferConfig::new(SAMPLE_RATE, BLOCK, BUSES);
        let mut filter = VortexFilter::new();
        filter.prepare(&config)?;
        filter.set(Param::Input, INPUT_BUS)?;
        filter.set(Param::Output, OUTPUT_BUS)?;
        Ok(Self {
            filter,
            buses: BusBuffer::from_config(&config),
        })
    }

    pub fn with(mut self, settings: &[(Param, i32)]) -> anyhow::Result<Self> {
        for &(param, value) in settings {
            self.filter.set(param, value)?;
        }
        Ok(self)
    }

    /// Runs `input` through the filter with each `(bus code, samples)` pair
    /// written to its bus alongside it, and returns the output bus. CV slices
    /// shorter than `input` read as 0 V past their end.
    pub fn run_with_cv(
        &mut self,
        input: &[f32],
        cv: &[(i32, &[f32])],
    ) -> anyhow::Result<Vec<f32>> {
        let mut output = Vec::with_capacity(input.len());
        for (index, chunk) in input.chunks(BLOCK).enumerate() {
            let offset = index * BLOCK;
            self.buses.clear();
            if let Some(bus) = self.buses.bus_mut(INPUT_BUS) {
                bus[..chunk.len()].copy_from_slice(chunk);
            }
            for &(code, samples) in cv {
                if let Some(bus) = self.buses.bus_mut(code) {
                    for (frame, sample) in bus.iter_mut().enumerate() {
                        *sample = samples.get(offset + frame).copied().unwrap_or(0.0);
                    }
                }
            }
            self.filter.process(&mut self.buses)?;
            let out = self
                .buses
                .bus(OUTPUT_BUS)
                .ok_or_else(|| anyhow::anyhow!("output bus missing"))?;
            output.extend_from_slice(&out[..chunk.len()]);
        }
        Ok(output)
    }

    pub fn run(&mut self, input: &[f32]) -> anyhow::Result<Vec<f32>> {
        self.run_with_cv(input, &[])
    }

    /// Processes one block with silent buses so queued edits are applied.
    pub fn idle_block(&mut self) -> anyhow::Result<()> {
        self.buses.clear();
        self.filter.process(&mut self.buses)
    }
}

pub fn sine(freq: f32, frames: usize) -> Vec<f32> {
    (0..frames)
        .map(|n| (TAU * freq * n as f32 / SAMPLE_RATE).sin())
        .collect()
}

pub fn constant(value: f32, frames: usize) -> Vec<f32> {
    vec![value; frames]
}

pub fn impulse(frames: usize) -> Vec<f32> {
    let mut signal = vec![0.0; frames];
    if let Some(first) = signal.first_mut() {
        *first = 1.0;
    }
    signal
}

pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / samples.len() as f64).sqrt() as f32
}

pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0, |acc: f32, &s| acc.max(s.abs()))
}

pub fn db(ratio: f32) -> f32 {
    20.0 * ratio.log10()
}

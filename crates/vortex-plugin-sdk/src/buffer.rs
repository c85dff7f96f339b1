use serde::{Deserialize, Serialize};

/// Number of buses a host provides when it does not say otherwise.
pub const DEFAULT_BUS_COUNT: usize = 28;

/// Shared configuration passed to processors during preparation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BufferConfig {
    pub sample_rate: f32,
    pub block_size: usize,
    pub bus_count: usize,
}

impl BufferConfig {
    pub fn new(sample_rate: f32, block_size: usize, bus_count: usize) -> Self {
        Self {
            sample_rate,
            block_size,
            bus_count,
        }
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self::new(48_000.0, 128, DEFAULT_BUS_COUNT)
    }
}

/// Block of numbered mono buses shared by audio and control-voltage signals.
///
/// Buses are addressed by the host's 1-based bus codes; code 0 means
/// "unrouted". [`BusBuffer::resolve`] turns a code into a slot once per block
/// so the per-sample path only does plain indexing.
#[derive(Debug, Clone)]
pub struct BusBuffer {
    frames: usize,
    buses: Vec<Vec<f32>>,
}

impl BusBuffer {
    pub fn new(bus_count: usize, frames: usize) -> Self {
        let buses = (0..bus_count).map(|_| vec![0.0; frames]).collect();
        Self { frames, buses }
    }

    pub fn from_config(config: &BufferConfig) -> Self {
        Self::new(config.bus_count, config.block_size)
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    pub fn clear(&mut self) {
        for bus in &mut self.buses {
            bus.fill(0.0);
        }
    }

    /// Maps a 1-based bus code to a slot; `None` for 0 or codes past the
    /// last bus.
    #[inline]
    pub fn resolve(&self, code: i32) -> Option<usize> {
        let slot = usize::try_from(code).ok()?.checked_sub(1)?;
        (slot < self.buses.len()).then_some(slot)
    }

    /// Bus contents for a 1-based code.
    pub fn bus(&self, code: i32) -> Option<&[f32]> {
        self.resolve(code).map(|slot| self.buses[slot].as_slice())
    }

    pub fn bus_mut(&mut self, code: i32) -> Option<&mut [f32]> {
        let slot = self.resolve(code)?;
        Some(self.buses[slot].as_mut_slice())
    }

    #[inline]
    pub fn read(&self, slot: usize, frame: usize) -> f32 {
        self.buses[slot][frame]
    }

    #[inline]
    pub fn write(&mut self, slot: usize, frame: usize, value: f32) {
        self.buses[slot][frame] = value;
    }

    #[inline]
    pub fn accumulate(&mut self, slot: usize, frame: usize, value: f32) {
        self.buses[slot][frame] += value;
    }
}

impl Default for BusBuffer {
    fn default() -> Self {
        Self::from_config(&BufferConfig::default())
    }
}

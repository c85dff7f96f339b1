use vortex_dsp::{OnePole, Svf};

use crate::params::{FilterMode, Poles, Section};

/// Stage A and stage B of each section kind.
///
/// Four-pole operation feeds stage A's output through an identically
/// configured stage B of the same kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct CascadeStages {
    one_pole: [OnePole; 2],
    svf: [Svf; 2],
}

impl CascadeStages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconfigures the stages `mode` selects and runs one sample through them.
    #[inline]
    pub fn process(
        &mut self,
        mode: FilterMode,
        poles: Poles,
        sample_rate: f32,
        cutoff_hz: f32,
        damping: f32,
        input: f32,
    ) -> f32 {
        let stages = match poles {
            Poles::Two => 1,
            Poles::Four => 2,
        };

        let mut signal = input;
        match mode.section() {
            Section::OnePoleLowpass => {
                for stage in &mut self.one_pole[..stages] {
                    stage.configure_lp(sample_rate, cutoff_hz);
                    signal = stage.process_lp(signal);
                    stage.flush_denormals();
                }
            }
            Section::OnePoleHighpass => {
                for stage in &mut self.one_pole[..stages] {
                    stage.configure_hp(sample_rate, cutoff_hz);
                    signal = stage.process_hp(signal);
                    stage.flush_denormals();
                }
            }
            Section::TwoPole(tap) => {
                for stage in &mut self.svf[..stages] {
                    stage.configure(sample_rate, cutoff_hz, damping, tap);
                    signal = stage.process(signal);
                    stage.flush_denormals();
                }
            }
        }
        signal
    }

    /// Zeroes every stage of both kinds.
    pub fn reset(&mut self) {
        self.one_pole.iter_mut().for_each(OnePole::reset);
        self.svf.iter_mut().for_each(Svf::reset);
    }

    pub fn is_silent(&self) -> bool {
        self.one_pole.iter().all(|stage| stage.state() == 0.0)
            && self.svf.iter().all(|stage| stage.state() == (0.0, 0.0))
    }
}

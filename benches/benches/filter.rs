use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use vortex_filter::{Param, VortexFilter};
use vortex_plugin_sdk::{AudioProcessor, BufferConfig, BusBuffer};

const CV_BUS: i32 = 3;

fn filter_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("vortex");
    group.measurement_time(Duration::from_secs(5));

    for (label, poles, modulated) in [
        ("2-pole", 0, false),
        ("4-pole", 1, false),
        ("4-pole+cv", 1, true),
    ] {
        group.bench_function(BenchmarkId::new("block64_48k", label), |b| {
            let config = BufferConfig::new(48_000.0, 64, 8);
            let mut filter = VortexFilter::new();
            filter.prepare(&config).expect("prepare");
            filter.set(Param::Input, 1).expect("input");
            filter.set(Param::Poles, poles).expect("poles");
            filter.set(Param::Resonance, 700).expect("resonance");
            if modulated {
                filter.set(Param::CvCutoffVoct, CV_BUS).expect("cv");
            }

            let mut buses = BusBuffer::from_config(&config);
            b.iter(|| {
                if let Some(bus) = buses.bus_mut(1) {
                    for (n, sample) in bus.iter_mut().enumerate() {
                        *sample = (n as f32 * 0.07).sin();
                    }
                }
                if let Some(bus) = buses.bus_mut(CV_BUS) {
                    for (n, sample) in bus.iter_mut().enumerate() {
                        *sample = (n as f32 * 0.01).sin();
                    }
                }
                filter.process(&mut buses).expect("process block");
            });
        });
    }

    group.finish();
}

criterion_group!(benches, filter_blocks);
criterion_main!(benches);

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use vortex_filter::{Param, VortexFilter};
use vortex_plugin_sdk::{
    AudioProcessor, BufferConfig, BusBuffer, MidiEvent, NativePlugin, ParameterDefinition,
    ParameterScaling, ParameterUnit, DEFAULT_BUS_COUNT,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => execute_render(args),
        Commands::Params(args) => execute_params(args),
    }
}

#[derive(Parser)]
#[command(author, version, about = "Offline tools for the Vortex multi-mode filter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a WAV file through the filter.
    Render(RenderArgs),
    /// List the parameter surface with defaults.
    Params(ParamsArgs),
}

#[derive(Args)]
struct RenderArgs {
    /// Source WAV file; only the first channel is used.
    #[arg(long)]
    input: PathBuf,
    /// Destination for the mono 32-bit float result.
    #[arg(long)]
    output: PathBuf,
    /// Filter mode (0 = LP 6dB .. 6 = Allpass).
    #[arg(long)]
    mode: Option<i32>,
    /// Cutoff code, 0..=1000 on an exponential 20 Hz..20 kHz scale.
    #[arg(long)]
    cutoff: Option<i32>,
    /// Resonance code, 0..=1000.
    #[arg(long)]
    resonance: Option<i32>,
    /// 0 = 2-pole, 1 = 4-pole.
    #[arg(long)]
    poles: Option<i32>,
    /// Drive code, 0..=1000.
    #[arg(long)]
    drive: Option<i32>,
    /// Dry/wet code, 0..=1000.
    #[arg(long)]
    mix: Option<i32>,
    /// Any other parameter as NAME=CODE, matched case-insensitively.
    #[arg(long = "set", value_name = "NAME=CODE")]
    overrides: Vec<String>,
    /// Hold this MIDI note for keyboard tracking.
    #[arg(long)]
    note: Option<u8>,
    #[arg(long, default_value_t = 128)]
    block_size: usize,
}

#[derive(Args)]
struct ParamsArgs {
    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn execute_render(args: RenderArgs) -> Result<()> {
    let (sample_rate, samples) = read_first_channel(&args.input)?;

    let mut filter = VortexFilter::new();
    // The source is written to bus 1.
    filter.set(Param::Input, 1)?;
    let named = [
        (Param::Mode, args.mode),
        (Param::Cutoff, args.cutoff),
        (Param::Resonance, args.resonance),
        (Param::Poles, args.poles),
        (Param::Drive, args.drive),
        (Param::Mix, args.mix),
    ];
    for (param, value) in named {
        if let Some(value) = value {
            filter
                .set(param, value)
                .with_context(|| format!("invalid value for {param:?}"))?;
        }
    }
    for assignment in &args.overrides {
        apply_override(&mut filter, assignment)?;
    }

    let config = BufferConfig::new(sample_rate as f32, args.block_size, DEFAULT_BUS_COUNT);
    filter.prepare(&config)?;

    if let Some(note) = args.note {
        let channel = filter.state().midi_channel;
        filter.process_midi(&[MidiEvent::NoteOn {
            channel,
            note: note.min(127),
            velocity: 100,
        }])?;
    }

    let rendered = render(&mut filter, &config, &samples)?;
    write_mono(&args.output, sample_rate, &rendered)?;
    println!(
        "Rendered {} frames at {} Hz to {}",
        rendered.len(),
        sample_rate,
        args.output.display()
    );
    Ok(())
}

fn apply_override(filter: &mut VortexFilter, assignment: &str) -> Result<()> {
    let (name, code) = assignment
        .split_once('=')
        .ok_or_else(|| anyhow!("expected NAME=CODE, got `{assignment}`"))?;
    let code: i32 = code
        .trim()
        .parse()
        .with_context(|| format!("`{code}` is not an integer code"))?;
    let id = filter
        .parameter_layout()
        .find_by_name(name.trim())
        .map(|definition| definition.id)
        .ok_or_else(|| anyhow!("unknown parameter `{}`", name.trim()))?;
    filter.set_parameter(id, code)?;
    Ok(())
}

fn render(filter: &mut VortexFilter, config: &BufferConfig, input: &[f32]) -> Result<Vec<f32>> {
    let mut buses = BusBuffer::from_config(config);
    let mut rendered = Vec::with_capacity(input.len());

    for chunk in input.chunks(config.block_size) {
        buses.clear();
        if let Some(bus) = buses.bus_mut(1) {
            bus[..chunk.len()].copy_from_slice(chunk);
        }
        filter.process(&mut buses)?;
        let output = buses
            .bus(filter.routing().output)
            .ok_or_else(|| anyhow!("output bus {} is out of range", filter.routing().output))?;
        rendered.extend_from_slice(&output[..chunk.len()]);
    }
    Ok(rendered)
}

fn read_first_channel(path: &Path) -> Result<(u32, Vec<f32>)> {
    let mut reader = WavReader::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let spec = reader.spec();
    if spec.channels == 0 {
        bail!("{} has no channels", path.display());
    }
    let channels = spec.channels as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .with_context(|| format!("failed to decode {}", path.display()))?,
        SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|value| value as f32 / scale))
                .collect::<Result<_, _>>()
                .with_context(|| format!("failed to decode {}", path.display()))?
        }
    };

    let samples = interleaved.into_iter().step_by(channels).collect();
    Ok((spec.sample_rate, samples))
}

fn write_mono(path: &Path, sample_rate: u32, samples: &[f32]) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer
        .finalize()
        .with_context(|| format!("failed to finalize {}", path.display()))?;
    Ok(())
}

#[derive(Serialize)]
struct ParameterReport<'a> {
    #[serde(flatten)]
    definition: &'a ParameterDefinition,
    display: String,
}

fn execute_params(args: ParamsArgs) -> Result<()> {
    let filter = VortexFilter::new();
    let reports: Vec<ParameterReport<'_>> = filter
        .parameters()
        .iter()
        .map(|(definition, code)| ParameterReport {
            definition,
            display: display_value(&filter, definition, code),
        })
        .collect();

    if args.json {
        let json = serde_json::to_string_pretty(&reports)?;
        println!("{json}");
        return Ok(());
    }

    println!("{}", filter.descriptor().description.unwrap_or_default());
    for page in filter.parameter_layout().pages() {
        println!("[{}]", page.name);
        for id in &page.parameters {
            if let Some(report) = reports.get(id.index()) {
                let definition = report.definition;
                println!(
                    "  {:>2} {:<16} {:>6}..={:<6} {}{}",
                    definition.id.index(),
                    definition.name,
                    definition.min,
                    definition.max,
                    report.display,
                    if definition.read_only { " (read-only)" } else { "" }
                );
            }
        }
    }
    Ok(())
}

fn display_value(filter: &VortexFilter, definition: &ParameterDefinition, code: i32) -> String {
    if let Some(text) = filter.parameter_string(definition.id, code) {
        return text;
    }
    if let Some(option) = definition.option(code) {
        return option.to_string();
    }
    match definition.unit {
        ParameterUnit::AudioInput | ParameterUnit::AudioOutput | ParameterUnit::CvInput => {
            if code == 0 {
                "None".to_string()
            } else {
                format!("Bus {code}")
            }
        }
        unit => {
            let value = match definition.scaling {
                ParameterScaling::Tenths => format!("{:.1}", code as f32 / 10.0),
                ParameterScaling::None => code.to_string(),
            };
            if unit == ParameterUnit::Percent {
                format!("{value}%")
            } else {
                value
            }
        }
    }
}

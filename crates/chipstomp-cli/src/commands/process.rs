//! File-based effect processing command.

use super::common::{apply_overrides, load_preset, parse_key_val};
use anyhow::Context;
use chipstomp_config::{Preset, get_factory_preset};
use chipstomp_core::CLIP_LEVEL;
use chipstomp_platform::{AudioEngine, Meters, OfflineClock, SampleClock, standard_pedal};
use clap::Args;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (16-bit mono)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Effect to enable and select (e.g. "bitcrush")
    #[arg(short, long)]
    effect: Option<String>,

    /// Preset file, user preset or factory preset
    #[arg(short, long, conflicts_with = "factory")]
    preset: Option<String>,

    /// Factory preset name
    #[arg(short, long)]
    factory: Option<String>,

    /// Feature settings (e.g. "bits=4", "depth=75%")
    #[arg(short, long = "set", value_parser = parse_key_val, number_of_values = 1)]
    settings: Vec<(String, String)>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let mut preset = match (&args.preset, &args.factory) {
        (Some(name), _) => load_preset(name)?,
        (None, Some(name)) => get_factory_preset(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown factory preset: {name}"))?,
        (None, None) if args.effect.is_some() => Preset::new("Command line"),
        (None, None) => anyhow::bail!("No effect specified. Use --effect, --preset or --factory"),
    };
    apply_overrides(&mut preset, args.effect.as_deref(), &args.settings)?;

    println!("Reading {}...", args.input.display());
    let (samples, sample_rate) = read_wav_i16(&args.input)?;
    println!(
        "  {} samples, {} Hz, {:.2}s",
        samples.len(),
        sample_rate,
        samples.len() as f32 / sample_rate as f32
    );
    if sample_rate != chipstomp_core::SAMPLE_RATE {
        tracing::warn!(
            sample_rate,
            pedal_rate = chipstomp_core::SAMPLE_RATE,
            "input rate differs from the pedal's; delay times and LFO rates will scale"
        );
    }

    let mut pedal = standard_pedal();
    preset.apply(&mut pedal)?;
    println!("Preset: {}", preset.name);

    let meters = Meters::new();
    let mut engine = AudioEngine::new(pedal, (), (), &meters);

    let pb = ProgressBar::new(samples.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let block_size = args.block_size.max(1);
    let mut output = vec![0i16; samples.len()];
    for (in_chunk, out_chunk) in samples.chunks(block_size).zip(output.chunks_mut(block_size)) {
        let ticks = OfflineClock::new(in_chunk, out_chunk)
            .with_sample_rate(sample_rate)
            .run(&mut engine);
        pb.inc(ticks as u64);
    }
    pb.finish_with_message("done");

    let peaks = meters.peaks.take();
    println!("\nLevels:");
    println!("  Input:  Peak {:.1} dBFS", dbfs(peaks.input));
    println!("  Output: Peak {:.1} dBFS", dbfs(peaks.output));
    println!(
        "  Clip:   {} (at or above {CLIP_LEVEL})",
        if meters.clip.take() { "LIT" } else { "off" }
    );

    let report = engine.manager().report();
    println!("\n{} [{}]", report.effect, if report.enabled { "on" } else { "off" });
    for line in report.lines() {
        println!("  {line}");
    }

    println!("\nWriting {}...", args.output.display());
    write_wav_i16(&args.output, &output, sample_rate)?;
    println!("Done!");

    Ok(())
}

/// Read a WAV file as mono 16-bit samples.
///
/// Multi-channel files are averaged down to one channel. Integer formats are
/// shifted to 16 bits; float formats are scaled and clamped.
fn read_wav_i16(path: &Path) -> anyhow::Result<(Vec<i16>, u32)> {
    let reader = WavReader::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let samples: Vec<i32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(|v| (v * 32_768.0).round().clamp(-32_768.0, 32_767.0) as i32))
            .collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let bits = u32::from(spec.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| {
                    s.map(|v| if bits >= 16 { v >> (bits - 16) } else { v << (16 - bits) })
                })
                .collect::<Result<_, _>>()?
        }
    };

    let mono = samples
        .chunks(channels)
        .map(|frame| {
            let sum: i64 = frame.iter().map(|&s| i64::from(s)).sum();
            (sum / frame.len() as i64).clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16
        })
        .collect();

    tracing::debug!(path = %path.display(), channels, sample_rate = spec.sample_rate, "read input");
    Ok((mono, spec.sample_rate))
}

/// Write mono 16-bit PCM.
fn write_wav_i16(path: &Path, samples: &[i16], sample_rate: u32) -> anyhow::Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).with_context(|| format!("failed to create {}", path.display()))?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    tracing::debug!(path = %path.display(), samples = samples.len(), "wrote output");
    Ok(())
}

/// Peak magnitude from the meter, in dB relative to full scale.
fn dbfs(peak: u16) -> f32 {
    if peak == 0 {
        -120.0
    } else {
        20.0 * (f32::from(peak) / 32_768.0).log10()
    }
}

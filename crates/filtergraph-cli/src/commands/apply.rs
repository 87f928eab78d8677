//! File-based filter application command.

use clap::Args;
use filtergraph_config::{FilterConfig, FilterSpec, Overrides};
use filtergraph_io::apply_filter_with;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct ApplyArgs {
    /// Source WAV file (".wav" is appended when missing)
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Destination WAV file
    #[arg(value_name = "DESTINATION", default_value = "Filtered.wav")]
    destination: PathBuf,

    /// Preset to apply (see `filtergraph presets`)
    #[arg(short, long, default_value = "echo")]
    preset: String,

    /// Delay in samples
    #[arg(long)]
    delay: Option<usize>,

    /// Decay of the echo and comb presets, in (0, 1)
    #[arg(long)]
    decay: Option<f64>,

    /// Gain of the all-pass and low-pass presets, factor of the gain preset
    #[arg(long)]
    gain: Option<f64>,

    /// Filter configuration file (TOML); takes precedence over the preset flags
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Appends ".wav" unless the path already ends with it, in any case.
fn with_wav_extension(path: PathBuf) -> PathBuf {
    let has_wav = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));
    if has_wav {
        path
    } else {
        let mut name = path.into_os_string();
        name.push(".wav");
        PathBuf::from(name)
    }
}

pub fn run(args: ApplyArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => {
            tracing::info!("loading configuration {}", path.display());
            FilterConfig::load(path)?
        }
        None => {
            let overrides = Overrides {
                delay: args.delay,
                decay: args.decay,
                gain: args.gain,
            };
            FilterConfig::new(FilterSpec::preset(&args.preset, overrides)?)
        }
    };
    let mut filter = config.build()?;

    let source = with_wav_extension(args.source);
    let destination = with_wav_extension(args.destination);
    println!(
        "Applying {} ({}) to {}...",
        config.filter.name(),
        config.filter.describe(),
        source.display()
    );

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let summary = apply_filter_with(filter.as_mut(), &source, &destination, |done, total| {
        if done == 1 {
            pb.set_length(total as u64);
        }
        if done % 1024 == 0 || done == total {
            pb.set_position(done as u64);
        }
    })?;
    pb.finish_and_clear();

    tracing::info!(
        frames = summary.frames,
        sample_rate = summary.sample_rate,
        "filter applied"
    );
    println!(
        "Wrote {} frames ({} -> {} channel(s)) to {}",
        summary.frames,
        summary.input_channels,
        summary.output_channels,
        destination.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_extension_appended_once() {
        assert_eq!(
            with_wav_extension(PathBuf::from("song")),
            PathBuf::from("song.wav")
        );
        assert_eq!(
            with_wav_extension(PathBuf::from("song.WAV")),
            PathBuf::from("song.WAV")
        );
        assert_eq!(
            with_wav_extension(PathBuf::from("take.1")),
            PathBuf::from("take.1.wav")
        );
    }
}

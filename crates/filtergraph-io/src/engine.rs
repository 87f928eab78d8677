//! Drives a filter over a stream of frames.

use std::path::Path;

use filtergraph_core::Filter;

use crate::wav::{WavSpec, read_frames, write_frames};
use crate::{Error, Result};

/// Totals reported by [`apply_filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplySummary {
    /// Frames read from the source and written to the destination.
    pub frames: usize,
    /// Channels of the source file.
    pub input_channels: u16,
    /// Channels of the destination file, the filter's output count.
    pub output_channels: u16,
    /// Sample rate shared by both files.
    pub sample_rate: u32,
}

/// Adapt a frame to the filter's input count.
///
/// Frames matching the input count pass through; wider frames feeding a mono
/// filter are averaged to one channel.
fn adapt<'a>(frame: &'a [f64], inputs: usize, mono: &'a mut [f64; 1]) -> Result<&'a [f64]> {
    if frame.len() == inputs {
        Ok(frame)
    } else if inputs == 1 && !frame.is_empty() {
        mono[0] = frame.iter().sum::<f64>() / frame.len() as f64;
        Ok(&mono[..])
    } else {
        Err(Error::ChannelMismatch {
            expected: inputs,
            found: frame.len(),
        })
    }
}

/// Run `filter` over `frames`, one step per frame.
///
/// The filter is checked first, so graph errors surface before any sample is
/// consumed.
pub fn process_frames(filter: &mut dyn Filter, frames: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    process_frames_with(filter, frames, |_| {})
}

/// Like [`process_frames`], calling `on_frame` with the number of frames
/// processed so far after each step.
pub fn process_frames_with(
    filter: &mut dyn Filter,
    frames: &[Vec<f64>],
    mut on_frame: impl FnMut(usize),
) -> Result<Vec<Vec<f64>>> {
    filter.check()?;
    let inputs = filter.nb_inputs();
    let mut mono = [0.0];
    let mut output = Vec::with_capacity(frames.len());

    for (n, frame) in frames.iter().enumerate() {
        let step = adapt(frame, inputs, &mut mono)?;
        output.push(filter.compute_one_step(step)?);
        on_frame(n + 1);
    }

    Ok(output)
}

/// Read `source`, run `filter` over it and write the result to `destination`.
///
/// The destination keeps the source's sample rate and encoding and has one
/// channel per filter output.
pub fn apply_filter(
    filter: &mut dyn Filter,
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
) -> Result<ApplySummary> {
    apply_filter_with(filter, source, destination, |_, _| {})
}

/// Like [`apply_filter`], calling `on_frame(done, total)` after each step.
pub fn apply_filter_with(
    filter: &mut dyn Filter,
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    mut on_frame: impl FnMut(usize, usize),
) -> Result<ApplySummary> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    let output_channels = u16::try_from(filter.nb_outputs())
        .ok()
        .filter(|&channels| channels > 0)
        .ok_or(Error::UnsupportedChannels(filter.nb_outputs()))?;

    let (frames, spec) = read_frames(source)?;
    if frames.is_empty() {
        return Err(Error::EmptyInput(source.to_path_buf()));
    }
    tracing::debug!(
        "read {} frames of {} channels from {}",
        frames.len(),
        spec.channels,
        source.display()
    );

    let total = frames.len();
    let output = process_frames_with(filter, &frames, |done| on_frame(done, total))?;

    let out_spec = WavSpec {
        channels: output_channels,
        ..spec
    };
    write_frames(destination, &output, out_spec)?;
    tracing::debug!(
        "wrote {} frames of {} channels to {}",
        output.len(),
        output_channels,
        destination.display()
    );

    Ok(ApplySummary {
        frames: total,
        input_channels: spec.channels,
        output_channels,
        sample_rate: spec.sample_rate,
    })
}

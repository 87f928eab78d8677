//! WAV stream harness for filtergraph filters.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_frames`] and [`write_frames`] load and save audio as
//!   one sample vector per frame
//! - **Stream processing**: [`process_frames`] runs any [`Filter`](filtergraph_core::Filter)
//!   one step per frame, and [`apply_filter`] does the whole read, process, write trip
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use filtergraph_effects::Echo;
//! use filtergraph_io::apply_filter;
//!
//! let mut echo = Echo::new(22050, 0.6)?;
//! let summary = apply_filter(&mut echo, "input.wav", "output.wav")?;
//! println!("{} frames", summary.frames);
//! ```

use std::path::PathBuf;

use filtergraph_core::FilterError;

mod engine;
mod wav;

pub use engine::{
    ApplySummary, apply_filter, apply_filter_with, process_frames, process_frames_with,
};
pub use wav::{WavFormat, WavSpec, read_frames, write_frames};

/// Error types for stream processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The filter failed to validate or to compute a step.
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// A frame's width matches neither the expected channel count nor mono.
    #[error("channel mismatch: expected {expected} channel(s), found {found}")]
    ChannelMismatch {
        /// Channels the consumer expects.
        expected: usize,
        /// Samples actually present in the frame.
        found: usize,
    },

    /// The filter's output count cannot be encoded as WAV channels.
    #[error("cannot write {0} output channel(s) to WAV")]
    UnsupportedChannels(usize),

    /// The source file holds no frames.
    #[error("no audio frames in {}", .0.display())]
    EmptyInput(PathBuf),
}

/// Convenience result type for stream processing.
pub type Result<T> = std::result::Result<T, Error>;

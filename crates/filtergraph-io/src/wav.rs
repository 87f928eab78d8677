//! WAV file reading and writing, one sample vector per frame.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (e.g., 16, 24, 32).
    pub bits_per_sample: u16,
    /// Sample encoding.
    pub format: WavFormat,
}

impl Default for WavSpec {
    /// Mono 16-bit PCM at 44.1 kHz.
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            format: WavFormat::Pcm,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            format: match spec.sample_format {
                SampleFormat::Float => WavFormat::IeeeFloat,
                SampleFormat::Int => WavFormat::Pcm,
            },
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: match spec.format {
                WavFormat::IeeeFloat => SampleFormat::Float,
                WavFormat::Pcm => SampleFormat::Int,
            },
        }
    }
}

/// Full-scale value of a signed integer sample of `bits` bits.
fn full_scale(bits: u16) -> f64 {
    f64::from(1u32 << (bits.clamp(1, 32) - 1))
}

/// Read a WAV file as frames: one vector of `channels` samples per instant.
///
/// Integer PCM is normalized to [-1, 1); float samples pass through.
///
/// # Example
/// ```ignore
/// let (frames, spec) = read_frames("input.wav")?;
/// println!("{} frames of {} channels", frames.len(), spec.channels);
/// ```
pub fn read_frames<P: AsRef<Path>>(path: P) -> Result<(Vec<Vec<f64>>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = usize::from(spec.channels);

    let samples: Vec<f64> = match spec.format {
        WavFormat::IeeeFloat => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        WavFormat::Pcm => {
            let max_val = full_scale(spec.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let frames = samples
        .chunks_exact(channels.max(1))
        .map(<[f64]>::to_vec)
        .collect();
    Ok((frames, spec))
}

/// Write frames to a WAV file.
///
/// Every frame must hold exactly `spec.channels` samples. Integer PCM output
/// is clamped to full scale.
pub fn write_frames<P: AsRef<Path>>(path: P, frames: &[Vec<f64>], spec: WavSpec) -> Result<()> {
    let channels = usize::from(spec.channels);
    if let Some(frame) = frames.iter().find(|frame| frame.len() != channels) {
        return Err(Error::ChannelMismatch {
            expected: channels,
            found: frame.len(),
        });
    }

    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;
    match spec.format {
        WavFormat::IeeeFloat => {
            for &sample in frames.iter().flatten() {
                writer.write_sample(sample as f32)?;
            }
        }
        WavFormat::Pcm => {
            let max_val = full_scale(spec.bits_per_sample);
            for &sample in frames.iter().flatten() {
                let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn spec(channels: u16, bits_per_sample: u16, format: WavFormat) -> WavSpec {
        WavSpec {
            channels,
            sample_rate: 44100,
            bits_per_sample,
            format,
        }
    }

    #[test]
    fn test_roundtrip_float_stereo() {
        let frames: Vec<Vec<f64>> = (0..500)
            .map(|i| {
                let t = f64::from(i) / 500.0;
                vec![t.sin(), t.cos()]
            })
            .collect();
        let spec = spec(2, 32, WavFormat::IeeeFloat);

        let file = NamedTempFile::new().unwrap();
        write_frames(file.path(), &frames, spec).unwrap();

        let (loaded, loaded_spec) = read_frames(file.path()).unwrap();
        assert_eq!(loaded_spec, spec);
        assert_eq!(loaded.len(), frames.len());
        for (a, b) in frames.iter().flatten().zip(loaded.iter().flatten()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_roundtrip_i16() {
        let frames: Vec<Vec<f64>> = (0..1000)
            .map(|i| vec![(f64::from(i) / 1000.0).sin() * 0.9])
            .collect();
        let spec = spec(1, 16, WavFormat::Pcm);

        let file = NamedTempFile::new().unwrap();
        write_frames(file.path(), &frames, spec).unwrap();

        let (loaded, loaded_spec) = read_frames(file.path()).unwrap();
        assert_eq!(loaded_spec.format, WavFormat::Pcm);
        assert_eq!(loaded.len(), frames.len());

        // 16-bit has less precision
        for (a, b) in frames.iter().flatten().zip(loaded.iter().flatten()) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn test_integer_output_is_clamped() {
        let frames = vec![vec![4.0], vec![-4.0], vec![1.0]];
        let file = NamedTempFile::new().unwrap();
        write_frames(file.path(), &frames, spec(1, 16, WavFormat::Pcm)).unwrap();

        let (loaded, _) = read_frames(file.path()).unwrap();
        let max = 32767.0 / 32768.0;
        assert_eq!(loaded, vec![vec![max], vec![-1.0], vec![max]]);
    }

    #[test]
    fn test_frame_width_must_match_channels() {
        let file = NamedTempFile::new().unwrap();
        let err = write_frames(
            file.path(),
            &[vec![0.0, 0.0], vec![0.0]],
            spec(2, 16, WavFormat::Pcm),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::ChannelMismatch {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_spec_conversion() {
        let ours = spec(2, 24, WavFormat::Pcm);
        let theirs = hound::WavSpec::from(ours);
        assert_eq!(theirs.sample_format, SampleFormat::Int);
        assert_eq!(WavSpec::from(theirs), ours);
    }
}

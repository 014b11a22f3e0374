//! This is the namespace for all parts dealing with data in sampled waves.
//!
//! Rendered audio is kept as `f64` samples in the range `[-1, 1]` and only
//! quantized to 16 bit integers when it is written into a WAV container.

use std::io::Cursor;

use log::trace;
use snafu::{ResultExt, Snafu};

/// Encoding the samples as WAV failed.
#[derive(Debug, Snafu)]
pub enum WavError {
    #[snafu(display("Could not write WAV header: {}", source))]
    Header { source: hound::Error },
    #[snafu(display("Could not write sample {}: {}", index, source))]
    Sample { index: usize, source: hound::Error },
    #[snafu(display("Could not finalize WAV data: {}", source))]
    Finalize { source: hound::Error },
}

/// Size of the RIFF, fmt and data chunk headers of a mono 16 bit PCM file.
pub const WAV_HEADER_LEN: usize = 44;

/// Quantize a sample to the signed 16 bit range. Samples outside `[-1, 1]` are clipped.
///
/// # Examples
///
/// ```
/// # use music_llm::wave::*;
/// assert_eq!(quantize(0.0), 0);
/// assert_eq!(quantize(1.0), 32767);
/// assert_eq!(quantize(-1.0), -32767);
/// assert_eq!(quantize(3.0), 32767);
/// ```
pub fn quantize(sample: f64) -> i16 {
    let clamped = sample.max(-1.0).min(1.0);
    (clamped * i16::MAX as f64).round() as i16
}

/// Serialize mono samples as a 16 bit PCM WAV file held in memory.
///
/// An empty slice produces a valid file without any samples.
///
/// # Examples
///
/// ```
/// # use music_llm::wave::*;
/// let bytes = encode_wav(&[], 44100).unwrap();
/// assert_eq!(bytes.len(), WAV_HEADER_LEN);
/// assert_eq!(&bytes[0..4], b"RIFF");
/// ```
pub fn encode_wav(samples: &[f64], sample_rate: u32) -> Result<Vec<u8>, WavError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut bytes = Vec::with_capacity(WAV_HEADER_LEN + 2 * samples.len());
    let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec).context(Header)?;
    for (index, sample) in samples.iter().enumerate() {
        writer
            .write_sample(quantize(*sample))
            .context(Sample { index })?;
    }
    writer.finalize().context(Finalize)?;

    trace!(
        "encoded {} samples at {} Hz into {} bytes",
        samples.len(),
        sample_rate,
        bytes.len()
    );
    Ok(bytes)
}

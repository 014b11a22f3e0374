//! This namespace contains all the parts converting from pitches to wave data.

pub mod config;
pub mod oscillator;

pub use config::{ConfigError, SynthConfig};
pub use oscillator::Oscillator;

use log::debug;

use crate::resolve::Pitch;
use crate::wave::{self, WavError};

/// Renders a sequence of pitches as one flat sine tone per entry, back to back.
///
/// There is no envelope and no gap between notes; a [`Pitch::Silence`] renders
/// as a stretch of zero samples of the same length as a tone.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Synthesizer {
    config: SynthConfig,
}

impl Synthesizer {
    /// Create a synthesizer, rejecting invalid configurations up front.
    pub fn new(config: SynthConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub fn samples_per_note(&self) -> usize {
        self.config.samples_per_note()
    }

    /// Render the pitches to `f64` samples in the range `[-amplitude, amplitude]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use music_llm::resolve::Pitch;
    /// use music_llm::synth::*;
    ///
    /// let synth = Synthesizer::new(SynthConfig::new(8000, 0.25, 0.5).unwrap()).unwrap();
    /// let samples = synth.render(&[Pitch::Tone(440.0), Pitch::Silence]);
    /// assert_eq!(samples.len(), 4000);
    /// assert!(samples[2000..].iter().all(|s| *s == 0.0));
    /// ```
    pub fn render(&self, pitches: &[Pitch]) -> Vec<f64> {
        let per_note = self.samples_per_note();
        let sample_rate = self.config.sample_rate as f64;
        let capacity = per_note.checked_mul(pitches.len()).unwrap_or(0);
        let mut samples = Vec::with_capacity(capacity);
        for pitch in pitches {
            match pitch {
                Pitch::Tone(frequency) => {
                    let amplitude = self.config.amplitude;
                    samples.extend(
                        Oscillator::new(sample_rate, *frequency)
                            .take(per_note)
                            .map(|s| s * amplitude),
                    );
                }
                Pitch::Silence => samples.extend(std::iter::repeat(0.0).take(per_note)),
            }
        }
        samples
    }

    /// Render the pitches and encode them as a mono 16 bit WAV file.
    pub fn synthesize(&self, pitches: &[Pitch]) -> Result<Vec<u8>, WavError> {
        let samples = self.render(pitches);
        debug!(
            "rendered {} notes into {} samples ({:.2} seconds)",
            pitches.len(),
            samples.len(),
            samples.len() as f64 / self.config.sample_rate as f64
        );
        wave::encode_wav(&samples, self.config.sample_rate)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn synth(sample_rate: u32, duration: f64) -> Synthesizer {
        Synthesizer::new(SynthConfig::new(sample_rate, duration, 0.5).unwrap()).unwrap()
    }

    fn decode(bytes: Vec<u8>) -> Vec<i16> {
        hound::WavReader::new(Cursor::new(bytes))
            .unwrap()
            .samples()
            .map(|s| s.unwrap())
            .collect()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SynthConfig {
            sample_rate: 0,
            ..SynthConfig::default()
        };
        assert_eq!(Synthesizer::new(config), Err(ConfigError::ZeroSampleRate));
    }

    #[test]
    fn empty_input() {
        let synth = Synthesizer::default();
        assert!(synth.render(&[]).is_empty());
        let bytes = synth.synthesize(&[]).unwrap();
        assert_eq!(bytes.len(), wave::WAV_HEADER_LEN);
        assert!(decode(bytes).is_empty());
    }

    #[test]
    fn sample_count_per_note() {
        let synth = synth(44100, 0.3);
        let pitches = [Pitch::Tone(261.63), Pitch::Silence, Pitch::Tone(440.0)];
        let decoded = decode(synth.synthesize(&pitches).unwrap());
        assert_eq!(decoded.len(), 3 * 13230);
    }

    #[test]
    fn silence_decodes_to_zero() {
        let synth = synth(22050, 0.1);
        let pitches = [Pitch::Tone(440.0), Pitch::Silence, Pitch::Tone(440.0)];
        let decoded = decode(synth.synthesize(&pitches).unwrap());
        let n = synth.samples_per_note();
        assert!(decoded[n..2 * n].iter().all(|s| *s == 0));
        assert!(decoded[..n].iter().any(|s| *s != 0));
        assert!(decoded[2 * n..].iter().any(|s| *s != 0));
    }

    #[test]
    fn flat_amplitude() {
        let synth = synth(44100, 0.5);
        let samples = synth.render(&[Pitch::Tone(441.0)]);
        let peak = samples.iter().cloned().fold(0.0, f64::max);
        assert!((peak - 0.5).abs() < 1e-3, "peak {}", peak);
        assert!(samples.iter().all(|s| s.abs() <= 0.5));
    }

    #[test]
    fn every_note_starts_at_phase_zero() {
        let synth = synth(8000, 0.01);
        let samples = synth.render(&[Pitch::Tone(300.0), Pitch::Tone(300.0)]);
        let n = synth.samples_per_note();
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[..n], samples[n..]);
    }

    #[test]
    fn huge_frequencies_render_promptly() {
        use crate::note::Note;
        use crate::resolve::NoteResolver;
        use crate::tuning::Tuning;

        let resolver = NoteResolver::new(Tuning::new(Note::A4, 1e30));
        let synth = synth(8000, 0.01);
        let samples = synth.render(&[resolver.resolve("A4")]);
        assert_eq!(samples.len(), synth.samples_per_note());
        assert!(samples.iter().all(|s| s.abs() <= 0.5));
    }

    #[test]
    fn deterministic() {
        let synth = Synthesizer::default();
        let pitches = [Pitch::Tone(329.63), Pitch::Silence, Pitch::Tone(392.0)];
        assert_eq!(
            synth.synthesize(&pitches).unwrap(),
            synth.synthesize(&pitches).unwrap()
        );
    }
}

//! The glue responsible for turning model text into an audible waveform.

use log::info;

use crate::resolve::NoteResolver;
use crate::score::Score;
use crate::synth::Synthesizer;
use crate::wave::WavError;

/// Resolve every token of the score and synthesize the result as WAV bytes.
///
/// # Examples
///
/// ```
/// use music_llm::render::render;
/// use music_llm::resolve::NoteResolver;
/// use music_llm::score::Score;
/// use music_llm::synth::{SynthConfig, Synthesizer};
///
/// let synth = Synthesizer::new(SynthConfig::new(8000, 0.5, 0.5).unwrap()).unwrap();
/// let score = Score::new("C4 E4 G4", "C4-E4-G4");
/// let wav = render(&score, &NoteResolver::default(), &synth).unwrap();
/// assert_eq!(wav.len(), 44 + 6 * 4000 * 2);
/// ```
pub fn render(score: &Score, resolver: &NoteResolver, synth: &Synthesizer) -> Result<Vec<u8>, WavError> {
    let tokens = score.tokens();
    let pitches = resolver.resolve_all(tokens.iter().cloned());
    let silent = pitches.iter().filter(|p| p.is_silence()).count();
    info!(
        "rendering {} notes ({} silent) at {} Hz",
        pitches.len(),
        silent,
        synth.config().sample_rate
    );
    synth.synthesize(&pitches)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::synth::SynthConfig;
    use std::io::Cursor;

    fn decode(bytes: Vec<u8>) -> Vec<i16> {
        hound::WavReader::new(Cursor::new(bytes))
            .unwrap()
            .samples()
            .map(|s| s.unwrap())
            .collect()
    }

    #[test]
    fn empty_score() {
        let wav = render(&Score::default(), &NoteResolver::default(), &Synthesizer::default()).unwrap();
        assert!(decode(wav).is_empty());
    }

    #[test]
    fn unknown_tokens_keep_their_time() {
        let synth = Synthesizer::new(SynthConfig::new(8000, 0.1, 0.5).unwrap()).unwrap();
        let n = synth.samples_per_note();
        let score = Score::new("A4 (pause) A4", "");
        let samples = decode(render(&score, &NoteResolver::default(), &synth).unwrap());
        assert_eq!(samples.len(), 3 * n);
        assert!(samples[n..2 * n].iter().all(|s| *s == 0));
        assert_eq!(samples[..n], samples[2 * n..]);
    }
}

//! The textual note format produced by the language model.
//!
//! A melody is a whitespace separated list of notes, e.g. `C4 E4 G4 Rest C5`.
//! A harmony is a whitespace separated list of chords whose notes are joined
//! by hyphens, e.g. `C4-E4-G4 F4-A4-C5`.

/// Split a melody into its note tokens.
///
/// ```
/// # use music_llm::score::*;
/// assert_eq!(melody_tokens(" C4  E4\nG4 "), vec!["C4", "E4", "G4"]);
/// ```
pub fn melody_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Split a harmony into the notes of all its chords, in order.
///
/// ```
/// # use music_llm::score::*;
/// assert_eq!(harmony_tokens("C4-E4-G4 F4-A4"), vec!["C4", "E4", "G4", "F4", "A4"]);
/// ```
pub fn harmony_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .flat_map(|chord| chord.split('-'))
        .filter(|note| !note.is_empty())
        .collect()
}

/// The playable parts of a composition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub melody: String,
    pub harmony: String,
}

impl Score {
    pub fn new(melody: impl Into<String>, harmony: impl Into<String>) -> Self {
        Self {
            melody: melody.into(),
            harmony: harmony.into(),
        }
    }

    /// All tokens in playback order: the melody first, then the chord notes one after another.
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens = melody_tokens(&self.melody);
        tokens.extend(harmony_tokens(&self.harmony));
        tokens
    }
}

//! The instructions sent to the language model for every part of a composition.

use super::Style;

/// The note format the rest of the pipeline understands, spelled out for the model.
const NOTE_FORMAT: &str = "Write every note as a letter from A to G, an optional # for sharp \
and an octave number, for example C4, F#3 or A5. Write Rest for a pause.";

pub fn melody(theme: &str) -> String {
    format!(
        "Compose a short melody inspired by the theme \"{}\". {} \
Answer only with the notes separated by spaces.",
        theme, NOTE_FORMAT
    )
}

pub fn harmony(melody: &str) -> String {
    format!(
        "Write a chord progression that harmonizes this melody: {}. {} \
Join the notes of each chord with hyphens, for example C4-E4-G4, \
and answer only with the chords separated by spaces.",
        melody, NOTE_FORMAT
    )
}

pub fn rhythm(melody: &str) -> String {
    format!(
        "Suggest a rhythm for this melody: {}. Give one duration per note, \
such as 1/4 1/8 1/2, and answer only with the durations separated by spaces.",
        melody
    )
}

pub fn arrangement(style: Style, melody: &str, harmony: &str, rhythm: &str) -> String {
    format!(
        "Adapt the following composition to the {} style and describe the result.\n\
Melody: {}\nHarmony: {}\nRhythm: {}",
        style, melody, harmony, rhythm
    )
}

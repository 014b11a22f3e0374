// music-llm -- turning text prompts into short pieces of music
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use crate::note::Note;

/// Defines the tuning of an instrument by assinging a frequency to a certain note.
/// This defines the frequencies of all other notes at a standard tuning of 12 half-tones per octave.
///
/// # Examples
///
/// ```
/// use music_llm::note::*;
/// use music_llm::tuning::*;
/// let tuning = Tuning::default();
/// assert_eq!(tuning.frequency(Note::A4), 440.0);
/// assert_eq!(tuning.frequency(Note::parse("A3").unwrap()), 220.0);
/// assert_eq!(tuning.frequency(Note::parse("A5").unwrap()), 880.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tuning {
    pub reference_note: Note,
    pub reference_frequency: f64,
}

impl Tuning {
    /// Tune `reference_note` to `reference_frequency` Hz.
    pub fn new(reference_note: Note, reference_frequency: f64) -> Self {
        Tuning {
            reference_note,
            reference_frequency,
        }
    }

    /// Return the frequency of a note relative to this tuning.
    pub fn frequency(&self, other: Note) -> f64 {
        let semitones = other.index() - self.reference_note.index();
        let octaves = semitones as f64 / 12.0;
        self.reference_frequency * 2.0f64.powf(octaves)
    }
}

/// Default concert tuning, where A4 corresponds to 440 Hz.
impl Default for Tuning {
    fn default() -> Self {
        Tuning::new(Note::A4, 440.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn close(actual: f64, expected: f64) -> bool {
        ((actual - expected) / expected).abs() < 1e-6
    }

    #[test]
    fn reference_pitches() {
        let tuning = Tuning::default();
        let freq = |name| tuning.frequency(Note::parse(name).unwrap());
        assert!(close(freq("C4"), 261.625_565));
        assert!(close(freq("C0"), 16.351_597_8));
        assert!(close(freq("E4"), 329.627_557));
        assert!(close(freq("C#3"), 138.591_315));
        assert!(close(freq("B8"), 7_902.132_82));
    }

    #[test]
    fn closed_form_over_the_keyboard() {
        let tuning = Tuning::default();
        let letters = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
        for octave in 0..=8 {
            for (offset, letter) in letters.iter().enumerate() {
                let n = octave * 12 + offset as i32;
                let expected = 440.0 * 2.0f64.powf((n - 57) as f64 / 12.0);
                let note = Note::parse(&format!("{}{}", letter, octave)).unwrap();
                assert_eq!(note.index(), n);
                assert!(close(tuning.frequency(note), expected));
            }
        }
    }

    #[test]
    fn shifted_reference() {
        let tuning = Tuning::new(Note::A4, 432.0);
        assert_eq!(tuning.frequency(Note::parse("A5").unwrap()), 864.0);
    }
}

// music-llm -- turning text prompts into short pieces of music
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Definitions of what a note is.

/// A "note" is a key on an equal-tempered keyboard, counted in semitones from C0.
/// Under this convention A4 is key 57.
///
/// Only octaves 0 through 8 can be named, which covers the full range
/// of a piano and a little more.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Note(u8);

/// The name of a note in standard notation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NoteName {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

/// Any offset applied to a note in standard notation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Accidental {
    /// The note is a half-tone lower then indicated by its name.
    Flat,
    /// The note is left unchanged.
    Natural,
    /// The note is a half-tone higher then indicated by its name.
    Sharp,
}

impl NoteName {
    /// Semitone offset of the letter within its octave, counted from C.
    pub fn semitone(self) -> i32 {
        match self {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        }
    }

    fn from_char(ch: char) -> Option<NoteName> {
        match ch.to_ascii_uppercase() {
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            _ => None,
        }
    }
}

impl Accidental {
    pub fn semitones(self) -> i32 {
        match self {
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
        }
    }
}

impl Note {
    /// Lowest octave that can be named.
    pub const MIN_OCTAVE: i32 = 0;
    /// Highest octave that can be named.
    pub const MAX_OCTAVE: i32 = 8;

    /// Concert A, the usual tuning reference.
    pub const A4: Note = Note(57);

    /// Convert a note from standard notation to a key index.
    /// Note that different names may refer to the same note, e.g. a G♯ is the same as a A♭.
    /// Returns `None` if the octave is out of range or the note would fall below C0.
    ///
    /// # Examples
    ///
    /// ```
    /// use music_llm::note::*;
    ///
    /// assert_eq!(Note::try_named(NoteName::A, Accidental::Natural, 4), Some(Note::A4));
    /// assert_eq!(Note::try_named(NoteName::C, Accidental::Sharp, 6).map(Note::index), Some(73));
    /// assert_eq!(Note::try_named(NoteName::C, Accidental::Flat, 0), None);
    /// assert_eq!(Note::try_named(NoteName::C, Accidental::Natural, 9), None);
    /// ```
    pub fn try_named(name: NoteName, accidental: Accidental, octave: i32) -> Option<Note> {
        if octave < Self::MIN_OCTAVE || octave > Self::MAX_OCTAVE {
            return None;
        }
        let index = octave * 12 + name.semitone() + accidental.semitones();
        if index >= 0 {
            Some(Note(index as u8))
        } else {
            None
        }
    }

    /// Parse a name string of the format `<letter><accidental><octave>`.
    ///
    /// The letter is case insensitive, the accidental is optional.
    ///
    /// # Examples
    ///
    /// ```
    /// # use music_llm::note::*;
    ///
    /// assert_eq!(Note::parse("A4"), Some(Note::A4));
    /// assert_eq!(Note::parse("a4"), Some(Note::A4));
    /// assert_eq!(Note::parse("C#3").map(Note::index), Some(37));
    /// assert_eq!(Note::parse("C♯3").map(Note::index), Some(37));
    /// assert_eq!(Note::parse("Db3").map(Note::index), Some(37));
    /// assert_eq!(Note::parse("Rest"), None);
    /// assert_eq!(Note::parse("4A"), None);
    /// ```
    pub fn parse(token: &str) -> Option<Note> {
        let mut chars = token.chars();
        let name = NoteName::from_char(chars.next()?)?;

        let rest = chars.as_str();
        let accidental_str = rest.trim_end_matches(|ch: char| ch.is_ascii_digit());
        let accidental = match accidental_str {
            "" => Accidental::Natural,
            "#" | "♯" => Accidental::Sharp,
            "b" | "♭" => Accidental::Flat,
            _ => return None,
        };

        let octave_str = &rest[accidental_str.len()..];
        // `parse` would accept a leading `+`, but that was already rejected as an accidental.
        let octave = octave_str.parse().ok()?;
        Note::try_named(name, accidental, octave)
    }

    /// Return the note index in a signed type, convenient for further calculations.
    pub fn index(self) -> i32 {
        self.0 as i32
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn letter_offsets() {
        let expected = [
            ("C4", 48),
            ("D4", 50),
            ("E4", 52),
            ("F4", 53),
            ("G4", 55),
            ("A4", 57),
            ("B4", 59),
        ];
        for (token, index) in expected.iter() {
            assert_eq!(Note::parse(token).map(Note::index), Some(*index), "{}", token);
        }
    }

    #[test]
    fn octave_range() {
        assert_eq!(Note::parse("C0").map(Note::index), Some(0));
        assert_eq!(Note::parse("B8").map(Note::index), Some(107));
        assert_eq!(Note::parse("B#8").map(Note::index), Some(108));
        assert_eq!(Note::parse("C9"), None);
        assert_eq!(Note::parse("C10"), None);
        assert_eq!(Note::parse("Cb0"), None);
        assert_eq!(Note::parse("C#-1"), None);
    }

    #[test]
    fn sharps_and_flats_are_enharmonic() {
        assert_eq!(Note::parse("G#2"), Note::parse("Ab2"));
        assert_eq!(Note::parse("E#4"), Note::parse("F4"));
        assert_eq!(Note::parse("Cb5"), Note::parse("B4"));
    }

    #[test]
    fn malformed() {
        for token in &["", "H4", "Rest", "rest", "4A", "C", "#4", "C##4", "C4,", "C 4", "C+4", "A4-"] {
            assert_eq!(Note::parse(token), None, "{:?}", token);
        }
    }
}

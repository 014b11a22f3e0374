// music-llm -- turning text prompts into short pieces of music
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Turning note tokens produced by a language model into pitches.
//!
//! Model output is not trusted to be well-formed. Every token resolves to
//! something: either a tone or silence, so that playback never aborts.

use log::debug;

use crate::note::Note;
use crate::tuning::Tuning;

/// What a single token sounds like.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Pitch {
    /// A sine tone at the given frequency in Hz.
    Tone(f64),
    /// No tone, but the token still takes up time.
    Silence,
}

impl Pitch {
    pub fn frequency(self) -> Option<f64> {
        match self {
            Pitch::Tone(hz) => Some(hz),
            Pitch::Silence => None,
        }
    }

    pub fn is_silence(self) -> bool {
        self == Pitch::Silence
    }
}

/// Maps note names like `A4` or `C#3` to frequencies.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct NoteResolver {
    tuning: Tuning,
}

impl NoteResolver {
    pub fn new(tuning: Tuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Resolve a single token. Anything that is not a note, including rests, is silence.
    ///
    /// # Examples
    ///
    /// ```
    /// use music_llm::resolve::*;
    ///
    /// let resolver = NoteResolver::default();
    /// assert_eq!(resolver.resolve("A4"), Pitch::Tone(440.0));
    /// assert_eq!(resolver.resolve("A5"), Pitch::Tone(880.0));
    /// assert_eq!(resolver.resolve("Rest"), Pitch::Silence);
    /// assert_eq!(resolver.resolve("H4"), Pitch::Silence);
    /// ```
    pub fn resolve(&self, token: &str) -> Pitch {
        match Note::parse(token) {
            Some(note) => Pitch::Tone(self.tuning.frequency(note)),
            None => {
                debug!("token {:?} is not a note, treating as silence", token);
                Pitch::Silence
            }
        }
    }

    /// Resolve a sequence of tokens in order.
    /// Empty tokens, as left behind by splitting on repeated delimiters, are skipped.
    pub fn resolve_all<'a, I>(&self, tokens: I) -> Vec<Pitch>
    where
        I: IntoIterator<Item = &'a str>,
    {
        tokens
            .into_iter()
            .filter(|token| !token.is_empty())
            .map(|token| self.resolve(token))
            .collect()
    }
}

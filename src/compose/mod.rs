// music-llm -- turning text prompts into short pieces of music
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Asking a language model for the parts of a composition.
//!
//! The model itself lives outside of this crate. All it has to provide is a
//! [`Generator`] that turns a prompt into text.

pub mod command;
pub mod prompt;

pub use command::{CommandError, CommandGenerator};

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use snafu::{ensure, ResultExt, Snafu};

use crate::render;
use crate::resolve::NoteResolver;
use crate::score::Score;
use crate::synth::Synthesizer;
use crate::wave::WavError;

/// Produces text for a prompt, typically by asking a language model.
pub trait Generator {
    type Error: std::error::Error + Send + Sync + 'static;

    fn generate(&mut self, prompt: &str) -> Result<String, Self::Error>;
}

/// The musical styles a composition can be adapted to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Style {
    Classical,
    Jazz,
    Rock,
    Pop,
    Blues,
    Electronic,
    Romantic,
}

impl Style {
    pub const ALL: [Style; 7] = [
        Style::Classical,
        Style::Jazz,
        Style::Rock,
        Style::Pop,
        Style::Blues,
        Style::Electronic,
        Style::Romantic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Style::Classical => "Classical",
            Style::Jazz => "Jazz",
            Style::Rock => "Rock",
            Style::Pop => "Pop",
            Style::Blues => "Blues",
            Style::Electronic => "Electronic",
            Style::Romantic => "Romantic",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn style_names() -> String {
    let names: Vec<_> = Style::ALL.iter().map(|style| style.name()).collect();
    names.join(", ")
}

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum ParseStyleError {
    #[snafu(display("Unknown style {:?}, expected one of {}", name, style_names()))]
    UnknownStyle { name: String },
}

impl FromStr for Style {
    type Err = ParseStyleError;

    /// Parse a style name, ignoring case.
    ///
    /// ```
    /// # use music_llm::compose::Style;
    /// assert_eq!("jazz".parse(), Ok(Style::Jazz));
    /// assert!("polka".parse::<Style>().is_err());
    /// ```
    fn from_str(name: &str) -> Result<Style, ParseStyleError> {
        Style::ALL
            .iter()
            .cloned()
            .find(|style| style.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ParseStyleError::UnknownStyle {
                name: name.to_string(),
            })
    }
}

/// The parts of a composition that are requested one after another.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Part {
    Melody,
    Harmony,
    Rhythm,
    Arrangement,
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Part::Melody => "melody",
            Part::Harmony => "harmony",
            Part::Rhythm => "rhythm",
            Part::Arrangement => "arrangement",
        })
    }
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Snafu)]
pub enum ComposeError {
    #[snafu(display("The theme must not be empty"))]
    EmptyTheme,
    #[snafu(display("Generating the {} failed: {}", part, source))]
    Generate { part: Part, source: BoxError },
}

/// Everything the model came up with for one theme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Composition {
    pub theme: String,
    pub style: Style,
    pub melody: String,
    pub harmony: String,
    pub rhythm: String,
    /// The model's description of the piece adapted to the style.
    pub arrangement: String,
}

impl Composition {
    /// The playable parts. Rhythm and arrangement are descriptive only.
    pub fn score(&self) -> Score {
        Score::new(self.melody.as_str(), self.harmony.as_str())
    }

    pub fn render(&self, resolver: &NoteResolver, synth: &Synthesizer) -> Result<Vec<u8>, WavError> {
        render::render(&self.score(), resolver, synth)
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Theme: {}", self.theme)?;
        writeln!(f, "Style: {}", self.style)?;
        writeln!(f, "Melody: {}", self.melody)?;
        writeln!(f, "Harmony: {}", self.harmony)?;
        writeln!(f, "Rhythm: {}", self.rhythm)?;
        writeln!(f)?;
        write!(f, "{}", self.arrangement)
    }
}

/// Drives a [`Generator`] through the prompts for melody, harmony, rhythm and arrangement.
pub struct Composer<G> {
    generator: G,
}

impl<G: Generator> Composer<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn into_generator(self) -> G {
        self.generator
    }

    pub fn compose(&mut self, theme: &str, style: Style) -> Result<Composition, ComposeError> {
        let theme = theme.trim();
        ensure!(!theme.is_empty(), EmptyTheme);
        info!("composing {:?} in {} style", theme, style);

        let melody = self.ask(Part::Melody, &prompt::melody(theme))?;
        let harmony = self.ask(Part::Harmony, &prompt::harmony(&melody))?;
        let rhythm = self.ask(Part::Rhythm, &prompt::rhythm(&melody))?;
        let arrangement = self.ask(
            Part::Arrangement,
            &prompt::arrangement(style, &melody, &harmony, &rhythm),
        )?;

        Ok(Composition {
            theme: theme.to_string(),
            style,
            melody,
            harmony,
            rhythm,
            arrangement,
        })
    }

    fn ask(&mut self, part: Part, prompt: &str) -> Result<String, ComposeError> {
        debug!("asking for the {}", part);
        let answer = self
            .generator
            .generate(prompt)
            .map_err(|err| Box::new(err) as BoxError)
            .context(Generate { part })?;
        debug!("{}: {}", part, answer);
        Ok(answer)
    }
}

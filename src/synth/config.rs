// music-llm -- turning text prompts into short pieces of music
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Parameters of the waveform synthesizer.

use snafu::{ensure, Snafu};

/// The configuration is invalid and no synthesizer can be built from it.
#[derive(Debug, PartialEq, Snafu)]
pub enum ConfigError {
    #[snafu(display("Sample rate must be positive"))]
    ZeroSampleRate,
    #[snafu(display("Note duration must be a positive number of seconds, got {}", duration))]
    InvalidDuration { duration: f64 },
    #[snafu(display(
        "Note duration of {} s is shorter than one sample at {} Hz",
        duration,
        sample_rate
    ))]
    DurationTooShort { duration: f64, sample_rate: u32 },
    #[snafu(display(
        "Note duration of {} s at {} Hz needs more samples than a WAV file can hold",
        duration,
        sample_rate
    ))]
    DurationTooLong { duration: f64, sample_rate: u32 },
    #[snafu(display("Amplitude must lie in (0, 1], got {}", amplitude))]
    InvalidAmplitude { amplitude: f64 },
}

/// How every note is rendered.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SynthConfig {
    /// Number of samples per second.
    pub sample_rate: u32,
    /// How long each note (or rest) lasts, in seconds.
    pub note_duration: f64,
    /// Peak amplitude of a tone, relative to full scale.
    pub amplitude: f64,
}

impl SynthConfig {
    pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
    pub const DEFAULT_NOTE_DURATION: f64 = 0.5;
    pub const DEFAULT_AMPLITUDE: f64 = 0.5;
    /// A WAV data chunk counts its bytes in 32 bits, at 2 bytes per sample.
    pub const MAX_SAMPLES_PER_NOTE: usize = (u32::MAX / 2) as usize;

    /// Build a validated configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use music_llm::synth::*;
    ///
    /// assert!(SynthConfig::new(44100, 0.3, 0.8).is_ok());
    /// assert_eq!(SynthConfig::new(0, 0.3, 0.8), Err(ConfigError::ZeroSampleRate));
    /// assert!(SynthConfig::new(44100, -1.0, 0.8).is_err());
    /// ```
    pub fn new(sample_rate: u32, note_duration: f64, amplitude: f64) -> Result<Self, ConfigError> {
        let config = Self {
            sample_rate,
            note_duration,
            amplitude,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure!(self.sample_rate > 0, ZeroSampleRate);
        ensure!(
            self.note_duration.is_finite() && self.note_duration > 0.0,
            InvalidDuration {
                duration: self.note_duration
            }
        );
        ensure!(
            (self.note_duration * self.sample_rate as f64).round()
                <= Self::MAX_SAMPLES_PER_NOTE as f64,
            DurationTooLong {
                duration: self.note_duration,
                sample_rate: self.sample_rate,
            }
        );
        ensure!(
            self.samples_per_note() > 0,
            DurationTooShort {
                duration: self.note_duration,
                sample_rate: self.sample_rate,
            }
        );
        ensure!(
            self.amplitude > 0.0 && self.amplitude <= 1.0,
            InvalidAmplitude {
                amplitude: self.amplitude
            }
        );
        Ok(())
    }

    /// Number of samples rendered for every note, rounded to the nearest sample.
    pub fn samples_per_note(&self) -> usize {
        (self.note_duration * self.sample_rate as f64).round() as usize
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: Self::DEFAULT_SAMPLE_RATE,
            note_duration: Self::DEFAULT_NOTE_DURATION,
            amplitude: Self::DEFAULT_AMPLITUDE,
        }
    }
}

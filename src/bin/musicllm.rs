// music-llm -- turning text prompts into short pieces of music
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `musicllm` - turns a theme into a short piece of music, or plays back notes written by hand.

use std::io::{self, Write};
use std::path::PathBuf;

use log::{error, info};
use snafu::{ensure, ResultExt, Snafu};
use structopt::StructOpt;

use music_llm::compose::{CommandGenerator, ComposeError, Composer, Style};
use music_llm::note::Note;
use music_llm::render::render;
use music_llm::resolve::NoteResolver;
use music_llm::score::Score;
use music_llm::synth::{ConfigError, SynthConfig, Synthesizer};
use music_llm::tuning::Tuning;
use music_llm::wave::WavError;

#[derive(Debug, StructOpt)]
#[structopt(name = "musicllm", about = "Turning text prompts into music")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    #[structopt(flatten)]
    synth: SynthOpt,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
struct SynthOpt {
    /// Samples per second of the generated audio.
    #[structopt(long, default_value = "44100")]
    sample_rate: u32,

    /// Length of every note and rest in seconds.
    #[structopt(long, default_value = "0.5")]
    duration: f64,

    /// Peak amplitude of the tones, between 0 and 1.
    #[structopt(long, default_value = "0.5")]
    amplitude: f64,

    /// Frequency of A4 in Hz.
    #[structopt(long, default_value = "440")]
    reference_frequency: f64,
}

#[derive(Debug, StructOpt)]
struct OutputOpt {
    /// Output WAV file. The audio is written to stdout if not given.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Synthesize notes given on the command line, e.g. --melody "C4 E4 G4" --harmony "C4-E4-G4".
    Render {
        /// Notes separated by whitespace.
        #[structopt(long)]
        melody: String,

        /// Chords separated by whitespace, the notes of a chord joined by hyphens.
        #[structopt(long, default_value = "")]
        harmony: String,

        #[structopt(flatten)]
        out: OutputOpt,
    },
    /// Ask a language model for a composition and synthesize it.
    ///
    /// The model is any program that reads a prompt on stdin and answers on stdout,
    /// given after `--`, e.g. `musicllm compose --theme "rainy night" -- my-llm-client`.
    Compose {
        /// What the music should be about.
        #[structopt(long)]
        theme: String,

        /// One of Classical, Jazz, Rock, Pop, Blues, Electronic, Romantic.
        #[structopt(long, default_value = "Classical")]
        style: Style,

        #[structopt(flatten)]
        out: OutputOpt,

        /// The generator program and its arguments.
        #[structopt(required = true, last = true)]
        generator: Vec<String>,
    },
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("Invalid synthesizer settings: {}", source))]
    Config { source: ConfigError },
    #[snafu(display("Reference frequency must be a positive number of Hz, got {}", frequency))]
    ReferenceFrequency { frequency: f64 },
    #[snafu(display("{}", source))]
    Compose { source: ComposeError },
    #[snafu(display("Could not encode audio: {}", source))]
    Encode { source: WavError },
    #[snafu(display("Could not write audio to {}: {}", path.display(), source))]
    Output { path: PathBuf, source: io::Error },
}

fn main() {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).expect("Logger is only initialized once");

    if let Err(err) = run(opt) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(opt: Opt) -> Result<(), Error> {
    let (resolver, synth) = build_pipeline(&opt.synth)?;

    let (wav, out) = match opt.command {
        Command::Render {
            melody,
            harmony,
            out,
        } => {
            let score = Score::new(melody, harmony);
            (render(&score, &resolver, &synth).context(Encode)?, out)
        }
        Command::Compose {
            theme,
            style,
            out,
            mut generator,
        } => {
            let program = generator.remove(0);
            let mut composer = Composer::new(CommandGenerator::new(program, generator));
            let composition = composer.compose(&theme, style).context(Compose)?;
            eprintln!("{}", composition);
            (composition.render(&resolver, &synth).context(Encode)?, out)
        }
    };

    match out.output {
        Some(path) => {
            std::fs::write(&path, &wav).context(Output { path: &path })?;
            info!("wrote {} bytes to {}", wav.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(&wav)
                .and_then(|_| handle.flush())
                .context(Output { path: "<stdout>" })?;
        }
    }
    Ok(())
}

fn build_pipeline(opt: &SynthOpt) -> Result<(NoteResolver, Synthesizer), Error> {
    ensure!(
        opt.reference_frequency.is_finite() && opt.reference_frequency > 0.0,
        ReferenceFrequency {
            frequency: opt.reference_frequency
        }
    );
    let resolver = NoteResolver::new(Tuning::new(Note::A4, opt.reference_frequency));
    let config = SynthConfig::new(opt.sample_rate, opt.duration, opt.amplitude).context(Config)?;
    let synth = Synthesizer::new(config).context(Config)?;
    Ok((resolver, synth))
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> Opt {
        Opt::from_iter_safe(args).unwrap()
    }

    #[test]
    fn output_after_subcommand() {
        let opt = parse(&["musicllm", "render", "--melody", "C4 E4", "-o", "out.wav"]);
        match opt.command {
            Command::Render {
                melody,
                harmony,
                out,
            } => {
                assert_eq!(melody, "C4 E4");
                assert_eq!(harmony, "");
                assert_eq!(out.output, Some(PathBuf::from("out.wav")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn generator_after_double_dash() {
        let opt = parse(&[
            "musicllm", "--duration", "0.3", "compose", "--theme", "rain", "--style", "jazz", "-o",
            "rain.wav", "--", "llm", "-m", "small",
        ]);
        assert_eq!(opt.synth.duration, 0.3);
        match opt.command {
            Command::Compose {
                theme,
                style,
                out,
                generator,
            } => {
                assert_eq!(out.output, Some(PathBuf::from("rain.wav")));
                assert_eq!(theme, "rain");
                assert_eq!(style, Style::Jazz);
                assert_eq!(generator, vec!["llm", "-m", "small"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn compose_needs_a_generator() {
        assert!(Opt::from_iter_safe(&["musicllm", "compose", "--theme", "rain"]).is_err());
    }

    #[test]
    fn huge_reference_frequency_is_accepted_and_bounded() {
        let opt = parse(&[
            "musicllm", "--reference-frequency", "1e30", "--sample-rate", "8000", "--duration",
            "0.01", "render", "--melody", "A4",
        ]);
        let (resolver, synth) = build_pipeline(&opt.synth).unwrap();
        let wav = render(&Score::new("A4", ""), &resolver, &synth).unwrap();
        assert_eq!(wav.len(), 44 + 2 * 80);
    }

    #[test]
    fn oversized_duration_is_a_config_error() {
        let opt = parse(&["musicllm", "--duration", "1e300", "render", "--melody", "A4"]);
        assert!(matches!(
            build_pipeline(&opt.synth),
            Err(Error::Config {
                source: ConfigError::DurationTooLong { .. }
            })
        ));
    }
}

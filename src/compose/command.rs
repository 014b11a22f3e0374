//! A generator backed by an external program, e.g. a command line client for a language model.
//!
//! The prompt is written to the program's standard input and its standard output
//! is taken as the answer. Standard error is passed through to the user.
use std::io::{self, Write};
use std::process::{Command, ExitStatus, Stdio};

use log::{debug, trace};
use snafu::{ensure, ResultExt, Snafu};

use super::Generator;

#[derive(Debug, Snafu)]
pub enum CommandError {
    #[snafu(display("Could not start {:?}: {}", program, source))]
    Spawn { program: String, source: io::Error },
    #[snafu(display("Could not send the prompt to {:?}: {}", program, source))]
    Prompt { program: String, source: io::Error },
    #[snafu(display("Waiting for {:?} failed: {}", program, source))]
    Wait { program: String, source: io::Error },
    #[snafu(display("{:?} exited with {}", program, status))]
    Failed { program: String, status: ExitStatus },
    #[snafu(display("{:?} did not answer with UTF-8 text: {}", program, source))]
    Utf8 {
        program: String,
        source: std::string::FromUtf8Error,
    },
}

#[derive(Clone, Debug)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Generator for CommandGenerator {
    type Error = CommandError;

    fn generate(&mut self, prompt: &str) -> Result<String, CommandError> {
        let program = &self.program;
        debug!("running {:?} {:?}", program, self.args);
        let mut child = Command::new(program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .context(Spawn { program })?;

        let mut stdin = child.stdin.take().expect("Used stdin(Stdio::piped())");
        let written = stdin.write_all(prompt.as_bytes());
        // Closing stdin signals the end of the prompt.
        drop(stdin);
        match written {
            // The program is free to ignore its input.
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {}
            other => other.context(Prompt { program })?,
        }

        let output = child.wait_with_output().context(Wait { program })?;
        ensure!(
            output.status.success(),
            Failed {
                program,
                status: output.status
            }
        );
        let answer = String::from_utf8(output.stdout).context(Utf8 { program })?;
        trace!("{:?} answered {:?}", program, answer);
        Ok(answer.trim().to_string())
    }
}

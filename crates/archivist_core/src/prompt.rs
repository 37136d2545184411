//! Operator interaction seam.
//!
//! # Responsibility
//! - Route every operator-facing message and question through one trait.
//! - Provide a console implementation and a scripted one for tests.
//!
//! # Invariants
//! - `ask` returns the answer line without its trailing newline.
//! - End of input is reported as `io::ErrorKind::UnexpectedEof`, never as an
//!   empty answer, so prompt loops cannot spin on a closed stdin.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Source of operator decisions and sink for operator-facing messages.
pub trait DecisionProvider {
    /// Shows one informational line to the operator.
    fn say(&mut self, message: &str);

    /// Shows `prompt` and returns one line of operator input.
    fn ask(&mut self, prompt: &str) -> io::Result<String>;
}

/// Line-oriented console provider over any reader/writer pair.
pub struct ConsoleProvider<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleProvider<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl ConsoleProvider<io::StdinLock<'static>, io::Stdout> {
    /// Binds the process stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> DecisionProvider for ConsoleProvider<R, W> {
    fn say(&mut self, message: &str) {
        // Why: a closed stdout must not abort a move; only input errors surface.
        let _ = writeln!(self.output, "{message}");
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "operator input closed",
            ));
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}

/// One line of a scripted session transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptLine {
    Said(String),
    Asked(String),
}

/// Provider that replays canned answers and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    answers: VecDeque<String>,
    transcript: Vec<TranscriptLine>,
}

impl ScriptedProvider {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[TranscriptLine] {
        &self.transcript
    }

    /// Messages passed to `say`, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|line| match line {
                TranscriptLine::Said(message) => Some(message.as_str()),
                TranscriptLine::Asked(_) => None,
            })
            .collect()
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }
}

impl DecisionProvider for ScriptedProvider {
    fn say(&mut self, message: &str) {
        self.transcript.push(TranscriptLine::Said(message.to_string()));
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.transcript.push(TranscriptLine::Asked(prompt.to_string()));
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "scripted answers exhausted")
        })
    }
}

//! Line-oriented input with validation and re-prompting.
//!
//! Every reader loops until the answer is acceptable. The only error that
//! escapes besides real I/O failures is end of input, reported as
//! `UnexpectedEof` so callers can treat it as "quit".

use std::fmt::Display;
use std::io::{self, BufRead, ErrorKind, Write};
use std::ops::RangeInclusive;

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

pub fn is_closed(e: &io::Error) -> bool {
    e.kind() == ErrorKind::UnexpectedEof
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn line(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Print `message` without a newline and read one trimmed line.
    pub fn ask(&mut self, message: &str) -> io::Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(buf.trim().to_string())
    }

    pub fn read_int(&mut self, message: &str) -> io::Result<i64> {
        loop {
            let answer = self.ask(message)?;
            match answer.parse::<i64>() {
                Ok(n) => return Ok(n),
                Err(_) => self.line("Please enter a whole number.")?,
            }
        }
    }

    pub fn read_choice(&mut self, message: &str, choices: RangeInclusive<i64>) -> io::Result<i64> {
        loop {
            let n = self.read_int(message)?;
            if choices.contains(&n) {
                return Ok(n);
            }
            self.line(format!(
                "Please pick a number from {} to {}.",
                choices.start(),
                choices.end()
            ))?;
        }
    }

    pub fn read_yes_no(&mut self, message: &str) -> io::Result<bool> {
        loop {
            match self.ask(message)?.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.line("Please answer y or n.")?,
            }
        }
    }
}

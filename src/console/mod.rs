//! Line-based console: prompts, the login flow and the role menu

pub mod menu;
pub mod render;

use std::{
    fmt::Display,
    io::{self, BufRead, Write},
    str::FromStr,
};

use crate::error::{AppError, AppResult};

pub use menu::{login, run};

/// Prompt/answer I/O over any line reader and writer
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: impl Display) -> AppResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print `prompt` and read one line, without its line terminator.
    ///
    /// End of input is reported as an `UnexpectedEof` I/O error.
    pub fn ask(&mut self, prompt: &str) -> AppResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input").into());
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    /// Ask until the answer parses as `T`
    pub fn ask_parsed<T: FromStr>(&mut self, prompt: &str) -> AppResult<T> {
        loop {
            let answer = self.ask(prompt)?;
            match answer.trim().parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.say(AppError::Input(format!("'{}' is not a number", answer.trim())))?,
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// End of input at a prompt, which ends the session like a normal quit
pub fn is_end_of_input(err: &AppError) -> bool {
    matches!(err, AppError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
}

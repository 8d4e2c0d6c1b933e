use std::{
    fmt::Display,
    io::{self, BufRead, ErrorKind, Write},
    str::FromStr,
};

use crate::error::{AppError, AppResult};

/// Line-oriented console over any reader/writer pair
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes one line
    pub fn say(&mut self, line: impl Display) -> AppResult<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Shows `label` and reads one trimmed line
    ///
    /// Fails with [`ErrorKind::UnexpectedEof`] once the input is exhausted.
    pub fn prompt(&mut self, label: &str) -> AppResult<String> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::Io(io::Error::new(
                ErrorKind::UnexpectedEof,
                "input closed",
            )));
        }
        Ok(line.trim().to_string())
    }

    /// Reads a value, asking again until it parses
    ///
    /// A blank line yields `default` when one is given.
    pub fn prompt_parsed<T>(&mut self, label: &str, default: Option<T>) -> AppResult<T>
    where
        T: FromStr + Display + Clone,
    {
        let label = match &default {
            Some(value) => format!("{} [{}]", label, value),
            None => label.to_string(),
        };

        loop {
            let line = self.prompt(&label)?;
            if line.is_empty() {
                if let Some(value) = &default {
                    return Ok(value.clone());
                }
            }
            match line.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => self.say(format!("'{}' is not a valid value, try again.", line))?,
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Whether an error only means the input stream ended
pub fn is_end_of_input(err: &AppError) -> bool {
    matches!(err, AppError::Io(e) if e.kind() == ErrorKind::UnexpectedEof)
}

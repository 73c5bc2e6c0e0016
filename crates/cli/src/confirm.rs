//! Confirmation prompts for destructive actions.
//!
//! The core removes and clears unconditionally; the front end asks first.

use std::io::{self, BufRead, Write};

/// Asks the user a yes/no question.
pub trait Confirm {
    /// Show `prompt` on `out` and return whether the user agreed.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from writing the prompt or reading the answer.
    fn confirm(&mut self, out: &mut dyn Write, prompt: &str) -> io::Result<bool>;
}

/// Reads the answer from a line-oriented reader. Only `y`/`yes` agree;
/// end of input declines.
#[derive(Debug)]
pub struct ReadConfirm<R>(pub R);

impl<R: BufRead> Confirm for ReadConfirm<R> {
    fn confirm(&mut self, out: &mut dyn Write, prompt: &str) -> io::Result<bool> {
        write!(out, "{prompt} [y/N] ")?;
        out.flush()?;
        let mut answer = String::new();
        if self.0.read_line(&mut answer)? == 0 {
            return Ok(false);
        }
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

/// Agrees without asking (`--yes`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _out: &mut dyn Write, _prompt: &str) -> io::Result<bool> {
        Ok(true)
    }
}

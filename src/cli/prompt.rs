//! Interactive confirmation on the terminal.

use std::io::{self, BufRead, Write};

use vitrine::Confirm;

/// Asks on stderr and reads the answer from stdin.
///
/// Anything other than `y` or `yes` declines, including a closed stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if write!(io::stderr().lock(), "{prompt} [y/N] ").is_err() {
            return false;
        }
        if io::stderr().lock().flush().is_err() {
            return false;
        }
        read_answer(&mut io::stdin().lock())
    }
}

fn read_answer<R: BufRead>(reader: &mut R) -> bool {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) | Err(_) => false,
        Ok(_) => is_affirmative(&line),
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

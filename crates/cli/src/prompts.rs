use std::io::{self, BufRead, IsTerminal, Write};

use ttpgpack_lib::PackError;
use ttpgpack_lib::setup::Prompter;

/// Asks on stderr and reads answers line by line from stdin.
///
/// Answers may be piped in for `setup`, but yes/no confirmations refuse to
/// run without a terminal.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
  fn ask(&mut self, question: &str) -> Result<String, PackError> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", question).map_err(PackError::Prompt)?;
    stderr.flush().map_err(PackError::Prompt)?;

    let mut input = String::new();
    let read = io::stdin().lock().read_line(&mut input).map_err(PackError::Prompt)?;
    if read == 0 {
      return Err(PackError::Prompt(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "no answer on standard input",
      )));
    }

    Ok(input.trim().to_string())
  }

  fn confirm(&mut self, question: &str) -> Result<bool, PackError> {
    if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
      return Err(PackError::Prompt(io::Error::other(
        "cannot prompt for confirmation in non-interactive mode, use --yes to proceed",
      )));
    }

    let answer = self.ask(&format!("{} [y/N] ", question))?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
  }
}

//! Terminal rendering of workflow events.

use ttpgpack_lib::report::{Event, Reporter};

use crate::output::{print_error, print_info, print_step, print_success, print_warning};

/// Prints each stage as it starts. Completed stages are echoed only when verbose.
pub struct ConsoleReporter {
  verbose: bool,
}

impl ConsoleReporter {
  pub fn new(verbose: bool) -> Self {
    Self { verbose }
  }
}

impl Reporter for ConsoleReporter {
  fn report(&self, event: Event) {
    match event {
      Event::StageStarted(stage) => print_step(stage.as_str()),
      Event::StageCompleted(stage) => {
        if self.verbose {
          print_success(&format!("{} done", stage));
        }
      }
      Event::StageFailed { stage, .. } => print_error(&format!("{} failed", stage)),
      Event::Notice(message) => print_info(&message),
      Event::Warning(message) => print_warning(&message),
      Event::Success(message) => print_success(&message),
    }
  }
}

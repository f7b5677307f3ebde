//! Progress reporting capability.
//!
//! Workflows never print. They report [`Event`]s to a [`Reporter`] handed to
//! them by the caller; the CLI renders events to the terminal and tests record
//! them.

use crate::stage::Stage;

/// Something a workflow wants the user to know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
  StageStarted(Stage),
  StageCompleted(Stage),
  StageFailed { stage: Stage, message: String },
  Notice(String),
  Warning(String),
  Success(String),
}

pub trait Reporter {
  fn report(&self, event: Event);
}

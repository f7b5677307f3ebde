//! ttpgpack-lib: packaging pipeline for Tabletop Playground projects
//!
//! This crate provides everything behind the `ttpg` command:
//! - `config`: the local and project config documents, including migration of
//!   legacy project documents
//! - `pipeline`: the staged `build`, `libpack` and `dev` workflows
//! - `reconcile`: the inverse workflows (`purge`, `postpublish`, `clean`, `reset`)
//! - `setup`: first-run config creation through an injected [`setup::Prompter`]
//!
//! The project root is always passed in explicitly through [`layout::ProjectLayout`].
//! Running two workflows against the same project at once is not supported;
//! callers are responsible for running one workflow at a time.

pub mod bundle;
pub mod config;
pub mod consts;
pub mod error;
pub mod fsops;
pub mod guid;
pub mod layout;
pub mod link;
pub mod manifest;
pub mod pipeline;
pub mod platform;
pub mod reconcile;
pub mod report;
pub mod setup;
pub mod stage;
pub mod state;
pub mod tools;

#[cfg(test)]
mod util;

pub use error::PackError;

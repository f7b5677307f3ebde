//! End-to-end tests driving the ttpg binary against a scratch project with
//! shell scripts standing in for tsc, yarn and rollup.

#![cfg(unix)]

mod build_tests;
mod common;
mod dev_tests;
mod purge_tests;
mod workspace_tests;

//! Test helpers shared by every module's tests.

pub mod testutil;

//! Helpers shared by tests that touch process-wide state.

pub mod env;

// Shared test support code for scenario tests.

pub mod common;
pub mod harness;

pub use common::*;
pub use harness::init_test_logging;

//! Testing utilities for fxlog output
//!
//! Provides `TestConsole` for capturing and asserting on logger output in tests.

mod test_console;

pub use test_console::TestConsole;

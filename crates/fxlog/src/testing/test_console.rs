//! TestConsole for capturing output in tests
//!
//! Provides a console that captures every written line for assertion instead
//! of writing to stdout/stderr.

use crate::console::FxConsole;
use std::io::Write;
use std::sync::{Arc, Mutex};
use strip_ansi_escapes::strip;

/// A console that captures output for testing
///
/// Hand `console()` to a [`LoggerBuilder`](crate::LoggerBuilder), then use
/// `output()`, `contains()`, and the assertion methods to verify what the
/// logger wrote. Both stdout and stderr lines land in the same buffer, in
/// write order.
pub struct TestConsole {
    inner: Arc<FxConsole>,
    buffer: Arc<Mutex<TestBuffer>>,
}

#[derive(Debug, Default)]
struct TestBuffer {
    /// Lines with ANSI codes stripped
    lines: Vec<String>,
    /// Lines with ANSI codes preserved
    raw_lines: Vec<String>,
    /// Bytes of an unterminated line
    pending: Vec<u8>,
}

impl TestConsole {
    /// Create a test console that receives plain output
    #[must_use]
    pub fn new() -> Self {
        Self::new_inner(false)
    }

    /// Create a test console that receives styled output
    #[must_use]
    pub fn new_rich() -> Self {
        Self::new_inner(true)
    }

    fn new_inner(rich: bool) -> Self {
        let buffer = Arc::new(Mutex::new(TestBuffer::default()));
        let writer = BufferWriter(buffer.clone());

        Self {
            inner: Arc::new(FxConsole::with_writer(writer, rich)),
            buffer,
        }
    }

    /// Get the underlying console for passing to loggers
    #[must_use]
    pub fn console(&self) -> Arc<FxConsole> {
        self.inner.clone()
    }

    /// Get all captured lines (ANSI codes stripped)
    #[must_use]
    pub fn output(&self) -> Vec<String> {
        self.buffer
            .lock()
            .map(|b| b.lines.clone())
            .unwrap_or_default()
    }

    /// Get all captured lines (with ANSI codes)
    #[must_use]
    pub fn raw_output(&self) -> Vec<String> {
        self.buffer
            .lock()
            .map(|b| b.raw_lines.clone())
            .unwrap_or_default()
    }

    /// Get output as a single string
    #[must_use]
    pub fn output_string(&self) -> String {
        self.output().join("\n")
    }

    /// Get the last captured line, if any
    #[must_use]
    pub fn last_line(&self) -> Option<String> {
        self.output().pop()
    }

    /// Check if output contains a string (case-insensitive)
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        let output = self.output_string().to_lowercase();
        output.contains(&needle.to_lowercase())
    }

    /// Check if output contains all of the given strings
    #[must_use]
    pub fn contains_all(&self, needles: &[&str]) -> bool {
        needles.iter().all(|n| self.contains(n))
    }

    /// Check if output matches a regex pattern
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        match regex::Regex::new(pattern) {
            Ok(re) => self.output().iter().any(|line| re.is_match(line)),
            Err(_) => false,
        }
    }

    /// Assert that output contains a string
    ///
    /// # Panics
    ///
    /// Panics if the output does not contain the needle string.
    pub fn assert_contains(&self, needle: &str) {
        assert!(
            self.contains(needle),
            "Output did not contain '{}'. Actual output:\n{}",
            needle,
            self.output_string()
        );
    }

    /// Assert that output does NOT contain a string
    ///
    /// # Panics
    ///
    /// Panics if the output contains the needle string.
    pub fn assert_not_contains(&self, needle: &str) {
        assert!(
            !self.contains(needle),
            "Output unexpectedly contained '{}'. Actual output:\n{}",
            needle,
            self.output_string()
        );
    }

    /// Assert that some line matches a regex pattern
    ///
    /// # Panics
    ///
    /// Panics if no captured line matches.
    pub fn assert_matches(&self, pattern: &str) {
        assert!(
            self.matches(pattern),
            "No line matched /{}/. Actual output:\n{}",
            pattern,
            self.output_string()
        );
    }

    /// Assert output has specific number of lines
    ///
    /// # Panics
    ///
    /// Panics if the line count doesn't match expected.
    pub fn assert_line_count(&self, expected: usize) {
        let actual = self.output().len();
        assert_eq!(
            actual, expected,
            "Expected {} lines but got {}. Actual output:\n{}",
            expected, actual, self.output_string()
        );
    }

    /// Clear the buffer
    pub fn clear(&self) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.lines.clear();
            buf.raw_lines.clear();
            buf.pending.clear();
        }
    }

    /// Print output for debugging (in tests)
    pub fn debug_print(&self) {
        eprintln!("=== TestConsole Output ===");
        for (i, line) in self.output().iter().enumerate() {
            eprintln!("{:3}: {}", i + 1, line);
        }
        eprintln!("==========================");
    }

    /// Check if the console receives styled output
    #[must_use]
    pub fn is_rich(&self) -> bool {
        self.inner.is_rich()
    }
}

impl Default for TestConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TestConsole {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            buffer: self.buffer.clone(),
        }
    }
}

impl std::fmt::Debug for TestConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestConsole")
            .field("is_rich", &self.is_rich())
            .field("line_count", &self.output().len())
            .finish()
    }
}

/// Writer that captures complete lines into a buffer
struct BufferWriter(Arc<Mutex<TestBuffer>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut buffer) = self.0.lock() {
            buffer.pending.extend_from_slice(buf);

            while let Some(pos) = buffer.pending.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.pending.drain(..=pos).collect();
                let line = &line[..line.len() - 1];

                buffer
                    .raw_lines
                    .push(String::from_utf8_lossy(line).into_owned());
                let stripped = strip(line);
                buffer
                    .lines
                    .push(String::from_utf8_lossy(&stripped).into_owned());
            }
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Stream;

    fn print(tc: &TestConsole, line: &str) {
        tc.console().write_line(Stream::Stdout, line).unwrap();
    }

    #[test]
    fn test_new_creates_plain_console() {
        let tc = TestConsole::new();
        assert!(!tc.is_rich());
    }

    #[test]
    fn test_new_rich_creates_rich_console() {
        let tc = TestConsole::new_rich();
        assert!(tc.is_rich());
    }

    #[test]
    fn test_output_capture() {
        let tc = TestConsole::new();
        print(&tc, "Hello, world!");
        assert!(tc.contains("Hello"));
        assert!(tc.contains("world"));
    }

    #[test]
    fn test_contains_case_insensitive() {
        let tc = TestConsole::new();
        print(&tc, "Hello World");
        assert!(tc.contains("hello"));
        assert!(tc.contains("WORLD"));
    }

    #[test]
    fn test_contains_all() {
        let tc = TestConsole::new();
        print(&tc, "The quick brown fox");
        assert!(tc.contains_all(&["quick", "brown", "fox"]));
        assert!(!tc.contains_all(&["quick", "lazy"]));
    }

    #[test]
    fn test_clear() {
        let tc = TestConsole::new();
        print(&tc, "Some output");
        assert!(!tc.output().is_empty());
        tc.clear();
        assert!(tc.output().is_empty());
    }

    #[test]
    fn test_matches_regex_per_line() {
        let tc = TestConsole::new();
        print(&tc, "Error code: 42");
        print(&tc, "next");
        assert!(tc.matches(r"^Error code: \d+$"));
        assert!(!tc.matches(r"code: [a-z]+"));
    }

    #[test]
    fn test_partial_writes_join_into_lines() {
        let tc = TestConsole::new();
        let mut writer = BufferWriter(tc.buffer.clone());
        writer.write_all(b"par").unwrap();
        writer.write_all(b"tial\nsecond\n").unwrap();
        assert_eq!(tc.output(), vec!["partial", "second"]);
    }

    #[test]
    fn test_ansi_stripped_but_raw_kept() {
        let tc = TestConsole::new_rich();
        print(&tc, "\u{1b}[31mred\u{1b}[0m");
        assert_eq!(tc.output(), vec!["red"]);
        assert!(tc.raw_output()[0].contains("\u{1b}[31m"));
    }

    #[test]
    fn test_clone_shares_buffer() {
        let tc = TestConsole::new();
        print(&tc, "Test");
        let tc2 = tc.clone();
        assert!(tc2.contains("Test"));
        assert_eq!(tc2.last_line().as_deref(), Some("Test"));
    }
}

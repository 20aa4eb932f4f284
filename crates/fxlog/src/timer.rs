//! Named timers.
//!
//! A [`TimerRegistry`] maps labels to start instants (milliseconds since the
//! epoch). It only does bookkeeping; printing the start/end lines is the
//! logger's job.

use std::time::Duration;

/// Outcome of stopping a timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerResult {
    pub label: String,
    /// Elapsed whole milliseconds.
    pub span: u64,
}

impl TimerResult {
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.span)
    }
}

#[derive(Debug, Clone)]
struct TimerEntry {
    label: String,
    started_at: u64,
    generated: bool,
}

/// Active timers in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TimerRegistry {
    entries: Vec<TimerEntry>,
}

impl TimerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of running timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|e| e.label == label)
    }

    /// Start (or restart) a timer and return its label.
    ///
    /// A missing or empty label becomes `timer_<n>`, where `n` is the number
    /// of timers currently running. Restarting an existing label keeps its
    /// position and overwrites the start instant.
    pub fn start(&mut self, label: Option<&str>, now: u64) -> String {
        let (label, generated) = match label.filter(|l| !l.is_empty()) {
            Some(label) => (label.to_string(), false),
            None => (format!("timer_{}", self.entries.len()), true),
        };

        match self.entries.iter_mut().find(|e| e.label == label) {
            Some(entry) => {
                entry.started_at = now;
                entry.generated = generated;
            }
            None => self.entries.push(TimerEntry {
                label: label.clone(),
                started_at: now,
                generated,
            }),
        }

        label
    }

    /// Stop a timer and report how long it ran.
    ///
    /// Without a label, the newest generated timer is stopped, falling back to
    /// the newest timer of any kind. Returns `None` when nothing matches.
    pub fn stop(&mut self, label: Option<&str>, now: u64) -> Option<TimerResult> {
        let label = match label.filter(|l| !l.is_empty()) {
            Some(label) => label.to_string(),
            None => self.latest()?.to_string(),
        };

        let index = self.entries.iter().position(|e| e.label == label)?;
        let entry = self.entries.remove(index);

        Some(TimerResult {
            label: entry.label,
            span: now.saturating_sub(entry.started_at),
        })
    }

    fn latest(&self) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.generated)
            .or_else(|| self.entries.last())
            .map(|e| e.label.as_str())
    }
}

/// Human duration: `<n>ms` under a second, otherwise seconds with two decimals.
#[must_use]
pub fn format_duration(span_ms: u64) -> String {
    if span_ms < 1000 {
        format!("{span_ms}ms")
    } else {
        format!("{:.2}s", span_ms as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_labels_count_up() {
        let mut timers = TimerRegistry::new();
        let labels: Vec<String> = (0..3).map(|_| timers.start(None, 0)).collect();
        assert_eq!(labels, vec!["timer_0", "timer_1", "timer_2"]);
        assert_eq!(timers.len(), 3);
    }

    #[test]
    fn test_empty_label_is_generated() {
        let mut timers = TimerRegistry::new();
        assert_eq!(timers.start(Some(""), 0), "timer_0");
    }

    #[test]
    fn test_generated_label_reused_after_removal() {
        let mut timers = TimerRegistry::new();
        timers.start(None, 0);
        timers.stop(Some("timer_0"), 5);
        assert_eq!(timers.start(None, 10), "timer_0");
    }

    #[test]
    fn test_stop_reports_span() {
        let mut timers = TimerRegistry::new();
        timers.start(Some("load"), 1_000);
        let result = timers.stop(Some("load"), 2_500).unwrap();
        assert_eq!(
            result,
            TimerResult {
                label: "load".into(),
                span: 1_500
            }
        );
        assert_eq!(result.elapsed(), Duration::from_millis(1_500));
        assert!(timers.is_empty());
    }

    #[test]
    fn test_stop_twice_returns_none() {
        let mut timers = TimerRegistry::new();
        timers.start(Some("x"), 0);
        assert!(timers.stop(Some("x"), 1).is_some());
        assert!(timers.stop(Some("x"), 2).is_none());
    }

    #[test]
    fn test_stop_without_timers() {
        let mut timers = TimerRegistry::new();
        assert!(timers.stop(None, 0).is_none());
        assert!(timers.stop(Some("missing"), 0).is_none());
    }

    #[test]
    fn test_stop_without_label_prefers_generated() {
        let mut timers = TimerRegistry::new();
        timers.start(None, 0);
        timers.start(None, 0);
        timers.start(Some("named"), 0);
        assert_eq!(timers.stop(None, 1).unwrap().label, "timer_1");
        assert_eq!(timers.stop(None, 1).unwrap().label, "timer_0");
        assert_eq!(timers.stop(None, 1).unwrap().label, "named");
    }

    #[test]
    fn test_restart_overwrites_start() {
        let mut timers = TimerRegistry::new();
        timers.start(Some("x"), 0);
        timers.start(Some("x"), 400);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.stop(Some("x"), 500).unwrap().span, 100);
    }

    #[test]
    fn test_clock_going_backwards_saturates() {
        let mut timers = TimerRegistry::new();
        timers.start(Some("x"), 500);
        assert_eq!(timers.stop(Some("x"), 100).unwrap().span, 0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0ms");
        assert_eq!(format_duration(999), "999ms");
        assert_eq!(format_duration(1_000), "1.00s");
        assert_eq!(format_duration(1_500), "1.50s");
        assert_eq!(format_duration(61_234), "61.23s");
    }
}

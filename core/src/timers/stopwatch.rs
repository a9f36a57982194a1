//! Elapsed-time tracking

use chrono::{NaiveDateTime, TimeDelta};

use super::Phenomenon;

/// Measures time since a start event until it is stopped.
///
/// Ticks do not affect it; it ends on an explicit `stop`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwatch {
    started_at: Option<NaiveDateTime>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) from `now`
    pub fn start(&mut self, now: NaiveDateTime) {
        self.started_at = Some(now);
    }

    /// Stop and return the elapsed time, if it was running
    pub fn stop(&mut self, now: NaiveDateTime) -> Option<TimeDelta> {
        self.started_at.take().map(|start| (now - start).max(TimeDelta::zero()))
    }

    pub fn elapsed(&self, now: NaiveDateTime) -> Option<TimeDelta> {
        self.started_at.map(|start| (now - start).max(TimeDelta::zero()))
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn started_at(&self) -> Option<NaiveDateTime> {
        self.started_at
    }
}

impl Phenomenon for Stopwatch {
    fn tick(&mut self, _now: NaiveDateTime) {}

    fn clear(&mut self) {
        self.started_at = None;
    }

    fn is_active(&self, _now: NaiveDateTime) -> bool {
        self.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at_ms(ms: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            + TimeDelta::milliseconds(ms)
    }

    #[test]
    fn stop_reports_elapsed_once() {
        let mut watch = Stopwatch::new();
        watch.start(at_ms(0));
        assert_eq!(watch.elapsed(at_ms(750)), Some(TimeDelta::milliseconds(750)));

        assert_eq!(watch.stop(at_ms(1230)), Some(TimeDelta::milliseconds(1230)));
        assert_eq!(watch.stop(at_ms(2000)), None);
        assert!(!watch.is_running());
    }

    #[test]
    fn ticks_do_not_stop_it() {
        let mut watch = Stopwatch::new();
        watch.start(at_ms(0));
        watch.tick(at_ms(100_000));
        assert!(watch.is_active(at_ms(100_000)));
    }
}

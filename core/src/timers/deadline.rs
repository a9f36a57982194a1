//! Wall-clock countdown to an absolute deadline

use chrono::{NaiveDateTime, TimeDelta};

use super::Phenomenon;

/// Countdown measured against the clock rather than server ticks.
///
/// Armed with `deadline = now + duration`; active until the deadline passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineTimer {
    duration: TimeDelta,
    deadline: Option<NaiveDateTime>,
}

impl DeadlineTimer {
    pub fn new(duration: TimeDelta) -> Self {
        Self {
            duration,
            deadline: None,
        }
    }

    pub fn arm(&mut self, now: NaiveDateTime) {
        self.deadline = Some(now + self.duration);
    }

    pub fn deadline(&self) -> Option<NaiveDateTime> {
        self.deadline
    }

    pub fn duration(&self) -> TimeDelta {
        self.duration
    }

    /// Time left, or `None` when not armed or already past
    pub fn remaining(&self, now: NaiveDateTime) -> Option<TimeDelta> {
        let deadline = self.deadline?;
        (deadline >= now).then(|| deadline - now)
    }

    pub fn remaining_secs(&self, now: NaiveDateTime) -> Option<f32> {
        self.remaining(now)
            .map(|left| left.num_milliseconds() as f32 / 1000.0)
    }

    /// Drop the deadline once it has passed
    pub fn expire(&mut self, now: NaiveDateTime) {
        if self.deadline.is_some_and(|d| d < now) {
            self.deadline = None;
        }
    }
}

impl Phenomenon for DeadlineTimer {
    fn tick(&mut self, now: NaiveDateTime) {
        self.expire(now);
    }

    fn clear(&mut self) {
        self.deadline = None;
    }

    fn is_active(&self, now: NaiveDateTime) -> bool {
        self.remaining(now).is_some()
    }
}

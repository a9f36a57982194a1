//! Time sources for deadline and stopwatch timers
//!
//! Tick countdowns never look at the clock; only the wall-clock based
//! phenomena (start delay, crystal pickup) do. The engine reads the clock
//! once per inbound signal and once per render pass.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use chrono::{Local, NaiveDateTime, TimeDelta};

/// Source of "now" for the engine.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock that only moves when told to.
///
/// Used by tests and by scripted replays, where every server tick advances
/// time by one [`tick_duration`](crate::timers::tick_duration).
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Move time forward. Negative deltas are ignored, and so are deltas
    /// that would overflow the representable range.
    pub fn advance(&self, delta: TimeDelta) {
        if delta <= TimeDelta::zero() {
            return;
        }
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        match current.checked_add_signed(delta) {
            Some(next) => *current = next,
            None => tracing::warn!(delta = %delta, "Clock advance out of range, ignored"),
        }
    }

    pub fn set(&self, time: NaiveDateTime) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = time;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

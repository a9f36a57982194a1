//! Timer system
//!
//! This module provides:
//! - **Tick countdowns**: integer counters driven by the server tick, either
//!   one-shot or periodically re-armed
//! - **Deadlines**: wall-clock countdowns (start delay)
//! - **Stopwatches**: elapsed time since an event (crystal pickup)
//! - **Board**: the fixed set of tracked phenomena, in registration order
//!
//! Every phenomenon is created once, armed by a classified chat event,
//! advanced by ticks and force-cleared on session boundaries.

mod board;
mod countdown;
mod deadline;
mod display;
mod stopwatch;

#[cfg(test)]
mod board_tests;

pub use board::{PhenomenonId, TimerBoard};
pub use countdown::{INACTIVE, RearmPolicy, TickCountdown};
pub use deadline::DeadlineTimer;
pub use display::{
    TICK_MILLIS, TICKS_PER_SECOND, format_secs, format_ticks, tick_duration, ticks_to_secs,
};
pub use stopwatch::Stopwatch;

use chrono::NaiveDateTime;

/// Common lifecycle of every tracked phenomenon.
pub trait Phenomenon {
    /// Advance by one server tick
    fn tick(&mut self, now: NaiveDateTime);

    /// Drop any running state (session boundary)
    fn clear(&mut self);

    fn is_active(&self, now: NaiveDateTime) -> bool;
}

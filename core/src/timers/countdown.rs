//! Tick-driven countdowns
//!
//! A countdown holds the number of server ticks left, or [`INACTIVE`].
//!
//! # Policies
//!
//! - **One-shot**: decrements while `>= 0`, so arming with `n` and ticking
//!   `n` times leaves it at 0; one more tick stops it at -1.
//! - **Periodic**: decrements while active; landing on 0 reloads the
//!   configured period instead of stopping. The reload value may differ from
//!   the arm value.

use chrono::NaiveDateTime;

use super::Phenomenon;
use super::display::ticks_to_secs;

/// Sentinel for a countdown that is not running
pub const INACTIVE: i32 = -1;

/// What happens when a countdown reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RearmPolicy {
    OneShot,
    Periodic { reload: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickCountdown {
    remaining: i32,
    arm_ticks: i32,
    policy: RearmPolicy,
}

impl TickCountdown {
    pub fn one_shot(arm_ticks: i32) -> Self {
        Self::with_policy(arm_ticks, RearmPolicy::OneShot)
    }

    /// Periodic countdown; a reload below 1 is raised to 1.
    pub fn periodic(arm_ticks: i32, reload: i32) -> Self {
        Self::with_policy(
            arm_ticks,
            RearmPolicy::Periodic {
                reload: reload.max(1),
            },
        )
    }

    pub fn with_policy(arm_ticks: i32, policy: RearmPolicy) -> Self {
        Self {
            remaining: INACTIVE,
            arm_ticks: arm_ticks.max(0),
            policy,
        }
    }

    /// Arm with the configured start value
    pub fn arm(&mut self) {
        self.arm_with(self.arm_ticks);
    }

    /// Arm with an explicit start value. Overwrites any running countdown;
    /// values below -1 are clamped (and thus clear it).
    pub fn arm_with(&mut self, ticks: i32) {
        self.remaining = ticks.max(INACTIVE);
    }

    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    pub fn arm_ticks(&self) -> i32 {
        self.arm_ticks
    }

    pub fn policy(&self) -> RearmPolicy {
        self.policy
    }

    pub fn is_running(&self) -> bool {
        self.remaining > INACTIVE
    }

    /// Remaining time in seconds (negative when inactive)
    pub fn remaining_secs(&self) -> f32 {
        ticks_to_secs(self.remaining)
    }

    pub fn step(&mut self) {
        if self.remaining <= INACTIVE {
            return;
        }
        self.remaining -= 1;
        if let RearmPolicy::Periodic { reload } = self.policy
            && self.remaining == 0
        {
            self.remaining = reload;
        }
    }

    pub fn reset(&mut self) {
        self.remaining = INACTIVE;
    }
}

impl Phenomenon for TickCountdown {
    fn tick(&mut self, _now: NaiveDateTime) {
        self.step();
    }

    fn clear(&mut self) {
        self.reset();
    }

    fn is_active(&self, _now: NaiveDateTime) -> bool {
        self.is_running()
    }
}

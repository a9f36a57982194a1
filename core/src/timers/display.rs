//! Tick/second conversion for display

use chrono::TimeDelta;

/// Server ticks per second
pub const TICKS_PER_SECOND: f32 = 20.0;

/// Wall-clock length of one server tick, in milliseconds
pub const TICK_MILLIS: i64 = 50;

pub fn tick_duration() -> TimeDelta {
    TimeDelta::milliseconds(TICK_MILLIS)
}

pub fn ticks_to_secs(ticks: i32) -> f32 {
    ticks as f32 / TICKS_PER_SECOND
}

/// Ticks as seconds with two decimals (`36` → `"1.80"`)
pub fn format_ticks(ticks: i32) -> String {
    format_secs(ticks_to_secs(ticks))
}

pub fn format_secs(secs: f32) -> String {
    format!("{:.2}", secs)
}

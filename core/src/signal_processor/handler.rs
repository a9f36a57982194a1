use chrono::NaiveDateTime;

use crate::chat::ChatEvent;

/// Trait for systems that react to classified chat events and ticks.
/// Implemented by the timer board; hosts may register extra observers.
pub trait SignalHandler {
    /// Handle one classified chat event.
    ///
    /// Crystal pickups only reach handlers when they name the local player.
    fn handle_event(&mut self, event: &ChatEvent, now: NaiveDateTime);

    /// Called once per server tick
    fn on_tick(&mut self, _now: NaiveDateTime) {}

    /// Called on disconnect and world unload
    fn on_session_reset(&mut self) {}
}

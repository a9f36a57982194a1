//! The set of tracked phenomena
//!
//! The board owns every countdown for the lifetime of the engine. Overlays
//! only ever get `&TimerBoard`; the engine is the single writer.

use chrono::{NaiveDateTime, TimeDelta};

use crate::chat::ChatEvent;
use crate::signal_processor::SignalHandler;

use super::{DeadlineTimer, Phenomenon, Stopwatch, TickCountdown};

pub const CRYSTAL_SPAWN_TICKS: i32 = 36;
pub const PAD_ARM_TICKS: i32 = 20;
pub const PAD_RELOAD_TICKS: i32 = 40;
pub const CRUSH_TICKS: i32 = 20;
pub const BARRIER_TICKS: i32 = 60;
pub const START_DELAY_MS: i64 = 5200;

/// Item name the crystal pickup is tracked by
pub const ENERGY_CRYSTAL: &str = "Energy Crystal";

/// Identifies one phenomenon on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhenomenonId {
    CrystalSpawn,
    StormPad,
    StormCrush,
    GoldorStart,
    GoldorBarrier,
    CrystalPickup,
}

impl PhenomenonId {
    /// Registration order (also the tick and clear order)
    pub fn all() -> &'static [PhenomenonId] {
        &[
            PhenomenonId::CrystalSpawn,
            PhenomenonId::StormPad,
            PhenomenonId::StormCrush,
            PhenomenonId::GoldorStart,
            PhenomenonId::GoldorBarrier,
            PhenomenonId::CrystalPickup,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PhenomenonId::CrystalSpawn => "crystal_spawn",
            PhenomenonId::StormPad => "storm_pad",
            PhenomenonId::StormCrush => "storm_crush",
            PhenomenonId::GoldorStart => "goldor_start",
            PhenomenonId::GoldorBarrier => "goldor_barrier",
            PhenomenonId::CrystalPickup => "crystal_pickup",
        }
    }
}

/// Owns all phenomena
#[derive(Debug, Clone)]
pub struct TimerBoard {
    pub crystal_spawn: TickCountdown,
    pub storm_pad: TickCountdown,
    pub storm_crush: TickCountdown,
    pub goldor_start: DeadlineTimer,
    pub goldor_barrier: TickCountdown,
    pub crystal_pickup: Stopwatch,
}

impl Default for TimerBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerBoard {
    pub fn new() -> Self {
        Self {
            crystal_spawn: TickCountdown::one_shot(CRYSTAL_SPAWN_TICKS),
            storm_pad: TickCountdown::periodic(PAD_ARM_TICKS, PAD_RELOAD_TICKS),
            storm_crush: TickCountdown::one_shot(CRUSH_TICKS),
            goldor_start: DeadlineTimer::new(TimeDelta::milliseconds(START_DELAY_MS)),
            goldor_barrier: TickCountdown::periodic(BARRIER_TICKS, BARRIER_TICKS),
            crystal_pickup: Stopwatch::new(),
        }
    }

    pub fn get(&self, id: PhenomenonId) -> &dyn Phenomenon {
        match id {
            PhenomenonId::CrystalSpawn => &self.crystal_spawn,
            PhenomenonId::StormPad => &self.storm_pad,
            PhenomenonId::StormCrush => &self.storm_crush,
            PhenomenonId::GoldorStart => &self.goldor_start,
            PhenomenonId::GoldorBarrier => &self.goldor_barrier,
            PhenomenonId::CrystalPickup => &self.crystal_pickup,
        }
    }

    fn phenomena_mut(&mut self) -> [&mut dyn Phenomenon; 6] {
        [
            &mut self.crystal_spawn,
            &mut self.storm_pad,
            &mut self.storm_crush,
            &mut self.goldor_start,
            &mut self.goldor_barrier,
            &mut self.crystal_pickup,
        ]
    }

    pub fn is_active(&self, id: PhenomenonId, now: NaiveDateTime) -> bool {
        self.get(id).is_active(now)
    }

    /// Ids of everything currently running
    pub fn active(&self, now: NaiveDateTime) -> Vec<PhenomenonId> {
        PhenomenonId::all()
            .iter()
            .copied()
            .filter(|id| self.is_active(*id, now))
            .collect()
    }

    /// Apply the transition for one classified chat event.
    ///
    /// Pickup events are expected to be pre-filtered to the local player.
    pub fn apply(&mut self, event: &ChatEvent, now: NaiveDateTime) {
        match event {
            ChatEvent::CrystalsSpawning => self.crystal_spawn.arm(),
            ChatEvent::PadsActivated => self.storm_pad.arm(),
            ChatEvent::StormDefeated => {
                self.storm_pad.reset();
                self.goldor_start.arm(now);
            }
            ChatEvent::StormCrushed => self.storm_crush.arm(),
            ChatEvent::BarrierStarted => self.goldor_barrier.arm(),
            ChatEvent::CoreOpening => self.goldor_barrier.reset(),
            ChatEvent::CrystalPickedUp { .. } => self.crystal_pickup.start(now),
        }
    }

    /// Feed the item currently in the last hotbar slot.
    ///
    /// Ends a running pickup stopwatch once the slot no longer holds an energy
    /// crystal and returns how long the crystal was held.
    pub fn observe_hotbar(&mut self, item: Option<&str>, now: NaiveDateTime) -> Option<TimeDelta> {
        if !self.crystal_pickup.is_running() {
            return None;
        }
        let still_held = item.is_some_and(|name| name.contains(ENERGY_CRYSTAL));
        if still_held {
            return None;
        }
        self.crystal_pickup.stop(now)
    }

    pub fn tick_all(&mut self, now: NaiveDateTime) {
        for phenomenon in self.phenomena_mut() {
            phenomenon.tick(now);
        }
    }

    pub fn clear_all(&mut self) {
        for phenomenon in self.phenomena_mut() {
            phenomenon.clear();
        }
    }
}

impl SignalHandler for TimerBoard {
    fn handle_event(&mut self, event: &ChatEvent, now: NaiveDateTime) {
        self.apply(event, now);
    }

    fn on_tick(&mut self, now: NaiveDateTime) {
        self.tick_all(now);
    }

    fn on_session_reset(&mut self) {
        self.clear_all();
    }
}

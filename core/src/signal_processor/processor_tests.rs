//! End-to-end tests for the timer engine
//!
//! Feeds chat lines, ticks and hotbar observations through `TimerEngine` and
//! checks the timer board and rendered overlays.

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::chat::ChatEvent;
use crate::clock::ManualClock;
use crate::context::{Flag, FlagStore, SettingsStore};
use crate::overlays::{BARRIER_LABEL, CRYSTAL_TITLE_LABEL, PAD_LABEL, START_LABEL};
use crate::timers::{INACTIVE, PhenomenonId, tick_duration};

use super::{Notice, Signal, SignalHandler, TimerEngine};

const GOLDOR_LINE: &str = "[BOSS] Goldor: Who dares trespass into my domain?";
const CORE_LINE: &str = "The Core entrance is opening!";
const PAD_LINE: &str = "[BOSS] Storm: Pathetic Maxor, just like expected.";
const STORM_DEATH_LINE: &str = "[BOSS] Storm: I should have known that I stood no chance.";

fn t0() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(20, 0, 0)
        .unwrap()
}

struct Harness {
    engine: TimerEngine,
    clock: Arc<ManualClock>,
    store: Arc<SettingsStore>,
}

impl Harness {
    fn new() -> Self {
        let clock = Arc::new(ManualClock::new(t0()));
        let store = Arc::new(SettingsStore::default());
        let engine = TimerEngine::new(store.clone(), clock.clone()).unwrap();
        Self {
            engine,
            clock,
            store,
        }
    }

    fn with_player(name: &str) -> Self {
        let mut harness = Self::new();
        harness.engine.handle_signal(&Signal::LocalPlayer(name.to_string()));
        harness
    }

    fn chat(&mut self, line: &str) -> Vec<Notice> {
        self.engine.handle_signal(&Signal::chat(line))
    }

    /// Server ticks, advancing the clock one tick each
    fn ticks(&mut self, n: usize) {
        for _ in 0..n {
            self.clock.advance(tick_duration());
            self.engine.handle_signal(&Signal::ServerTick);
        }
    }

    fn slot(&mut self, item: Option<&str>) -> Vec<Notice> {
        self.engine
            .handle_signal(&Signal::HotbarSlot(item.map(str::to_string)))
    }
}

#[test]
fn test_pickup_arms_only_for_local_player() {
    let mut h = Harness::with_player("Steve");
    h.chat("Alex picked up an Energy Crystal!");
    assert!(!h.engine.timers().crystal_pickup.is_running());

    h.chat("Steve picked up an Energy Crystal!");
    assert!(h.engine.timers().crystal_pickup.is_running());
}

#[test]
fn test_pickup_ignored_without_local_player() {
    let mut h = Harness::new();
    h.chat("Steve picked up an Energy Crystal!");
    assert!(h.engine.timers().active(t0()).is_empty());
}

#[test]
fn test_barrier_reloads_then_stops_on_core() {
    let mut h = Harness::new();
    h.chat(GOLDOR_LINE);
    assert_eq!(h.engine.timers().goldor_barrier.remaining(), 60);

    h.ticks(60);
    assert_eq!(h.engine.timers().goldor_barrier.remaining(), 60);

    h.ticks(13);
    h.chat(CORE_LINE);
    assert_eq!(h.engine.timers().goldor_barrier.remaining(), INACTIVE);
}

#[test]
fn test_overlay_hidden_before_arming() {
    let h = Harness::new();
    h.store.set_flag(Flag::BarrierTicks, true);

    let views = h.engine.render();
    let barrier = views.iter().find(|v| v.label == BARRIER_LABEL).unwrap();
    assert!(barrier.enabled);
    assert!(!barrier.visible);
    assert!(!barrier.should_draw());
    assert!(h.engine.drawable().is_empty());
}

#[test]
fn test_render_follows_ticks() {
    let mut h = Harness::new();
    h.store.set_flag(Flag::PadTicks, true);
    h.chat(PAD_LINE);
    h.ticks(4);

    let drawable = h.engine.drawable();
    assert_eq!(drawable.len(), 1);
    assert_eq!(drawable[0].label, PAD_LABEL);
    assert_eq!(drawable[0].text, "0.80");
}

#[test]
fn test_disconnect_clears_active_and_inactive() {
    let mut h = Harness::with_player("Steve");
    h.chat(GOLDOR_LINE);
    h.chat("Steve picked up an Energy Crystal!");
    assert!(h.engine.timers().is_active(PhenomenonId::GoldorBarrier, h.engine.now()));
    assert!(!h.engine.timers().is_active(PhenomenonId::StormCrush, h.engine.now()));

    h.engine.handle_signal(&Signal::Disconnect);

    let timers = h.engine.timers();
    assert!(timers.active(h.engine.now()).is_empty());
    assert_eq!(timers.goldor_barrier.remaining(), INACTIVE);
    assert_eq!(timers.storm_crush.remaining(), INACTIVE);
    // Session reset keeps the player name
    assert_eq!(h.engine.local_player(), Some("Steve"));
}

#[test]
fn test_world_unload_clears_timers() {
    let mut h = Harness::new();
    h.chat(STORM_DEATH_LINE);
    assert!(h.engine.timers().is_active(PhenomenonId::GoldorStart, h.engine.now()));

    h.engine.handle_signal(&Signal::WorldUnload);
    assert!(!h.engine.timers().is_active(PhenomenonId::GoldorStart, h.engine.now()));
}

#[test]
fn test_start_timer_waits_for_goldor() {
    let mut h = Harness::new();
    h.store.set_flag(Flag::StartTimer, true);
    h.chat(STORM_DEATH_LINE);
    assert!(h.engine.drawable().is_empty());

    h.ticks(24);
    assert!(h.engine.drawable().is_empty());

    h.chat(GOLDOR_LINE);
    let views = h.engine.drawable();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].label, START_LABEL);
    assert_eq!(views[0].text, "4.00");

    h.ticks(90);
    assert!(h.engine.drawable().is_empty());
}

#[test]
fn test_frame_applies_signals_in_order() {
    let mut h = Harness::new();
    let frame = [
        Signal::chat(GOLDOR_LINE),
        Signal::ServerTick,
        Signal::ServerTick,
        Signal::chat(CORE_LINE),
        Signal::chat(GOLDOR_LINE),
        Signal::ServerTick,
    ];
    h.engine.handle_frame(&frame);
    assert_eq!(h.engine.timers().goldor_barrier.remaining(), 59);
}

#[test]
fn test_formatting_codes_are_stripped_before_matching() {
    let mut h = Harness::new();
    h.chat("§4[BOSS] Goldor§r: §cWho dares trespass into my domain?   ");
    assert_eq!(h.engine.timers().goldor_barrier.remaining(), 60);
}

#[test]
fn test_crystal_notice_requires_flag() {
    let mut h = Harness::with_player("Steve");
    h.chat("Steve picked up an Energy Crystal!");
    h.slot(Some("Energy Crystal"));
    h.clock.advance(TimeDelta::milliseconds(1500));
    assert!(h.slot(None).is_empty());
    assert!(!h.engine.timers().crystal_pickup.is_running());

    h.store.set_flag(Flag::SendCrystalTime, true);
    h.chat("Steve picked up an Energy Crystal!");
    h.clock.advance(TimeDelta::milliseconds(2250));
    assert_eq!(h.slot(Some("Energy Crystal")), vec![]);
    let notices = h.slot(Some("Bonzo's Staff"));
    assert_eq!(notices, vec![Notice::CrystalPlaced { elapsed_secs: 2.25 }]);
    assert_eq!(notices[0].chat_text(), "Crystal placed in &a2.25s&7.");
}

#[test]
fn test_crystal_title_visible_while_holding() {
    let mut h = Harness::with_player("Steve");
    h.store.set_flag(Flag::CrystalTitle, true);
    h.chat("Steve picked up an Energy Crystal!");

    let views = h.engine.drawable();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].label, CRYSTAL_TITLE_LABEL);
    assert_eq!(views[0].text, "Place Crystal!");

    h.slot(None);
    assert!(h.engine.drawable().is_empty());
}

#[test]
fn test_preview_lists_every_overlay() {
    let h = Harness::new();
    let preview = h.engine.preview();
    assert_eq!(preview.len(), 6);
    assert!(preview.iter().all(|v| v.visible && v.text == v.placeholder));
}

#[derive(Default)]
struct Recorded {
    events: Vec<ChatEvent>,
    ticks: usize,
    resets: usize,
}

struct Recorder(Arc<Mutex<Recorded>>);

impl SignalHandler for Recorder {
    fn handle_event(&mut self, event: &ChatEvent, _now: NaiveDateTime) {
        self.0.lock().unwrap().events.push(event.clone());
    }

    fn on_tick(&mut self, _now: NaiveDateTime) {
        self.0.lock().unwrap().ticks += 1;
    }

    fn on_session_reset(&mut self) {
        self.0.lock().unwrap().resets += 1;
    }
}

#[test]
fn test_extra_handlers_observe_signals() {
    let mut h = Harness::new();
    let recorded = Arc::new(Mutex::new(Recorded::default()));
    h.engine.add_handler(Box::new(Recorder(recorded.clone())));

    h.chat(GOLDOR_LINE);
    h.chat("unrelated chatter");
    h.ticks(3);
    h.engine.handle_signal(&Signal::WorldUnload);

    let recorded = recorded.lock().unwrap();
    assert_eq!(recorded.events, vec![ChatEvent::BarrierStarted]);
    assert_eq!(recorded.ticks, 3);
    assert_eq!(recorded.resets, 1);
}

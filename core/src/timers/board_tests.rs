//! Tests for TimerBoard transitions
//!
//! Verifies that classified events arm the right phenomena and that ticks,
//! hotbar observations and resets move them as expected.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use super::board::{BARRIER_TICKS, CRYSTAL_SPAWN_TICKS, PAD_RELOAD_TICKS};
use super::{INACTIVE, PhenomenonId, TimerBoard};
use crate::chat::ChatEvent;
use crate::signal_processor::SignalHandler;

fn t0() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(20, 0, 0)
        .unwrap()
}

fn at_ms(ms: i64) -> NaiveDateTime {
    t0() + TimeDelta::milliseconds(ms)
}

fn tick_n(board: &mut TimerBoard, n: usize) {
    for _ in 0..n {
        board.tick_all(t0());
    }
}

#[test]
fn test_everything_starts_inactive() {
    let board = TimerBoard::new();
    assert!(board.active(t0()).is_empty());
    assert_eq!(board.crystal_spawn.remaining(), INACTIVE);
}

#[test]
fn test_crystal_spawn_is_one_shot() {
    let mut board = TimerBoard::new();
    board.apply(&ChatEvent::CrystalsSpawning, t0());
    assert_eq!(board.crystal_spawn.remaining(), CRYSTAL_SPAWN_TICKS);

    tick_n(&mut board, CRYSTAL_SPAWN_TICKS as usize);
    assert_eq!(board.crystal_spawn.remaining(), 0);
    assert!(board.is_active(PhenomenonId::CrystalSpawn, t0()));

    tick_n(&mut board, 1);
    assert!(!board.is_active(PhenomenonId::CrystalSpawn, t0()));
}

#[test]
fn test_pad_reloads_to_longer_period() {
    let mut board = TimerBoard::new();
    board.apply(&ChatEvent::PadsActivated, t0());

    tick_n(&mut board, 20);
    assert_eq!(board.storm_pad.remaining(), PAD_RELOAD_TICKS);
}

#[test]
fn test_storm_death_stops_pads_and_starts_goldor_delay() {
    let mut board = TimerBoard::new();
    board.apply(&ChatEvent::PadsActivated, t0());
    tick_n(&mut board, 5);

    board.apply(&ChatEvent::StormDefeated, at_ms(0));

    assert!(!board.is_active(PhenomenonId::StormPad, at_ms(0)));
    assert!(board.is_active(PhenomenonId::GoldorStart, at_ms(5000)));
    assert_eq!(board.goldor_start.remaining_secs(at_ms(200)), Some(5.0));
    assert!(!board.is_active(PhenomenonId::GoldorStart, at_ms(5300)));
}

#[test]
fn test_barrier_loops_until_core_opens() {
    let mut board = TimerBoard::new();
    board.apply(&ChatEvent::BarrierStarted, t0());
    assert_eq!(board.goldor_barrier.remaining(), BARRIER_TICKS);

    tick_n(&mut board, 60);
    assert_eq!(board.goldor_barrier.remaining(), BARRIER_TICKS);

    tick_n(&mut board, 17);
    board.apply(&ChatEvent::CoreOpening, t0());
    assert_eq!(board.goldor_barrier.remaining(), INACTIVE);
}

#[test]
fn test_crush_rearm_overwrites() {
    let mut board = TimerBoard::new();
    board.apply(&ChatEvent::StormCrushed, t0());
    tick_n(&mut board, 15);
    assert_eq!(board.storm_crush.remaining(), 5);

    board.apply(&ChatEvent::StormCrushed, t0());
    assert_eq!(board.storm_crush.remaining(), 20);
}

#[test]
fn test_hotbar_ends_pickup_only_when_crystal_leaves() {
    let mut board = TimerBoard::new();
    let pickup = ChatEvent::CrystalPickedUp {
        player: "Steve".to_string(),
    };
    board.apply(&pickup, at_ms(0));

    assert_eq!(board.observe_hotbar(Some("Energy Crystal"), at_ms(500)), None);
    assert!(board.crystal_pickup.is_running());

    let held = board.observe_hotbar(Some("Ender Pearl"), at_ms(1230));
    assert_eq!(held, Some(TimeDelta::milliseconds(1230)));
    assert!(!board.crystal_pickup.is_running());

    // Nothing running any more
    assert_eq!(board.observe_hotbar(None, at_ms(2000)), None);
}

#[test]
fn test_empty_slot_ends_pickup() {
    let mut board = TimerBoard::new();
    board.apply(
        &ChatEvent::CrystalPickedUp {
            player: "Steve".to_string(),
        },
        at_ms(0),
    );
    assert!(board.observe_hotbar(None, at_ms(100)).is_some());
}

#[test]
fn test_reset_clears_active_and_inactive_alike() {
    let mut board = TimerBoard::new();
    board.apply(&ChatEvent::BarrierStarted, t0());
    board.apply(&ChatEvent::StormDefeated, t0());
    board.apply(
        &ChatEvent::CrystalPickedUp {
            player: "Steve".to_string(),
        },
        t0(),
    );
    assert!(!board.is_active(PhenomenonId::StormCrush, t0()));

    board.on_session_reset();

    assert!(board.active(t0()).is_empty());
    assert_eq!(board.goldor_start.deadline(), None);
    assert_eq!(board.storm_crush.remaining(), INACTIVE);

    // Stays inactive through ticks until re-armed
    board.on_tick(t0());
    assert!(board.active(t0()).is_empty());
}

#[test]
fn test_tick_expires_start_delay() {
    let mut board = TimerBoard::new();
    board.handle_event(&ChatEvent::StormDefeated, at_ms(0));
    board.on_tick(at_ms(6000));
    assert_eq!(board.goldor_start.deadline(), None);
}

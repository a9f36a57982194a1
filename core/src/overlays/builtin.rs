//! The timer overlays shipped with the engine

use std::sync::Arc;

use crate::binding::{Binding, FlagBinding};
use crate::context::{Flag, FlagStore};
use crate::timers::{PhenomenonId, TickCountdown, format_secs, format_ticks};

use super::entry::{RenderContext, TextOverlay, ValueResult};
use super::error::RegistryError;
use super::registry::OverlayRegistry;
use super::style::{BARRIER_THRESHOLDS, StyledText};

pub const CRYSTAL_LABEL: &str = "Energy crystal spawn ticks";
pub const PAD_LABEL: &str = "Storm pad ticks";
pub const CRUSH_LABEL: &str = "Storm crush ticks";
pub const START_LABEL: &str = "Goldor start timer";
pub const BARRIER_LABEL: &str = "Goldor barrier ticks";
pub const CRYSTAL_TITLE_LABEL: &str = "Crystal place title";

pub const TICK_PLACEHOLDER: &str = "0.00";
pub const CRYSTAL_TITLE_TEXT: &str = "Place Crystal!";

fn countdown_text(countdown: &TickCountdown) -> ValueResult {
    Ok(countdown
        .is_running()
        .then(|| StyledText::plain(format_ticks(countdown.remaining()))))
}

fn active(id: PhenomenonId) -> impl Fn(&RenderContext<'_>) -> bool + Send + Sync + 'static {
    move |ctx: &RenderContext<'_>| ctx.timers.is_active(id, ctx.now)
}

/// Register every timer overlay, in display order.
pub fn register_timer_overlays(
    registry: &mut OverlayRegistry,
    store: Arc<dyn FlagStore>,
) -> Result<(), RegistryError> {
    let bind = |flag| FlagBinding::new(store.clone(), flag);

    registry.register(TextOverlay::new(
        bind(Flag::CrystalTicks),
        CRYSTAL_LABEL,
        |ctx| countdown_text(&ctx.timers.crystal_spawn),
        active(PhenomenonId::CrystalSpawn),
        TICK_PLACEHOLDER,
    ))?;

    registry.register(TextOverlay::new(
        bind(Flag::PadTicks),
        PAD_LABEL,
        |ctx| countdown_text(&ctx.timers.storm_pad),
        active(PhenomenonId::StormPad),
        TICK_PLACEHOLDER,
    ))?;

    registry.register(TextOverlay::new(
        bind(Flag::CrushTicks),
        CRUSH_LABEL,
        |ctx| countdown_text(&ctx.timers.storm_crush),
        active(PhenomenonId::StormCrush),
        TICK_PLACEHOLDER,
    ))?;

    registry.register(TextOverlay::new(
        bind(Flag::StartTimer),
        START_LABEL,
        |ctx| {
            Ok(ctx
                .timers
                .goldor_start
                .remaining_secs(ctx.now)
                .map(|secs| StyledText::plain(format_secs(secs))))
        },
        |ctx: &RenderContext<'_>| {
            ctx.timers.is_active(PhenomenonId::GoldorBarrier, ctx.now)
                && ctx.timers.is_active(PhenomenonId::GoldorStart, ctx.now)
        },
        TICK_PLACEHOLDER,
    ))?;

    let dynamic_colors = bind(Flag::BarrierDynamicColors);
    registry.register(TextOverlay::new(
        bind(Flag::BarrierTicks),
        BARRIER_LABEL,
        move |ctx| {
            let barrier = &ctx.timers.goldor_barrier;
            if !barrier.is_running() {
                return Ok(None);
            }
            let body = format_ticks(barrier.remaining());
            Ok(Some(if dynamic_colors.get() {
                StyledText::styled(BARRIER_THRESHOLDS.style_for(barrier.remaining()), body)
            } else {
                StyledText::plain(body)
            }))
        },
        active(PhenomenonId::GoldorBarrier),
        TICK_PLACEHOLDER,
    ))?;

    registry.register(TextOverlay::new(
        bind(Flag::CrystalTitle),
        CRYSTAL_TITLE_LABEL,
        |ctx| {
            Ok(ctx
                .timers
                .crystal_pickup
                .is_running()
                .then(|| StyledText::plain(CRYSTAL_TITLE_TEXT)))
        },
        active(PhenomenonId::CrystalPickup),
        CRYSTAL_TITLE_TEXT,
    ))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatEvent;
    use crate::context::SettingsStore;
    use crate::timers::TimerBoard;
    use chrono::{NaiveDate, NaiveDateTime};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn setup() -> (OverlayRegistry, Arc<SettingsStore>) {
        let store = Arc::new(SettingsStore::default());
        let mut registry = OverlayRegistry::new();
        register_timer_overlays(&mut registry, store.clone()).unwrap();
        (registry, store)
    }

    #[test]
    fn registers_all_overlays_in_order() {
        let (registry, _) = setup();
        assert_eq!(
            registry.labels().collect::<Vec<_>>(),
            vec![
                CRYSTAL_LABEL,
                PAD_LABEL,
                CRUSH_LABEL,
                START_LABEL,
                BARRIER_LABEL,
                CRYSTAL_TITLE_LABEL
            ]
        );
    }

    #[test]
    fn registering_twice_fails() {
        let (mut registry, store) = setup();
        assert!(register_timer_overlays(&mut registry, store).is_err());
    }

    #[test]
    fn inactive_overlays_are_hidden_with_placeholder_text() {
        let (registry, _) = setup();
        let board = TimerBoard::new();
        let ctx = RenderContext { timers: &board, now: now() };

        for view in registry.render(&ctx) {
            assert!(!view.visible, "{} should be hidden", view.label);
            assert_eq!(view.text, view.placeholder);
        }
    }

    #[test]
    fn barrier_colors_follow_flag() {
        let (registry, store) = setup();
        let mut board = TimerBoard::new();
        board.apply(&ChatEvent::BarrierStarted, now());
        let barrier = registry.get(BARRIER_LABEL).unwrap();

        let ctx = RenderContext { timers: &board, now: now() };
        assert_eq!(barrier.text(&ctx), "3.00");

        store.set_flag(Flag::BarrierDynamicColors, true);
        assert_eq!(barrier.text(&ctx), "&a3.00");

        for _ in 0..25 {
            board.tick_all(now());
        }
        let ctx = RenderContext { timers: &board, now: now() };
        assert_eq!(barrier.text(&ctx), "&e1.75");

        for _ in 0..20 {
            board.tick_all(now());
        }
        let ctx = RenderContext { timers: &board, now: now() };
        assert_eq!(barrier.text(&ctx), "&c0.75");
    }

    #[test]
    fn start_timer_needs_barrier_and_pending_deadline() {
        let (registry, _) = setup();
        let start = registry.get(START_LABEL).unwrap();
        let mut board = TimerBoard::new();
        let at = |ms| now() + chrono::TimeDelta::milliseconds(ms);

        board.apply(&ChatEvent::StormDefeated, now());
        let ctx = RenderContext { timers: &board, now: at(200) };
        assert!(!start.is_visible(&ctx));

        board.apply(&ChatEvent::BarrierStarted, at(1000));
        let ctx = RenderContext { timers: &board, now: at(1200) };
        assert!(start.is_visible(&ctx));
        assert_eq!(start.text(&ctx), "4.00");

        // Deadline passed while the barrier keeps cycling
        let ctx = RenderContext { timers: &board, now: at(5300) };
        assert!(!start.is_visible(&ctx));
    }

    #[test]
    fn enable_binding_tracks_store() {
        let (registry, store) = setup();
        let pad = registry.get(PAD_LABEL).unwrap();
        assert!(!pad.is_enabled());

        pad.set_enabled(true);
        assert!(store.get_flag(Flag::PadTicks));
    }
}

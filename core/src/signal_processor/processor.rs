use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::chat::{ChatClassifier, ChatEvent, normalize_line};
use crate::clock::Clock;
use crate::context::{Flag, FlagStore, OverlayPositionConfig, OverlaySettings};
use crate::overlays::{
    OverlayRegistry, OverlayView, RegistryError, RenderContext, TextOverlay,
    register_timer_overlays,
};
use crate::timers::TimerBoard;

use super::handler::SignalHandler;
use super::signal::{Notice, Signal};

/// Errors while constructing or extending the engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to register overlay")]
    Registry(#[from] RegistryError),
}

/// Routes inbound signals to the timers and serves overlay views.
///
/// The engine is the only writer of timer state. Signals are applied through
/// `&mut self` and overlays are rendered through `&self`, so a render always
/// sees every signal handed in before it.
pub struct TimerEngine {
    classifier: ChatClassifier,
    timers: TimerBoard,
    overlays: OverlayRegistry,
    flags: Arc<dyn FlagStore>,
    clock: Arc<dyn Clock>,
    local_player: Option<String>,
    /// Extra observers, called after the board in registration order
    handlers: Vec<Box<dyn SignalHandler + Send>>,
}

impl TimerEngine {
    /// Build an engine with the built-in timer overlays registered.
    pub fn new(flags: Arc<dyn FlagStore>, clock: Arc<dyn Clock>) -> Result<Self, EngineError> {
        let mut overlays = OverlayRegistry::new();
        register_timer_overlays(&mut overlays, flags.clone())?;
        tracing::info!(overlays = overlays.len(), "Timer engine initialized");

        Ok(Self {
            classifier: ChatClassifier::new(),
            timers: TimerBoard::new(),
            overlays,
            flags,
            clock,
            local_player: None,
            handlers: Vec::new(),
        })
    }

    pub fn with_local_player(mut self, name: impl Into<String>) -> Self {
        self.local_player = Some(name.into());
        self
    }

    /// Register an additional overlay. Only possible while nothing renders,
    /// since it needs `&mut self`.
    pub fn register_overlay(&mut self, overlay: TextOverlay) -> Result<(), EngineError> {
        self.overlays.register(overlay)?;
        Ok(())
    }

    /// Register an extra observer of classified events, ticks and resets
    pub fn add_handler(&mut self, handler: Box<dyn SignalHandler + Send>) {
        self.handlers.push(handler);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Inbound
    // ═══════════════════════════════════════════════════════════════════════

    /// Apply one signal. Returns chat notices for the host to display.
    pub fn handle_signal(&mut self, signal: &Signal) -> Vec<Notice> {
        let now = self.clock.now();
        let mut notices = Vec::new();

        match signal {
            Signal::ChatLine(line) => self.handle_chat(line, now),
            Signal::ServerTick => {
                self.timers.on_tick(now);
                for handler in &mut self.handlers {
                    handler.on_tick(now);
                }
            }
            Signal::HotbarSlot(item) => {
                if let Some(held) = self.timers.observe_hotbar(item.as_deref(), now) {
                    let elapsed_secs = held.num_milliseconds() as f32 / 1000.0;
                    tracing::debug!(elapsed_secs, "Crystal placed");
                    if self.flags.get_flag(Flag::SendCrystalTime) {
                        notices.push(Notice::CrystalPlaced { elapsed_secs });
                    }
                }
            }
            Signal::LocalPlayer(name) => {
                tracing::debug!(player = %name, "Local player set");
                self.local_player = Some(name.clone());
            }
            Signal::WorldUnload | Signal::Disconnect => self.reset_session(signal),
        }

        notices
    }

    /// Apply a batch of signals that arrived within the same frame.
    pub fn handle_frame(&mut self, signals: &[Signal]) -> Vec<Notice> {
        signals
            .iter()
            .flat_map(|signal| self.handle_signal(signal))
            .collect()
    }

    fn handle_chat(&mut self, raw: &str, now: NaiveDateTime) {
        let line = normalize_line(raw);
        let Some(event) = self.classifier.classify(&line) else {
            return;
        };

        if let ChatEvent::CrystalPickedUp { player } = &event
            && self.local_player.as_deref() != Some(player.as_str())
        {
            tracing::debug!(player = %player, "Ignoring crystal pickup by another player");
            return;
        }

        tracing::debug!(event = ?event.kind(), "Chat event");
        self.timers.handle_event(&event, now);
        for handler in &mut self.handlers {
            handler.handle_event(&event, now);
        }
    }

    fn reset_session(&mut self, cause: &Signal) {
        tracing::info!(cause = ?cause, "Session ended, clearing timers");
        self.timers.on_session_reset();
        for handler in &mut self.handlers {
            handler.on_session_reset();
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Outbound
    // ═══════════════════════════════════════════════════════════════════════

    /// Fresh view of every overlay, in registration order
    pub fn render(&self) -> Vec<OverlayView> {
        let ctx = RenderContext {
            timers: &self.timers,
            now: self.clock.now(),
        };
        self.overlays.render(&ctx)
    }

    /// Only the overlays that are enabled and currently visible
    pub fn drawable(&self) -> Vec<OverlayView> {
        self.render().into_iter().filter(OverlayView::should_draw).collect()
    }

    /// Placeholder views for the layout editor
    pub fn preview(&self) -> Vec<OverlayView> {
        self.overlays.preview()
    }

    /// Stored position per overlay in registration order, for the layout editor
    pub fn layout(&self, settings: &OverlaySettings) -> Vec<(String, OverlayPositionConfig)> {
        self.overlays.layout(settings)
    }

    pub fn timers(&self) -> &TimerBoard {
        &self.timers
    }

    pub fn overlays(&self) -> &OverlayRegistry {
        &self.overlays
    }

    pub fn flags(&self) -> &Arc<dyn FlagStore> {
        &self.flags
    }

    pub fn local_player(&self) -> Option<&str> {
        self.local_player.as_deref()
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}

impl fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerEngine")
            .field("timers", &self.timers)
            .field("overlays", &self.overlays.len())
            .field("local_player", &self.local_player)
            .field("handlers", &self.handlers.len())
            .finish_non_exhaustive()
    }
}

//! A single text overlay and the view handed to renderers

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::binding::Binding;
use crate::timers::TimerBoard;

use super::error::OverlayError;
use super::style::StyledText;

/// Read-only state available to value producers and visibility predicates
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub timers: &'a TimerBoard,
    pub now: NaiveDateTime,
}

/// `Ok(None)` means "nothing to show right now", which is not a fault.
pub type ValueResult = Result<Option<StyledText>, OverlayError>;

type ValueFn = Box<dyn Fn(&RenderContext<'_>) -> ValueResult + Send + Sync>;
type VisibleFn = Box<dyn Fn(&RenderContext<'_>) -> bool + Send + Sync>;

/// What a renderer or layout editor sees for one overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayView {
    pub label: String,
    pub enabled: bool,
    pub visible: bool,
    pub text: String,
    pub placeholder: String,
}

impl OverlayView {
    /// Enabled by the user and currently has something to show
    pub fn should_draw(&self) -> bool {
        self.enabled && self.visible
    }
}

/// Text overlay bound to an enable flag
///
/// The value producer and visibility predicate run inside the host's render
/// pass and must not panic. Report a missing or broken value through
/// [`ValueResult`] instead: `Ok(None)` shows the placeholder, `Err` shows the
/// placeholder and is logged. Panics are not caught, and release builds abort
/// on panic.
pub struct TextOverlay {
    label: String,
    enabled: Box<dyn Binding<bool>>,
    value: ValueFn,
    visible: VisibleFn,
    placeholder: String,
    /// Set after a producer fault is logged, cleared on the next good value
    fault_reported: AtomicBool,
}

impl TextOverlay {
    pub fn new(
        enabled: impl Binding<bool> + 'static,
        label: impl Into<String>,
        value: impl Fn(&RenderContext<'_>) -> ValueResult + Send + Sync + 'static,
        visible: impl Fn(&RenderContext<'_>) -> bool + Send + Sync + 'static,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            enabled: Box::new(enabled),
            value: Box::new(value),
            visible: Box::new(visible),
            placeholder: placeholder.into(),
            fault_reported: AtomicBool::new(false),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    pub fn is_visible(&self, ctx: &RenderContext<'_>) -> bool {
        (self.visible)(ctx)
    }

    /// Current text, falling back to the placeholder when the producer has
    /// nothing or fails. Faults are logged once until the producer recovers.
    pub fn text(&self, ctx: &RenderContext<'_>) -> String {
        match (self.value)(ctx) {
            Ok(Some(text)) => {
                self.fault_reported.store(false, Ordering::Relaxed);
                text.to_string()
            }
            Ok(None) => self.placeholder.clone(),
            Err(err) => {
                if !self.fault_reported.swap(true, Ordering::Relaxed) {
                    tracing::warn!(label = %self.label, error = %err, "Overlay value producer failed");
                }
                self.placeholder.clone()
            }
        }
    }

    pub fn view(&self, ctx: &RenderContext<'_>) -> OverlayView {
        OverlayView {
            label: self.label.clone(),
            enabled: self.is_enabled(),
            visible: self.is_visible(ctx),
            text: self.text(ctx),
            placeholder: self.placeholder.clone(),
        }
    }

    /// View for the layout editor: always visible, showing the placeholder
    pub fn preview(&self) -> OverlayView {
        OverlayView {
            label: self.label.clone(),
            enabled: self.is_enabled(),
            visible: true,
            text: self.placeholder.clone(),
            placeholder: self.placeholder.clone(),
        }
    }
}

impl fmt::Debug for TextOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextOverlay")
            .field("label", &self.label)
            .field("placeholder", &self.placeholder)
            .finish_non_exhaustive()
    }
}

//! Overlay registry
//!
//! Each overlay is a text entry with an enable binding, a lazily evaluated
//! value, a visibility predicate and a placeholder for layout previews. The
//! registry is filled once at engine construction and only read afterwards;
//! the external renderer and layout editor pull [`OverlayView`]s from it.

mod builtin;
mod entry;
mod error;
mod registry;
mod style;

pub use builtin::{
    BARRIER_LABEL, CRUSH_LABEL, CRYSTAL_LABEL, CRYSTAL_TITLE_LABEL, CRYSTAL_TITLE_TEXT, PAD_LABEL,
    START_LABEL, TICK_PLACEHOLDER, register_timer_overlays,
};
pub use entry::{OverlayView, RenderContext, TextOverlay, ValueResult};
pub use error::{OverlayError, RegistryError};
pub use registry::OverlayRegistry;
pub use style::{BARRIER_THRESHOLDS, ColorThresholds, StyleTag, StyledText};

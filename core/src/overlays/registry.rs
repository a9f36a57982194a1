//! Ordered collection of overlays
//!
//! Registration order is preserved; the layout editor relies on it for a
//! stable iteration order. There is no removal: overlays are turned off
//! through their enable binding.

use hashbrown::HashMap;

use crate::context::{OverlayPositionConfig, OverlaySettings};

use super::entry::{OverlayView, RenderContext, TextOverlay};
use super::error::RegistryError;

#[derive(Debug, Default)]
pub struct OverlayRegistry {
    entries: Vec<TextOverlay>,
    by_label: HashMap<String, usize>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an overlay. Labels key the persisted layout, so a second
    /// overlay with an existing label is rejected.
    pub fn register(&mut self, overlay: TextOverlay) -> Result<(), RegistryError> {
        if self.by_label.contains_key(overlay.label()) {
            tracing::error!(label = %overlay.label(), "Duplicate overlay label rejected");
            return Err(RegistryError::DuplicateLabel {
                label: overlay.label().to_string(),
            });
        }
        self.by_label
            .insert(overlay.label().to_string(), self.entries.len());
        self.entries.push(overlay);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&TextOverlay> {
        self.by_label.get(label).map(|&idx| &self.entries[idx])
    }

    /// Overlays in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TextOverlay> {
        self.entries.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(TextOverlay::label)
    }

    /// Fresh view of every overlay, in registration order
    pub fn render(&self, ctx: &RenderContext<'_>) -> Vec<OverlayView> {
        self.entries.iter().map(|o| o.view(ctx)).collect()
    }

    /// Placeholder views for the layout editor
    pub fn preview(&self) -> Vec<OverlayView> {
        self.entries.iter().map(TextOverlay::preview).collect()
    }

    /// Stored position of every overlay, defaulting missing slots
    pub fn layout(&self, settings: &OverlaySettings) -> Vec<(String, OverlayPositionConfig)> {
        self.entries
            .iter()
            .map(|o| (o.label().to_string(), settings.get_position(o.label())))
            .collect()
    }
}

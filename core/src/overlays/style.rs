//! Typed text styling
//!
//! Styles stay typed until the render boundary, where they are written out
//! as `&x` color codes.

use std::fmt;

/// Color/style applied to a piece of overlay or chat text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    Green,
    Yellow,
    Red,
    Gray,
}

impl StyleTag {
    pub fn code(&self) -> &'static str {
        match self {
            StyleTag::Green => "&a",
            StyleTag::Yellow => "&e",
            StyleTag::Red => "&c",
            StyleTag::Gray => "&7",
        }
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Text with an optional leading style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledText {
    pub style: Option<StyleTag>,
    pub body: String,
}

impl StyledText {
    pub fn plain(body: impl Into<String>) -> Self {
        Self {
            style: None,
            body: body.into(),
        }
    }

    pub fn styled(style: StyleTag, body: impl Into<String>) -> Self {
        Self {
            style: Some(style),
            body: body.into(),
        }
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(style) = self.style {
            write!(f, "{style}")?;
        }
        f.write_str(&self.body)
    }
}

/// Three-band coloring by remaining ticks: above `high` green, above `low`
/// yellow, otherwise red.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorThresholds {
    pub high: i32,
    pub low: i32,
}

/// Bands used by the barrier countdown
pub const BARRIER_THRESHOLDS: ColorThresholds = ColorThresholds { high: 40, low: 20 };

impl ColorThresholds {
    pub fn style_for(&self, ticks: i32) -> StyleTag {
        if ticks > self.high {
            StyleTag::Green
        } else if ticks > self.low {
            StyleTag::Yellow
        } else {
            StyleTag::Red
        }
    }
}

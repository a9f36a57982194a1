//! Chat line classification
//!
//! Turns decoded chat lines into semantic [`ChatEvent`]s. Classification is
//! pure; the engine decides what each event does to the timers.

mod classifier;
mod formatting;

pub use classifier::{ChatClassifier, ChatEvent, EventKind};
pub use formatting::{normalize_line, strip_formatting};

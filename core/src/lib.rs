pub mod binding;
pub mod chat;
pub mod clock;
pub mod context;
pub mod overlays;
pub mod service;
pub mod signal_processor;
pub mod timers;

// Re-exports for convenience
pub use binding::{AccessorBinding, Binding, ConstBinding, FlagBinding};
pub use chat::{ChatClassifier, ChatEvent, EventKind};
pub use clock::{Clock, ManualClock, SystemClock};
pub use context::{AppConfig, AppConfigExt, ConfigError, Flag, FlagStore, SettingsStore};
pub use overlays::{OverlayRegistry, OverlayView, StyleTag, StyledText, TextOverlay};
pub use service::{EngineService, ServiceCommand, ServiceError, ServiceHandle};
pub use signal_processor::{EngineError, Notice, Signal, SignalHandler, TimerEngine};
pub use timers::{PhenomenonId, TimerBoard};

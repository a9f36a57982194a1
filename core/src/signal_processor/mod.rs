pub mod handler;
pub mod processor;
pub mod signal;

#[cfg(test)]
mod processor_tests;

pub use handler::SignalHandler;
pub use processor::{EngineError, TimerEngine};
pub use signal::{Notice, Signal};

//! Scripted signal replay
//!
//! A replay script is a plain text file with one command per line:
//!
//! ```text
//! # comment
//! player Steve
//! chat [BOSS] Goldor: Who dares trespass into my domain?
//! tick 20
//! wait 250
//! slot Energy Crystal
//! slot
//! unload
//! disconnect
//! render
//! ```
//!
//! Time is simulated: every `tick` advances the clock by one server tick and
//! `wait` advances it by the given number of milliseconds.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{NaiveDateTime, TimeDelta};
use thiserror::Error;
use ticktrack_core::clock::ManualClock;
use ticktrack_core::context::FlagStore;
use ticktrack_core::overlays::OverlayView;
use ticktrack_core::signal_processor::{EngineError, Notice, Signal, TimerEngine};
use ticktrack_core::timers::tick_duration;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read replay script {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// One parsed script command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Signal(Signal),
    Ticks(u32),
    Wait(TimeDelta),
    Render,
}

/// Longest single `wait` a script may request (one day)
const MAX_WAIT_MS: i64 = 24 * 60 * 60 * 1000;

fn syntax(line: usize, message: impl Into<String>) -> ReplayError {
    ReplayError::Syntax {
        line,
        message: message.into(),
    }
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, ReplayError> {
    let mut steps = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_start();
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest),
            None => (line.trim_end(), ""),
        };

        let step = match command {
            "chat" => ScriptStep::Signal(Signal::chat(rest)),
            "player" => {
                let name = rest.trim();
                if name.is_empty() {
                    return Err(syntax(line_no, "player needs a name"));
                }
                ScriptStep::Signal(Signal::LocalPlayer(name.to_string()))
            }
            "tick" => {
                let count = match rest.trim() {
                    "" => 1,
                    n => n
                        .parse()
                        .map_err(|_| syntax(line_no, format!("invalid tick count '{n}'")))?,
                };
                ScriptStep::Ticks(count)
            }
            "wait" => {
                let ms: i64 = rest
                    .trim()
                    .parse()
                    .map_err(|_| syntax(line_no, format!("invalid wait '{}'", rest.trim())))?;
                if !(0..=MAX_WAIT_MS).contains(&ms) {
                    return Err(syntax(
                        line_no,
                        format!("wait must be between 0 and {MAX_WAIT_MS} ms"),
                    ));
                }
                ScriptStep::Wait(TimeDelta::milliseconds(ms))
            }
            "slot" => {
                let item = rest.trim();
                ScriptStep::Signal(Signal::HotbarSlot(
                    (!item.is_empty()).then(|| item.to_string()),
                ))
            }
            "unload" => ScriptStep::Signal(Signal::WorldUnload),
            "disconnect" => ScriptStep::Signal(Signal::Disconnect),
            "render" => ScriptStep::Render,
            other => return Err(syntax(line_no, format!("unknown command '{other}'"))),
        };
        steps.push(step);
    }

    Ok(steps)
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>, ReplayError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReplayError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&text)
}

/// Something the replay produced, tagged with the server tick it happened on
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayOutput {
    Notice { tick: u64, notice: Notice },
    Render { tick: u64, views: Vec<OverlayView> },
}

/// Engine driven by a simulated clock
pub struct Replay {
    engine: TimerEngine,
    clock: Arc<ManualClock>,
    ticks: u64,
}

impl Replay {
    pub fn new(flags: Arc<dyn FlagStore>, start: NaiveDateTime) -> Result<Self, ReplayError> {
        let clock = Arc::new(ManualClock::new(start));
        let engine = TimerEngine::new(flags, clock.clone())?;
        Ok(Self {
            engine,
            clock,
            ticks: 0,
        })
    }

    /// Start with the local player already known, as if a `player` line
    /// preceded the script
    pub fn with_player(mut self, name: impl Into<String>) -> Self {
        self.engine = self.engine.with_local_player(name);
        self
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn run(&mut self, steps: &[ScriptStep]) -> Vec<ReplayOutput> {
        let mut output = Vec::new();

        for step in steps {
            match step {
                ScriptStep::Signal(signal) => {
                    for notice in self.engine.handle_signal(signal) {
                        output.push(ReplayOutput::Notice {
                            tick: self.ticks,
                            notice,
                        });
                    }
                }
                ScriptStep::Ticks(count) => {
                    for _ in 0..*count {
                        self.clock.advance(tick_duration());
                        self.engine.handle_signal(&Signal::ServerTick);
                        self.ticks += 1;
                    }
                }
                ScriptStep::Wait(delta) => self.clock.advance(*delta),
                ScriptStep::Render => output.push(ReplayOutput::Render {
                    tick: self.ticks,
                    views: self.engine.drawable(),
                }),
            }
        }

        tracing::debug!(ticks = self.ticks, outputs = output.len(), "Replay finished");
        output
    }
}

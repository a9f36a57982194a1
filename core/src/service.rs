//! Background task that owns a [`TimerEngine`]
//!
//! Hosts that receive signals on one thread and draw on another hand frames
//! to the service over a channel and read overlay snapshots from a `watch`
//! channel. The engine itself never leaves the task.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, watch};

use crate::context::Flag;
use crate::overlays::OverlayView;
use crate::signal_processor::{Notice, Signal, TimerEngine};

// ─────────────────────────────────────────────────────────────────────────────
// Service Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Messages sent to the service
#[derive(Debug, Clone)]
pub enum ServiceCommand {
    /// Signals received during one frame, applied in order
    Frame(Vec<Signal>),
    SetFlag(Flag, bool),
    Shutdown,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("engine service has stopped")]
    Stopped,
}

impl<T> From<mpsc::error::SendError<T>> for ServiceError {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        ServiceError::Stopped
    }
}

pub type OverlaySnapshot = Arc<[OverlayView]>;

// ─────────────────────────────────────────────────────────────────────────────
// Service
// ─────────────────────────────────────────────────────────────────────────────

pub struct EngineService {
    engine: TimerEngine,
    cmd_rx: mpsc::Receiver<ServiceCommand>,
    views_tx: watch::Sender<OverlaySnapshot>,
    notice_tx: mpsc::UnboundedSender<Notice>,
}

impl EngineService {
    /// Wrap an engine. Returns the service, a handle for senders and renderers,
    /// and the receiving end for chat notices.
    pub fn new(
        engine: TimerEngine,
    ) -> (Self, ServiceHandle, mpsc::UnboundedReceiver<Notice>) {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let (views_tx, views_rx) = watch::channel(OverlaySnapshot::from(engine.render()));
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();

        let service = Self {
            engine,
            cmd_rx,
            views_tx,
            notice_tx,
        };
        let handle = ServiceHandle { cmd_tx, views_rx };

        (service, handle, notice_rx)
    }

    /// Run the command loop until shutdown or until every handle is dropped.
    /// Returns the engine so callers can inspect its final state.
    pub async fn run(mut self) -> TimerEngine {
        tracing::info!("Engine service started");

        while let Some(cmd) = self.cmd_rx.recv().await {
            match cmd {
                ServiceCommand::Frame(signals) => {
                    for notice in self.engine.handle_frame(&signals) {
                        if self.notice_tx.send(notice).is_err() {
                            tracing::debug!("Notice receiver dropped");
                        }
                    }
                    self.publish();
                }
                ServiceCommand::SetFlag(flag, value) => {
                    tracing::debug!(flag = %flag, value, "Flag updated");
                    self.engine.flags().set_flag(flag, value);
                    self.publish();
                }
                ServiceCommand::Shutdown => break,
            }
        }

        tracing::info!("Engine service stopped");
        self.engine
    }

    fn publish(&self) {
        // No receivers left is not an error; the handle may only send.
        let _ = self.views_tx.send(OverlaySnapshot::from(self.engine.render()));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Handle
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ServiceHandle {
    cmd_tx: mpsc::Sender<ServiceCommand>,
    views_rx: watch::Receiver<OverlaySnapshot>,
}

impl ServiceHandle {
    pub async fn send_frame(&self, signals: Vec<Signal>) -> Result<(), ServiceError> {
        self.cmd_tx.send(ServiceCommand::Frame(signals)).await?;
        Ok(())
    }

    pub async fn set_flag(&self, flag: Flag, value: bool) -> Result<(), ServiceError> {
        self.cmd_tx.send(ServiceCommand::SetFlag(flag, value)).await?;
        Ok(())
    }

    pub async fn shutdown(&self) -> Result<(), ServiceError> {
        self.cmd_tx.send(ServiceCommand::Shutdown).await?;
        Ok(())
    }

    /// Latest published overlay views
    pub fn views(&self) -> OverlaySnapshot {
        self.views_rx.borrow().clone()
    }

    /// Receiver that is notified whenever a new snapshot is published
    pub fn subscribe(&self) -> watch::Receiver<OverlaySnapshot> {
        self.views_rx.clone()
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::overlays::StyleTag;

/// Inbound signals from the host client, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Signal {
    /// One decoded chat line
    ChatLine(String),
    /// Fixed-rate server tick (20 per second)
    ServerTick,
    /// Display name of the item in the last hotbar slot, reported each client tick
    HotbarSlot(Option<String>),
    /// The local player's display name became known or changed
    LocalPlayer(String),
    WorldUnload,
    Disconnect,
}

impl Signal {
    pub fn chat(line: impl Into<String>) -> Self {
        Self::ChatLine(line.into())
    }

    /// Disconnect and world unload both end the session
    pub fn is_session_boundary(&self) -> bool {
        matches!(self, Self::WorldUnload | Self::Disconnect)
    }
}

/// Outbound messages the engine asks the host to show in chat
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Notice {
    /// The held crystal was placed after `elapsed_secs`
    CrystalPlaced { elapsed_secs: f32 },
}

impl Notice {
    /// Chat text with `&x` style codes
    pub fn chat_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::CrystalPlaced { elapsed_secs } => write!(
                f,
                "Crystal placed in {}{:.2}s{}.",
                StyleTag::Green,
                elapsed_secs,
                StyleTag::Gray
            ),
        }
    }
}

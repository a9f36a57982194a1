//! Shared configuration types for ticktrack
//!
//! This crate contains serializable configuration types that are shared between
//! the engine (ticktrack-core) and any front end that edits options or layout.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────────
// Flags
// ─────────────────────────────────────────────────────────────────────────────

/// Boolean options the timer overlays are gated on.
///
/// Each flag has a stable snake_case key used by option menus and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// Crystal spawn countdown
    CrystalTicks,
    /// Storm pad countdown
    PadTicks,
    /// Storm crush countdown
    CrushTicks,
    /// Goldor barrier countdown
    BarrierTicks,
    /// Green/yellow/red styling on the barrier countdown
    BarrierDynamicColors,
    /// Goldor start delay
    StartTimer,
    /// "Place Crystal!" title while holding a crystal
    CrystalTitle,
    /// Chat message with crystal placement time
    SendCrystalTime,
}

impl Flag {
    pub fn all() -> &'static [Flag] {
        &[
            Flag::CrystalTicks,
            Flag::PadTicks,
            Flag::CrushTicks,
            Flag::BarrierTicks,
            Flag::BarrierDynamicColors,
            Flag::StartTimer,
            Flag::CrystalTitle,
            Flag::SendCrystalTime,
        ]
    }

    /// Stable key (matches the serde representation)
    pub fn key(&self) -> &'static str {
        match self {
            Flag::CrystalTicks => "crystal_ticks",
            Flag::PadTicks => "pad_ticks",
            Flag::CrushTicks => "crush_ticks",
            Flag::BarrierTicks => "barrier_ticks",
            Flag::BarrierDynamicColors => "barrier_dynamic_colors",
            Flag::StartTimer => "start_timer",
            Flag::CrystalTitle => "crystal_title",
            Flag::SendCrystalTime => "send_crystal_time",
        }
    }

    /// Human readable option name
    pub fn label(&self) -> &'static str {
        match self {
            Flag::CrystalTicks => "Crystal spawn timer",
            Flag::PadTicks => "Storm pad timer",
            Flag::CrushTicks => "Storm crush timer",
            Flag::BarrierTicks => "Barrier timer",
            Flag::BarrierDynamicColors => "Dynamic colors",
            Flag::StartTimer => "Start timer",
            Flag::CrystalTitle => "Crystal place title",
            Flag::SendCrystalTime => "Crystal time message",
        }
    }

    /// Parent option this one is only meaningful under (for option UIs).
    pub fn depends_on(&self) -> Option<Flag> {
        match self {
            Flag::BarrierDynamicColors => Some(Flag::BarrierTicks),
            _ => None,
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a string names no known flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFlag(pub String);

impl fmt::Display for UnknownFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown flag '{}'", self.0)
    }
}

impl std::error::Error for UnknownFlag {}

impl FromStr for Flag {
    type Err = UnknownFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Flag::all()
            .iter()
            .copied()
            .find(|f| f.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFlag(s.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Overlay Position
// ─────────────────────────────────────────────────────────────────────────────

/// Stored screen position for one overlay (written by the layout editor)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayPositionConfig {
    pub x: i32,
    pub y: i32,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl Default for OverlayPositionConfig {
    fn default() -> Self {
        Self {
            x: 50,
            y: 50,
            scale: 1.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Overlay Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Timer overlay toggles plus the stored layout, keyed by overlay label.
///
/// All toggles default off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlaySettings {
    #[serde(default)]
    pub crystal_ticks: bool,
    #[serde(default)]
    pub pad_ticks: bool,
    #[serde(default)]
    pub crush_ticks: bool,
    #[serde(default)]
    pub barrier_ticks: bool,
    #[serde(default)]
    pub barrier_dynamic_colors: bool,
    #[serde(default)]
    pub start_timer: bool,
    #[serde(default)]
    pub crystal_title: bool,
    #[serde(default)]
    pub send_crystal_time: bool,
    #[serde(default)]
    pub positions: HashMap<String, OverlayPositionConfig>,
}

impl OverlaySettings {
    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::CrystalTicks => self.crystal_ticks,
            Flag::PadTicks => self.pad_ticks,
            Flag::CrushTicks => self.crush_ticks,
            Flag::BarrierTicks => self.barrier_ticks,
            Flag::BarrierDynamicColors => self.barrier_dynamic_colors,
            Flag::StartTimer => self.start_timer,
            Flag::CrystalTitle => self.crystal_title,
            Flag::SendCrystalTime => self.send_crystal_time,
        }
    }

    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let slot = match flag {
            Flag::CrystalTicks => &mut self.crystal_ticks,
            Flag::PadTicks => &mut self.pad_ticks,
            Flag::CrushTicks => &mut self.crush_ticks,
            Flag::BarrierTicks => &mut self.barrier_ticks,
            Flag::BarrierDynamicColors => &mut self.barrier_dynamic_colors,
            Flag::StartTimer => &mut self.start_timer,
            Flag::CrystalTitle => &mut self.crystal_title,
            Flag::SendCrystalTime => &mut self.send_crystal_time,
        };
        *slot = value;
    }

    pub fn get_position(&self, label: &str) -> OverlayPositionConfig {
        self.positions.get(label).cloned().unwrap_or_default()
    }

    pub fn set_position(&mut self, label: &str, config: OverlayPositionConfig) {
        self.positions.insert(label.to_string(), config);
    }

    pub fn enabled_flags(&self) -> Vec<Flag> {
        Flag::all()
            .iter()
            .copied()
            .filter(|f| self.flag(*f))
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level persisted configuration.
///
/// Persistence lives in ticktrack-core's `AppConfigExt` so this crate stays
/// free of filesystem dependencies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Display name of the local player, if known ahead of the first session.
    #[serde(default)]
    pub local_player: Option<String>,

    #[serde(default)]
    pub overlay_settings: OverlaySettings,
}

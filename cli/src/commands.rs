use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use ticktrack_core::clock::SystemClock;
use ticktrack_core::context::{AppConfig, AppConfigExt, ConfigError, Flag, OverlayPositionConfig};
use ticktrack_core::signal_processor::TimerEngine;

use crate::context::CliContext;
use crate::replay::{self, Replay, ReplayOutput};

pub async fn replay(path: &str, player: Option<&str>, ctx: &CliContext) -> Result<(), String> {
    let steps = replay::load_script(Path::new(path)).map_err(|e| e.to_string())?;

    let player = match player {
        Some(name) => Some(name.to_string()),
        None => ctx.config.read().await.local_player.clone(),
    };

    let mut replay =
        Replay::new(ctx.settings.clone(), Local::now().naive_local()).map_err(|e| e.to_string())?;
    if let Some(name) = player {
        replay = replay.with_player(name);
    }
    let timer = Instant::now();
    let output = replay.run(&steps);

    for item in &output {
        match item {
            ReplayOutput::Notice { tick, notice } => println!("[{tick:>6}] chat: {notice}"),
            ReplayOutput::Render { tick, views } => {
                if views.is_empty() {
                    println!("[{tick:>6}] (nothing to draw)");
                }
                for view in views {
                    println!("[{tick:>6}] {:<28} {}", view.label, view.text);
                }
            }
        }
    }

    println!(
        "replayed {} steps over {} ticks in {}ms",
        steps.len(),
        replay.ticks(),
        timer.elapsed().as_millis()
    );
    Ok(())
}

pub async fn show_config(ctx: &CliContext) -> Result<(), String> {
    let config = ctx.snapshot().await;
    match AppConfig::config_path() {
        Ok(path) => println!("Config file: {}", path.display()),
        Err(e) => println!("Config file: unavailable ({e})"),
    }
    println!(
        "Local player: {}",
        config.local_player.as_deref().unwrap_or("(unset)")
    );
    println!();

    for flag in Flag::all() {
        let marker = if config.overlay_settings.flag(*flag) { "x" } else { " " };
        let requires = flag
            .depends_on()
            .map(|parent| format!(" (requires {})", parent.key()))
            .unwrap_or_default();
        println!("[{marker}] {:<24} {}{requires}", flag.key(), flag.label());
    }
    Ok(())
}

pub async fn toggle(flag: &str, value: Option<bool>, ctx: &CliContext) -> Result<(), String> {
    let flag: Flag = flag
        .parse()
        .map_err(|e| format!("error: {}\n", ConfigError::from(e)))?;
    let settings = &ctx.settings;
    let current = settings.snapshot().flag(flag);
    let new_value = value.unwrap_or(!current);

    settings.update(|s| s.set_flag(flag, new_value));
    if let Some(parent) = flag.depends_on()
        && new_value
        && !settings.snapshot().flag(parent)
    {
        println!("note: {} has no effect until {} is enabled", flag.key(), parent.key());
    }

    ctx.save().await.map_err(|e| e.to_string())?;
    println!("{} = {}", flag.key(), new_value);
    Ok(())
}

pub async fn set_player(name: &str, ctx: &CliContext) -> Result<(), String> {
    ctx.config.write().await.local_player = Some(name.to_string());
    ctx.save().await.map_err(|e| e.to_string())?;
    println!("local player = {name}");
    Ok(())
}

fn overlay_engine(ctx: &CliContext) -> Result<TimerEngine, String> {
    TimerEngine::new(ctx.settings.clone(), Arc::new(SystemClock)).map_err(|e| e.to_string())
}

pub async fn list_overlays(ctx: &CliContext) -> Result<(), String> {
    let engine = overlay_engine(ctx)?;
    let layout = engine.layout(&ctx.settings.snapshot());

    println!(
        "{:<28} {:<8} {:>6} {:>6} {:>6}  Preview",
        "Overlay", "Enabled", "X", "Y", "Scale"
    );
    println!("{}", "-".repeat(80));

    for (view, (_, pos)) in engine.preview().iter().zip(layout.iter()) {
        println!(
            "{:<28} {:<8} {:>6} {:>6} {:>6.2}  {}",
            view.label,
            if view.enabled { "yes" } else { "no" },
            pos.x,
            pos.y,
            pos.scale,
            view.text
        );
    }
    Ok(())
}

pub async fn move_overlay(
    label: &str,
    x: i32,
    y: i32,
    scale: Option<f32>,
    ctx: &CliContext,
) -> Result<(), String> {
    let engine = overlay_engine(ctx)?;
    if engine.overlays().get(label).is_none() {
        return Err(format!("error: no overlay named '{label}'\n"));
    }

    let current = ctx.settings.snapshot().get_position(label);
    let position = OverlayPositionConfig {
        x,
        y,
        scale: scale.unwrap_or(current.scale),
    };
    ctx.settings.update(|s| s.set_position(label, position));
    ctx.save().await.map_err(|e| e.to_string())?;
    println!("moved '{label}' to ({x}, {y})");
    Ok(())
}

pub fn exit() {
    let _ = write!(std::io::stdout(), "quitting...");
    let _ = std::io::stdout().flush();
}

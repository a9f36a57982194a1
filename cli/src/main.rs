use clap::{Parser, Subcommand};
use std::io::Write;
use ticktrack_cli::CliContext;
use ticktrack_cli::commands;
use ticktrack_cli::logging;
use ticktrack_cli::readline;

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();
    let ctx = CliContext::new();

    // Arguments on the command line run a single command
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let line = shlex::try_join(args.iter().map(String::as_str)).map_err(|e| e.to_string())?;
        respond(&line, &ctx).await?;
        return Ok(());
    }

    loop {
        let Some(line) = readline()? else {
            tracing::debug!("stdin closed");
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "ticktrack")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed a replay script through the timer engine
    Replay {
        #[arg(short, long)]
        path: String,
        /// Local player name (defaults to the configured one)
        #[arg(long)]
        player: Option<String>,
    },
    /// List overlays with their stored positions
    Overlays,
    /// Move an overlay in the stored layout
    Move {
        label: String,
        x: i32,
        y: i32,
        #[arg(short, long)]
        scale: Option<f32>,
    },
    /// Toggle an option, or set it explicitly
    Toggle {
        flag: String,
        value: Option<bool>,
    },
    /// Set the local player name
    Player { name: String },
    Config,
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "ticktrack".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Replay { path, player }) => {
            commands::replay(path, player.as_deref(), ctx).await?
        }
        Some(Commands::Overlays) => commands::list_overlays(ctx).await?,
        Some(Commands::Move { label, x, y, scale }) => {
            commands::move_overlay(label, *x, *y, *scale, ctx).await?
        }
        Some(Commands::Toggle { flag, value }) => commands::toggle(flag, *value, ctx).await?,
        Some(Commands::Player { name }) => commands::set_player(name, ctx).await?,
        Some(Commands::Config) => commands::show_config(ctx).await?,
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}

//! spotctl — volume fades, playlist switches and sleep/wake timers for Spotify on macOS.
//!
//! Every player call goes through `osascript`, one AppleScript command per call.
//!
//! ## Commands
//! - `play`, `pause`: plain playback control.
//! - `volume get|+N|-N|N`: read, nudge or set the volume.
//! - `fade <target> [seconds]`: fade to a volume.
//! - `sleep [wait_min [fade_min]]`: fade out, pause, restore the volume for next time.
//! - `wake [wait_min [fade_min]]`: restart quietly and fade up.
//! - `<playlist> [fade_in]` / `<playlist> <fade_out> <fade_in>`: switch playlists,
//!   keeping the current loudness.

use anyhow::Result;
use clap::Parser;
use player_bridge::OsascriptPlayer;
use spotctl::cli::Args;
use spotctl::config::Settings;
use spotctl::runtime;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,spotctl=info,player_bridge=info")
        }))
        .init();

    let settings = Settings::builtin().with_app(args.app.clone());

    if args.list_playlists {
        runtime::list_playlists(&settings);
        return Ok(());
    }

    let _ = ctrlc::set_handler(|| {
        tracing::warn!("interrupted; volume left as is");
        std::process::exit(130);
    });

    let Some(verb) = args.command.as_ref() else {
        return Ok(());
    };
    let player = OsascriptPlayer::new(settings.app.clone());
    tracing::debug!(app = player.app(), command = ?verb, "dispatch");
    runtime::run_command(&player, &settings, verb, &args.parameters)
}

//! AppleScript transport via `osascript`.
//!
//! Each operation runs `osascript -e 'tell application "<app>" to <command>'` and
//! waits for it to exit. A non-zero exit status is reported as an error carrying
//! the script and stderr.

use std::process::Command;

use anyhow::{Context, Result, bail};

use crate::control::{PlaybackState, PlayerControl, TrackRequest};

const OSASCRIPT: &str = "osascript";

/// Player controlled through AppleScript.
#[derive(Debug, Clone)]
pub struct OsascriptPlayer {
    app: String,
}

impl OsascriptPlayer {
    /// Create a transport targeting the given scriptable application (e.g. `Spotify`).
    pub fn new(app: impl Into<String>) -> Self {
        Self { app: app.into() }
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    /// Run one command against the application and return its trimmed stdout.
    fn run(&self, command: &str) -> Result<String> {
        let script = tell_script(&self.app, command);
        tracing::debug!(script = %script, "osascript");
        let output = Command::new(OSASCRIPT)
            .arg("-e")
            .arg(&script)
            .output()
            .with_context(|| format!("spawn {OSASCRIPT}"))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{OSASCRIPT} failed ({}) for `{script}`: {}",
                output.status,
                stderr.trim()
            );
        }
        let stdout = String::from_utf8(output.stdout)
            .with_context(|| format!("decode {OSASCRIPT} output for `{script}`"))?;
        Ok(stdout.trim().to_string())
    }
}

impl PlayerControl for OsascriptPlayer {
    fn sound_volume(&self) -> Result<i32> {
        let reply = self.run("get sound volume")?;
        parse_volume_reply(&reply)
    }

    fn set_sound_volume(&self, raw: u8) -> Result<()> {
        self.run(&format!("set sound volume to {raw}")).map(|_| ())
    }

    fn player_state(&self) -> Result<PlaybackState> {
        let reply = self.run("player state")?;
        Ok(PlaybackState::from_reply(&reply))
    }

    fn play(&self) -> Result<()> {
        self.run("play").map(|_| ())
    }

    fn pause(&self) -> Result<()> {
        self.run("pause").map(|_| ())
    }

    fn set_shuffling(&self, enabled: bool) -> Result<()> {
        self.run(&format!("set shuffling to {enabled}")).map(|_| ())
    }

    fn play_track(&self, request: TrackRequest<'_>) -> Result<()> {
        self.run(&play_track_command(request)).map(|_| ())
    }
}

pub(crate) fn tell_script(app: &str, command: &str) -> String {
    format!("tell application {} to {command}", quote(app))
}

pub(crate) fn play_track_command(request: TrackRequest<'_>) -> String {
    match request.context {
        Some(context) => format!(
            "play track {} in context {}",
            quote(request.track),
            quote(context)
        ),
        None => format!("play track {}", quote(request.track)),
    }
}

pub(crate) fn parse_volume_reply(reply: &str) -> Result<i32> {
    reply
        .trim()
        .parse::<i32>()
        .with_context(|| format!("parse sound volume reply {reply:?}"))
}

/// AppleScript string literal.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

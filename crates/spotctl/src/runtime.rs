//! Command dispatch.
//!
//! Maps a parsed [`Verb`] and its free-form parameters onto the fade engine,
//! transition orchestrator and scheduler. Missing parameters are reported with a
//! warning and the command does nothing; malformed numbers are errors.

use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use player_bridge::{Mixer, PlayerControl, clamp_level};

use crate::cli::Verb;
use crate::config::Settings;
use crate::fade::fade_volume;
use crate::schedule;
use crate::transition::{self, TransitionOverrides};

/// What `volume` was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeRequest {
    Get,
    Change(i32),
    Set(i32),
}

impl VolumeRequest {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw == "get" {
            return Ok(VolumeRequest::Get);
        }
        let value: i32 = raw
            .parse()
            .with_context(|| format!("invalid volume {raw:?}"))?;
        if raw.starts_with('+') || raw.starts_with('-') {
            Ok(VolumeRequest::Change(value))
        } else {
            Ok(VolumeRequest::Set(value))
        }
    }
}

/// Print the configured playlists to stdout.
pub fn list_playlists(settings: &Settings) {
    for playlist in &settings.playlists {
        match playlist.pinned_track {
            Some(track) => println!("{}\t{}\t{}", playlist.name, playlist.id, track),
            None => println!("{}\t{}", playlist.name, playlist.id),
        }
    }
}

/// Run one command against `player`.
pub fn run_command<P: PlayerControl + ?Sized>(
    player: &P,
    settings: &Settings,
    verb: &Verb,
    params: &[String],
) -> Result<()> {
    let mixer = Mixer::new(player);
    let policy = &settings.policy;
    match verb {
        Verb::Play => {
            warn_surplus("play", params, 0);
            player.play()
        }
        Verb::Pause => {
            warn_surplus("pause", params, 0);
            player.pause()
        }
        Verb::Volume => {
            let Some(raw) = params.first() else {
                tracing::warn!("volume needs a parameter: get, +N, -N or N");
                return Ok(());
            };
            warn_surplus("volume", params, 1);
            match VolumeRequest::parse(raw)? {
                VolumeRequest::Get => {
                    println!("{}", mixer.get_volume()?);
                }
                VolumeRequest::Change(delta) => {
                    let level = mixer.change_volume(delta)?;
                    tracing::info!(delta, volume = level, "volume changed");
                }
                VolumeRequest::Set(level) => {
                    let level = mixer.set_volume(level)?;
                    tracing::info!(volume = level, "volume set");
                }
            }
            Ok(())
        }
        Verb::Fade => {
            let Some(raw_target) = params.first() else {
                tracing::warn!("fade needs a target volume: fade <target> [seconds]");
                return Ok(());
            };
            warn_surplus("fade", params, 2);
            let target: i32 = raw_target
                .trim()
                .parse()
                .with_context(|| format!("invalid fade target {raw_target:?}"))?;
            let duration = match params.get(1) {
                Some(raw) => parse_seconds(raw, "fade seconds")?,
                None => policy.fade,
            };
            let report = fade_volume(&mixer, clamp_level(target), duration)?;
            tracing::info!(
                from = report.start,
                to = report.target,
                steps = report.steps,
                "fade done"
            );
            Ok(())
        }
        Verb::Sleep => {
            warn_surplus("sleep", params, 2);
            let wait = optional_minutes(params, 0, "sleep wait minutes")?.unwrap_or_default();
            let fade = optional_minutes(params, 1, "sleep fade minutes")?
                .unwrap_or(policy.sleep_fade);
            schedule::sleep(&mixer, policy, wait, fade).map(|_| ())
        }
        Verb::Wake => {
            warn_surplus("wake", params, 2);
            let wait = optional_minutes(params, 0, "wake wait minutes")?.unwrap_or_default();
            let fade =
                optional_minutes(params, 1, "wake fade minutes")?.unwrap_or(policy.wake_fade);
            schedule::wake(&mixer, policy, wait, fade).map(|_| ())
        }
        Verb::Playlist(name) => {
            let playlist = settings
                .playlist(name)
                .ok_or_else(|| anyhow!("unknown playlist {name:?}"))?;
            warn_surplus(name, params, 2);
            let durations = params
                .iter()
                .take(2)
                .map(|raw| parse_seconds(raw, "transition seconds"))
                .collect::<Result<Vec<_>>>()?;
            let overrides = TransitionOverrides::from_durations(&durations);
            transition::start_playlist(&mixer, policy, playlist, overrides).map(|_| ())
        }
    }
}

fn warn_surplus(command: &str, params: &[String], max: usize) {
    if params.len() > max {
        tracing::warn!(command, ignored = ?&params[max..], "ignoring extra parameters");
    }
}

/// Parse a duration in seconds. Negative values mean "immediately".
pub fn parse_seconds(raw: &str, what: &str) -> Result<Duration> {
    let secs: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("invalid {what} {raw:?}"))?;
    if !secs.is_finite() {
        bail!("invalid {what} {raw:?}: not a finite number");
    }
    Duration::try_from_secs_f64(secs.max(0.0)).with_context(|| format!("invalid {what} {raw:?}"))
}

fn optional_minutes(params: &[String], index: usize, what: &str) -> Result<Option<Duration>> {
    params
        .get(index)
        .map(|raw| {
            parse_seconds(raw, what)?
                .checked_mul(60)
                .ok_or_else(|| anyhow!("invalid {what} {raw:?}: too large"))
        })
        .transpose()
}

//! Volume fade engine.
//!
//! Moves the player volume from its current level to a target over a wall-clock
//! duration. Progress is always measured against the instant the fade started, so
//! slow bridge calls shorten the remaining ramp instead of stretching the fade.
//! Writes only happen when the interpolated level changes, and a fade always ends
//! with the target applied.

use std::time::{Duration, Instant};

use anyhow::Result;
use player_bridge::{Mixer, PlayerControl, clamp_level};

/// Sleep between polls while the interpolated level is unchanged.
pub const POLL_QUANTUM: Duration = Duration::from_millis(50);

/// Summary of a finished fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeReport {
    pub start: u8,
    pub target: u8,
    /// Number of volume writes issued.
    pub steps: usize,
    pub elapsed: Duration,
}

/// Linear interpolation in volume space, rounded to the nearest level.
pub fn interpolate(start: u8, target: u8, progress: f64) -> u8 {
    let level = (1.0 - progress) * f64::from(start) + progress * f64::from(target);
    clamp_level(level.round() as i32)
}

/// Fade from the current volume to `target` over `duration`.
pub fn fade_volume<P: PlayerControl + ?Sized>(
    mixer: &Mixer<'_, P>,
    target: u8,
    duration: Duration,
) -> Result<FadeReport> {
    let target = clamp_level(i32::from(target));
    let start = mixer.get_volume()?;
    let started = Instant::now();
    if start == target {
        tracing::debug!(volume = start, "fade skipped; already at target");
        return Ok(FadeReport {
            start,
            target,
            steps: 0,
            elapsed: started.elapsed(),
        });
    }

    tracing::debug!(
        start,
        target,
        seconds = duration.as_secs_f64(),
        "fade started"
    );
    let mut applied = start;
    let mut steps = 0;
    loop {
        let elapsed = started.elapsed();
        if elapsed >= duration {
            break;
        }
        let progress = elapsed.as_secs_f64() / duration.as_secs_f64();
        let level = interpolate(start, target, progress);
        if level == applied {
            std::thread::sleep(POLL_QUANTUM.min(duration - elapsed));
            continue;
        }
        mixer.set_volume(i32::from(level))?;
        applied = level;
        steps += 1;
        tracing::trace!(level, progress, "fade step");
        if level == target {
            break;
        }
    }

    if applied != target {
        mixer.set_volume(i32::from(target))?;
        steps += 1;
    }

    let report = FadeReport {
        start,
        target,
        steps,
        elapsed: started.elapsed(),
    };
    tracing::debug!(
        start,
        target,
        steps,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "fade finished"
    );
    Ok(report)
}

//! One-shot sleep and wake sequences.

use std::time::Duration;

use anyhow::Result;
use player_bridge::{Mixer, PlayerControl};

use crate::config::Policy;
use crate::fade::fade_volume;

/// Block for `wait` before a sequence starts.
fn wait_before(what: &str, wait: Duration) {
    if wait.is_zero() {
        return;
    }
    tracing::info!(minutes = wait.as_secs_f64() / 60.0, "{what} scheduled");
    std::thread::sleep(wait);
}

/// Fade out and pause, then put the volume back where it was on entry.
///
/// Returns the restored volume.
pub fn sleep<P: PlayerControl + ?Sized>(
    mixer: &Mixer<'_, P>,
    policy: &Policy,
    wait: Duration,
    fade: Duration,
) -> Result<u8> {
    let original = mixer.get_volume()?;
    wait_before("sleep", wait);

    tracing::info!(
        from = original,
        to = policy.min_volume,
        minutes = fade.as_secs_f64() / 60.0,
        "falling asleep"
    );
    fade_volume(mixer, policy.min_volume, fade)?;
    mixer.player().pause()?;
    let restored = mixer.set_volume(i32::from(original))?;
    tracing::info!(volume = restored, "paused; volume restored");
    Ok(restored)
}

/// Restart playback from the floor and fade up to at least the wake floor.
///
/// Returns the volume faded up to.
pub fn wake<P: PlayerControl + ?Sized>(
    mixer: &Mixer<'_, P>,
    policy: &Policy,
    wait: Duration,
    fade: Duration,
) -> Result<u8> {
    wait_before("wake", wait);

    let current = mixer.get_volume()?;
    let target = policy.wake_floor.max(current);
    let player = mixer.player();
    player.pause()?;
    mixer.set_volume(i32::from(policy.min_volume))?;
    player.play()?;

    tracing::info!(
        from = policy.min_volume,
        to = target,
        minutes = fade.as_secs_f64() / 60.0,
        "waking up"
    );
    let report = fade_volume(mixer, target, fade)?;
    Ok(report.target)
}

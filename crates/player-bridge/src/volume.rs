//! Volume setter with clamping and boundary correction.
//!
//! Spotify reports one less than the value it was last told, so every write sends
//! `level + 1` (capped at 100). Reads are taken verbatim and clamped.

use anyhow::Result;

use crate::control::PlayerControl;

pub const MIN_VOLUME: u8 = 0;
pub const MAX_VOLUME: u8 = 100;

/// Clamp an arbitrary level into `[0, 100]`.
pub fn clamp_level(level: i32) -> u8 {
    level.clamp(i32::from(MIN_VOLUME), i32::from(MAX_VOLUME)) as u8
}

/// Value sent to the player for a requested level.
pub fn wire_level(level: i32) -> u8 {
    (clamp_level(level) + 1).min(MAX_VOLUME)
}

/// Volume view over a player.
#[derive(Debug)]
pub struct Mixer<'a, P: ?Sized> {
    player: &'a P,
}

impl<'a, P: PlayerControl + ?Sized> Mixer<'a, P> {
    pub fn new(player: &'a P) -> Self {
        Self { player }
    }

    /// Underlying player, for playback calls sequenced around volume changes.
    pub fn player(&self) -> &'a P {
        self.player
    }

    pub fn get_volume(&self) -> Result<u8> {
        Ok(clamp_level(self.player.sound_volume()?))
    }

    /// Clamp and send `level`. Returns the clamped level.
    pub fn set_volume(&self, level: i32) -> Result<u8> {
        let clamped = clamp_level(level);
        let sent = wire_level(level);
        tracing::trace!(level, clamped, sent, "set volume");
        self.player.set_sound_volume(sent)?;
        Ok(clamped)
    }

    /// Read the current volume and move it by `delta`.
    pub fn change_volume(&self, delta: i32) -> Result<u8> {
        let current = self.get_volume()?;
        self.set_volume(i32::from(current) + delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::PlaybackState;
    use crate::testing::{Call, RecordingPlayer};

    #[test]
    fn wire_level_clamps_then_adds_one() {
        for level in -10..=110 {
            let expected = (level.clamp(0, 100) + 1).min(100) as u8;
            assert_eq!(wire_level(level), expected, "level {level}");
        }
        assert_eq!(wire_level(-1), 1);
        assert_eq!(wire_level(0), 1);
        assert_eq!(wire_level(99), 100);
        assert_eq!(wire_level(100), 100);
    }

    #[test]
    fn set_volume_sends_wire_level() {
        let player = RecordingPlayer::new(50, PlaybackState::Playing);
        let mixer = Mixer::new(&player);
        for level in -10..=110 {
            assert_eq!(mixer.set_volume(level).unwrap(), clamp_level(level));
        }
        let expected: Vec<u8> = (-10..=110).map(wire_level).collect();
        assert_eq!(player.sent_volumes(), expected);
    }

    #[test]
    fn change_volume_reads_then_sets_once() {
        let player = RecordingPlayer::new(50, PlaybackState::Playing);
        let mixer = Mixer::new(&player);
        assert_eq!(mixer.change_volume(5).unwrap(), 55);
        assert_eq!(player.calls(), vec![Call::GetVolume, Call::SetVolume(56)]);
        assert_eq!(player.applied_levels(), vec![55]);
        assert_eq!(mixer.get_volume().unwrap(), 55);
    }

    #[test]
    fn change_volume_clamps_at_bounds() {
        let player = RecordingPlayer::new(3, PlaybackState::Paused);
        let mixer = Mixer::new(&player);
        assert_eq!(mixer.change_volume(-10).unwrap(), 0);
        assert_eq!(player.sent_volumes(), vec![1]);
    }
}

//! Player control abstraction for the scripting bridge.
//!
//! Implementations translate playback and volume operations into calls against an
//! external player. Every call is synchronous and returns once the player answered.

use anyhow::Result;

/// Playback state as reported by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
    Stopped,
}

impl PlaybackState {
    /// Parse a `player state` reply. Only an exact `playing` counts as playing.
    pub fn from_reply(reply: &str) -> Self {
        match reply {
            "playing" => PlaybackState::Playing,
            "paused" => PlaybackState::Paused,
            _ => PlaybackState::Stopped,
        }
    }

    pub fn is_playing(self) -> bool {
        matches!(self, PlaybackState::Playing)
    }
}

/// Track to start, optionally inside a playlist context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackRequest<'a> {
    /// Track (or playlist) identifier passed to `play track`.
    pub track: &'a str,
    /// Playlist context the track plays in, when pinned.
    pub context: Option<&'a str>,
}

/// Raw operations exposed by the external player.
///
/// Volume values at this level are exactly what the player reports or receives;
/// clamping and boundary correction live in [`crate::Mixer`].
pub trait PlayerControl {
    /// Current `sound volume` as reported by the player.
    fn sound_volume(&self) -> Result<i32>;
    /// Send a `sound volume` value verbatim.
    fn set_sound_volume(&self, raw: u8) -> Result<()>;
    /// Query the player's playback state.
    fn player_state(&self) -> Result<PlaybackState>;
    fn play(&self) -> Result<()>;
    fn pause(&self) -> Result<()>;
    /// Enable or disable shuffle.
    fn set_shuffling(&self, enabled: bool) -> Result<()>;
    /// Start a track, optionally in a playlist context.
    fn play_track(&self, request: TrackRequest<'_>) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_playing_reply_is_playing() {
        assert_eq!(PlaybackState::from_reply("playing"), PlaybackState::Playing);
        assert_eq!(PlaybackState::from_reply("paused"), PlaybackState::Paused);
        assert_eq!(PlaybackState::from_reply("stopped"), PlaybackState::Stopped);
        assert_eq!(PlaybackState::from_reply("Playing"), PlaybackState::Stopped);
        assert_eq!(PlaybackState::from_reply(""), PlaybackState::Stopped);
    }

    #[test]
    fn is_playing_matches_variant() {
        assert!(PlaybackState::Playing.is_playing());
        assert!(!PlaybackState::Paused.is_playing());
        assert!(!PlaybackState::Stopped.is_playing());
    }
}

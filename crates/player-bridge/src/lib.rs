//! Synchronous control of a scriptable media player.
//!
//! - [`PlayerControl`]: raw player operations (volume, state, playback, shuffle).
//! - [`OsascriptPlayer`]: AppleScript implementation driving Spotify on macOS.
//! - [`Mixer`]: clamped volume reads and writes with the bridge's off-by-one correction.

pub mod control;
pub mod osascript;
pub mod volume;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use control::{PlaybackState, PlayerControl, TrackRequest};
pub use osascript::OsascriptPlayer;
pub use volume::{MAX_VOLUME, MIN_VOLUME, Mixer, clamp_level, wire_level};

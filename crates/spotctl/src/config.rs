//! Compiled-in settings.
//!
//! Holds the playlist table and the fade policy. Built once at startup and passed
//! by reference; nothing here changes at runtime.

use std::time::Duration;

use player_bridge::clamp_level;

/// Scripted application when `--app` is not given.
pub const DEFAULT_APP: &str = "Spotify";

/// Playlist reachable by name from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaylistRef {
    /// Command name.
    pub name: &'static str,
    /// Player URI of the playlist.
    pub id: &'static str,
    /// Track to start with inside the playlist context.
    pub pinned_track: Option<&'static str>,
}

pub const BUILTIN_PLAYLISTS: &[PlaylistRef] = &[
    PlaylistRef {
        name: "focus",
        id: "spotify:playlist:37i9dQZF1DWZeKCadgRdKQ",
        pinned_track: None,
    },
    PlaylistRef {
        name: "piano",
        id: "spotify:playlist:37i9dQZF1DX4sWSpwq3LiO",
        pinned_track: None,
    },
    PlaylistRef {
        name: "lofi",
        id: "spotify:playlist:37i9dQZF1DWWQRwui0ExPn",
        pinned_track: None,
    },
    PlaylistRef {
        name: "morning",
        id: "spotify:playlist:37i9dQZF1DX0UrRvztWcAU",
        pinned_track: Some("spotify:track:2Foc5Q5nqNiosCNqttzHof"),
    },
    PlaylistRef {
        name: "night",
        id: "spotify:playlist:37i9dQZF1DWZd79rJ6a7lp",
        pinned_track: None,
    },
];

/// How a transition level is derived from a reference volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FloorPolicy {
    /// `round(min + (reference - min) * fraction)`.
    Fraction { min: u8, fraction: f64 },
    /// Fixed level regardless of the reference.
    Absolute(u8),
}

impl FloorPolicy {
    pub fn level_for(&self, reference: u8) -> u8 {
        match *self {
            FloorPolicy::Fraction { min, fraction } => {
                let min = f64::from(min);
                let level = min + (f64::from(reference) - min) * fraction;
                clamp_level(level.round() as i32)
            }
            FloorPolicy::Absolute(level) => clamp_level(i32::from(level)),
        }
    }
}

/// Fade timings and volume floors.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    /// Lowest volume used as a baseline during transitions.
    pub min_volume: u8,
    /// Level faded down to before switching playlists.
    pub switch_floor: FloorPolicy,
    /// Level set before starting a playlist from silence.
    pub initial_level: FloorPolicy,
    pub fade_out: Duration,
    pub fade_in_switch: Duration,
    pub fade_in_cold: Duration,
    /// Duration of the `fade` command when none is given.
    pub fade: Duration,
    pub sleep_fade: Duration,
    pub wake_fade: Duration,
    /// `wake` never ends quieter than this.
    pub wake_floor: u8,
}

impl Default for Policy {
    fn default() -> Self {
        let min_volume = 8;
        Self {
            min_volume,
            switch_floor: FloorPolicy::Fraction {
                min: min_volume,
                fraction: 0.2,
            },
            initial_level: FloorPolicy::Fraction {
                min: min_volume,
                fraction: 0.15,
            },
            fade_out: Duration::from_secs(4),
            fade_in_switch: Duration::from_secs(4),
            fade_in_cold: Duration::from_secs(20),
            fade: Duration::from_secs(5),
            sleep_fade: Duration::from_secs(10 * 60),
            wake_fade: Duration::from_secs(5 * 60),
            wake_floor: 40,
        }
    }
}

/// Process-wide configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Application name used in scripts.
    pub app: String,
    pub playlists: Vec<PlaylistRef>,
    pub policy: Policy,
}

impl Settings {
    pub fn builtin() -> Self {
        Self {
            app: DEFAULT_APP.to_string(),
            playlists: BUILTIN_PLAYLISTS.to_vec(),
            policy: Policy::default(),
        }
    }

    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        self.app = app.into();
        self
    }

    pub fn playlist(&self, name: &str) -> Option<&PlaylistRef> {
        self.playlists.iter().find(|p| p.name == name)
    }
}

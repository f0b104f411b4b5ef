use clap::Parser;

use crate::config::{BUILTIN_PLAYLISTS, DEFAULT_APP};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_SHA"),
    ", ",
    env!("BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "spotctl",
    version = VERSION,
    about = "Fade, switch playlists and sleep/wake Spotify on macOS"
)]
pub struct Args {
    /// Scriptable application to control
    #[arg(long, default_value = DEFAULT_APP)]
    pub app: String,

    /// List configured playlists and exit
    #[arg(long)]
    pub list_playlists: bool,

    /// play, pause, volume, fade, sleep, wake, or a playlist name
    #[arg(value_parser = parse_verb, required_unless_present = "list_playlists")]
    pub command: Option<Verb>,

    /// Command parameters (e.g. `volume +5`, `fade 30 10`, `sleep 20 5`)
    #[arg(
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        allow_negative_numbers = true
    )]
    pub parameters: Vec<String>,
}

/// Top-level command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Play,
    Pause,
    Volume,
    Fade,
    Sleep,
    Wake,
    /// Start the named playlist.
    Playlist(String),
}

impl Verb {
    pub const BUILTIN: &'static [&'static str] =
        &["play", "pause", "volume", "fade", "sleep", "wake"];

    /// Look up a command name; built-in verbs shadow playlist names.
    pub fn from_name(name: &str, playlists: &[&str]) -> Option<Self> {
        let verb = match name {
            "play" => Verb::Play,
            "pause" => Verb::Pause,
            "volume" => Verb::Volume,
            "fade" => Verb::Fade,
            "sleep" => Verb::Sleep,
            "wake" => Verb::Wake,
            other if playlists.contains(&other) => Verb::Playlist(other.to_string()),
            _ => return None,
        };
        Some(verb)
    }
}

fn parse_verb(raw: &str) -> Result<Verb, String> {
    let playlists: Vec<&str> = BUILTIN_PLAYLISTS.iter().map(|p| p.name).collect();
    Verb::from_name(raw, &playlists).ok_or_else(|| {
        let choices: Vec<&str> = Verb::BUILTIN
            .iter()
            .copied()
            .chain(playlists.iter().copied())
            .collect();
        format!("unknown command; expected one of: {}", choices.join(", "))
    })
}

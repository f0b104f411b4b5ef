//! Playlist transitions.
//!
//! Starting a playlist while music is playing fades the current track down to a
//! floor, switches, and fades back up. Starting from silence sets a low initial
//! level instead. Either way the volume ends where the user had it before.

use std::time::Duration;

use anyhow::Result;
use player_bridge::{Mixer, PlayerControl, TrackRequest};

use crate::config::{PlaylistRef, Policy};
use crate::fade::fade_volume;

/// Fade durations given on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionOverrides {
    pub fade_out: Option<Duration>,
    pub fade_in: Option<Duration>,
}

impl TransitionOverrides {
    /// One value sets the fade-in; two values set fade-out then fade-in.
    pub fn from_durations(values: &[Duration]) -> Self {
        match values {
            [] => Self::default(),
            [fade_in] => Self {
                fade_out: None,
                fade_in: Some(*fade_in),
            },
            [fade_out, fade_in, ..] => Self {
                fade_out: Some(*fade_out),
                fade_in: Some(*fade_in),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPlan {
    pub fade_out: Duration,
    pub fade_in: Duration,
    /// Music was playing when the transition started.
    pub switching: bool,
    /// Switch floor when switching, initial level when starting cold.
    pub floor_volume: u8,
    /// Volume before the transition; where the fade-in ends.
    pub ceiling_volume: u8,
}

pub fn plan_transition(
    policy: &Policy,
    switching: bool,
    current_volume: u8,
    overrides: TransitionOverrides,
) -> TransitionPlan {
    let default_fade_in = if switching {
        policy.fade_in_switch
    } else {
        policy.fade_in_cold
    };
    let floor_volume = if switching {
        policy.switch_floor.level_for(current_volume)
    } else {
        policy.initial_level.level_for(current_volume)
    };
    TransitionPlan {
        fade_out: overrides.fade_out.unwrap_or(policy.fade_out),
        fade_in: overrides.fade_in.unwrap_or(default_fade_in),
        switching,
        floor_volume,
        ceiling_volume: current_volume,
    }
}

/// Switch to `playlist`, preserving the current loudness.
pub fn start_playlist<P: PlayerControl + ?Sized>(
    mixer: &Mixer<'_, P>,
    policy: &Policy,
    playlist: &PlaylistRef,
    overrides: TransitionOverrides,
) -> Result<TransitionPlan> {
    let player = mixer.player();
    let switching = player.player_state()?.is_playing();
    let current = mixer.get_volume()?;
    let plan = plan_transition(policy, switching, current, overrides);
    tracing::info!(
        playlist = playlist.name,
        switching,
        volume = current,
        floor = plan.floor_volume,
        fade_out_s = plan.fade_out.as_secs_f64(),
        fade_in_s = plan.fade_in.as_secs_f64(),
        "starting playlist"
    );

    if plan.switching {
        fade_volume(mixer, plan.floor_volume, plan.fade_out)?;
    } else {
        mixer.set_volume(i32::from(plan.floor_volume))?;
    }

    player.set_shuffling(true)?;
    player.play_track(track_request(playlist))?;

    let report = fade_volume(mixer, plan.ceiling_volume, plan.fade_in)?;
    tracing::info!(
        playlist = playlist.name,
        volume = report.target,
        "playlist started"
    );
    Ok(plan)
}

fn track_request(playlist: &PlaylistRef) -> TrackRequest<'_> {
    match playlist.pinned_track {
        Some(track) => TrackRequest {
            track,
            context: Some(playlist.id),
        },
        None => TrackRequest {
            track: playlist.id,
            context: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use player_bridge::PlaybackState;
    use player_bridge::testing::{Call, RecordingPlayer};

    const FOCUS: PlaylistRef = PlaylistRef {
        name: "focus",
        id: "spotify:playlist:focus",
        pinned_track: None,
    };

    const PINNED: PlaylistRef = PlaylistRef {
        name: "morning",
        id: "spotify:playlist:morning",
        pinned_track: Some("spotify:track:first"),
    };

    fn quick() -> TransitionOverrides {
        TransitionOverrides {
            fade_out: Some(Duration::from_millis(60)),
            fade_in: Some(Duration::from_millis(60)),
        }
    }

    #[test]
    fn overrides_from_durations() {
        let a = Duration::from_secs(1);
        let b = Duration::from_secs(2);
        assert_eq!(
            TransitionOverrides::from_durations(&[]),
            TransitionOverrides::default()
        );
        assert_eq!(
            TransitionOverrides::from_durations(&[a]),
            TransitionOverrides {
                fade_out: None,
                fade_in: Some(a)
            }
        );
        assert_eq!(
            TransitionOverrides::from_durations(&[a, b]),
            TransitionOverrides {
                fade_out: Some(a),
                fade_in: Some(b)
            }
        );
    }

    #[test]
    fn plan_defaults_depend_on_switching() {
        let policy = Policy::default();
        let switch = plan_transition(&policy, true, 80, TransitionOverrides::default());
        assert_eq!(switch.fade_out, policy.fade_out);
        assert_eq!(switch.fade_in, policy.fade_in_switch);
        assert_eq!(switch.floor_volume, 22);
        assert_eq!(switch.ceiling_volume, 80);

        let cold = plan_transition(&policy, false, 60, TransitionOverrides::default());
        assert_eq!(cold.fade_in, policy.fade_in_cold);
        assert_eq!(cold.floor_volume, 16);
        assert_eq!(cold.ceiling_volume, 60);
    }

    #[test]
    fn plan_single_override_keeps_default_fade_out() {
        let policy = Policy::default();
        let fade_in = Duration::from_secs(9);
        let plan = plan_transition(
            &policy,
            true,
            50,
            TransitionOverrides::from_durations(&[fade_in]),
        );
        assert_eq!(plan.fade_out, policy.fade_out);
        assert_eq!(plan.fade_in, fade_in);
    }

    #[test]
    fn switch_fades_to_floor_then_restores_volume() {
        let player = RecordingPlayer::new(80, PlaybackState::Playing);
        let mixer = Mixer::new(&player);
        let plan = start_playlist(&mixer, &Policy::default(), &FOCUS, quick()).unwrap();
        assert!(plan.switching);
        assert_eq!(plan.floor_volume, 22);

        let levels = player.applied_levels();
        let floor_at = levels.iter().position(|&l| l == 22).expect("floor reached");
        assert!(levels[..floor_at].iter().all(|&l| l > 22 && l < 80));
        assert_eq!(levels.last(), Some(&80));
        assert_eq!(player.volume(), 80);

        let play_at = player
            .position_of(&Call::PlayTrack {
                track: FOCUS.id.to_string(),
                context: None,
            })
            .expect("playlist started");
        let shuffle_at = player.position_of(&Call::SetShuffling(true)).unwrap();
        let floor_call = player.position_of(&Call::SetVolume(23)).unwrap();
        assert!(floor_call < shuffle_at && shuffle_at < play_at);
        assert!(player.shuffling());
    }

    #[test]
    fn cold_start_sets_initial_level_then_fades_up() {
        let player = RecordingPlayer::new(60, PlaybackState::Paused);
        let mixer = Mixer::new(&player);
        let plan = start_playlist(&mixer, &Policy::default(), &PINNED, quick()).unwrap();
        assert!(!plan.switching);

        let levels = player.applied_levels();
        assert_eq!(levels.first(), Some(&16));
        assert_eq!(levels.last(), Some(&60));
        assert!(levels.windows(2).all(|w| w[0] < w[1]), "{levels:?}");
        assert_eq!(player.volume(), 60);
        assert_eq!(player.playback(), PlaybackState::Playing);
        assert!(
            player
                .position_of(&Call::PlayTrack {
                    track: "spotify:track:first".to_string(),
                    context: Some(PINNED.id.to_string()),
                })
                .is_some()
        );
    }

    #[test]
    fn first_calls_read_state_then_volume() {
        let player = RecordingPlayer::new(30, PlaybackState::Stopped);
        let mixer = Mixer::new(&player);
        start_playlist(&mixer, &Policy::default(), &FOCUS, quick()).unwrap();
        let calls = player.calls();
        assert_eq!(calls[0], Call::PlayerState);
        assert_eq!(calls[1], Call::GetVolume);
    }
}

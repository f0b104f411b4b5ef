//! In-memory player that records every call.
//!
//! Mimics Spotify's volume rounding: after `set sound volume to N` it reports `N - 1`.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::control::{PlaybackState, PlayerControl, TrackRequest};

/// A single call observed by [`RecordingPlayer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetVolume,
    /// Raw value as sent over the bridge.
    SetVolume(u8),
    PlayerState,
    Play,
    Pause,
    SetShuffling(bool),
    PlayTrack {
        track: String,
        context: Option<String>,
    },
}

#[derive(Debug)]
struct Inner {
    volume: i32,
    playback: PlaybackState,
    shuffling: bool,
    calls: Vec<Call>,
    called_at: Vec<Instant>,
}

#[derive(Debug)]
pub struct RecordingPlayer {
    inner: RefCell<Inner>,
    set_latency: Duration,
}

impl RecordingPlayer {
    pub fn new(volume: u8, playback: PlaybackState) -> Self {
        Self {
            inner: RefCell::new(Inner {
                volume: i32::from(volume),
                playback,
                shuffling: false,
                calls: Vec::new(),
                called_at: Vec::new(),
            }),
            set_latency: Duration::ZERO,
        }
    }

    /// Block every volume write for `latency`, like a slow bridge process.
    pub fn with_set_latency(mut self, latency: Duration) -> Self {
        self.set_latency = latency;
        self
    }

    /// Volume the player would currently report.
    pub fn volume(&self) -> i32 {
        self.inner.borrow().volume
    }

    pub fn playback(&self) -> PlaybackState {
        self.inner.borrow().playback
    }

    pub fn shuffling(&self) -> bool {
        self.inner.borrow().shuffling
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.borrow().calls.clone()
    }

    /// Raw values of every volume write, in order.
    pub fn sent_volumes(&self) -> Vec<u8> {
        self.inner
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::SetVolume(raw) => Some(*raw),
                _ => None,
            })
            .collect()
    }

    /// Levels as the player reported them after each write.
    pub fn applied_levels(&self) -> Vec<u8> {
        self.sent_volumes()
            .into_iter()
            .map(|raw| raw.saturating_sub(1))
            .collect()
    }

    /// When each call in [`Self::calls`] was made.
    pub fn call_instants(&self) -> Vec<Instant> {
        self.inner.borrow().called_at.clone()
    }

    /// Position of the first call equal to `call`, if any.
    pub fn position_of(&self, call: &Call) -> Option<usize> {
        self.inner.borrow().calls.iter().position(|c| c == call)
    }

    fn record(&self, call: Call) {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(call);
        inner.called_at.push(Instant::now());
    }
}

impl PlayerControl for RecordingPlayer {
    fn sound_volume(&self) -> Result<i32> {
        self.record(Call::GetVolume);
        Ok(self.volume())
    }

    fn set_sound_volume(&self, raw: u8) -> Result<()> {
        self.record(Call::SetVolume(raw));
        if !self.set_latency.is_zero() {
            std::thread::sleep(self.set_latency);
        }
        self.inner.borrow_mut().volume = i32::from(raw.saturating_sub(1));
        Ok(())
    }

    fn player_state(&self) -> Result<PlaybackState> {
        self.record(Call::PlayerState);
        Ok(self.playback())
    }

    fn play(&self) -> Result<()> {
        self.record(Call::Play);
        self.inner.borrow_mut().playback = PlaybackState::Playing;
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        self.record(Call::Pause);
        self.inner.borrow_mut().playback = PlaybackState::Paused;
        Ok(())
    }

    fn set_shuffling(&self, enabled: bool) -> Result<()> {
        self.record(Call::SetShuffling(enabled));
        self.inner.borrow_mut().shuffling = enabled;
        Ok(())
    }

    fn play_track(&self, request: TrackRequest<'_>) -> Result<()> {
        self.record(Call::PlayTrack {
            track: request.track.to_string(),
            context: request.context.map(str::to_string),
        });
        self.inner.borrow_mut().playback = PlaybackState::Playing;
        Ok(())
    }
}

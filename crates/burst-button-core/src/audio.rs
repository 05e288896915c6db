//! Audio playback contract.

use crate::types::AudioClip;

/// Fire-and-forget sound playback provided by the host.
///
/// Implementations report their own failures (typically through `tracing`);
/// callers never wait for or observe the result of a play request.
pub trait AudioPlayer {
    /// Start playing `clip` once. Overlapping plays are allowed.
    fn play_one_shot(&mut self, clip: &AudioClip);
}

/// An [`AudioPlayer`] that discards every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MutedAudio;

impl AudioPlayer for MutedAudio {
    fn play_one_shot(&mut self, clip: &AudioClip) {
        tracing::trace!(target: "burst_button_core::audio", %clip, "muted one-shot");
    }
}

impl<P: AudioPlayer + ?Sized> AudioPlayer for Box<P> {
    fn play_one_shot(&mut self, clip: &AudioClip) {
        (**self).play_one_shot(clip);
    }
}

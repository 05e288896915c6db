//! Event dispatch from a button to its listener.
//!
//! A button holds at most one listener, set by its owner. Every transition
//! that emits an event calls the listener synchronously, after the
//! transition's own effects are complete, with:
//!
//! - the emitting button's tag,
//! - the [`ButtonEvent`],
//! - an [`EventSource`] giving mutable access back to the emitting button.
//!
//! One listener can therefore serve many buttons and still act on the
//! specific instance, for example disabling it when a limit is reached.
//!
//! Listener errors are not handled by the button. They are returned from the
//! call that triggered the transition as
//! [`ButtonError::Listener`](crate::ButtonError::Listener).

use std::fmt;
use std::time::Duration;

use burst_button_core::SceneGraph;

use crate::button::{BurstButton, ButtonContext};

/// The kind of event a button emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonEvent {
    /// The pointer went down on the button.
    Press,
    /// The repeat timer fired while the button is held.
    Burst,
    /// The pointer was released over the button.
    Release,
    /// The host reported the pointer leaving the button before release.
    Cancel,
}

impl ButtonEvent {
    /// Lowercase name of the event.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Press => "press",
            Self::Burst => "burst",
            Self::Release => "release",
            Self::Cancel => "cancel",
        }
    }
}

impl fmt::Display for ButtonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Already-resolved pointer input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerSignal {
    /// Pointer pressed on the button.
    Down,
    /// Pointer released over the button.
    Up,
    /// Pointer left the button before release.
    Cancel,
}

/// Error type listeners return.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A button event listener.
pub type Listener =
    Box<dyn FnMut(&str, ButtonEvent, &mut EventSource<'_, '_>) -> Result<(), ListenerError>>;

/// The emitting button, as seen from inside a listener.
pub struct EventSource<'b, 'c> {
    pub(crate) button: &'b mut BurstButton,
    pub(crate) ctx: &'b mut ButtonContext<'c>,
}

impl EventSource<'_, '_> {
    /// Tag of the emitting button.
    pub fn tag(&self) -> &str {
        self.button.tag()
    }

    /// The emitting button.
    pub fn button(&self) -> &BurstButton {
        &*self.button
    }

    /// Whether the emitting button is enabled.
    pub fn is_active(&self) -> bool {
        self.button.is_active()
    }

    /// Enable or disable the emitting button.
    ///
    /// Disabling while pressed tears the press down without a `Release` or
    /// `Cancel` event.
    pub fn set_active(&mut self, active: bool) {
        self.button.set_active(active, self.ctx);
    }

    /// Replace the emitting button's listener. The new listener receives
    /// the next event; the running one is dropped when it returns.
    pub fn set_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&str, ButtonEvent, &mut EventSource<'_, '_>) -> Result<(), ListenerError> + 'static,
    {
        self.button.replace_listener(Some(Box::new(listener)));
    }

    /// Remove the emitting button's listener once the running call returns.
    pub fn clear_listener(&mut self) {
        self.button.replace_listener(None);
    }

    /// Current time on the host scheduler clock.
    ///
    /// The clock moves once per host tick, before the fires of that tick are
    /// delivered. Bursts caught up within one long tick all see the time at
    /// the end of the tick, not the instant each one was scheduled for.
    pub fn now(&self) -> Duration {
        self.ctx.scheduler.now()
    }

    /// Read access to the host scene.
    pub fn scene(&self) -> &dyn SceneGraph {
        &*self.ctx.scene
    }

    /// Write access to the host scene.
    pub fn scene_mut(&mut self) -> &mut dyn SceneGraph {
        &mut *self.ctx.scene
    }
}

impl fmt::Debug for EventSource<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSource")
            .field("tag", &self.button.tag())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(ButtonEvent::Press.to_string(), "press");
        assert_eq!(ButtonEvent::Burst.to_string(), "burst");
        assert_eq!(ButtonEvent::Release.to_string(), "release");
        assert_eq!(ButtonEvent::Cancel.to_string(), "cancel");
    }
}

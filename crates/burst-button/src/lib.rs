//! Burst Button - a press-and-hold button controller for retained scene graphs.
//!
//! A [`BurstButton`] turns already-resolved pointer signals into:
//!
//! - scale feedback on the button node,
//! - a multiplicative tint over the button's subtree, or a sprite swap on a
//!   designated target,
//! - audio cues for press, release and cancel,
//! - `Press`, `Burst`, `Release` and `Cancel` events for one listener, with
//!   `Burst` repeating while the button is held.
//!
//! The host systems it drives (scene graph, frame scheduler, colour animator,
//! audio) come from `burst_button_core` and are lent to each call through a
//! [`ButtonContext`]. [`Stage`] is a ready-made host that owns all of them.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! use burst_button::prelude::*;
//!
//! let mut scene = SceneTree::new();
//! let node = scene.create_node("Plus");
//! scene.set_size(node, Size::new(64.0, 64.0)).unwrap();
//!
//! let mut stage = Stage::new(scene);
//! let config = ButtonConfig::new().with_burst(Duration::from_millis(300), Duration::from_millis(100));
//! let plus = stage.add_button(node, config).unwrap();
//!
//! let count = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&count);
//! stage
//!     .set_listener(plus, move |_, event, _| {
//!         if matches!(event, ButtonEvent::Press | ButtonEvent::Burst) {
//!             counter.set(counter.get() + 1);
//!         }
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! stage.press(plus).unwrap();
//! stage.advance(Duration::from_millis(1050)).unwrap();
//! stage.release(plus).unwrap();
//!
//! // One press and eight bursts.
//! assert_eq!(count.get(), 9);
//! ```

pub use burst_button_core::*;

mod button;
pub mod config;
mod dispatch;
pub mod effects;
mod error;
pub mod prelude;
mod repeat;
mod stage;

pub use button::{BurstButton, ButtonContext, ButtonState};
pub use config::{AudioCues, ButtonConfig, ButtonSheet, EffectMode, EffectTarget};
pub use dispatch::{ButtonEvent, EventSource, Listener, ListenerError, PointerSignal};
pub use error::{ButtonError, ConfigError, Result};
pub use repeat::RepeatTimer;
pub use stage::{ButtonId, Stage, StageCommand, StageHandle};

/// Audio playback backed by `rodio`.
#[cfg(feature = "multimedia")]
pub mod multimedia {
    pub use burst_button_multimedia::*;
}

static_assertions::assert_impl_all!(ButtonConfig: Send, Sync, Clone);
static_assertions::assert_not_impl_any!(BurstButton: Send);

//! Core systems for Burst Button.
//!
//! This crate provides the host-side collaborators a press-and-hold button
//! consumes:
//!
//! - **Scene Graph**: the [`SceneGraph`] contract and the [`SceneTree`] arena
//! - **Frame Scheduler**: one-shot and repeating timers on a virtual clock
//! - **Animator**: cancellable colour tweens, one per node and property
//! - **Audio**: the fire-and-forget [`AudioPlayer`] contract
//!
//! Everything here is single-threaded and cooperative. Nothing runs until the
//! host's update loop calls [`FrameScheduler::advance`] and
//! [`Animator::advance`].
//!
//! # Scheduler Example
//!
//! ```
//! use std::time::Duration;
//! use burst_button_core::{FrameScheduler, Repeat};
//!
//! let mut scheduler = FrameScheduler::new();
//! let id = scheduler.schedule_repeating(
//!     Duration::from_millis(300),
//!     Duration::from_millis(100),
//!     Repeat::Forever,
//! );
//!
//! // Held for half a second: fires at 300, 400 and 500 ms.
//! let fired = scheduler.advance(Duration::from_millis(500));
//! assert_eq!(fired, vec![id, id, id]);
//! ```

pub mod animation;
mod audio;
mod error;
pub mod logging;
mod scene;
mod timer;
mod types;

pub use animation::{Animator, Easing, TweenId, TweenProperty};
pub use audio::{AudioPlayer, MutedAudio};
pub use error::{CoreError, Result, SceneError, TimerError};
pub use logging::{SceneTreeDebug, TreeFormatOptions, TreeStyle};
pub use scene::{NodeId, SceneGraph, SceneTree};
pub use timer::{FrameScheduler, Repeat, TimerId};
pub use types::{AudioClip, Color, Size, SpriteFrame};

// Re-export the vector type used for node scale.
pub use glam::Vec2;

//! Colour transition support.
//!
//! This module provides easing curves and the [`Animator`], which runs
//! single-property colour tweens on scene nodes.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use burst_button_core::animation::{Animator, Easing};
//! use burst_button_core::{Color, SceneGraph, SceneTree};
//!
//! let mut scene = SceneTree::new();
//! let node = scene.create_node("Icon");
//! let mut animator = Animator::new();
//!
//! animator.animate_color(node, Color::WHITE, Color::GRAY, Duration::from_millis(100), Easing::EaseOut);
//! animator.advance(Duration::from_millis(100), &mut scene);
//! assert_eq!(scene.color(node), Some(Color::GRAY));
//! ```

mod easing;
mod tween;

pub use easing::{ease, Easing};
pub use tween::{Animator, TweenId, TweenProperty};

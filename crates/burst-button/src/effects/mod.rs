//! Visual feedback engines.
//!
//! [`ColorEffects`] multiplies a tint into every node of a subtree and
//! restores the authored colours afterwards. [`SpriteSwap`] replaces the image
//! shown by a single target node.

mod color;
mod sprite;

pub use color::ColorEffects;
pub use sprite::SpriteSwap;

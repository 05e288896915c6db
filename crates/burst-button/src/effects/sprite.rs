//! Image swapping on a single target node.

use burst_button_core::logging::targets;
use burst_button_core::{NodeId, SceneGraph, SpriteFrame};

#[derive(Debug, Clone)]
struct Binding {
    target: NodeId,
    /// Frame shown when the target was bound.
    normal: Option<SpriteFrame>,
}

/// Swaps the frame shown by a target sprite between normal, pressed and
/// disabled images.
///
/// The normal frame is captured when a target is bound and recaptured only
/// when a different target is bound. Every `show_*` call is a no-op when no
/// target is bound or the requested frame is absent.
#[derive(Debug, Clone, Default)]
pub struct SpriteSwap {
    binding: Option<Binding>,
}

impl SpriteSwap {
    /// Create an unbound engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `target`, capturing its current frame as the normal image.
    ///
    /// Rebinding the same target keeps the original capture. A target without
    /// a sprite component leaves the engine unbound and returns `false`.
    pub fn bind(&mut self, scene: &dyn SceneGraph, target: NodeId) -> bool {
        if self.target() == Some(target) {
            return true;
        }
        if !scene.has_sprite(target) {
            tracing::warn!(
                target: targets::EFFECTS,
                node = %scene.path_of(target),
                "effect target has no sprite component; sprite feedback disabled"
            );
            self.binding = None;
            return false;
        }

        let normal = scene.sprite_frame(target);
        tracing::debug!(target: targets::EFFECTS, ?target, normal = ?normal, "sprite target bound");
        self.binding = Some(Binding { target, normal });
        true
    }

    /// Forget the bound target.
    pub fn unbind(&mut self) {
        self.binding = None;
    }

    /// The bound target node.
    pub fn target(&self) -> Option<NodeId> {
        self.binding.as_ref().map(|b| b.target)
    }

    /// The frame captured at bind time.
    pub fn normal_frame(&self) -> Option<&SpriteFrame> {
        self.binding.as_ref().and_then(|b| b.normal.as_ref())
    }

    /// Show the pressed frame.
    pub fn show_press(&self, frame: Option<&SpriteFrame>, scene: &mut dyn SceneGraph) {
        self.show(frame, scene);
    }

    /// Show the disabled frame.
    pub fn show_disabled(&self, frame: Option<&SpriteFrame>, scene: &mut dyn SceneGraph) {
        self.show(frame, scene);
    }

    /// Show the frame captured at bind time.
    pub fn show_normal(&self, scene: &mut dyn SceneGraph) {
        self.show(self.normal_frame(), scene);
    }

    fn show(&self, frame: Option<&SpriteFrame>, scene: &mut dyn SceneGraph) {
        let (Some(binding), Some(frame)) = (&self.binding, frame) else {
            return;
        };
        scene.set_sprite_frame(binding.target, frame.clone());
    }
}

//! A reference host for burst buttons.
//!
//! [`Stage`] owns the scene tree, frame scheduler, animator and audio player,
//! and routes pointer signals, size changes and frame ticks to the buttons
//! registered on it. A real application embeds [`BurstButton`] in its own
//! loop the same way.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use burst_button::{ButtonConfig, Stage};
//! use burst_button_core::{SceneTree, Size};
//!
//! let mut scene = SceneTree::new();
//! let node = scene.create_node("Plus");
//! scene.set_size(node, Size::new(64.0, 64.0)).unwrap();
//!
//! let mut stage = Stage::new(scene);
//! let plus = stage
//!     .add_button(node, ButtonConfig::new().with_burst(Duration::from_millis(300), Duration::from_millis(100)))
//!     .unwrap();
//!
//! stage.press(plus).unwrap();
//! stage.advance(Duration::from_millis(500)).unwrap();
//! stage.release(plus).unwrap();
//! ```

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use burst_button_core::logging::targets;
use burst_button_core::{
    Animator, AudioPlayer, FrameScheduler, MutedAudio, NodeId, SceneGraph, SceneTree,
    SceneTreeDebug, Size, TimerId,
};
use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::button::{BurstButton, ButtonContext};
use crate::config::{ButtonConfig, ButtonSheet};
use crate::dispatch::{ButtonEvent, EventSource, ListenerError, PointerSignal};
use crate::error::{ButtonError, Result};

new_key_type! {
    /// Identifier of a button registered on a [`Stage`].
    pub struct ButtonId;
}

/// A deferred request from a listener to the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageCommand {
    /// Enable or disable a button.
    SetActive {
        /// The button to change.
        button: ButtonId,
        /// The new active state.
        active: bool,
    },
}

/// Queues commands for a [`Stage`].
///
/// A listener only reaches the button that emitted the event. To act on
/// other buttons it sends commands through a handle; the stage applies them
/// right after the signal or tick that invoked the listener.
#[derive(Debug, Clone, Default)]
pub struct StageHandle {
    queue: Arc<Mutex<VecDeque<StageCommand>>>,
}

impl StageHandle {
    /// Queue a command.
    pub fn send(&self, command: StageCommand) {
        self.queue.lock().push_back(command);
    }

    /// Queue an enable/disable of `button`.
    pub fn set_active(&self, button: ButtonId, active: bool) {
        self.send(StageCommand::SetActive { button, active });
    }

    /// Number of queued commands.
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    fn pop(&self) -> Option<StageCommand> {
        self.queue.lock().pop_front()
    }
}

static_assertions::assert_impl_all!(StageHandle: Send, Sync, Clone);

/// Host systems owned by the stage, lent to one button at a time.
struct Host {
    scene: SceneTree,
    scheduler: FrameScheduler,
    animator: Animator,
    audio: Box<dyn AudioPlayer>,
}

impl Host {
    fn context(&mut self) -> ButtonContext<'_> {
        ButtonContext::new(
            &mut self.scene,
            &mut self.scheduler,
            &mut self.animator,
            &mut *self.audio,
        )
    }
}

/// Owns a scene and the buttons on it.
pub struct Stage {
    host: Host,
    buttons: SlotMap<ButtonId, BurstButton>,
    handle: StageHandle,
}

impl Stage {
    /// Create a stage over `scene` with audio muted.
    pub fn new(scene: SceneTree) -> Self {
        Self::with_audio(scene, Box::new(MutedAudio))
    }

    /// Create a stage over `scene` playing cues through `audio`.
    pub fn with_audio(scene: SceneTree, audio: Box<dyn AudioPlayer>) -> Self {
        Self {
            host: Host {
                scene,
                scheduler: FrameScheduler::new(),
                animator: Animator::new(),
                audio,
            },
            buttons: SlotMap::with_key(),
            handle: StageHandle::default(),
        }
    }

    /// The scene tree.
    pub fn scene(&self) -> &SceneTree {
        &self.host.scene
    }

    /// Mutable access to the scene tree.
    ///
    /// Use [`set_node_size`](Self::set_node_size) for size changes so that
    /// buttons are notified.
    pub fn scene_mut(&mut self) -> &mut SceneTree {
        &mut self.host.scene
    }

    /// The frame scheduler.
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.host.scheduler
    }

    /// The colour animator.
    pub fn animator(&self) -> &Animator {
        &self.host.animator
    }

    /// Current time on the stage clock.
    pub fn now(&self) -> Duration {
        self.host.scheduler.now()
    }

    /// A handle listeners can use to queue commands.
    pub fn handle(&self) -> StageHandle {
        self.handle.clone()
    }

    // =========================================================================
    // Buttons
    // =========================================================================

    /// Create and activate a button on `node`.
    pub fn add_button(&mut self, node: NodeId, config: ButtonConfig) -> Result<ButtonId> {
        let mut button = BurstButton::new(&self.host.scene, node, config)?;
        button.activate(&mut self.host.context());
        let id = self.buttons.insert(button);
        tracing::debug!(target: targets::STAGE, ?id, ?node, "button added");
        Ok(id)
    }

    /// Create a button for every entry of `sheet`, resolving paths relative
    /// to `root`. Returns the ids in path order.
    ///
    /// Nothing is added if any path fails to resolve.
    pub fn add_buttons(&mut self, root: NodeId, sheet: &ButtonSheet) -> Result<Vec<(String, ButtonId)>> {
        let mut resolved = Vec::with_capacity(sheet.buttons.len());
        for (path, config) in &sheet.buttons {
            let node = self
                .host
                .scene
                .find_path(root, path)
                .ok_or_else(|| ButtonError::UnresolvedPath(path.clone()))?;
            resolved.push((path, node, config));
        }

        let mut added = Vec::with_capacity(resolved.len());
        for (path, node, config) in resolved {
            match self.add_button(node, config.clone()) {
                Ok(id) => added.push((path.clone(), id)),
                Err(err) => {
                    for (_, id) in added {
                        self.remove_button(id)?;
                    }
                    return Err(err);
                }
            }
        }
        Ok(added)
    }

    /// Deactivate and remove a button, returning it.
    pub fn remove_button(&mut self, id: ButtonId) -> Result<BurstButton> {
        let mut button = self.buttons.remove(id).ok_or(ButtonError::UnknownButton(id))?;
        button.deactivate(&mut self.host.context());
        tracing::debug!(target: targets::STAGE, ?id, tag = button.tag(), "button removed");
        Ok(button)
    }

    /// A registered button.
    pub fn button(&self, id: ButtonId) -> Option<&BurstButton> {
        self.buttons.get(id)
    }

    /// Iterate over the registered buttons.
    pub fn buttons(&self) -> impl Iterator<Item = (ButtonId, &BurstButton)> {
        self.buttons.iter()
    }

    /// Number of registered buttons.
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Find the button whose tag is `tag`.
    pub fn find_button(&self, tag: &str) -> Option<ButtonId> {
        self.buttons
            .iter()
            .find(|(_, button)| button.tag() == tag)
            .map(|(id, _)| id)
    }

    /// Register a button's listener, replacing any previous one.
    pub fn set_listener<F>(&mut self, id: ButtonId, listener: F) -> Result<()>
    where
        F: FnMut(&str, ButtonEvent, &mut EventSource<'_, '_>) -> std::result::Result<(), ListenerError>
            + 'static,
    {
        self.button_mut(id)?.set_listener(listener);
        Ok(())
    }

    /// Remove a button's listener.
    pub fn clear_listener(&mut self, id: ButtonId) -> Result<()> {
        self.button_mut(id)?.clear_listener();
        Ok(())
    }

    /// Enable or disable a button.
    pub fn set_active(&mut self, id: ButtonId, active: bool) -> Result<()> {
        let button = self.buttons.get_mut(id).ok_or(ButtonError::UnknownButton(id))?;
        button.set_active(active, &mut self.host.context());
        Ok(())
    }

    /// Change a button's sprite-swap target.
    pub fn set_effect_target(&mut self, id: ButtonId, target: Option<NodeId>) -> Result<()> {
        let button = self.buttons.get_mut(id).ok_or(ButtonError::UnknownButton(id))?;
        button.set_effect_target(target, &mut self.host.context())
    }

    fn button_mut(&mut self, id: ButtonId) -> Result<&mut BurstButton> {
        self.buttons.get_mut(id).ok_or(ButtonError::UnknownButton(id))
    }

    // =========================================================================
    // Input and time
    // =========================================================================

    /// Deliver a pointer signal to a button.
    ///
    /// `Down` is hit-tested: a button whose node has zero size does not
    /// receive it. `Up` and `Cancel` always reach the button so a held press
    /// can end.
    pub fn dispatch(&mut self, id: ButtonId, signal: PointerSignal) -> Result<()> {
        let button = self.buttons.get_mut(id).ok_or(ButtonError::UnknownButton(id))?;
        if signal == PointerSignal::Down
            && self.host.scene.size(button.node()).is_some_and(|size| size.is_empty())
        {
            tracing::debug!(target: targets::STAGE, tag = button.tag(), "pointer down missed zero-size button");
            return Ok(());
        }

        let result = button.handle_pointer(signal, &mut self.host.context());
        self.apply_commands();
        result
    }

    /// Pointer down on a button.
    pub fn press(&mut self, id: ButtonId) -> Result<()> {
        self.dispatch(id, PointerSignal::Down)
    }

    /// Pointer up over a button.
    pub fn release(&mut self, id: ButtonId) -> Result<()> {
        self.dispatch(id, PointerSignal::Up)
    }

    /// Pointer left a button before release.
    pub fn cancel(&mut self, id: ButtonId) -> Result<()> {
        self.dispatch(id, PointerSignal::Cancel)
    }

    /// Resize a node and notify the buttons on it.
    pub fn set_node_size(&mut self, node: NodeId, size: Size) -> Result<()> {
        self.host.scene.set_size(node, size)?;
        for (_, button) in self.buttons.iter_mut().filter(|(_, b)| b.node() == node) {
            button.handle_size_changed(&mut self.host.context());
        }
        Ok(())
    }

    /// Advance the stage clock by `dt`.
    ///
    /// Colour transitions advance first, then every repeat timer fire that
    /// fell due is delivered in order. A listener error stops delivery and
    /// is returned; fires after it in this tick are dropped.
    pub fn advance(&mut self, dt: Duration) -> Result<()> {
        self.host.animator.advance(dt, &mut self.host.scene);
        let fired = self.host.scheduler.advance(dt);

        for timer in fired {
            let Some(id) = self.timer_owner(timer) else {
                continue;
            };
            let result = match self.buttons.get_mut(id) {
                Some(button) => button.handle_timer(timer, &mut self.host.context()),
                None => Ok(false),
            };
            self.apply_commands();
            result?;
        }
        Ok(())
    }

    fn timer_owner(&self, timer: TimerId) -> Option<ButtonId> {
        self.buttons
            .iter()
            .find(|(_, button)| button.owns_timer(timer))
            .map(|(id, _)| id)
    }

    fn apply_commands(&mut self) {
        while let Some(command) = self.handle.pop() {
            match command {
                StageCommand::SetActive { button, active } => {
                    let Some(target) = self.buttons.get_mut(button) else {
                        tracing::warn!(target: targets::STAGE, ?button, "command for removed button");
                        continue;
                    };
                    target.set_active(active, &mut self.host.context());
                }
            }
        }
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Text dump of the subtree under `root`.
    pub fn debug_tree(&self, root: NodeId) -> String {
        SceneTreeDebug::new().format_subtree(&self.host.scene, root)
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("now", &self.now())
            .field("buttons", &self.buttons.len())
            .field("nodes", &self.host.scene.node_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use burst_button_core::Color;

    use super::*;

    fn stage() -> (Stage, NodeId) {
        let mut scene = SceneTree::new();
        let node = scene.create_node("Btn");
        scene.set_size(node, Size::new(10.0, 10.0)).unwrap();
        (Stage::new(scene), node)
    }

    #[test]
    fn test_add_and_remove() {
        let (mut stage, node) = stage();
        let id = stage.add_button(node, ButtonConfig::default()).unwrap();
        assert!(stage.button(id).unwrap().is_activated());
        assert_eq!(stage.find_button("Btn"), Some(id));

        let button = stage.remove_button(id).unwrap();
        assert!(!button.is_activated());
        assert!(matches!(stage.press(id), Err(ButtonError::UnknownButton(_))));
    }

    #[test]
    fn test_zero_size_not_hit() {
        let (mut stage, node) = stage();
        let id = stage.add_button(node, ButtonConfig::default()).unwrap();
        stage.set_node_size(node, Size::ZERO).unwrap();

        stage.press(id).unwrap();
        assert!(!stage.button(id).unwrap().is_pressed());

        stage.set_node_size(node, Size::new(5.0, 5.0)).unwrap();
        stage.press(id).unwrap();
        assert!(stage.button(id).unwrap().is_pressed());
    }

    #[test]
    fn test_release_reaches_shrunken_button() {
        let (mut stage, node) = stage();
        let id = stage.add_button(node, ButtonConfig::default()).unwrap();
        stage.press(id).unwrap();
        stage.set_node_size(node, Size::ZERO).unwrap();
        stage.release(id).unwrap();
        assert!(!stage.button(id).unwrap().is_pressed());
    }

    #[test]
    fn test_handle_commands_applied_after_dispatch() {
        let mut scene = SceneTree::new();
        let a = scene.create_node("A");
        let b = scene.create_node("B");
        scene.set_size(a, Size::new(1.0, 1.0)).unwrap();
        scene.set_size(b, Size::new(1.0, 1.0)).unwrap();
        let mut stage = Stage::new(scene);
        let a_id = stage.add_button(a, ButtonConfig::default()).unwrap();
        let b_id = stage.add_button(b, ButtonConfig::default()).unwrap();

        let handle = stage.handle();
        stage
            .set_listener(a_id, move |_, _, _| {
                handle.set_active(b_id, false);
                Ok(())
            })
            .unwrap();

        stage.press(a_id).unwrap();
        assert_eq!(stage.handle().pending(), 0);
        assert!(!stage.button(b_id).unwrap().is_active());
        assert_eq!(stage.scene().color(b), Some(Color::GRAY));
    }

    #[test]
    fn test_add_buttons_from_sheet() {
        let mut scene = SceneTree::new();
        let root = scene.create_node("Canvas");
        let count = scene.create_child(root, "Count").unwrap();
        scene.create_child(count, "+").unwrap();
        scene.create_child(count, "-").unwrap();
        let mut stage = Stage::new(scene);

        let sheet = ButtonSheet::from_toml(
            r#"
            [buttons."Count/+"]
            burst_enabled = true
            [buttons."Count/-"]
            burst_enabled = true
            "#,
        )
        .unwrap();
        let added = stage.add_buttons(root, &sheet).unwrap();
        assert_eq!(added.len(), 2);
        assert_eq!(stage.button_count(), 2);

        let sheet = ButtonSheet::from_toml("[buttons.Missing]").unwrap();
        assert!(matches!(
            stage.add_buttons(root, &sheet),
            Err(ButtonError::UnresolvedPath(path)) if path == "Missing"
        ));
        assert_eq!(stage.button_count(), 2);
    }
}

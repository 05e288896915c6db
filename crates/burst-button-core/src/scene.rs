//! Scene graph contract and a reference arena implementation.
//!
//! The widget layer never owns scene nodes. It reads and writes node
//! properties through [`SceneGraph`], addressing nodes by [`NodeId`].
//!
//! # Key Types
//!
//! - [`NodeId`] - Stable handle to a node
//! - [`SceneGraph`] - The operations the widget layer consumes from a host
//! - [`SceneTree`] - Arena-backed tree implementing [`SceneGraph`]

use glam::Vec2;
use slotmap::{new_key_type, SlotMap};

use crate::error::SceneError;
use crate::types::{Color, Size, SpriteFrame};

new_key_type! {
    /// A unique identifier for a node in a scene.
    ///
    /// `NodeId`s stay valid while the tree is rearranged and become invalid
    /// once the node is removed.
    pub struct NodeId;
}

impl NodeId {
    /// Convert the NodeId to a raw u64 value.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }
}

/// Node operations consumed from the host scene.
///
/// Getters return `None` for unknown nodes. Setters return `false` when the
/// node is unknown or lacks the component being written.
pub trait SceneGraph {
    /// Check if a node exists.
    fn contains(&self, node: NodeId) -> bool;

    /// The node's name.
    fn name(&self, node: NodeId) -> Option<&str>;

    /// The node's parent, if it has one.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// The node's children in sibling order. Empty for unknown nodes.
    fn children(&self, node: NodeId) -> &[NodeId];

    /// The node's color.
    fn color(&self, node: NodeId) -> Option<Color>;

    /// Set the node's color.
    fn set_color(&mut self, node: NodeId, color: Color) -> bool;

    /// The node's scale.
    fn scale(&self, node: NodeId) -> Option<Vec2>;

    /// Set the node's scale.
    fn set_scale(&mut self, node: NodeId, scale: Vec2) -> bool;

    /// The node's content size (its pointer hit area).
    fn size(&self, node: NodeId) -> Option<Size>;

    /// Check if the node carries a sprite component.
    fn has_sprite(&self, node: NodeId) -> bool;

    /// The frame currently shown by the node's sprite, if any.
    fn sprite_frame(&self, node: NodeId) -> Option<SpriteFrame>;

    /// Show `frame` on the node's sprite.
    fn set_sprite_frame(&mut self, node: NodeId, frame: SpriteFrame) -> bool;

    /// Find the direct child of `node` with the given name.
    fn find_child(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .find(|&child| self.name(child) == Some(name))
    }

    /// Resolve a slash-separated path of child names relative to `root`.
    ///
    /// Empty segments are skipped, so `""` resolves to `root` itself.
    fn find_path(&self, root: NodeId, path: &str) -> Option<NodeId> {
        if !self.contains(root) {
            return None;
        }
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(root, |node, segment| self.find_child(node, segment))
    }

    /// Slash-separated path from the scene root to `node`, for diagnostics.
    fn path_of(&self, node: NodeId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            segments.push(self.name(id).unwrap_or("?"));
            current = self.parent(id);
        }
        segments.reverse();
        segments.join("/")
    }
}

/// Internal data stored for each node.
#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    color: Color,
    scale: Vec2,
    size: Size,
    /// `Some` once a sprite component is attached; the inner option is the shown frame.
    sprite: Option<Option<SpriteFrame>>,
}

impl NodeData {
    fn new(name: String) -> Self {
        Self {
            name,
            parent: None,
            children: Vec::new(),
            color: Color::WHITE,
            scale: Vec2::ONE,
            size: Size::ZERO,
            sprite: None,
        }
    }
}

/// An arena-backed scene tree.
///
/// Uses `SlotMap` storage for stable node IDs and cheap parent/child
/// bookkeeping. Removing a node removes its whole subtree.
#[derive(Debug, Clone, Default)]
pub struct SceneTree {
    nodes: SlotMap<NodeId, NodeData>,
}

impl SceneTree {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Create a root node.
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.nodes.insert(NodeData::new(name.into()));
        tracing::trace!(target: "burst_button_core::scene", ?id, "created node");
        id
    }

    /// Create a node as the last child of `parent`.
    pub fn create_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
    ) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::InvalidNode);
        }
        let id = self.create_node(name);
        self.set_parent(id, Some(parent))?;
        Ok(id)
    }

    /// Number of nodes in the scene.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes without a parent.
    pub fn root_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, data)| data.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Re-parent a node. Passing `None` makes it a root node.
    pub fn set_parent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> Result<(), SceneError> {
        if !self.nodes.contains_key(id) {
            return Err(SceneError::InvalidNode);
        }

        if let Some(parent_id) = new_parent {
            if !self.nodes.contains_key(parent_id) {
                return Err(SceneError::InvalidNode);
            }
            if self.is_ancestor_of(id, parent_id) {
                return Err(SceneError::CircularParentage);
            }
        }

        let old_parent = self.nodes.get(id).and_then(|d| d.parent);
        if let Some(old_parent_id) = old_parent {
            if let Some(parent_data) = self.nodes.get_mut(old_parent_id) {
                parent_data.children.retain(|&child| child != id);
            }
        }

        if let Some(data) = self.nodes.get_mut(id) {
            data.parent = new_parent;
        }

        if let Some(parent_id) = new_parent {
            if let Some(parent_data) = self.nodes.get_mut(parent_id) {
                parent_data.children.push(id);
            }
        }

        Ok(())
    }

    /// Check if `potential_ancestor` is `id` or one of its ancestors.
    fn is_ancestor_of(&self, potential_ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return true;
            }
            current = self.nodes.get(current_id).and_then(|d| d.parent);
        }
        false
    }

    /// Remove a node and its whole subtree.
    #[tracing::instrument(skip(self), target = "burst_button_core::scene", level = "trace")]
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), SceneError> {
        let subtree = self.depth_first_preorder(id)?;

        if let Some(parent_id) = self.nodes.get(id).and_then(|d| d.parent) {
            if let Some(parent_data) = self.nodes.get_mut(parent_id) {
                parent_data.children.retain(|&child| child != id);
            }
        }

        for node in subtree {
            self.nodes.remove(node);
        }
        Ok(())
    }

    /// Visit `id` and its descendants: node first, then children in order.
    pub fn depth_first_preorder(&self, id: NodeId) -> Result<Vec<NodeId>, SceneError> {
        if !self.nodes.contains_key(id) {
            return Err(SceneError::InvalidNode);
        }
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            result.push(node);
            if let Some(data) = self.nodes.get(node) {
                stack.extend(data.children.iter().rev().copied());
            }
        }
        Ok(result)
    }

    /// Rename a node.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> Result<(), SceneError> {
        let data = self.nodes.get_mut(id).ok_or(SceneError::InvalidNode)?;
        data.name = name.into();
        Ok(())
    }

    /// Set the node's content size.
    pub fn set_size(&mut self, id: NodeId, size: Size) -> Result<(), SceneError> {
        let data = self.nodes.get_mut(id).ok_or(SceneError::InvalidNode)?;
        data.size = size;
        Ok(())
    }

    /// Attach a sprite component showing `frame` (or nothing).
    pub fn attach_sprite(&mut self, id: NodeId, frame: Option<SpriteFrame>) -> Result<(), SceneError> {
        let data = self.nodes.get_mut(id).ok_or(SceneError::InvalidNode)?;
        data.sprite = Some(frame);
        Ok(())
    }
}

impl SceneGraph for SceneTree {
    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    fn name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|d| d.name.as_str())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|d| d.parent)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|d| d.children.as_slice())
            .unwrap_or(&[])
    }

    fn color(&self, node: NodeId) -> Option<Color> {
        self.nodes.get(node).map(|d| d.color)
    }

    fn set_color(&mut self, node: NodeId, color: Color) -> bool {
        match self.nodes.get_mut(node) {
            Some(data) => {
                data.color = color;
                true
            }
            None => false,
        }
    }

    fn scale(&self, node: NodeId) -> Option<Vec2> {
        self.nodes.get(node).map(|d| d.scale)
    }

    fn set_scale(&mut self, node: NodeId, scale: Vec2) -> bool {
        match self.nodes.get_mut(node) {
            Some(data) => {
                data.scale = scale;
                true
            }
            None => false,
        }
    }

    fn size(&self, node: NodeId) -> Option<Size> {
        self.nodes.get(node).map(|d| d.size)
    }

    fn has_sprite(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|d| d.sprite.is_some())
    }

    fn sprite_frame(&self, node: NodeId) -> Option<SpriteFrame> {
        self.nodes.get(node).and_then(|d| d.sprite.clone().flatten())
    }

    fn set_sprite_frame(&mut self, node: NodeId, frame: SpriteFrame) -> bool {
        match self.nodes.get_mut(node).and_then(|d| d.sprite.as_mut()) {
            Some(sprite) => {
                *sprite = Some(frame);
                true
            }
            None => false,
        }
    }
}

static_assertions::assert_impl_all!(SceneTree: Send, Sync);

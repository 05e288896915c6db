//! Logging and debugging facilities.
//!
//! This module provides:
//! - Target names used with the `tracing` crate, for log filtering
//! - A text dump of scene subtrees for inspecting effect state
//!
//! # Tracing Integration
//!
//! Burst Button emits through `tracing` only. To see logs, install a
//! subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("burst_button=debug,burst_button_core=info")
//!     .init();
//! ```

use std::fmt::Write as FmtWrite;

use crate::scene::{NodeId, SceneGraph};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "burst_button_core";
    /// Frame scheduler target.
    pub const TIMER: &str = "burst_button_core::timer";
    /// Colour tween target.
    pub const TWEEN: &str = "burst_button_core::tween";
    /// Scene tree target.
    pub const SCENE: &str = "burst_button_core::scene";
    /// Audio contract target.
    pub const AUDIO: &str = "burst_button_core::audio";
    /// Button state machine target.
    pub const BUTTON: &str = "burst_button::button";
    /// Colour and sprite effects target.
    pub const EFFECTS: &str = "burst_button::effects";
    /// Listener dispatch target.
    pub const DISPATCH: &str = "burst_button::dispatch";
    /// Reference host target.
    pub const STAGE: &str = "burst_button::stage";
}

/// Style options for scene tree output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line-per-node representation without branches.
    Compact,
}

/// Configuration for scene tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show node IDs.
    pub show_ids: bool,
    /// Whether to show color, scale and sprite frame.
    pub show_visuals: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: false,
            show_visuals: true,
            max_depth: None,
        }
    }
}

impl TreeFormatOptions {
    /// Names only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_visuals: false,
            ..Default::default()
        }
    }
}

/// Formats scene subtrees for debugging.
#[derive(Debug, Clone, Default)]
pub struct SceneTreeDebug {
    options: TreeFormatOptions,
}

impl SceneTreeDebug {
    /// Create a formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the subtree rooted at `root`. Unknown nodes produce an empty string.
    pub fn format_subtree(&self, scene: &dyn SceneGraph, root: NodeId) -> String {
        let mut output = String::new();
        if scene.contains(root) {
            self.format_into(scene, root, 0, &mut Vec::new(), &mut output);
        }
        output
    }

    fn format_into(
        &self,
        scene: &dyn SceneGraph,
        id: NodeId,
        depth: usize,
        last_flags: &mut Vec<bool>,
        output: &mut String,
    ) {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }

        output.push_str(&self.prefix(last_flags));
        let name = scene.name(id).unwrap_or_default();
        output.push_str(if name.is_empty() { "(unnamed)" } else { name });

        if self.options.show_ids {
            let _ = write!(output, " [{:?}]", id);
        }

        if self.options.show_visuals {
            if let Some(color) = scene.color(id) {
                let _ = write!(output, " color={color}");
            }
            if let Some(scale) = scene.scale(id) {
                let _ = write!(output, " scale=({}, {})", scale.x, scale.y);
            }
            if let Some(frame) = scene.sprite_frame(id) {
                let _ = write!(output, " sprite={frame}");
            }
        }
        output.push('\n');

        let children = scene.children(id);
        let count = children.len();
        for (i, &child) in children.iter().enumerate() {
            last_flags.push(i + 1 == count);
            self.format_into(scene, child, depth + 1, last_flags, output);
            last_flags.pop();
        }
    }

    /// Build the prefix for a node given whether each ancestor level was a last child.
    fn prefix(&self, last_flags: &[bool]) -> String {
        let Some((&is_last, parents)) = last_flags.split_last() else {
            return String::new();
        };

        let (branch, tee, corner, blank) = match self.options.style {
            TreeStyle::Ascii => ("|   ", "+-- ", "`-- ", "    "),
            TreeStyle::Unicode => ("\u{2502}   ", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} ", "    "),
            TreeStyle::Compact => ("  ", "- ", "- ", "  "),
        };

        let mut prefix = String::new();
        for &parent_last in parents {
            prefix.push_str(if parent_last { blank } else { branch });
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix
    }
}

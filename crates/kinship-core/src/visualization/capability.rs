//! Contract of the external rendering capability.

use crossbeam_channel::{Sender, TrySendError};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::relation::ParentRole;

/// Render-side handle for a node. Only the adapter can map it back to a
/// person.
///
/// A key is only meaningful for the scene it was issued with; once another
/// scene is published, keys from older scenes resolve to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey {
    /// Sequence number of the scene that issued the key.
    pub scene: u64,
    /// Position of the node within that scene.
    pub index: usize,
}

impl NodeKey {
    /// Creates a key for node `index` of scene `scene`.
    #[must_use]
    pub fn new(scene: u64, index: usize) -> Self {
        Self { scene, index }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.scene, self.index)
    }
}

/// A node as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    /// Handle reported back on clicks.
    pub key: NodeKey,
    /// Display label.
    pub label: String,
    /// Optional media reference for the node picture.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    /// Generation relative to the root.
    pub generation: i32,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

/// Kind of a rendered edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "role", rename_all = "lowercase")]
pub enum RenderEdgeKind {
    /// Parent to child, with the parent's role.
    Parent(ParentRole),
    /// Between spouses.
    Spouse,
}

/// An edge as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderEdge {
    /// Parent, or the first spouse.
    pub source: NodeKey,
    /// Child, or the second spouse.
    pub target: NodeKey,
    /// Edge kind.
    pub kind: RenderEdgeKind,
}

/// Drawable nodes and edges, the result of `compute_layout`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderScene {
    /// Nodes, generation then left to right.
    pub nodes: Vec<RenderNode>,
    /// Edges between the nodes.
    pub edges: Vec<RenderEdge>,
    /// Key of the current root.
    pub root: Option<NodeKey>,
}

/// Input for `compute_layout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRequest {
    /// Precomputed scene.
    pub scene: RenderScene,
    /// Spacing used for the scene.
    pub node_separation: f64,
    /// Spacing used for the scene.
    pub level_separation: f64,
}

/// Sending half of the click queue, handed to the renderer on each render.
#[derive(Debug, Clone)]
pub struct ClickSink {
    sender: Sender<NodeKey>,
}

impl ClickSink {
    pub(crate) fn new(sender: Sender<NodeKey>) -> Self {
        Self { sender }
    }

    /// Reports a click on a node. Returns false once the adapter is gone.
    pub fn click(&self, key: NodeKey) -> bool {
        match self.sender.try_send(key) {
            Ok(()) => true,
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => false,
        }
    }
}

/// External visualization capability.
///
/// Implementations draw what they are given; they receive copies only and
/// never see core-owned state.
pub trait RenderCapability {
    /// Drawable surface type.
    type Surface;

    /// Allocates a surface in `container`.
    fn create_surface(&mut self, container: &str) -> Result<Self::Surface>;

    /// Computes final positions for a request.
    ///
    /// The core already lays the tree out, so the default echoes the scene.
    fn compute_layout(&mut self, request: &LayoutRequest) -> Result<RenderScene> {
        Ok(request.scene.clone())
    }

    /// Draws the scene; clicks are reported through `on_click`.
    fn render(
        &mut self,
        scene: &RenderScene,
        surface: &mut Self::Surface,
        on_click: ClickSink,
    ) -> Result<()>;
}

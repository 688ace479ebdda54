//! Boundary between projections and the external renderer.

use crossbeam_channel::{Receiver, Sender};
use std::collections::HashMap;

use crate::config::KinshipConfig;
use crate::error::{Error, Result};
use crate::person::PersonId;
use crate::projection::{FamilyView, Layout, TreeProjector};
use crate::relation::Relationship;

use super::capability::{
    ClickSink, LayoutRequest, NodeKey, RenderCapability, RenderEdge, RenderEdgeKind, RenderNode,
    RenderScene,
};

/// What the adapter last handed to the renderer.
struct Published {
    /// Sequence number carried by every key of `scene`.
    scene_id: u64,
    layout: Layout,
    scene: RenderScene,
    /// `keys[k]` is the person behind key index `k`.
    keys: Vec<PersonId>,
}

/// Owns the renderer and its surface, publishes layouts and turns node
/// clicks into re-root requests.
///
/// The adapter holds no graph state: every call receives the family view it
/// should project.
pub struct VisualizationAdapter<R: RenderCapability> {
    renderer: R,
    surface: R::Surface,
    projector: TreeProjector,
    node_budget: usize,
    clicks_tx: Sender<NodeKey>,
    clicks_rx: Receiver<NodeKey>,
    /// Sequence number of the last scene handed to the renderer.
    scene_seq: u64,
    published: Option<Published>,
}

impl<R: RenderCapability> VisualizationAdapter<R> {
    /// Validates the config and allocates a surface in the configured
    /// container.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for invalid settings, or whatever the
    /// renderer reports while creating the surface.
    pub fn new(mut renderer: R, config: &KinshipConfig) -> Result<Self> {
        config.validate()?;
        let projector = TreeProjector::new(config.layout)?;
        let surface = renderer.create_surface(&config.adapter.container)?;
        let (clicks_tx, clicks_rx) = crossbeam_channel::unbounded();
        Ok(Self {
            renderer,
            surface,
            projector,
            node_budget: config.adapter.node_budget,
            clicks_tx,
            clicks_rx,
            scene_seq: 0,
            published: None,
        })
    }

    /// Projects from `root`, hands a copy to the renderer and returns the
    /// published layout.
    ///
    /// # Errors
    ///
    /// - `Error::UnknownRoot` if `root` is not registered.
    /// - `Error::LayoutBudget` if the layout exceeds the node budget.
    /// - `Error::Render` if the renderer returns a scene with unknown keys,
    ///   or any renderer error.
    pub fn show<V: FamilyView>(&mut self, view: &V, root: &PersonId) -> Result<&Layout> {
        let layout = self.projector.project(view, root)?;
        if layout.len() > self.node_budget {
            return Err(Error::LayoutBudget {
                nodes: layout.len(),
                budget: self.node_budget,
            });
        }

        // Fresh id per attempt, even one that fails below.
        self.scene_seq += 1;
        let scene_id = self.scene_seq;
        let (scene, keys) = translate(view, &layout, scene_id);
        let request = LayoutRequest {
            scene,
            node_separation: self.projector.config().node_separation,
            level_separation: self.projector.config().level_separation,
        };
        let scene = self.renderer.compute_layout(&request)?;
        check_scene(&scene, scene_id, keys.len())?;

        self.renderer.render(
            &scene,
            &mut self.surface,
            ClickSink::new(self.clicks_tx.clone()),
        )?;

        tracing::debug!(root = %root, nodes = scene.nodes.len(), edges = scene.edges.len(), "layout published");
        let published = self.published.insert(Published {
            scene_id,
            layout,
            scene,
            keys,
        });
        Ok(&published.layout)
    }

    /// Maps a render-side key to the person it stands for in the current
    /// scene. Keys issued with an earlier scene resolve to `None`.
    #[must_use]
    pub fn resolve(&self, key: NodeKey) -> Option<&PersonId> {
        let published = self.published.as_ref()?;
        if key.scene != published.scene_id {
            return None;
        }
        published.keys.get(key.index)
    }

    /// Re-roots on the clicked node and republishes.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the key is not part of the current
    /// scene (including keys from a superseded scene), otherwise as
    /// [`show`](Self::show).
    pub fn handle_click<V: FamilyView>(&mut self, view: &V, key: NodeKey) -> Result<&Layout> {
        let id = self
            .resolve(key)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("node key {key}")))?;
        tracing::debug!(%key, person = %id, "re-rooting on click");
        self.show(view, &id)
    }

    /// Applies queued clicks in order and returns how many re-rooted.
    ///
    /// Every queued key is first resolved against the scene on screen when
    /// the pump starts. Keys from an earlier scene, or unknown to the
    /// current one, are dropped. The remaining clicks are then applied one
    /// after another.
    ///
    /// # Errors
    ///
    /// Stops at the first failing re-root (see [`show`](Self::show)); clicks
    /// applied before it stay in effect.
    pub fn pump_clicks<V: FamilyView>(&mut self, view: &V) -> Result<usize> {
        let pending: Vec<NodeKey> = self.clicks_rx.try_iter().collect();
        let targets: Vec<PersonId> = pending
            .into_iter()
            .filter_map(|key| {
                let target = self.resolve(key).cloned();
                if target.is_none() {
                    tracing::debug!(%key, "stale or unknown click dropped");
                }
                target
            })
            .collect();

        for id in &targets {
            self.show(view, id)?;
        }
        Ok(targets.len())
    }

    /// Returns a sink that queues clicks for [`pump_clicks`](Self::pump_clicks).
    #[must_use]
    pub fn click_sink(&self) -> ClickSink {
        ClickSink::new(self.clicks_tx.clone())
    }

    /// Returns the last published layout.
    #[must_use]
    pub fn current_layout(&self) -> Option<&Layout> {
        self.published.as_ref().map(|p| &p.layout)
    }

    /// Returns the last scene handed to the renderer.
    #[must_use]
    pub fn current_scene(&self) -> Option<&RenderScene> {
        self.published.as_ref().map(|p| &p.scene)
    }

    /// Returns the root of the last published layout.
    #[must_use]
    pub fn current_root(&self) -> Option<&PersonId> {
        self.current_layout().map(|l| &l.root)
    }

    /// Returns the renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Returns the surface.
    #[must_use]
    pub fn surface(&self) -> &R::Surface {
        &self.surface
    }
}

/// Copies a layout into the renderer's shape. `keys[k]` is the person
/// behind key index `k` of scene `scene_id`.
fn translate<V: FamilyView>(
    view: &V,
    layout: &Layout,
    scene_id: u64,
) -> (RenderScene, Vec<PersonId>) {
    let keys: Vec<PersonId> = layout.nodes.iter().map(|n| n.person_id.clone()).collect();
    let key_of: HashMap<&PersonId, NodeKey> = keys
        .iter()
        .enumerate()
        .map(|(k, id)| (id, NodeKey::new(scene_id, k)))
        .collect();

    let nodes = layout
        .nodes
        .iter()
        .enumerate()
        .map(|(k, n)| {
            let person = view.person(&n.person_id);
            RenderNode {
                key: NodeKey::new(scene_id, k),
                label: person.map_or_else(|| n.person_id.to_string(), |p| p.name().to_string()),
                media: person.and_then(|p| p.media().map(str::to_string)),
                generation: n.generation,
                x: n.x,
                y: n.y,
            }
        })
        .collect();

    let edges = layout
        .edges
        .iter()
        .filter_map(|edge| {
            let (source, target, kind) = match edge {
                Relationship::Parent {
                    parent,
                    child,
                    role,
                } => (parent, child, RenderEdgeKind::Parent(*role)),
                Relationship::Spouse { a, b } => (a, b, RenderEdgeKind::Spouse),
            };
            Some(RenderEdge {
                source: *key_of.get(source)?,
                target: *key_of.get(target)?,
                kind,
            })
        })
        .collect();

    let root = key_of.get(&layout.root).copied();
    (RenderScene { nodes, edges, root }, keys)
}

/// Rejects scenes that reference keys the adapter never issued.
fn check_scene(scene: &RenderScene, scene_id: u64, key_count: usize) -> Result<()> {
    let valid = |key: NodeKey| key.scene == scene_id && key.index < key_count;
    let nodes_ok = scene.nodes.iter().all(|n| valid(n.key));
    let edges_ok = scene
        .edges
        .iter()
        .all(|e| valid(e.source) && valid(e.target));
    let root_ok = scene.root.is_none_or(valid);
    if nodes_ok && edges_ok && root_ok {
        Ok(())
    } else {
        Err(Error::Render(
            "renderer returned a scene with unknown node keys".to_string(),
        ))
    }
}

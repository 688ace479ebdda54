//! Visualization boundary: hands layouts to an external renderer and turns
//! node clicks back into re-root requests.
//!
//! # Example
//!
//! ```rust
//! use kinship_core::visualization::{
//!     ClickSink, RenderCapability, RenderScene, VisualizationAdapter,
//! };
//! use kinship_core::{FamilyTree, KinshipConfig, ParentRole, Person, Result};
//!
//! #[derive(Default)]
//! struct Recorder {
//!     sink: Option<ClickSink>,
//! }
//!
//! impl RenderCapability for Recorder {
//!     type Surface = Vec<RenderScene>;
//!
//!     fn create_surface(&mut self, _container: &str) -> Result<Self::Surface> {
//!         Ok(Vec::new())
//!     }
//!
//!     fn render(&mut self, scene: &RenderScene, surface: &mut Self::Surface, on_click: ClickSink) -> Result<()> {
//!         surface.push(scene.clone());
//!         self.sink = Some(on_click);
//!         Ok(())
//!     }
//! }
//!
//! let mut tree = FamilyTree::new();
//! tree.add_person(Person::new("a", "Anna")).unwrap();
//! tree.add_person(Person::new("b", "Bert")).unwrap();
//! tree.add_parent_edge(&"a".into(), &"b".into(), ParentRole::Mother).unwrap();
//!
//! let mut adapter = VisualizationAdapter::new(Recorder::default(), &KinshipConfig::default()).unwrap();
//! adapter.show(&tree, &"a".into()).unwrap();
//!
//! // The renderer reports a click on Bert's node; the adapter re-roots.
//! let bert = adapter.current_scene().unwrap().nodes[1].key;
//! adapter.renderer().sink.as_ref().unwrap().click(bert);
//! assert_eq!(adapter.pump_clicks(&tree).unwrap(), 1);
//! assert_eq!(adapter.current_root().unwrap().as_str(), "b");
//! assert_eq!(adapter.surface().len(), 2);
//! ```

mod adapter;
mod capability;


pub use adapter::VisualizationAdapter;
pub use capability::{
    ClickSink, LayoutRequest, NodeKey, RenderCapability, RenderEdge, RenderEdgeKind, RenderNode,
    RenderScene,
};

//! Plain-text renderer: one line per generation, spouses joined with `=`.

use kinship_core::visualization::{ClickSink, RenderCapability, RenderEdgeKind, RenderScene};
use kinship_core::{NodeKey, Result};

/// Frames drawn so far, oldest first.
#[derive(Debug, Default)]
pub struct TextSurface {
    pub container: String,
    pub frames: Vec<String>,
}

/// Draws scenes as text and keeps the latest click sink so callers can
/// simulate clicks.
#[derive(Debug, Default)]
pub struct TextRenderer {
    sink: Option<ClickSink>,
}

impl TextRenderer {
    /// Reports a click on `key`. Returns false before the first render.
    pub fn click(&self, key: NodeKey) -> bool {
        self.sink.as_ref().is_some_and(|sink| sink.click(key))
    }
}

impl RenderCapability for TextRenderer {
    type Surface = TextSurface;

    fn create_surface(&mut self, container: &str) -> Result<Self::Surface> {
        Ok(TextSurface {
            container: container.to_string(),
            frames: Vec::new(),
        })
    }

    fn render(
        &mut self,
        scene: &RenderScene,
        surface: &mut Self::Surface,
        on_click: ClickSink,
    ) -> Result<()> {
        surface.frames.push(draw(scene));
        self.sink = Some(on_click);
        Ok(())
    }
}

fn draw(scene: &RenderScene) -> String {
    let spouse_of = |left: NodeKey, right: NodeKey| {
        scene.edges.iter().any(|e| {
            e.kind == RenderEdgeKind::Spouse
                && ((e.source == left && e.target == right)
                    || (e.source == right && e.target == left))
        })
    };

    let mut lines = Vec::new();
    let mut index = 0;
    while index < scene.nodes.len() {
        let generation = scene.nodes[index].generation;
        let mut line = format!("{generation:>+4} |");
        let mut previous: Option<NodeKey> = None;

        while index < scene.nodes.len() && scene.nodes[index].generation == generation {
            let node = &scene.nodes[index];
            let joiner = match previous {
                Some(prev) if spouse_of(prev, node.key) => " = ",
                Some(_) => "   ",
                None => " ",
            };
            let marker = if scene.root == Some(node.key) { "*" } else { "" };
            line.push_str(joiner);
            line.push_str(&format!("[{}{}]", marker, node.label));
            previous = Some(node.key);
            index += 1;
        }
        lines.push(line);
    }

    let children = scene
        .edges
        .iter()
        .filter(|e| matches!(e.kind, RenderEdgeKind::Parent(_)))
        .count();
    lines.push(format!(
        "     {} person(s), {} parent link(s)",
        scene.nodes.len(),
        children
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_core::visualization::{RenderEdge, RenderNode};
    use kinship_core::ParentRole;

    fn node(key: usize, label: &str, generation: i32) -> RenderNode {
        RenderNode {
            key: NodeKey::new(1, key),
            label: label.to_string(),
            media: None,
            generation,
            x: 0.0,
            y: 0.0,
        }
    }

    #[test]
    fn test_draw_marks_root_and_spouses() {
        let scene = RenderScene {
            nodes: vec![node(0, "Anna", -1), node(1, "Bert", -1), node(2, "Cleo", 0)],
            edges: vec![
                RenderEdge {
                    source: NodeKey::new(1, 0),
                    target: NodeKey::new(1, 1),
                    kind: RenderEdgeKind::Spouse,
                },
                RenderEdge {
                    source: NodeKey::new(1, 0),
                    target: NodeKey::new(1, 2),
                    kind: RenderEdgeKind::Parent(ParentRole::Mother),
                },
            ],
            root: Some(NodeKey::new(1, 2)),
        };

        let text = draw(&scene);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  -1 | [Anna] = [Bert]");
        assert_eq!(lines[1], "  +0 | [*Cleo]");
        assert!(lines[2].contains("3 person(s), 1 parent link(s)"));
    }

    #[test]
    fn test_click_before_render_is_ignored() {
        let renderer = TextRenderer::default();
        assert!(!renderer.click(NodeKey::new(1, 0)));
    }
}

//! Subcommand handlers.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

use kinship_core::{
    FamilyTree, KinshipConfig, Layout, PersonId, TreeProjector, VisualizationAdapter,
};

use crate::render::TextRenderer;

/// How `project` prints the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON layout.
    Json,
    /// One table row per placed person.
    Table,
}

fn load_tree(file: &Path) -> Result<FamilyTree> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    FamilyTree::from_json(&json).with_context(|| format!("loading {}", file.display()))
}

pub fn cmd_validate(file: &Path) -> Result<()> {
    let tree = load_tree(file)?;
    println!(
        "{} {} person(s), {} relationship(s)",
        "Valid:".green().bold(),
        tree.person_count(),
        tree.edge_count()
    );
    Ok(())
}

pub fn cmd_project(
    file: &Path,
    root: &str,
    format: OutputFormat,
    config: &KinshipConfig,
) -> Result<()> {
    let tree = load_tree(file)?;
    let projector = TreeProjector::new(config.layout)?;
    let layout = tree.project_with(&projector, &PersonId::from(root))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&layout)?),
        OutputFormat::Table => print_layout_table(&tree, &layout),
    }
    Ok(())
}

fn print_layout_table(tree: &FamilyTree, layout: &Layout) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Generation", "Id", "Name", "X", "Y"]);
    for node in &layout.nodes {
        let name = tree
            .get_person(&node.person_id)
            .map(|p| p.name().to_string())
            .unwrap_or_default();
        table.add_row(vec![
            node.generation.to_string(),
            node.person_id.to_string(),
            name,
            format!("{:.1}", node.x),
            format!("{:.1}", node.y),
        ]);
    }
    println!("{} {}", "Root:".bold(), layout.root.as_str().green());
    println!("{table}");
    println!("{} relationship(s) shown", layout.edges.len());
}

pub fn cmd_render(
    file: &Path,
    root: &str,
    clicks: &[String],
    config: &KinshipConfig,
) -> Result<()> {
    let tree = load_tree(file)?;
    let mut adapter = VisualizationAdapter::new(TextRenderer::default(), config)?;
    println!(
        "{} '{}'",
        "Rendering into".bold(),
        adapter.surface().container
    );

    adapter.show(&tree, &PersonId::from(root))?;
    print_last_frame(&adapter);

    for target in clicks {
        let target = PersonId::from(target.as_str());
        let key = adapter
            .current_scene()
            .and_then(|scene| {
                scene
                    .nodes
                    .iter()
                    .map(|n| n.key)
                    .find(|&k| adapter.resolve(k) == Some(&target))
            })
            .ok_or_else(|| anyhow!("'{target}' is not on screen"))?;

        if !adapter.renderer().click(key) {
            bail!("click queue closed");
        }
        adapter.pump_clicks(&tree)?;
        println!("{} {}", "Clicked".cyan(), target);
        print_last_frame(&adapter);
    }
    Ok(())
}

fn print_last_frame(adapter: &VisualizationAdapter<TextRenderer>) {
    if let Some(frame) = adapter.surface().frames.last() {
        println!("{frame}");
    }
}

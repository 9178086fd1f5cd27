//! Write the sample composition: two bounded lower-third layers and a reveal.

use std::path::PathBuf;

use gtcompose_common::config::ComposeConfig;
use gtcompose_common::error::GtResult;
use gtcompose_export::Project;
use gtcompose_model::{
    Animation, AutoSize, Colour, Layout, Margin, SceneObject, Storyboard, TextAttribute,
    TextProperties,
};

const BODY_TEXT: &str = "Lorem ipsum dolor sit amet consectetur adipisicing elit. \
    Voluptatum facilis nobis earum eos ipsa consectetur incidunt vitae beatae soluta \
    nihil doloremque, est esse debitis.";

pub fn run(
    config: &ComposeConfig,
    output: Option<PathBuf>,
    width: u32,
    height: u32,
    dump: bool,
) -> anyhow::Result<()> {
    let output = output.unwrap_or_else(|| config.package_path("basic_example"));
    println!("Writing sample composition to {}", output.display());

    let project = Project::new(width, height, &output)
        .map_err(|e| anyhow::anyhow!("Invalid canvas: {e}"))?
        .with_settings(config.export.clone());
    let summary = project
        .finish_with(|project| {
            build(project)?;
            if dump {
                println!("{}", serde_json::to_string_pretty(project.composition())?);
            }
            Ok(Summary::of(project))
        })
        .map_err(|e| anyhow::anyhow!("Failed to write sample: {e}"))?;

    println!("Package written:");
    println!("  Path: {}", output.display());
    println!("  Canvas: {}x{}", width, height);
    println!("  Layers: {}", summary.layers);
    println!("  Objects: {}", summary.objects);
    println!("  Storyboards: {}", summary.storyboards);

    Ok(())
}

struct Summary {
    layers: usize,
    objects: usize,
    storyboards: usize,
}

impl Summary {
    fn of(project: &Project) -> Self {
        let composition = project.composition();
        Self {
            layers: composition.layers().len(),
            objects: composition.objects().count(),
            storyboards: composition.storyboards().len(),
        }
    }
}

/// Populate `project` with the sample layers and storyboard.
pub fn build(project: &mut Project) -> GtResult<()> {
    let white = Colour::from_hex("#E7E7ED")?;
    let black = Colour::from_hex("#232325")?;
    let red = Colour::from_hex("#FF2300")?;
    let base = TextProperties::new("Century Gothic", 90.0)?;

    let mut layout = project.layout();
    layout.pad(60);
    let mut lower_third = Layout::new(layout.take_from_bottom(240));
    let title_frame = lower_third.take_from_top(120);
    let body_frame = lower_third.take_from_top(100).inset(&Margin::uniform(16));

    let title_props = base.with_attributes([
        TextAttribute::AutoSize(AutoSize::WidthAndHeight),
        TextAttribute::FontWeight("Bold".to_string()),
    ])?;
    let layer = project.create_layer("Layer 1")?;
    layer.add_rectangle("Rect 1", title_frame).set_fill(red);
    layer
        .add_text_block("Text 1", title_frame, "HERE WE ARE", title_props)
        .set_fill(white);
    if let Some(rect) = layer.object_mut("Rect 1") {
        rect.set_bounding("Text 1", 15);
    }

    let body_props = base.with_attribute(TextAttribute::FontSize(30.0))?;
    let layer = project.create_layer("Layer 2")?;
    layer.add_rectangle("Rect 2", body_frame).set_fill(white.with_alpha(0.8)?);
    layer
        .add_text_block("Text 2", body_frame, BODY_TEXT, body_props)
        .set_fill(black);
    if let Some(rect) = layer.object_mut("Rect 2") {
        rect.set_bounding("Text 2", 15);
    }

    let mut storyboard = Storyboard::transition_in();
    storyboard
        .append(Animation::reveal("Rect 1", 0.0, 2.0)?)
        .append(Animation::reveal("Text 1", 1.0, 2.0)?);
    project.add_storyboard(storyboard);

    Ok(())
}

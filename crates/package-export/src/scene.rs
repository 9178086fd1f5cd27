//! Turns a [`Composition`] into the `document.xml` element tree.
//!
//! Bounding relations and animation targets are name references. They are
//! resolved here against an index of every object in the composition, which
//! is the first point where the whole graph is known.

use std::collections::{HashMap, HashSet};

use gtcompose_common::error::{GtError, GtResult};
use gtcompose_model::{
    Animation, Composition, Frame, Layer, SceneObject, Storyboard, TextBlock, VisualObject,
};
use tracing::{debug, warn};

use crate::xml::XmlElement;

/// Objects by name. The first object in paint order wins on a clash.
pub struct ObjectIndex<'a> {
    by_name: HashMap<&'a str, &'a VisualObject>,
}

impl<'a> ObjectIndex<'a> {
    pub fn build(composition: &'a Composition) -> Self {
        let mut by_name = HashMap::new();
        for object in composition.objects() {
            if by_name.contains_key(object.name()) {
                warn!(
                    object = object.name(),
                    "Duplicate object name, references resolve to the first one"
                );
                continue;
            }
            by_name.insert(object.name(), object);
        }
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&'a VisualObject> {
        self.by_name.get(name).copied()
    }
}

/// Computes exported frames, following bounding chains.
pub struct FrameResolver<'a> {
    index: ObjectIndex<'a>,
    resolved: HashMap<&'a str, Frame>,
}

impl<'a> FrameResolver<'a> {
    pub fn new(index: ObjectIndex<'a>) -> Self {
        Self {
            index,
            resolved: HashMap::new(),
        }
    }

    pub fn index(&self) -> &ObjectIndex<'a> {
        &self.index
    }

    /// Frame written for `object`.
    ///
    /// Without a bounding relation this is the object's own frame. With one,
    /// it is the target's exported frame grown by the margin.
    pub fn frame_of(&mut self, object: &'a VisualObject) -> GtResult<Frame> {
        let mut visiting = HashSet::new();
        self.resolve(object, &mut visiting)
    }

    fn resolve(
        &mut self,
        object: &'a VisualObject,
        visiting: &mut HashSet<&'a str>,
    ) -> GtResult<Frame> {
        let Some(bounding) = object.bounding() else {
            return Ok(object.frame());
        };
        let name = object.name();
        if let Some(frame) = self.resolved.get(name) {
            return Ok(*frame);
        }
        if !visiting.insert(name) {
            return Err(GtError::cyclic(name));
        }

        let target = self
            .index
            .get(bounding.target.name())
            .ok_or_else(|| GtError::unresolved(bounding.target.name(), name))?;
        let frame = self.resolve(target, visiting)?.expand(&bounding.margin);

        visiting.remove(name);
        self.resolved.insert(name, frame);
        Ok(frame)
    }
}

/// Build the root `Composition` element.
pub fn composition_element(composition: &Composition) -> GtResult<XmlElement> {
    let mut resolver = FrameResolver::new(ObjectIndex::build(composition));
    let mut root = XmlElement::new("Composition")
        .attr("Width", composition.width())
        .attr("Height", composition.height());

    for layer in composition.layers() {
        root.push(layer_element(layer, &mut resolver)?);
    }
    for storyboard in composition.storyboards() {
        root.push(storyboard_element(storyboard, resolver.index())?);
    }
    Ok(root)
}

fn layer_element<'a>(layer: &'a Layer, resolver: &mut FrameResolver<'a>) -> GtResult<XmlElement> {
    debug!(layer = layer.name(), objects = layer.len(), "Serializing layer");
    let frame = layer.frame();

    let mut inner = XmlElement::new("Composition")
        .attr("Width", frame.width)
        .attr("Height", frame.height);
    for object in layer.objects() {
        inner.push(object_element(object, resolver)?);
    }

    Ok(XmlElement::new("Layer")
        .attr("Name", layer.name())
        .attr("Location", frame.location_attr())
        .attr("Dimensions", frame.dimensions_attr())
        .attr("Locked", bool_attr(layer.locked()))
        .child(XmlElement::new("Layer.Composition").child(inner)))
}

fn object_element<'a>(
    object: &'a VisualObject,
    resolver: &mut FrameResolver<'a>,
) -> GtResult<XmlElement> {
    let tag = object.tag();
    let frame = resolver.frame_of(object)?;

    let mut element = XmlElement::new(tag)
        .attr("Name", object.name())
        .attr("Dimensions", frame.dimensions_attr())
        .attr("Location", frame.location_attr());
    if let VisualObject::TextBlock(block) = object {
        element = text_attributes(element, block);
    }

    if let Some(bounding) = object.bounding() {
        element.push(
            XmlElement::new(format!("{tag}.Bounding")).child(
                XmlElement::new("Bounding")
                    .attr("Object", bounding.target.name())
                    .attr("Padding", bounding.margin),
            ),
        );
    }
    element.push(brush(format!("{tag}.Fill"), object.fill()));
    element.push(brush(format!("{tag}.Stroke"), object.stroke()));
    Ok(element)
}

fn text_attributes(element: XmlElement, block: &TextBlock) -> XmlElement {
    let props = block.properties();
    element
        .attr("DataFlags", "ShowVisible")
        .attr("Text", block.text())
        .attr("FontFamily", props.font_family())
        .attr("FontSize", props.font_size())
        .attr_opt("FontWeight", props.font_weight())
        .attr("TextAlign", props.text_align())
        .attr_opt("VerticalAlign", props.vertical_align())
        .attr_opt("TextWordWrapping", props.word_wrapping())
        .attr_opt("IgnoreOverhang", props.ignore_overhang().map(bool_attr))
        .attr_opt("LineSpacing", props.line_spacing())
        .attr_opt("AutoSize", props.auto_size())
}

fn brush(wrapper: String, colour: gtcompose_model::Colour) -> XmlElement {
    XmlElement::new(wrapper).child(XmlElement::new("Brush").attr("Color", colour))
}

fn storyboard_element(storyboard: &Storyboard, index: &ObjectIndex<'_>) -> GtResult<XmlElement> {
    debug!(
        kind = storyboard.kind().as_str(),
        animations = storyboard.len(),
        "Serializing storyboard"
    );
    let mut animations = XmlElement::new("Storyboard.Animations");
    for animation in storyboard.animations() {
        if index.get(animation.target().name()).is_none() {
            return Err(GtError::unresolved(
                animation.target().name(),
                format!("{} animation", animation.kind().tag()),
            ));
        }
        animations.push(animation_element(animation));
    }

    Ok(XmlElement::new("Storyboard")
        .attr("Type", storyboard.kind().as_str())
        .child(animations))
}

/// Each kind only carries the attributes the consuming application reads
/// for it.
fn animation_element(animation: &Animation) -> XmlElement {
    let kind = animation.kind();
    let mut element = XmlElement::new(kind.tag())
        .attr("Object", animation.target().name())
        .attr("Delay", animation.start())
        .attr("Duration", animation.duration());

    if kind.uses_interpolation() {
        element = element.attr("Interpolation", animation.interpolation());
    }
    if kind.uses_direction() {
        element = element.attr("Direction", animation.direction());
    }
    if kind.uses_center_axis() {
        element = element.attr("CenterAxis", animation.center_axis());
    }
    if kind.uses_reverse() {
        element = element.attr_opt("Reverse", animation.reverse().map(bool_attr));
    }
    element
}

fn bool_attr(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

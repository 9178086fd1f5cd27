//! Layers: named, ordered groups of objects.

use serde::Serialize;

use crate::geometry::Frame;
use crate::object::{SceneObject, Shape, ShapeKind, TextBlock, VisualObject};
use crate::text::TextProperties;

/// A named group of objects inside a composition.
///
/// Objects are painted in insertion order: the first appended object is at
/// the bottom. Layers are created through
/// [`Composition::create_layer`](crate::Composition::create_layer).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    name: String,
    frame: Frame,
    locked: bool,
    objects: Vec<VisualObject>,
}

impl Layer {
    pub(crate) fn new(name: String, frame: Frame) -> Self {
        Self {
            name,
            frame,
            locked: false,
            objects: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) -> &mut Self {
        self.locked = locked;
        self
    }

    /// Add an object on top of everything already in the layer.
    pub fn append(&mut self, object: impl Into<VisualObject>) -> &mut Self {
        self.objects.push(object.into());
        self
    }

    /// Append a new shape and return it for further styling.
    pub fn add_shape(
        &mut self,
        kind: ShapeKind,
        name: impl Into<String>,
        frame: impl Into<Frame>,
    ) -> &mut VisualObject {
        self.push(Shape::new(kind, name, frame).into())
    }

    pub fn add_rectangle(
        &mut self,
        name: impl Into<String>,
        frame: impl Into<Frame>,
    ) -> &mut VisualObject {
        self.add_shape(ShapeKind::Rectangle, name, frame)
    }

    pub fn add_ellipse(
        &mut self,
        name: impl Into<String>,
        frame: impl Into<Frame>,
    ) -> &mut VisualObject {
        self.add_shape(ShapeKind::Ellipse, name, frame)
    }

    pub fn add_triangle(
        &mut self,
        name: impl Into<String>,
        frame: impl Into<Frame>,
    ) -> &mut VisualObject {
        self.add_shape(ShapeKind::Triangle, name, frame)
    }

    /// Append a new text block and return it for further styling.
    pub fn add_text_block(
        &mut self,
        name: impl Into<String>,
        frame: impl Into<Frame>,
        text: impl Into<String>,
        properties: TextProperties,
    ) -> &mut VisualObject {
        self.push(TextBlock::new(name, frame, text, properties).into())
    }

    fn push(&mut self, object: VisualObject) -> &mut VisualObject {
        self.objects.push(object);
        let index = self.objects.len() - 1;
        &mut self.objects[index]
    }

    /// Objects in paint order.
    pub fn objects(&self) -> &[VisualObject] {
        &self.objects
    }

    /// First object with the given name.
    pub fn object(&self, name: &str) -> Option<&VisualObject> {
        self.objects.iter().find(|o| o.name() == name)
    }

    pub fn object_mut(&mut self, name: &str) -> Option<&mut VisualObject> {
        self.objects.iter_mut().find(|o| o.name() == name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

//! Visual objects placed on layers: shapes and text blocks.

use serde::{Deserialize, Serialize};

use crate::colour::Colour;
use crate::geometry::{Frame, Margin};
use crate::text::TextProperties;

/// Capabilities shared by everything that can sit on a layer.
pub trait SceneObject {
    fn name(&self) -> &str;

    fn frame(&self) -> Frame;

    fn fill(&self) -> Colour;

    fn set_fill(&mut self, colour: Colour);

    fn stroke(&self) -> Colour;

    fn set_stroke(&mut self, colour: Colour);

    fn bounding(&self) -> Option<&Bounding>;

    /// Size this object around `target` plus `margin`.
    ///
    /// Only the target's name is kept; it is looked up when the composition
    /// is exported.
    fn set_bounding(&mut self, target: impl Into<ObjectRef>, margin: impl Into<Margin>);

    fn clear_bounding(&mut self);
}

/// Name of an object elsewhere in the same composition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectRef(String);

impl ObjectRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ObjectRef {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&Shape> for ObjectRef {
    fn from(shape: &Shape) -> Self {
        Self::new(shape.name())
    }
}

impl From<&TextBlock> for ObjectRef {
    fn from(block: &TextBlock) -> Self {
        Self::new(block.name())
    }
}

impl From<&VisualObject> for ObjectRef {
    fn from(object: &VisualObject) -> Self {
        Self::new(object.name())
    }
}

impl From<&mut Shape> for ObjectRef {
    fn from(shape: &mut Shape) -> Self {
        Self::new(shape.name())
    }
}

impl From<&mut TextBlock> for ObjectRef {
    fn from(block: &mut TextBlock) -> Self {
        Self::new(block.name())
    }
}

/// "Size me around that object" relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounding {
    pub target: ObjectRef,
    pub margin: Margin,
}

/// Geometric primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Triangle,
}

impl ShapeKind {
    /// Element name in the package format.
    pub fn tag(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Triangle => "Triangle",
        }
    }
}

/// Properties every object carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct ObjectCore {
    name: String,
    frame: Frame,
    fill: Colour,
    stroke: Colour,
    bounding: Option<Bounding>,
}

impl ObjectCore {
    fn new(name: String, frame: Frame) -> Self {
        Self {
            name,
            frame,
            fill: Colour::TRANSPARENT,
            stroke: Colour::TRANSPARENT,
            bounding: None,
        }
    }
}

/// A rectangle, ellipse, or triangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    kind: ShapeKind,
    #[serde(flatten)]
    core: ObjectCore,
}

impl Shape {
    pub fn new(kind: ShapeKind, name: impl Into<String>, frame: impl Into<Frame>) -> Self {
        Self {
            kind,
            core: ObjectCore::new(name.into(), frame.into()),
        }
    }

    pub fn rectangle(name: impl Into<String>, frame: impl Into<Frame>) -> Self {
        Self::new(ShapeKind::Rectangle, name, frame)
    }

    pub fn ellipse(name: impl Into<String>, frame: impl Into<Frame>) -> Self {
        Self::new(ShapeKind::Ellipse, name, frame)
    }

    pub fn triangle(name: impl Into<String>, frame: impl Into<Frame>) -> Self {
        Self::new(ShapeKind::Triangle, name, frame)
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Builder: set fill.
    pub fn with_fill(mut self, colour: Colour) -> Self {
        self.core.fill = colour;
        self
    }
}

/// A block of text styled by [`TextProperties`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    #[serde(flatten)]
    core: ObjectCore,
    text: String,
    properties: TextProperties,
}

impl TextBlock {
    pub fn new(
        name: impl Into<String>,
        frame: impl Into<Frame>,
        text: impl Into<String>,
        properties: TextProperties,
    ) -> Self {
        Self {
            core: ObjectCore::new(name.into(), frame.into()),
            text: text.into(),
            properties,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn properties(&self) -> &TextProperties {
        &self.properties
    }

    pub fn set_properties(&mut self, properties: TextProperties) {
        self.properties = properties;
    }

    /// Builder: set fill.
    pub fn with_fill(mut self, colour: Colour) -> Self {
        self.core.fill = colour;
        self
    }
}

macro_rules! impl_scene_object {
    ($ty:ty) => {
        impl SceneObject for $ty {
            fn name(&self) -> &str {
                &self.core.name
            }

            fn frame(&self) -> Frame {
                self.core.frame
            }

            fn fill(&self) -> Colour {
                self.core.fill
            }

            fn set_fill(&mut self, colour: Colour) {
                self.core.fill = colour;
            }

            fn stroke(&self) -> Colour {
                self.core.stroke
            }

            fn set_stroke(&mut self, colour: Colour) {
                self.core.stroke = colour;
            }

            fn bounding(&self) -> Option<&Bounding> {
                self.core.bounding.as_ref()
            }

            fn set_bounding(&mut self, target: impl Into<ObjectRef>, margin: impl Into<Margin>) {
                self.core.bounding = Some(Bounding {
                    target: target.into(),
                    margin: margin.into(),
                });
            }

            fn clear_bounding(&mut self) {
                self.core.bounding = None;
            }
        }
    };
}

impl_scene_object!(Shape);
impl_scene_object!(TextBlock);

/// Anything that can be appended to a layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisualObject {
    Shape(Shape),
    TextBlock(TextBlock),
}

impl VisualObject {
    /// Element name in the package format.
    pub fn tag(&self) -> &'static str {
        match self {
            VisualObject::Shape(shape) => shape.kind.tag(),
            VisualObject::TextBlock(_) => "TextBlock",
        }
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            VisualObject::Shape(shape) => Some(shape),
            VisualObject::TextBlock(_) => None,
        }
    }

    pub fn as_text_block(&self) -> Option<&TextBlock> {
        match self {
            VisualObject::TextBlock(block) => Some(block),
            VisualObject::Shape(_) => None,
        }
    }

    pub fn as_text_block_mut(&mut self) -> Option<&mut TextBlock> {
        match self {
            VisualObject::TextBlock(block) => Some(block),
            VisualObject::Shape(_) => None,
        }
    }

    fn core(&self) -> &ObjectCore {
        match self {
            VisualObject::Shape(shape) => &shape.core,
            VisualObject::TextBlock(block) => &block.core,
        }
    }

    fn core_mut(&mut self) -> &mut ObjectCore {
        match self {
            VisualObject::Shape(shape) => &mut shape.core,
            VisualObject::TextBlock(block) => &mut block.core,
        }
    }
}

impl SceneObject for VisualObject {
    fn name(&self) -> &str {
        &self.core().name
    }

    fn frame(&self) -> Frame {
        self.core().frame
    }

    fn fill(&self) -> Colour {
        self.core().fill
    }

    fn set_fill(&mut self, colour: Colour) {
        self.core_mut().fill = colour;
    }

    fn stroke(&self) -> Colour {
        self.core().stroke
    }

    fn set_stroke(&mut self, colour: Colour) {
        self.core_mut().stroke = colour;
    }

    fn bounding(&self) -> Option<&Bounding> {
        self.core().bounding.as_ref()
    }

    fn set_bounding(&mut self, target: impl Into<ObjectRef>, margin: impl Into<Margin>) {
        self.core_mut().bounding = Some(Bounding {
            target: target.into(),
            margin: margin.into(),
        });
    }

    fn clear_bounding(&mut self) {
        self.core_mut().bounding = None;
    }
}

impl From<Shape> for VisualObject {
    fn from(shape: Shape) -> Self {
        VisualObject::Shape(shape)
    }
}

impl From<TextBlock> for VisualObject {
    fn from(block: TextBlock) -> Self {
        VisualObject::TextBlock(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_objects_are_transparent() {
        let rect = Shape::rectangle("R1", (0, 0, 100, 100));
        assert_eq!(rect.fill(), Colour::TRANSPARENT);
        assert_eq!(rect.stroke(), Colour::TRANSPARENT);
        assert!(rect.bounding().is_none());
    }

    #[test]
    fn test_set_fill_only_touches_receiver() {
        let mut a = Shape::rectangle("A", (0, 0, 10, 10));
        let b = a.clone();
        a.set_fill(Colour::RED);
        assert_eq!(a.fill(), Colour::RED);
        assert_eq!(b.fill(), Colour::TRANSPARENT);
    }

    #[test]
    fn test_set_bounding_stores_name_only() {
        let props = TextProperties::new("Arial", 20.0).unwrap();
        let text = TextBlock::new("T1", (10, 10, 50, 20), "HELLO", props);
        let mut rect = Shape::rectangle("R1", (0, 0, 100, 100));
        rect.set_bounding(&text, 15);

        let bounding = rect.bounding().unwrap();
        assert_eq!(bounding.target.name(), "T1");
        assert_eq!(bounding.margin, Margin::uniform(15));

        rect.clear_bounding();
        assert!(rect.bounding().is_none());
    }

    #[test]
    fn test_visual_object_dispatch() {
        let mut object: VisualObject = Shape::ellipse("E", (1, 2, 3, 4)).into();
        assert_eq!(object.tag(), "Ellipse");
        assert_eq!(object.frame(), Frame::new(1, 2, 3, 4));
        object.set_fill(Colour::BLUE);
        assert_eq!(object.as_shape().unwrap().fill(), Colour::BLUE);
        assert!(object.as_text_block().is_none());
    }
}

//! The composition root: canvas size, layers, storyboards.

use gtcompose_common::error::{GtError, GtResult};
use serde::Serialize;
use tracing::debug;

use crate::geometry::Frame;
use crate::layer::Layer;
use crate::object::{SceneObject, VisualObject};
use crate::storyboard::Storyboard;

/// Everything that ends up in `document.xml`.
///
/// Layer names are unique within a composition. Object names are not
/// enforced to be unique, but references resolve to the first match in
/// paint order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    width: u32,
    height: u32,
    layers: Vec<Layer>,
    storyboards: Vec<Storyboard>,
}

impl Composition {
    /// Empty composition. Both dimensions must be positive.
    pub fn new(width: u32, height: u32) -> GtResult<Self> {
        if width == 0 || height == 0 {
            return Err(GtError::out_of_range(format!(
                "canvas must be at least 1x1, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            layers: Vec::new(),
            storyboards: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The whole canvas as a frame at the origin.
    pub fn canvas(&self) -> Frame {
        Frame::sized(self.width, self.height)
    }

    /// New layer covering the whole canvas.
    pub fn create_layer(&mut self, name: impl Into<String>) -> GtResult<&mut Layer> {
        let canvas = self.canvas();
        self.create_layer_with_frame(name, canvas)
    }

    /// New layer starting at `(x, y)` and running to the canvas edges.
    pub fn create_layer_at(
        &mut self,
        name: impl Into<String>,
        x: i32,
        y: i32,
    ) -> GtResult<&mut Layer> {
        let width = remaining(self.width, x);
        let height = remaining(self.height, y);
        self.create_layer_with_frame(name, Frame::new(x, y, width, height))
    }

    /// New layer with an explicit frame.
    ///
    /// Fails with `DuplicateName` if a layer of that name exists; the layer
    /// list is left untouched in that case.
    pub fn create_layer_with_frame(
        &mut self,
        name: impl Into<String>,
        frame: impl Into<Frame>,
    ) -> GtResult<&mut Layer> {
        let name = name.into();
        if self.layer(&name).is_some() {
            return Err(GtError::duplicate_name(name));
        }
        let frame = frame.into();
        debug!(layer = %name, ?frame, "Creating layer");

        self.layers.push(Layer::new(name, frame));
        let index = self.layers.len() - 1;
        Ok(&mut self.layers[index])
    }

    pub fn add_storyboard(&mut self, storyboard: Storyboard) -> &mut Storyboard {
        self.storyboards.push(storyboard);
        let index = self.storyboards.len() - 1;
        &mut self.storyboards[index]
    }

    /// Layers in paint order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name() == name)
    }

    pub fn layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.name() == name)
    }

    pub fn storyboards(&self) -> &[Storyboard] {
        &self.storyboards
    }

    /// Every object across every layer, in paint order.
    pub fn objects(&self) -> impl Iterator<Item = &VisualObject> {
        self.layers.iter().flat_map(|l| l.objects().iter())
    }

    pub fn find_object(&self, name: &str) -> Option<&VisualObject> {
        self.objects().find(|o| o.name() == name)
    }
}

fn remaining(extent: u32, offset: i32) -> u32 {
    let left = i64::from(extent) - i64::from(offset);
    left.clamp(0, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Shape;
    use crate::storyboard::Animation;
    use proptest::prelude::*;

    #[test]
    fn test_zero_canvas_is_rejected() {
        assert!(matches!(
            Composition::new(0, 1080),
            Err(GtError::OutOfRange { .. })
        ));
        assert!(Composition::new(1920, 0).is_err());
    }

    #[test]
    fn test_layer_defaults_to_canvas() {
        let mut comp = Composition::new(1920, 1080).unwrap();
        let layer = comp.create_layer("L1").unwrap();
        assert_eq!(layer.frame(), Frame::sized(1920, 1080));

        let offset = comp.create_layer_at("L2", 100, 50).unwrap();
        assert_eq!(offset.frame(), Frame::new(100, 50, 1820, 1030));
    }

    #[test]
    fn test_duplicate_layer_leaves_collection_unchanged() {
        let mut comp = Composition::new(1920, 1080).unwrap();
        comp.create_layer("L1")
            .unwrap()
            .append(Shape::rectangle("R1", (0, 0, 10, 10)));

        let err = comp.create_layer("L1").unwrap_err();
        assert!(matches!(err, GtError::DuplicateName { ref name } if name == "L1"));
        assert_eq!(comp.layers().len(), 1);
        assert_eq!(comp.layers()[0].len(), 1);
    }

    #[test]
    fn test_find_object_across_layers() {
        let mut comp = Composition::new(640, 480).unwrap();
        comp.create_layer("Back")
            .unwrap()
            .add_rectangle("Bg", (0, 0, 640, 480));
        comp.create_layer("Front")
            .unwrap()
            .add_ellipse("Dot", (10, 10, 5, 5));

        assert_eq!(comp.objects().count(), 2);
        assert_eq!(comp.find_object("Dot").unwrap().tag(), "Ellipse");
        assert!(comp.find_object("Nope").is_none());
    }

    #[test]
    fn test_storyboards_keep_order() {
        let mut comp = Composition::new(640, 480).unwrap();
        comp.add_storyboard(Storyboard::transition_in())
            .append(Animation::reveal("A", 0.0, 1.0).unwrap());
        comp.add_storyboard(Storyboard::transition_out());

        let kinds: Vec<_> = comp.storyboards().iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            [
                crate::storyboard::StoryboardType::TransitionIn,
                crate::storyboard::StoryboardType::TransitionOut
            ]
        );
    }

    #[test]
    fn test_composition_serializes_layers_in_order() {
        let mut comp = Composition::new(640, 480).unwrap();
        comp.create_layer("Back").unwrap();
        comp.create_layer("Front").unwrap();

        let json = serde_json::to_value(&comp).unwrap();
        assert_eq!(json["width"], 640);
        assert_eq!(json["layers"][0]["name"], "Back");
        assert_eq!(json["layers"][1]["name"], "Front");
    }

    proptest! {
        #[test]
        fn test_paint_order_matches_append_order(count in 1usize..40) {
            let mut comp = Composition::new(100, 100).unwrap();
            let layer = comp.create_layer("L").unwrap();
            for i in 0..count {
                layer.add_rectangle(format!("R{i}"), (0, 0, 1, 1));
            }
            let names: Vec<String> = comp.objects().map(|o| o.name().to_string()).collect();
            let expected: Vec<String> = (0..count).map(|i| format!("R{i}")).collect();
            prop_assert_eq!(names, expected);
        }
    }
}

//! gtcompose Composition Model
//!
//! Defines the object graph that gets written into a title package:
//! - **Primitives:** colours, text styles, frames and margins
//! - **Objects:** shapes and text blocks, with optional bounding relations
//! - **Containers:** layers (paint order) and storyboards (animation order)
//! - **Composition:** the canvas-sized root that owns layers and storyboards
//!
//! Objects refer to each other by name only. References are checked when
//! the composition is exported, not when they are declared.

pub mod colour;
pub mod composition;
pub mod geometry;
pub mod layer;
pub mod object;
pub mod storyboard;
pub mod text;

pub use colour::*;
pub use composition::*;
pub use geometry::*;
pub use layer::*;
pub use object::*;
pub use storyboard::*;
pub use text::*;

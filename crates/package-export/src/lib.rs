//! gtcompose Package Export
//!
//! Turns a [`Composition`](gtcompose_model::Composition) into a `.gtzip`
//! package the title designer can open.
//!
//! # Pipeline
//!
//! ```text
//! Composition ──┐
//!               ├── ObjectIndex (names -> objects)
//!               │         │
//!               │         ├── FrameResolver (bounding chains)
//!               │         │
//!               └─────────┴── document.xml ──┐
//!                             resources.xml ─┼── ZIP (stored) ── out.gtzip
//!                       [Content_Types].xml ─┘
//! ```

pub mod package;
pub mod project;
pub mod scene;
pub mod xml;

pub use package::{PackageBackend, PackageContents, PackageEntry, ZipPackageBackend};
pub use project::Project;

//! `Project`: a composition bound to an output path, written exactly once.

use std::fmt;
use std::path::{Path, PathBuf};

use gtcompose_common::config::ExportSettings;
use gtcompose_common::error::GtResult;
use gtcompose_model::{Composition, Frame, Layer, Layout, Storyboard};
use tracing::{error, info, warn};

use crate::package::{PackageBackend, PackageContents, ZipPackageBackend};

/// A composition under construction plus where it will be written.
///
/// The package is written when the project is finalized: explicitly through
/// [`Project::finish`], at the end of [`Project::scoped`], or when the
/// project is dropped without having been finished. Failures during a drop
/// can only be logged.
pub struct Project {
    composition: Composition,
    output: PathBuf,
    settings: ExportSettings,
    backend: Box<dyn PackageBackend>,
    finalized: bool,
}

impl Project {
    pub fn new(width: u32, height: u32, output: impl Into<PathBuf>) -> GtResult<Self> {
        Ok(Self {
            composition: Composition::new(width, height)?,
            output: output.into(),
            settings: ExportSettings::default(),
            backend: Box::new(ZipPackageBackend::new()),
            finalized: false,
        })
    }

    pub fn with_settings(mut self, settings: ExportSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_backend(mut self, backend: Box<dyn PackageBackend>) -> Self {
        self.backend = backend;
        self
    }

    /// Build a project inside `build` and finalize it afterwards.
    ///
    /// The package is written whether `build` succeeds or fails. An error
    /// from `build` takes precedence over an export error; the latter is
    /// logged in that case.
    pub fn scoped<T, F>(
        width: u32,
        height: u32,
        output: impl Into<PathBuf>,
        build: F,
    ) -> GtResult<T>
    where
        F: FnOnce(&mut Project) -> GtResult<T>,
    {
        Project::new(width, height, output)?.finish_with(build)
    }

    /// Run `build` on this project, then finalize it.
    ///
    /// Same contract as [`Project::scoped`] for a project that was
    /// configured first.
    pub fn finish_with<T, F>(mut self, build: F) -> GtResult<T>
    where
        F: FnOnce(&mut Project) -> GtResult<T>,
    {
        let built = build(&mut self);
        let finished = self.finish();

        match (built, finished) {
            (Ok(value), Ok(_)) => Ok(value),
            (Ok(_), Err(err)) => Err(err),
            (Err(err), Ok(_)) => Err(err),
            (Err(err), Err(export_err)) => {
                warn!(error = %export_err, "Export after failed build also failed");
                Err(err)
            }
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn composition_mut(&mut self) -> &mut Composition {
        &mut self.composition
    }

    pub fn create_layer(&mut self, name: impl Into<String>) -> GtResult<&mut Layer> {
        self.composition.create_layer(name)
    }

    pub fn create_layer_at(
        &mut self,
        name: impl Into<String>,
        x: i32,
        y: i32,
    ) -> GtResult<&mut Layer> {
        self.composition.create_layer_at(name, x, y)
    }

    pub fn create_layer_with_frame(
        &mut self,
        name: impl Into<String>,
        frame: impl Into<Frame>,
    ) -> GtResult<&mut Layer> {
        self.composition.create_layer_with_frame(name, frame)
    }

    pub fn add_storyboard(&mut self, storyboard: Storyboard) -> &mut Storyboard {
        self.composition.add_storyboard(storyboard)
    }

    pub fn layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.composition.layer_mut(name)
    }

    /// Layout cursor over the whole canvas.
    pub fn layout(&self) -> Layout {
        Layout::new(self.composition.canvas())
    }

    /// Serialize without writing anything.
    pub fn package(&self) -> GtResult<PackageContents> {
        PackageContents::from_composition(&self.composition, &self.settings)
    }

    /// Write the package to the configured output path.
    pub fn export(&mut self) -> GtResult<PathBuf> {
        let output = self.output.clone();
        self.export_to(&output)?;
        Ok(output)
    }

    /// Write the package to `path`. The configured output is left as is.
    pub fn export_to(&mut self, path: &Path) -> GtResult<()> {
        info!(
            output = %path.display(),
            layers = self.composition.layers().len(),
            storyboards = self.composition.storyboards().len(),
            backend = self.backend.name(),
            "Starting export"
        );

        let contents = self.package()?;
        self.backend.write(&contents, path)?;

        info!(output = %path.display(), "Export complete");
        Ok(())
    }

    /// Write the package and consume the project.
    pub fn finish(mut self) -> GtResult<PathBuf> {
        self.finalized = true;
        self.export()
    }
}

impl Drop for Project {
    fn drop(&mut self) {
        if self.finalized {
            return;
        }
        self.finalized = true;
        if let Err(err) = self.export() {
            error!(
                output = %self.output.display(),
                error = %err,
                "Export of unfinished project failed"
            );
        }
    }
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("output", &self.output)
            .field("settings", &self.settings)
            .field("backend", &self.backend.name())
            .field("finalized", &self.finalized)
            .field("composition", &self.composition)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use gtcompose_common::error::GtError;

    /// Records what would have been written instead of touching disk.
    #[derive(Clone, Default)]
    struct RecordingBackend {
        writes: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl PackageBackend for RecordingBackend {
        fn write(&mut self, _contents: &PackageContents, path: &Path) -> GtResult<()> {
            self.writes.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn project_with(backend: &RecordingBackend) -> Project {
        Project::new(1920, 1080, "out.gtzip")
            .unwrap()
            .with_backend(Box::new(backend.clone()))
    }

    #[test]
    fn test_finish_writes_once() {
        let backend = RecordingBackend::default();
        let project = project_with(&backend);
        let path = project.finish().unwrap();
        assert_eq!(path, PathBuf::from("out.gtzip"));
        assert_eq!(backend.writes.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_drop_writes_unfinished_project() {
        let backend = RecordingBackend::default();
        {
            let mut project = project_with(&backend);
            project.create_layer("L1").unwrap();
        }
        assert_eq!(backend.writes.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_export_to_does_not_finalize() {
        let backend = RecordingBackend::default();
        let mut project = project_with(&backend);
        project.export_to(Path::new("preview.gtzip")).unwrap();
        drop(project);

        let writes = backend.writes.lock().unwrap();
        assert_eq!(
            *writes,
            [PathBuf::from("preview.gtzip"), PathBuf::from("out.gtzip")]
        );
    }

    #[test]
    fn test_zero_canvas_is_rejected() {
        assert!(matches!(
            Project::new(0, 1080, "out.gtzip"),
            Err(GtError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_layout_starts_at_canvas() {
        let backend = RecordingBackend::default();
        let project = project_with(&backend);
        assert_eq!(project.layout().frame(), Frame::sized(1920, 1080));
        project.finish().unwrap();
    }
}

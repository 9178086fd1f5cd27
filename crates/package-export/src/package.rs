//! Package assembly and the `.gtzip` writer.

use std::fs::{self, OpenOptions};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use gtcompose_common::config::ExportSettings;
use gtcompose_common::error::{GtError, GtResult};
use gtcompose_model::Composition;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::scene::composition_element;
use crate::xml::{write_document, XmlElement, XmlOptions};

pub const DOCUMENT_ENTRY: &str = "document.xml";
pub const RESOURCES_ENTRY: &str = "resources.xml";
pub const CONTENT_TYPES_ENTRY: &str = "[Content_Types].xml";

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// One named file inside a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// The files of a package, in archive order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageContents {
    pub entries: Vec<PackageEntry>,
}

impl PackageContents {
    /// Serialize a composition into the three entries the designer expects.
    pub fn from_composition(
        composition: &Composition,
        settings: &ExportSettings,
    ) -> GtResult<Self> {
        let document = write_document(
            &composition_element(composition)?,
            &XmlOptions {
                indent: settings.indent,
                declared_encoding: Some(settings.declared_encoding.clone()),
            },
        )?;
        let resources = write_document(&XmlElement::new("Resources"), &XmlOptions::compact())?;
        let content_types = write_document(
            &content_types_element(),
            &XmlOptions::compact().with_declaration("utf-8"),
        )?;

        let mut contents = Self::default();
        contents.push(DOCUMENT_ENTRY, document);
        contents.push(RESOURCES_ENTRY, resources);
        contents.push(CONTENT_TYPES_ENTRY, content_types);
        Ok(contents)
    }

    pub fn push(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.entries.push(PackageEntry {
            name: name.into(),
            bytes,
        });
    }

    pub fn entry(&self, name: &str) -> Option<&PackageEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

fn content_types_element() -> XmlElement {
    let default = |ext: &str, content_type: &str| {
        XmlElement::new("Default")
            .attr("Extension", ext)
            .attr("ContentType", content_type)
    };
    XmlElement::new("Types")
        .attr("xmlns", CONTENT_TYPES_NS)
        .child(default("xml", "text/xml"))
        .child(default("png", "image/png"))
}

/// Trait for package writers.
pub trait PackageBackend: Send {
    /// Write `contents` to `path`, replacing anything already there.
    fn write(&mut self, contents: &PackageContents, path: &Path) -> GtResult<()>;

    /// Backend name.
    fn name(&self) -> &str;
}

/// Writes stored (uncompressed) ZIP archives with fixed timestamps, so the
/// same contents always give the same bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipPackageBackend;

impl ZipPackageBackend {
    pub fn new() -> Self {
        Self
    }

    /// Build the archive in memory.
    pub fn archive(&self, contents: &PackageContents) -> GtResult<Vec<u8>> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .last_modified_time(zip::DateTime::default());

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for entry in &contents.entries {
            zip.start_file(entry.name.as_str(), options)
                .map_err(|e| GtError::archive(format!("{}: {e}", entry.name)))?;
            zip.write_all(&entry.bytes)
                .map_err(|e| GtError::archive(format!("{}: {e}", entry.name)))?;
        }
        let cursor = zip.finish().map_err(|e| GtError::archive(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

impl PackageBackend for ZipPackageBackend {
    fn write(&mut self, contents: &PackageContents, path: &Path) -> GtResult<()> {
        let bytes = self.archive(contents)?;
        debug!(
            path = %path.display(),
            entries = contents.entries.len(),
            bytes = bytes.len(),
            "Writing package"
        );
        write_replacing(path, &bytes)
    }

    fn name(&self) -> &str {
        "zip"
    }
}

/// Write through a sibling temp file and rename it over `path`.
///
/// Missing parent directories are created. Every failure is reported as
/// [`GtError::Write`] against `path`.
pub fn write_replacing(path: &Path, bytes: &[u8]) -> GtResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| GtError::write(path, e))?;
    }

    let tmp_path = temp_path(path);
    let written = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&tmp_path, path));

    if let Err(err) = written {
        fs::remove_file(&tmp_path).ok();
        return Err(GtError::write(path, err));
    }
    Ok(())
}

fn temp_path(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "package".to_string());
    let mut candidate = target.with_file_name(format!(".{file_name}.tmp"));
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = target.with_file_name(format!(".{file_name}.tmp{counter}"));
    }
    candidate
}

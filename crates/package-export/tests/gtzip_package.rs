use std::fs::File;
use std::io::Read;
use std::path::Path;

use gtcompose_common::error::GtError;
use gtcompose_common::logging::init_test_logging;
use gtcompose_export::package::{CONTENT_TYPES_ENTRY, DOCUMENT_ENTRY, RESOURCES_ENTRY};
use gtcompose_export::Project;
use gtcompose_model::{Animation, Colour, SceneObject, Storyboard, TextProperties};
use zip::{CompressionMethod, ZipArchive};

fn open_archive(path: &Path) -> ZipArchive<File> {
    let file = File::open(path).expect("package should exist");
    ZipArchive::new(file).expect("package should be a zip archive")
}

fn read_entry(path: &Path, name: &str) -> String {
    let mut archive = open_archive(path);
    let mut entry = archive.by_name(name).expect("entry should exist");
    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .expect("entry should be utf-8");
    content
}

fn build_basic(project: &mut Project) -> Result<(), GtError> {
    let layer = project.create_layer("L1")?;
    layer
        .add_rectangle("R1", (0, 0, 100, 100))
        .set_fill(Colour::RED);
    let props = TextProperties::new("Arial", 40.0)?;
    layer.add_text_block("T1", (10, 20, 300, 50), "HELLO", props);
    Ok(())
}

#[test]
fn scoped_project_writes_layer_with_ordered_children() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.gtzip");

    Project::scoped(1920, 1080, &out, build_basic).unwrap();

    let document = read_entry(&out, DOCUMENT_ENTRY);
    assert!(document.starts_with("<?xml version='1.0' encoding='utf-16'?>\n"));
    assert!(document.contains("<Composition Width=\"1920\" Height=\"1080\">"));
    assert_eq!(document.matches("<Layer ").count(), 1);
    assert!(document.contains("<Layer Name=\"L1\" Location=\"0,0,0\" Dimensions=\"1920,1080,0\" Locked=\"False\">"));

    let rect = document.find("<Rectangle Name=\"R1\"").unwrap();
    let text = document.find("<TextBlock Name=\"T1\"").unwrap();
    assert!(rect < text);
    assert!(document.contains("<Rectangle Name=\"R1\" Dimensions=\"100,100,0\" Location=\"0,0,0\">"));
    assert!(document.contains("<Brush Color=\"#FFFF0000\"/>"));
    assert!(document.contains("Text=\"HELLO\""));
    assert!(!document.contains("TextBlock.Bounding"));
}

#[test]
fn package_entries_are_stored_in_fixed_order() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("order.gtzip");
    Project::scoped(640, 480, &out, build_basic).unwrap();

    let mut archive = open_archive(&out);
    let mut names = Vec::new();
    for i in 0..archive.len() {
        let entry = archive.by_index(i).unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Stored);
        names.push(entry.name().to_string());
    }
    assert_eq!(names, [DOCUMENT_ENTRY, RESOURCES_ENTRY, CONTENT_TYPES_ENTRY]);
    assert_eq!(read_entry(&out, RESOURCES_ENTRY), "<Resources/>");
}

#[test]
fn storyboard_animations_keep_append_order() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("story.gtzip");

    Project::scoped(1920, 1080, &out, |project| {
        build_basic(project)?;
        let mut storyboard = Storyboard::transition_in();
        storyboard
            .append(Animation::reveal("R1", 0.0, 2.0)?)
            .append(Animation::reveal("T1", 1.0, 2.0)?);
        project.add_storyboard(storyboard);
        Ok(())
    })
    .unwrap();

    let document = read_entry(&out, DOCUMENT_ENTRY);
    assert!(document.contains("<Storyboard Type=\"TransitionIn\">"));
    let first = document
        .find("<Reveal Object=\"R1\" Delay=\"0\" Duration=\"2\" Interpolation=\"Linear\" Direction=\"Left\" CenterAxis=\"X\"/>")
        .unwrap();
    let second = document.find("<Reveal Object=\"T1\" Delay=\"1\"").unwrap();
    assert!(first < second);

    let layer = document.find("<Layer ").unwrap();
    let storyboard = document.find("<Storyboard ").unwrap();
    assert!(layer < storyboard);
}

#[test]
fn negative_start_fails_before_anything_is_appended() {
    let mut storyboard = Storyboard::transition_in();
    let err = Animation::reveal("R1", -1.0, 2.0).unwrap_err();
    assert!(matches!(err, GtError::InvalidTiming { .. }));
    assert!(storyboard.reveal("R1", -1.0, 2.0).is_err());
    assert!(storyboard.is_empty());
}

#[test]
fn missing_bounding_target_fails_export() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing.gtzip");

    let mut project = Project::new(1920, 1080, &out).unwrap();
    project
        .create_layer("L1")
        .unwrap()
        .add_rectangle("R1", (0, 0, 10, 10))
        .set_bounding("Ghost", 5);

    let err = project.export().unwrap_err();
    assert!(matches!(
        err,
        GtError::UnresolvedReference { ref name, ref referenced_by } if name == "Ghost" && referenced_by == "R1"
    ));
    assert!(!out.exists());

    // Fix the graph so the drop-time export succeeds.
    project
        .layer_mut("L1")
        .unwrap()
        .add_text_block("Ghost", (0, 0, 5, 5), "", TextProperties::new("Arial", 12.0).unwrap());
    project.finish().unwrap();
    assert!(out.exists());
}

#[test]
fn bounding_rectangle_wraps_text_with_margin() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("bounded.gtzip");

    Project::scoped(1920, 1080, &out, |project| {
        let layer = project.create_layer("Lower third")?;
        let props = TextProperties::new("Arial", 40.0)?;
        layer.add_rectangle("Background", (0, 0, 0, 0));
        layer.add_text_block("Title", (100, 900, 600, 60), "Breaking", props);
        if let Some(bg) = layer.object_mut("Background") {
            bg.set_bounding("Title", (10, 20));
        }
        Ok(())
    })
    .unwrap();

    let document = read_entry(&out, DOCUMENT_ENTRY);
    assert!(document.contains(
        "<Rectangle Name=\"Background\" Dimensions=\"640,80,0\" Location=\"80,890,0\">"
    ));
    assert!(document.contains("<Bounding Object=\"Title\" Padding=\"10,20,10,20\"/>"));
}

#[test]
fn repeated_export_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.gtzip");
    let second = dir.path().join("b.gtzip");

    let mut project = Project::new(1280, 720, &first).unwrap();
    build_basic(&mut project).unwrap();
    project.export_to(&first).unwrap();
    project.export_to(&second).unwrap();
    project.finish().unwrap();

    let a = std::fs::read(&first).unwrap();
    let b = std::fs::read(&second).unwrap();
    assert_eq!(a, b);
}

#[test]
fn scoped_project_is_written_when_builder_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("partial.gtzip");

    let result: Result<(), GtError> = Project::scoped(1920, 1080, &out, |project| {
        build_basic(project)?;
        project.create_layer("L1")?;
        Ok(())
    });

    assert!(matches!(result, Err(GtError::DuplicateName { .. })));
    let document = read_entry(&out, DOCUMENT_ENTRY);
    assert_eq!(document.matches("<Layer ").count(), 1);
}

#[test]
fn missing_parent_directories_are_created() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("deeper").join("out.gtzip");
    Project::scoped(100, 100, &out, |_| Ok(())).unwrap();
    assert!(out.exists());
}

#[test]
fn unwritable_output_reports_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file").unwrap();
    let out = blocker.join("out.gtzip");

    let err = Project::scoped(100, 100, &out, |_| Ok(())).unwrap_err();
    assert!(matches!(err, GtError::Write { ref path, .. } if path == &out));
}

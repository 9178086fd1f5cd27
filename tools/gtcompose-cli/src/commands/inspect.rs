//! Show what is inside a package.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use gtcompose_export::package::DOCUMENT_ENTRY;
use zip::ZipArchive;

pub fn run(path: PathBuf, print_document: bool) -> anyhow::Result<()> {
    let file = File::open(&path)
        .map_err(|e| anyhow::anyhow!("Failed to open {}: {e}", path.display()))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| anyhow::anyhow!("Not a package archive: {e}"))?;

    println!("Package: {}", path.display());
    println!("Entries:");
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        println!(
            "  {} ({} bytes, {:?})",
            entry.name(),
            entry.size(),
            entry.compression()
        );
    }

    let mut document = String::new();
    archive
        .by_name(DOCUMENT_ENTRY)
        .map_err(|e| anyhow::anyhow!("Missing {DOCUMENT_ENTRY}: {e}"))?
        .read_to_string(&mut document)?;

    println!();
    println!("Document:");
    println!("  Layers: {}", document.matches("<Layer ").count());
    println!("  Storyboards: {}", document.matches("<Storyboard ").count());

    if print_document {
        println!();
        println!("{document}");
    }

    Ok(())
}

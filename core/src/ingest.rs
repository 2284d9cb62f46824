use crate::index::CorpusBuilder;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Add every regular file directly inside `dir` to `builder`, named by file name.
///
/// Files are taken in name order. Contents are decoded lossily as UTF-8. Bytes above
/// 0x7f in single-byte encodings such as Windows-1252 become U+FFFD and split words,
/// so accented letters are dropped rather than transliterated.
/// Returns the number of documents added.
pub fn load_dir(dir: &Path, builder: &mut CorpusBuilder) -> Result<usize> {
    if !dir.is_dir() {
        bail!("corpus dir {} is not a directory", dir.display());
    }
    let mut added = 0;
    let walker = WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name();
    for entry in walker {
        let entry = entry.with_context(|| format!("reading corpus dir {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!(path = %entry.path().display(), "skipping file with non UTF-8 name");
            continue;
        };
        let bytes = fs::read(entry.path()).with_context(|| format!("reading {}", entry.path().display()))?;
        builder.add_text(name, &String::from_utf8_lossy(&bytes));
        added += 1;
    }
    tracing::info!(dir = %dir.display(), num_docs = added, "ingested corpus directory");
    Ok(added)
}

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::TocError;

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mdx", "markdown"];

/// Read a markdown document from disk
pub fn read_markdown<P: AsRef<Path>>(path: P) -> Result<String, TocError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| TocError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// All markdown files under `root`, sorted by path. Unreadable directory
/// entries are logged and skipped.
pub fn find_markdown_files<P: AsRef<Path>>(root: P) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_markdown(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

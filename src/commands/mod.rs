pub mod active;
pub mod ids;
pub mod json;
pub mod render;
pub mod scan;
pub mod toc;

use anyhow::{Context, Result};
use mdtoc::{source, TableOfContents, TocOptions};
use std::path::Path;

/// Read a markdown file and extract its table of contents
pub async fn load_toc<P: AsRef<Path>>(path: P, options: &TocOptions) -> Result<TableOfContents> {
    let path = path.as_ref();
    let markdown = source::read_markdown(path)?;
    mdtoc::get_table_of_contents_with(&markdown, options)
        .await
        .with_context(|| format!("Failed to build table of contents: {}", path.display()))
}

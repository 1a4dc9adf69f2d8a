use crate::commands::load_toc;
use anyhow::Result;
use mdtoc::TocOptions;
use std::path::Path;

pub async fn run<P: AsRef<Path>>(path: P, options: &TocOptions) -> Result<()> {
    let toc = load_toc(&path, options).await?;

    if toc.is_empty() {
        println!("No table of contents found.");
        return Ok(());
    }

    for entry in toc.flatten() {
        let indent = "  ".repeat(entry.depth);
        let url_str = entry
            .url
            .map(|u| format!(" ({})", u))
            .unwrap_or_default();
        println!("{}{}{}", indent, entry.title, url_str);
    }

    Ok(())
}

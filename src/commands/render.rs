use crate::commands::load_toc;
use anyhow::Result;
use mdtoc::toc::render::render_panel;
use mdtoc::TocOptions;
use std::path::Path;

pub async fn run<P: AsRef<Path>>(path: P, options: &TocOptions, active: Option<&str>) -> Result<()> {
    let toc = load_toc(&path, options).await?;

    if let Some(id) = active {
        if !toc.item_ids().iter().any(|known| known == id) {
            tracing::warn!(id, "active id does not match any rendered heading");
        }
    }

    print!("{}", render_panel(&toc, active));

    Ok(())
}

use crate::commands::load_toc;
use anyhow::Result;
use mdtoc::TocOptions;
use std::path::Path;

pub async fn run<P: AsRef<Path>>(path: P, options: &TocOptions) -> Result<()> {
    let toc = load_toc(&path, options).await?;

    for id in toc.item_ids() {
        println!("{}", id);
    }

    Ok(())
}

use crate::commands::load_toc;
use anyhow::Result;
use mdtoc::TocOptions;
use std::path::Path;

pub async fn run<P: AsRef<Path>>(path: P, options: &TocOptions, compact: bool) -> Result<()> {
    let toc = load_toc(&path, options).await?;

    let json = if compact {
        serde_json::to_string(&toc)?
    } else {
        serde_json::to_string_pretty(&toc)?
    };
    println!("{}", json);

    Ok(())
}

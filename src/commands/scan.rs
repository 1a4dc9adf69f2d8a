use anyhow::Result;
use mdtoc::toc::render::render_text;
use mdtoc::{source, TocOptions};
use std::path::Path;

pub async fn run<P: AsRef<Path>>(dir: P, options: &TocOptions) -> Result<()> {
    let files = source::find_markdown_files(&dir);

    if files.is_empty() {
        println!("No markdown files found.");
        return Ok(());
    }

    let mut failures = 0;
    for file in &files {
        let toc = match crate::commands::load_toc(file, options).await {
            Ok(toc) => toc,
            Err(e) => {
                tracing::error!("{:#}", e);
                failures += 1;
                continue;
            }
        };

        println!("--- {} ---", file.display());
        if toc.is_empty() {
            println!("(no headings)");
        } else {
            print!("{}", render_text(&toc, None));
        }
        println!();
    }

    println!("{} file(s) scanned.", files.len());
    if failures > 0 {
        anyhow::bail!("{} file(s) could not be processed", failures);
    }

    Ok(())
}

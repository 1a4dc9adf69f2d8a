use anyhow::Result;
use mdtoc::active::viewport::{Span, Viewport};
use mdtoc::active::ActiveItemTracker;
use mdtoc::toc::render::render_text;
use mdtoc::{markdown, source, TocOptions};
use std::path::Path;

pub struct ActiveOptions {
    /// Line at the top of the viewport
    pub scroll: usize,
    /// Viewport height in lines
    pub viewport: usize,
}

pub async fn run<P: AsRef<Path>>(path: P, options: &TocOptions, active: &ActiveOptions) -> Result<()> {
    let markdown = source::read_markdown(&path)?;
    let toc = mdtoc::get_table_of_contents_with(&markdown, options).await?;

    if toc.is_empty() {
        println!("No table of contents found.");
        return Ok(());
    }

    let id = scroll_through(&markdown, &toc.item_ids(), active);
    print!("{}", render_text(&toc, id.as_deref()));
    match id {
        Some(id) => println!("\nActive: {}", id),
        None => println!("\nNo heading is active."),
    }

    Ok(())
}

/// Lay the document's headings out one line each, then scroll line by line
/// down to `scroll` (at most the document's length), feeding every
/// visibility change to the tracker.
fn scroll_through(markdown: &str, ids: &[String], options: &ActiveOptions) -> Option<String> {
    let mut viewport = Viewport::new(options.viewport.max(1) as f64);
    for (anchor, line) in markdown::heading_anchors(&markdown::parse(markdown)) {
        viewport.insert(
            anchor,
            Span {
                top: line as f64,
                height: 1.0,
            },
        );
    }

    let mut tracker = ActiveItemTracker::new(viewport);
    tracker.set_items(ids);

    let changes = tracker.notifier_mut().take_changes();
    tracker.handle(&changes);

    // Past the last line nothing can change visibility any more
    let scroll = options.scroll.min(markdown.lines().count());
    for offset in 1..=scroll {
        let changes = tracker.notifier_mut().scroll_to(offset as f64);
        if !changes.is_empty() {
            tracing::trace!(offset, changes = changes.len(), "visibility changed");
        }
        tracker.handle(&changes);
    }

    tracker.active().map(str::to_string)
}

use std::fmt::{self, Write};

use pulldown_cmark_escape::{escape_href, escape_html};

use crate::toc::{TableOfContents, TocItem};

/// Levels at or beyond this are not rendered; levels 1 and 2 are.
pub const MAX_RENDER_LEVEL: usize = 3;

fn is_active(item: &TocItem, active: Option<&str>) -> bool {
    match (item.url.as_deref(), active) {
        (Some(url), Some(id)) => url.strip_prefix('#') == Some(id),
        _ => false,
    }
}

/// Render the tree as nested `<ul>` lists. The item whose url is
/// `#{active}` gets the active styling.
pub fn render_html(toc: &TableOfContents, active: Option<&str>) -> String {
    let mut html = String::new();
    // Writing into a String cannot fail
    match render_tree(&toc.items, 1, active, &mut html) {
        Ok(()) => html,
        Err(_) => String::new(),
    }
}

fn render_tree(
    items: &[TocItem],
    level: usize,
    active: Option<&str>,
    html: &mut String,
) -> fmt::Result {
    if items.is_empty() || level >= MAX_RENDER_LEVEL {
        return Ok(());
    }

    let list_class = if level == 1 {
        "m-0 list-none"
    } else {
        "m-0 list-none pl-4"
    };
    writeln!(html, "<ul class=\"{}\">", list_class)?;

    for item in items {
        let link_class = if is_active(item, active) {
            "inline-block no-underline transition-colors hover:text-foreground font-medium text-foreground"
        } else {
            "inline-block no-underline transition-colors hover:text-foreground text-muted-foreground"
        };
        html.push_str("<li class=\"mt-0 pt-2\"><a ");
        if let Some(url) = &item.url {
            html.push_str("href=\"");
            escape_href(&mut *html, url)?;
            html.push_str("\" ");
        }
        write!(html, "class=\"{}\">", link_class)?;
        escape_html(&mut *html, &item.title)?;
        html.push_str("</a>");

        if !item.items.is_empty() {
            html.push('\n');
            render_tree(&item.items, level + 1, active, html)?;
        }
        html.push_str("</li>\n");
    }

    html.push_str("</ul>\n");
    Ok(())
}

/// The "On This Page" panel; empty when there is nothing to show.
pub fn render_panel(toc: &TableOfContents, active: Option<&str>) -> String {
    if toc.is_empty() {
        return String::new();
    }

    let mut html = String::from("<div class=\"space-y-2\">\n<p class=\"font-medium\">On This Page</p>\n");
    html.push_str(&render_html(toc, active));
    html.push_str("</div>\n");
    html
}

/// Plain-text rendering of the same bounded tree, active item marked `>`.
pub fn render_text(toc: &TableOfContents, active: Option<&str>) -> String {
    let mut out = String::new();
    render_text_tree(&toc.items, 1, active, &mut out);
    out
}

fn render_text_tree(items: &[TocItem], level: usize, active: Option<&str>, out: &mut String) {
    if level >= MAX_RENDER_LEVEL {
        return;
    }
    for item in items {
        out.push_str(if is_active(item, active) { ">" } else { " " });
        out.push_str(&"  ".repeat(level - 1));
        out.push_str(&item.title);
        if let Some(url) = &item.url {
            out.push_str(&format!(" ({})", url));
        }
        out.push('\n');
        render_text_tree(&item.items, level + 1, active, out);
    }
}

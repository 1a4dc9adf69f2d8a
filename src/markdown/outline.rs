use crate::config::TocOptions;
use crate::markdown::ast::Node;
use crate::toc::{flatten, normalize};

/// A heading selected for the outline, with its depth already shifted so
/// the shallowest selected heading sits at depth 1.
struct Entry<'a> {
    depth: u8,
    children: &'a [Node],
}

/// Build the outline list for a document: a nested [`Node::List`] whose
/// items carry a paragraph with the heading's inline content.
///
/// Returns `None` when no heading qualifies.
pub fn outline(root: &Node, options: &TocOptions) -> Option<Node> {
    let entries = collect_entries(root, options);
    if entries.is_empty() {
        return None;
    }

    let min_depth = entries.iter().map(|e| e.depth).min().unwrap_or(1);

    let mut list = Vec::new();
    for entry in &entries {
        insert_into_list(entry.depth - min_depth + 1, entry.children, &mut list);
    }

    Some(Node::List {
        ordered: false,
        children: list,
    })
}

fn collect_entries<'a>(root: &'a Node, options: &TocOptions) -> Vec<Entry<'a>> {
    let mut entries = Vec::new();
    // Depth of the heading that opened the selected section, if any
    let mut opening: Option<u8> = None;
    let mut closed = false;

    for node in root.children() {
        let (depth, children) = match node {
            Node::Heading {
                depth, children, ..
            } => (*depth, children.as_slice()),
            _ => continue,
        };
        let value = flatten(node);

        if let Some(heading) = &options.heading {
            match opening {
                None => {
                    if heading.is_match(&value) {
                        opening = Some(depth);
                    }
                    continue;
                }
                Some(open_depth) => {
                    if closed || depth <= open_depth {
                        closed = true;
                        continue;
                    }
                }
            }
        }

        if value.trim().is_empty() {
            continue;
        }
        if options.skip.as_ref().is_some_and(|skip| skip.is_match(&value)) {
            tracing::trace!(heading = %value, "skipping heading");
            continue;
        }
        if !options.accepts_depth(depth) {
            continue;
        }

        entries.push(Entry { depth, children });
    }

    entries
}

fn entry_item(children: &[Node]) -> Node {
    Node::ListItem(vec![Node::Paragraph(children.to_vec())])
}

/// Insert an entry at `depth` (relative to `list`) into a list's items.
fn insert_into_list(depth: u8, children: &[Node], list: &mut Vec<Node>) {
    if depth <= 1 {
        list.push(entry_item(children));
        return;
    }

    match list.last_mut() {
        Some(Node::ListItem(item)) => insert_into_item(depth, children, item),
        _ => {
            let mut item = Vec::new();
            insert_into_item(depth, children, &mut item);
            list.push(Node::ListItem(item));
        }
    }
}

/// Insert an entry into a list item's children, descending one level.
fn insert_into_item(depth: u8, children: &[Node], item: &mut Vec<Node>) {
    match item.last_mut() {
        Some(Node::List {
            children: nested, ..
        }) => insert_into_list(depth - 1, children, nested),
        _ => {
            let mut nested = Vec::new();
            insert_into_list(depth - 1, children, &mut nested);
            item.push(Node::List {
                ordered: false,
                children: nested,
            });
        }
    }
}

/// Anchor id and source line of every top-level heading, as a renderer
/// that slugs headings with [`normalize`] would produce them.
pub fn heading_anchors(root: &Node) -> Vec<(String, usize)> {
    root.children()
        .iter()
        .filter_map(|node| match node {
            Node::Heading { line, .. } => {
                let text = flatten(node);
                if text.trim().is_empty() {
                    None
                } else {
                    Some((normalize(&text), *line))
                }
            }
            _ => None,
        })
        .collect()
}

use crate::markdown::Node;
use crate::toc::{flatten, normalize, TocItem};

/// Fold an outline node into a [`TocItem`].
///
/// `current` is the item being built; node kinds that carry no outline
/// information hand it back untouched. Never fails: odd shapes simply
/// produce items with an empty title.
pub fn extract(node: &Node, current: TocItem) -> TocItem {
    match node {
        Node::Paragraph(_) => extract_paragraph(node, current),
        Node::List { children, .. } => TocItem {
            items: children
                .iter()
                .map(|child| extract(child, TocItem::default()))
                .collect(),
            ..current
        },
        Node::ListItem(children) => {
            let Some(first) = children.first() else {
                return TocItem::default();
            };
            let item = extract(first, TocItem::default());
            match children.get(1) {
                Some(second) => extract(second, item),
                None => item,
            }
        }
        _ => current,
    }
}

/// A link anywhere in the paragraph provides the url; otherwise plain text
/// provides both title and a generated `#slug` url.
fn extract_paragraph(paragraph: &Node, current: TocItem) -> TocItem {
    let link = paragraph.descendants().find_map(|child| match child {
        Node::Link { url, .. } => Some(url),
        _ => None,
    });

    if let Some(url) = link {
        return TocItem {
            title: flatten(paragraph),
            url: Some(normalize(url)),
            ..current
        };
    }

    let has_text = paragraph
        .descendants()
        .any(|child| matches!(child, Node::Text(_)));
    if has_text {
        let title = flatten(paragraph);
        let url = format!("#{}", normalize(&title));
        return TocItem {
            title,
            url: Some(url),
            ..current
        };
    }

    current
}

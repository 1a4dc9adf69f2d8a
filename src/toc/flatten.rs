use crate::markdown::Node;

/// Concatenate the visible inline text of a subtree, in document order.
///
/// Only text and inline code contribute; emphasis and strong count through
/// their children. Raw HTML and code blocks are left out.
pub fn flatten(node: &Node) -> String {
    node.descendants()
        .filter_map(|child| match child {
            Node::Text(value) | Node::InlineCode(value) => Some(value.as_str()),
            _ => None,
        })
        .collect()
}

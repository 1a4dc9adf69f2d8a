use pulldown_cmark::{Event, Options, Parser, Tag};

/// Markdown syntax tree, reduced to the node kinds the outline cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Root(Vec<Node>),
    /// `line` is the 0-based source line the heading starts on
    Heading {
        depth: u8,
        line: usize,
        children: Vec<Node>,
    },
    Paragraph(Vec<Node>),
    List {
        ordered: bool,
        children: Vec<Node>,
    },
    ListItem(Vec<Node>),
    Link {
        url: String,
        children: Vec<Node>,
    },
    Text(String),
    Emphasis(Vec<Node>),
    Strong(Vec<Node>),
    InlineCode(String),
    Html(String),
    Code(String),
    Other(Vec<Node>),
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root(children)
            | Node::Heading { children, .. }
            | Node::Paragraph(children)
            | Node::List { children, .. }
            | Node::ListItem(children)
            | Node::Link { children, .. }
            | Node::Emphasis(children)
            | Node::Strong(children)
            | Node::Other(children) => children,
            Node::Text(_) | Node::InlineCode(_) | Node::Html(_) | Node::Code(_) => &[],
        }
    }

    /// Pre-order walk over this node and every descendant.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Open container while events are being folded into a tree
enum Frame {
    Root,
    Heading { depth: u8, line: usize },
    Paragraph,
    List { ordered: bool },
    Item,
    Link { url: String },
    Emphasis,
    Strong,
    CodeBlock,
    /// Alt text is not part of the visible text
    Image,
    Other,
}

impl Frame {
    fn close(self, children: Vec<Node>) -> Node {
        match self {
            Frame::Root => Node::Root(children),
            Frame::Heading { depth, line } => Node::Heading {
                depth,
                line,
                children,
            },
            Frame::Paragraph => Node::Paragraph(children),
            Frame::List { ordered } => Node::List { ordered, children },
            Frame::Item => Node::ListItem(children),
            Frame::Link { url } => Node::Link { url, children },
            Frame::Emphasis => Node::Emphasis(children),
            Frame::Strong => Node::Strong(children),
            Frame::CodeBlock => Node::Code(
                children
                    .iter()
                    .filter_map(|child| match child {
                        Node::Text(text) => Some(text.as_str()),
                        _ => None,
                    })
                    .collect(),
            ),
            Frame::Image => Node::Other(Vec::new()),
            Frame::Other => Node::Other(children),
        }
    }
}

/// Containers nested deeper than this are dropped with everything inside
/// them. Outline headings sit directly under the root, and a bounded tree
/// keeps the recursive drop, clone and compare of `Node` off deep stacks.
pub const MAX_NESTING: usize = 64;

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    options
}

/// Parse markdown source into a [`Node::Root`] tree.
pub fn parse(source: &str) -> Node {
    let mut stack: Vec<(Frame, Vec<Node>)> = vec![(Frame::Root, Vec::new())];
    let mut line = 0;
    let mut line_offset = 0;
    // Open containers below the nesting bound, not represented in the tree
    let mut dropped = 0usize;

    for (event, range) in Parser::new_ext(source, parser_options()).into_offset_iter() {
        if dropped > 0 || (matches!(event, Event::Start(_)) && stack.len() > MAX_NESTING) {
            match event {
                Event::Start(_) => dropped += 1,
                Event::End(_) => dropped -= 1,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(tag) => {
                let frame = match tag {
                    Tag::Heading { level, .. } => {
                        line += source[line_offset..range.start].matches('\n').count();
                        line_offset = range.start;
                        Frame::Heading {
                            depth: level as u8,
                            line,
                        }
                    }
                    Tag::Paragraph => Frame::Paragraph,
                    Tag::List(start) => Frame::List {
                        ordered: start.is_some(),
                    },
                    Tag::Item => Frame::Item,
                    Tag::Link { dest_url, .. } => Frame::Link {
                        url: dest_url.to_string(),
                    },
                    Tag::Emphasis => Frame::Emphasis,
                    Tag::Strong => Frame::Strong,
                    Tag::CodeBlock(_) => Frame::CodeBlock,
                    Tag::Image { .. } => Frame::Image,
                    _ => Frame::Other,
                };
                stack.push((frame, Vec::new()));
            }
            Event::End(_) => {
                // The root frame is never popped by an end event
                if stack.len() > 1 {
                    if let Some((frame, children)) = stack.pop() {
                        let node = frame.close(children);
                        push_child(&mut stack, node);
                    }
                }
            }
            Event::Text(text) => push_child(&mut stack, Node::Text(text.to_string())),
            Event::Code(code) => push_child(&mut stack, Node::InlineCode(code.to_string())),
            Event::Html(html) | Event::InlineHtml(html) => {
                push_child(&mut stack, Node::Html(html.to_string()))
            }
            Event::SoftBreak => push_child(&mut stack, Node::Text("\n".to_string())),
            _ => {}
        }
    }

    // Unbalanced events only happen on parser bugs; fold whatever is left.
    while stack.len() > 1 {
        if let Some((frame, children)) = stack.pop() {
            let node = frame.close(children);
            push_child(&mut stack, node);
        }
    }

    match stack.pop() {
        Some((frame, children)) => frame.close(children),
        None => Node::Root(Vec::new()),
    }
}

fn push_child(stack: &mut [(Frame, Vec<Node>)], node: Node) {
    if let Some((_, children)) = stack.last_mut() {
        children.push(node);
    }
}

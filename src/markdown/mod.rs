pub mod ast;
pub mod outline;

pub use ast::{parse, Node};
pub use outline::{heading_anchors, outline};

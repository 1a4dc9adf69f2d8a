//! Table-of-contents extraction for markdown documents, plus the
//! scroll-driven tracker that decides which heading is currently active.

pub mod active;
pub mod config;
pub mod error;
pub mod markdown;
pub mod source;
pub mod toc;

pub use config::TocOptions;
pub use error::TocError;
pub use toc::{get_table_of_contents, get_table_of_contents_with, TableOfContents, TocItem};

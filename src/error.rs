use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TocError {
    #[error("Markdown parse failed: {0}")]
    Parse(String),

    #[error("Invalid outline pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

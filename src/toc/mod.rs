pub mod extract;
pub mod flatten;
pub mod model;
pub mod normalize;
pub mod render;

pub use extract::extract;
pub use flatten::flatten;
pub use model::{FlatTocItem, TableOfContents, TocItem};
pub use normalize::normalize;

use crate::config::TocOptions;
use crate::error::TocError;
use crate::markdown;

/// Build the table of contents of a markdown document.
pub fn table_of_contents(source: &str, options: &TocOptions) -> TableOfContents {
    let root = markdown::parse(source);

    let Some(outline) = markdown::outline(&root, options) else {
        tracing::debug!("document has no outline");
        return TableOfContents::default();
    };

    // Only the items survive; the synthetic root's title and url are dropped
    let items = extract(&outline, TocItem::default()).items;
    tracing::debug!(entries = items.len(), "extracted table of contents");
    TableOfContents { items }
}

/// Build the table of contents with default outline options.
pub async fn get_table_of_contents(source: &str) -> Result<TableOfContents, TocError> {
    get_table_of_contents_with(source, &TocOptions::default()).await
}

/// Build the table of contents off the async runtime's worker threads.
///
/// A panic inside the parser rejects this call only.
pub async fn get_table_of_contents_with(
    source: &str,
    options: &TocOptions,
) -> Result<TableOfContents, TocError> {
    let source = source.to_owned();
    let options = options.clone();

    tokio::task::spawn_blocking(move || table_of_contents(&source, &options))
        .await
        .map_err(|e| TocError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles_and_urls(items: &[TocItem]) -> Vec<(String, Option<String>)> {
        items
            .iter()
            .map(|i| (i.title.clone(), i.url.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_no_headings() {
        let toc = get_table_of_contents("Just a paragraph.\n\n- a list\n")
            .await
            .unwrap();
        assert_eq!(toc, TableOfContents { items: vec![] });
        assert_eq!(serde_json::to_string(&toc).unwrap(), "{\"items\":[]}");

        let toc = get_table_of_contents("").await.unwrap();
        assert!(toc.is_empty());
    }

    #[tokio::test]
    async fn test_two_levels() {
        let md = "# Multi Step Form\n\nIntro.\n\n## Visão Geral\n\nText.\n\n## Como Usar\n";
        let toc = get_table_of_contents(md).await.unwrap();

        assert_eq!(toc.items.len(), 1);
        let root = &toc.items[0];
        assert_eq!(root.title, "Multi Step Form");
        assert_eq!(root.url.as_deref(), Some("#multi-step-form"));
        assert_eq!(
            titles_and_urls(&root.items),
            vec![
                ("Visão Geral".to_string(), Some("#visao-geral".to_string())),
                ("Como Usar".to_string(), Some("#como-usar".to_string())),
            ]
        );
        for child in &root.items {
            assert_eq!(child.url, Some(format!("#{}", normalize(&child.title))));
            assert!(child.items.is_empty());
        }
    }

    #[tokio::test]
    async fn test_explicit_link_heading() {
        let toc = get_table_of_contents("# Guide\n\n## [Custom Label](/docs/page)\n")
            .await
            .unwrap();
        let link = &toc.items[0].items[0];
        assert_eq!(link.title, "Custom Label");
        assert_eq!(link.url.as_deref(), Some("/docs/page"));
    }

    #[tokio::test]
    async fn test_deep_levels_stay_in_model() {
        let md = "# A\n## B\n### C\n#### D\n";
        let toc = get_table_of_contents(md).await.unwrap();
        let flat = toc.flatten();
        assert_eq!(flat.len(), 4);
        assert_eq!(flat[3].title, "D");
        assert_eq!(flat[3].depth, 3);
        assert_eq!(toc.item_ids(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_options() {
        let md = "# Title\n## Contents\n### Install\n### Configure\n## License\n";
        let options = TocOptions::default().with_heading("contents").unwrap();
        let toc = get_table_of_contents_with(md, &options).await.unwrap();
        assert_eq!(
            titles_and_urls(&toc.items),
            vec![
                ("Install".to_string(), Some("#install".to_string())),
                ("Configure".to_string(), Some("#configure".to_string())),
            ]
        );
    }

    #[test]
    fn test_code_heading_has_no_title() {
        let toc = table_of_contents("# `config`\n", &TocOptions::default());
        assert_eq!(toc.items, vec![TocItem::default()]);
    }

    #[test]
    fn test_duplicate_titles_share_slug() {
        let toc = table_of_contents("# Step\n# Step\n", &TocOptions::default());
        let urls: Vec<_> = toc.items.iter().map(|i| i.url.clone()).collect();
        assert_eq!(urls, vec![Some("#step".to_string()), Some("#step".to_string())]);
    }

    #[tokio::test]
    async fn test_deeply_nested_quotes() {
        let md = format!("# H\n\n{}x\n", "> ".repeat(50_000));
        let toc = get_table_of_contents(&md).await.unwrap();
        assert_eq!(titles_and_urls(&toc.items), vec![("H".to_string(), Some("#h".to_string()))]);
    }
}

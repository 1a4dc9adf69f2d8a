use serde::{Deserialize, Serialize};

/// One heading-derived entry of a table of contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<TocItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOfContents {
    #[serde(default)]
    pub items: Vec<TocItem>,
}

impl TableOfContents {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Anchor ids worth observing for the active-heading tracker: the
    /// fragments of root items and their direct children, in order.
    pub fn item_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .flat_map(|item| std::iter::once(item).chain(item.items.iter()))
            .filter_map(|item| item.url.as_deref())
            .map(|url| url.split('#').nth(1).unwrap_or_default())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Flatten the tree into depth-annotated entries, depth 0 at the root
    pub fn flatten(&self) -> Vec<FlatTocItem> {
        let mut result = Vec::new();
        flatten_recursive(&self.items, 0, &mut result);
        result
    }
}

fn flatten_recursive(items: &[TocItem], depth: usize, result: &mut Vec<FlatTocItem>) {
    for item in items {
        result.push(FlatTocItem {
            title: item.title.clone(),
            url: item.url.clone(),
            depth,
        });
        flatten_recursive(&item.items, depth + 1, result);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatTocItem {
    pub title: String,
    pub url: Option<String>,
    pub depth: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, url: Option<&str>, items: Vec<TocItem>) -> TocItem {
        TocItem {
            title: title.to_string(),
            url: url.map(str::to_string),
            items,
        }
    }

    #[test]
    fn test_item_ids_stop_at_second_level() {
        let toc = TableOfContents {
            items: vec![
                item(
                    "Intro",
                    Some("#intro"),
                    vec![item(
                        "Usage",
                        Some("#usage"),
                        vec![item("Deep", Some("#deep"), vec![])],
                    )],
                ),
                item("External", Some("/docs/page"), vec![]),
                item("Other page", Some("/docs/other#section"), vec![]),
                item("", None, vec![]),
            ],
        };
        assert_eq!(toc.item_ids(), vec!["intro", "usage", "section"]);
    }

    #[test]
    fn test_serialized_shape() {
        let toc = TableOfContents {
            items: vec![item("A", Some("#a"), vec![item("B", None, vec![])])],
        };
        assert_eq!(
            serde_json::to_value(&toc).unwrap(),
            serde_json::json!({
                "items": [{ "title": "A", "url": "#a", "items": [{ "title": "B" }] }]
            })
        );
        let empty: TableOfContents = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_flatten_depths() {
        let toc = TableOfContents {
            items: vec![item("A", None, vec![item("B", None, vec![])]), item("C", None, vec![])],
        };
        let depths: Vec<(String, usize)> = toc
            .flatten()
            .into_iter()
            .map(|e| (e.title, e.depth))
            .collect();
        assert_eq!(
            depths,
            vec![("A".to_string(), 0), ("B".to_string(), 1), ("C".to_string(), 0)]
        );
    }
}

//! Page assembly: turns the shared page map into the ordered page list the renderer consumes.

use serde::Serialize;

use crate::layout::paginator::{LeftColumn, PageMap, RightColumn};
use crate::models::resume::Basics;

/// One rendered page. `header` and `summary` are only set on page 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub page_number: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Basics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub left_column: LeftColumn,
    pub right_column: RightColumn,
}

/// Orders pages by index and numbers them 1, 2, 3, … regardless of the indices
/// the column passes used. A column that finished early keeps empty arrays.
pub fn assemble_pages(pages: PageMap) -> Vec<PageContent> {
    pages
        .into_pages()
        .enumerate()
        .map(|(position, page)| PageContent {
            page_number: position + 1,
            header: page.header,
            summary: page.summary,
            left_column: page.left,
            right_column: page.right,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::paginator::{PageHeader, PagedEntry};
    use crate::layout::units::UnitId;
    use crate::models::resume::WorkItem;

    fn header() -> PageHeader {
        PageHeader {
            basics: Basics {
                name: "Ada".to_string(),
                ..Default::default()
            },
            summary: None,
        }
    }

    #[test]
    fn test_pages_numbered_from_one_in_index_order() {
        let mut map = PageMap::new(header());
        // Created out of order, the way the right pass may reach page 2 before page 1 exists.
        map.page_mut(2).right.achievements.push("c".to_string());
        map.page_mut(0).right.achievements.push("a".to_string());
        map.page_mut(1).right.achievements.push("b".to_string());

        let pages = assemble_pages(map);
        let numbers: Vec<usize> = pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(pages[0].right_column.achievements, vec!["a"]);
        assert_eq!(pages[2].right_column.achievements, vec!["c"]);
    }

    #[test]
    fn test_sparse_indices_are_renumbered_contiguously() {
        let mut map = PageMap::new(header());
        map.page_mut(0);
        map.page_mut(4);
        let pages = assemble_pages(map);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].page_number, 2);
    }

    #[test]
    fn test_header_only_on_first_page() {
        let mut map = PageMap::new(header());
        map.page_mut(1);
        map.page_mut(0);
        let pages = assemble_pages(map);
        assert!(pages[0].header.is_some());
        assert!(pages[1].header.is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let mut map = PageMap::new(header());
        map.page_mut(0).left.work.push(PagedEntry {
            source: UnitId(1),
            continued: false,
            entry: WorkItem {
                company: "Acme".to_string(),
                ..Default::default()
            },
        });
        let json = serde_json::to_value(assemble_pages(map)).unwrap();
        let page = &json[0];
        assert_eq!(page["pageNumber"], 1);
        assert_eq!(page["header"]["name"], "Ada");
        assert!(page.get("summary").is_none());
        assert_eq!(page["leftColumn"]["work"][0]["company"], "Acme");
        assert_eq!(page["leftColumn"]["work"][0]["continued"], false);
        assert!(page["leftColumn"]["work"][0].get("source").is_none());
        assert_eq!(page["leftColumn"]["workContinuation"], false);
        assert_eq!(page["rightColumn"]["certificationsContinuation"], false);
    }
}

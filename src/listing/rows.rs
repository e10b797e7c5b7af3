use serde::Deserialize;

use crate::listing::history::{Location, NavigationHistory};

/// Kind of a remote entry, carried on the wire as the GraphQL `__typename`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::File => "File",
            EntryKind::Directory => "Directory",
        }
    }
}

/// One file or directory record from the listing service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Entry {
    pub id: String,
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "__typename")]
    pub kind: EntryKind,
}

/// Server-side paging totals for the current query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_count: u64,
    pub total_rows: u64,
}

/// One page of listing results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListingPage {
    pub entries: Vec<Entry>,
    pub pagination: Pagination,
}

/// A row handed to the table: either a server entry or the synthetic
/// "go to parent" marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRow {
    UpDir { id: String, path: String },
    Entry(Entry),
}

/// What activating a row does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Ascend,
    Descend(String),
    /// Files are not navigable.
    Disabled,
}

impl DisplayRow {
    fn up_to(parent: &Location) -> Self {
        DisplayRow::UpDir {
            id: parent.id.clone(),
            path: parent.path.clone(),
        }
    }

    pub fn action(&self) -> RowAction {
        match self {
            DisplayRow::UpDir { .. } => RowAction::Ascend,
            DisplayRow::Entry(entry) => match entry.kind {
                EntryKind::Directory => RowAction::Descend(entry.path.clone()),
                EntryKind::File => RowAction::Disabled,
            },
        }
    }
}

/// Build the visible rows: the up marker (when below root) followed by the
/// server entries in server order.
pub fn project_rows(history: &NavigationHistory, page: Option<&ListingPage>) -> Vec<DisplayRow> {
    let entries = page.map(|p| p.entries.as_slice()).unwrap_or_default();
    let mut rows = Vec::with_capacity(entries.len() + 1);
    if let Some(parent) = history.parent() {
        rows.push(DisplayRow::up_to(parent));
    }
    rows.extend(entries.iter().cloned().map(DisplayRow::Entry));
    rows
}

/// Total row count reported to the paginator.
///
/// `total_rows` at `/`, otherwise `total_rows + page_count`. Absent data
/// counts as zero pages and zero rows.
pub fn row_count(current: &Location, page: Option<&ListingPage>) -> u64 {
    let pagination = page.map(|p| p.pagination).unwrap_or_default();
    let up_dir_rows = if current.is_root() {
        0
    } else {
        pagination.page_count
    };
    pagination.total_rows + up_dir_rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, kind: EntryKind) -> Entry {
        let path = format!("/a/{}", name);
        Entry {
            id: path.clone(),
            path,
            name: name.to_string(),
            size: 512,
            kind,
        }
    }

    fn page(entries: Vec<Entry>, page_count: u64, total_rows: u64) -> ListingPage {
        ListingPage {
            entries,
            pagination: Pagination {
                page_count,
                total_rows,
            },
        }
    }

    #[test]
    fn root_has_no_up_row() {
        let history = NavigationHistory::new();
        let data = page(
            vec![entry("x", EntryKind::File), entry("y", EntryKind::Directory)],
            1,
            10,
        );
        let rows = project_rows(&history, Some(&data));
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| !matches!(r, DisplayRow::UpDir { .. })));
        assert_eq!(row_count(history.current(), Some(&data)), 10);
    }

    #[test]
    fn subdirectory_prepends_up_row_to_parent() {
        let mut history = NavigationHistory::new();
        history.descend("/a");
        let data = page(vec![entry("x", EntryKind::File)], 2, 50);
        let rows = project_rows(&history, Some(&data));
        assert_eq!(
            rows[0],
            DisplayRow::UpDir {
                id: "/".into(),
                path: "/".into()
            }
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(row_count(history.current(), Some(&data)), 52);
    }

    #[test]
    fn entries_keep_server_order() {
        let mut history = NavigationHistory::new();
        history.descend("/a");
        let names = ["zeta", "alpha", "mid"];
        let data = page(
            names
                .iter()
                .map(|n| entry(n, EntryKind::File))
                .collect(),
            1,
            3,
        );
        let rows = project_rows(&history, Some(&data));
        let got: Vec<&str> = rows
            .iter()
            .filter_map(|r| match r {
                DisplayRow::Entry(e) => Some(e.name.as_str()),
                DisplayRow::UpDir { .. } => None,
            })
            .collect();
        assert_eq!(got, names);
    }

    #[test]
    fn no_data_below_root_still_shows_up_row() {
        let mut history = NavigationHistory::new();
        history.descend("/a");
        let rows = project_rows(&history, None);
        assert_eq!(rows.len(), 1);
        assert!(matches!(rows[0], DisplayRow::UpDir { .. }));
        assert_eq!(row_count(history.current(), None), 0);
    }

    #[test]
    fn re_entering_root_shows_up_row_without_extra_count() {
        let mut history = NavigationHistory::new();
        history.descend("/");
        let data = page(vec![], 3, 60);
        let rows = project_rows(&history, Some(&data));
        assert!(matches!(rows[0], DisplayRow::UpDir { .. }));
        assert_eq!(row_count(history.current(), Some(&data)), 60);
    }

    #[test]
    fn row_actions() {
        let up = DisplayRow::UpDir {
            id: "/".into(),
            path: "/".into(),
        };
        assert_eq!(up.action(), RowAction::Ascend);
        let dir = DisplayRow::Entry(entry("sub", EntryKind::Directory));
        assert_eq!(dir.action(), RowAction::Descend("/a/sub".into()));
        let file = DisplayRow::Entry(entry("f.txt", EntryKind::File));
        assert_eq!(file.action(), RowAction::Disabled);
    }

    #[test]
    fn entry_kind_from_typename() {
        let json = r#"{
            "__typename": "Directory",
            "id": "/etc",
            "path": "/etc",
            "name": "etc",
            "size": 4096
        }"#;
        let e: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(e.kind, EntryKind::Directory);
        assert_eq!(e.size, 4096);
    }

    #[test]
    fn pagination_uses_camel_case() {
        let json = r#"{ "entries": [], "pagination": { "pageCount": 4, "totalRows": 90 } }"#;
        let p: ListingPage = serde_json::from_str(json).unwrap();
        assert_eq!(p.pagination.page_count, 4);
        assert_eq!(p.pagination.total_rows, 90);
    }
}

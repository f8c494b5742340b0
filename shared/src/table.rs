//! Search, sort and pagination for tabular feature data.

use std::cmp::Ordering;
use std::fmt;

use crate::format::format_number;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One cell, typed for comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }

    /// Raw string used for search matching.
    pub fn search_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Numbers before text, empties last.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
            (CellValue::Empty, _) => Ordering::Greater,
            (_, CellValue::Empty) => Ordering::Less,
            (CellValue::Number(_), CellValue::Text(_)) => Ordering::Less,
            (CellValue::Text(_), CellValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Empty => f.write_str("-"),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Text(if value { "YES" } else { "NO" }.to_string())
    }
}

/// A record that can be shown in a data table.
pub trait TableRow {
    /// Every searchable, sortable field keyed by its column key.
    fn fields(&self) -> Vec<(&'static str, CellValue)>;

    fn cell(&self, key: &str) -> CellValue {
        self.fields()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
            .unwrap_or(CellValue::Empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

/// User-controlled view state of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub search: String,
    pub sort: Option<SortSpec>,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
    pub show_all: bool,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
            show_all: false,
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Ascending on a new key, flips direction on the current one.
    pub fn toggle_sort(&mut self, key: &str) {
        let direction = match &self.sort {
            Some(spec) if spec.key == key && spec.direction == SortDirection::Asc => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        self.sort = Some(SortSpec { key: key.to_string(), direction });
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.page = (self.page + 1).min(total_pages.max(1));
    }

    /// Clamps into the current page count before stepping back.
    pub fn prev_page(&mut self, total_pages: usize) {
        self.page = self.page.min(total_pages.max(1)).saturating_sub(1).max(1);
    }

    pub fn toggle_show_all(&mut self) {
        self.show_all = !self.show_all;
    }

    pub fn sort_arrow(&self, key: &str) -> Option<&'static str> {
        self.sort
            .as_ref()
            .filter(|spec| spec.key == key)
            .map(|spec| spec.direction.arrow())
    }
}

/// The visible slice of a table plus footer numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a, R> {
    pub rows: Vec<&'a R>,
    /// Rows matching the search, before pagination
    pub total: usize,
    pub total_pages: usize,
    /// Current page after clamping into `1..=total_pages`
    pub page: usize,
    /// 1-based index of the first visible row, 0 when empty
    pub showing_from: usize,
    pub showing_to: usize,
    pub paged: bool,
    /// Whether the Show All toggle is worth offering
    pub can_show_all: bool,
}

impl<'a, R: TableRow> TableView<'a, R> {
    pub fn build(rows: &'a [R], state: &TableState) -> Self {
        let needle = state.search.to_lowercase();
        let mut matched: Vec<(&'a R, Vec<(&'static str, CellValue)>)> = rows
            .iter()
            .map(|row| (row, row.fields()))
            .filter(|(_, fields)| {
                needle.is_empty()
                    || fields
                        .iter()
                        .any(|(_, v)| v.search_text().to_lowercase().contains(&needle))
            })
            .collect();

        if let Some(spec) = &state.sort {
            let cell = |fields: &[(&'static str, CellValue)]| {
                fields
                    .iter()
                    .find(|(k, _)| *k == spec.key)
                    .map(|(_, v)| v.clone())
                    .unwrap_or(CellValue::Empty)
            };
            // `sort_by` is stable, ties keep their source order.
            matched.sort_by(|(_, a), (_, b)| {
                let ord = cell(a.as_slice()).compare(&cell(b.as_slice()));
                match spec.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        let total = matched.len();
        let page_size = state.page_size.max(1);
        let total_pages = (total + page_size - 1) / page_size;
        let page = state.page.clamp(1, total_pages.max(1));
        let paged = !state.show_all;

        let (start, end) = if paged {
            let start = ((page - 1) * page_size).min(total);
            (start, (start + page_size).min(total))
        } else {
            (0, total)
        };

        Self {
            rows: matched[start..end].iter().map(|(row, _)| *row).collect(),
            total,
            total_pages,
            page,
            showing_from: if end > start { start + 1 } else { 0 },
            showing_to: end,
            paged,
            can_show_all: total > page_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_pager(&self) -> bool {
        self.paged && self.total_pages > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq)]
    struct Game {
        name: String,
        players: f64,
    }

    impl TableRow for Game {
        fn fields(&self) -> Vec<(&'static str, CellValue)> {
            vec![("name", self.name.as_str().into()), ("players", self.players.into())]
        }
    }

    fn games(n: usize) -> Vec<Game> {
        (0..n)
            .map(|i| Game { name: format!("game-{:03}", i), players: (i % 7) as f64 })
            .collect()
    }

    #[test]
    fn test_unique_substring_search_returns_one_row() {
        let rows = games(40);
        let mut state = TableState::default();
        state.set_search("GAME-017");
        let view = TableView::build(&rows, &state);
        assert_eq!(view.total, 1);
        assert_eq!(view.rows[0].name, "game-017");
    }

    #[test]
    fn test_search_resets_page() {
        let mut state = TableState::default();
        state.next_page(5);
        state.next_page(5);
        assert_eq!(state.page, 3);
        state.set_search("x");
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_toggle_sort_cycle() {
        let mut state = TableState::default();
        state.toggle_sort("players");
        assert_eq!(state.sort_arrow("players"), Some("↑"));
        state.toggle_sort("players");
        assert_eq!(state.sort_arrow("players"), Some("↓"));
        state.toggle_sort("players");
        assert_eq!(state.sort_arrow("players"), Some("↑"));
        state.toggle_sort("name");
        assert_eq!(state.sort_arrow("players"), None);
        assert_eq!(state.sort_arrow("name"), Some("↑"));
    }

    #[test]
    fn test_numeric_sort_is_numeric_and_stable() {
        let rows = vec![
            Game { name: "a".into(), players: 10.0 },
            Game { name: "b".into(), players: 9.0 },
            Game { name: "c".into(), players: 10.0 },
        ];
        let mut state = TableState::default();
        state.toggle_sort("players");
        let names: Vec<_> = TableView::build(&rows, &state).rows.iter().map(|g| g.name.clone()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);

        state.toggle_sort("players");
        let names: Vec<_> = TableView::build(&rows, &state).rows.iter().map(|g| g.name.clone()).collect();
        assert_eq!(names, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_empty_cells_sort_last() {
        assert_eq!(CellValue::Empty.compare(&CellValue::Number(1.0)), Ordering::Greater);
        assert_eq!(CellValue::text("").compare(&CellValue::Empty), Ordering::Equal);
        assert_eq!(CellValue::Number(2.0).compare(&CellValue::text("a")), Ordering::Less);
    }

    #[rstest]
    #[case(25, 10, 3, 5)]
    #[case(30, 10, 3, 10)]
    #[case(1, 10, 1, 1)]
    fn test_last_page_size(
        #[case] n: usize,
        #[case] page_size: usize,
        #[case] pages: usize,
        #[case] last: usize,
    ) {
        let rows = games(n);
        let mut state = TableState::new(page_size);
        state.page = pages;
        let view = TableView::build(&rows, &state);
        assert_eq!(view.total_pages, pages);
        assert_eq!(view.rows.len(), last);
        assert_eq!(view.showing_to, n);
    }

    #[test]
    fn test_show_all_and_empty() {
        let rows = games(25);
        let mut state = TableState::default();
        state.toggle_show_all();
        let view = TableView::build(&rows, &state);
        assert_eq!(view.rows.len(), 25);
        assert!(!view.has_pager());
        assert!(view.can_show_all);

        state.set_search("no such game");
        let empty = TableView::build(&rows, &state);
        assert!(empty.is_empty());
        assert_eq!(empty.showing_from, 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_page_clamped_after_data_shrinks() {
        let rows = games(5);
        let mut state = TableState::default();
        state.page = 4;
        let view = TableView::build(&rows, &state);
        assert_eq!(view.page, 1);
        assert_eq!(view.rows.len(), 5);
    }

    #[test]
    fn test_previous_steps_back_from_clamped_page() {
        let mut state = TableState::new(10);
        let rows = games(50);
        for _ in 0..4 {
            state.next_page(TableView::build(&rows, &state).total_pages);
        }
        assert_eq!(TableView::build(&rows, &state).page, 5);

        let shrunk = games(15);
        let view = TableView::build(&shrunk, &state);
        assert_eq!((view.page, view.total_pages), (2, 2));

        state.prev_page(view.total_pages);
        assert_eq!(TableView::build(&shrunk, &state).page, 1);
        state.prev_page(view.total_pages);
        assert_eq!(state.page, 1);
    }

    proptest! {
        #[test]
        fn prop_pages_partition_rows(n in 0usize..200, page_size in 1usize..25) {
            let rows = games(n);
            let mut state = TableState::new(page_size);
            let first = TableView::build(&rows, &state);
            let mut seen = 0;
            for page in 1..=first.total_pages {
                state.page = page;
                let view = TableView::build(&rows, &state);
                let expected = if page == first.total_pages && n % page_size != 0 {
                    n % page_size
                } else {
                    page_size
                };
                prop_assert_eq!(view.rows.len(), expected);
                seen += view.rows.len();
            }
            prop_assert_eq!(seen, n);
        }
    }
}

//! Content view state: the rendered result list and the detail overlay

use std::collections::BTreeSet;

use super::types::{DetailRecord, ResultItem};

/// A result card with its favorite marker
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRow {
    pub item: ResultItem,
    pub favorite: bool,
}

/// Search results currently on screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsPage {
    pub query: String,
    pub rows: Vec<ResultRow>,
    pub selected_index: usize,
    /// Last page rendered into `rows`
    pub page: u32,
    pub total_results: u32,
    /// Pages already appended (append mode guard against duplicate rows)
    pub loaded_pages: BTreeSet<u32>,
}

impl ResultsPage {
    pub fn caption(&self) -> String {
        format!(
            "Showing {} of {} results for \"{}\"",
            self.rows.len(),
            self.total_results,
            self.query
        )
    }
}

/// The detail overlay contents
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView {
    pub record: DetailRecord,
    pub favorite: bool,
}

/// Represents the current view in the results area
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ContentView {
    #[default]
    Empty,
    /// The provider reported no matches for the query
    NoMatches { query: String },
    SearchResults(ResultsPage),
    Favorites {
        rows: Vec<ResultRow>,
        selected_index: usize,
    },
}

impl ContentView {
    pub fn rows(&self) -> &[ResultRow] {
        match self {
            ContentView::SearchResults(page) => &page.rows,
            ContentView::Favorites { rows, .. } => rows,
            ContentView::Empty | ContentView::NoMatches { .. } => &[],
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        match self {
            ContentView::SearchResults(page) if !page.rows.is_empty() => Some(page.selected_index),
            ContentView::Favorites { rows, selected_index } if !rows.is_empty() => Some(*selected_index),
            _ => None,
        }
    }

    pub fn selected_row(&self) -> Option<&ResultRow> {
        self.selected_index().and_then(|i| self.rows().get(i))
    }

    pub fn select(&mut self, index: usize) {
        let (len, selected) = match self {
            ContentView::SearchResults(page) => (page.rows.len(), &mut page.selected_index),
            ContentView::Favorites { rows, selected_index } => (rows.len(), selected_index),
            ContentView::Empty | ContentView::NoMatches { .. } => return,
        };
        if len > 0 {
            *selected = index.min(len - 1);
        }
    }

    pub fn move_up(&mut self) {
        if let Some(index) = self.selected_index() {
            self.select(index.saturating_sub(1));
        }
    }

    pub fn move_down(&mut self) {
        if let Some(index) = self.selected_index() {
            self.select(index + 1);
        }
    }

    fn rows_mut(&mut self) -> Option<&mut Vec<ResultRow>> {
        match self {
            ContentView::SearchResults(page) => Some(&mut page.rows),
            ContentView::Favorites { rows, .. } => Some(rows),
            ContentView::Empty | ContentView::NoMatches { .. } => None,
        }
    }
}

/// State for the results area and the detail overlay
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub view: ContentView,
    pub detail: Option<DetailView>,
    /// Provider requests issued and not yet completed
    pub in_flight: usize,
}

impl ContentState {
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn request_started(&mut self) {
        self.in_flight += 1;
    }

    pub fn request_finished(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Update every rendered control showing `id`
    pub fn mark_favorite(&mut self, id: &str, favorite: bool) -> usize {
        let mut updated = 0;
        if let Some(rows) = self.view.rows_mut() {
            for row in rows.iter_mut().filter(|row| row.item.id == id) {
                row.favorite = favorite;
                updated += 1;
            }
        }
        if let Some(detail) = self.detail.as_mut().filter(|d| d.record.id == id) {
            detail.favorite = favorite;
            updated += 1;
        }
        updated
    }
}

//! Main application model with state management

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use anyhow::Result;

use super::content::{ContentState, ContentView, DetailView, ResultRow, ResultsPage};
use super::favorites::Favorites;
use super::history::{BackOutcome, HistoryEntry, NavigationHistory};
use super::provider::{ProviderError, SearchPage};
use super::session::{PaginationControls, PaginationMode, SearchRequest, SearchSession};
use super::store::{PreferenceStore, THEME_KEY};
use super::types::{
    ActiveSection, DetailRecord, ResultItem, ResultsSource, SearchFilters, Theme, UiState,
};

const ERROR_DISPLAY_DURATION: Duration = Duration::from_secs(5);

/// Behavior knobs the model needs from the configuration
#[derive(Clone, Copy, Debug)]
pub struct ModelSettings {
    pub pagination_mode: PaginationMode,
    pub min_query_len: usize,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            pagination_mode: PaginationMode::Replace,
            min_query_len: 2,
        }
    }
}

/// What happened to a completed search response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Rendered { rows: usize },
    /// Empty state shown for a first page with no matches
    NoMatches,
    /// The session moved on; the response was dropped
    Stale,
    /// A continuation failed; rendered rows were kept
    ContinuationFailed(ProviderError),
    /// A first page failed; the list was cleared
    Failed(ProviderError),
}

/// Main application model containing all state
pub struct AppModel {
    ui_state: UiState,
    content_state: ContentState,
    session: Option<SearchSession>,
    history: NavigationHistory,
    favorites: Favorites,
    store: Box<dyn PreferenceStore>,
    settings: ModelSettings,
    pending_detail: Option<String>,
    should_quit: bool,
}

impl AppModel {
    pub fn new(store: Box<dyn PreferenceStore>, settings: ModelSettings) -> Self {
        let favorites = Favorites::load(store.as_ref());
        let theme = store
            .get(THEME_KEY)
            .map(|value| Theme::parse(&value))
            .unwrap_or_default();

        let ui_state = UiState {
            theme,
            ..UiState::default()
        };

        Self {
            ui_state,
            content_state: ContentState::default(),
            session: None,
            history: NavigationHistory::new(),
            favorites,
            store,
            settings,
            pending_detail: None,
            should_quit: false,
        }
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    pub fn get_ui_state(&self) -> UiState {
        self.ui_state.clone()
    }

    pub fn get_content_state(&self) -> ContentState {
        self.content_state.clone()
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui_state
    }

    pub fn content_state(&self) -> &ContentState {
        &self.content_state
    }

    pub fn session(&self) -> Option<&SearchSession> {
        self.session.as_ref()
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Previous/Next state, `None` when no controls should be drawn
    pub fn pagination_controls(&self) -> Option<PaginationControls> {
        if self.ui_state.source != ResultsSource::Search {
            return None;
        }
        let ContentView::SearchResults(results) = &self.content_state.view else {
            return None;
        };
        let session = self.session.as_ref()?;
        let total_pages = session.total_pages().unwrap_or(0);

        let controls = match self.settings.pagination_mode {
            PaginationMode::Replace => PaginationControls {
                page: session.page(),
                total_pages,
                previous_enabled: session.has_previous(),
                next_enabled: session.has_next(),
                mode: PaginationMode::Replace,
            },
            PaginationMode::Append => PaginationControls {
                page: results.page,
                total_pages,
                previous_enabled: false,
                next_enabled: session.has_next()
                    && session.page() == results.page
                    && (results.rows.len() as u32) < session.total_results().unwrap_or(0),
                mode: PaginationMode::Append,
            },
        };
        Some(controls)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, quit: bool) {
        self.should_quit = quit;
    }

    // ========================================================================
    // Input fields & focus
    // ========================================================================

    pub fn cycle_section_forward(&mut self) {
        self.ui_state.active_section = self.ui_state.active_section.next();
    }

    pub fn cycle_section_backward(&mut self) {
        self.ui_state.active_section = self.ui_state.active_section.prev();
    }

    pub fn set_active_section(&mut self, section: ActiveSection) {
        self.ui_state.active_section = section;
    }

    pub fn append_to_search(&mut self, c: char) -> String {
        self.ui_state.search_input.push(c);
        self.ui_state.search_input.clone()
    }

    pub fn backspace_search(&mut self) -> String {
        self.ui_state.search_input.pop();
        self.ui_state.search_input.clone()
    }

    pub fn search_input(&self) -> &str {
        &self.ui_state.search_input
    }

    /// Empty the search box and the results
    pub fn clear_search(&mut self) {
        self.ui_state.search_input.clear();
        self.clear_results();
    }

    pub fn append_to_year(&mut self, c: char) {
        if c.is_ascii_digit() && self.ui_state.year_input.len() < 4 {
            self.ui_state.year_input.push(c);
        }
    }

    pub fn backspace_year(&mut self) {
        self.ui_state.year_input.pop();
    }

    pub fn year_input(&self) -> &str {
        &self.ui_state.year_input
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.ui_state.filters
    }

    pub fn move_selection_up(&mut self) {
        self.content_state.view.move_up();
    }

    pub fn move_selection_down(&mut self) {
        self.content_state.view.move_down();
    }

    pub fn selected_item_id(&self) -> Option<String> {
        self.content_state
            .view
            .selected_row()
            .map(|row| row.item.id.clone())
    }

    // ========================================================================
    // Errors & popups
    // ========================================================================

    pub fn set_error(&mut self, message: String) {
        self.ui_state.error_message = Some(message);
        self.ui_state.error_timestamp = Some(Instant::now());
    }

    pub fn clear_error(&mut self) {
        self.ui_state.error_message = None;
        self.ui_state.error_timestamp = None;
    }

    pub fn has_error(&self) -> bool {
        self.ui_state.error_message.is_some()
    }

    pub fn auto_clear_old_errors(&mut self) {
        if let Some(timestamp) = self.ui_state.error_timestamp {
            if timestamp.elapsed() >= ERROR_DISPLAY_DURATION {
                self.clear_error();
            }
        }
    }

    pub fn show_help_popup(&mut self) {
        self.ui_state.show_help_popup = true;
    }

    pub fn hide_help_popup(&mut self) {
        self.ui_state.show_help_popup = false;
    }

    pub fn is_help_popup_open(&self) -> bool {
        self.ui_state.show_help_popup
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let theme = self.ui_state.theme.toggle();
        self.store.set(THEME_KEY, theme.as_str().to_string())?;
        self.ui_state.theme = theme;
        tracing::debug!(theme = theme.as_str(), "Theme changed");
        Ok(theme)
    }

    // ========================================================================
    // Search session
    // ========================================================================

    /// Drop the session and empty the list. Late responses become stale.
    pub fn clear_results(&mut self) {
        self.cancel_pending_detail();
        self.session = None;
        self.ui_state.source = ResultsSource::Search;
        self.content_state.view = ContentView::Empty;
    }

    /// True when the trimmed query is long enough to send
    pub fn is_searchable(&self, raw_query: &str) -> bool {
        raw_query.trim().chars().count() >= self.settings.min_query_len
    }

    /// Start a new session for `raw_query`.
    ///
    /// Returns the request to issue, or `None` when the query is too short and
    /// the results were cleared instead.
    pub fn submit_search(&mut self, raw_query: &str) -> Option<SearchRequest> {
        let query = raw_query.trim();
        if !self.is_searchable(query) {
            tracing::debug!(query, "Query too short, clearing results");
            self.clear_results();
            return None;
        }

        self.cancel_pending_detail();
        let session = SearchSession::start(query.to_string(), self.ui_state.filters.clone());
        let request = session.request();
        self.session = Some(session);
        self.ui_state.source = ResultsSource::Search;
        self.clear_error();
        self.content_state.request_started();
        tracing::debug!(query, filters = ?request.filters, "Search submitted");
        Some(request)
    }

    /// Replace the active filters and resubmit the current query at page 1.
    ///
    /// Without an active session the filters are only remembered.
    pub fn apply_filters(&mut self, filters: SearchFilters) -> Option<SearchRequest> {
        self.ui_state.filters = filters;
        let query = self.session.as_ref()?.query().to_string();
        self.submit_search(&query)
    }

    /// Move the session to `page` (clamped).
    ///
    /// `None` when there is nothing to paginate or the page would not change.
    pub fn request_page(&mut self, page: u32) -> Option<SearchRequest> {
        if self.ui_state.source != ResultsSource::Search {
            return None;
        }
        let ContentView::SearchResults(results) = &self.content_state.view else {
            return None;
        };
        let rendered_page = results.page;
        let session = self.session.as_mut()?;
        let mut target = session.clamp_page(page)?;

        match self.settings.pagination_mode {
            PaginationMode::Replace => {
                if target == session.page() {
                    return None;
                }
            }
            PaginationMode::Append => {
                if session.page() > rendered_page {
                    tracing::debug!(page = session.page(), "Continuation already in flight");
                    return None;
                }
                // pages are appended one at a time, in order
                target = target.min(rendered_page + 1);
                if target <= rendered_page {
                    return None;
                }
            }
        }

        session.set_page(target);
        self.content_state.request_started();
        tracing::debug!(page = target, "Page requested");
        Some(session.request())
    }

    pub fn next_page(&mut self) -> Option<SearchRequest> {
        let page = self.session.as_ref()?.page();
        self.request_page(page + 1)
    }

    pub fn previous_page(&mut self) -> Option<SearchRequest> {
        if self.settings.pagination_mode == PaginationMode::Append {
            return None;
        }
        let page = self.session.as_ref()?.page();
        self.request_page(page.saturating_sub(1))
    }

    /// Re-issue the current session's search after leaving the favorites view
    pub fn resume_search(&mut self) -> Option<SearchRequest> {
        self.ui_state.source = ResultsSource::Search;
        let session = self.session.as_ref()?;
        match self.settings.pagination_mode {
            PaginationMode::Replace => {
                let request = session.request();
                self.content_state.request_started();
                Some(request)
            }
            PaginationMode::Append => {
                let query = session.query().to_string();
                self.submit_search(&query)
            }
        }
    }

    /// Apply a completed search response.
    ///
    /// The in-flight counter is released on every path.
    pub fn apply_search_result(
        &mut self,
        request: &SearchRequest,
        result: Result<SearchPage, ProviderError>,
    ) -> SearchOutcome {
        self.content_state.request_finished();

        let is_current = self.ui_state.source == ResultsSource::Search
            && self
                .session
                .as_ref()
                .is_some_and(|session| session.is_current(request));
        if !is_current {
            tracing::debug!(query = %request.query, page = request.page, "Discarding stale search response");
            return SearchOutcome::Stale;
        }

        let continuation = self.is_continuation(request);

        match result {
            Ok(page) if !page.items.is_empty() => {
                if let Some(session) = self.session.as_mut() {
                    session.record_total(page.total_results);
                }
                let rows = self.render_page(request, page);
                SearchOutcome::Rendered { rows }
            }
            Ok(_) | Err(ProviderError::NotFound) => {
                if continuation {
                    self.roll_back_page();
                    SearchOutcome::ContinuationFailed(ProviderError::NotFound)
                } else {
                    if let Some(session) = self.session.as_mut() {
                        session.record_total(0);
                    }
                    self.content_state.view = ContentView::NoMatches {
                        query: request.query.clone(),
                    };
                    SearchOutcome::NoMatches
                }
            }
            Err(e) => {
                if continuation {
                    self.roll_back_page();
                    SearchOutcome::ContinuationFailed(e)
                } else {
                    self.content_state.view = ContentView::Empty;
                    SearchOutcome::Failed(e)
                }
            }
        }
    }

    /// True when rows for the same query are already on screen
    fn is_continuation(&self, request: &SearchRequest) -> bool {
        match &self.content_state.view {
            ContentView::SearchResults(results) => {
                request.page > 1 && results.query == request.query
            }
            _ => false,
        }
    }

    fn roll_back_page(&mut self) {
        let ContentView::SearchResults(results) = &self.content_state.view else {
            return;
        };
        if let Some(session) = self.session.as_mut() {
            session.set_page(results.page);
        }
    }

    fn to_rows(&self, items: Vec<ResultItem>) -> Vec<ResultRow> {
        items
            .into_iter()
            .map(|item| {
                let favorite = self.favorites.contains(&item.id);
                ResultRow { item, favorite }
            })
            .collect()
    }

    fn render_page(&mut self, request: &SearchRequest, page: SearchPage) -> usize {
        let append = self.settings.pagination_mode == PaginationMode::Append && request.page > 1;
        let rows = self.to_rows(page.items);

        if append {
            if let ContentView::SearchResults(results) = &mut self.content_state.view {
                if results.query == request.query && results.loaded_pages.insert(request.page) {
                    results.rows.extend(rows);
                    results.page = request.page;
                    results.total_results = page.total_results;
                } else {
                    tracing::debug!(page = request.page, "Page already rendered, not appending");
                }
                return results.rows.len();
            }
        }

        let count = rows.len();
        self.content_state.view = ContentView::SearchResults(ResultsPage {
            query: request.query.clone(),
            rows,
            selected_index: 0,
            page: request.page,
            total_results: page.total_results,
            loaded_pages: BTreeSet::from([request.page]),
        });
        count
    }

    // ========================================================================
    // Detail overlay
    // ========================================================================

    pub fn is_detail_open(&self) -> bool {
        let open = self.content_state.detail.is_some();
        debug_assert_eq!(
            open,
            matches!(self.history.top(), Some(HistoryEntry::DetailOverlay { .. }))
                && self.history.is_overlay_live()
        );
        open
    }

    pub fn begin_detail(&mut self, id: &str) {
        self.pending_detail = Some(id.to_string());
        self.content_state.request_started();
    }

    /// Forget a detail request still in flight; its response will be discarded
    fn cancel_pending_detail(&mut self) {
        if let Some(id) = self.pending_detail.take() {
            tracing::debug!(id, "Pending detail request abandoned");
        }
    }

    /// Show a fetched record and push the overlay history entry.
    ///
    /// Returns `Ok(false)` when the response was superseded by a later request.
    pub fn apply_detail(
        &mut self,
        id: &str,
        result: Result<DetailRecord, ProviderError>,
    ) -> Result<bool, ProviderError> {
        self.content_state.request_finished();

        if self.pending_detail.as_deref() != Some(id) {
            tracing::debug!(id, "Discarding stale detail response");
            return Ok(false);
        }
        self.pending_detail = None;

        let record = result?;
        let favorite = self.favorites.contains(&record.id);
        let pushed = self.history.push_overlay(&record.id);
        self.content_state.detail = Some(DetailView { record, favorite });
        tracing::debug!(id, pushed, depth = self.history.depth(), "Detail opened");
        Ok(true)
    }

    /// App-initiated close: hide the overlay and pop its history entry
    pub fn close_detail(&mut self) -> bool {
        if !self.history.dismiss_overlay() {
            return false;
        }
        self.content_state.detail = None;
        tracing::debug!(depth = self.history.depth(), "Detail closed");
        true
    }

    /// Physical back navigation: the entry is already consumed, only hide
    pub fn navigate_back(&mut self) -> BackOutcome {
        let outcome = self.history.back();
        if outcome == BackOutcome::OverlayClosed {
            self.content_state.detail = None;
            tracing::debug!(depth = self.history.depth(), "Detail closed by back navigation");
        }
        outcome
    }

    // ========================================================================
    // Favorites
    // ========================================================================

    /// Flip and persist `id`, then update every rendered control for it
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        let favorite = self.favorites.toggle(id, self.store.as_mut())?;
        let updated = self.content_state.mark_favorite(id, favorite);
        tracing::debug!(id, favorite, updated, "Favorite controls updated");
        Ok(favorite)
    }

    /// Favorite id for the selected row, or the open detail record
    pub fn favorite_target(&self) -> Option<String> {
        match &self.content_state.detail {
            Some(detail) => Some(detail.record.id.clone()),
            None => self.selected_item_id(),
        }
    }

    /// Switch the list to favorites. Returns the ids whose details must be fetched.
    pub fn begin_favorites_view(&mut self) -> Vec<String> {
        self.cancel_pending_detail();
        self.ui_state.source = ResultsSource::Favorites;
        self.content_state.view = ContentView::Favorites {
            rows: Vec::new(),
            selected_index: 0,
        };
        let ids = self.favorites.ids();
        if !ids.is_empty() {
            self.content_state.request_started();
        }
        ids
    }

    /// Render fetched favorite records. Ignored if the user already left the view.
    pub fn apply_favorites(&mut self, records: Vec<DetailRecord>) -> bool {
        self.content_state.request_finished();
        if self.ui_state.source != ResultsSource::Favorites {
            return false;
        }
        let items = records.iter().map(DetailRecord::summary).collect();
        let rows = self.to_rows(items);
        self.content_state.view = ContentView::Favorites {
            rows,
            selected_index: 0,
        };
        true
    }

    pub fn results_source(&self) -> ResultsSource {
        self.ui_state.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::{MemoryStore, FAVORITES_KEY};
    use crate::model::types::MediaType;

    fn model_with(settings: ModelSettings) -> AppModel {
        AppModel::new(Box::new(MemoryStore::default()), settings)
    }

    fn model() -> AppModel {
        model_with(ModelSettings::default())
    }

    fn item(id: &str) -> ResultItem {
        ResultItem {
            id: id.into(),
            title: format!("Title {id}"),
            year: "2005".into(),
            poster_url: None,
            media_type: "movie".into(),
        }
    }

    fn page_of(prefix: &str, count: usize, total: u32) -> SearchPage {
        SearchPage {
            items: (0..count).map(|i| item(&format!("{prefix}{i}"))).collect(),
            total_results: total,
        }
    }

    fn rendered_ids(model: &AppModel) -> Vec<String> {
        model
            .content_state()
            .view
            .rows()
            .iter()
            .map(|r| r.item.id.clone())
            .collect()
    }

    #[test]
    fn batman_first_page_enables_next_only() {
        let mut model = model();
        let request = model.submit_search("  batman ").unwrap();
        assert_eq!(request.query, "batman");
        assert_eq!(request.page, 1);

        let outcome = model.apply_search_result(&request, Ok(page_of("p1-", 10, 23)));
        assert_eq!(outcome, SearchOutcome::Rendered { rows: 10 });

        let controls = model.pagination_controls().unwrap();
        assert_eq!(controls.total_pages, 3);
        assert!(controls.next_enabled);
        assert!(!controls.previous_enabled);
        assert!(!model.content_state().is_loading());
    }

    #[test]
    fn short_query_clears_without_request() {
        let mut model = model();
        let request = model.submit_search("batman").unwrap();
        model.apply_search_result(&request, Ok(page_of("p1-", 10, 23)));

        assert_eq!(model.submit_search(" b "), None);
        assert_eq!(model.content_state().view, ContentView::Empty);
        assert!(model.session().is_none());
        assert!(model.pagination_controls().is_none());
    }

    #[test]
    fn no_match_shows_empty_state_without_pagination() {
        let mut model = model();
        let request = model.submit_search("zzzzznomatch").unwrap();
        let outcome = model.apply_search_result(&request, Err(ProviderError::NotFound));

        assert_eq!(outcome, SearchOutcome::NoMatches);
        assert_eq!(
            model.content_state().view,
            ContentView::NoMatches { query: "zzzzznomatch".into() }
        );
        assert!(model.content_state().view.rows().is_empty());
        assert!(model.pagination_controls().is_none());
    }

    #[test]
    fn stale_first_page_does_not_replace_second() {
        let mut model = model();
        let first = model.submit_search("batman").unwrap();
        model.apply_search_result(&first, Ok(page_of("p1-", 10, 23)));

        // page 1 is re-issued, then the user advances before it returns
        let again = model.resume_search().unwrap();
        let second = model.next_page().unwrap();
        assert_eq!(second.page, 2);

        let outcome = model.apply_search_result(&second, Ok(page_of("p2-", 10, 23)));
        assert_eq!(outcome, SearchOutcome::Rendered { rows: 10 });

        let outcome = model.apply_search_result(&again, Ok(page_of("p1-", 10, 23)));
        assert_eq!(outcome, SearchOutcome::Stale);
        assert_eq!(rendered_ids(&model)[0], "p2-0");
        assert_eq!(model.pagination_controls().unwrap().page, 2);
        assert!(!model.content_state().is_loading());
    }

    #[test]
    fn newer_query_wins_over_older_response() {
        let mut model = model();
        let old = model.submit_search("batman").unwrap();
        let new = model.submit_search("superman").unwrap();
        assert!(model.content_state().is_loading());

        assert_eq!(
            model.apply_search_result(&new, Ok(page_of("s-", 5, 5))),
            SearchOutcome::Rendered { rows: 5 }
        );
        assert_eq!(
            model.apply_search_result(&old, Ok(page_of("b-", 10, 23))),
            SearchOutcome::Stale
        );
        assert_eq!(rendered_ids(&model)[0], "s-0");
        assert!(!model.content_state().is_loading());
    }

    #[test]
    fn pagination_boundaries_follow_page() {
        let mut model = model();
        let request = model.submit_search("batman").unwrap();
        model.apply_search_result(&request, Ok(page_of("p1-", 10, 23)));

        assert_eq!(model.previous_page(), None);
        let second = model.next_page().unwrap();
        model.apply_search_result(&second, Ok(page_of("p2-", 10, 23)));
        let third = model.next_page().unwrap();
        model.apply_search_result(&third, Ok(page_of("p3-", 3, 23)));

        let controls = model.pagination_controls().unwrap();
        assert_eq!(controls.page, 3);
        assert!(!controls.next_enabled);
        assert!(controls.previous_enabled);
        assert_eq!(model.next_page(), None);
        assert_eq!(rendered_ids(&model).len(), 3);

        let back = model.previous_page().unwrap();
        assert_eq!(back.page, 2);
    }

    #[test]
    fn next_is_disabled_before_first_response() {
        let mut model = model();
        let first = model.submit_search("batman").unwrap();
        model.apply_search_result(&first, Ok(page_of("p1-", 10, 23)));
        // a new query resets the total to unknown
        model.submit_search("alien").unwrap();

        let controls = model.pagination_controls().unwrap();
        assert!(!controls.next_enabled);
        assert_eq!(model.next_page(), None);
    }

    #[test]
    fn failed_continuation_keeps_rows_and_page() {
        let mut model = model();
        let first = model.submit_search("batman").unwrap();
        model.apply_search_result(&first, Ok(page_of("p1-", 10, 23)));

        let second = model.next_page().unwrap();
        let outcome = model.apply_search_result(
            &second,
            Err(ProviderError::Transport("connection reset".into())),
        );
        assert!(matches!(outcome, SearchOutcome::ContinuationFailed(_)));
        assert_eq!(rendered_ids(&model).len(), 10);
        assert_eq!(model.session().unwrap().page(), 1);
        assert!(!model.content_state().is_loading());
    }

    #[test]
    fn failed_first_page_clears_list() {
        let mut model = model();
        let first = model.submit_search("batman").unwrap();
        model.apply_search_result(&first, Ok(page_of("p1-", 10, 23)));

        let retry = model.submit_search("batman").unwrap();
        let outcome = model.apply_search_result(&retry, Err(ProviderError::RateLimited));
        assert_eq!(outcome, SearchOutcome::Failed(ProviderError::RateLimited));
        assert_eq!(model.content_state().view, ContentView::Empty);
    }

    #[test]
    fn append_mode_extends_and_guards_duplicates() {
        let mut model = model_with(ModelSettings {
            pagination_mode: PaginationMode::Append,
            min_query_len: 2,
        });
        let first = model.submit_search("batman").unwrap();
        model.apply_search_result(&first, Ok(page_of("p1-", 10, 23)));

        let second = model.next_page().unwrap();
        assert_eq!(
            model.apply_search_result(&second, Ok(page_of("p2-", 10, 23))),
            SearchOutcome::Rendered { rows: 20 }
        );
        // the same page arriving twice must not add rows
        model.content_state.request_started();
        assert_eq!(
            model.apply_search_result(&second, Ok(page_of("p2-", 10, 23))),
            SearchOutcome::Rendered { rows: 20 }
        );

        let ContentView::SearchResults(results) = &model.content_state().view else {
            panic!("expected results");
        };
        assert_eq!(results.caption(), "Showing 20 of 23 results for \"batman\"");

        let controls = model.pagination_controls().unwrap();
        assert!(!controls.previous_enabled);
        assert!(controls.next_enabled);
        assert_eq!(model.previous_page(), None);
    }

    #[test]
    fn append_mode_waits_for_in_flight_page() {
        let mut model = model_with(ModelSettings {
            pagination_mode: PaginationMode::Append,
            min_query_len: 2,
        });
        let first = model.submit_search("batman").unwrap();
        model.apply_search_result(&first, Ok(page_of("p1-", 10, 23)));

        let second = model.next_page().unwrap();
        assert_eq!(second.page, 2);
        // a second press while page 2 loads must not skip ahead
        assert_eq!(model.next_page(), None);
        assert!(!model.pagination_controls().unwrap().next_enabled);

        assert_eq!(
            model.apply_search_result(&second, Ok(page_of("p2-", 10, 23))),
            SearchOutcome::Rendered { rows: 20 }
        );
        assert!(model.pagination_controls().unwrap().next_enabled);

        let third = model.next_page().unwrap();
        assert_eq!(third.page, 3);
        model.apply_search_result(&third, Ok(page_of("p3-", 3, 23)));

        let ids = rendered_ids(&model);
        assert_eq!(ids.len(), 23);
        assert!(ids.contains(&"p2-0".to_string()));
        assert!(!model.pagination_controls().unwrap().next_enabled);
    }

    #[test]
    fn append_mode_jumps_load_only_the_next_page() {
        let mut model = model_with(ModelSettings {
            pagination_mode: PaginationMode::Append,
            min_query_len: 2,
        });
        let first = model.submit_search("batman").unwrap();
        model.apply_search_result(&first, Ok(page_of("p1-", 10, 23)));

        let request = model.request_page(u32::MAX).unwrap();
        assert_eq!(request.page, 2);
        assert_eq!(model.request_page(1), None);
    }

    #[test]
    fn append_mode_retries_after_failed_continuation() {
        let mut model = model_with(ModelSettings {
            pagination_mode: PaginationMode::Append,
            min_query_len: 2,
        });
        let first = model.submit_search("batman").unwrap();
        model.apply_search_result(&first, Ok(page_of("p1-", 10, 23)));

        let second = model.next_page().unwrap();
        model.apply_search_result(&second, Err(ProviderError::RateLimited));

        let retry = model.next_page().unwrap();
        assert_eq!(retry.page, 2);
    }

    #[test]
    fn new_search_abandons_pending_detail() {
        let mut model = model();
        model.begin_detail("tt0372784");
        model.submit_search("superman").unwrap();

        let record = DetailRecord {
            id: "tt0372784".into(),
            ..Default::default()
        };
        assert_eq!(model.apply_detail("tt0372784", Ok(record)), Ok(false));
        assert!(!model.is_detail_open());
        assert_eq!(model.history().depth(), 1);
    }

    #[test]
    fn favorites_view_and_clear_abandon_pending_detail() {
        let mut model = model();
        let record = DetailRecord {
            id: "tt0111161".into(),
            ..Default::default()
        };

        model.begin_detail("tt0111161");
        model.begin_favorites_view();
        assert_eq!(model.apply_detail("tt0111161", Ok(record.clone())), Ok(false));

        model.begin_detail("tt0111161");
        model.clear_search();
        assert_eq!(model.apply_detail("tt0111161", Ok(record)), Ok(false));
        assert!(!model.is_detail_open());
        assert!(!model.content_state().is_loading());
    }

    #[test]
    fn filter_change_without_query_is_noop() {
        let mut model = model();
        let filters = SearchFilters {
            year: None,
            media_type: Some(MediaType::Series),
        };
        assert_eq!(model.apply_filters(filters.clone()), None);
        assert!(!model.content_state().is_loading());

        let request = model.submit_search("batman").unwrap();
        assert_eq!(request.filters, filters);
    }

    #[test]
    fn filter_change_resets_page() {
        let mut model = model();
        let first = model.submit_search("batman").unwrap();
        model.apply_search_result(&first, Ok(page_of("p1-", 10, 23)));
        let second = model.next_page().unwrap();
        model.apply_search_result(&second, Ok(page_of("p2-", 10, 23)));

        let request = model
            .apply_filters(SearchFilters {
                year: Some("2005".into()),
                media_type: None,
            })
            .unwrap();
        assert_eq!(request.page, 1);
        assert_eq!(request.query, "batman");
        assert_eq!(request.filters.year.as_deref(), Some("2005"));
    }

    #[test]
    fn detail_close_restores_history_depth() {
        let mut model = model();
        let depth = model.history().depth();

        model.begin_detail("tt0372784");
        let record = DetailRecord {
            id: "tt0372784".into(),
            title: "Batman Begins".into(),
            ..Default::default()
        };
        assert_eq!(model.apply_detail("tt0372784", Ok(record)), Ok(true));
        assert!(model.is_detail_open());
        assert_eq!(model.history().depth(), depth + 1);

        assert!(model.close_detail());
        assert!(!model.is_detail_open());
        assert_eq!(model.history().depth(), depth);
        // closing again does nothing
        assert!(!model.close_detail());
        assert_eq!(model.history().depth(), depth);
    }

    #[test]
    fn back_navigation_closes_detail_once() {
        let mut model = model();
        let depth = model.history().depth();

        model.begin_detail("tt0372784");
        let record = DetailRecord {
            id: "tt0372784".into(),
            ..Default::default()
        };
        model.apply_detail("tt0372784", Ok(record)).unwrap();

        assert_eq!(model.navigate_back(), BackOutcome::OverlayClosed);
        assert!(!model.is_detail_open());
        assert_eq!(model.history().depth(), depth);
        assert_eq!(model.navigate_back(), BackOutcome::AtRoot);
        assert_eq!(model.history().depth(), depth);
    }

    #[test]
    fn superseded_detail_is_discarded() {
        let mut model = model();
        model.begin_detail("tt1");
        model.begin_detail("tt2");

        let stale = DetailRecord {
            id: "tt1".into(),
            ..Default::default()
        };
        assert_eq!(model.apply_detail("tt1", Ok(stale)), Ok(false));
        assert!(!model.is_detail_open());
        assert_eq!(model.history().depth(), 1);

        let failed = model.apply_detail("tt2", Err(ProviderError::NotFound));
        assert_eq!(failed, Err(ProviderError::NotFound));
        assert!(!model.is_detail_open());
        assert!(!model.content_state().is_loading());
    }

    #[test]
    fn favorite_toggle_updates_rows_and_detail() {
        let mut model = model();
        let request = model.submit_search("batman").unwrap();
        let mut page = page_of("tt", 3, 3);
        page.items.push(item("tt0"));
        model.apply_search_result(&request, Ok(page));

        model.begin_detail("tt0");
        let record = DetailRecord {
            id: "tt0".into(),
            ..Default::default()
        };
        model.apply_detail("tt0", Ok(record)).unwrap();

        assert!(model.toggle_favorite("tt0").unwrap());
        let rows = model.content_state().view.rows();
        assert!(rows[0].favorite);
        assert!(!rows[1].favorite);
        assert!(rows[3].favorite);
        assert!(model.content_state().detail.as_ref().unwrap().favorite);
        assert_eq!(model.favorite_target().as_deref(), Some("tt0"));

        assert!(!model.toggle_favorite("tt0").unwrap());
        assert!(model.content_state().view.rows().iter().all(|r| !r.favorite));
    }

    #[test]
    fn favorites_round_trip_through_store() {
        let mut store = MemoryStore::default();
        store
            .values
            .insert(FAVORITES_KEY.into(), r#"["tt0111161"]"#.into());
        let mut model = AppModel::new(Box::new(store), ModelSettings::default());

        assert!(!model.toggle_favorite("tt0111161").unwrap());
        assert!(model.favorites().is_empty());
        assert!(model.toggle_favorite("tt0111161").unwrap());
        assert_eq!(model.favorites().ids(), vec!["tt0111161".to_string()]);
    }

    #[test]
    fn favorites_view_ignores_search_responses() {
        let mut model = model();
        let request = model.submit_search("batman").unwrap();
        model.toggle_favorite("tt0111161").unwrap();

        let ids = model.begin_favorites_view();
        assert_eq!(ids, vec!["tt0111161".to_string()]);
        assert_eq!(
            model.apply_search_result(&request, Ok(page_of("p1-", 10, 23))),
            SearchOutcome::Stale
        );

        let record = DetailRecord {
            id: "tt0111161".into(),
            title: "The Shawshank Redemption".into(),
            ..Default::default()
        };
        assert!(model.apply_favorites(vec![record]));
        let rows = model.content_state().view.rows();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].favorite);
        assert!(model.pagination_controls().is_none());
        assert!(!model.content_state().is_loading());
    }

    #[test]
    fn theme_toggle_persists() {
        let mut model = model();
        assert_eq!(model.ui_state().theme, Theme::Dark);
        assert_eq!(model.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(model.store.get(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn theme_is_loaded_from_store() {
        let mut store = MemoryStore::default();
        store.values.insert(THEME_KEY.into(), "light".into());
        let model = AppModel::new(Box::new(store), ModelSettings::default());
        assert_eq!(model.ui_state().theme, Theme::Light);
    }
}

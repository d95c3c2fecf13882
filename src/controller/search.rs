//! Search-related controller methods (submission, debounce, pagination, filters)

use chrono::Datelike;

use crate::model::{MediaType, ProviderError, SearchFilters, SearchOutcome, SearchProvider, SearchRequest};
use super::AppController;

/// Oldest year offered by the year filter
pub const EARLIEST_YEAR: i32 = 1920;

/// Validate the year filter input. Empty input means "any year".
pub fn parse_year_filter(input: &str) -> Result<Option<String>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let current_year = chrono::Local::now().year();
    match input.parse::<i32>() {
        Ok(year) if input.len() == 4 && (EARLIEST_YEAR..=current_year).contains(&year) => {
            Ok(Some(input.to_string()))
        }
        _ => Err(format!("Year must be between {} and {}", EARLIEST_YEAR, current_year)),
    }
}

impl<P: SearchProvider> AppController<P> {
    /// Explicit submission (Enter in the search box)
    pub async fn submit_search(&self, raw_query: &str) {
        self.cancel_pending_search().await;
        self.issue_search(raw_query).await;
    }

    /// Live typing: restart the quiet-period timer for `text`
    pub async fn on_search_input_changed(&self, text: String) {
        if !self.settings.live_search {
            return;
        }
        self.cancel_pending_search().await;

        {
            let mut model = self.model.lock().await;
            if !model.is_searchable(&text) {
                model.clear_results();
                return;
            }
        }

        let controller = self.clone();
        let delay = self.settings.debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // detached so a later keystroke cannot abort a request already issued
            let submitter = controller.clone();
            tokio::spawn(async move { submitter.issue_search(&text).await });
        });
        *self.pending_search.lock().await = Some(handle);
    }

    pub(crate) async fn cancel_pending_search(&self) {
        if let Some(handle) = self.pending_search.lock().await.take() {
            handle.abort();
        }
    }

    async fn issue_search(&self, raw_query: &str) {
        let request = self.model.lock().await.submit_search(raw_query);
        if let Some(request) = request {
            self.run_search(request).await;
        }
    }

    pub async fn go_to_page(&self, page: u32) {
        let request = self.model.lock().await.request_page(page);
        if let Some(request) = request {
            self.run_search(request).await;
        }
    }

    pub async fn next_page(&self) {
        let request = self.model.lock().await.next_page();
        if let Some(request) = request {
            self.run_search(request).await;
        }
    }

    pub async fn previous_page(&self) {
        let request = self.model.lock().await.previous_page();
        if let Some(request) = request {
            self.run_search(request).await;
        }
    }

    /// Cycle the media type filter and resubmit the active query
    pub async fn cycle_media_type(&self) {
        let request = {
            let mut model = self.model.lock().await;
            let mut filters = model.filters().clone();
            filters.media_type = MediaType::cycle(filters.media_type);
            tracing::debug!(media_type = ?filters.media_type, "Media type filter changed");
            model.apply_filters(filters)
        };
        if let Some(request) = request {
            self.run_search(request).await;
        }
    }

    /// Apply the year typed into the year box
    pub async fn apply_year_filter(&self) {
        let request = {
            let mut model = self.model.lock().await;
            match parse_year_filter(model.year_input()) {
                Ok(year) => {
                    let filters = SearchFilters {
                        year,
                        ..model.filters().clone()
                    };
                    tracing::debug!(year = ?filters.year, "Year filter changed");
                    model.apply_filters(filters)
                }
                Err(message) => {
                    model.set_error(message);
                    None
                }
            }
        };
        if let Some(request) = request {
            self.run_search(request).await;
        }
    }

    pub(crate) async fn run_search(&self, request: SearchRequest) {
        tracing::debug!(query = %request.query, page = request.page, "Performing search");
        let result = self.provider.search(&request).await;

        let mut model = self.model.lock().await;
        match model.apply_search_result(&request, result) {
            SearchOutcome::Rendered { rows } => {
                let total_pages = model.session().and_then(|session| session.total_pages());
                tracing::info!(
                    query = %request.query,
                    page = request.page,
                    rows,
                    ?total_pages,
                    "Search completed successfully"
                );
            }
            SearchOutcome::NoMatches => {
                tracing::info!(query = %request.query, "Search found no matches");
            }
            SearchOutcome::Stale => {}
            SearchOutcome::ContinuationFailed(ProviderError::NotFound) => {
                model.set_error("No more results.".to_string());
            }
            SearchOutcome::ContinuationFailed(e) => {
                tracing::warn!(query = %request.query, page = request.page, error = %e, "Loading next page failed");
                model.set_error(Self::format_error(&e));
            }
            SearchOutcome::Failed(e) => {
                tracing::error!(query = %request.query, error = %e, "Search failed");
                model.set_error(Self::format_error(&e));
            }
        }
    }
}

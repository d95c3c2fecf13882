//! Search session bookkeeping: query, page and total result count

use serde::Deserialize;

use super::types::SearchFilters;

/// Results per provider page
pub const PAGE_SIZE: u32 = 10;

/// Number of pages needed for `total_results` hits
pub fn total_pages_for(total_results: u32) -> u32 {
    total_results.div_ceil(PAGE_SIZE)
}

/// How moving past the first page updates the result list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    /// Previous/Next re-issue the search and replace the rows
    #[default]
    Replace,
    /// "Load more": each new page is appended to the rows
    Append,
}

/// Parameters of one issued search.
///
/// A response is only rendered while its request still equals the session's
/// current request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub page: u32,
    pub filters: SearchFilters,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchSession {
    query: String,
    page: u32,
    total_results: Option<u32>,
    filters: SearchFilters,
}

impl SearchSession {
    /// Start a session at page 1 with an unknown total
    pub fn start(query: String, filters: SearchFilters) -> Self {
        Self {
            query,
            page: 1,
            total_results: None,
            filters,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn total_results(&self) -> Option<u32> {
        self.total_results
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_results.map(total_pages_for)
    }

    pub fn record_total(&mut self, total_results: u32) {
        self.total_results = Some(total_results);
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        match self.total_pages() {
            Some(total_pages) => self.page < total_pages,
            None => false,
        }
    }

    /// Clamp `page` into `[1, total_pages]`. `None` while the total is unknown.
    pub fn clamp_page(&self, page: u32) -> Option<u32> {
        let total_pages = self.total_pages()?;
        Some(page.clamp(1, total_pages.max(1)))
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn request(&self) -> SearchRequest {
        SearchRequest {
            query: self.query.clone(),
            page: self.page,
            filters: self.filters.clone(),
        }
    }

    pub fn is_current(&self, request: &SearchRequest) -> bool {
        self.page == request.page && self.query == request.query && self.filters == request.filters
    }
}

/// State of the Previous/Next controls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationControls {
    pub page: u32,
    pub total_pages: u32,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub mode: PaginationMode,
}

//! Search provider seam

use std::future::Future;

use thiserror::Error;

use super::session::SearchRequest;
use super::types::{DetailRecord, ResultItem};

/// One page of search hits
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchPage {
    pub items: Vec<ResultItem>,
    pub total_results: u32,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider found no matches
    #[error("no matches found")]
    NotFound,

    #[error("request limit reached")]
    RateLimited,

    /// The API key was rejected
    #[error("authorization failed: {0}")]
    Auth(String),

    /// The provider refused the query (e.g. too many results)
    #[error("provider rejected the request: {0}")]
    Rejected(String),

    /// Network, timeout or response parse failure
    #[error("transport error: {0}")]
    Transport(String),
}

/// The film-metadata source the controller searches
pub trait SearchProvider: Send + Sync + 'static {
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<SearchPage, ProviderError>> + Send;

    fn fetch_detail(&self, id: &str) -> impl Future<Output = Result<DetailRecord, ProviderError>> + Send;
}

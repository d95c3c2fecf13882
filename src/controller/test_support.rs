//! Scripted provider and controller fixtures for controller tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;

use super::{AppController, ControllerSettings};
use crate::model::{
    AppModel, DetailRecord, MemoryStore, ModelSettings, ProviderError, ResultItem, SearchPage,
    SearchProvider, SearchRequest,
};

/// Provider answering from canned responses and recording every call
#[derive(Default)]
pub struct ScriptedProvider {
    pages: HashMap<(String, u32), Result<SearchPage, ProviderError>>,
    details: HashMap<String, Result<DetailRecord, ProviderError>>,
    pub searches: StdMutex<Vec<SearchRequest>>,
    pub detail_calls: StdMutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn with_page(mut self, query: &str, page: u32, result: Result<SearchPage, ProviderError>) -> Self {
        self.pages.insert((query.to_string(), page), result);
        self
    }

    pub fn with_detail(mut self, id: &str, result: Result<DetailRecord, ProviderError>) -> Self {
        self.details.insert(id.to_string(), result);
        self
    }

    pub fn searched_queries(&self) -> Vec<(String, u32)> {
        self.searches
            .lock()
            .unwrap()
            .iter()
            .map(|r| (r.query.clone(), r.page))
            .collect()
    }
}

impl SearchProvider for ScriptedProvider {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, ProviderError> {
        self.searches.lock().unwrap().push(request.clone());
        self.pages
            .get(&(request.query.clone(), request.page))
            .cloned()
            .unwrap_or(Err(ProviderError::NotFound))
    }

    async fn fetch_detail(&self, id: &str) -> Result<DetailRecord, ProviderError> {
        self.detail_calls.lock().unwrap().push(id.to_string());
        self.details
            .get(id)
            .cloned()
            .unwrap_or(Err(ProviderError::NotFound))
    }
}

pub fn item(id: &str, title: &str) -> ResultItem {
    ResultItem {
        id: id.to_string(),
        title: title.to_string(),
        year: "2005".to_string(),
        poster_url: None,
        media_type: "movie".to_string(),
    }
}

pub fn page(prefix: &str, count: usize, total: u32) -> SearchPage {
    SearchPage {
        items: (0..count)
            .map(|i| item(&format!("{prefix}{i}"), &format!("{prefix} title {i}")))
            .collect(),
        total_results: total,
    }
}

pub fn record(id: &str, title: &str) -> DetailRecord {
    DetailRecord {
        id: id.to_string(),
        title: title.to_string(),
        year: "1994".to_string(),
        media_type: "movie".to_string(),
        director: Some("Frank Darabont".to_string()),
        ..Default::default()
    }
}

pub fn controller(provider: ScriptedProvider) -> AppController<ScriptedProvider> {
    controller_with(provider, MemoryStore::default(), ControllerSettings::default())
}

pub fn controller_with(
    provider: ScriptedProvider,
    store: MemoryStore,
    settings: ControllerSettings,
) -> AppController<ScriptedProvider> {
    let model = AppModel::new(Box::new(store), ModelSettings::default());
    AppController::new(Arc::new(Mutex::new(model)), Arc::new(provider), settings)
}

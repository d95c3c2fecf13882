//! Favorites and theme controller methods

use futures::future::join_all;

use crate::model::{ResultsSource, SearchProvider};
use super::AppController;

impl<P: SearchProvider> AppController<P> {
    pub async fn toggle_favorite(&self, id: &str) {
        let mut model = self.model.lock().await;
        if let Err(e) = model.toggle_favorite(id) {
            tracing::error!(id, error = %e, "Saving favorites failed");
            model.set_error(format!("Could not save favorites: {}", e));
        }
    }

    /// Toggle the open detail record, or the highlighted row
    pub async fn toggle_selected_favorite(&self) {
        let target = self.model.lock().await.favorite_target();
        if let Some(id) = target {
            self.toggle_favorite(&id).await;
        }
    }

    /// Replace the list with the stored favorites
    pub async fn show_favorites(&self) {
        let ids = self.model.lock().await.begin_favorites_view();
        if ids.is_empty() {
            return;
        }

        tracing::debug!(count = ids.len(), "Loading favorites");
        let results = join_all(ids.iter().map(|id| self.provider.fetch_detail(id))).await;

        let mut records = Vec::with_capacity(results.len());
        let mut failures = 0;
        for (id, result) in ids.iter().zip(results) {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "Favorite could not be loaded");
                    failures += 1;
                }
            }
        }

        let mut model = self.model.lock().await;
        if model.apply_favorites(records) && failures > 0 {
            model.set_error(format!("{} favorite(s) could not be loaded", failures));
        }
    }

    /// Return to the search results for the current query
    pub async fn show_search_results(&self) {
        let request = self.model.lock().await.resume_search();
        if let Some(request) = request {
            self.run_search(request).await;
        }
    }

    pub async fn toggle_favorites_view(&self) {
        let source = self.model.lock().await.results_source();
        match source {
            ResultsSource::Search => self.show_favorites().await,
            ResultsSource::Favorites => self.show_search_results().await,
        }
    }

    pub async fn toggle_theme(&self) {
        let mut model = self.model.lock().await;
        if let Err(e) = model.toggle_theme() {
            tracing::error!(error = %e, "Saving theme failed");
            model.set_error(format!("Could not save theme: {}", e));
        }
    }
}

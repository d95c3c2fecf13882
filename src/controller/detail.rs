//! Detail overlay controller methods

use crate::model::{BackOutcome, SearchProvider};
use super::AppController;

/// How the user asked to close the detail overlay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    CloseControl,
    Backdrop,
    Escape,
}

impl<P: SearchProvider> AppController<P> {
    pub async fn open_detail(&self, id: &str) {
        self.model.lock().await.begin_detail(id);

        tracing::debug!(id, "Loading details");
        let result = self.provider.fetch_detail(id).await;

        let mut model = self.model.lock().await;
        match model.apply_detail(id, result) {
            Ok(true) => tracing::info!(id, "Details loaded"),
            Ok(false) => {}
            Err(e) => {
                tracing::error!(id, error = %e, "Loading details failed");
                model.set_error(format!("Failed to load details: {}", Self::format_error(&e)));
            }
        }
    }

    /// Open the detail overlay for the highlighted row
    pub async fn open_selected(&self) {
        let id = self.model.lock().await.selected_item_id();
        if let Some(id) = id {
            self.open_detail(&id).await;
        }
    }

    pub async fn close_detail(&self, reason: CloseReason) {
        let mut model = self.model.lock().await;
        if model.close_detail() {
            tracing::debug!(?reason, depth = model.history().depth(), "Detail overlay dismissed");
        }
    }

    /// Back navigation: closes an open overlay, otherwise nothing to go back to
    pub async fn navigate_back(&self) -> BackOutcome {
        self.model.lock().await.navigate_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::test_support::{controller, page, record, ScriptedProvider};
    use crate::model::ProviderError;

    fn shawshank_provider() -> ScriptedProvider {
        ScriptedProvider::default()
            .with_page("shawshank", 1, Ok(page("tt", 3, 3)))
            .with_detail("tt0", Ok(record("tt0", "The Shawshank Redemption")))
    }

    #[tokio::test]
    async fn every_close_path_restores_history_depth() {
        let controller = controller(shawshank_provider());
        controller.submit_search("shawshank").await;
        let depth = controller.model.lock().await.history().depth();

        for reason in [CloseReason::CloseControl, CloseReason::Backdrop, CloseReason::Escape] {
            controller.open_selected().await;
            {
                let model = controller.model.lock().await;
                assert!(model.is_detail_open());
                assert_eq!(model.history().depth(), depth + 1);
            }
            controller.close_detail(reason).await;
            let model = controller.model.lock().await;
            assert!(!model.is_detail_open());
            assert_eq!(model.history().depth(), depth);
        }
    }

    #[tokio::test]
    async fn back_closes_overlay_without_extra_pop() {
        let controller = controller(shawshank_provider());
        controller.submit_search("shawshank").await;
        let depth = controller.model.lock().await.history().depth();

        controller.open_detail("tt0").await;
        assert_eq!(controller.navigate_back().await, BackOutcome::OverlayClosed);
        assert_eq!(controller.model.lock().await.history().depth(), depth);

        // already at the root: stays put
        assert_eq!(controller.navigate_back().await, BackOutcome::AtRoot);
        assert_eq!(controller.model.lock().await.history().depth(), depth);
    }

    #[tokio::test]
    async fn detail_shows_director() {
        let controller = controller(shawshank_provider());
        controller.open_detail("tt0").await;

        let model = controller.model.lock().await;
        let detail = model.content_state().detail.as_ref().unwrap();
        assert_eq!(detail.record.title, "The Shawshank Redemption");
        assert_eq!(detail.record.director.as_deref(), Some("Frank Darabont"));
    }

    #[tokio::test]
    async fn failed_detail_reports_error() {
        let provider = ScriptedProvider::default()
            .with_detail("tt9", Err(ProviderError::Transport("timed out".into())));
        let controller = controller(provider);

        controller.open_detail("tt9").await;

        let model = controller.model.lock().await;
        assert!(!model.is_detail_open());
        assert_eq!(model.history().depth(), 1);
        assert_eq!(
            model.ui_state().error_message.as_deref(),
            Some("Failed to load details: Network error: timed out")
        );
        assert!(!model.content_state().is_loading());
    }
}

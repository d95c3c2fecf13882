//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and the search provider, and owns the
//! request lifecycle. It is organized into submodules by responsibility:
//!
//! - `input`: Key and mouse event handling
//! - `search`: Query submission, debounce, pagination and filters
//! - `detail`: Detail overlay open/close and back navigation
//! - `favorites`: Favorites toggle, favorites view and theme

mod input;
mod search;
mod detail;
mod favorites;

#[cfg(test)]
mod test_support;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::model::{AppModel, ProviderError, SearchProvider};

pub use detail::CloseReason;

#[derive(Clone, Copy, Debug)]
pub struct ControllerSettings {
    pub debounce: Duration,
    pub live_search: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            live_search: true,
        }
    }
}

pub struct AppController<P> {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) provider: Arc<P>,
    pending_search: Arc<Mutex<Option<JoinHandle<()>>>>,
    settings: ControllerSettings,
}

impl<P> Clone for AppController<P> {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
            provider: self.provider.clone(),
            pending_search: self.pending_search.clone(),
            settings: self.settings,
        }
    }
}

impl<P: SearchProvider> AppController<P> {
    pub fn new(model: Arc<Mutex<AppModel>>, provider: Arc<P>, settings: ControllerSettings) -> Self {
        Self {
            model,
            provider,
            pending_search: Arc::new(Mutex::new(None)),
            settings,
        }
    }

    /// Run an operation in the background so the UI keeps drawing
    pub(crate) fn spawn<F, Fut>(&self, operation: F)
    where
        F: FnOnce(Self) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(operation(self.clone()));
    }

    pub(crate) fn format_error(error: &ProviderError) -> String {
        match error {
            ProviderError::NotFound => "No results found.".to_string(),
            ProviderError::RateLimited => "Rate limited. Please wait a moment and try again.".to_string(),
            ProviderError::Auth(_) => "The OMDb API key was rejected. Check your configuration.".to_string(),
            ProviderError::Rejected(message) => format!("Search rejected: {}", message),
            ProviderError::Transport(message) => format!("Network error: {}", message),
        }
    }
}

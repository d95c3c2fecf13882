//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (media types, records, UI state, etc.)
//! - `session`: Search session, pagination and request staleness
//! - `history`: Navigation history with the detail overlay entry
//! - `content`: Rendered results and detail view data
//! - `favorites`: Favorite titles set
//! - `store`: Preference store (favorites, theme)
//! - `provider`: Search provider trait and error taxonomy
//! - `omdb_client`: OMDb API client
//! - `app_model`: Main application model with state management methods

mod types;
mod session;
mod history;
mod content;
mod favorites;
mod store;
mod provider;
mod omdb_client;
mod app_model;

// Re-export all public types for convenient access
pub use types::{
    ActiveSection, DetailRecord, MediaType, ResultItem, ResultsSource, SearchFilters, Theme,
    UiState, format_media_type,
};

pub use session::{PaginationControls, PaginationMode, SearchRequest};

pub use history::BackOutcome;

pub use content::{ContentState, ContentView, DetailView, ResultRow, ResultsPage};

pub use store::JsonFileStore;

#[cfg(test)]
pub use store::MemoryStore;

pub use provider::{ProviderError, SearchPage, SearchProvider};

pub use omdb_client::{DEFAULT_OMDB_URL, OmdbClient};

pub use app_model::{AppModel, ModelSettings, SearchOutcome};

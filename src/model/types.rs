//! Core type definitions for the application

use std::time::Instant;

use serde::{Deserialize, Deserializer};

/// Placeholder the provider uses for fields it has no value for
pub const UNAVAILABLE: &str = "N/A";

/// Returns false for empty strings and the provider's "N/A" placeholder
pub fn is_available(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != UNAVAILABLE
}

/// Deserialize an optional string, mapping "N/A" and empty values to `None`
pub fn na_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| is_available(v)))
}

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Year,
    Results,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Year,
            ActiveSection::Year => ActiveSection::Results,
            ActiveSection::Results => ActiveSection::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Results,
            ActiveSection::Year => ActiveSection::Search,
            ActiveSection::Results => ActiveSection::Year,
        }
    }
}

/// Media type filter understood by the provider
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaType {
    Movie,
    Series,
    Episode,
}

impl MediaType {
    /// Value sent as the `type` query parameter
    pub fn as_param(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
            MediaType::Episode => "episode",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "movie" => Some(MediaType::Movie),
            "series" => Some(MediaType::Series),
            "episode" => Some(MediaType::Episode),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaType::Movie => "Movie",
            MediaType::Series => "TV Series",
            MediaType::Episode => "Episode",
        }
    }

    /// Cycle any → movie → series → episode → any
    pub fn cycle(current: Option<MediaType>) -> Option<MediaType> {
        match current {
            None => Some(MediaType::Movie),
            Some(MediaType::Movie) => Some(MediaType::Series),
            Some(MediaType::Series) => Some(MediaType::Episode),
            Some(MediaType::Episode) => None,
        }
    }
}

/// Human readable label for a raw provider type, falling back to the raw value
pub fn format_media_type(raw: &str) -> String {
    MediaType::from_param(raw)
        .map(|t| t.label().to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Filters combined with the query (logical AND)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub year: Option<String>,
    pub media_type: Option<MediaType>,
}

/// A single search hit, in provider order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultItem {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
    pub media_type: String,
}

/// Full record shown in the detail modal.
///
/// Optional fields are `None` when the provider reported them as unavailable,
/// so the view never prints the placeholder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetailRecord {
    pub id: String,
    pub title: String,
    pub year: String,
    pub media_type: String,
    pub poster_url: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub imdb_rating: Option<String>,
    pub imdb_votes: Option<String>,
    pub box_office: Option<String>,
}

impl DetailRecord {
    /// Reduce a detail record to the list-row shape
    pub fn summary(&self) -> ResultItem {
        ResultItem {
            id: self.id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            poster_url: self.poster_url.clone(),
            media_type: self.media_type.clone(),
        }
    }

    /// Labelled fields that carry a value, in display order
    pub fn available_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Rating", self.imdb_rating.as_deref()),
            ("Votes", self.imdb_votes.as_deref()),
            ("Rated", self.rated.as_deref()),
            ("Released", self.released.as_deref()),
            ("Runtime", self.runtime.as_deref()),
            ("Genre", self.genre.as_deref()),
            ("Director", self.director.as_deref()),
            ("Writer", self.writer.as_deref()),
            ("Cast", self.actors.as_deref()),
            ("Language", self.language.as_deref()),
            ("Country", self.country.as_deref()),
            ("Awards", self.awards.as_deref()),
            ("Box office", self.box_office.as_deref()),
            ("Poster", self.poster_url.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect()
    }
}

/// Color theme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Unknown values fall back to the dark theme
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }
}

/// Which list the results area shows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResultsSource {
    #[default]
    Search,
    Favorites,
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_input: String,
    pub year_input: String,
    pub filters: SearchFilters,
    pub source: ResultsSource,
    pub theme: Theme,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Search,
            search_input: String::new(),
            year_input: String::new(),
            filters: SearchFilters::default(),
            source: ResultsSource::Search,
            theme: Theme::Dark,
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_values_are_unavailable() {
        assert!(!is_available("N/A"));
        assert!(!is_available("  "));
        assert!(is_available("Frank Darabont"));
    }

    #[test]
    fn media_type_labels_fall_back_to_raw_value() {
        assert_eq!(format_media_type("series"), "TV Series");
        assert_eq!(format_media_type("movie"), "Movie");
        assert_eq!(format_media_type("game"), "game");
    }

    #[test]
    fn media_type_cycle_returns_to_any() {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            current = MediaType::cycle(current);
            seen.push(current);
        }
        assert_eq!(
            seen,
            vec![
                Some(MediaType::Movie),
                Some(MediaType::Series),
                Some(MediaType::Episode),
                None
            ]
        );
    }

    #[test]
    fn theme_parse_defaults_to_dark() {
        assert_eq!(Theme::parse("light"), Theme::Light);
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("solarized"), Theme::Dark);
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
    }

    #[test]
    fn available_fields_skip_missing_values() {
        let record = DetailRecord {
            id: "tt0111161".into(),
            title: "The Shawshank Redemption".into(),
            director: Some("Frank Darabont".into()),
            ..Default::default()
        };
        let fields = record.available_fields();
        assert_eq!(fields, vec![("Director", "Frank Darabont")]);
    }
}

//! OMDb API client

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use super::provider::{ProviderError, SearchPage, SearchProvider};
use super::session::SearchRequest;
use super::types::{na_as_none, DetailRecord, ResultItem};
use crate::{log_api_request, log_api_result};

pub const DEFAULT_OMDB_URL: &str = "https://www.omdbapi.com/";
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP client for the OMDb search and title endpoints
#[derive(Clone)]
pub struct OmdbClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            api_key,
            base_url: base_url.to_string(),
        })
    }

    async fn get(&self, params: &[(&str, String)]) -> Result<String, ProviderError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Transport("request timed out".to_string())
                } else {
                    ProviderError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        check_status(status, body)
    }
}

/// Map a non-success HTTP status onto the error taxonomy, passing the body through otherwise
fn check_status(status: StatusCode, body: String) -> Result<String, ProviderError> {
    if status == StatusCode::UNAUTHORIZED {
        // OMDb answers 401 with a JSON error body for bad keys
        Err(error_from_body(&body).unwrap_or_else(|| ProviderError::Auth(status.to_string())))
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        Err(ProviderError::RateLimited)
    } else if !status.is_success() {
        Err(ProviderError::Transport(format!("HTTP {}", status.as_u16())))
    } else {
        Ok(body)
    }
}

impl SearchProvider for OmdbClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, ProviderError> {
        log_api_request!("search", query = %request.query, page = request.page);
        let body = self.get(&search_params(request)).await;
        let result = body.and_then(|body| parse_search_body(&body));
        log_api_result!("search", result);
        result
    }

    async fn fetch_detail(&self, id: &str) -> Result<DetailRecord, ProviderError> {
        log_api_request!("fetch_detail", id);
        let params = [("i", id.to_string()), ("plot", "full".to_string())];
        let body = self.get(&params).await;
        let result = body.and_then(|body| parse_detail_body(&body));
        log_api_result!("fetch_detail", result);
        result
    }
}

/// Query parameters for a search request, without the API key
pub fn search_params(request: &SearchRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("s", request.query.clone()),
        ("page", request.page.to_string()),
    ];
    if let Some(year) = &request.filters.year {
        params.push(("y", year.clone()));
    }
    if let Some(media_type) = request.filters.media_type {
        params.push(("type", media_type.as_param().to_string()));
    }
    params
}

#[derive(Deserialize)]
struct OmdbStatus {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
}

#[derive(Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Type", default)]
    media_type: String,
    #[serde(rename = "Poster", default, deserialize_with = "na_as_none")]
    poster: Option<String>,
}

#[derive(Deserialize)]
struct OmdbTitle {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Type", default)]
    media_type: String,
    #[serde(rename = "Poster", default, deserialize_with = "na_as_none")]
    poster: Option<String>,
    #[serde(rename = "Rated", default, deserialize_with = "na_as_none")]
    rated: Option<String>,
    #[serde(rename = "Released", default, deserialize_with = "na_as_none")]
    released: Option<String>,
    #[serde(rename = "Runtime", default, deserialize_with = "na_as_none")]
    runtime: Option<String>,
    #[serde(rename = "Genre", default, deserialize_with = "na_as_none")]
    genre: Option<String>,
    #[serde(rename = "Director", default, deserialize_with = "na_as_none")]
    director: Option<String>,
    #[serde(rename = "Writer", default, deserialize_with = "na_as_none")]
    writer: Option<String>,
    #[serde(rename = "Actors", default, deserialize_with = "na_as_none")]
    actors: Option<String>,
    #[serde(rename = "Plot", default, deserialize_with = "na_as_none")]
    plot: Option<String>,
    #[serde(rename = "Language", default, deserialize_with = "na_as_none")]
    language: Option<String>,
    #[serde(rename = "Country", default, deserialize_with = "na_as_none")]
    country: Option<String>,
    #[serde(rename = "Awards", default, deserialize_with = "na_as_none")]
    awards: Option<String>,
    #[serde(rename = "imdbRating", default, deserialize_with = "na_as_none")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes", default, deserialize_with = "na_as_none")]
    imdb_votes: Option<String>,
    #[serde(rename = "BoxOffice", default, deserialize_with = "na_as_none")]
    box_office: Option<String>,
}

/// Map an OMDb `"Response": "False"` error message onto the error taxonomy
fn classify_error(message: &str) -> ProviderError {
    let lower = message.to_ascii_lowercase();
    if lower.contains("not found") {
        ProviderError::NotFound
    } else if lower.contains("limit") {
        ProviderError::RateLimited
    } else if lower.contains("api key") {
        ProviderError::Auth(message.to_string())
    } else {
        ProviderError::Rejected(message.to_string())
    }
}

fn error_from_body(body: &str) -> Option<ProviderError> {
    let status: OmdbStatus = serde_json::from_str(body).ok()?;
    if status.response.eq_ignore_ascii_case("false") {
        Some(classify_error(status.error.as_deref().unwrap_or("unknown error")))
    } else {
        None
    }
}

fn parse_error(e: serde_json::Error) -> ProviderError {
    ProviderError::Transport(format!("invalid response: {e}"))
}

pub fn parse_search_body(body: &str) -> Result<SearchPage, ProviderError> {
    let status: OmdbStatus = serde_json::from_str(body).map_err(parse_error)?;
    if !status.response.eq_ignore_ascii_case("true") {
        return Err(classify_error(status.error.as_deref().unwrap_or("unknown error")));
    }

    let response: OmdbSearchResponse = serde_json::from_str(body).map_err(parse_error)?;
    let items: Vec<ResultItem> = response
        .search
        .into_iter()
        .map(|item| ResultItem {
            id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster_url: item.poster,
            media_type: item.media_type,
        })
        .collect();

    let total_results = match response.total_results {
        Some(total) => total
            .trim()
            .parse::<u32>()
            .map_err(|e| ProviderError::Transport(format!("invalid totalResults '{total}': {e}")))?,
        None => items.len() as u32,
    };

    if items.is_empty() && total_results == 0 {
        return Err(ProviderError::NotFound);
    }

    Ok(SearchPage { items, total_results })
}

pub fn parse_detail_body(body: &str) -> Result<DetailRecord, ProviderError> {
    let status: OmdbStatus = serde_json::from_str(body).map_err(parse_error)?;
    if !status.response.eq_ignore_ascii_case("true") {
        return Err(classify_error(status.error.as_deref().unwrap_or("unknown error")));
    }

    let title: OmdbTitle = serde_json::from_str(body).map_err(parse_error)?;
    Ok(DetailRecord {
        id: title.imdb_id,
        title: title.title,
        year: title.year,
        media_type: title.media_type,
        poster_url: title.poster,
        rated: title.rated,
        released: title.released,
        runtime: title.runtime,
        genre: title.genre,
        director: title.director,
        writer: title.writer,
        actors: title.actors,
        plot: title.plot,
        language: title.language,
        country: title.country,
        awards: title.awards,
        imdb_rating: title.imdb_rating,
        imdb_votes: title.imdb_votes,
        box_office: title.box_office,
    })
}

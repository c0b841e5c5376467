use log::{debug, warn};
use reqwest::Client;

use super::types::{EntitySearchResult, ErrorBody, SearchRequest};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::events::EventRecord;

const SEARCH_FAILED: &str = "search failed";
const EVENTS_FAILED: &str = "failed to load events";

/// HTTP client for the AIscope backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
	config: AppConfig,
	http: Client,
}

impl ApiClient {
	/// Client for the backend named in `config`.
	pub fn new(config: AppConfig) -> Self {
		Self {
			config,
			http: Client::new(),
		}
	}

	/// `POST /entities/search`.
	pub async fn search_entity(&self, query: &str) -> Result<EntitySearchResult, ApiError> {
		let url = self.config.endpoint("/entities/search");
		debug!("searching {url} for {query:?}");
		let response = self
			.http
			.post(url)
			.json(&SearchRequest { query })
			.send()
			.await?;
		let status = response.status().as_u16();
		let body = response.text().await?;
		if !(200..300).contains(&status) {
			let err = status_error(status, &body, SEARCH_FAILED);
			warn!("entity search for {query:?} failed: {err}");
			return Err(err);
		}
		Ok(serde_json::from_str(&body)?)
	}

	/// `GET /events`.
	pub async fn fetch_events(&self) -> Result<Vec<EventRecord>, ApiError> {
		let url = self.config.endpoint("/events");
		let response = self.http.get(url).send().await?;
		let status = response.status().as_u16();
		let body = response.text().await?;
		if !(200..300).contains(&status) {
			let err = status_error(status, &body, EVENTS_FAILED);
			warn!("event fetch failed: {err}");
			return Err(err);
		}
		let events: Vec<EventRecord> = serde_json::from_str(&body)?;
		debug!("fetched {} events", events.len());
		Ok(events)
	}
}

/// Error for a non-2xx response, preferring the body's `detail` string.
pub(crate) fn status_error(status: u16, body: &str, fallback: &str) -> ApiError {
	let message = serde_json::from_str::<ErrorBody>(body)
		.ok()
		.and_then(|b| b.detail)
		.and_then(|d| d.as_str().map(str::trim).map(str::to_string))
		.filter(|d| !d.is_empty())
		.unwrap_or_else(|| fallback.to_string());
	ApiError::Status { status, message }
}

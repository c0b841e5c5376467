//! Build-time application settings.

use crate::graph::ViewportController;
use crate::graph::viewport::{FOCUS_DISTANCE, TRANSITION_MS};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Settings shared by the page and its components through context.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	/// Backend root, without trailing slash.
	pub api_base_url: String,
	/// Delay between adding an entity and arming the camera.
	pub zoom_delay_ms: u64,
	/// Camera transition length.
	pub zoom_transition_ms: u32,
	/// Distance the camera keeps from a focused node.
	pub focus_distance: f64,
	/// Settle signals to wait for a position before giving up. `None` waits forever.
	pub max_zoom_wait_ticks: Option<u32>,
	/// Zoom range used when focusing a node.
	pub focus_zoom_range: (f64, f64),
	/// Minimum trimmed query length sent to the search service.
	pub min_query_len: usize,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base_url: DEFAULT_API_BASE_URL.to_string(),
			zoom_delay_ms: 300,
			zoom_transition_ms: TRANSITION_MS,
			focus_distance: FOCUS_DISTANCE,
			max_zoom_wait_ticks: None,
			focus_zoom_range: (1.0, 4.0),
			min_query_len: 2,
		}
	}
}

impl AppConfig {
	/// Defaults overridden by `AISCOPE_API_BASE_URL` at compile time.
	pub fn from_env() -> Self {
		let mut config = Self::default();
		if let Some(url) = option_env!("AISCOPE_API_BASE_URL") {
			config.api_base_url = url.to_string();
		}
		config.normalized()
	}

	fn normalized(mut self) -> Self {
		let trimmed = self.api_base_url.trim().trim_end_matches('/');
		self.api_base_url = if trimmed.is_empty() {
			DEFAULT_API_BASE_URL.to_string()
		} else {
			trimmed.to_string()
		};
		self
	}

	/// Absolute URL for `path` (leading slash optional).
	pub fn endpoint(&self, path: &str) -> String {
		format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
	}

	/// A viewport controller with these camera settings.
	pub fn viewport_controller(&self) -> ViewportController {
		ViewportController::new(self.focus_distance, self.zoom_transition_ms)
			.with_max_wait(self.max_zoom_wait_ticks)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoint_joins_without_double_slash() {
		let config = AppConfig {
			api_base_url: "https://api.example.com/".into(),
			..AppConfig::default()
		}
		.normalized();
		assert_eq!(
			config.endpoint("/entities/search"),
			"https://api.example.com/entities/search"
		);
		assert_eq!(config.endpoint("events"), "https://api.example.com/events");
	}

	#[test]
	fn blank_base_url_falls_back_to_default() {
		let config = AppConfig {
			api_base_url: "  ".into(),
			..AppConfig::default()
		}
		.normalized();
		assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
	}
}

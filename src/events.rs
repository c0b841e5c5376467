//! Weekly events feed: records, tolerant attribute parsing, recency window.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Width of the "this week" window, in seconds.
pub const RECENT_WINDOW_SECS: i64 = 7 * 24 * 3600;

/// Entity mentioned by an event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventEntity {
	/// Entity name.
	pub name: String,
	/// Entity kind as reported by the backend.
	#[serde(rename = "type")]
	pub entity_type: String,
	/// Role in the event, e.g. `acquirer`.
	#[serde(default)]
	pub role: Option<String>,
}

/// A timestamped industry event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
	/// Backend id.
	pub id: i64,
	/// Event kind, e.g. `funding`.
	#[serde(rename = "type")]
	pub event_type: String,
	/// When it happened, ISO-8601.
	#[serde(default)]
	pub occurred_at: Option<String>,
	/// When it was recorded, ISO-8601.
	#[serde(default)]
	pub recorded_at: Option<String>,
	/// JSON-encoded string or an already parsed object.
	#[serde(default)]
	pub attributes: Option<Value>,
	/// Extraction confidence in `[0, 1]`.
	#[serde(default)]
	pub confidence: Option<f64>,
	/// Entities involved.
	#[serde(default)]
	pub entities: Option<Vec<EventEntity>>,
	/// Where it was reported.
	#[serde(default)]
	pub source_url: Option<String>,
}

impl EventRecord {
	/// Attribute object. Malformed or missing attributes give an empty map.
	pub fn attributes(&self) -> Map<String, Value> {
		match &self.attributes {
			Some(Value::Object(map)) => map.clone(),
			Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
				Ok(Value::Object(map)) => map,
				_ => {
					debug!("event {} has unparseable attributes", self.id);
					Map::new()
				}
			},
			_ => Map::new(),
		}
	}

	/// `attributes.summary`, if a string.
	pub fn summary(&self) -> Option<String> {
		self.attributes()
			.get("summary")
			.and_then(Value::as_str)
			.map(str::to_string)
	}

	/// `attributes.amount_usd`, if numeric.
	pub fn amount_usd(&self) -> Option<f64> {
		self.attributes().get("amount_usd").and_then(Value::as_f64)
	}

	/// Confidence as a rounded percentage.
	pub fn confidence_percent(&self) -> Option<u32> {
		self.confidence.map(|c| (c.clamp(0.0, 1.0) * 100.0).round() as u32)
	}

	/// Involved entities, empty when the backend sent none.
	pub fn entity_list(&self) -> &[EventEntity] {
		self.entities.as_deref().unwrap_or_default()
	}

	/// Parsed `occurred_at`.
	pub fn occurred(&self) -> Option<DateTime<Utc>> {
		self.occurred_at.as_deref().and_then(parse_timestamp)
	}

	/// Parsed `recorded_at`.
	pub fn recorded(&self) -> Option<DateTime<Utc>> {
		self.recorded_at.as_deref().and_then(parse_timestamp)
	}
}

/// RFC 3339, or a naive ISO-8601 timestamp read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
	let raw = raw.trim();
	if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
		return Some(dt.with_timezone(&Utc));
	}
	["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
		.iter()
		.find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
		.map(|naive| naive.and_utc())
}

/// Events that occurred within [`RECENT_WINDOW_SECS`] of `now`, newest first.
///
/// The boundary is inclusive. Events dated after `now` are kept; events
/// with a missing or unparseable `occurred_at` are dropped. Timestamps
/// without an offset count as UTC, not browser-local time.
pub fn recent_events(events: Vec<EventRecord>, now: DateTime<Utc>) -> Vec<EventRecord> {
	let window = Duration::seconds(RECENT_WINDOW_SECS);
	let mut recent: Vec<(DateTime<Utc>, EventRecord)> = events
		.into_iter()
		.filter_map(|ev| ev.occurred().map(|t| (t, ev)))
		.filter(|(t, _)| now - *t <= window)
		.collect();
	recent.sort_by(|a, b| b.0.cmp(&a.0));
	recent.into_iter().map(|(_, ev)| ev).collect()
}

/// Short date for list rows, e.g. `Oct 19`.
pub fn short_date(dt: DateTime<Utc>) -> String {
	dt.format("%b %-d").to_string()
}

/// Long date for detail views, e.g. `October 19, 2026`.
pub fn long_date(dt: DateTime<Utc>) -> String {
	dt.format("%B %-d, %Y").to_string()
}

/// Dollar amount in billions, e.g. `$2.0B`.
pub fn format_billions(amount_usd: f64) -> String {
	format!("${:.1}B", amount_usd / 1_000_000_000.0)
}

#[cfg(test)]
mod tests {
	use chrono::TimeZone;
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	fn event(id: i64, occurred_at: Option<&str>) -> EventRecord {
		EventRecord {
			id,
			event_type: "funding".into(),
			occurred_at: occurred_at.map(str::to_string),
			recorded_at: None,
			attributes: None,
			confidence: None,
			entities: None,
			source_url: None,
		}
	}

	fn now() -> DateTime<Utc> {
		Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
	}

	#[test]
	fn window_boundary_is_inclusive() {
		let exactly = event(1, Some("2026-10-12T12:00:00Z"));
		let one_second_older = event(2, Some("2026-10-12T11:59:59Z"));
		let kept = recent_events(vec![exactly, one_second_older], now());
		assert_eq!(kept.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1]);
	}

	#[test]
	fn sorted_newest_first_and_undated_dropped() {
		let events = vec![
			event(1, Some("2026-10-14T09:00:00Z")),
			event(2, None),
			event(3, Some("2026-10-18T09:00:00+02:00")),
			event(4, Some("not a date")),
			event(5, Some("2026-10-16T08:30:00")),
		];
		let ids: Vec<_> = recent_events(events, now()).iter().map(|e| e.id).collect();
		assert_eq!(ids, vec![3, 5, 1]);
	}

	#[test]
	fn future_events_are_kept() {
		let kept = recent_events(vec![event(1, Some("2026-10-25T00:00:00Z"))], now());
		assert_eq!(kept.len(), 1);
	}

	#[test]
	fn attributes_accept_string_or_object() {
		let mut ev = event(1, None);
		ev.attributes = Some(json!(r#"{"summary": "Acme raises $2B", "amount_usd": 2000000000}"#));
		assert_eq!(ev.summary().as_deref(), Some("Acme raises $2B"));
		assert_eq!(ev.amount_usd(), Some(2_000_000_000.0));

		ev.attributes = Some(json!({"summary": "parsed already"}));
		assert_eq!(ev.summary().as_deref(), Some("parsed already"));
	}

	#[test]
	fn malformed_attributes_are_empty() {
		let mut ev = event(1, None);
		ev.attributes = Some(json!("{not json"));
		assert!(ev.attributes().is_empty());
		ev.attributes = Some(json!("[1, 2]"));
		assert!(ev.attributes().is_empty());
		ev.attributes = Some(Value::Null);
		assert_eq!(ev.summary(), None);
	}

	#[test]
	fn decodes_backend_payload() {
		let raw = r#"[{
			"id": 7, "type": "acquisition", "occurred_at": "2026-10-17T00:00:00",
			"recorded_at": "2026-10-18T03:00:00", "attributes": "{\"summary\": \"Meta buys Manus\"}",
			"confidence": 0.874, "entities": [{"name": "Meta", "type": "company", "role": null}],
			"source_url": null
		}]"#;
		let events: Vec<EventRecord> = serde_json::from_str(raw).unwrap();
		assert_eq!(events[0].summary().as_deref(), Some("Meta buys Manus"));
		assert_eq!(events[0].confidence_percent(), Some(87));
		assert_eq!(events[0].entity_list()[0].role, None);
		assert_eq!(short_date(events[0].occurred().unwrap()), "Oct 17");
	}

	#[test]
	fn amounts_render_in_billions() {
		assert_eq!(format_billions(2_000_000_000.0), "$2.0B");
		assert_eq!(long_date(now()), "October 19, 2026");
	}
}

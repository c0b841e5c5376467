use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CategoryError;
use crate::graph::{EntityCategory, EntityRecord};

/// Body of `POST /entities/search`.
#[derive(Clone, Debug, Serialize)]
pub struct SearchRequest<'a> {
	/// Free-text entity name.
	pub query: &'a str,
}

/// An acquisition of the searched entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionInfo {
	/// Acquirer name.
	pub acquired_by: String,
	/// ISO date, if known.
	#[serde(default)]
	pub date: Option<String>,
	/// Deal size.
	#[serde(default)]
	pub amount_usd: Option<f64>,
}

/// An event the backend associates with the searched entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelatedEvent {
	/// Event kind, e.g. `funding`.
	#[serde(rename = "type")]
	pub event_type: String,
	/// ISO timestamp, if known.
	#[serde(default)]
	pub occurred_at: Option<String>,
	/// One-line description.
	#[serde(default)]
	pub summary: Option<String>,
	/// Amount involved.
	#[serde(default)]
	pub amount_usd: Option<f64>,
}

/// Entity returned by the search service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntitySearchResult {
	/// Slug id.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Category wire name; validated when converting to [`EntityRecord`].
	#[serde(rename = "type")]
	pub entity_type: String,
	/// Free-text description.
	#[serde(default)]
	pub description: Option<String>,
	/// Founding (or birth) year. Accepts `2015`, `2015.0` or `"2015"`.
	#[serde(default, deserialize_with = "lenient_year")]
	pub founded: Option<i32>,
	/// Founder names.
	#[serde(default)]
	pub founders: Option<Vec<String>>,
	/// Known acquisitions.
	#[serde(default)]
	pub acquisitions: Option<Vec<AcquisitionInfo>>,
	/// Related events.
	#[serde(default)]
	pub related_events: Option<Vec<RelatedEvent>>,
}

fn lenient_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Year {
		Int(i64),
		Float(f64),
		Text(String),
	}

	Ok(match Option::<Year>::deserialize(deserializer)? {
		Some(Year::Int(y)) => i32::try_from(y).ok(),
		Some(Year::Float(y)) if y.is_finite() => Some(y.round() as i32),
		Some(Year::Text(s)) => s.trim().parse().ok(),
		_ => None,
	})
}

impl TryFrom<&EntitySearchResult> for EntityRecord {
	type Error = CategoryError;

	fn try_from(result: &EntitySearchResult) -> Result<Self, Self::Error> {
		let category: EntityCategory = result.entity_type.parse()?;
		Ok(EntityRecord::new(&result.id, result.name.clone(), category))
	}
}

impl TryFrom<EntitySearchResult> for EntityRecord {
	type Error = CategoryError;

	fn try_from(result: EntitySearchResult) -> Result<Self, Self::Error> {
		EntityRecord::try_from(&result)
	}
}

/// Error body shape used by the backend.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
	#[serde(default)]
	pub detail: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn search_result_decodes_with_optional_fields_missing() {
		let result: EntitySearchResult = serde_json::from_str(
			r#"{"id": "Acme", "name": "Acme AI", "type": "ai_product_company"}"#,
		)
		.unwrap();
		assert_eq!(result.description, None);
		assert_eq!(result.founders, None);

		let record = EntityRecord::try_from(&result).unwrap();
		assert_eq!(record.id, "acme");
		assert_eq!(record.label, "Acme AI");
		assert_eq!(record.category, EntityCategory::AiProductCompany);
	}

	#[test]
	fn unknown_type_maps_to_category_error() {
		let result: EntitySearchResult = serde_json::from_str(
			r#"{"id": "x", "name": "X", "type": "robotics_lab", "founded": 2020}"#,
		)
		.unwrap();
		assert_eq!(
			EntityRecord::try_from(result),
			Err(CategoryError::UnknownCategory("robotics_lab".into()))
		);
	}

	#[test]
	fn founded_year_tolerates_float_and_string() {
		let year = |raw: &str| {
			let body = format!(r#"{{"id": "x", "name": "X", "type": "individual", "founded": {raw}}}"#);
			serde_json::from_str::<EntitySearchResult>(&body).unwrap().founded
		};
		assert_eq!(year("2015"), Some(2015));
		assert_eq!(year("2015.0"), Some(2015));
		assert_eq!(year(r#"" 1999 ""#), Some(1999));
		assert_eq!(year(r#""unknown""#), None);
		assert_eq!(year("null"), None);
	}

	#[test]
	fn nested_collections_decode() {
		let result: EntitySearchResult = serde_json::from_str(
			r#"{
				"id": "manus", "name": "Manus", "type": "ai_product_company",
				"acquisitions": [{"acquired_by": "Meta", "date": "2025-12-30", "amount_usd": 2000000000}],
				"related_events": [{"type": "acquisition", "occurred_at": null, "summary": "Meta buys Manus"}]
			}"#,
		)
		.unwrap();
		let acquisitions = result.acquisitions.unwrap();
		assert_eq!(acquisitions[0].acquired_by, "Meta");
		assert_eq!(acquisitions[0].amount_usd, Some(2_000_000_000.0));
		let events = result.related_events.unwrap();
		assert_eq!(events[0].event_type, "acquisition");
		assert_eq!(events[0].occurred_at, None);
	}
}

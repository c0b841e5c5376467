//! Entity detail view model: remote search data layered over catalog fallbacks.

use crate::api::{AcquisitionInfo, EntitySearchResult, RelatedEvent};
use crate::graph::{EntityRecord, FallbackInfo};

/// Everything the entity modal shows besides name and category.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityDetails {
	/// Paragraph description.
	pub description: String,
	/// Founding year for organisations, birth year for people.
	pub founded: Option<i32>,
	/// Founder names.
	pub founders: Vec<String>,
	/// Acquisitions reported by the backend.
	pub acquisitions: Vec<AcquisitionInfo>,
	/// Related events reported by the backend.
	pub related_events: Vec<RelatedEvent>,
}

impl EntityDetails {
	/// Merge `remote` over `fallback`; remote fields win when present.
	pub fn resolve(
		entity: &EntityRecord,
		fallback: Option<FallbackInfo>,
		remote: Option<&EntitySearchResult>,
	) -> Self {
		let remote_description = remote
			.and_then(|r| r.description.as_deref())
			.map(str::trim)
			.filter(|d| !d.is_empty());
		let description = remote_description
			.or(fallback.map(|f| f.description))
			.map(str::to_string)
			.unwrap_or_else(|| {
				format!(
					"{} is a {} in the AI ecosystem.",
					entity.label,
					entity.category.label()
				)
			});

		let founded = remote
			.and_then(|r| r.founded)
			.or(fallback.and_then(|f| f.founded));

		let founders = remote
			.and_then(|r| r.founders.clone())
			.filter(|f| !f.is_empty())
			.or_else(|| {
				fallback
					.map(|f| f.founders.iter().map(|s| s.to_string()).collect::<Vec<_>>())
					.filter(|f| !f.is_empty())
			})
			.unwrap_or_default();

		Self {
			description,
			founded,
			founders,
			acquisitions: remote
				.and_then(|r| r.acquisitions.clone())
				.unwrap_or_default(),
			related_events: remote
				.and_then(|r| r.related_events.clone())
				.unwrap_or_default(),
		}
	}

	/// Caption for [`EntityDetails::founded`].
	pub fn founded_caption(entity: &EntityRecord) -> &'static str {
		if entity.category.is_company() {
			"Founded"
		} else if entity.category.is_person() {
			"Born"
		} else {
			"Established"
		}
	}

	/// "Founder" or "Founders".
	pub fn founders_caption(&self) -> &'static str {
		if self.founders.len() == 1 {
			"Founder"
		} else {
			"Founders"
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::graph::{EntityCategory, fallback_info};

	fn remote(description: Option<&str>, founded: Option<i32>) -> EntitySearchResult {
		EntitySearchResult {
			id: "openai".into(),
			name: "OpenAI".into(),
			entity_type: "ai_product_company".into(),
			description: description.map(str::to_string),
			founded,
			founders: None,
			acquisitions: None,
			related_events: None,
		}
	}

	#[test]
	fn remote_fields_take_precedence() {
		let openai = EntityRecord::new("openai", "OpenAI", EntityCategory::AiProductCompany);
		let r = remote(Some("Fresh description."), Some(2016));
		let details = EntityDetails::resolve(&openai, fallback_info("openai"), Some(&r));
		assert_eq!(details.description, "Fresh description.");
		assert_eq!(details.founded, Some(2016));
		// absent remote founders keep the local list
		assert_eq!(details.founders.first().map(String::as_str), Some("Sam Altman"));
	}

	#[test]
	fn blank_remote_description_keeps_fallback() {
		let openai = EntityRecord::new("openai", "OpenAI", EntityCategory::AiProductCompany);
		let r = remote(Some("  "), None);
		let details = EntityDetails::resolve(&openai, fallback_info("openai"), Some(&r));
		assert!(details.description.starts_with("OpenAI is an AI research company"));
		assert_eq!(details.founded, Some(2015));
	}

	#[test]
	fn unknown_entity_gets_generated_description() {
		let acme = EntityRecord::new("acme", "Acme", EntityCategory::AiInfraCompany);
		let details = EntityDetails::resolve(&acme, None, None);
		assert_eq!(
			details.description,
			"Acme is a AI Infrastructure in the AI ecosystem."
		);
		assert_eq!(details.founded, None);
		assert!(details.founders.is_empty());
	}

	#[test]
	fn captions_follow_category() {
		let person = EntityRecord::new("sam-altman", "Sam Altman", EntityCategory::Individual);
		assert_eq!(EntityDetails::founded_caption(&person), "Born");
		let chip = EntityRecord::new("amd", "AMD", EntityCategory::ChipCompany);
		assert_eq!(EntityDetails::founded_caption(&chip), "Founded");
		let details = EntityDetails::resolve(&chip, fallback_info("amd"), None);
		assert_eq!(details.founders_caption(), "Founder");
	}
}

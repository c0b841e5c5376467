//! Entity and relationship records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CategoryError;

/// Kind of entity shown as a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
	/// Builds end-user AI products or models.
	AiProductCompany,
	/// Provides platforms, tooling or compute.
	AiInfraCompany,
	/// Hardware vendor.
	ChipCompany,
	/// Researcher or academic.
	AiScholar,
	/// Founder, executive or other person.
	Individual,
}

impl EntityCategory {
	/// All categories in display order.
	pub const ALL: [Self; 5] = [
		Self::AiProductCompany,
		Self::AiInfraCompany,
		Self::ChipCompany,
		Self::AiScholar,
		Self::Individual,
	];

	/// Wire name, as sent by the search service.
	pub fn key(self) -> &'static str {
		match self {
			Self::AiProductCompany => "ai_product_company",
			Self::AiInfraCompany => "ai_infra_company",
			Self::ChipCompany => "chip_company",
			Self::AiScholar => "ai_scholar",
			Self::Individual => "individual",
		}
	}

	/// Human readable name.
	pub fn label(self) -> &'static str {
		match self {
			Self::AiProductCompany => "AI Product Company",
			Self::AiInfraCompany => "AI Infrastructure",
			Self::ChipCompany => "Chip Company",
			Self::AiScholar => "AI Scholar",
			Self::Individual => "Individual",
		}
	}

	/// Node fill colour on the canvas.
	pub fn color(self) -> &'static str {
		match self {
			Self::AiProductCompany => "#90caf9",
			Self::AiInfraCompany => "#81c784",
			Self::ChipCompany => "#ffb74d",
			Self::AiScholar => "#4fc3f7",
			Self::Individual => "#f48fb1",
		}
	}

	/// Companies of any kind.
	pub fn is_company(self) -> bool {
		matches!(
			self,
			Self::AiProductCompany | Self::AiInfraCompany | Self::ChipCompany
		)
	}

	/// Scholars and individuals.
	pub fn is_person(self) -> bool {
		matches!(self, Self::AiScholar | Self::Individual)
	}
}

impl std::str::FromStr for EntityCategory {
	type Err = CategoryError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let key = s.trim();
		Self::ALL
			.into_iter()
			.find(|c| c.key().eq_ignore_ascii_case(key))
			.ok_or_else(|| CategoryError::UnknownCategory(s.to_string()))
	}
}

impl fmt::Display for EntityCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Kind of relationship an edge represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationCategory {
	/// Person leads or founded an organisation.
	Leadership,
	/// Commercial or open-source partnership.
	Partnership,
	/// Capital flows from source to target.
	Investment,
	/// Source supplies compute, data or hardware.
	Infrastructure,
	/// Source ships or consumes target's models.
	Product,
}

impl RelationCategory {
	/// Human readable name.
	pub fn label(self) -> &'static str {
		match self {
			Self::Leadership => "Leadership",
			Self::Partnership => "Partnership",
			Self::Investment => "Investment",
			Self::Infrastructure => "Infrastructure",
			Self::Product => "Product",
		}
	}
}

impl fmt::Display for RelationCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// A node. Identity is `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
	/// Stable lowercase slug.
	pub id: String,
	/// Display name.
	pub label: String,
	/// Entity kind.
	pub category: EntityCategory,
}

impl EntityRecord {
	/// Build a record, normalizing the id.
	pub fn new(id: impl AsRef<str>, label: impl Into<String>, category: EntityCategory) -> Self {
		Self {
			id: normalize_id(id.as_ref()),
			label: label.into(),
			category,
		}
	}
}

/// Trimmed, lowercased form of an entity id.
pub fn normalize_id(id: &str) -> String {
	id.trim().to_lowercase()
}

/// Identity of a directed edge.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
	/// Origin node id.
	pub source: String,
	/// Destination node id.
	pub target: String,
}

impl EdgeKey {
	/// Key for `source -> target`.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}

	/// True when either endpoint is `id`.
	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}
}

impl fmt::Display for EdgeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} -> {}", self.source, self.target)
	}
}

/// A directed edge. Identity is the ordered `(source_id, target_id)` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRecord {
	/// Origin node id.
	pub source_id: String,
	/// Destination node id.
	pub target_id: String,
	/// Short caption, e.g. "GPU provider".
	pub label: String,
	/// Relationship kind.
	pub category: RelationCategory,
	/// Longer explanation shown in the edge modal.
	pub description: String,
}

impl RelationshipRecord {
	/// Identity key of this edge.
	pub fn key(&self) -> EdgeKey {
		EdgeKey::new(self.source_id.clone(), self.target_id.clone())
	}

	/// True if this edge has identity `(source, target)`.
	pub fn is(&self, source: &str, target: &str) -> bool {
		self.source_id == source && self.target_id == target
	}
}

/// The materialized graph handed to the layout engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphSnapshot {
	/// Unique by id.
	pub nodes: Vec<EntityRecord>,
	/// Unique by `(source_id, target_id)`.
	pub edges: Vec<RelationshipRecord>,
}

impl GraphSnapshot {
	/// Node by id.
	pub fn node(&self, id: &str) -> Option<&EntityRecord> {
		self.nodes.iter().find(|n| n.id == id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn category_parses_wire_names() {
		assert_eq!(
			"ai_infra_company".parse::<EntityCategory>().unwrap(),
			EntityCategory::AiInfraCompany
		);
		assert_eq!(
			" Chip_Company ".parse::<EntityCategory>().unwrap(),
			EntityCategory::ChipCompany
		);
	}

	#[test]
	fn unknown_category_is_rejected() {
		let err = "company".parse::<EntityCategory>().unwrap_err();
		assert_eq!(err, CategoryError::UnknownCategory("company".into()));
	}

	#[test]
	fn record_ids_are_normalized() {
		let r = EntityRecord::new("  AWS ", "Amazon Web Services", EntityCategory::AiInfraCompany);
		assert_eq!(r.id, "aws");
	}

	#[test]
	fn category_serializes_snake_case() {
		let json = serde_json::to_string(&EntityCategory::AiProductCompany).unwrap();
		assert_eq!(json, "\"ai_product_company\"");
	}
}

//! Seed graph plus session additions with relationship inference.

use std::collections::HashSet;

use log::{debug, info};

use super::catalog::EntityCatalog;
use super::types::{
	EdgeKey, EntityCategory, EntityRecord, GraphSnapshot, RelationCategory, RelationshipRecord,
	normalize_id,
};

/// Outcome of [`IncrementalGraphStore::add_entity`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddResult {
	/// A node with this id was already present; nothing changed.
	AlreadyExists(String),
	/// The candidate was inserted. `inferred` holds the edges actually added.
	Inserted {
		/// Id of the new node.
		id: String,
		/// Edges produced by inference, in rule order.
		inferred: Vec<RelationshipRecord>,
	},
}

impl AddResult {
	/// Id of the node the caller should focus, new or existing.
	pub fn id(&self) -> &str {
		match self {
			Self::AlreadyExists(id) => id,
			Self::Inserted { id, .. } => id,
		}
	}

	/// True for a fresh insertion.
	pub fn is_inserted(&self) -> bool {
		matches!(self, Self::Inserted { .. })
	}
}

/// A `(predicate, template)` pair producing an edge for a newly added entity.
///
/// `applies` sees the candidate and a membership test over the merged node
/// set (the candidate included).
#[derive(Clone, Copy)]
pub struct InferenceRule {
	/// Short name for logs.
	pub name: &'static str,
	/// Whether the rule fires for this candidate.
	pub applies: fn(&EntityRecord, &dyn Fn(&str) -> bool) -> bool,
	/// Edge to add when it does.
	pub template: fn(&EntityRecord) -> RelationshipRecord,
}

impl std::fmt::Debug for InferenceRule {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("InferenceRule").field("name", &self.name).finish()
	}
}

fn partnership(source: &str, target: &str, label: &str, description: String) -> RelationshipRecord {
	RelationshipRecord {
		source_id: source.into(),
		target_id: target.into(),
		label: label.into(),
		category: RelationCategory::Partnership,
		description,
	}
}

/// The built-in rules, evaluated in this order. Every matching rule fires.
pub fn default_rules() -> Vec<InferenceRule> {
	vec![
		InferenceRule {
			name: "gpu-provider",
			applies: |c, has| c.category == EntityCategory::AiProductCompany && has("nvidia"),
			template: |c| RelationshipRecord {
				source_id: "nvidia".into(),
				target_id: c.id.clone(),
				label: "GPU provider".into(),
				category: RelationCategory::Infrastructure,
				description: format!(
					"NVIDIA provides GPUs that power {}'s model training and inference.",
					c.label
				),
			},
		},
		InferenceRule {
			name: "cloud-openai",
			applies: |c, has| {
				c.category == EntityCategory::AiInfraCompany
					&& has("openai")
					&& (c.id.contains("aws") || c.id.contains("azure"))
			},
			template: |c| {
				partnership(
					&c.id,
					"openai",
					"Cloud partnership",
					format!("{} provides cloud infrastructure to OpenAI.", c.label),
				)
			},
		},
		InferenceRule {
			name: "microsoft-openai",
			applies: |c, has| c.id == "microsoft" && has("openai"),
			template: |c| {
				partnership(
					&c.id,
					"openai",
					"Strategic partnership",
					"Microsoft is OpenAI's largest investor and exclusive cloud partner through Azure."
						.into(),
				)
			},
		},
		InferenceRule {
			name: "aws-anthropic",
			applies: |c, has| c.id == "aws" && has("anthropic"),
			template: |c| {
				partnership(
					&c.id,
					"anthropic",
					"Cloud partnership",
					"AWS is Anthropic's primary cloud and training partner.".into(),
				)
			},
		},
	]
}

/// Seed catalog plus everything added during the session.
///
/// Dynamic lists only grow. Node identity is the id, edge identity the
/// ordered `(source, target)` pair; the first record seen for an identity wins.
#[derive(Clone, Debug)]
pub struct IncrementalGraphStore {
	catalog: EntityCatalog,
	rules: Vec<InferenceRule>,
	added_nodes: Vec<EntityRecord>,
	added_edges: Vec<RelationshipRecord>,
	node_ids: HashSet<String>,
	edge_keys: HashSet<EdgeKey>,
}

impl IncrementalGraphStore {
	/// Store over `catalog` using [`default_rules`].
	pub fn new(catalog: EntityCatalog) -> Self {
		Self::with_rules(catalog, default_rules())
	}

	/// Store over `catalog` with a custom rule list.
	pub fn with_rules(catalog: EntityCatalog, rules: Vec<InferenceRule>) -> Self {
		let node_ids = catalog.nodes().iter().map(|n| n.id.clone()).collect();
		let edge_keys = catalog.edges().iter().map(RelationshipRecord::key).collect();
		Self {
			catalog,
			rules,
			added_nodes: Vec::new(),
			added_edges: Vec::new(),
			node_ids,
			edge_keys,
		}
	}

	/// Merge `candidate` into the graph and infer edges for it.
	pub fn add_entity(&mut self, mut candidate: EntityRecord) -> AddResult {
		candidate.id = normalize_id(&candidate.id);
		if self.node_ids.contains(&candidate.id) {
			debug!("entity {} already present", candidate.id);
			return AddResult::AlreadyExists(candidate.id);
		}

		self.node_ids.insert(candidate.id.clone());
		let mut inferred = Vec::new();
		for rule in &self.rules {
			let has = |id: &str| self.node_ids.contains(id);
			if !(rule.applies)(&candidate, &has) {
				continue;
			}
			let edge = (rule.template)(&candidate);
			if self.edge_keys.insert(edge.key()) {
				debug!("rule {} inferred {}", rule.name, edge.key());
				inferred.push(edge);
			}
		}
		self.added_edges.extend(inferred.iter().cloned());

		info!(
			"added entity {} ({}) with {} inferred edge(s)",
			candidate.id,
			candidate.category.key(),
			inferred.len()
		);
		let id = candidate.id.clone();
		self.added_nodes.push(candidate);
		AddResult::Inserted { id, inferred }
	}

	/// Materialize the merged graph. Always a fresh value.
	pub fn snapshot(&self) -> GraphSnapshot {
		let mut seen = HashSet::new();
		let nodes = self
			.catalog
			.nodes()
			.iter()
			.chain(&self.added_nodes)
			.filter(|n| seen.insert(n.id.as_str()))
			.cloned()
			.collect();

		let mut seen = HashSet::new();
		let edges = self
			.catalog
			.edges()
			.iter()
			.chain(&self.added_edges)
			.filter(|e| seen.insert((e.source_id.as_str(), e.target_id.as_str())))
			.cloned()
			.collect();

		GraphSnapshot { nodes, edges }
	}

	/// True if a node with `id` exists.
	pub fn contains(&self, id: &str) -> bool {
		self.node_ids.contains(id)
	}

	/// Node by id.
	pub fn node(&self, id: &str) -> Option<&EntityRecord> {
		self.catalog
			.nodes()
			.iter()
			.chain(&self.added_nodes)
			.find(|n| n.id == id)
	}

	/// Edge by identity.
	pub fn edge(&self, source: &str, target: &str) -> Option<&RelationshipRecord> {
		self.catalog
			.edges()
			.iter()
			.chain(&self.added_edges)
			.find(|e| e.is(source, target))
	}

	/// Display label for `id`, or the id itself for dangling references.
	pub fn label_for(&self, id: &str) -> String {
		self.node(id)
			.map(|n| n.label.clone())
			.unwrap_or_else(|| id.to_string())
	}

	/// Ids connected to `id` in either direction.
	pub fn neighbors(&self, id: &str) -> Vec<String> {
		let mut out: Vec<String> = Vec::new();
		for edge in self.catalog.edges().iter().chain(&self.added_edges) {
			let other = if edge.source_id == id {
				&edge.target_id
			} else if edge.target_id == id {
				&edge.source_id
			} else {
				continue;
			};
			if !out.contains(other) {
				out.push(other.clone());
			}
		}
		out
	}

	/// Entities added during this session, in insertion order.
	pub fn added_nodes(&self) -> &[EntityRecord] {
		&self.added_nodes
	}
}

impl Default for IncrementalGraphStore {
	fn default() -> Self {
		Self::new(EntityCatalog::seed())
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use pretty_assertions::assert_eq;

	use super::*;

	fn entity(id: &str, category: EntityCategory) -> EntityRecord {
		EntityRecord::new(id, id.to_uppercase(), category)
	}

	fn small_store(ids: &[(&str, EntityCategory)]) -> IncrementalGraphStore {
		let nodes = ids.iter().map(|&(id, c)| entity(id, c)).collect();
		IncrementalGraphStore::new(EntityCatalog::from_parts(nodes, Vec::new()))
	}

	#[test]
	fn adding_twice_is_idempotent() {
		let mut store = IncrementalGraphStore::default();
		let acme = entity("acme", EntityCategory::AiProductCompany);

		assert!(store.add_entity(acme.clone()).is_inserted());
		let after_first = store.snapshot();
		assert_eq!(
			store.add_entity(acme),
			AddResult::AlreadyExists("acme".into())
		);
		assert_eq!(store.snapshot(), after_first);
	}

	#[test]
	fn raw_ids_are_normalized_before_lookup() {
		let mut store = IncrementalGraphStore::default();
		let before = store.snapshot();
		let shouting = EntityRecord {
			id: "NVIDIA".into(),
			label: "Nvidia".into(),
			category: EntityCategory::ChipCompany,
		};
		assert_eq!(
			store.add_entity(shouting),
			AddResult::AlreadyExists("nvidia".into())
		);

		let decoded: EntityRecord = serde_json::from_str(
			r#"{"id": " OpenAI ", "label": "OpenAI", "category": "ai_product_company"}"#,
		)
		.unwrap();
		assert_eq!(
			store.add_entity(decoded),
			AddResult::AlreadyExists("openai".into())
		);
		assert_eq!(store.snapshot(), before);
		assert!(store.edge("nvidia", " OpenAI ").is_none());
	}

	#[test]
	fn seed_entities_resolve_to_existing() {
		let mut store = IncrementalGraphStore::default();
		let before = store.snapshot();
		let result = store.add_entity(entity("openai", EntityCategory::AiProductCompany));
		assert_eq!(result, AddResult::AlreadyExists("openai".into()));
		assert_eq!(store.snapshot(), before);
	}

	#[test]
	fn product_company_gets_gpu_edge_only_when_nvidia_present() {
		let mut with = small_store(&[("nvidia", EntityCategory::ChipCompany)]);
		let AddResult::Inserted { inferred, .. } =
			with.add_entity(entity("x", EntityCategory::AiProductCompany))
		else {
			panic!("expected insertion");
		};
		assert_eq!(inferred.len(), 1);
		assert!(inferred[0].is("nvidia", "x"));
		assert_eq!(inferred[0].label, "GPU provider");
		assert_eq!(inferred[0].category, RelationCategory::Infrastructure);

		let mut without = small_store(&[]);
		let result = without.add_entity(entity("x", EntityCategory::AiProductCompany));
		assert_eq!(
			result,
			AddResult::Inserted {
				id: "x".into(),
				inferred: Vec::new()
			}
		);
		assert!(without.snapshot().edges.is_empty());
	}

	#[test]
	fn cloud_infra_partners_with_openai() {
		let mut store = small_store(&[("openai", EntityCategory::AiProductCompany)]);
		let AddResult::Inserted { inferred, .. } =
			store.add_entity(entity("azure-ai", EntityCategory::AiInfraCompany))
		else {
			panic!("expected insertion");
		};
		assert_eq!(inferred.len(), 1);
		assert!(inferred[0].is("azure-ai", "openai"));
		assert_eq!(inferred[0].category, RelationCategory::Partnership);

		let AddResult::Inserted { inferred, .. } =
			store.add_entity(entity("lambda", EntityCategory::AiInfraCompany))
		else {
			panic!("expected insertion");
		};
		assert!(inferred.is_empty());
	}

	#[test]
	fn all_matching_rules_fire_and_duplicates_are_skipped() {
		// aws matches both the cloud rule (-> openai) and the aws rule (-> anthropic)
		let mut store = small_store(&[
			("openai", EntityCategory::AiProductCompany),
			("anthropic", EntityCategory::AiProductCompany),
		]);
		let AddResult::Inserted { inferred, .. } =
			store.add_entity(entity("aws", EntityCategory::AiInfraCompany))
		else {
			panic!("expected insertion");
		};
		let keys: Vec<_> = inferred.iter().map(|e| e.key()).collect();
		assert_eq!(
			keys,
			vec![EdgeKey::new("aws", "openai"), EdgeKey::new("aws", "anthropic")]
		);

		// microsoft -> openai already seeded: inference must not duplicate it
		let seeded = RelationshipRecord {
			source_id: "microsoft".into(),
			target_id: "openai".into(),
			label: "Investor".into(),
			category: RelationCategory::Investment,
			description: String::new(),
		};
		let mut store = IncrementalGraphStore::new(EntityCatalog::from_parts(
			vec![entity("openai", EntityCategory::AiProductCompany)],
			vec![seeded.clone()],
		));
		let result = store.add_entity(entity("microsoft", EntityCategory::AiInfraCompany));
		assert_eq!(
			result,
			AddResult::Inserted {
				id: "microsoft".into(),
				inferred: Vec::new()
			}
		);
		assert_eq!(store.edge("microsoft", "openai"), Some(&seeded));
	}

	#[test]
	fn edges_stay_unique_across_many_adds() {
		let mut store = IncrementalGraphStore::default();
		for (id, category) in [
			("acme", EntityCategory::AiProductCompany),
			("aws", EntityCategory::AiInfraCompany),
			("microsoft", EntityCategory::AiInfraCompany),
			("azure", EntityCategory::AiInfraCompany),
			("acme", EntityCategory::AiProductCompany),
			("beta", EntityCategory::AiProductCompany),
		] {
			store.add_entity(entity(id, category));
		}
		let snapshot = store.snapshot();
		let keys: HashSet<_> = snapshot.edges.iter().map(|e| e.key()).collect();
		assert_eq!(keys.len(), snapshot.edges.len());
		let ids: HashSet<_> = snapshot.nodes.iter().map(|n| n.id.clone()).collect();
		assert_eq!(ids.len(), snapshot.nodes.len());
	}

	#[test]
	fn custom_rules_replace_defaults() {
		let rules = vec![InferenceRule {
			name: "scholar-to-nvidia",
			applies: |c, has| c.category == EntityCategory::AiScholar && has("nvidia"),
			template: |c| RelationshipRecord {
				source_id: c.id.clone(),
				target_id: "nvidia".into(),
				label: "Advisor".into(),
				category: RelationCategory::Leadership,
				description: String::new(),
			},
		}];
		let catalog =
			EntityCatalog::from_parts(vec![entity("nvidia", EntityCategory::ChipCompany)], Vec::new());
		let mut store = IncrementalGraphStore::with_rules(catalog, rules);
		store.add_entity(entity("acme", EntityCategory::AiProductCompany));
		store.add_entity(entity("prof", EntityCategory::AiScholar));
		let keys: Vec<_> = store.snapshot().edges.iter().map(|e| e.key()).collect();
		assert_eq!(keys, vec![EdgeKey::new("prof", "nvidia")]);
	}

	#[test]
	fn labels_fall_back_to_id_for_dangling_references() {
		let store = IncrementalGraphStore::default();
		assert_eq!(store.label_for("nvidia"), "NVIDIA");
		assert_eq!(store.label_for("ghost"), "ghost");
	}

	#[test]
	fn neighbors_cover_both_directions() {
		let store = IncrementalGraphStore::default();
		let n = store.neighbors("nvidia");
		assert!(n.contains(&"openai".to_string()));
		assert!(n.contains(&"coreweave".to_string()));
	}
}

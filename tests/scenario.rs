//! Search-to-focus flow through the public core API, without a browser.

use std::collections::HashMap;

use aiscope::api::{EntitySearchResult, SearchSequencer, prepare_query};
use aiscope::config::AppConfig;
use aiscope::error::CategoryError;
use aiscope::graph::{
	AddResult, EdgeKey, Emphasis, EntityRecord, HighlightState, IncrementalGraphStore,
	LayoutPosition, RelationCategory, ZoomState,
};
use pretty_assertions::assert_eq;

fn search_result(id: &str, name: &str, kind: &str) -> EntitySearchResult {
	serde_json::from_value(serde_json::json!({ "id": id, "name": name, "type": kind }))
		.expect("valid search result")
}

#[test]
fn adding_a_product_company_links_it_to_nvidia_and_focuses_it() {
	let config = AppConfig::default();
	let mut store = IncrementalGraphStore::default();
	let mut viewport = config.viewport_controller();
	let mut highlight = HighlightState::default();

	let before = store.snapshot();
	assert!(before.node("nvidia").is_some());

	let record = EntityRecord::try_from(search_result("Acme", "Acme", "ai_product_company"))
		.expect("known category");
	let outcome = store.add_entity(record.clone());
	assert_eq!(outcome.id(), "acme");

	let after = store.snapshot();
	assert_eq!(after.nodes.len(), before.nodes.len() + 1);
	assert_eq!(after.edges.len(), before.edges.len() + 1);
	let edge = store.edge("nvidia", "acme").expect("inferred edge");
	assert_eq!(edge.category, RelationCategory::Infrastructure);

	viewport.request_zoom(outcome.id());
	let mut layout: HashMap<String, LayoutPosition> = HashMap::new();

	// the layout has not placed the node yet
	assert_eq!(viewport.on_layout_settled(&layout, &mut highlight), None);
	assert!(viewport.is_armed());
	assert!(!highlight.is_active());

	layout.insert("acme".into(), LayoutPosition { x: 30.0, y: 40.0 });
	let directive = viewport
		.on_layout_settled(&layout, &mut highlight)
		.expect("camera directive once positioned");
	assert_eq!(directive.node_id, "acme");
	assert_eq!(directive.center, LayoutPosition { x: 30.0, y: 40.0 });
	assert_eq!(directive.distance_ratio, 1.0 + 150.0 / 50.0);
	assert_eq!(directive.transition_ms, 400);
	assert_eq!(viewport.state(), &ZoomState::Idle);
	assert_eq!(highlight.node_emphasis("acme"), Emphasis::Focused);
	assert_eq!(highlight.node_emphasis("openai"), Emphasis::Muted);

	// re-adding leaves the graph alone
	assert_eq!(
		store.add_entity(record),
		AddResult::AlreadyExists("acme".into())
	);
	assert_eq!(store.snapshot(), after);
}

#[test]
fn newer_zoom_request_replaces_pending_one() {
	let mut viewport = AppConfig::default().viewport_controller();
	let mut highlight = HighlightState::default();
	let layout: HashMap<String, LayoutPosition> = [
		("a".to_string(), LayoutPosition { x: 10.0, y: 0.0 }),
		("b".to_string(), LayoutPosition { x: 0.0, y: 20.0 }),
	]
	.into_iter()
	.collect();

	viewport.request_zoom("a");
	viewport.request_zoom("b");
	let directive = viewport
		.on_layout_settled(&layout, &mut highlight)
		.expect("directive for b");
	assert_eq!(directive.node_id, "b");
	assert_eq!(highlight.node(), Some("b"));
	assert_eq!(viewport.on_layout_settled(&layout, &mut highlight), None);
}

#[test]
fn only_latest_search_response_is_applied() {
	let mut sequencer = SearchSequencer::default();
	let query = prepare_query("  anthropic ", 2).expect("long enough");
	let slow = sequencer.begin(query);
	let fast = sequencer.begin("mistral");

	assert!(sequencer.is_current(&fast));
	assert!(!sequencer.is_current(&slow));
	assert_eq!(slow.term, "anthropic");
	assert_eq!(prepare_query(" a ", 2), None);
}

#[test]
fn unknown_category_is_rejected_before_reaching_the_store() {
	let store = IncrementalGraphStore::default();
	let err = EntityRecord::try_from(search_result("zeta", "Zeta", "space_agency")).unwrap_err();
	assert_eq!(err, CategoryError::UnknownCategory("space_agency".into()));
	assert!(!store.contains("zeta"));
}

#[test]
fn dangling_edge_endpoint_falls_back_to_id() {
	let store = IncrementalGraphStore::default();
	assert_eq!(store.label_for("nvidia"), "NVIDIA");
	assert_eq!(store.label_for("ghost-co"), "ghost-co");
	assert_eq!(EdgeKey::new("nvidia", "ghost-co").to_string(), "nvidia -> ghost-co");
}

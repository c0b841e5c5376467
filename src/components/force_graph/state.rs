use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use crate::graph::{
	CameraDirective, EdgeKey, GraphSnapshot, HighlightState, LayoutPosition, PositionSource,
};

pub const NODE_RADIUS: f64 = 6.0;
pub const HIT_RADIUS: f64 = 12.0;
pub const EDGE_HIT_RADIUS: f64 = 5.0;
const SEED_RING: f64 = 120.0;
const OUTER_RING: f64 = 220.0;
const NEIGHBOR_OFFSET: f64 = 40.0;
/// Screen pixels a press may travel and still count as a click.
const CLICK_SLOP: f64 = 4.0;

pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	fn lerp(&self, to: &ViewTransform, t: f64) -> ViewTransform {
		ViewTransform {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

#[derive(Clone, Debug)]
pub struct CameraTransition {
	from: ViewTransform,
	to: ViewTransform,
	elapsed_ms: f64,
	duration_ms: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

/// What the pointer is currently over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerTarget {
	Node(String),
	Edge(EdgeKey),
}

/// Reflect a pointer move in the highlight.
///
/// Leaving a node only clears the node highlight if that node is still the
/// highlighted one, so a focus set by a completed zoom survives pointer moves
/// over empty canvas.
pub fn apply_pointer_change(
	highlight: &mut HighlightState,
	old: Option<&PointerTarget>,
	new: Option<&PointerTarget>,
) {
	if old == new {
		return;
	}
	match old {
		Some(PointerTarget::Node(id)) if highlight.node() == Some(id.as_str()) => {
			highlight.set_highlighted_node(None)
		}
		Some(PointerTarget::Edge(_)) => highlight.set_highlighted_edge(None),
		_ => {}
	}
	match new {
		Some(PointerTarget::Node(id)) => highlight.set_highlighted_node(Some(id.clone())),
		Some(PointerTarget::Edge(key)) => highlight.set_highlighted_edge(Some(key.clone())),
		None => {}
	}
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub pointer: Option<PointerTarget>,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	edges: Vec<(EdgeKey, DefaultNodeIdx, DefaultNodeIdx)>,
	edge_keys: HashSet<EdgeKey>,
	edge_labels: HashMap<EdgeKey, String>,
	index: HashMap<String, DefaultNodeIdx>,
	unplaced: HashSet<DefaultNodeIdx>,
	camera: Option<CameraTransition>,
}

impl ForceGraphState {
	pub fn new(data: &GraphSnapshot, width: f64, height: f64) -> Self {
		let graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let mut state = Self {
			graph,
			edges: Vec::new(),
			edge_keys: HashSet::new(),
			edge_labels: HashMap::new(),
			index: HashMap::new(),
			unplaced: HashSet::new(),
			camera: None,
			// layout origin sits at the canvas center
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			pointer: None,
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		};
		state.sync(data);
		state
	}

	/// Add nodes and edges from `data` that the simulation does not have yet.
	///
	/// Existing nodes keep their positions. Edges with an endpoint missing from
	/// the snapshot are not simulated.
	pub fn sync(&mut self, data: &GraphSnapshot) {
		let initial = self.index.is_empty();
		let fresh: Vec<_> = data
			.nodes
			.iter()
			.filter(|n| !self.index.contains_key(&n.id))
			.collect();

		for (i, node) in fresh.iter().enumerate() {
			let (x, y) = if initial {
				let angle = (i as f64) * 2.0 * PI / fresh.len() as f64;
				(SEED_RING * angle.cos(), SEED_RING * angle.sin())
			} else {
				self.spawn_point(&node.id, data)
			};

			let idx = self.graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color: node.category.color().to_string(),
				},
			});
			self.index.insert(node.id.clone(), idx);
			self.unplaced.insert(idx);
		}

		for edge in &data.edges {
			let key = edge.key();
			if self.edge_keys.contains(&key) {
				continue;
			}
			let (Some(&src), Some(&tgt)) =
				(self.index.get(&edge.source_id), self.index.get(&edge.target_id))
			else {
				debug!("not simulating dangling edge {key}");
				continue;
			};
			self.graph.add_edge(src, tgt, EdgeData::default());
			self.edge_keys.insert(key.clone());
			self.edge_labels.insert(key.clone(), edge.label.clone());
			self.edges.push((key, src, tgt));
		}
	}

	/// Start position for a node added after the initial layout: next to a
	/// connected node when there is one, else on an outer ring.
	fn spawn_point(&self, id: &str, data: &GraphSnapshot) -> (f64, f64) {
		let angle = (self.index.len() as f64) * 2.399_963;
		let anchor = data
			.edges
			.iter()
			.filter_map(|e| {
				if e.source_id == id {
					self.index.get(&e.target_id)
				} else if e.target_id == id {
					self.index.get(&e.source_id)
				} else {
					None
				}
			})
			.find_map(|&idx| self.node_xy(idx));

		match anchor {
			Some((ax, ay)) => (
				ax as f64 + NEIGHBOR_OFFSET * angle.cos(),
				ay as f64 + NEIGHBOR_OFFSET * angle.sin(),
			),
			None => (OUTER_RING * angle.cos(), OUTER_RING * angle.sin()),
		}
	}

	fn node_xy(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x(), node.y()));
			}
		});
		found
	}

	pub fn id_of(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	pub fn index_of(&self, id: &str) -> Option<DefaultNodeIdx> {
		self.index.get(id).copied()
	}

	pub fn edge_label(&self, key: &EdgeKey) -> Option<&str> {
		self.edge_labels.get(key).map(String::as_str)
	}

	pub fn node_count(&self) -> usize {
		self.index.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<EdgeKey> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut best: Option<(f64, &EdgeKey)> = None;
		for (key, src, tgt) in &self.edges {
			let (Some((x1, y1)), Some((x2, y2))) = (self.node_xy(*src), self.node_xy(*tgt)) else {
				continue;
			};
			let d = segment_distance(gx, gy, x1 as f64, y1 as f64, x2 as f64, y2 as f64);
			if d < EDGE_HIT_RADIUS && best.is_none_or(|(bd, _)| d < bd) {
				best = Some((d, key));
			}
		}
		best.map(|(_, key)| key.clone())
	}

	pub fn target_at_position(&self, sx: f64, sy: f64) -> Option<PointerTarget> {
		if let Some(id) = self.node_at_position(sx, sy).and_then(|idx| self.id_of(idx)) {
			return Some(PointerTarget::Node(id));
		}
		self.edge_at_position(sx, sy).map(PointerTarget::Edge)
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(_, src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	/// Point the hover animation at the highlighted node.
	pub fn sync_highlight(&mut self, highlight: &HighlightState) {
		let idx = highlight.node().and_then(|id| self.index_of(id));
		self.set_hover(idx);
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Start an eased move toward `directive`, replacing any move in progress.
	pub fn focus(&mut self, directive: &CameraDirective, zoom_range: (f64, f64)) {
		let k = directive.zoom(zoom_range.0, zoom_range.1);
		let to = ViewTransform {
			x: self.width / 2.0 - directive.center.x * k,
			y: self.height / 2.0 - directive.center.y * k,
			k,
		};
		self.camera = Some(CameraTransition {
			from: self.transform,
			to,
			elapsed_ms: 0.0,
			duration_ms: directive.transition_ms as f64,
		});
	}

	/// Drop any camera move; user input takes over.
	pub fn cancel_camera(&mut self) {
		self.camera = None;
	}

	pub fn is_camera_moving(&self) -> bool {
		self.camera.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		// every node has simulated coordinates after one pass
		self.unplaced.clear();
		self.flow_time += dt as f64;
		self.advance_camera(dt as f64 * 1000.0);

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	fn advance_camera(&mut self, dt_ms: f64) {
		let Some(cam) = self.camera.as_mut() else {
			return;
		};
		cam.elapsed_ms += dt_ms;
		let t = if cam.duration_ms <= 0.0 {
			1.0
		} else {
			(cam.elapsed_ms / cam.duration_ms).min(1.0)
		};
		self.transform = cam.from.lerp(&cam.to, ease_out_cubic(t));
		if t >= 1.0 {
			self.camera = None;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn exceeds_click_slop(dx: f64, dy: f64) -> bool {
		dx * dx + dy * dy > CLICK_SLOP * CLICK_SLOP
	}
}

impl PositionSource for ForceGraphState {
	fn position(&self, node_id: &str) -> Option<LayoutPosition> {
		let idx = self.index_of(node_id)?;
		if self.unplaced.contains(&idx) {
			return None;
		}
		self.node_xy(idx).map(|(x, y)| LayoutPosition {
			x: x as f64,
			y: y as f64,
		})
	}
}

fn segment_distance(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let len2 = dx * dx + dy * dy;
	let t = if len2 < f64::EPSILON {
		0.0
	} else {
		(((px - x1) * dx + (py - y1) * dy) / len2).clamp(0.0, 1.0)
	};
	let (cx, cy) = (x1 + t * dx, y1 + t * dy);
	((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{
		EntityCategory, EntityRecord, IncrementalGraphStore, RelationCategory, RelationshipRecord,
		ViewportController,
	};

	fn snapshot() -> GraphSnapshot {
		GraphSnapshot {
			nodes: vec![
				EntityRecord::new("nvidia", "NVIDIA", EntityCategory::ChipCompany),
				EntityRecord::new("openai", "OpenAI", EntityCategory::AiProductCompany),
			],
			edges: vec![
				RelationshipRecord {
					source_id: "nvidia".into(),
					target_id: "openai".into(),
					label: "GPU provider".into(),
					category: RelationCategory::Infrastructure,
					description: String::new(),
				},
				RelationshipRecord {
					source_id: "nvidia".into(),
					target_id: "ghost".into(),
					label: "?".into(),
					category: RelationCategory::Product,
					description: String::new(),
				},
			],
		}
	}

	#[test]
	fn dangling_edges_are_not_simulated() {
		let state = ForceGraphState::new(&snapshot(), 800.0, 600.0);
		assert_eq!(state.node_count(), 2);
		assert_eq!(state.edge_count(), 1);
	}

	#[test]
	fn positions_resolve_only_after_a_tick() {
		let mut state = ForceGraphState::new(&snapshot(), 800.0, 600.0);
		state.tick(0.016);

		let mut data = snapshot();
		data.nodes
			.push(EntityRecord::new("acme", "Acme", EntityCategory::AiProductCompany));
		state.sync(&data);
		assert!(state.position("openai").is_some());
		assert!(state.position("acme").is_none());
		assert!(state.position("ghost").is_none());

		state.tick(0.016);
		assert!(state.position("acme").is_some());
	}

	#[test]
	fn sync_is_incremental() {
		let mut state = ForceGraphState::new(&snapshot(), 800.0, 600.0);
		state.sync(&snapshot());
		assert_eq!(state.node_count(), 2);
		assert_eq!(state.edge_count(), 1);
	}

	#[test]
	fn added_entity_is_focused_after_layout_settles() {
		let mut store = IncrementalGraphStore::default();
		let mut state = ForceGraphState::new(&store.snapshot(), 800.0, 600.0);
		let mut viewport = ViewportController::default();
		let mut highlight = HighlightState::default();

		let added = store.add_entity(EntityRecord::new(
			"acme",
			"Acme",
			EntityCategory::AiProductCompany,
		));
		state.sync(&store.snapshot());
		viewport.request_zoom(added.id());

		// not placed yet: the controller keeps waiting
		assert!(viewport.on_layout_settled(&state, &mut highlight).is_none());
		state.tick(0.016);
		let directive = viewport.on_layout_settled(&state, &mut highlight).unwrap();
		assert_eq!(directive.node_id, "acme");
		assert_eq!(highlight.node(), Some("acme"));

		state.focus(&directive, (1.0, 4.0));
		for _ in 0..40 {
			state.tick(0.016);
		}
		assert!(!state.is_camera_moving());
		let k = directive.zoom(1.0, 4.0);
		assert!((state.transform.k - k).abs() < 1e-9);
		assert!((state.transform.x - (400.0 - directive.center.x * k)).abs() < 1e-9);
	}

	#[test]
	fn pointer_leaving_keeps_zoom_focus() {
		let mut h = HighlightState::default();
		h.set_highlighted_node(Some("acme".into()));

		let over_openai = PointerTarget::Node("openai".into());
		apply_pointer_change(&mut h, None, Some(&over_openai));
		assert_eq!(h.node(), Some("openai"));
		apply_pointer_change(&mut h, Some(&over_openai), None);
		assert_eq!(h.node(), None);

		h.set_highlighted_node(Some("acme".into()));
		let over_edge = PointerTarget::Edge(EdgeKey::new("nvidia", "openai"));
		apply_pointer_change(&mut h, None, Some(&over_edge));
		assert_eq!(h.node(), Some("acme"));
		assert_eq!(h.edge(), Some(&EdgeKey::new("nvidia", "openai")));
		apply_pointer_change(&mut h, Some(&over_edge), None);
		assert_eq!(h.edge(), None);
		assert_eq!(h.node(), Some("acme"));
	}

	#[test]
	fn segment_distance_clamps_to_endpoints() {
		assert!((segment_distance(5.0, 3.0, 0.0, 0.0, 10.0, 0.0) - 3.0).abs() < 1e-9);
		assert!((segment_distance(-4.0, 3.0, 0.0, 0.0, 10.0, 0.0) - 5.0).abs() < 1e-9);
	}
}

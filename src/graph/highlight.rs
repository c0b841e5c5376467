//! Node and edge emphasis.

use super::types::EdgeKey;

/// How strongly an element should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
	/// The highlighted element or something attached to it.
	Focused,
	/// Nothing is highlighted.
	Normal,
	/// Something else is highlighted.
	Muted,
}

/// At most one emphasized node and one emphasized edge, set independently.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightState {
	node: Option<String>,
	edge: Option<EdgeKey>,
}

impl HighlightState {
	/// Replace the highlighted node.
	pub fn set_highlighted_node(&mut self, id: Option<String>) {
		self.node = id;
	}

	/// Replace the highlighted edge.
	pub fn set_highlighted_edge(&mut self, key: Option<EdgeKey>) {
		self.edge = key;
	}

	/// Drop both highlights.
	pub fn clear(&mut self) {
		self.node = None;
		self.edge = None;
	}

	/// Currently highlighted node.
	pub fn node(&self) -> Option<&str> {
		self.node.as_deref()
	}

	/// Currently highlighted edge.
	pub fn edge(&self) -> Option<&EdgeKey> {
		self.edge.as_ref()
	}

	/// True when anything is highlighted.
	pub fn is_active(&self) -> bool {
		self.node.is_some() || self.edge.is_some()
	}

	/// Style for the node `id`. Endpoints of the highlighted edge count as focused.
	pub fn node_emphasis(&self, id: &str) -> Emphasis {
		if !self.is_active() {
			return Emphasis::Normal;
		}
		let on_edge = self.edge.as_ref().is_some_and(|e| e.touches(id));
		if self.node.as_deref() == Some(id) || on_edge {
			Emphasis::Focused
		} else {
			Emphasis::Muted
		}
	}

	/// Style for the edge `key`. Edges touching the highlighted node count as focused.
	pub fn edge_emphasis(&self, key: &EdgeKey) -> Emphasis {
		if !self.is_active() {
			return Emphasis::Normal;
		}
		let touches_node = self.node.as_deref().is_some_and(|id| key.touches(id));
		if self.edge.as_ref() == Some(key) || touches_node {
			Emphasis::Focused
		} else {
			Emphasis::Muted
		}
	}
}

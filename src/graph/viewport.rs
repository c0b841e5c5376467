//! Deferred camera targeting.
//!
//! The layout engine places nodes asynchronously, so a request to focus a
//! freshly added node cannot be served immediately. The controller holds at
//! most one pending target and checks it on every settle signal from the
//! engine until the node has a position.

use std::collections::HashMap;

use log::{debug, warn};

use super::highlight::HighlightState;

/// Distance that the camera keeps from a focused node.
pub const FOCUS_DISTANCE: f64 = 150.0;
/// Duration of the center+zoom transition.
pub const TRANSITION_MS: u32 = 400;

/// Coordinates the layout engine assigned to a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutPosition {
	/// Horizontal coordinate in layout space.
	pub x: f64,
	/// Vertical coordinate in layout space.
	pub y: f64,
}

impl LayoutPosition {
	/// Distance from the layout origin.
	pub fn distance_from_origin(&self) -> f64 {
		self.x.hypot(self.y)
	}
}

/// Read-only view of the layout engine's node positions.
///
/// Returns `None` until the engine has placed the node at least once.
pub trait PositionSource {
	/// Position of `node_id`, if resolved.
	fn position(&self, node_id: &str) -> Option<LayoutPosition>;
}

impl PositionSource for HashMap<String, LayoutPosition> {
	fn position(&self, node_id: &str) -> Option<LayoutPosition> {
		self.get(node_id).copied()
	}
}

/// A single combined center+zoom instruction for the view.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraDirective {
	/// Node being focused.
	pub node_id: String,
	/// Point to center on.
	pub center: LayoutPosition,
	/// `1 + focus_distance / |center|`.
	pub distance_ratio: f64,
	/// Transition length.
	pub transition_ms: u32,
}

impl CameraDirective {
	/// Zoom factor for a 2D view, clamped to `[min, max]`.
	pub fn zoom(&self, min: f64, max: f64) -> f64 {
		self.distance_ratio.clamp(min, max)
	}
}

/// Controller state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ZoomState {
	/// No pending request.
	#[default]
	Idle,
	/// Waiting for `node_id` to be positioned.
	Armed {
		/// Target node.
		node_id: String,
		/// Settle signals seen since arming.
		waited: u32,
	},
}

/// `Idle`/`Armed` state machine driving the camera toward one node.
#[derive(Clone, Debug)]
pub struct ViewportController {
	state: ZoomState,
	focus_distance: f64,
	transition_ms: u32,
	max_wait: Option<u32>,
}

impl Default for ViewportController {
	fn default() -> Self {
		Self::new(FOCUS_DISTANCE, TRANSITION_MS)
	}
}

impl ViewportController {
	/// Idle controller with the given camera parameters.
	pub fn new(focus_distance: f64, transition_ms: u32) -> Self {
		Self {
			state: ZoomState::Idle,
			focus_distance,
			transition_ms,
			max_wait: None,
		}
	}

	/// Abandon a request after `ticks` settle signals without a position.
	pub fn with_max_wait(mut self, ticks: Option<u32>) -> Self {
		self.max_wait = ticks;
		self
	}

	/// Current state.
	pub fn state(&self) -> &ZoomState {
		&self.state
	}

	/// Pending target, if armed.
	pub fn target(&self) -> Option<&str> {
		match &self.state {
			ZoomState::Armed { node_id, .. } => Some(node_id),
			ZoomState::Idle => None,
		}
	}

	/// True while waiting for a position.
	pub fn is_armed(&self) -> bool {
		matches!(self.state, ZoomState::Armed { .. })
	}

	/// Arm for `node_id`, silently replacing any earlier request.
	pub fn request_zoom(&mut self, node_id: impl Into<String>) {
		let node_id = node_id.into();
		if let Some(prev) = self.target() {
			if prev != node_id {
				debug!("zoom request for {prev} superseded by {node_id}");
			}
		}
		self.state = ZoomState::Armed { node_id, waited: 0 };
	}

	/// Handle one settle signal from the layout engine.
	///
	/// When the target has a position this marks it highlighted, returns the
	/// camera move and goes idle. Otherwise stays armed and returns `None`.
	pub fn on_layout_settled(
		&mut self,
		positions: &impl PositionSource,
		highlight: &mut HighlightState,
	) -> Option<CameraDirective> {
		let ZoomState::Armed { node_id, waited } = &mut self.state else {
			return None;
		};

		let Some(center) = positions.position(node_id.as_str()) else {
			*waited += 1;
			if self.max_wait.is_some_and(|max| *waited >= max) {
				warn!("gave up waiting for a position for {node_id} after {waited} ticks");
				self.state = ZoomState::Idle;
			}
			return None;
		};

		// origin-placed nodes would divide by zero
		let distance = center.distance_from_origin().max(1.0);
		let directive = CameraDirective {
			node_id: node_id.clone(),
			center,
			distance_ratio: 1.0 + self.focus_distance / distance,
			transition_ms: self.transition_ms,
		};
		debug!(
			"focusing {} at ({:.1}, {:.1}) after {} ticks",
			directive.node_id, center.x, center.y, waited
		);
		highlight.set_highlighted_node(Some(directive.node_id.clone()));
		self.state = ZoomState::Idle;
		Some(directive)
	}
}

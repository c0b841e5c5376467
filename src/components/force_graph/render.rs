use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NODE_RADIUS, ease_out_cubic};
use crate::graph::{EdgeKey, Emphasis, HighlightState};

/// Animation progress of the emphasis effect. An edge-only highlight is
/// not animated by the hover fade and shows at full strength.
fn emphasis_t(state: &ForceGraphState, highlight: &HighlightState) -> f64 {
	if state.has_active_highlight() {
		ease_out_cubic(state.hover.highlight_t)
	} else if highlight.is_active() {
		1.0
	} else {
		0.0
	}
}

pub fn render(state: &ForceGraphState, highlight: &HighlightState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, highlight, ctx);
	draw_nodes(state, highlight, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, highlight: &HighlightState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.2 / k, 8.0 / k, 4.0 / k, 7.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = emphasis_t(state, highlight);
	let mut labels = Vec::new();

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let key = EdgeKey::new(
			n1.data.user_data.id.clone(),
			n2.data.user_data.id.clone(),
		);
		let is_highlighted = match highlight.edge_emphasis(&key) {
			Emphasis::Focused => true,
			Emphasis::Normal => false,
			// fading out after the pointer left
			Emphasis::Muted => {
				state.is_highlighted(n1.index()) && state.is_highlighted(n2.index())
			}
		};

		// t=0: all edges at base, t=1: highlighted brighten, others dim
		let (edge_alpha, arrow_alpha, width) = if is_highlighted {
			(0.35 + 0.55 * t, 0.5 + 0.4 * t, line_width * (1.0 + 0.5 * t))
		} else {
			(0.35 - 0.25 * t, 0.5 - 0.3 * t, line_width * (1.0 - 0.3 * t))
		};

		ctx.set_stroke_style_str(&format!("rgba(226, 232, 240, {})", edge_alpha));
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(
			x2 - ux * (NODE_RADIUS + arrow_size),
			y2 - uy * (NODE_RADIUS + arrow_size),
		);
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&format!("rgba(226, 232, 240, {})", arrow_alpha));
		let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if highlight.edge() == Some(&key) {
			if let Some(label) = state.edge_label(&key) {
				labels.push((label.to_string(), (x1 + x2) / 2.0, (y1 + y2) / 2.0));
			}
		}
	});
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	ctx.set_font(&format!("{}px Inter, system-ui, sans-serif", 10.0 / k.max(0.5)));
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.9)");
	for (label, mx, my) in labels {
		let _ = ctx.fill_text(&label, mx + 4.0 / k, my - 4.0 / k);
	}
}

fn draw_nodes(state: &ForceGraphState, highlight: &HighlightState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight() || highlight.is_active(),
		emphasis_t(state, highlight),
		state.transform.k,
	);
	let focused = |idx: DefaultNodeIdx, id: &str| {
		state.is_highlighted(idx) || highlight.node_emphasis(id) == Emphasis::Focused
	};
	let font = format!("{}px Inter, system-ui, sans-serif", 12.0 / k.max(0.5));

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let info = &node.data.user_data;
		if has_highlight && focused(idx, &info.id) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let (alpha, radius) = (1.0 - 0.7 * t, NODE_RADIUS * (1.0 - 0.15 * t));

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha * 0.85));
		ctx.set_font(&font);
		let _ = ctx.fill_text(&info.label, x + radius + 3.0, y + 4.0 / k.max(0.5));
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let info = &node.data.user_data;
		if !focused(idx, &info.id) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered =
			state.is_hovered(idx) || highlight.node() == Some(info.id.as_str());
		let is_neighbor =
			state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);

		let (radius, glow_radius) = if is_hovered {
			(
				NODE_RADIUS * (1.0 + 0.35 * t),
				NODE_RADIUS * (1.8 + 1.2 * t),
			)
		} else if is_neighbor {
			(NODE_RADIUS * (1.0 + 0.2 * t), NODE_RADIUS * (1.4 + 0.6 * t))
		} else {
			(NODE_RADIUS, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius)
			{
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
				let _ = gradient
					.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		ctx.set_fill_style_str("white");
		ctx.set_font(&font);
		let _ = ctx.fill_text(&info.label, x + radius + 3.0, y + 4.0 / k.max(0.5));
	});
}

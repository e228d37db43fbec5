use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{self, MAIN_POSITIONS};
use super::state::ForceGraphState;

const BACKGROUND: &str = "#f1f5f9";
const LEGEND_WIDTH: f64 = 150.0;
const LEGEND_ROW: f64 = 12.0;

/// Draw one frame. Reads positions only; never touches the simulation.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
	draw_legend(state, ctx);
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let weights = state.simulation.links().iter().map(|l| l.weight);
	for (segment, weight) in state.simulation.link_segments().iter().zip(weights) {
		ctx.set_stroke_style_str(&format!("rgba(204, 204, 204, {})", 0.6 * weight.min(1.0)));
		ctx.set_line_width(weight.sqrt() / k.max(1.0));
		// cross-cluster links are dashed
		if weight < 1.0 {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(3.0),
				&JsValue::from_f64(2.0),
			));
		} else {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}
		ctx.begin_path();
		ctx.move_to(segment.x1, segment.y1);
		ctx.line_to(segment.x2, segment.y2);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let dragged = state.simulation.dragged();
	for node in state.simulation.nodes() {
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(scale::cluster_color(node.cluster));
		ctx.fill();
		ctx.set_stroke_style_str(scale::position_color(&node.position));
		ctx.set_line_width(1.5);
		ctx.stroke();

		if dragged == Some(node.id.as_str()) {
			ctx.set_fill_style_str("#1e293b");
			ctx.set_font("6px sans-serif");
			let label = format!("{} ({}, {})", node.name, node.team, node.position);
			let _ = ctx.fill_text(&label, node.x + node.radius + 2.0, node.y + 2.0);
		}
	}
}

/// Cluster swatches on the left column, position outlines on the right.
fn draw_legend(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let clusters: Vec<u32> = state.simulation.centers().keys().copied().collect();
	if clusters.is_empty() {
		return;
	}
	let rows = clusters.len().max(MAIN_POSITIONS.len()) as f64;
	let (left, top) = (state.width - LEGEND_WIDTH - 10.0, 10.0);
	let height = 40.0 + rows * LEGEND_ROW;

	ctx.set_global_alpha(0.8);
	ctx.set_fill_style_str("white");
	ctx.fill_rect(left, top, LEGEND_WIDTH, height);
	ctx.set_global_alpha(1.0);
	ctx.set_stroke_style_str("#cccccc");
	ctx.set_line_width(1.0);
	ctx.stroke_rect(left, top, LEGEND_WIDTH, height);

	ctx.set_fill_style_str("black");
	ctx.set_font("bold 10px sans-serif");
	let _ = ctx.fill_text("Legend", left + 10.0, top + 20.0);

	ctx.set_font("8px sans-serif");
	for (i, cluster) in clusters.iter().enumerate() {
		let (x, y) = (left + 14.0, top + 34.0 + i as f64 * LEGEND_ROW);
		ctx.begin_path();
		let _ = ctx.arc(x, y, 4.0, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(scale::cluster_color(*cluster));
		ctx.fill();
		ctx.set_fill_style_str("black");
		let _ = ctx.fill_text(&format!("Cluster {cluster}"), x + 8.0, y + 3.0);
	}
	for (i, position) in MAIN_POSITIONS.iter().enumerate() {
		let (x, y) = (left + 84.0, top + 34.0 + i as f64 * LEGEND_ROW);
		ctx.begin_path();
		let _ = ctx.arc(x, y, 4.0, 0.0, 2.0 * PI);
		ctx.set_fill_style_str("white");
		ctx.fill();
		ctx.set_stroke_style_str(scale::position_color(position));
		ctx.set_line_width(1.5);
		ctx.stroke();
		ctx.set_fill_style_str("black");
		let _ = ctx.fill_text(position, x + 8.0, y + 3.0);
	}
}

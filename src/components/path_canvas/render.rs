use web_sys::CanvasRenderingContext2d;

use super::state::PathCanvasState;
use crate::engine::{PathStyle, PixelMapping, Point, Surface};

pub const VERTEX_SIZE: f64 = 3.0;
const BACKGROUND: &str = "white";
const INK: &str = "black";
const SELECTION: &str = "red";

impl Surface for CanvasRenderingContext2d {
	fn stroke_segment(&mut self, from: Point, to: Point, style: &PathStyle) {
		self.set_line_width(style.line_width());
		self.set_stroke_style_str(style.stroke_style());
		self.begin_path();
		self.move_to(from.x, from.y);
		self.line_to(to.x, to.y);
		self.stroke();
	}
}

/// Paints the editor scene. Running path animations are drawn separately by
/// the scheduler on top of this.
pub fn render(state: &PathCanvasState, ctx: &CanvasRenderingContext2d) {
	let viewport = &state.viewport;
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
	ctx.set_stroke_style_str(INK);
	ctx.set_line_width(1.0);

	if state.options.vertices {
		draw_vertices(ctx, state.editor.vertices().map(|(_, p)| viewport.to_pixels(p)));
	}
	if state.options.edges {
		draw_edges(state, ctx);
	}
	if state.options.vertex_labels {
		draw_vertex_labels(state, ctx);
	}
	if state.options.edge_labels {
		draw_edge_labels(state, ctx);
	}

	let selected: Vec<Point> = state
		.editor
		.selected()
		.iter()
		.filter_map(|&v| state.editor.position(v).ok())
		.map(|p| viewport.to_pixels(p))
		.collect();
	if !selected.is_empty() {
		ctx.set_stroke_style_str(SELECTION);
		ctx.set_line_width(4.0);
		draw_vertices(ctx, selected.into_iter());
	}
}

fn draw_vertices(ctx: &CanvasRenderingContext2d, points: impl Iterator<Item = Point>) {
	ctx.begin_path();
	for p in points {
		ctx.rect(p.x - VERTEX_SIZE, p.y - VERTEX_SIZE, VERTEX_SIZE, VERTEX_SIZE);
	}
	ctx.stroke();
}

fn draw_edges(state: &PathCanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.begin_path();
	for edge in state.editor.edges() {
		let (Ok(a), Ok(b)) = (
			state.editor.position(edge.v1),
			state.editor.position(edge.v2),
		) else {
			continue;
		};
		let (a, b) = (state.viewport.to_pixels(a), state.viewport.to_pixels(b));
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
	}
	ctx.stroke();
}

fn draw_label(ctx: &CanvasRenderingContext2d, text: &str, at: Point) {
	ctx.set_font("12px monospace");
	ctx.set_fill_style_str(INK);
	let _ = ctx.fill_text(text, at.x, at.y);
}

fn draw_vertex_labels(state: &PathCanvasState, ctx: &CanvasRenderingContext2d) {
	for (v, p) in state.editor.vertices() {
		let at = state.viewport.to_pixels(p);
		draw_label(ctx, &format!("V{v}"), Point::new(at.x + 2.0, at.y + 2.0));
	}
}

fn draw_edge_labels(state: &PathCanvasState, ctx: &CanvasRenderingContext2d) {
	for edge in state.editor.edges() {
		let (Ok(a), Ok(b), Ok(w)) = (
			state.editor.position(edge.v1),
			state.editor.position(edge.v2),
			state.editor.edge_weight(edge),
		) else {
			continue;
		};
		let w = (w * 1000.0).round() / 1000.0;
		draw_label(
			ctx,
			&format!("w={w}"),
			state.viewport.to_pixels(a.midpoint(&b)),
		);
	}
}

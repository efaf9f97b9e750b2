use leptos::prelude::*;

use crate::components::path_canvas::{EdgeRef, GraphDocument, PathGraphCanvas};
use crate::engine::Point;

const COLUMNS: usize = 6;
const ROWS: usize = 4;

/// Generate a jittered grid of vertices with a few links left out.
fn generate_sample_data() -> GraphDocument {
	let vertices = (0..COLUMNS * ROWS)
		.map(|i| {
			let (col, row) = (i % COLUMNS, i / COLUMNS);
			Some(Point::new(
				(col as f64 + 0.5 + (rand_simple(i) - 0.5) * 0.4) / COLUMNS as f64,
				(row as f64 + 0.5 + (rand_simple(i + 97) - 0.5) * 0.4) / ROWS as f64,
			))
		})
		.collect();

	let mut edges = Vec::new();
	for i in 0..COLUMNS * ROWS {
		let (col, row) = (i % COLUMNS, i / COLUMNS);
		if col + 1 < COLUMNS && rand_simple(i * 3) > 0.25 {
			edges.push(EdgeRef::new(i, i + 1));
		}
		if row + 1 < ROWS && rand_simple(i * 5 + 1) > 0.25 {
			edges.push(EdgeRef::new(i, i + COLUMNS));
		}
	}

	GraphDocument { vertices, edges }
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(generate_sample_data);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="path-graph-page">
				<h1>"Shortest Paths"</h1>
				<p class="subtitle">
					"Alt-click to place a vertex. Click to select, shift-click to add to the selection. "
					"f connects two selected vertices, w splits the edge between them, x deletes the selected vertex. "
					"Right-click clears the selection."
				</p>
				<PathGraphCanvas data=graph_data width=900.0 height=600.0 />
			</div>
		</ErrorBoundary>
	}
}

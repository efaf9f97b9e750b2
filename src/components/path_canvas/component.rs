use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

use super::editor::parse_path_input;
use super::render;
use super::state::{PathCanvasError, PathCanvasState};
use super::types::GraphDocument;
use crate::engine::{Algorithm, PathStyle, Point};

type SharedState = Rc<RefCell<Option<PathCanvasState>>>;

/// Fills `slot` with `make()` unless it is already set. Returns whether it
/// was filled.
fn install_once<T>(slot: &RefCell<Option<T>>, make: impl FnOnce() -> T) -> bool {
	if slot.borrow().is_some() {
		return false;
	}
	*slot.borrow_mut() = Some(make());
	true
}

fn event_to_canvas(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Runs `f` against the canvas state and reports its outcome in `status`.
fn with_state<T>(
	state: &SharedState,
	status: RwSignal<String>,
	f: impl FnOnce(&mut PathCanvasState) -> Result<T, PathCanvasError>,
) -> Option<T> {
	let mut guard = state.borrow_mut();
	let s = guard.as_mut()?;
	match f(s) {
		Ok(value) => {
			status.set(String::new());
			Some(value)
		}
		Err(err) => {
			warn!("{err}");
			status.set(err.to_string());
			None
		}
	}
}

#[component]
pub fn PathGraphCanvas(
	#[prop(into)] data: Signal<GraphDocument>,
	#[prop(default = 800.0)] width: f64,
	#[prop(default = 600.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());

	let status = RwSignal::new(String::new());
	let document_text = RwSignal::new(String::new());
	let path_text = RwSignal::new(String::new());
	let animations_enabled = RwSignal::new(true);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let mut ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		*state_init.borrow_mut() = Some(PathCanvasState::new(&data.get(), width, height));

		// a frame may already be queued against the running loop, keep it
		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		let started = install_once(&animate_init, move || {
			Closure::new(move || {
				if let Some(ref mut s) = *state_anim.borrow_mut() {
					if s.dirty {
						render::render(s, &ctx);
						s.dirty = false;
					}
					s.scheduler.process_frame(&mut ctx);
				}
				if let Some(ref cb) = *animate_inner.borrow() {
					let _ = web_sys::window()
						.unwrap()
						.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			})
		});
		if !started {
			return;
		}
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(p) = event_to_canvas(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_click.borrow_mut() {
			s.click(p, ev.alt_key(), ev.shift_key());
		}
	};

	let state_key = state.clone();
	let on_keyup = move |ev: KeyboardEvent| {
		with_state(&state_key, status, |s| s.key(&ev.key()));
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		ev.prevent_default();
		if ev.buttons() == 1 {
			if let Some(ref mut s) = *state_md.borrow_mut() {
				s.dragging = true;
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(p) = event_to_canvas(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.drag_to(p);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.dragging = false;
		}
	};

	let state_ctx = state.clone();
	let on_contextmenu = move |ev: MouseEvent| {
		ev.prevent_default();
		if let Some(ref mut s) = *state_ctx.borrow_mut() {
			s.editor.clear_selection();
			s.dragging = false;
			s.dirty = true;
		}
	};

	let solve = {
		let state = state.clone();
		move |algorithm: Algorithm| {
			let started = js_sys::Date::now();
			if let Some(path) = with_state(&state, status, |s| s.solve_selected(algorithm)) {
				debug!(
					"{} solved in {:.1}ms, {} vertices",
					algorithm.label(),
					js_sys::Date::now() - started,
					path.len()
				);
			}
		}
	};
	let solve_bfs = solve.clone();
	let solve_bellman_ford = solve;

	let state_path = state.clone();
	let on_draw_path = move |_| {
		with_state(&state_path, status, |s| {
			let path = parse_path_input(&path_text.get())?;
			s.draw_path(&path, PathStyle::default())
		});
	};

	let state_export = state.clone();
	let on_export = move |_| {
		if let Some(json) = with_state(&state_export, status, |s| Ok(s.editor.to_json()?)) {
			document_text.set(json);
		}
	};

	let state_import = state.clone();
	let on_import = move |_| {
		with_state(&state_import, status, |s| s.load(&document_text.get()));
	};

	let state_clear = state.clone();
	let on_clear = move |_| {
		let confirmed = web_sys::window()
			.and_then(|w| {
				w.confirm_with_message(
					"really delete vertices and edges from graph?\nthis cannot be undone",
				)
				.ok()
			})
			.unwrap_or(false);
		if confirmed {
			if let Some(ref mut s) = *state_clear.borrow_mut() {
				s.clear();
			}
		}
	};

	let state_toggle = state.clone();
	let on_toggle_animations = move |ev| {
		let enabled = event_target_checked(&ev);
		animations_enabled.set(enabled);
		if let Some(ref mut s) = *state_toggle.borrow_mut() {
			s.scheduler.set_enabled(enabled);
		}
	};

	let state_options = state.clone();
	let set_option = move |apply: fn(&mut PathCanvasState, bool), enabled: bool| {
		if let Some(ref mut s) = *state_options.borrow_mut() {
			apply(s, enabled);
			s.dirty = true;
		}
	};
	let (set_vertices, set_edges, set_vertex_labels, set_edge_labels) = (
		set_option.clone(),
		set_option.clone(),
		set_option.clone(),
		set_option,
	);

	view! {
		<div class="path-graph">
			<canvas
				node_ref=canvas_ref
				class="path-graph-canvas"
				tabindex="0"
				on:click=on_click
				on:keyup=on_keyup
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:contextmenu=on_contextmenu
				style="display: block; cursor: crosshair;"
			/>
			<div class="path-graph-controls">
				<button on:click=move |_| solve_bfs(Algorithm::Bfs)>"BFS"</button>
				<button on:click=move |_| solve_bellman_ford(Algorithm::BellmanFord)>
					"Bellman-Ford"
				</button>
				<input
					type="text"
					placeholder="1,2,3,4"
					prop:value=move || path_text.get()
					on:input=move |ev| path_text.set(event_target_value(&ev))
				/>
				<button on:click=on_draw_path>"Draw path"</button>
				<button on:click=on_clear>"Clear graph"</button>
				<label>
					<input
						type="checkbox"
						prop:checked=move || animations_enabled.get()
						on:change=on_toggle_animations
					/>
					"Animate"
				</label>
				<label>
					<input
						type="checkbox"
						checked=true
						on:change=move |ev| set_vertices(|s, on| s.options.vertices = on, event_target_checked(&ev))
					/>
					"Vertices"
				</label>
				<label>
					<input
						type="checkbox"
						checked=true
						on:change=move |ev| set_edges(|s, on| s.options.edges = on, event_target_checked(&ev))
					/>
					"Edges"
				</label>
				<label>
					<input
						type="checkbox"
						checked=true
						on:change=move |ev| {
							set_vertex_labels(|s, on| s.options.vertex_labels = on, event_target_checked(&ev))
						}
					/>
					"Vertex labels"
				</label>
				<label>
					<input
						type="checkbox"
						on:change=move |ev| {
							set_edge_labels(|s, on| s.options.edge_labels = on, event_target_checked(&ev))
						}
					/>
					"Edge labels"
				</label>
			</div>
			<p class="path-graph-status">{move || status.get()}</p>
			<div class="path-graph-document">
				<textarea
					rows="6"
					prop:value=move || document_text.get()
					on:input=move |ev| document_text.set(event_target_value(&ev))
				/>
				<button on:click=on_export>"Export"</button>
				<button on:click=on_import>"Import"</button>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn install_once_keeps_running_value() {
		let slot = RefCell::new(None);
		assert!(install_once(&slot, || 1));
		assert!(!install_once(&slot, || 2));
		assert_eq!(*slot.borrow(), Some(1));
	}
}

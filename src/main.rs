//! Browser entry point: sets up logging and mounts the app.

use leptos::mount::mount_to_body;
use path_canvas::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}

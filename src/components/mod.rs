pub mod path_canvas;

mod component;
mod editor;
mod render;
mod state;
mod types;

pub use component::PathGraphCanvas;
pub use types::{EdgeRef, GraphDocument};

//! Path-finding engine and the frame scheduler that animates its results.

pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod path_task;
pub mod scheduler;
pub mod solver;

pub use config::{AnimationConfig, PathStyle};
pub use error::{AnimationError, SolveError};
pub use geometry::{PixelMapping, Point, Viewport};
pub use graph::Graph;
pub use path_task::{PathAnimation, PathParams, Surface};
pub use scheduler::{DrawTask, Scheduler};
pub use solver::{Algorithm, Solution, bellman_ford, bfs};

//! Frame-driven runner for animated draw tasks.

use log::debug;

/// A unit of animated state advanced and drawn once per display frame.
pub trait DrawTask<S: ?Sized> {
	/// Moves the task's parameters to their next-frame state.
	fn advance(&mut self);
	/// Draws the current parameters onto `surface`.
	fn render(&self, surface: &mut S);
	/// Once true the scheduler drops the task after this frame's render.
	fn is_finished(&self) -> bool;
}

/// Holds active tasks and processes them in insertion order.
pub struct Scheduler<S: ?Sized> {
	tasks: Vec<Box<dyn DrawTask<S>>>,
	enabled: bool,
}

impl<S: ?Sized> Default for Scheduler<S> {
	fn default() -> Self {
		Self {
			tasks: Vec::new(),
			enabled: true,
		}
	}
}

impl<S: ?Sized> Scheduler<S> {
	/// An enabled scheduler with no tasks.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a task; it is first advanced on the next frame.
	pub fn push(&mut self, task: Box<dyn DrawTask<S>>) {
		self.tasks.push(task);
		debug!("scheduled draw task, {} active", self.tasks.len());
	}

	/// Disabling suspends processing but keeps queued tasks.
	pub fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
	}

	/// Whether frames are currently processed.
	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	/// Number of active tasks.
	pub fn len(&self) -> usize {
		self.tasks.len()
	}

	/// True when no task is active.
	pub fn is_empty(&self) -> bool {
		self.tasks.is_empty()
	}

	/// Drops every task without drawing it again.
	pub fn clear(&mut self) {
		self.tasks.clear();
	}

	/// Advances and renders every task once, then drops the finished ones.
	/// Returns the number of tasks still active.
	pub fn process_frame(&mut self, surface: &mut S) -> usize {
		if !self.enabled {
			return self.tasks.len();
		}
		for task in self.tasks.iter_mut() {
			task.advance();
			task.render(surface);
		}
		let before = self.tasks.len();
		self.tasks.retain(|task| !task.is_finished());
		if self.tasks.len() < before {
			debug!("{} draw tasks finished", before - self.tasks.len());
		}
		self.tasks.len()
	}
}

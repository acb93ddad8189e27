//! Self-rescheduling per-frame loop with explicit cancellation.
//!
//! [`FrameLoop`] runs a tick once per host frame, scheduling the next frame only
//! after the tick returns. Stopping the loop (explicitly or by dropping the
//! handle) cancels the pending request, and any callback the host still fires
//! afterwards returns without ticking or rescheduling.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// Source of frame callbacks.
pub trait FrameHost {
	/// Identifies a pending request for cancellation.
	type Handle: Copy;

	/// Ask for `callback` to run on the next frame. `None` if the host refused.
	fn request_frame(&self, callback: &Rc<dyn Fn()>) -> Option<Self::Handle>;

	/// Withdraw a pending request.
	fn cancel_frame(&self, handle: Self::Handle);
}

/// `requestAnimationFrame` on the browser window.
pub struct AnimationFrames {
	window: Window,
	closure: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl AnimationFrames {
	/// Frames from `window`.
	pub fn new(window: Window) -> Self {
		Self {
			window,
			closure: RefCell::new(None),
		}
	}
}

impl FrameHost for AnimationFrames {
	type Handle = i32;

	fn request_frame(&self, callback: &Rc<dyn Fn()>) -> Option<i32> {
		// The loop always passes the same callback, so one JS closure is enough.
		let mut slot = self.closure.borrow_mut();
		let closure = slot.get_or_insert_with(|| {
			let callback = callback.clone();
			Closure::new(move || callback())
		});
		self.window
			.request_animation_frame(closure.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel_frame(&self, handle: i32) {
		let _ = self.window.cancel_animation_frame(handle);
	}
}

struct LoopInner<H: FrameHost> {
	host: H,
	running: Cell<bool>,
	pending: Cell<Option<H::Handle>>,
	callback: RefCell<Option<Rc<dyn Fn()>>>,
}

impl<H: FrameHost> LoopInner<H> {
	fn schedule(&self) {
		if !self.running.get() {
			return;
		}
		let Some(callback) = self.callback.borrow().clone() else {
			return;
		};
		let handle = self.host.request_frame(&callback);
		if handle.is_none() {
			log::warn!("particle-field: frame request refused, loop stalled");
		}
		self.pending.set(handle);
	}
}

/// Handle to a running frame loop. Dropping it stops the loop.
pub struct FrameLoop<H: FrameHost + 'static> {
	inner: Rc<LoopInner<H>>,
}

impl<H: FrameHost + 'static> FrameLoop<H> {
	/// Start ticking on the next frame.
	pub fn start(host: H, tick: impl FnMut() + 'static) -> Self {
		let inner = Rc::new(LoopInner {
			host,
			running: Cell::new(true),
			pending: Cell::new(None),
			callback: RefCell::new(None),
		});

		let weak: Weak<LoopInner<H>> = Rc::downgrade(&inner);
		let tick = RefCell::new(tick);
		let callback: Rc<dyn Fn()> = Rc::new(move || {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			inner.pending.set(None);
			if !inner.running.get() {
				return;
			}
			(tick.borrow_mut())();
			inner.schedule();
		});
		*inner.callback.borrow_mut() = Some(callback);

		inner.schedule();
		Self { inner }
	}

	/// False once stopped.
	pub fn is_running(&self) -> bool {
		self.inner.running.get()
	}

	/// Stop the loop and cancel the pending frame, if any. Idempotent.
	pub fn stop(&self) {
		self.inner.running.set(false);
		if let Some(handle) = self.inner.pending.take() {
			self.inner.host.cancel_frame(handle);
		}
	}
}

impl<H: FrameHost + 'static> Drop for FrameLoop<H> {
	fn drop(&mut self) {
		self.stop();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Frames fire only when the test says so.
	#[derive(Clone, Default)]
	struct ManualFrames {
		requested: Rc<RefCell<Vec<(u32, Rc<dyn Fn()>)>>>,
		cancelled: Rc<RefCell<Vec<u32>>>,
		next_id: Rc<Cell<u32>>,
	}

	impl ManualFrames {
		/// Fire every pending callback, returning how many ran.
		fn fire(&self) -> usize {
			let due: Vec<_> = self.requested.borrow_mut().drain(..).collect();
			for (_, callback) in &due {
				callback();
			}
			due.len()
		}

		fn pending(&self) -> usize {
			self.requested.borrow().len()
		}
	}

	impl FrameHost for ManualFrames {
		type Handle = u32;

		fn request_frame(&self, callback: &Rc<dyn Fn()>) -> Option<u32> {
			let id = self.next_id.get();
			self.next_id.set(id + 1);
			self.requested.borrow_mut().push((id, callback.clone()));
			Some(id)
		}

		fn cancel_frame(&self, handle: u32) {
			self.requested.borrow_mut().retain(|(id, _)| *id != handle);
			self.cancelled.borrow_mut().push(handle);
		}
	}

	fn counting_tick() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
		let ticks = Rc::new(Cell::new(0));
		let counter = ticks.clone();
		(ticks, move || counter.set(counter.get() + 1))
	}

	#[test]
	fn ticks_once_per_frame_and_reschedules() {
		let host = ManualFrames::default();
		let (ticks, tick) = counting_tick();
		let frame_loop = FrameLoop::start(host.clone(), tick);

		assert_eq!(ticks.get(), 0);
		assert_eq!(host.pending(), 1);

		for frame in 1..=3 {
			host.fire();
			assert_eq!(ticks.get(), frame);
			assert_eq!(host.pending(), 1);
		}
		assert!(frame_loop.is_running());
	}

	#[test]
	fn stop_cancels_pending_frame() {
		let host = ManualFrames::default();
		let (ticks, tick) = counting_tick();
		let frame_loop = FrameLoop::start(host.clone(), tick);

		frame_loop.stop();

		assert!(!frame_loop.is_running());
		assert_eq!(host.pending(), 0);
		assert_eq!(*host.cancelled.borrow(), vec![0]);
		assert_eq!(host.fire(), 0);
		assert_eq!(ticks.get(), 0);
	}

	#[test]
	fn stale_callback_after_stop_is_noop() {
		let host = ManualFrames::default();
		let (ticks, tick) = counting_tick();
		let frame_loop = FrameLoop::start(host.clone(), tick);
		let stale = host.requested.borrow()[0].1.clone();

		frame_loop.stop();
		stale();

		assert_eq!(ticks.get(), 0);
		assert_eq!(host.pending(), 0);
	}

	#[test]
	fn stale_callback_after_drop_is_noop() {
		let host = ManualFrames::default();
		let (ticks, tick) = counting_tick();
		let frame_loop = FrameLoop::start(host.clone(), tick);
		host.fire();
		let stale = host.requested.borrow()[0].1.clone();

		drop(frame_loop);
		stale();

		assert_eq!(ticks.get(), 1);
		assert_eq!(host.pending(), 0);
		assert_eq!(host.cancelled.borrow().len(), 1);
	}

	#[test]
	fn stop_is_idempotent() {
		let host = ManualFrames::default();
		let (_, tick) = counting_tick();
		let frame_loop = FrameLoop::start(host.clone(), tick);

		frame_loop.stop();
		frame_loop.stop();
		drop(frame_loop);

		assert_eq!(host.cancelled.borrow().len(), 1);
	}
}

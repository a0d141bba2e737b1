//! `requestAnimationFrame` loop with an explicit stop handle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

struct Inner {
	stopped: Cell<bool>,
	pending: Cell<Option<i32>>,
	callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl Inner {
	fn schedule(&self) -> Result<(), JsValue> {
		let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
		if let Some(cb) = self.callback.borrow().as_ref() {
			let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
			self.pending.set(Some(id));
		}
		Ok(())
	}
}

/// Handle to a running frame loop. Clones share the same loop.
#[derive(Clone)]
pub struct FrameLoop(Rc<Inner>);

impl FrameLoop {
	/// Call `on_frame` with the host timestamp (ms) once per display refresh.
	pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
		let inner = Rc::new(Inner {
			stopped: Cell::new(false),
			pending: Cell::new(None),
			callback: RefCell::new(None),
		});

		let weak = Rc::downgrade(&inner);
		*inner.callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			inner.pending.set(None);
			if inner.stopped.get() {
				return;
			}
			on_frame(timestamp);
			if !inner.stopped.get() {
				if let Err(err) = inner.schedule() {
					log::error!("failed to schedule animation frame: {err:?}");
				}
			}
		}));
		inner.schedule()?;
		Ok(Self(inner))
	}

	pub fn is_stopped(&self) -> bool {
		self.0.stopped.get()
	}

	/// Cancel the pending frame. The callback is released once no handle remains.
	pub fn stop(&self) {
		if self.0.stopped.replace(true) {
			return;
		}
		if let (Some(id), Some(window)) = (self.0.pending.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		log::debug!("animation loop stopped");
	}
}

impl Drop for Inner {
	fn drop(&mut self) {
		if let (Some(id), Some(window)) = (self.pending.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
	}
}

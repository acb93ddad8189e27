//! Event listeners that unregister themselves.

use std::fmt::Debug;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// Something handlers can be attached to by event name.
pub trait EventSource {
	/// Whatever must be handed back to unsubscribe.
	type Token;
	/// Failure to subscribe.
	type Error: Debug;

	/// Attach `handler` to `event`.
	fn subscribe(&self, event: &'static str, handler: Box<dyn FnMut()>) -> Result<Self::Token, Self::Error>;

	/// Detach a handler previously attached to `event`.
	fn unsubscribe(&self, event: &'static str, token: &Self::Token);
}

impl EventSource for Window {
	type Token = Closure<dyn FnMut()>;
	type Error = JsValue;

	fn subscribe(&self, event: &'static str, handler: Box<dyn FnMut()>) -> Result<Self::Token, JsValue> {
		let callback = Closure::wrap(handler);
		self.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		Ok(callback)
	}

	fn unsubscribe(&self, event: &'static str, token: &Self::Token) {
		let _ = self.remove_event_listener_with_callback(event, token.as_ref().unchecked_ref());
	}
}

/// A handler registered on a source for as long as this value lives.
pub struct Listener<S: EventSource> {
	source: S,
	event: &'static str,
	token: S::Token,
}

impl<S: EventSource> Listener<S> {
	/// Subscribe `handler`; it is unsubscribed when the listener drops.
	pub fn new(source: S, event: &'static str, handler: impl FnMut() + 'static) -> Result<Self, S::Error> {
		let token = source.subscribe(event, Box::new(handler))?;
		Ok(Self {
			source,
			event,
			token,
		})
	}
}

impl<S: EventSource> Drop for Listener<S> {
	fn drop(&mut self) {
		self.source.unsubscribe(self.event, &self.token);
		log::debug!("particle-field: removed {} listener", self.event);
	}
}

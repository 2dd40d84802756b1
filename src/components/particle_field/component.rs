//! Leptos component mounting the particle field on a full-screen canvas.
//!
//! The canvas sits behind the page with pointer events disabled, so resize and
//! pointer listeners go on the window. An animation loop runs via
//! `requestAnimationFrame`, advancing and drawing the field each frame until
//! the component is cleaned up.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{
	AddEventListenerOptions, CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent,
	TouchEvent, Window,
};

use super::state::FieldState;
use super::types::FieldConfig;

type SharedContext = Rc<RefCell<Option<FieldContext>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type Listeners = Rc<RefCell<Vec<(&'static str, Closure<dyn FnMut(Event)>)>>>;

/// Field state plus the canvas it draws to.
struct FieldContext {
	state: FieldState,
	canvas: HtmlCanvasElement,
	/// `None` until the 2D context can be acquired
	surface: Option<CanvasRenderingContext2d>,
}

/// Everything the mounted field holds on to, released together on unmount.
#[derive(Clone, Default)]
struct FieldHandles {
	context: SharedContext,
	animate: FrameCallback,
	listeners: Listeners,
	/// Id of the pending animation frame
	frame: Rc<Cell<Option<i32>>>,
}

fn viewport_size(window: &Window) -> (f64, f64) {
	let px = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(px(window.inner_width()), px(window.inner_height()))
}

fn canvas_context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

fn seed() -> u64 {
	let now = js_sys::Date::now() as u64;
	let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
	now ^ (noise << 32)
}

fn with_state(context: &SharedContext, f: impl FnOnce(&mut FieldState)) {
	if let Some(ref mut c) = *context.borrow_mut() {
		f(&mut c.state);
	}
}

/// Registers a passive window listener. No handler calls `preventDefault`, so
/// scrolling is never held up waiting on one.
fn listen(
	window: &Window,
	listeners: &Listeners,
	event: &'static str,
	handler: impl FnMut(Event) + 'static,
) {
	let cb = Closure::<dyn FnMut(Event)>::new(handler);
	let options = AddEventListenerOptions::new();
	options.set_passive(true);
	if window
		.add_event_listener_with_callback_and_add_event_listener_options(
			event,
			cb.as_ref().unchecked_ref(),
			&options,
		)
		.is_err()
	{
		warn!("live-background: could not listen for {event}");
	}
	listeners.borrow_mut().push((event, cb));
}

/// Drops the field, removes window listeners, cancels the pending frame and
/// releases the frame callback.
fn teardown(handles: &FieldHandles) {
	handles.context.borrow_mut().take();
	if let Some(window) = web_sys::window() {
		for (event, cb) in handles.listeners.borrow_mut().drain(..) {
			let _ = window.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
		}
		if let Some(id) = handles.frame.take() {
			let _ = window.cancel_animation_frame(id);
		}
	}
	// Breaks the callback's reference cycle through `animate`
	handles.animate.borrow_mut().take();
	debug!("live-background: animation stopped");
}

fn request_frame(window: &Window, handles: &FieldHandles) {
	if let Some(ref cb) = *handles.animate.borrow() {
		handles
			.frame
			.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
	}
}

/// Full-screen animated particle background.
///
/// Sizes itself to the window and rebuilds the field on every resize. Mouse
/// and touch positions repel nearby particles; lifting the finger or leaving
/// the window releases the pointer. Pass `config` to override the defaults.
#[component]
pub fn ParticleFieldCanvas(#[prop(optional)] config: Option<FieldConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let config = config.unwrap_or_default();
	let handles = FieldHandles::default();
	let handles_cleanup = SendWrapper::new(handles.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if handles.context.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("live-background: no window, field not started");
			return;
		};

		let (w, h) = viewport_size(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let surface = canvas_context(&canvas);
		if surface.is_none() {
			warn!("live-background: 2d context unavailable, drawing deferred");
		}

		*handles.context.borrow_mut() = Some(FieldContext {
			state: FieldState::new(config.clone(), w, h, seed()),
			canvas,
			surface,
		});

		let listeners = &handles.listeners;

		let context_resize = handles.context.clone();
		listen(&window, listeners, "resize", move |_| {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = viewport_size(&win);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.canvas.set_width(nw as u32);
				c.canvas.set_height(nh as u32);
				c.state.resize(nw, nh);
			}
		});

		let context_mm = handles.context.clone();
		listen(&window, listeners, "mousemove", move |ev| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				let (x, y, at) = (ev.client_x() as f64, ev.client_y() as f64, ev.time_stamp());
				with_state(&context_mm, |s| s.mouse_moved(x, y, at));
			}
		});

		let context_ml = handles.context.clone();
		listen(&window, listeners, "mouseout", move |ev| {
			// Only a null related target means the cursor left the window
			let left = ev
				.dyn_ref::<MouseEvent>()
				.is_some_and(|m| m.related_target().is_none());
			if left {
				with_state(&context_ml, FieldState::clear_pointer);
			}
		});

		for event in ["touchstart", "touchmove"] {
			let context_tm = handles.context.clone();
			listen(&window, listeners, event, move |ev| {
				let touch = ev
					.dyn_ref::<TouchEvent>()
					.and_then(|t| t.touches().get(0));
				if let Some(touch) = touch {
					let (x, y) = (touch.client_x() as f64, touch.client_y() as f64);
					let at = ev.time_stamp();
					with_state(&context_tm, |s| s.touch_moved(x, y, at));
				}
			});
		}

		for event in ["touchend", "touchcancel"] {
			let context_te = handles.context.clone();
			listen(&window, listeners, event, move |ev| {
				let at = ev.time_stamp();
				with_state(&context_te, |s| s.touch_ended(at));
			});
		}

		let handles_anim = handles.clone();
		*handles.animate.borrow_mut() = Some(Closure::new(move || {
			handles_anim.frame.set(None);
			{
				let mut context = handles_anim.context.borrow_mut();
				// Torn down between frames
				let Some(c) = context.as_mut() else {
					return;
				};
				if c.surface.is_none() {
					c.surface = canvas_context(&c.canvas);
				}
				c.state.frame(c.surface.as_ref());
			}
			if let Some(window) = web_sys::window() {
				request_frame(&window, &handles_anim);
			}
		}));
		request_frame(&window, &handles);
	});

	on_cleanup(move || teardown(&handles_cleanup));

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			aria-hidden="true"
			style="position: fixed; inset: 0; z-index: 0; display: block; pointer-events: none; background: radial-gradient(circle at center, #0a0a0a, #000000);"
		/>
	}
}

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, HtmlElement, KeyboardEvent, Node, PageTransitionEvent};

use super::animation::FrameLoop;
use super::config::OverlayConfig;
use super::loader::fetch_network;
use super::photo_layer::PhotoLayer;
use super::photos::PhotoField;
use super::scene::Scene;
use super::state::NetworkState;
use super::view::{NetLayer, NetworkView};

type Listener = (EventTarget, &'static str, Closure<dyn FnMut(Event)>);

/// Page-level listeners, detached together on teardown.
#[derive(Default)]
struct Listeners(Vec<Listener>);

impl Listeners {
	fn add(
		&mut self,
		target: &EventTarget,
		kind: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Result<(), JsValue> {
		let cb = Closure::<dyn FnMut(Event)>::new(handler);
		target.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())?;
		self.0.push((target.clone(), kind, cb));
		Ok(())
	}

	fn detach_all(&mut self) {
		for (target, kind, cb) in self.0.drain(..) {
			let _ = target.remove_event_listener_with_callback(kind, cb.as_ref().unchecked_ref());
		}
	}
}

#[derive(Clone, Default)]
struct Overlay {
	scene: Rc<RefCell<Scene>>,
	frame_loop: Rc<RefCell<Option<FrameLoop>>>,
	listeners: Rc<RefCell<Listeners>>,
}

impl Overlay {
	fn is_running(&self) -> bool {
		self.frame_loop
			.borrow()
			.as_ref()
			.is_some_and(|frame_loop| !frame_loop.is_stopped())
	}

	fn mount(&self, stage: &HtmlElement, config: &OverlayConfig) -> Result<(), JsValue> {
		let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
		let document = window
			.document()
			.ok_or_else(|| JsValue::from_str("no document"))?;

		let net_layer = NetLayer::mount(&document, stage)?;
		let mut rng = SmallRng::seed_from_u64(js_sys::Math::random().to_bits());
		let field = PhotoField::new(config.photos.clone(), &mut rng);
		let before: &Node = &net_layer.svg;
		let photos = PhotoLayer::mount(&document, stage, Some(before), field)?;
		{
			let mut scene = self.scene.borrow_mut();
			scene.set_net_layer(net_layer);
			scene.set_photos(photos);
		}

		let scene = self.scene.clone();
		let frame_loop = FrameLoop::start(move |timestamp| {
			if let Err(err) = scene.borrow().tick(timestamp) {
				log::warn!("frame update failed: {err:?}");
			}
		})?;
		*self.frame_loop.borrow_mut() = Some(frame_loop);

		self.listen(&window, &document, config)?;
		self.load_network(document, stage.clone(), config);
		log::info!("overlay mounted");
		Ok(())
	}

	fn listen(
		&self,
		window: &web_sys::Window,
		document: &Document,
		config: &OverlayConfig,
	) -> Result<(), JsValue> {
		let mut listeners = self.listeners.borrow_mut();

		let (scene, cancel) = (self.scene.clone(), config.cancel_key.clone());
		listeners.add(document, "keydown", move |ev| {
			let Some(ev) = ev.dyn_ref::<KeyboardEvent>() else {
				return;
			};
			if cancel.matches(&ev.key()) {
				log::debug!("clearing sticky highlights");
				scene.borrow().clear_sticky();
			}
		})?;

		let scene = self.scene.clone();
		listeners.add(window, "resize", move |_| scene.borrow().on_resize())?;

		let overlay = self.clone();
		listeners.add(window, "pagehide", move |ev| {
			let persisted = ev
				.dyn_ref::<PageTransitionEvent>()
				.is_some_and(|e| e.persisted());
			if !persisted {
				overlay.teardown();
			}
		})
	}

	fn load_network(&self, document: Document, stage: HtmlElement, config: &OverlayConfig) {
		let (scene, network_config) = (self.scene.clone(), config.network.clone());
		wasm_bindgen_futures::spawn_local(async move {
			let records = match fetch_network(&network_config.data_url).await {
				Ok(records) => records,
				Err(err) => {
					log::error!("network not built: {err}");
					return;
				}
			};
			let state = NetworkState::from_records(records, network_config);
			let mut scene = scene.borrow_mut();
			let Some(layer) = scene.net_layer() else {
				log::debug!("overlay torn down before network data arrived");
				return;
			};
			match NetworkView::initialize(&document, &stage, layer, state) {
				Ok(view) => scene.attach_network(view),
				Err(err) => log::error!("failed to build network: {err:?}"),
			}
		});
	}

	fn teardown(&self) {
		if let Some(frame_loop) = self.frame_loop.borrow().as_ref() {
			frame_loop.stop();
		}
		self.scene.borrow_mut().dispose();
		self.listeners.borrow_mut().detach_all();
	}
}

/// Floating photo field with the animated network drawn over it.
#[component]
pub fn LivingNetwork(#[prop(optional)] config: OverlayConfig) -> impl IntoView {
	let stage_ref = NodeRef::<leptos::html::Div>::new();
	let overlay = Overlay::default();

	Effect::new(move |_| {
		let Some(stage) = stage_ref.get() else {
			return;
		};
		if overlay.is_running() {
			return;
		}
		let stage: HtmlElement = stage.into();
		if let Err(err) = overlay.mount(&stage, &config) {
			log::error!("failed to mount overlay: {err:?}");
		}
	});

	view! { <div node_ref=stage_ref id="stage" class="stage" /> }
}

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlImageElement, Node};

use super::dom::{create_html, set_pct, set_px_var};
use super::photos::PhotoField;

pub const MANY_VISIBLE_CLASS: &str = "many-visible";

struct PhotoDom {
	figure: HtmlElement,
	on_enter: Closure<dyn FnMut()>,
}

/// The decorative photo layer behind the network.
pub struct PhotoLayer {
	field: Rc<RefCell<PhotoField>>,
	layer: HtmlElement,
	body: Option<HtmlElement>,
	figures: Vec<PhotoDom>,
}

impl PhotoLayer {
	/// Insert the layer into `stage` ahead of `before` and populate it.
	pub fn mount(
		document: &Document,
		stage: &HtmlElement,
		before: Option<&Node>,
		field: PhotoField,
	) -> Result<Self, JsValue> {
		let layer = create_html(document, "div")?;
		layer.set_id("bg-layer");
		layer.set_class_name("bg-layer");
		stage.insert_before(&layer, before)?;

		let field = Rc::new(RefCell::new(field));
		let body = document.body();
		let mut figures = Vec::new();

		let snapshot = field.borrow().photos().to_vec();
		let config = field.borrow().config().clone();
		for (i, photo) in snapshot.iter().enumerate() {
			let figure = create_html(document, "figure")?;
			figure.set_class_name("node bg");
			set_px_var(&figure, "--w", config.width_px)?;
			set_px_var(&figure, "--h", config.height_px)?;
			set_pct(&figure, photo.left_pct, photo.top_pct)?;

			let img: HtmlImageElement = document.create_element("img")?.dyn_into()?;
			img.set_src(&config.image_src(i + 1));
			img.set_alt(&format!("Background {}", i + 1));
			figure.append_child(&img)?;

			let on_enter = {
				let (field, figure, body) = (field.clone(), figure.clone(), body.clone());
				Closure::<dyn FnMut()>::new(move || {
					let mut field = field.borrow_mut();
					if !field.hover(i) {
						return;
					}
					let _ = figure.class_list().add_1("sticky");
					log::debug!("photo {} sticky ({} total)", i + 1, field.sticky_count());
					if field.many_visible() {
						if let Some(body) = &body {
							let _ = body.class_list().add_1(MANY_VISIBLE_CLASS);
						}
					}
				})
			};
			figure.add_event_listener_with_callback("mouseenter", on_enter.as_ref().unchecked_ref())?;
			layer.append_child(&figure)?;
			figures.push(PhotoDom { figure, on_enter });
		}

		log::debug!("photo layer mounted with {} photos", figures.len());
		Ok(Self {
			field,
			layer,
			body,
			figures,
		})
	}

	/// Advance the float motion one frame.
	pub fn tick(&self) -> Result<(), JsValue> {
		let offsets = self.field.borrow_mut().tick();
		for (dom, (dx, dy)) in self.figures.iter().zip(offsets) {
			set_px_var(&dom.figure, "--dx", dx)?;
			set_px_var(&dom.figure, "--dy", dy)?;
		}
		Ok(())
	}

	pub fn clear_sticky(&self) {
		self.field.borrow_mut().clear_sticky();
		for dom in &self.figures {
			let _ = dom.figure.class_list().remove_1("sticky");
		}
		if let Some(body) = &self.body {
			let _ = body.class_list().remove_1(MANY_VISIBLE_CLASS);
		}
	}

	pub fn dispose(&mut self) {
		for dom in self.figures.drain(..) {
			let _ = dom
				.figure
				.remove_event_listener_with_callback("mouseenter", dom.on_enter.as_ref().unchecked_ref());
		}
		self.layer.remove();
		if let Some(body) = &self.body {
			let _ = body.class_list().remove_1(MANY_VISIBLE_CLASS);
		}
	}
}

impl Drop for PhotoLayer {
	fn drop(&mut self) {
		self.dispose();
	}
}

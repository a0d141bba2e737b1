use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, SvgElement};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub fn create_html(document: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
	Ok(document.create_element(tag)?.dyn_into::<HtmlElement>()?)
}

pub fn create_svg(document: &Document, tag: &str) -> Result<SvgElement, JsValue> {
	Ok(document
		.create_element_ns(Some(SVG_NS), tag)?
		.dyn_into::<SvgElement>()?)
}

pub fn set_pct(el: &HtmlElement, left: f64, top: f64) -> Result<(), JsValue> {
	let style = el.style();
	style.set_property("left", &format!("{left}%"))?;
	style.set_property("top", &format!("{top}%"))
}

pub fn set_px_var(el: &HtmlElement, name: &str, px: f64) -> Result<(), JsValue> {
	el.style().set_property(name, &format!("{px}px"))
}

pub fn toggle_class(el: &Element, class: &str, on: bool) -> Result<(), JsValue> {
	el.class_list().toggle_with_force(class, on).map(|_| ())
}

/// `hsla(h,s%,l%,a)` string for a custom-property color.
pub fn hsla(hue: u32, saturation: u32, lightness: u32, alpha: f64) -> String {
	format!("hsla({hue},{saturation}%,{lightness}%,{alpha})")
}

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::types::{NodeRecord, parse_network};

#[derive(Debug, Error)]
pub enum LoadError {
	#[error("no browser window available")]
	NoWindow,
	#[error("request for {url} failed: {message}")]
	Request { url: String, message: String },
	#[error("{url} responded with HTTP {status}")]
	Status { url: String, status: u16 },
	#[error("could not read body of {url}: {message}")]
	Body { url: String, message: String },
	#[error("invalid network data: {0}")]
	Parse(#[from] serde_json::Error),
}

fn describe(value: &JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Fetch and parse the node file at `url`.
pub async fn fetch_network(url: &str) -> Result<Vec<NodeRecord>, LoadError> {
	let window = web_sys::window().ok_or(LoadError::NoWindow)?;
	let request_err = |e: JsValue| LoadError::Request {
		url: url.to_owned(),
		message: describe(&e),
	};

	let resp = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(request_err)?;
	let resp: web_sys::Response = resp.dyn_into().map_err(request_err)?;
	if !resp.ok() {
		return Err(LoadError::Status {
			url: url.to_owned(),
			status: resp.status(),
		});
	}

	let body_err = |e: JsValue| LoadError::Body {
		url: url.to_owned(),
		message: describe(&e),
	};
	let text = JsFuture::from(resp.text().map_err(body_err)?)
		.await
		.map_err(body_err)?
		.as_string()
		.ok_or_else(|| body_err(JsValue::from_str("body is not text")))?;

	let nodes = parse_network(&text)?;
	log::info!("loaded {} node records from {url}", nodes.len());
	Ok(nodes)
}

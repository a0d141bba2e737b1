use wasm_bindgen::JsValue;

use super::photo_layer::PhotoLayer;
use super::view::{NetLayer, NetworkView};

/// Everything the overlay owns on the page, driven by one frame loop.
#[derive(Default)]
pub struct Scene {
	photos: Option<PhotoLayer>,
	net_layer: Option<NetLayer>,
	network: Option<NetworkView>,
}

impl Scene {
	pub fn set_photos(&mut self, photos: PhotoLayer) {
		self.photos = Some(photos);
	}

	pub fn set_net_layer(&mut self, layer: NetLayer) {
		self.net_layer = Some(layer);
	}

	pub fn net_layer(&self) -> Option<&NetLayer> {
		self.net_layer.as_ref()
	}

	pub fn attach_network(&mut self, view: NetworkView) {
		self.network = Some(view);
	}

	/// One animation step; `timestamp_ms` is the `requestAnimationFrame` time.
	pub fn tick(&self, timestamp_ms: f64) -> Result<(), JsValue> {
		if let Some(photos) = &self.photos {
			photos.tick()?;
		}
		if let Some(network) = &self.network {
			network.tick(timestamp_ms * 0.001)?;
		}
		Ok(())
	}

	pub fn clear_sticky(&self) {
		if let Some(network) = &self.network {
			network.clear_sticky();
		}
		if let Some(photos) = &self.photos {
			photos.clear_sticky();
		}
	}

	pub fn on_resize(&self) {
		if let Some(network) = &self.network {
			network.recalc_base_positions();
		}
	}

	pub fn dispose(&mut self) {
		self.network.take();
		self.photos.take();
		if let Some(layer) = self.net_layer.take() {
			layer.remove();
		}
	}
}

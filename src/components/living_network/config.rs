//! Tunables for the overlay. Defaults reproduce the stock page.

use super::geometry::DenseRegion;

/// Settings for the floating background photos.
#[derive(Clone, Debug, PartialEq)]
pub struct PhotoFieldConfig {
	pub count: usize,
	pub width_px: f64,
	pub height_px: f64,
	/// Keep-out margin (percent) from every stage edge.
	pub margin_pct: f64,
	pub amplitude_x: (f64, f64),
	pub amplitude_y: (f64, f64),
	/// Phase advance per frame, in radians.
	pub speed: (f64, f64),
	/// Ratio of the y-axis speed to the x-axis speed.
	pub y_speed_ratio: f64,
	pub many_visible_threshold: usize,
	pub asset_dir: String,
}

impl Default for PhotoFieldConfig {
	fn default() -> Self {
		Self {
			count: 27,
			width_px: 120.0,
			height_px: 90.0,
			margin_pct: 5.0,
			amplitude_x: (4.0, 14.0),
			amplitude_y: (4.0, 14.0),
			speed: (0.12, 0.35),
			y_speed_ratio: 0.85,
			many_visible_threshold: 28,
			asset_dir: "assets".into(),
		}
	}
}

impl PhotoFieldConfig {
	/// Image URL for the 1-based photo `index`.
	pub fn image_src(&self, index: usize) -> String {
		let dir = self.asset_dir.trim_end_matches('/');
		if dir.is_empty() {
			format!("bg-{index}.jpg")
		} else {
			format!("{dir}/bg-{index}.jpg")
		}
	}
}

/// Settings for the foreground network.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkConfig {
	pub data_url: String,
	pub default_size: (f64, f64),
	pub dense_region: DenseRegion,
	/// Edges inside the dense region survive only when their pair hash reaches this.
	pub prune_threshold: f64,
	/// Wander amplitude, in percent of the stage.
	pub wander_amplitude: f64,
	pub joint_radius: f64,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self {
			data_url: "nodes.json".into(),
			default_size: (100.0, 75.0),
			dense_region: DenseRegion::default(),
			prune_threshold: 0.5,
			wander_amplitude: 0.8,
			joint_radius: 3.0,
		}
	}
}

/// Everything the overlay component needs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayConfig {
	pub photos: PhotoFieldConfig,
	pub network: NetworkConfig,
	/// `KeyboardEvent.key` that clears all sticky highlights.
	pub cancel_key: CancelKey,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CancelKey(pub String);

impl Default for CancelKey {
	fn default() -> Self {
		Self("Escape".into())
	}
}

impl CancelKey {
	pub fn matches(&self, key: &str) -> bool {
		self.0 == key
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn image_paths_are_one_based_and_tolerate_slashes() {
		let mut cfg = PhotoFieldConfig::default();
		assert_eq!(cfg.image_src(1), "assets/bg-1.jpg");
		cfg.asset_dir = "static/img/".into();
		assert_eq!(cfg.image_src(27), "static/img/bg-27.jpg");
		cfg.asset_dir.clear();
		assert_eq!(cfg.image_src(3), "bg-3.jpg");
	}

	#[test]
	fn default_threshold_exceeds_photo_count() {
		let cfg = PhotoFieldConfig::default();
		assert_eq!(cfg.count, 27);
		assert_eq!(cfg.many_visible_threshold, 28);
	}

	#[test]
	fn cancel_key_defaults_to_escape() {
		let key = OverlayConfig::default().cancel_key;
		assert!(key.matches("Escape"));
		assert!(!key.matches("Enter"));
	}
}

//! Floating background photos: placement, wander and sticky bookkeeping.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::PhotoFieldConfig;
use super::random::rand_range;

/// Per-photo wander parameters; phases advance every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatMotion {
	pub phase_x: f64,
	pub phase_y: f64,
	pub amp_x: f64,
	pub amp_y: f64,
	pub speed: f64,
}

impl FloatMotion {
	fn random(rng: &mut impl Rng, cfg: &PhotoFieldConfig) -> Self {
		Self {
			phase_x: rand_range(rng, 0.0, TAU),
			phase_y: rand_range(rng, 0.0, TAU),
			amp_x: rand_range(rng, cfg.amplitude_x.0, cfg.amplitude_x.1),
			amp_y: rand_range(rng, cfg.amplitude_y.0, cfg.amplitude_y.1),
			speed: rand_range(rng, cfg.speed.0, cfg.speed.1),
		}
	}

	/// Advance one frame and return the pixel offset.
	pub fn step(&mut self, y_ratio: f64) -> (f64, f64) {
		self.phase_x += self.speed;
		self.phase_y += self.speed * y_ratio;
		(
			self.phase_x.sin() * self.amp_x,
			self.phase_y.cos() * self.amp_y,
		)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Photo {
	pub left_pct: f64,
	pub top_pct: f64,
	pub motion: FloatMotion,
	pub sticky: bool,
}

pub struct PhotoField {
	photos: Vec<Photo>,
	sticky_count: usize,
	many_visible: bool,
	config: PhotoFieldConfig,
}

impl PhotoField {
	pub fn new(config: PhotoFieldConfig, rng: &mut impl Rng) -> Self {
		let span = (100.0 - config.margin_pct * 2.0).max(0.0);
		let photos = (0..config.count)
			.map(|_| {
				let left_pct = config.margin_pct + rand_range(rng, 0.0, 1.0) * span;
				let top_pct = config.margin_pct + rand_range(rng, 0.0, 1.0) * span;
				Photo {
					left_pct,
					top_pct,
					motion: FloatMotion::random(rng, &config),
					sticky: false,
				}
			})
			.collect();
		Self {
			photos,
			sticky_count: 0,
			many_visible: false,
			config,
		}
	}

	pub fn photos(&self) -> &[Photo] {
		&self.photos
	}

	pub fn config(&self) -> &PhotoFieldConfig {
		&self.config
	}

	pub fn sticky_count(&self) -> usize {
		self.sticky_count
	}

	/// Whether enough photos are sticky to switch the page's dense look on.
	pub fn many_visible(&self) -> bool {
		self.many_visible
	}

	/// Mark photo `index` sticky. Returns `false` if it already was (or doesn't exist).
	pub fn hover(&mut self, index: usize) -> bool {
		let Some(photo) = self.photos.get_mut(index) else {
			return false;
		};
		if photo.sticky {
			return false;
		}
		photo.sticky = true;
		self.sticky_count += 1;
		if self.sticky_count >= self.config.many_visible_threshold {
			self.many_visible = true;
		}
		true
	}

	pub fn clear_sticky(&mut self) {
		for photo in &mut self.photos {
			photo.sticky = false;
		}
		self.sticky_count = 0;
		self.many_visible = false;
	}

	/// Advance every photo one frame, returning `(dx, dy)` pixel offsets in order.
	pub fn tick(&mut self) -> Vec<(f64, f64)> {
		let ratio = self.config.y_speed_ratio;
		self.photos
			.iter_mut()
			.map(|p| p.motion.step(ratio))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn field(cfg: PhotoFieldConfig) -> PhotoField {
		PhotoField::new(cfg, &mut SmallRng::seed_from_u64(42))
	}

	#[test]
	fn placement_and_motion_respect_config() {
		let cfg = PhotoFieldConfig::default();
		let f = field(cfg.clone());
		assert_eq!(f.photos().len(), 27);
		for p in f.photos() {
			assert!(p.left_pct >= 5.0 && p.left_pct <= 95.0);
			assert!(p.top_pct >= 5.0 && p.top_pct <= 95.0);
			assert!((0.0..TAU).contains(&p.motion.phase_x));
			assert!((4.0..14.0).contains(&p.motion.amp_x));
			assert!((4.0..14.0).contains(&p.motion.amp_y));
			assert!((0.12..0.35).contains(&p.motion.speed));
			assert!(!p.sticky);
		}
	}

	#[test]
	fn tick_advances_y_slower_than_x() {
		let mut f = field(PhotoFieldConfig::default());
		let before = f.photos()[0].motion.clone();
		let offsets = f.tick();
		let after = &f.photos()[0].motion;

		assert_eq!(offsets.len(), 27);
		assert!((after.phase_x - before.phase_x - before.speed).abs() < 1e-12);
		assert!((after.phase_y - before.phase_y - before.speed * 0.85).abs() < 1e-12);
		let (dx, dy) = offsets[0];
		assert!(dx.abs() <= before.amp_x && dy.abs() <= before.amp_y);
		assert!((dx - after.phase_x.sin() * after.amp_x).abs() < 1e-12);
	}

	#[test]
	fn hover_is_sticky_once() {
		let mut f = field(PhotoFieldConfig::default());
		assert!(f.hover(3));
		assert!(!f.hover(3));
		assert!(!f.hover(999));
		assert_eq!(f.sticky_count(), 1);
		assert!(f.photos()[3].sticky);
	}

	#[test]
	fn default_field_never_reaches_many_visible() {
		let mut f = field(PhotoFieldConfig::default());
		for i in 0..27 {
			f.hover(i);
		}
		assert_eq!(f.sticky_count(), 27);
		assert!(!f.many_visible());
	}

	#[test]
	fn many_visible_flips_exactly_at_threshold_and_clears() {
		let mut f = field(PhotoFieldConfig {
			many_visible_threshold: 3,
			..PhotoFieldConfig::default()
		});
		f.hover(0);
		f.hover(1);
		assert!(!f.many_visible());
		f.hover(2);
		assert!(f.many_visible());

		f.clear_sticky();
		assert!(!f.many_visible());
		assert_eq!(f.sticky_count(), 0);
		assert!(f.photos().iter().all(|p| !p.sticky));
		assert!(f.hover(0));
	}
}

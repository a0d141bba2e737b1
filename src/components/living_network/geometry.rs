/// A position expressed as percentages of the stage size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PctPoint {
	pub x: f64,
	pub y: f64,
}

impl PctPoint {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn offset(self, dx: f64, dy: f64) -> Self {
		Self::new(self.x + dx, self.y + dy)
	}
}

/// Screen-space box as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub fn from_dom(r: &web_sys::DomRect) -> Self {
		Self {
			left: r.left(),
			top: r.top(),
			width: r.width(),
			height: r.height(),
		}
	}
}

/// Center of `element` relative to `stage`, in percent. `None` for a collapsed stage.
pub fn center_pct(stage: &Rect, element: &Rect) -> Option<PctPoint> {
	if stage.width <= 0.0 || stage.height <= 0.0 {
		return None;
	}
	Some(PctPoint {
		x: ((element.left + element.width / 2.0) - stage.left) / stage.width * 100.0,
		y: ((element.top + element.height / 2.0) - stage.top) / stage.height * 100.0,
	})
}

/// Upper-left corner of the stage where edges get thinned out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DenseRegion {
	pub max_x: f64,
	pub max_y: f64,
}

impl Default for DenseRegion {
	fn default() -> Self {
		Self {
			max_x: 33.0,
			max_y: 33.0,
		}
	}
}

impl DenseRegion {
	pub fn contains(&self, p: PctPoint) -> bool {
		p.x < self.max_x && p.y < self.max_y
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rect(left: f64, top: f64, width: f64, height: f64) -> Rect {
		Rect {
			left,
			top,
			width,
			height,
		}
	}

	#[test]
	fn center_is_relative_to_stage_origin() {
		let stage = rect(100.0, 50.0, 1000.0, 500.0);
		let node = rect(300.0, 150.0, 100.0, 50.0);
		let p = center_pct(&stage, &node).unwrap();
		assert_eq!(p, PctPoint::new(25.0, 25.0));
	}

	#[test]
	fn collapsed_stage_has_no_center() {
		let node = rect(0.0, 0.0, 10.0, 10.0);
		assert!(center_pct(&rect(0.0, 0.0, 0.0, 100.0), &node).is_none());
		assert!(center_pct(&rect(0.0, 0.0, 100.0, 0.0), &node).is_none());
	}

	#[test]
	fn dense_region_is_strict_upper_left() {
		let region = DenseRegion::default();
		assert!(region.contains(PctPoint::new(10.0, 10.0)));
		assert!(region.contains(PctPoint::new(32.9, 0.0)));
		assert!(!region.contains(PctPoint::new(33.0, 10.0)));
		assert!(!region.contains(PctPoint::new(10.0, 33.0)));
		assert!(!region.contains(PctPoint::new(90.0, 90.0)));
	}
}

use rand::Rng;

/// Uniform float in `[min, max)`.
pub fn rand_range(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
	if max <= min {
		return min;
	}
	rng.random_range(min..max)
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	#[test]
	fn float_range_stays_in_bounds() {
		let mut rng = SmallRng::seed_from_u64(7);
		for _ in 0..1000 {
			let v = rand_range(&mut rng, 4.0, 14.0);
			assert!((4.0..14.0).contains(&v));
		}
	}

	#[test]
	fn empty_ranges_collapse_to_min() {
		let mut rng = SmallRng::seed_from_u64(3);
		assert_eq!(rand_range(&mut rng, 2.0, 2.0), 2.0);
		assert_eq!(rand_range(&mut rng, 5.0, 1.0), 5.0);
	}
}

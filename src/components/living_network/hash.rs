//! Stable string hashes used for per-node hues and edge pruning.

/// Polynomial `h * 31 + unit` hash over UTF-16 code units, wrapping at 32 bits.
pub fn string_hash(s: &str) -> u32 {
	s.encode_utf16()
		.fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as u32))
}

/// Hue in `[0, 360)` derived from a label or id.
pub fn hue_from(s: &str) -> u32 {
	string_hash(s) % 360
}

/// Canonical key for an unordered id pair.
pub fn pair_key(a: &str, b: &str) -> String {
	if a.encode_utf16().lt(b.encode_utf16()) {
		format!("{a}|{b}")
	} else {
		format!("{b}|{a}")
	}
}

/// Order-independent score in `[0, 1)` for an id pair.
pub fn pair_hash(a: &str, b: &str) -> f64 {
	(string_hash(&pair_key(a, b)) % 1000) as f64 / 1000.0
}

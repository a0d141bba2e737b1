use std::collections::{HashMap, HashSet};

use super::config::NetworkConfig;
use super::geometry::PctPoint;
use super::hash::{hue_from, pair_hash, pair_key};
use super::types::NodeRecord;

/// An undirected link between two node ids, kept in first-seen orientation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
	pub a: String,
	pub b: String,
}

/// Where a node and its joint should be drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeFrame {
	pub pos: Option<PctPoint>,
	pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeFrame {
	pub ends: Option<(PctPoint, PctPoint)>,
	pub visible: bool,
}

/// One frame's worth of positions, aligned with `nodes()` and `edges()`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
	pub nodes: Vec<NodeFrame>,
	pub edges: Vec<EdgeFrame>,
}

/// Wander offset (percent) for `id` at time `t` seconds.
pub fn wander_offset(id: &str, t: f64, amplitude: f64) -> (f64, f64) {
	let seed = hue_from(id) as f64 / 57.3;
	(
		(t * 0.8 + seed).sin() * amplitude,
		(t * 1.1 + seed * 1.3).cos() * amplitude,
	)
}

pub struct NetworkState {
	nodes: Vec<NodeRecord>,
	index: HashMap<String, usize>,
	base: HashMap<String, PctPoint>,
	edges: Vec<Edge>,
	hovered: HashSet<String>,
	sticky: HashSet<String>,
	config: NetworkConfig,
}

impl NetworkState {
	pub fn new(config: NetworkConfig) -> Self {
		Self {
			nodes: Vec::new(),
			index: HashMap::new(),
			base: HashMap::new(),
			edges: Vec::new(),
			hovered: HashSet::new(),
			sticky: HashSet::new(),
			config,
		}
	}

	/// Build from raw records, dropping background nodes.
	pub fn from_records(records: Vec<NodeRecord>, config: NetworkConfig) -> Self {
		let mut state = Self::new(config);
		for record in records.into_iter().filter(|r| !r.is_background()) {
			state.add_node(record);
		}
		state
	}

	/// Register a node. Duplicate ids are ignored.
	pub fn add_node(&mut self, record: NodeRecord) -> bool {
		if self.index.contains_key(&record.id) {
			log::warn!("ignoring duplicate node id {:?}", record.id);
			return false;
		}
		self.index.insert(record.id.clone(), self.nodes.len());
		self.base
			.insert(record.id.clone(), PctPoint::new(record.x, record.y));
		self.nodes.push(record);
		true
	}

	pub fn nodes(&self) -> &[NodeRecord] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn config(&self) -> &NetworkConfig {
		&self.config
	}

	pub fn base_position(&self, id: &str) -> Option<PctPoint> {
		self.base.get(id).copied()
	}

	/// Refresh rest positions from rendered geometry. Nodes `measure` can't
	/// place keep their previous base.
	pub fn recalc_base_positions(
		&mut self,
		mut measure: impl FnMut(usize, &NodeRecord) -> Option<PctPoint>,
	) {
		for (i, node) in self.nodes.iter().enumerate() {
			if let Some(p) = measure(i, node) {
				self.base.insert(node.id.clone(), p);
			}
		}
	}

	/// Regenerate the edge list from every node's `links`.
	pub fn rebuild_edges(&mut self) -> &[Edge] {
		self.edges.clear();
		let mut drawn = HashSet::new();
		let region = self.config.dense_region;

		for node in &self.nodes {
			for target in &node.links {
				if *target == node.id {
					continue;
				}
				if !drawn.insert(pair_key(&node.id, target)) {
					continue;
				}
				let (Some(p1), Some(p2)) = (self.base.get(&node.id), self.base.get(target)) else {
					log::debug!("link {} -> {target} points at an unknown node", node.id);
					continue;
				};
				if region.contains(*p1)
					&& region.contains(*p2)
					&& pair_hash(&node.id, target) < self.config.prune_threshold
				{
					continue;
				}
				self.edges.push(Edge {
					a: node.id.clone(),
					b: target.clone(),
				});
			}
		}
		&self.edges
	}

	/// Pointer entered a node. Returns `true` if it just became sticky.
	pub fn pointer_enter(&mut self, id: &str) -> bool {
		if !self.index.contains_key(id) {
			return false;
		}
		self.hovered.insert(id.to_owned());
		self.sticky.insert(id.to_owned())
	}

	pub fn pointer_leave(&mut self, id: &str) {
		self.hovered.remove(id);
	}

	pub fn is_sticky(&self, id: &str) -> bool {
		self.sticky.contains(id)
	}

	/// Hovered or sticky.
	pub fn is_active(&self, id: &str) -> bool {
		self.hovered.contains(id) || self.is_sticky(id)
	}

	pub fn clear_sticky(&mut self) {
		self.sticky.clear();
	}

	pub fn animated_pct(&self, id: &str, t: f64) -> Option<PctPoint> {
		let base = self.base_position(id)?;
		let (dx, dy) = wander_offset(id, t, self.config.wander_amplitude);
		Some(base.offset(dx, dy))
	}

	pub fn frame(&self, t: f64) -> Frame {
		let nodes = self
			.nodes
			.iter()
			.map(|n| NodeFrame {
				pos: self.animated_pct(&n.id, t),
				active: self.is_active(&n.id),
			})
			.collect();
		let edges = self
			.edges
			.iter()
			.map(|e| EdgeFrame {
				ends: self.animated_pct(&e.a, t).zip(self.animated_pct(&e.b, t)),
				visible: self.is_active(&e.a) || self.is_active(&e.b),
			})
			.collect();
		Frame { nodes, edges }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, x: f64, y: f64, links: &[&str]) -> NodeRecord {
		NodeRecord {
			id: id.into(),
			x,
			y,
			w: None,
			h: None,
			src: None,
			label: None,
			links: links.iter().map(|s| s.to_string()).collect(),
			kind: None,
		}
	}

	fn built(records: Vec<NodeRecord>) -> NetworkState {
		let mut state = NetworkState::from_records(records, NetworkConfig::default());
		state.rebuild_edges();
		state
	}

	#[test]
	fn edge_outside_dense_region_is_kept() {
		let state = built(vec![node("A", 10.0, 10.0, &["B"]), node("B", 90.0, 90.0, &[])]);
		assert_eq!(
			state.edges(),
			&[Edge {
				a: "A".into(),
				b: "B".into()
			}]
		);
	}

	#[test]
	fn reciprocal_links_collapse_to_one_edge() {
		let state = built(vec![node("A", 50.0, 50.0, &["B"]), node("B", 60.0, 60.0, &["A"])]);
		assert_eq!(state.edges().len(), 1);
	}

	#[test]
	fn dense_region_edges_follow_pair_hash() {
		// pair_hash("a","b") = 0.159, pair_hash("n1","n2") = 0.693
		let pruned = built(vec![node("a", 5.0, 5.0, &["b"]), node("b", 5.0, 5.0, &[])]);
		assert!(pruned.edges().is_empty());

		let kept = built(vec![node("n1", 5.0, 5.0, &["n2"]), node("n2", 5.0, 5.0, &[])]);
		assert_eq!(kept.edges().len(), 1);

		// pair_hash("n1","n10") is exactly 0.5, which is kept
		let boundary = built(vec![node("n1", 5.0, 5.0, &["n10"]), node("n10", 5.0, 5.0, &[])]);
		assert_eq!(boundary.edges().len(), 1);

		// same low-scoring pair survives once one end leaves the region
		let outside = built(vec![node("a", 5.0, 5.0, &["b"]), node("b", 40.0, 5.0, &[])]);
		assert_eq!(outside.edges().len(), 1);
	}

	#[test]
	fn unknown_self_and_background_links_are_skipped() {
		let mut bg = node("bg", 50.0, 50.0, &[]);
		bg.kind = Some("background".into());
		let state = built(vec![node("A", 50.0, 50.0, &["A", "missing", "bg"]), bg]);
		assert_eq!(state.nodes().len(), 1);
		assert!(state.nodes().iter().all(|n| n.id != "bg"));
		assert!(state.edges().is_empty());
	}

	#[test]
	fn duplicate_ids_keep_the_first_record() {
		let mut state = NetworkState::new(NetworkConfig::default());
		assert!(state.add_node(node("A", 1.0, 2.0, &[])));
		assert!(!state.add_node(node("A", 9.0, 9.0, &[])));
		assert_eq!(state.base_position("A"), Some(PctPoint::new(1.0, 2.0)));
	}

	#[test]
	fn recalc_updates_every_measured_node() {
		let mut state = built(vec![node("A", 10.0, 10.0, &[]), node("B", 20.0, 20.0, &[])]);
		state.recalc_base_positions(|i, _| Some(PctPoint::new(i as f64 * 50.0, 70.0)));
		assert_eq!(state.base_position("A"), Some(PctPoint::new(0.0, 70.0)));
		assert_eq!(state.base_position("B"), Some(PctPoint::new(50.0, 70.0)));

		state.recalc_base_positions(|_, n| (n.id == "B").then(|| PctPoint::new(1.0, 1.0)));
		assert_eq!(state.base_position("A"), Some(PctPoint::new(0.0, 70.0)));
		assert_eq!(state.base_position("B"), Some(PctPoint::new(1.0, 1.0)));
	}

	#[test]
	fn rebuild_uses_latest_base_positions() {
		let mut state = built(vec![node("a", 80.0, 80.0, &["b"]), node("b", 80.0, 80.0, &[])]);
		assert_eq!(state.edges().len(), 1);
		state.recalc_base_positions(|_, _| Some(PctPoint::new(5.0, 5.0)));
		state.rebuild_edges();
		assert!(state.edges().is_empty());
	}

	#[test]
	fn sticky_lifecycle() {
		let mut state = built(vec![node("A", 50.0, 50.0, &[]), node("B", 70.0, 70.0, &[])]);
		assert!(state.pointer_enter("A"));
		assert!(!state.pointer_enter("A"));
		assert!(!state.pointer_enter("ghost"));
		state.pointer_leave("A");
		assert!(state.is_sticky("A") && state.is_active("A"));
		assert!(!state.is_active("B"));

		state.clear_sticky();
		assert!(!state.is_active("A"));
	}

	#[test]
	fn hovered_node_stays_active_after_clear() {
		let mut state = built(vec![node("A", 50.0, 50.0, &[])]);
		state.pointer_enter("A");
		state.clear_sticky();
		assert!(state.is_active("A"));
		assert!(!state.is_sticky("A"));
	}

	#[test]
	fn frame_marks_edges_touching_active_nodes() {
		let mut state = built(vec![
			node("A", 50.0, 50.0, &["B"]),
			node("B", 70.0, 70.0, &["C"]),
			node("C", 90.0, 90.0, &[]),
		]);
		state.pointer_enter("A");
		let frame = state.frame(1.5);

		assert_eq!(frame.nodes.len(), 3);
		assert_eq!(frame.edges.len(), 2);
		assert!(frame.nodes[0].active && !frame.nodes[1].active);
		assert!(frame.edges[0].visible);
		assert!(!frame.edges[1].visible);

		let (a, b) = frame.edges[0].ends.unwrap();
		assert_eq!(Some(a), frame.nodes[0].pos);
		assert_eq!(Some(b), frame.nodes[1].pos);
	}

	#[test]
	fn wander_is_small_and_deterministic() {
		let state = built(vec![node("A", 50.0, 50.0, &[])]);
		for t in [0.0, 0.5, 10.0, 1234.5] {
			let p = state.animated_pct("A", t).unwrap();
			assert!((p.x - 50.0).abs() <= 0.8 && (p.y - 50.0).abs() <= 0.8);
			assert_eq!(Some(p), state.animated_pct("A", t));
		}
		assert!(state.animated_pct("missing", 0.0).is_none());

		let (dx, dy) = wander_offset("A", 0.0, 1.0);
		let seed: f64 = 65.0 / 57.3;
		assert!((dx - seed.sin()).abs() < 1e-12);
		assert!((dy - (seed * 1.3).cos()).abs() < 1e-12);
	}
}

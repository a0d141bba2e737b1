use serde::{Deserialize, Deserializer};

/// Node kind that is kept out of the foreground graph.
pub const BACKGROUND_KIND: &str = "background";

/// One node as it appears in `nodes.json`; `x`/`y` are stage percentages.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NodeRecord {
	pub id: String,
	pub x: f64,
	pub y: f64,
	#[serde(default)]
	pub w: Option<f64>,
	#[serde(default)]
	pub h: Option<f64>,
	#[serde(default)]
	pub src: Option<String>,
	#[serde(default)]
	pub label: Option<String>,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub links: Vec<String>,
	#[serde(default, rename = "type")]
	pub kind: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl NodeRecord {
	/// Text shown under the node and used for its hue. Empty labels fall back to the id.
	pub fn display_label(&self) -> &str {
		self.label
			.as_deref()
			.filter(|label| !label.is_empty())
			.unwrap_or(&self.id)
	}

	pub fn image_src(&self) -> Option<&str> {
		self.src.as_deref().filter(|src| !src.is_empty())
	}

	/// Figure size in px; missing or zero dimensions take the default.
	pub fn size(&self, default: (f64, f64)) -> (f64, f64) {
		let pick = |v: Option<f64>, fallback| v.filter(|v| *v != 0.0).unwrap_or(fallback);
		(pick(self.w, default.0), pick(self.h, default.1))
	}

	pub fn is_background(&self) -> bool {
		self.kind.as_deref() == Some(BACKGROUND_KIND)
	}
}

/// Index-based layout: fractional coordinates plus `[a, b]` index pairs.
#[derive(Debug, Deserialize)]
struct IndexedFile {
	nodes: Vec<NodeRecord>,
	#[serde(default)]
	links: Vec<(usize, usize)>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NetworkFile {
	Flat(Vec<NodeRecord>),
	Indexed(IndexedFile),
}

/// Parse either accepted `nodes.json` shape into flat node records.
pub fn parse_network(json: &str) -> Result<Vec<NodeRecord>, serde_json::Error> {
	Ok(match serde_json::from_str::<NetworkFile>(json)? {
		NetworkFile::Flat(nodes) => nodes,
		NetworkFile::Indexed(file) => normalize_indexed(file),
	})
}

fn normalize_indexed(file: IndexedFile) -> Vec<NodeRecord> {
	let IndexedFile { mut nodes, links } = file;
	for node in &mut nodes {
		node.x *= 100.0;
		node.y *= 100.0;
	}
	for (a, b) in links {
		let Some(target) = nodes.get(b).map(|n| n.id.clone()) else {
			log::debug!("skipping link to missing node index {b}");
			continue;
		};
		match nodes.get_mut(a) {
			Some(source) => source.links.push(target),
			None => log::debug!("skipping link from missing node index {a}"),
		}
	}
	nodes
}

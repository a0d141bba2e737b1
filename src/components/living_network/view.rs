//! DOM side of the network: node figures, SVG edges and joints.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlImageElement, SvgElement};

use super::dom::{create_html, create_svg, hsla, set_pct, set_px_var, toggle_class};
use super::geometry::{Rect, center_pct};
use super::hash::hue_from;
use super::state::NetworkState;
use super::types::NodeRecord;

/// The `<svg>` overlay with its line and joint groups.
pub struct NetLayer {
	pub svg: SvgElement,
	pub lines: SvgElement,
	pub joints: SvgElement,
}

impl NetLayer {
	pub fn mount(document: &Document, stage: &HtmlElement) -> Result<Self, JsValue> {
		let svg = create_svg(document, "svg")?;
		svg.set_id("net");
		svg.set_attribute("class", "net")?;
		let lines = create_svg(document, "g")?;
		lines.set_id("lines");
		let joints = create_svg(document, "g")?;
		joints.set_id("joints");
		svg.append_child(&lines)?;
		svg.append_child(&joints)?;
		stage.append_child(&svg)?;
		Ok(Self { svg, lines, joints })
	}

	pub fn remove(&self) {
		self.svg.remove();
	}
}

struct NodeDom {
	figure: HtmlElement,
	on_enter: Closure<dyn FnMut()>,
	on_leave: Closure<dyn FnMut()>,
}

impl NodeDom {
	fn detach(self) {
		let _ = self
			.figure
			.remove_event_listener_with_callback("mouseenter", self.on_enter.as_ref().unchecked_ref());
		let _ = self
			.figure
			.remove_event_listener_with_callback("mouseleave", self.on_leave.as_ref().unchecked_ref());
		self.figure.remove();
	}
}

pub struct NetworkView {
	state: Rc<RefCell<NetworkState>>,
	document: Document,
	stage: HtmlElement,
	lines: SvgElement,
	joints: SvgElement,
	nodes: Vec<NodeDom>,
	edge_lines: Vec<SvgElement>,
	joint_circles: Vec<SvgElement>,
}

impl NetworkView {
	/// Create one figure per node, then build edges and joints.
	pub fn initialize(
		document: &Document,
		stage: &HtmlElement,
		layer: &NetLayer,
		state: NetworkState,
	) -> Result<Self, JsValue> {
		let state = Rc::new(RefCell::new(state));
		let mut view = Self {
			state: state.clone(),
			document: document.clone(),
			stage: stage.clone(),
			lines: layer.lines.clone(),
			joints: layer.joints.clone(),
			nodes: Vec::new(),
			edge_lines: Vec::new(),
			joint_circles: Vec::new(),
		};

		let records = state.borrow().nodes().to_vec();
		for record in &records {
			let node = view.create_node(record)?;
			view.nodes.push(node);
		}
		view.rebuild()?;
		log::info!(
			"network built: {} nodes, {} edges",
			view.nodes.len(),
			view.edge_lines.len()
		);
		Ok(view)
	}

	fn create_node(&self, record: &NodeRecord) -> Result<NodeDom, JsValue> {
		let (width, height) = record.size(self.state.borrow().config().default_size);
		let label_text = record.display_label();

		let figure = create_html(&self.document, "figure")?;
		figure.set_class_name("node");
		figure.set_id(&format!("node-{}", record.id));
		set_pct(&figure, record.x, record.y)?;
		set_px_var(&figure, "--w", width)?;
		set_px_var(&figure, "--h", height)?;

		let img: HtmlImageElement = self.document.create_element("img")?.dyn_into()?;
		if let Some(src) = record.image_src() {
			img.set_src(src);
		}
		img.set_alt(label_text);

		let label = create_html(&self.document, "div")?;
		label.set_class_name("label");
		label.set_text_content(Some(label_text));
		label
			.style()
			.set_property("--label-bg", &hsla(hue_from(label_text), 70, 45, 0.9))?;

		figure.append_child(&img)?;
		figure.append_child(&label)?;

		let on_enter = {
			let (state, id, figure) = (self.state.clone(), record.id.clone(), figure.clone());
			Closure::<dyn FnMut()>::new(move || {
				if state.borrow_mut().pointer_enter(&id) {
					let _ = figure.class_list().add_1("sticky");
				}
			})
		};
		let on_leave = {
			let (state, id) = (self.state.clone(), record.id.clone());
			Closure::<dyn FnMut()>::new(move || state.borrow_mut().pointer_leave(&id))
		};
		figure.add_event_listener_with_callback("mouseenter", on_enter.as_ref().unchecked_ref())?;
		figure.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;

		self.stage.append_child(&figure)?;
		Ok(NodeDom {
			figure,
			on_enter,
			on_leave,
		})
	}

	/// Drop all edges and joints and regenerate them from fresh geometry.
	pub fn rebuild(&mut self) -> Result<(), JsValue> {
		self.lines.set_inner_html("");
		self.joints.set_inner_html("");
		self.edge_lines.clear();
		self.joint_circles.clear();
		self.recalc_base_positions();

		let state_rc = self.state.clone();
		let mut state = state_rc.borrow_mut();
		state.rebuild_edges();

		for edge in state.edges() {
			let line = create_svg(&self.document, "line")?;
			line.class_list().add_1("link")?;
			line.set_attribute("data-a", &edge.a)?;
			line.set_attribute("data-b", &edge.b)?;
			self.lines.append_child(&line)?;
			self.edge_lines.push(line);
		}

		let radius = state.config().joint_radius;
		for node in state.nodes() {
			let circle = create_svg(&self.document, "circle")?;
			circle.set_id(&format!("joint-{}", node.id));
			circle.class_list().add_1("joint")?;
			circle.set_attribute("r", &radius.to_string())?;
			let hue = hue_from(node.display_label());
			let style = circle.style();
			style.set_property("--joint-fill", &hsla(hue, 70, 55, 0.9))?;
			style.set_property("--joint-stroke", &hsla(hue, 75, 70, 0.9))?;
			self.joints.append_child(&circle)?;
			self.joint_circles.push(circle);
		}
		Ok(())
	}

	/// Re-read every node's rendered center as its rest position.
	pub fn recalc_base_positions(&self) {
		let stage = Rect::from_dom(&self.stage.get_bounding_client_rect());
		let nodes = &self.nodes;
		self.state.borrow_mut().recalc_base_positions(|i, _| {
			let figure = &nodes.get(i)?.figure;
			center_pct(&stage, &Rect::from_dom(&figure.get_bounding_client_rect()))
		});
	}

	pub fn tick(&self, t: f64) -> Result<(), JsValue> {
		let frame = self.state.borrow().frame(t);

		for ((node, circle), nf) in self
			.nodes
			.iter()
			.zip(&self.joint_circles)
			.zip(&frame.nodes)
		{
			if let Some(p) = nf.pos {
				circle.set_attribute("cx", &format!("{}%", p.x))?;
				circle.set_attribute("cy", &format!("{}%", p.y))?;
				set_pct(&node.figure, p.x, p.y)?;
			}
			toggle_class(circle, "on", nf.active)?;
		}

		for (line, ef) in self.edge_lines.iter().zip(&frame.edges) {
			if let Some((a, b)) = ef.ends {
				line.set_attribute("x1", &format!("{}%", a.x))?;
				line.set_attribute("y1", &format!("{}%", a.y))?;
				line.set_attribute("x2", &format!("{}%", b.x))?;
				line.set_attribute("y2", &format!("{}%", b.y))?;
			}
			toggle_class(line, "visible", ef.visible)?;
		}
		Ok(())
	}

	pub fn clear_sticky(&self) {
		self.state.borrow_mut().clear_sticky();
		for node in &self.nodes {
			let _ = node.figure.class_list().remove_1("sticky");
		}
	}

	/// Remove every element this view created and release its listeners.
	pub fn dispose(&mut self) {
		for node in self.nodes.drain(..) {
			node.detach();
		}
		for el in self.edge_lines.drain(..).chain(self.joint_circles.drain(..)) {
			el.remove();
		}
	}
}

impl Drop for NetworkView {
	fn drop(&mut self) {
		self.dispose();
	}
}

use super::config::LayoutConfig;
use super::simulation::{DragEvent, Phase, Simulation};
use super::types::Viewport;
use crate::stats::ClusterAssignment;

/// Hit radius in graph space; nodes are only a few pixels wide.
pub const HIT_RADIUS: f64 = 8.0;

/// Screen = graph * k + (x, y).
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	/// Zoomed out by `k` around the viewport center.
	pub fn initial(viewport: Viewport, k: f64) -> Self {
		Self {
			x: viewport.width * (1.0 - k) / 2.0,
			y: viewport.height * (1.0 - k) / 2.0,
			k,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_id: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Everything the canvas needs between frames: the simulation plus the
/// pointer state that feeds it and the zoom/pan transform over it.
pub struct ForceGraphState {
	pub simulation: Simulation,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
}

impl ForceGraphState {
	pub fn new(clusters: &[ClusterAssignment], width: f64, height: f64, config: LayoutConfig) -> Self {
		let viewport = Viewport::new(width, height);
		let transform = ViewTransform::initial(viewport, config.initial_zoom);
		let simulation = if clusters.is_empty() {
			Simulation::cold(viewport, config)
		} else {
			Simulation::from_clusters(clusters, viewport, config)
		};
		Self {
			simulation,
			transform,
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
		}
	}

	/// Replace the graph. The old simulation and any drag on it are dropped
	/// before the new one is built, so nothing from it can tick again.
	pub fn rebuild(&mut self, clusters: &[ClusterAssignment]) {
		let viewport = Viewport::new(self.width, self.height);
		let config = self.simulation.config().clone();
		self.drag = DragState::default();
		self.simulation = Simulation::cold(viewport, config.clone());
		self.simulation = Simulation::from_clusters(clusters, viewport, config);
		log::info!(
			"rebuilt cluster graph with {} players",
			self.simulation.nodes().len()
		);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.simulation.resize(Viewport::new(width, height));
	}

	pub fn is_animating(&self) -> bool {
		self.simulation.phase() == Phase::Running
	}

	pub fn tick(&mut self) -> bool {
		self.simulation.tick()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under a screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<String> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.simulation
			.nodes()
			.iter()
			.rev()
			.find(|node| {
				let (dx, dy) = (node.x - gx, node.y - gy);
				(dx * dx + dy * dy).sqrt() < HIT_RADIUS.max(node.radius)
			})
			.map(|node| node.id.clone())
	}

	/// Press: grab a node if one is under the pointer, otherwise start panning.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		if let Some(id) = self.node_at_position(sx, sy) {
			let (x, y) = {
				let node = self.simulation.node(&id);
				node.map(|n| (n.x, n.y)).unwrap_or(self.screen_to_graph(sx, sy))
			};
			self.drag.active = true;
			self.drag.node_id = Some(id.clone());
			self.simulation.apply_drag(DragEvent::Start { node: id, x, y });
		} else {
			self.pan.active = true;
			self.pan.start_x = sx;
			self.pan.start_y = sy;
			self.pan.transform_start_x = self.transform.x;
			self.pan.transform_start_y = self.transform.y;
		}
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if self.drag.active {
			let (x, y) = self.screen_to_graph(sx, sy);
			self.simulation.apply_drag(DragEvent::Move { x, y });
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Release or leave: hand the node back to the simulation and stop panning.
	pub fn pointer_up(&mut self) {
		if self.drag.active {
			self.simulation.apply_drag(DragEvent::End);
		}
		self.drag = DragState::default();
		self.pan.active = false;
	}

	/// Zoom about a screen point, clamped to the configured scale range.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let config = self.simulation.config();
		let new_k = (self.transform.k * factor).clamp(config.min_zoom, config.max_zoom);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Wheel step: down zooms out, up zooms in.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		self.zoom_at(sx, sy, factor);
	}
}

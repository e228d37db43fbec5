use serde::Serialize;

use crate::stats::PlayerStatLine;

/// Canvas size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}
}

/// One player-season in the cluster view.
///
/// `cluster` is fixed at build time. Only the simulation writes `x`, `y`,
/// `vx` and `vy`; `fx`/`fy` pin the node while it is dragged.
#[derive(Clone, Debug)]
pub struct GraphNode {
	pub id: String,
	pub name: String,
	pub team: String,
	pub position: String,
	pub cluster: u32,
	pub stats: PlayerStatLine,
	pub radius: f64,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub fx: Option<f64>,
	pub fy: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	/// 1 inside a cluster, lower across clusters.
	pub weight: f64,
}

/// Attraction target for one cluster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterCenter {
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
	pub centers: std::collections::BTreeMap<u32, ClusterCenter>,
}

/// Node position emitted to renderers after each tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodePosition {
	pub id: String,
	pub x: f64,
	pub y: f64,
}

/// Link endpoints emitted to renderers after each tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinkSegment {
	pub source_id: String,
	pub target_id: String,
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

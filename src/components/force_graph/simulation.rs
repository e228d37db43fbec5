//! Alpha-cooled force simulation for the cluster graph.
//!
//! Each tick evaluates every [`Force`] against the same pre-tick snapshot, sums
//! the velocity deltas, then integrates. Only this module writes node positions.

use std::collections::{BTreeMap, HashMap};

use super::builder;
use super::config::LayoutConfig;
use super::types::{ClusterCenter, GraphData, GraphLink, GraphNode, LinkSegment, NodePosition, Viewport};
use crate::stats::ClusterAssignment;

/// Lifecycle of a simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Nothing built yet.
	Cold,
	/// Ticking; alpha above `alpha_min` or a drag is holding it up.
	Running,
	/// Alpha decayed below `alpha_min`. Resumes on drag or resize.
	Settled,
}

/// The forces composed on every tick, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Force {
	/// Springs along links; short inside a cluster, long across clusters.
	Link,
	/// Pairwise inverse-square repulsion.
	ManyBody,
	/// Weak pull of the graph's centroid toward the viewport center.
	Center,
	/// Keeps node circles from overlapping.
	Collision,
	/// Alpha-scaled pull toward each node's cluster center.
	ClusterAttraction,
}

pub const FORCES: [Force; 5] = [
	Force::Link,
	Force::ManyBody,
	Force::Center,
	Force::Collision,
	Force::ClusterAttraction,
];

/// Discrete drag input, already mapped to graph coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DragEvent {
	Start { node: String, x: f64, y: f64 },
	Move { x: f64, y: f64 },
	End,
}

#[derive(Clone, Debug)]
struct ResolvedLink {
	source: usize,
	target: usize,
	distance: f64,
	strength: f64,
	bias: f64,
}

#[derive(Clone, Debug)]
pub struct Simulation {
	nodes: Vec<GraphNode>,
	links: Vec<GraphLink>,
	resolved: Vec<ResolvedLink>,
	centers: BTreeMap<u32, ClusterCenter>,
	index: HashMap<String, usize>,
	viewport: Viewport,
	config: LayoutConfig,
	alpha: f64,
	alpha_target: f64,
	phase: Phase,
	dragging: Option<usize>,
	ticks: u64,
}

impl Simulation {
	/// An empty simulation waiting for its first graph.
	pub fn cold(viewport: Viewport, config: LayoutConfig) -> Self {
		Self {
			nodes: Vec::new(),
			links: Vec::new(),
			resolved: Vec::new(),
			centers: BTreeMap::new(),
			index: HashMap::new(),
			viewport,
			config,
			alpha: 0.0,
			alpha_target: 0.0,
			phase: Phase::Cold,
			dragging: None,
			ticks: 0,
		}
	}

	/// Start simulating a built graph.
	///
	/// # Panics
	///
	/// If a link references a node id that is not in `graph.nodes`.
	pub fn new(graph: GraphData, viewport: Viewport, config: LayoutConfig) -> Self {
		let index: HashMap<String, usize> = graph
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();
		for link in &graph.links {
			for id in [&link.source, &link.target] {
				assert!(index.contains_key(id), "link references unknown node {id}");
			}
		}

		let phase = if graph.nodes.is_empty() {
			Phase::Settled
		} else {
			Phase::Running
		};
		let mut sim = Self {
			nodes: graph.nodes,
			links: graph.links,
			resolved: Vec::new(),
			centers: graph.centers,
			index,
			viewport,
			config,
			alpha: 1.0,
			alpha_target: 0.0,
			phase,
			dragging: None,
			ticks: 0,
		};
		sim.resolve_links();
		sim
	}

	/// Build the graph for `clusters` and start simulating it.
	pub fn from_clusters(clusters: &[ClusterAssignment], viewport: Viewport, config: LayoutConfig) -> Self {
		let graph = builder::build(clusters, viewport, &config);
		Self::new(graph, viewport, config)
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn links(&self) -> &[GraphLink] {
		&self.links
	}

	pub fn centers(&self) -> &BTreeMap<u32, ClusterCenter> {
		&self.centers
	}

	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	pub fn node_index(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Id of the node currently held by a drag.
	pub fn dragged(&self) -> Option<&str> {
		self.dragging.map(|i| self.nodes[i].id.as_str())
	}

	/// Consume, advance one tick, return.
	pub fn step(mut self) -> Self {
		self.tick();
		self
	}

	/// Advance one tick. Returns `false` without touching state unless running.
	pub fn tick(&mut self) -> bool {
		if self.phase != Phase::Running {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
		let alpha = self.alpha;

		let mut dv = vec![(0.0, 0.0); self.nodes.len()];
		for force in FORCES {
			for (acc, (dx, dy)) in dv.iter_mut().zip(self.contribution(force, alpha)) {
				acc.0 += dx;
				acc.1 += dy;
			}
		}

		let keep = 1.0 - self.config.velocity_decay;
		for (node, (dx, dy)) in self.nodes.iter_mut().zip(dv) {
			match node.fx {
				Some(fx) => {
					node.x = fx;
					node.vx = 0.0;
				}
				None => {
					node.vx = (node.vx + dx) * keep;
					node.x += node.vx;
				}
			}
			match node.fy {
				Some(fy) => {
					node.y = fy;
					node.vy = 0.0;
				}
				None => {
					node.vy = (node.vy + dy) * keep;
					node.y += node.vy;
				}
			}
		}

		self.ticks += 1;
		if self.alpha < self.config.alpha_min {
			self.phase = Phase::Settled;
			log::info!("cluster layout settled after {} ticks", self.ticks);
		}
		true
	}

	/// Tick until settled or `max_ticks` have run. Returns ticks taken.
	pub fn run_until_settled(&mut self, max_ticks: usize) -> usize {
		let mut taken = 0;
		while taken < max_ticks && self.tick() {
			taken += 1;
		}
		taken
	}

	/// Apply a drag transition. Unknown nodes and stray moves are ignored.
	pub fn apply_drag(&mut self, event: DragEvent) {
		match event {
			DragEvent::Start { node, x, y } => {
				let Some(i) = self.node_index(&node) else {
					log::warn!("drag started on unknown node {node}");
					return;
				};
				log::debug!("drag start on {node}");
				if let Some(prev) = self.dragging.replace(i) {
					self.nodes[prev].fx = None;
					self.nodes[prev].fy = None;
				}
				self.nodes[i].fx = Some(x);
				self.nodes[i].fy = Some(y);
				self.alpha_target = self.config.drag_alpha_target;
				self.phase = Phase::Running;
			}
			DragEvent::Move { x, y } => {
				if let Some(i) = self.dragging {
					self.nodes[i].fx = Some(x);
					self.nodes[i].fy = Some(y);
				}
			}
			DragEvent::End => {
				if let Some(i) = self.dragging.take() {
					log::debug!("drag end on {}", self.nodes[i].id);
					self.nodes[i].fx = None;
					self.nodes[i].fy = None;
				}
				self.alpha_target = 0.0;
			}
		}
	}

	/// Move cluster centers for a new viewport, keeping node positions.
	pub fn resize(&mut self, viewport: Viewport) {
		if viewport == self.viewport {
			return;
		}
		self.viewport = viewport;
		self.centers = builder::cluster_centers(
			self.nodes.iter().map(|n| n.cluster),
			viewport,
			self.config.center_radius_fraction,
		);
		self.resolve_links();
		if self.phase != Phase::Cold && !self.nodes.is_empty() {
			self.alpha = self.alpha.max(self.config.resize_alpha);
			self.phase = Phase::Running;
		}
	}

	/// Current node positions for renderers.
	pub fn positions(&self) -> Vec<NodePosition> {
		self.nodes
			.iter()
			.map(|n| NodePosition {
				id: n.id.clone(),
				x: n.x,
				y: n.y,
			})
			.collect()
	}

	/// Current link endpoints for renderers.
	pub fn link_segments(&self) -> Vec<LinkSegment> {
		self.resolved
			.iter()
			.map(|l| {
				let (s, t) = (&self.nodes[l.source], &self.nodes[l.target]);
				LinkSegment {
					source_id: s.id.clone(),
					target_id: t.id.clone(),
					x1: s.x,
					y1: s.y,
					x2: t.x,
					y2: t.y,
				}
			})
			.collect()
	}

	/// Resolve link endpoints to indices and derive per-link distance,
	/// strength and bias from node degree.
	fn resolve_links(&mut self) {
		let mut degree = vec![0usize; self.nodes.len()];
		let pairs: Vec<(usize, usize)> = self
			.links
			.iter()
			.map(|l| (self.index[&l.source], self.index[&l.target]))
			.collect();
		for &(s, t) in &pairs {
			degree[s] += 1;
			degree[t] += 1;
		}
		self.resolved = pairs
			.into_iter()
			.map(|(source, target)| {
				let distance = if self.nodes[source].cluster == self.nodes[target].cluster {
					self.config.intra_cluster_distance
				} else {
					self.config.inter_cluster_distance
				};
				let (ds, dt) = (degree[source] as f64, degree[target] as f64);
				ResolvedLink {
					source,
					target,
					distance,
					strength: 1.0 / ds.min(dt),
					bias: ds / (ds + dt),
				}
			})
			.collect();
	}

	/// Velocity deltas `force` would add to every node this tick.
	pub fn contribution(&self, force: Force, alpha: f64) -> Vec<(f64, f64)> {
		match force {
			Force::Link => self.link_force(alpha),
			Force::ManyBody => self.many_body_force(alpha),
			Force::Center => self.center_force(),
			Force::Collision => self.collision_force(),
			Force::ClusterAttraction => self.cluster_force(alpha),
		}
	}

	fn link_force(&self, alpha: f64) -> Vec<(f64, f64)> {
		let mut dv = vec![(0.0, 0.0); self.nodes.len()];
		for (k, link) in self.resolved.iter().enumerate() {
			let (s, t) = (&self.nodes[link.source], &self.nodes[link.target]);
			let mut x = t.x + t.vx - s.x - s.vx;
			let mut y = t.y + t.vy - s.y - s.vy;
			if x == 0.0 && y == 0.0 {
				x = jiggle(k);
				y = jiggle(k + 1);
			}
			let l = (x * x + y * y).sqrt();
			let l = (l - link.distance) / l * alpha * link.strength;
			x *= l;
			y *= l;
			dv[link.target].0 -= x * link.bias;
			dv[link.target].1 -= y * link.bias;
			dv[link.source].0 += x * (1.0 - link.bias);
			dv[link.source].1 += y * (1.0 - link.bias);
		}
		dv
	}

	fn many_body_force(&self, alpha: f64) -> Vec<(f64, f64)> {
		let strength = self.config.charge_strength;
		let mut dv = vec![(0.0, 0.0); self.nodes.len()];
		for (i, a) in self.nodes.iter().enumerate() {
			for (j, b) in self.nodes.iter().enumerate().skip(i + 1) {
				let mut x = b.x - a.x;
				let mut y = b.y - a.y;
				if x == 0.0 && y == 0.0 {
					x = jiggle(i + j);
					y = jiggle(i * j + 1);
				}
				let l2 = (x * x + y * y).max(1.0);
				let w = strength * alpha / l2;
				dv[i].0 += x * w;
				dv[i].1 += y * w;
				dv[j].0 -= x * w;
				dv[j].1 -= y * w;
			}
		}
		dv
	}

	fn center_force(&self) -> Vec<(f64, f64)> {
		let n = self.nodes.len();
		if n == 0 {
			return Vec::new();
		}
		let (cx, cy) = self.viewport.center();
		let (sx, sy) = self
			.nodes
			.iter()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let shift = (
			(cx - sx / n as f64) * self.config.center_strength,
			(cy - sy / n as f64) * self.config.center_strength,
		);
		vec![shift; n]
	}

	fn collision_force(&self) -> Vec<(f64, f64)> {
		let scale = self.config.collision_scale;
		let strength = self.config.collision_strength;
		let mut dv = vec![(0.0, 0.0); self.nodes.len()];
		for (i, a) in self.nodes.iter().enumerate() {
			let ri = a.radius * scale;
			let (xi, yi) = (a.x + a.vx, a.y + a.vy);
			for (j, b) in self.nodes.iter().enumerate().skip(i + 1) {
				let rj = b.radius * scale;
				let r = ri + rj;
				let mut x = xi - b.x - b.vx;
				let mut y = yi - b.y - b.vy;
				let l2 = x * x + y * y;
				if l2 >= r * r {
					continue;
				}
				if x == 0.0 && y == 0.0 {
					x = jiggle(i + j);
					y = jiggle(i * j + 1);
				}
				let l = (x * x + y * y).sqrt();
				let push = (r - l) / l * strength;
				x *= push;
				y *= push;
				let w = (rj * rj) / (ri * ri + rj * rj);
				dv[i].0 += x * w;
				dv[i].1 += y * w;
				dv[j].0 -= x * (1.0 - w);
				dv[j].1 -= y * (1.0 - w);
			}
		}
		dv
	}

	fn cluster_force(&self, alpha: f64) -> Vec<(f64, f64)> {
		let k = alpha * (self.config.cluster_pull + self.config.cluster_anchor);
		self.nodes
			.iter()
			.map(|node| match self.centers.get(&node.cluster) {
				Some(c) => ((c.x - node.x) * k, (c.y - node.y) * k),
				None => (0.0, 0.0),
			})
			.collect()
	}
}

/// Tiny deterministic offset used to separate coincident points.
fn jiggle(seed: usize) -> f64 {
	((seed as f64 * 0.618_033_988_75).fract() - 0.5) * 1e-6
}

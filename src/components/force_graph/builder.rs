//! Turns cluster assignments into the node-link graph the simulation lays out.

use std::collections::{BTreeMap, HashSet};
use std::f64::consts::PI;

use super::config::LayoutConfig;
use super::types::{ClusterCenter, GraphData, GraphLink, GraphNode, Viewport};
use crate::stats::{ClusterAssignment, PlayerStatLine};

const BASE_RADIUS: f64 = 2.5;
const MIN_RADIUS: f64 = 2.0;
const MAX_RADIUS: f64 = 4.0;
const INITIAL_SPREAD: f64 = 10.0;

/// Build nodes, links and cluster centers. Empty clusters contribute nothing.
pub fn build(clusters: &[ClusterAssignment], viewport: Viewport, config: &LayoutConfig) -> GraphData {
	let populated: Vec<&ClusterAssignment> = clusters.iter().filter(|c| !c.is_empty()).collect();
	let centers = cluster_centers(
		populated.iter().map(|c| c.cluster_id),
		viewport,
		config.center_radius_fraction,
	);

	let mut seen = HashSet::new();
	let mut nodes = Vec::new();
	for cluster in &populated {
		for player in &cluster.players {
			let id = player.node_id();
			if !seen.insert(id.clone()) {
				log::warn!("{id} appears in more than one cluster, keeping the first");
				continue;
			}
			let (x, y) = seed_position(nodes.len(), viewport);
			nodes.push(GraphNode {
				id,
				name: player.player.clone(),
				team: player.team.clone(),
				position: player.position.clone(),
				cluster: cluster.cluster_id,
				stats: player.clone(),
				radius: node_radius(player),
				x,
				y,
				vx: 0.0,
				vy: 0.0,
				fx: None,
				fy: None,
			});
		}
	}

	let links = build_links(&populated, config);
	log::debug!(
		"built cluster graph: {} nodes, {} links, {} clusters",
		nodes.len(),
		links.len(),
		centers.len()
	);
	GraphData {
		nodes,
		links,
		centers,
	}
}

/// Spread clusters evenly on a ring around the viewport center.
///
/// A lone cluster sits at the center itself.
pub fn cluster_centers(
	ids: impl IntoIterator<Item = u32>,
	viewport: Viewport,
	radius_fraction: f64,
) -> BTreeMap<u32, ClusterCenter> {
	let mut ids: Vec<u32> = ids.into_iter().collect();
	ids.sort_unstable();
	ids.dedup();

	let (cx, cy) = viewport.center();
	if ids.len() == 1 {
		return BTreeMap::from([(ids[0], ClusterCenter { x: cx, y: cy })]);
	}
	let n = ids.len() as f64;
	ids.into_iter()
		.enumerate()
		.map(|(i, id)| {
			let angle = (i as f64 / n) * 2.0 * PI;
			let center = ClusterCenter {
				x: cx + angle.cos() * viewport.width * radius_fraction,
				y: cy + angle.sin() * viewport.height * radius_fraction,
			};
			(id, center)
		})
		.collect()
}

/// Scorers and heavy-minute players draw slightly larger.
pub fn node_radius(player: &PlayerStatLine) -> f64 {
	let r = BASE_RADIUS + player.points_per_game / 30.0 + player.minutes_per_game / 60.0;
	if r.is_finite() {
		r.clamp(MIN_RADIUS, MAX_RADIUS)
	} else {
		BASE_RADIUS
	}
}

/// Deterministic phyllotaxis around the viewport center.
fn seed_position(index: usize, viewport: Viewport) -> (f64, f64) {
	let (cx, cy) = viewport.center();
	let radius = INITIAL_SPREAD * (0.5 + index as f64).sqrt();
	let angle = index as f64 * PI * (3.0 - 5.0f64.sqrt());
	(cx + radius * angle.cos(), cy + radius * angle.sin())
}

fn build_links(clusters: &[&ClusterAssignment], config: &LayoutConfig) -> Vec<GraphLink> {
	let mut links = Vec::new();
	let modulus = config.cross_link_modulus.max(1);

	for (ci, cluster) in clusters.iter().enumerate() {
		let members = &cluster.players;
		let len = members.len();
		let per_node = config.max_links_per_node.min(len / 2);

		for (i, source) in members.iter().enumerate() {
			let source_id = source.node_id();
			for j in 1..=per_node {
				links.push(GraphLink {
					source: source_id.clone(),
					target: members[(i + j) % len].node_id(),
					weight: 1.0,
				});
			}

			if i % modulus != 0 {
				continue;
			}
			let Some(other) = next_other_cluster(clusters, ci) else {
				continue;
			};
			let partner = &other.players[(i / modulus) % other.players.len()];
			if partner.position == source.position {
				links.push(GraphLink {
					source: source_id,
					target: partner.node_id(),
					weight: config.cross_link_weight,
				});
			}
		}
	}
	links
}

/// The next cluster in input order (wrapping) with a different id.
fn next_other_cluster<'a>(
	clusters: &[&'a ClusterAssignment],
	from: usize,
) -> Option<&'a ClusterAssignment> {
	let id = clusters[from].cluster_id;
	(1..clusters.len())
		.map(|step| clusters[(from + step) % clusters.len()])
		.find(|c| c.cluster_id != id)
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn player(name: &str, position: &str) -> PlayerStatLine {
		PlayerStatLine {
			player: name.into(),
			season: "2023_24".into(),
			position: position.into(),
			points_per_game: 12.0,
			minutes_per_game: 24.0,
			..Default::default()
		}
	}

	fn cluster(id: u32, names: &[&str], position: &str) -> ClusterAssignment {
		ClusterAssignment::new(id, names.iter().map(|n| player(n, position)).collect())
	}

	fn viewport() -> Viewport {
		Viewport::new(800.0, 600.0)
	}

	#[test]
	fn empty_input_builds_empty_graph() {
		let graph = build(&[], viewport(), &LayoutConfig::default());
		assert!(graph.nodes.is_empty());
		assert!(graph.links.is_empty());
		assert!(graph.centers.is_empty());
	}

	#[test]
	fn empty_clusters_are_skipped() {
		let clusters = [ClusterAssignment::new(0, vec![]), cluster(1, &["a", "b"], "PG")];
		let graph = build(&clusters, viewport(), &LayoutConfig::default());
		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.centers.len(), 1);
		assert!(graph.centers.contains_key(&1));
	}

	#[test]
	fn radius_is_clamped() {
		assert_eq!(node_radius(&PlayerStatLine::default()), 2.5);
		let star = PlayerStatLine {
			points_per_game: 34.0,
			minutes_per_game: 37.0,
			..Default::default()
		};
		assert_eq!(node_radius(&star), 4.0);
		let negative = PlayerStatLine {
			points_per_game: -60.0,
			..Default::default()
		};
		assert_eq!(node_radius(&negative), 2.0);
	}

	#[test]
	fn centers_ring_the_viewport() {
		let centers = cluster_centers([2, 0, 1, 3], viewport(), 0.3);
		assert_eq!(centers.len(), 4);
		let first = centers[&0];
		assert!((first.x - 640.0).abs() < 1e-9);
		assert!((first.y - 300.0).abs() < 1e-9);
		let third = centers[&2];
		assert!((third.x - 160.0).abs() < 1e-9);
		assert!((third.y - 300.0).abs() < 1e-9);
	}

	#[test]
	fn lone_cluster_sits_at_viewport_center() {
		let centers = cluster_centers([7], viewport(), 0.3);
		assert_eq!(centers[&7], ClusterCenter { x: 400.0, y: 300.0 });
	}

	#[test]
	fn intra_cluster_links_wrap_by_index() {
		let clusters = [cluster(0, &["a", "b", "c", "d", "e", "f"], "PG")];
		let graph = build(&clusters, viewport(), &LayoutConfig::default());
		// 6 members, 3 links each
		assert_eq!(graph.links.len(), 18);
		assert!(graph.links.iter().all(|l| l.weight == 1.0));
		let from_f: Vec<_> = graph
			.links
			.iter()
			.filter(|l| l.source == "f-2023_24")
			.map(|l| l.target.as_str())
			.collect();
		assert_eq!(from_f, ["a-2023_24", "b-2023_24", "c-2023_24"]);
	}

	#[test]
	fn large_clusters_cap_links_per_node() {
		let names: Vec<String> = (0..20).map(|i| format!("p{i}")).collect();
		let refs: Vec<&str> = names.iter().map(String::as_str).collect();
		let graph = build(&[cluster(0, &refs, "SF")], viewport(), &LayoutConfig::default());
		assert_eq!(graph.links.len(), 20 * 5);
	}

	#[test]
	fn matching_positions_get_cross_cluster_links() {
		let clusters = [
			cluster(0, &["a", "b", "c", "d"], "SF"),
			cluster(1, &["e", "f", "g", "h"], "SF"),
		];
		let graph = build(&clusters, viewport(), &LayoutConfig::default());
		let cross: Vec<_> = graph.links.iter().filter(|l| l.weight == 0.5).collect();
		assert!(!cross.is_empty());
		let cluster_of = |id: &str| graph.nodes.iter().find(|n| n.id == id).unwrap().cluster;
		for link in &cross {
			assert_ne!(cluster_of(link.source.as_str()), cluster_of(link.target.as_str()));
		}
		let intra = graph.links.iter().filter(|l| l.weight == 1.0).count();
		assert!(intra > cross.len());
	}

	#[test]
	fn different_positions_get_no_cross_links() {
		let clusters = [
			cluster(0, &["a", "b", "c", "d"], "PG"),
			cluster(1, &["e", "f", "g", "h"], "C"),
		];
		let graph = build(&clusters, viewport(), &LayoutConfig::default());
		assert!(graph.links.iter().all(|l| l.weight == 1.0));
	}

	#[test]
	fn cross_link_density_is_configurable() {
		let clusters = [
			cluster(0, &["a", "b", "c", "d"], "SF"),
			cluster(1, &["e", "f", "g", "h"], "SF"),
		];
		let config = LayoutConfig {
			cross_link_modulus: 1,
			cross_link_weight: 0.25,
			..Default::default()
		};
		let graph = build(&clusters, viewport(), &config);
		assert_eq!(graph.links.iter().filter(|l| l.weight == 0.25).count(), 8);
	}

	#[test]
	fn seeding_is_deterministic() {
		let clusters = [cluster(0, &["a", "b", "c"], "PG")];
		let a = build(&clusters, viewport(), &LayoutConfig::default());
		let b = build(&clusters, viewport(), &LayoutConfig::default());
		for (n, m) in a.nodes.iter().zip(&b.nodes) {
			assert_eq!((n.x, n.y), (m.x, m.y));
		}
		assert_ne!((a.nodes[0].x, a.nodes[0].y), (a.nodes[1].x, a.nodes[1].y));
	}

	proptest! {
		#[test]
		fn links_never_dangle(
			sizes in prop::collection::vec(0usize..12, 0..6),
			positions in prop::collection::vec(prop::sample::select(vec!["PG", "SF", "C"]), 12),
		) {
			let clusters: Vec<ClusterAssignment> = sizes
				.iter()
				.enumerate()
				.map(|(c, &size)| {
					let players = (0..size)
						.map(|i| player(&format!("c{c}p{i}"), positions[i]))
						.collect();
					ClusterAssignment::new(c as u32, players)
				})
				.collect();
			let graph = build(&clusters, viewport(), &LayoutConfig::default());
			let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
			for link in &graph.links {
				prop_assert!(ids.contains(link.source.as_str()));
				prop_assert!(ids.contains(link.target.as_str()));
			}
			prop_assert_eq!(graph.nodes.len(), sizes.iter().sum::<usize>());
		}
	}
}

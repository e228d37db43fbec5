use serde::Deserialize;

use crate::error::Result;

/// Tuning for graph building, the force simulation and the view.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Below this the simulation is settled.
	pub alpha_min: f64,
	pub alpha_decay: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Alpha target held while a node is dragged.
	pub drag_alpha_target: f64,
	/// Alpha floor applied when the viewport changes.
	pub resize_alpha: f64,

	pub intra_cluster_distance: f64,
	pub inter_cluster_distance: f64,
	/// Negative repels.
	pub charge_strength: f64,
	pub center_strength: f64,
	/// Collision radius as a fraction of the node radius.
	pub collision_scale: f64,
	pub collision_strength: f64,
	/// Alpha-scaled pull toward the cluster center.
	pub cluster_pull: f64,
	/// Positional anchoring toward the cluster center.
	pub cluster_anchor: f64,

	pub max_links_per_node: usize,
	/// Every n-th member of a cluster samples one cross-cluster partner.
	pub cross_link_modulus: usize,
	pub cross_link_weight: f64,
	/// Cluster ring radius as a fraction of the viewport.
	pub center_radius_fraction: f64,

	pub initial_zoom: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			alpha_min: 0.001,
			alpha_decay: 1.0 - 0.001f64.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			drag_alpha_target: 0.3,
			resize_alpha: 0.3,
			intra_cluster_distance: 10.0,
			inter_cluster_distance: 50.0,
			charge_strength: -20.0,
			center_strength: 0.1,
			collision_scale: 0.8,
			collision_strength: 1.0,
			cluster_pull: 0.5,
			cluster_anchor: 0.2,
			max_links_per_node: 5,
			cross_link_modulus: 3,
			cross_link_weight: 0.5,
			center_radius_fraction: 0.3,
			initial_zoom: 0.85,
			min_zoom: 0.5,
			max_zoom: 4.0,
		}
	}
}

impl LayoutConfig {
	/// Decode overrides; omitted keys keep their defaults.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

//! Player stat lines and cluster assignments as delivered by the stats service.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Per-game numbers for one player-season.
///
/// Every numeric field defaults to zero when the payload omits it, so partial
/// records from older seasons still decode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStatLine {
	pub player: String,
	pub player_id: String,
	pub season: String,
	pub position: String,
	pub team: String,
	pub age: f64,
	pub games_played: f64,
	pub games_started: f64,
	pub minutes_per_game: f64,
	pub points_per_game: f64,
	pub field_goals_per_game: f64,
	pub field_goal_attempts_per_game: f64,
	pub field_goal_percentage: f64,
	pub three_pointers_per_game: f64,
	pub three_point_attempts_per_game: f64,
	pub three_point_percentage: f64,
	pub two_pointers_per_game: f64,
	pub two_point_attempts_per_game: f64,
	pub two_point_percentage: f64,
	pub effective_field_goal_percentage: f64,
	pub free_throws_per_game: f64,
	pub free_throw_attempts_per_game: f64,
	pub free_throw_percentage: f64,
	pub offensive_rebounds_per_game: f64,
	pub defensive_rebounds_per_game: f64,
	pub total_rebounds_per_game: f64,
	pub assists_per_game: f64,
	pub steals_per_game: f64,
	pub blocks_per_game: f64,
	pub turnovers_per_game: f64,
	pub personal_fouls_per_game: f64,
}

impl PlayerStatLine {
	/// Composite identity used for graph nodes: `"{player}-{season}"`.
	pub fn node_id(&self) -> String {
		format!("{}-{}", self.player, self.season)
	}

	/// Decode a single stat line from JSON.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

/// One cluster from the similarity service: an id and its ordered members.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterAssignment {
	pub cluster_id: u32,
	#[serde(default)]
	pub players: Vec<PlayerStatLine>,
	/// Mean feature values of the cluster, keyed by stat name. Informational only.
	#[serde(default)]
	pub centroid: std::collections::BTreeMap<String, f64>,
}

impl ClusterAssignment {
	pub fn new(cluster_id: u32, players: Vec<PlayerStatLine>) -> Self {
		Self {
			cluster_id,
			players,
			centroid: Default::default(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.players.is_empty()
	}
}

/// Full response of a clustering request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusteringResult {
	#[serde(default)]
	pub clusters: Vec<ClusterAssignment>,
	#[serde(default)]
	pub season: String,
	#[serde(default)]
	pub num_clusters: usize,
}

impl ClusteringResult {
	/// Decode a clustering response. A mismatch between `num_clusters` and the
	/// clusters actually present is logged, not rejected.
	pub fn from_json(json: &str) -> Result<Self> {
		let result: Self = serde_json::from_str(json)?;
		if result.num_clusters != result.clusters.len() {
			log::warn!(
				"clustering result for {} declares {} clusters but carries {}",
				result.season,
				result.num_clusters,
				result.clusters.len()
			);
		}
		Ok(result)
	}
}

/// `"2023_24"` -> `"2023/24"`.
pub fn format_season(season: &str) -> String {
	season.replace('_', "/")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_stat_line_defaults_missing_fields() {
		let line = PlayerStatLine::from_json(
			r#"{"player": "Jalen Brunson", "season": "2023_24", "points_per_game": 28.7}"#,
		)
		.unwrap();
		assert_eq!(line.points_per_game, 28.7);
		assert_eq!(line.turnovers_per_game, 0.0);
		assert_eq!(line.position, "");
		assert_eq!(line.node_id(), "Jalen Brunson-2023_24");
	}

	#[test]
	fn clustering_result_decodes() {
		let json = r#"{
			"season": "2023_24",
			"num_clusters": 2,
			"clusters": [
				{"cluster_id": 0, "players": [{"player": "A", "position": "PG"}], "centroid": {"points_per_game": 12.5}},
				{"cluster_id": 1, "players": []}
			]
		}"#;
		let result = ClusteringResult::from_json(json).unwrap();
		assert_eq!(result.clusters.len(), 2);
		assert_eq!(result.clusters[0].players[0].position, "PG");
		assert_eq!(result.clusters[0].centroid["points_per_game"], 12.5);
		assert!(result.clusters[1].is_empty());
	}

	#[test]
	fn malformed_payload_is_an_error() {
		assert!(ClusteringResult::from_json("{\"clusters\": 3}").is_err());
		assert!(PlayerStatLine::from_json("not json").is_err());
	}

	#[test]
	fn season_labels() {
		assert_eq!(format_season("2023_24"), "2023/24");
		assert_eq!(format_season("2019"), "2019");
	}
}

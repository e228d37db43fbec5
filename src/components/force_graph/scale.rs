//! Color scales for clusters and positions. Pure lookups, no shared state.

/// Fill colors indexed by cluster id.
pub const CLUSTER_PALETTE: [&str; 8] = [
	"#3366CC", "#DC3912", "#FF9900", "#109618", "#990099", "#0099C6", "#DD4477", "#66AA00",
];

/// Outline colors, matched in order against the position string.
pub const POSITION_COLORS: [(&str, &str); 9] = [
	("C", "#E57373"),
	("PF", "#FFB74D"),
	("SF", "#FFF176"),
	("SG", "#81C784"),
	("PG", "#64B5F6"),
	("G", "#7986CB"),
	("F", "#BA68C8"),
	("F-C", "#A1887F"),
	("G-F", "#90A4AE"),
];

/// Positions shown in the legend.
pub const MAIN_POSITIONS: [&str; 5] = ["PG", "SG", "SF", "PF", "C"];

pub const DEFAULT_POSITION_COLOR: &str = "#BDBDBD";

/// Palette slot for a cluster. A zero-sized palette maps everything to slot 0.
pub fn color_for(cluster_id: u32, palette_size: usize) -> usize {
	if palette_size == 0 {
		return 0;
	}
	cluster_id as usize % palette_size
}

pub fn cluster_color(cluster_id: u32) -> &'static str {
	CLUSTER_PALETTE[color_for(cluster_id, CLUSTER_PALETTE.len())]
}

/// First entry whose key occurs in `position`; gray when none does.
pub fn position_color(position: &str) -> &'static str {
	POSITION_COLORS
		.iter()
		.find(|(key, _)| position.contains(key))
		.map(|&(_, color)| color)
		.unwrap_or(DEFAULT_POSITION_COLOR)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clusters_wrap_around_the_palette() {
		assert_eq!(color_for(3, 8), 3);
		assert_eq!(color_for(9, 8), 1);
		assert_eq!(color_for(5, 0), 0);
		assert_eq!(cluster_color(8), cluster_color(0));
	}

	#[test]
	fn positions_match_in_order() {
		assert_eq!(position_color("C"), "#E57373");
		assert_eq!(position_color("PF"), "#FFB74D");
		assert_eq!(position_color("PG"), "#64B5F6");
		// "C" is checked before "F-C"
		assert_eq!(position_color("F-C"), "#E57373");
		assert_eq!(position_color("G-F"), "#7986CB");
		assert_eq!(position_color(""), DEFAULT_POSITION_COLOR);
		assert_eq!(position_color("UTIL"), DEFAULT_POSITION_COLOR);
	}
}

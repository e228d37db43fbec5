//! Five 0-100 skill ratings derived from a per-game stat line.
//!
//! The weights below are fixed: radar and bar charts elsewhere compare players
//! across seasons, so the scale must not drift.

use serde::Serialize;

use crate::stats::PlayerStatLine;

/// Normalized skill ratings for one player-season.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SkillRatingVector {
	pub scoring: u8,
	pub playmaking: u8,
	pub defense: u8,
	pub athleticism: u8,
	pub basketball_iq: u8,
}

impl SkillRatingVector {
	/// Category names in chart order.
	pub const CATEGORIES: [&'static str; 5] =
		["scoring", "playmaking", "defense", "athleticism", "basketball_iq"];

	/// `(category, rating)` pairs in chart order.
	pub fn entries(&self) -> [(&'static str, u8); 5] {
		let values = [
			self.scoring,
			self.playmaking,
			self.defense,
			self.athleticism,
			self.basketball_iq,
		];
		std::array::from_fn(|i| (Self::CATEGORIES[i], values[i]))
	}
}

/// Rate a stat line. Total and deterministic.
pub fn rate(stat: &PlayerStatLine) -> SkillRatingVector {
	let s = Sanitized::from(stat);
	SkillRatingVector {
		scoring: finish(scoring(&s)),
		playmaking: finish(playmaking(&s)),
		defense: finish(defense(&s)),
		athleticism: finish(athleticism(&s, &stat.position)),
		basketball_iq: finish(basketball_iq(&s)),
	}
}

/// Numeric inputs with non-finite values replaced by zero.
struct Sanitized {
	ppg: f64,
	apg: f64,
	spg: f64,
	bpg: f64,
	tov: f64,
	drb: f64,
	trb: f64,
	mpg: f64,
	pf: f64,
	fg_pct: f64,
	three_pct: f64,
	ft_pct: f64,
}

impl From<&PlayerStatLine> for Sanitized {
	fn from(stat: &PlayerStatLine) -> Self {
		let f = |v: f64| if v.is_finite() { v } else { 0.0 };
		Self {
			ppg: f(stat.points_per_game),
			apg: f(stat.assists_per_game),
			spg: f(stat.steals_per_game),
			bpg: f(stat.blocks_per_game),
			tov: f(stat.turnovers_per_game),
			drb: f(stat.defensive_rebounds_per_game),
			trb: f(stat.total_rebounds_per_game),
			mpg: f(stat.minutes_per_game),
			pf: f(stat.personal_fouls_per_game),
			fg_pct: f(stat.field_goal_percentage),
			three_pct: f(stat.three_point_percentage),
			ft_pct: f(stat.free_throw_percentage),
		}
	}
}

fn finish(score: f64) -> u8 {
	if score.is_nan() {
		return 0;
	}
	score.round().clamp(0.0, 100.0) as u8
}

/// `min(value / cap, 1) * 100`
fn capped(value: f64, cap: f64) -> f64 {
	(value / cap).min(1.0) * 100.0
}

/// Assists per turnover. With no turnovers the raw assist rate stands in.
fn assist_to_turnover(s: &Sanitized) -> f64 {
	if s.tov > 0.0 { s.apg / s.tov } else { s.apg }
}

fn scoring(s: &Sanitized) -> f64 {
	0.5 * capped(s.ppg, 30.0) + 0.3 * (s.fg_pct * 100.0) + 0.2 * (s.three_pct * 100.0)
}

fn playmaking(s: &Sanitized) -> f64 {
	0.7 * capped(s.apg, 10.0) + 0.3 * capped(assist_to_turnover(s), 4.0)
}

fn defense(s: &Sanitized) -> f64 {
	0.4 * capped(s.spg, 2.5) + 0.4 * capped(s.bpg, 2.5) + 0.2 * capped(s.drb, 8.0)
}

/// Expected rebounds for a position; bigs are held to a higher bar.
fn rebound_baseline(position: &str) -> f64 {
	if position.contains('C') {
		12.0
	} else if position.contains('F') {
		8.0
	} else {
		5.0
	}
}

fn athleticism(s: &Sanitized, position: &str) -> f64 {
	let minutes = (s.mpg / 36.0).min(1.0);
	let rebounding = s.trb / rebound_baseline(position);
	let stocks = (s.spg + s.bpg) / 3.0;
	(30.0 * minutes + 40.0 * rebounding + 30.0 * stocks).min(100.0)
}

fn basketball_iq(s: &Sanitized) -> f64 {
	let fouls_per_minute = if s.mpg > 0.0 { s.pf / s.mpg } else { 0.0 };
	let discipline = (100.0 - fouls_per_minute * 3600.0).max(0.0);
	0.4 * capped(assist_to_turnover(s), 4.0)
		+ 0.3 * (s.fg_pct * 100.0)
		+ 0.2 * (s.ft_pct * 100.0)
		+ 0.1 * discipline
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn line() -> PlayerStatLine {
		PlayerStatLine {
			player: "Test Guard".into(),
			season: "2023_24".into(),
			position: "PG".into(),
			..Default::default()
		}
	}

	#[test]
	fn scoring_scenario() {
		let stat = PlayerStatLine {
			points_per_game: 20.0,
			field_goal_percentage: 0.5,
			three_point_percentage: 0.4,
			..line()
		};
		assert_eq!(rate(&stat).scoring, 56);
	}

	#[test]
	fn zero_turnovers_uses_assist_rate() {
		let stat = PlayerStatLine {
			assists_per_game: 2.0,
			turnovers_per_game: 0.0,
			..line()
		};
		let r = rate(&stat);
		// 0.7 * 20 + 0.3 * 50
		assert_eq!(r.playmaking, 29);
		// 0.4 * 50 + discipline 0.1 * 100
		assert_eq!(r.basketball_iq, 30);
	}

	#[test]
	fn playmaking_caps_at_hundred() {
		let stat = PlayerStatLine {
			assists_per_game: 11.2,
			turnovers_per_game: 2.0,
			..line()
		};
		assert_eq!(rate(&stat).playmaking, 100);
	}

	#[test]
	fn defense_weights() {
		let stat = PlayerStatLine {
			steals_per_game: 1.25,
			blocks_per_game: 2.5,
			defensive_rebounds_per_game: 4.0,
			..line()
		};
		// 0.4 * 50 + 0.4 * 100 + 0.2 * 50
		assert_eq!(rate(&stat).defense, 70);
	}

	#[test]
	fn athleticism_uses_positional_baseline() {
		let base = PlayerStatLine {
			minutes_per_game: 36.0,
			total_rebounds_per_game: 6.0,
			..line()
		};
		let center = PlayerStatLine {
			position: "C".into(),
			..base.clone()
		};
		let forward = PlayerStatLine {
			position: "SF".into(),
			..base.clone()
		};
		// 30 + 40 * 6/12
		assert_eq!(rate(&center).athleticism, 50);
		// 30 + 40 * 6/8
		assert_eq!(rate(&forward).athleticism, 60);
		// 30 + 40 * 6/5 capped
		assert_eq!(rate(&base).athleticism, 78);
	}

	#[test]
	fn athleticism_clamps_at_hundred() {
		let stat = PlayerStatLine {
			minutes_per_game: 38.0,
			total_rebounds_per_game: 15.0,
			steals_per_game: 2.0,
			blocks_per_game: 3.0,
			position: "G".into(),
			..line()
		};
		assert_eq!(rate(&stat).athleticism, 100);
	}

	#[test]
	fn fouls_reduce_basketball_iq() {
		let clean = PlayerStatLine {
			minutes_per_game: 30.0,
			personal_fouls_per_game: 0.0,
			..line()
		};
		let hacker = PlayerStatLine {
			personal_fouls_per_game: 5.0,
			..clean.clone()
		};
		assert_eq!(rate(&clean).basketball_iq, 10);
		// 5/30 * 3600 = 600, discipline floors at zero
		assert_eq!(rate(&hacker).basketball_iq, 0);
	}

	#[test]
	fn zero_minutes_is_not_a_foul_rate() {
		let stat = PlayerStatLine {
			personal_fouls_per_game: 3.0,
			..line()
		};
		assert_eq!(rate(&stat).basketball_iq, 10);
	}

	#[test]
	fn non_finite_inputs_are_ignored() {
		let stat = PlayerStatLine {
			points_per_game: f64::NAN,
			turnovers_per_game: f64::INFINITY,
			assists_per_game: 5.0,
			..line()
		};
		let r = rate(&stat);
		assert_eq!(r.scoring, 0);
		assert!(r.playmaking <= 100);
	}

	#[test]
	fn entries_follow_chart_order() {
		let r = SkillRatingVector {
			scoring: 1,
			playmaking: 2,
			defense: 3,
			athleticism: 4,
			basketball_iq: 5,
		};
		let entries = r.entries();
		assert_eq!(entries[0], ("scoring", 1));
		assert_eq!(entries[4], ("basketball_iq", 5));
	}

	proptest! {
		#[test]
		fn every_rating_is_within_bounds(
			ppg in 0.0f64..45.0,
			apg in 0.0f64..15.0,
			tov in 0.0f64..6.0,
			spg in 0.0f64..4.0,
			bpg in 0.0f64..5.0,
			drb in 0.0f64..12.0,
			mpg in 0.0f64..48.0,
			pf in 0.0f64..6.0,
			fg in 0.0f64..=1.0,
			ft in 0.0f64..=1.0,
			position in prop::sample::select(vec!["PG", "SG", "SF", "PF", "C", "G-F", "F-C", ""]),
		) {
			let stat = PlayerStatLine {
				position: position.to_string(),
				points_per_game: ppg,
				assists_per_game: apg,
				turnovers_per_game: tov,
				steals_per_game: spg,
				blocks_per_game: bpg,
				defensive_rebounds_per_game: drb,
				total_rebounds_per_game: drb * 1.3,
				minutes_per_game: mpg,
				personal_fouls_per_game: pf,
				field_goal_percentage: fg,
				three_point_percentage: fg * 0.8,
				free_throw_percentage: ft,
				..Default::default()
			};
			let r = rate(&stat);
			for (_, value) in r.entries() {
				prop_assert!(value <= 100);
			}
		}
	}
}

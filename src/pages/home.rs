use leptos::prelude::*;

use crate::components::force_graph::ForceGraphCanvas;
use crate::components::force_graph::scale::cluster_color;
use crate::ratings::rate;
use crate::stats::{ClusterAssignment, PlayerStatLine, format_season};

const SEASON: &str = "2023_24";
const POSITIONS: [&str; 5] = ["PG", "SG", "SF", "PF", "C"];
const TEAMS: [&str; 6] = ["BOS", "DEN", "LAL", "MIL", "NYK", "OKC"];
const ROSTER_PREVIEW: usize = 5;

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// A synthetic player whose line leans toward the archetype of `cluster`.
fn sample_player(cluster: usize, i: usize, season: &str) -> PlayerStatLine {
	let seed = cluster * 97 + i * 13;
	let r = |k: usize| rand_simple(seed + k);
	// archetypes rotate through the positions so clusters look distinct
	let position = if r(0) < 0.7 {
		POSITIONS[cluster % POSITIONS.len()]
	} else {
		POSITIONS[(cluster + i) % POSITIONS.len()]
	};
	let big = matches!(position, "PF" | "C");
	let minutes = 12.0 + 24.0 * r(1);
	let drb = if big { 4.0 + 5.0 * r(5) } else { 1.5 + 3.0 * r(5) };
	let orb = if big { 1.0 + 2.5 * r(6) } else { 0.3 + r(6) };
	PlayerStatLine {
		player: format!("Player {}-{}", cluster + 1, i + 1),
		player_id: format!("p{cluster:02}{i:02}"),
		season: season.to_string(),
		position: position.to_string(),
		team: TEAMS[(cluster + i) % TEAMS.len()].to_string(),
		games_played: 40.0 + (40.0 * r(2)).round(),
		minutes_per_game: minutes,
		points_per_game: minutes * (0.3 + 0.5 * r(3)),
		field_goal_percentage: if big { 0.5 + 0.12 * r(4) } else { 0.41 + 0.08 * r(4) },
		three_point_percentage: if big { 0.2 * r(7) } else { 0.32 + 0.1 * r(7) },
		free_throw_percentage: 0.65 + 0.25 * r(8),
		defensive_rebounds_per_game: drb,
		offensive_rebounds_per_game: orb,
		total_rebounds_per_game: drb + orb,
		assists_per_game: if big { 1.0 + 3.0 * r(9) } else { 2.0 + 7.0 * r(9) },
		steals_per_game: 0.4 + 1.4 * r(10),
		blocks_per_game: if big { 0.6 + 2.0 * r(11) } else { 0.1 + 0.5 * r(11) },
		turnovers_per_game: 0.5 + 3.0 * r(12),
		personal_fouls_per_game: 1.0 + 2.5 * r(13),
		..Default::default()
	}
}

/// Stand-in for the clustering service: `num_clusters` groups of 6-14 players.
fn sample_clusters(season: &str, num_clusters: usize) -> Vec<ClusterAssignment> {
	(0..num_clusters)
		.map(|c| {
			let size = 6 + (rand_simple(c * 31) * 9.0) as usize;
			let players = (0..size).map(|i| sample_player(c, i, season)).collect();
			ClusterAssignment::new(c as u32, players)
		})
		.collect()
}

#[component]
fn ClusterCard(cluster: ClusterAssignment) -> impl IntoView {
	let color = format!("background-color: {}", cluster_color(cluster.cluster_id));
	let remaining = cluster.players.len().saturating_sub(ROSTER_PREVIEW);
	let preview = cluster
		.players
		.iter()
		.take(ROSTER_PREVIEW)
		.map(|p| {
			let r = rate(p);
			let summary = r
				.entries()
				.iter()
				.map(|(name, value)| format!("{name} {value}"))
				.collect::<Vec<_>>()
				.join(" · ");
			view! {
				<li>
					<strong>{p.player.clone()}</strong>
					" (" {p.position.clone()} ", " {p.team.clone()} ")"
					<div class="ratings">{summary}</div>
				</li>
			}
		})
		.collect_view();

	view! {
		<div class="cluster-card">
			<h3>
				<span class="swatch" style=color></span>
				{format!("Cluster {}", cluster.cluster_id)}
			</h3>
			<p>{format!("{} players", cluster.players.len())}</p>
			<ul>{preview}</ul>
			{(remaining > 0).then(|| view! { <p class="more">{format!("and {remaining} more")}</p> })}
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (num_clusters, set_num_clusters) = signal(4usize);
	let clusters = Signal::derive(move || sample_clusters(SEASON, num_clusters.get()));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<ForceGraphCanvas data=clusters fullscreen=true />
				<div class="graph-overlay">
					<h1>{format!("Player Clusters {}", format_season(SEASON))}</h1>
					<p class="subtitle">"Drag players to reposition. Scroll to zoom. Drag background to pan."</p>
					<label>
						"Clusters "
						<select on:change=move |ev| {
							if let Ok(n) = event_target_value(&ev).parse::<usize>() {
								set_num_clusters.set(n);
							}
						}>
							{(2..=8usize)
								.map(|n| {
									view! {
										<option value=n.to_string() selected=move || num_clusters.get() == n>
											{n}
										</option>
									}
								})
								.collect_view()}
						</select>
					</label>
					<div class="cluster-details">
						{move || {
							clusters
								.get()
								.into_iter()
								.map(|cluster| view! { <ClusterCard cluster=cluster /> })
								.collect_view()
						}}
					</div>
				</div>
			</div>
		</ErrorBoundary>
	}
}

//! Pipeline orchestration and the renderer hand-off. The dashboard
//! renderer gets plain serializable data with explicit named fields;
//! nothing here composes UI or regenerates plotting code.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::aggregate::{self, ScorerRow, ZoneCount, ZoneRect};
use crate::cache::TtlCache;
use crate::config::Settings;
use crate::fetch;
use crate::filename::{GoalEvent, ShotCategory};
use crate::files::{self, FileRef, VideoBuckets};
use crate::manifest::Manifest;
use crate::plot_source::{self, PlotSource, Point};

/// Everything a pitch renderer needs for one plot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PitchPlot {
    pub label: String,
    pub title: Option<String>,
    pub goals: Vec<Point>,
    pub assists: Vec<Point>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ZoneSummary {
    pub own: ZoneCount,
    pub conceded: ZoneCount,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamReport {
    pub team: String,
    pub plots: Vec<PitchPlot>,
    pub scorers: Vec<ScorerRow>,
    pub goals_per_scorer: Vec<(String, usize)>,
    pub video_labels: Vec<String>,
    pub category_counts: Vec<(ShotCategory, usize)>,
    pub zones: ZoneSummary,
}

/// The full renderer payload: per-team reports plus the league-wide zone
/// totals the summary bar shows.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardData {
    pub teams: Vec<String>,
    pub reports: Vec<TeamReport>,
    pub zone: ZoneRect,
    pub league_own: ZoneCount,
    pub league_conceded: ZoneCount,
}

/// Input to the pipeline, resolved by either listing mode.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub teams: Vec<String>,
    pub plot_files: HashMap<String, Vec<FileRef>>,
    pub videos: HashMap<String, VideoBuckets>,
    pub players: Vec<String>,
}

/// Listing from the local folder layout.
pub fn local_listing(settings: &Settings) -> Listing {
    let Some(base_dir) = settings.base_dir.as_deref() else {
        return Listing::default();
    };
    let index = files::list_teams_and_files(base_dir, &settings.preferred_team);
    let mut videos = HashMap::new();
    if let Some(videos_dir) = settings.videos_dir.as_deref() {
        for team in &index.teams {
            videos.insert(team.clone(), files::load_team_videos(videos_dir, team));
        }
    }
    let players = settings
        .players_dir
        .as_deref()
        .map(files::list_players)
        .unwrap_or_default();

    Listing {
        teams: index.teams,
        plot_files: index.plot_files,
        videos,
        players,
    }
}

/// Listing from the remote manifest.
pub fn manifest_listing(manifest: &Manifest, preferred: &str) -> Listing {
    let mut teams = manifest.teams();
    files::prefer_team(&mut teams, preferred);
    let plot_files = teams
        .iter()
        .map(|team| (team.clone(), manifest.team_plot_files(team)))
        .collect();
    let videos = teams
        .iter()
        .map(|team| (team.clone(), manifest.team_videos(team)))
        .collect();

    Listing {
        teams,
        plot_files,
        videos,
        players: manifest.players(),
    }
}

/// Runs the full pipeline over a listing. Per-file failures degrade to
/// empty data; this never returns an error.
pub fn build_dashboard(listing: &Listing, cache: &TtlCache, zone: ZoneRect) -> DashboardData {
    let mut data = DashboardData {
        teams: listing.teams.clone(),
        zone,
        ..DashboardData::default()
    };
    for team in &listing.teams {
        let report = build_team_report(listing, cache, team, zone);
        data.league_own.accumulate(report.zones.own);
        data.league_conceded.accumulate(report.zones.conceded);
        data.reports.push(report);
    }
    data
}

pub fn build_team_report(
    listing: &Listing,
    cache: &TtlCache,
    team: &str,
    zone: ZoneRect,
) -> TeamReport {
    let plot_files = listing.plot_files.get(team).cloned().unwrap_or_default();
    let plots = plot_files
        .iter()
        .map(|file| {
            let source = read_plot_source(cache, file);
            PitchPlot {
                label: file.display_label(),
                title: source.title,
                goals: source.goals,
                assists: source.assists,
            }
        })
        .collect();

    let videos = listing.videos.get(team).cloned().unwrap_or_default();
    let events: Vec<GoalEvent> = videos
        .all()
        .iter()
        .map(|file| GoalEvent::from_file_name(&file.name()))
        .collect();
    let scorers = aggregate::scorer_table(&events);
    let goals_per_scorer = aggregate::goals_per_scorer(&scorers);
    let video_labels = aggregate::build_labels(&events);
    let totals = aggregate::category_totals(&events);
    let category_counts = ShotCategory::ALL
        .iter()
        .map(|cat| (*cat, totals.get(cat).copied().unwrap_or(0)))
        .collect();

    let own_points = collect_goal_points(cache, &files::own_goal_files(&plot_files));
    let conceded_points = collect_goal_points(cache, &files::conceded_goal_files(&plot_files));

    TeamReport {
        team: team.to_string(),
        plots,
        scorers,
        goals_per_scorer,
        video_labels,
        category_counts,
        zones: ZoneSummary {
            own: aggregate::zone_split(&own_points, zone),
            conceded: aggregate::zone_split(&conceded_points, zone),
        },
    }
}

/// A fetch or parse failure on one file yields the empty triple; the rest
/// of the dashboard is unaffected.
fn read_plot_source(cache: &TtlCache, file: &FileRef) -> PlotSource {
    match fetch::file_text(cache, file) {
        Ok(src) => plot_source::parse_plot_source(&src),
        Err(err) => {
            warn!(file = %file.name(), "plot source unavailable: {err:#}");
            PlotSource::default()
        }
    }
}

fn collect_goal_points(cache: &TtlCache, files: &[FileRef]) -> Vec<Point> {
    files
        .iter()
        .flat_map(|file| read_plot_source(cache, file).goals)
        .collect()
}

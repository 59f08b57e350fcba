//! Squad data scraped from the federation's team page (card tallies for
//! the suspension warning) and the age statistics the comparison view
//! shows. The spreadsheet/HTTP readers live elsewhere; everything here is
//! pure over already-fetched input.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// Per-player card tallies from the federation squad page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SquadPlayer {
    pub name: String,
    pub yellow: u32,
    pub yellow_red: u32,
    pub red: u32,
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Yellow,
    YellowRed,
    Red,
}

impl SquadPlayer {
    pub fn count(&self, kind: CardKind) -> u32 {
        match kind {
            CardKind::Yellow => self.yellow,
            CardKind::YellowRed => self.yellow_red,
            CardKind::Red => self.red,
        }
    }
}

static PRELOAD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)SG\.container\.appPreloads\[\s*'(\d+)'\s*\]\s*=\s*(\[.*?\]);")
        .expect("preload pattern")
});

static PLAYER_OBJECT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\{[^{}]*?"spielerName"\s*:\s*"([^"]+)"[^{}]*?\}"#).expect("player object pattern")
});

static CARD_FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(kartenGelb|kartenGelbRot|kartenRot)"\s*:\s*(\d+)"#).expect("card field pattern")
});

static PROFILE_FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""spielerProfilUrl"\s*:\s*"([^"]*)""#).expect("profile field pattern")
});

/// Extracts the squad from a team page: the script-preload JSON first,
/// then a tolerant per-object scan. Either strategy failing means an
/// empty list, never an error.
pub fn extract_squad(html: &str) -> Vec<SquadPlayer> {
    if let Some(players) = squad_from_preload(html) {
        if !players.is_empty() {
            return players;
        }
    }
    squad_from_object_scan(html)
}

fn squad_from_preload(html: &str) -> Option<Vec<SquadPlayer>> {
    let caps = PRELOAD_RE.captures(html)?;
    let data: Value = serde_json::from_str(caps.get(2)?.as_str()).ok()?;
    for item in data.as_array()? {
        if let Some(kader) = item.get("kader").and_then(|v| v.as_array()) {
            return Some(kader.iter().filter_map(parse_squad_entry).collect());
        }
    }
    None
}

fn parse_squad_entry(value: &Value) -> Option<SquadPlayer> {
    let name = value.get("spielerName")?.as_str()?.trim().to_string();
    if name.is_empty() {
        return None;
    }
    Some(SquadPlayer {
        name,
        yellow: card_count(value, "kartenGelb"),
        yellow_red: card_count(value, "kartenGelbRot"),
        red: card_count(value, "kartenRot"),
        profile_url: value
            .get("spielerProfilUrl")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    })
}

/// Card fields arrive as numbers or numeric strings depending on the page
/// build; anything else counts as zero.
fn card_count(value: &Value, key: &str) -> u32 {
    let Some(v) = value.get(key) else {
        return 0;
    };
    if let Some(n) = v.as_u64() {
        return n as u32;
    }
    v.as_str()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

fn squad_from_object_scan(html: &str) -> Vec<SquadPlayer> {
    let mut order: Vec<String> = Vec::new();
    let mut merged: HashMap<String, SquadPlayer> = HashMap::new();

    for caps in PLAYER_OBJECT_RE.captures_iter(html) {
        let object = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
        let name = caps[1].trim().to_string();
        let mut player = SquadPlayer {
            name: name.clone(),
            ..SquadPlayer::default()
        };
        for field in CARD_FIELD_RE.captures_iter(object) {
            let count = field[2].parse::<u32>().unwrap_or(0);
            match &field[1] {
                "kartenGelb" => player.yellow = count,
                "kartenGelbRot" => player.yellow_red = count,
                _ => player.red = count,
            }
        }
        player.profile_url = PROFILE_FIELD_RE
            .captures(object)
            .map(|m| m[1].trim().to_string())
            .filter(|s| !s.is_empty());

        match merged.get_mut(&name) {
            Some(existing) => {
                // Duplicate rows keep the highest tally seen.
                existing.yellow = existing.yellow.max(player.yellow);
                existing.yellow_red = existing.yellow_red.max(player.yellow_red);
                existing.red = existing.red.max(player.red);
                if player.profile_url.is_some() {
                    existing.profile_url = player.profile_url;
                }
            }
            None => {
                order.push(name.clone());
                merged.insert(name, player);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|name| merged.remove(&name))
        .collect()
}

/// Players at or over the threshold for the chosen card kind, highest
/// tally first, ties by name.
pub fn card_warnings(players: &[SquadPlayer], kind: CardKind, threshold: u32) -> Vec<SquadPlayer> {
    let mut hits: Vec<SquadPlayer> = players
        .iter()
        .filter(|p| p.count(kind) >= threshold)
        .cloned()
        .collect();
    hits.sort_by(|a, b| {
        b.count(kind)
            .cmp(&a.count(kind))
            .then_with(|| a.name.cmp(&b.name))
    });
    hits
}

/// Birth-quarter distribution over a squad (Q1 = Jan-Mar .. Q4 = Oct-Dec).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuarterCounts {
    pub q1: usize,
    pub q2: usize,
    pub q3: usize,
    pub q4: usize,
    pub total: usize,
}

pub fn birth_quarter_counts(birth_dates: &[NaiveDate]) -> QuarterCounts {
    let mut counts = QuarterCounts::default();
    for date in birth_dates {
        match (date.month() - 1) / 3 {
            0 => counts.q1 += 1,
            1 => counts.q2 += 1,
            2 => counts.q3 += 1,
            _ => counts.q4 += 1,
        }
        counts.total += 1;
    }
    counts
}

/// Mean age in years as of `as_of`; None for an empty squad.
pub fn average_age(birth_dates: &[NaiveDate], as_of: NaiveDate) -> Option<f64> {
    if birth_dates.is_empty() {
        return None;
    }
    let sum: f64 = birth_dates
        .iter()
        .map(|date| (as_of - *date).num_days() as f64 / 365.25)
        .sum();
    Some(sum / birth_dates.len() as f64)
}

/// One row of the age comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAgeRow {
    pub team: String,
    pub average_age: f64,
    pub quarters: QuarterCounts,
}

/// Rows sorted by ascending average age, the order the comparison chart
/// uses. Teams with no usable birth dates are left out.
pub fn team_age_rows(squads: &[(String, Vec<NaiveDate>)], as_of: NaiveDate) -> Vec<TeamAgeRow> {
    let mut rows: Vec<TeamAgeRow> = squads
        .iter()
        .filter_map(|(team, dates)| {
            average_age(dates, as_of).map(|avg| TeamAgeRow {
                team: team.clone(),
                average_age: avg,
                quarters: birth_quarter_counts(dates),
            })
        })
        .collect();
    rows.sort_by(|a, b| {
        a.average_age
            .total_cmp(&b.average_age)
            .then_with(|| a.team.cmp(&b.team))
    });
    rows
}

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::filename::{GoalEvent, ShotCategory};
use crate::plot_source::Point;

/// Nominal pitch rectangle in meters. Points outside are discarded by the
/// zone counters rather than classified as "outside".
pub const PITCH_X: (f64, f64) = (0.0, 68.0);
pub const PITCH_Y: (f64, f64) = (0.0, 100.0);

/// Axis-aligned rectangle in pitch coordinates, inclusive on all four
/// edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneRect {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for ZoneRect {
    fn default() -> Self {
        ZoneRect::DEFAULT
    }
}

impl ZoneRect {
    /// The red box in front of goal the coaches track: width of the
    /// five-meter box, from the byline down to the sixteen.
    pub const DEFAULT: ZoneRect = ZoneRect {
        x_min: 24.0,
        x_max: 42.0,
        y_min: 84.0,
        y_max: 100.0,
    };

    pub fn contains(&self, (x, y): Point) -> bool {
        self.x_min <= x && x <= self.x_max && self.y_min <= y && y <= self.y_max
    }
}

/// Inside/outside split for one team's goal points. `total` only counts
/// points inside the nominal pitch, so `inside + outside == total` always
/// holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ZoneCount {
    pub inside: usize,
    pub outside: usize,
    pub total: usize,
}

impl ZoneCount {
    pub fn accumulate(&mut self, other: ZoneCount) {
        self.inside += other.inside;
        self.outside += other.outside;
        self.total += other.total;
    }
}

/// One row of the scorer table: the files attributable to one player,
/// category, team and opponent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorerRow {
    pub scorer: String,
    pub goals: usize,
    pub category: ShotCategory,
    pub team: String,
    pub opponent: String,
    pub files: Vec<String>,
}

type ScorerKey = (String, ShotCategory, String, String);

/// Groups the events that actually name a scorer by (scorer, category,
/// team, opponent); rows appear in first-encounter order. Events without
/// a scorer are left to the independent category totals.
pub fn scorer_table(events: &[GoalEvent]) -> Vec<ScorerRow> {
    let mut order: Vec<ScorerKey> = Vec::new();
    let mut files: HashMap<ScorerKey, Vec<String>> = HashMap::new();

    for event in events {
        let Some(scorer) = event.named_scorer() else {
            continue;
        };
        let key = (
            scorer.to_string(),
            event.category,
            event.team.clone(),
            event.opponent.clone(),
        );
        match files.get_mut(&key) {
            Some(list) => list.push(event.file.clone()),
            None => {
                files.insert(key.clone(), vec![event.file.clone()]);
                order.push(key);
            }
        }
    }

    order
        .into_iter()
        .map(|key| {
            let list = files.remove(&key).unwrap_or_default();
            ScorerRow {
                scorer: key.0,
                goals: list.len(),
                category: key.1,
                team: key.2,
                opponent: key.3,
                files: list,
            }
        })
        .collect()
}

/// Goals per player summed across categories and opponents, most first,
/// ties by name.
pub fn goals_per_scorer(rows: &[ScorerRow]) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in rows {
        if !counts.contains_key(&row.scorer) {
            order.push(row.scorer.clone());
        }
        *counts.entry(row.scorer.clone()).or_insert(0) += row.goals;
    }
    let mut out: Vec<(String, usize)> = order
        .into_iter()
        .map(|name| {
            let count = counts[&name];
            (name, count)
        })
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Simple per-category counting over all events, scorer or not.
pub fn category_totals(events: &[GoalEvent]) -> HashMap<ShotCategory, usize> {
    let mut totals = HashMap::new();
    for event in events {
        *totals.entry(event.category).or_insert(0) += 1;
    }
    totals
}

const ROMAN: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Standard subtractive notation. Zero falls through to "I", which is what
/// the label code has always produced for an empty accumulator.
pub fn int_to_roman(mut n: u32) -> String {
    let mut out = String::new();
    for (value, symbol) in ROMAN {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    if out.is_empty() { "I".to_string() } else { out }
}

/// Human-distinguishing labels: files colliding on (team, category,
/// opponent) get Roman numerals in encounter order, plus the scorer when
/// the name carries one.
pub fn build_labels(events: &[GoalEvent]) -> Vec<String> {
    let mut counters: HashMap<(String, ShotCategory, String), u32> = HashMap::new();
    events
        .iter()
        .map(|event| {
            let key = (event.team.clone(), event.category, event.opponent.clone());
            let n = counters.entry(key).or_insert(0);
            *n += 1;
            let base = format!(
                "{} {} vs. {} {}",
                event.team,
                event.category.label(),
                event.opponent,
                int_to_roman(*n)
            );
            match event.named_scorer() {
                Some(scorer) => format!("{base} – {scorer}"),
                None => base,
            }
        })
        .collect()
}

/// Collapses near-duplicate float coordinates by rounding both components
/// to three decimals; the first occurrence wins and keeps its un-rounded
/// value.
pub fn dedupe_points(points: &[Point]) -> Vec<Point> {
    let mut seen: HashSet<(i64, i64)> = HashSet::new();
    let mut unique = Vec::new();
    for &(x, y) in points {
        if seen.insert((round_key(x), round_key(y))) {
            unique.push((x, y));
        }
    }
    unique
}

fn round_key(value: f64) -> i64 {
    (value * 1000.0).round() as i64
}

pub fn on_pitch((x, y): Point) -> bool {
    PITCH_X.0 <= x && x <= PITCH_X.1 && PITCH_Y.0 <= y && y <= PITCH_Y.1
}

/// Dedupes, drops off-pitch points entirely, then splits the survivors on
/// the zone rectangle.
pub fn zone_split(points: &[Point], zone: ZoneRect) -> ZoneCount {
    let pts: Vec<Point> = dedupe_points(points)
        .into_iter()
        .filter(|&p| on_pitch(p))
        .collect();
    let inside = pts.iter().filter(|&&p| zone.contains(p)).count();
    ZoneCount {
        inside,
        outside: pts.len() - inside,
        total: pts.len(),
    }
}

/// League-wide totals plus the per-team breakdown for the detail view.
pub fn zone_split_all_teams(
    per_team_points: &[(String, Vec<Point>)],
    zone: ZoneRect,
) -> (ZoneCount, Vec<(String, ZoneCount)>) {
    let mut totals = ZoneCount::default();
    let mut rows = Vec::new();
    for (team, points) in per_team_points {
        let split = zone_split(points, zone);
        totals.accumulate(split);
        rows.push((team.clone(), split));
    }
    (totals, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roman_zero_stays_i() {
        // Looks unintentional, but it is what the labels have always shown.
        assert_eq!(int_to_roman(0), "I");
    }

    #[test]
    fn roman_subtractive_forms() {
        assert_eq!(int_to_roman(4), "IV");
        assert_eq!(int_to_roman(9), "IX");
        assert_eq!(int_to_roman(14), "XIV");
        assert_eq!(int_to_roman(39), "XXXIX");
        assert_eq!(int_to_roman(1994), "MCMXCIV");
    }

    #[test]
    fn round_key_collapses_float_noise() {
        assert_eq!(round_key(35.0), round_key(35.0000001));
        assert_ne!(round_key(35.0), round_key(35.002));
    }
}

//! Best-effort next-opponent detection from the league portal's schedule
//! pages. The contract is deliberately narrow: a matched team name, or
//! nothing. The patterns are fragile by nature and not worth generalizing.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::cache::TtlCache;
use crate::fetch;
use crate::files::{normalize_name, strip_tokens};

/// A schedule row scraped from the portal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScheduledMatch {
    pub date: NaiveDate,
    pub home: String,
    pub away: String,
}

const DATE_PAT: &str =
    r"(?:Mo|Di|Mi|Do|Fr|Sa|So)?,?\s*\d{1,2}\.\d{1,2}\.(?:\d{2,4})?(?:\s+\d{1,2}:\d{2})?";
const TEAM_PAT: &str = r"[A-Za-zÄÖÜäöüß0-9.\-/&() ]{2,90}";
const SEP_PAT: &str = r"(?:-|–|—|:|vs\.?)";

static MATCH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        format!(r"(?s)(?P<date>{DATE_PAT}).{{0,240}}?(?P<home>{TEAM_PAT})\s*{SEP_PAT}\s*(?P<away>{TEAM_PAT})"),
        format!(r"(?s)(?P<home>{TEAM_PAT})\s*{SEP_PAT}\s*(?P<away>{TEAM_PAT}).{{0,240}}?(?P<date>{DATE_PAT})"),
        format!(r"(?s)(?P<date>\d{{1,2}}\.\d{{1,2}}\.(?:\d{{2,4}})?).{{0,200}}?(?P<home>{TEAM_PAT})\s*</?(?:td|span|div)[^>]*>.*?{SEP_PAT}.*?(?P<away>{TEAM_PAT})"),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("schedule pattern"))
    .collect()
});

static DM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2})\.(\d{1,2})\.$").expect("d.m."));
static DMY4_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{4})$").expect("d.m.yyyy"));
static DMY2_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{2})$").expect("d.m.yy"));

/// Loose date recognition over the formats the portal mixes: `dd.mm.`
/// (current year), `dd.mm.yyyy`, `dd.mm.yy` (2000+yy). Anything else,
/// including strings with weekday or kickoff-time decoration, is None.
pub fn parse_date_loose(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Some(caps) = DM_RE.captures(raw) {
        return ymd(today.year(), &caps[2], &caps[1]);
    }
    if let Some(caps) = DMY4_RE.captures(raw) {
        return ymd(caps[3].parse().ok()?, &caps[2], &caps[1]);
    }
    if let Some(caps) = DMY2_RE.captures(raw) {
        let yy: i32 = caps[3].parse().ok()?;
        return ymd(2000 + yy, &caps[2], &caps[1]);
    }
    None
}

fn ymd(year: i32, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

/// All future fixtures mentioning one of the aliases, deduped and sorted
/// by date. Pure over (html, aliases, today); callers inject the date.
pub fn extract_matches(html: &str, aliases: &[String], today: NaiveDate) -> Vec<ScheduledMatch> {
    let alias_norms: Vec<String> = aliases
        .iter()
        .map(|a| strip_tokens(&normalize_name(a)).to_string())
        .filter(|a| !a.is_empty())
        .collect();

    let mut found = BTreeSet::new();
    for pattern in MATCH_PATTERNS.iter() {
        for caps in pattern.captures_iter(html) {
            let Some(date) = parse_date_loose(&caps["date"], today) else {
                continue;
            };
            if date < today {
                continue;
            }
            let home = collapse_ws(&caps["home"]);
            let away = collapse_ws(&caps["away"]);
            let hn = strip_tokens(&normalize_name(&home)).to_string();
            let an = strip_tokens(&normalize_name(&away)).to_string();
            let hit = alias_norms.iter().any(|al| {
                hn.contains(al.as_str())
                    || an.contains(al.as_str())
                    || al.contains(&hn)
                    || al.contains(&an)
            });
            if hit {
                found.insert(ScheduledMatch { date, home, away });
            }
        }
    }
    found.into_iter().collect()
}

/// Fetches every configured schedule page and returns the next opponent's
/// portal name, or None. A page that fails to load is skipped.
pub fn next_opponent(
    cache: &TtlCache,
    schedule_urls: &[String],
    aliases: &[String],
    today: NaiveDate,
) -> Option<String> {
    let mut all: Vec<ScheduledMatch> = Vec::new();
    for url in schedule_urls {
        match fetch::fetch_text_cached(cache, url) {
            Ok(html) => all.extend(extract_matches(&html, aliases, today)),
            Err(err) => {
                warn!(url = url.as_str(), "schedule fetch failed: {err:#}");
            }
        }
    }
    all.sort();
    all.dedup();
    choose_opponent(&all, aliases)
}

/// The other side of the earliest fixture: away when the home side matches
/// one of our aliases, home otherwise.
pub fn choose_opponent(matches: &[ScheduledMatch], aliases: &[String]) -> Option<String> {
    let next = matches.first()?;
    let alias_norms: Vec<String> = aliases
        .iter()
        .map(|a| strip_tokens(&normalize_name(a)).to_string())
        .filter(|a| !a.is_empty())
        .collect();
    let hn = strip_tokens(&normalize_name(&next.home)).to_string();
    let home_is_us = alias_norms
        .iter()
        .any(|al| hn.contains(al.as_str()) || al.contains(&hn));
    Some(if home_is_us {
        next.away.clone()
    } else {
        next.home.clone()
    })
}

/// Maps a portal team name onto one of the listed team folders: exact
/// matches (raw and prefix-stripped) first, then prefix/containment both
/// ways.
pub fn map_to_existing_team(name: &str, teams: &[String]) -> Option<String> {
    if name.trim().is_empty() {
        return None;
    }
    let nn = strip_tokens(&normalize_name(name)).to_string();
    for team in teams {
        if normalize_name(team) == normalize_name(name)
            || strip_tokens(&normalize_name(team)) == nn
        {
            return Some(team.clone());
        }
    }
    for team in teams {
        let tn = strip_tokens(&normalize_name(team)).to_string();
        if tn.starts_with(&nn) || nn.starts_with(&tn) || tn.contains(&nn) || nn.contains(&tn) {
            return Some(team.clone());
        }
    }
    None
}

fn collapse_ws(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

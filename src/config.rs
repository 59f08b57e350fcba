use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::aggregate::ZoneRect;
use crate::files::{normalize_name, strip_tokens};

const DEFAULT_SCHEDULE_URLS: [&str; 2] = [
    "https://www.ligaportal.at/regionalliga-mitte/spielplan",
    "https://www.ligaportal.at/oberoesterreich/regionalliga-mitte/spielplan",
];

/// Spellings the portal uses for our own team; anything else falls back to
/// normalized-name matching.
const JWR_SYNONYMS: [&str; 9] = [
    "JWR",
    "Junge Wikinger Ried",
    "SV Oberbank Ried Amat",
    "SV Oberbank Ried Amateure",
    "SV Ried Amateure",
    "SV Ried II",
    "SV Ried Amat.",
    "Ried Amateure",
    "J. Wikinger Ried",
];

/// Runtime settings, read from the environment; the binary loads `.env`
/// first. Presence of a manifest URL switches listing to manifest mode.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_dir: Option<PathBuf>,
    pub videos_dir: Option<PathBuf>,
    pub players_dir: Option<PathBuf>,
    pub manifest_url: Option<String>,
    pub squad_url: Option<String>,
    pub preferred_team: String,
    pub schedule_urls: Vec<String>,
    pub team_synonyms: HashMap<String, Vec<String>>,
    pub zone: ZoneRect,
    pub card_threshold: u32,
    pub manifest_ttl: Duration,
    pub text_ttl: Duration,
    pub opponent_ttl: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        let mut team_synonyms = HashMap::new();
        team_synonyms.insert(
            "JWR".to_string(),
            JWR_SYNONYMS.iter().map(|s| s.to_string()).collect(),
        );

        Settings {
            base_dir: opt_env("APP_BASE_DIR").map(PathBuf::from),
            videos_dir: opt_env("APP_VIDEOS_DIR").map(PathBuf::from),
            players_dir: opt_env("APP_PLAYERS_DIR").map(PathBuf::from),
            manifest_url: opt_env("APP_MANIFEST_URL"),
            squad_url: opt_env("APP_SQUAD_URL"),
            preferred_team: opt_env("APP_PREFERRED_TEAM").unwrap_or_else(|| "JWR".to_string()),
            schedule_urls: list_env_or_default("APP_SCHEDULE_URLS", &DEFAULT_SCHEDULE_URLS),
            team_synonyms,
            zone: opt_env("APP_ZONE")
                .and_then(|raw| parse_zone(&raw))
                .unwrap_or(ZoneRect::DEFAULT),
            card_threshold: env_u32("APP_CARD_THRESHOLD", 4).clamp(1, 20),
            manifest_ttl: env_secs("APP_MANIFEST_TTL_SECS", 300, 30, 86_400),
            text_ttl: env_secs("APP_TEXT_TTL_SECS", 3600, 30, 86_400),
            opponent_ttl: env_secs("APP_OPPONENT_TTL_SECS", 900, 30, 86_400),
        }
    }

    pub fn use_manifest(&self) -> bool {
        self.manifest_url.is_some()
    }

    /// Known synonyms plus the team itself, or the raw and prefix-stripped
    /// spellings when we know nothing else.
    pub fn aliases_for(&self, team: &str) -> Vec<String> {
        if let Some(synonyms) = self.team_synonyms.get(team) {
            let mut aliases = synonyms.clone();
            if !aliases.iter().any(|a| a == team) {
                aliases.push(team.to_string());
            }
            return aliases;
        }
        let mut aliases = vec![team.to_string()];
        let stripped = strip_tokens(&normalize_name(team)).to_string();
        if !stripped.is_empty() && stripped != team.to_lowercase() {
            aliases.push(stripped);
        }
        aliases
    }
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|val| {
        if val.trim().is_empty() {
            None
        } else {
            Some(val.trim().to_string())
        }
    })
}

fn env_u32(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn env_secs(key: &str, default: u64, min: u64, max: u64) -> Duration {
    let secs = env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(default)
        .clamp(min, max);
    Duration::from_secs(secs)
}

fn list_env_or_default(key: &str, defaults: &[&str]) -> Vec<String> {
    match opt_env(key) {
        Some(raw) => raw
            .split([',', ';'])
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        None => defaults.iter().map(|s| s.to_string()).collect(),
    }
}

/// "x_min,x_max,y_min,y_max"
fn parse_zone(raw: &str) -> Option<ZoneRect> {
    let parts: Vec<f64> = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;
    if parts.len() != 4 {
        return None;
    }
    Some(ZoneRect {
        x_min: parts[0],
        x_max: parts[1],
        y_min: parts[2],
        y_max: parts[3],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_parsing() {
        let zone = parse_zone("24, 42, 84, 100").unwrap();
        assert_eq!(zone, ZoneRect::DEFAULT);
        assert!(parse_zone("24,42,84").is_none());
        assert!(parse_zone("24,42,84,oops").is_none());
    }

    #[test]
    fn aliases_fall_back_to_stripped_name() {
        let settings = Settings::from_env();
        let aliases = settings.aliases_for("SV Voitsberg");
        assert!(aliases.contains(&"SV Voitsberg".to_string()));
        assert!(aliases.contains(&"voitsberg".to_string()));

        let own = settings.aliases_for("JWR");
        assert!(own.contains(&"Junge Wikinger Ried".to_string()));
        assert!(own.contains(&"JWR".to_string()));
    }
}

use std::fs;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use chrono::Utc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use rlm_dashboard::cache::TtlCache;
use rlm_dashboard::config::Settings;
use rlm_dashboard::report::{self, Listing};
use rlm_dashboard::squad::{self, CardKind};
use rlm_dashboard::{export, manifest, opponent};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = Settings::from_env();
    let text_cache = TtlCache::new(settings.text_ttl);

    let listing = resolve_listing(&settings)?;
    let data = report::build_dashboard(&listing, &text_cache, settings.zone);

    println!("Teams: {}", data.teams.join(", "));
    if !listing.players.is_empty() {
        println!("Individuelle Analysen: {} Spieler", listing.players.len());
    }
    println!();

    for team_report in &data.reports {
        println!("== {} ==", team_report.team);
        for (category, count) in &team_report.category_counts {
            if *count > 0 {
                println!("  {} ({count})", category.bucket());
            }
        }
        for (name, count) in &team_report.goals_per_scorer {
            println!(
                "  {name} ({count} {})",
                if *count == 1 { "Tor" } else { "Tore" }
            );
        }
        let zones = &team_report.zones;
        println!(
            "  Eigene Zonentore: {} innen, {} außerhalb (gesamt {})",
            zones.own.inside, zones.own.outside, zones.own.total
        );
        println!(
            "  Gegentore in Zone: {} innen, {} außerhalb (gesamt {})",
            zones.conceded.inside, zones.conceded.outside, zones.conceded.total
        );
    }

    println!();
    println!(
        "Eigene Zonentore (x {}-{}, y {}-{}): {} innen / {} außerhalb",
        data.zone.x_min,
        data.zone.x_max,
        data.zone.y_min,
        data.zone.y_max,
        data.league_own.inside,
        data.league_own.outside
    );
    println!(
        "Gegentore in Zone: {} innen / {} außerhalb",
        data.league_conceded.inside, data.league_conceded.outside
    );

    if flag_present("--next-opponent") {
        report_next_opponent(&settings, &data.teams);
    }

    if let Some(url) = settings.squad_url.as_deref() {
        report_card_warnings(&text_cache, url, settings.card_threshold);
    }

    if let Some(path) = parse_path_arg("--json") {
        let json = serde_json::to_string_pretty(&data)?;
        fs::write(&path, json)?;
        println!("Dashboard-Daten geschrieben: {}", path.display());
    }

    if let Some(path) = parse_path_arg("--export") {
        let summary = export::export_dashboard(&path, &data, &[])?;
        println!(
            "Export: {} Torschützen, {} Zonen-Zeilen, {} Kategorie-Zeilen -> {}",
            summary.scorer_rows,
            summary.zone_rows,
            summary.category_rows,
            path.display()
        );
    }

    Ok(())
}

fn resolve_listing(settings: &Settings) -> Result<Listing> {
    if let Some(url) = settings.manifest_url.as_deref() {
        let manifest_cache = TtlCache::new(settings.manifest_ttl);
        return match manifest::load_manifest(&manifest_cache, url) {
            Ok(man) => Ok(report::manifest_listing(&man, &settings.preferred_team)),
            Err(err) => {
                warn!("manifest unavailable: {err:#}");
                Ok(Listing::default())
            }
        };
    }
    if settings.base_dir.is_some() {
        return Ok(report::local_listing(settings));
    }
    Err(anyhow!("set APP_BASE_DIR or APP_MANIFEST_URL"))
}

fn report_next_opponent(settings: &Settings, teams: &[String]) {
    let cache = TtlCache::new(settings.opponent_ttl);
    let today = Utc::now().date_naive();
    let aliases = settings.aliases_for(&settings.preferred_team);
    match opponent::next_opponent(&cache, &settings.schedule_urls, &aliases, today) {
        Some(name) => match opponent::map_to_existing_team(&name, teams) {
            Some(mapped) => println!("Nächster Gegner: {name} -> {mapped}"),
            None => println!("Nächster Gegner: {name} (kein passender Ordner)"),
        },
        None => println!("Nächster Gegner: nicht gefunden"),
    }
}

fn report_card_warnings(cache: &TtlCache, url: &str, threshold: u32) {
    let html = match rlm_dashboard::fetch::fetch_text_cached(cache, url) {
        Ok(html) => html,
        Err(err) => {
            warn!("squad page unavailable: {err:#}");
            return;
        }
    };
    let players = squad::extract_squad(&html);
    let warned = squad::card_warnings(&players, CardKind::Yellow, threshold);
    if warned.is_empty() {
        println!("Keine Spieler mit ≥ {threshold} gelben Karten.");
        return;
    }
    println!("Spieler mit ≥ {threshold} gelben Karten:");
    for player in warned {
        println!("  {} ({})", player.name, player.yellow);
    }
}

fn flag_present(name: &str) -> bool {
    std::env::args().skip(1).any(|arg| arg == name)
}

fn parse_path_arg(name: &str) -> Option<PathBuf> {
    let prefix = format!("{name}=");
    let args: Vec<String> = std::env::args().skip(1).collect();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefix) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == name {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}

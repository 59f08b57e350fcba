use std::fs;

use rlm_dashboard::files::{
    FileRef, PlotKind, conceded_goal_files, list_player_files, list_players,
    list_teams_and_files, load_team_videos, own_goal_files, pick_file, resolve_team_dir,
};
use tempfile::TempDir;

fn remote(name: &str) -> FileRef {
    FileRef::Remote {
        name: name.to_string(),
        label: None,
        url: format!("https://example.net/{name}"),
    }
}

#[test]
fn lists_teams_with_preferred_first() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path();
    for team in ["Gurten", "JWR", "Voitsberg"] {
        fs::create_dir(base.join(team)).unwrap();
    }
    fs::write(base.join("JWR/EigeneToreJWR.py"), "goals = []").unwrap();
    fs::write(base.join("JWR/GegentoreJWR.py"), "goals = []").unwrap();
    fs::write(base.join("JWR/notizen.txt"), "x").unwrap();
    fs::write(base.join("JWR/aufstellung.py"), "x").unwrap();
    fs::write(base.join("Gurten/GegentoreGurten.py"), "goals = []").unwrap();

    let index = list_teams_and_files(base, "JWR");
    assert_eq!(index.teams, vec!["JWR", "Gurten", "Voitsberg"]);
    assert_eq!(index.plot_files["JWR"].len(), 2);
    assert_eq!(index.plot_files["Gurten"].len(), 1);
    assert!(index.plot_files["Voitsberg"].is_empty());
}

#[test]
fn missing_base_dir_is_an_empty_index() {
    let tmp = TempDir::new().unwrap();
    let index = list_teams_and_files(&tmp.path().join("nirgendwo"), "JWR");
    assert!(index.teams.is_empty());
}

#[test]
fn pick_file_prefers_the_exact_kind() {
    let files = vec![remote("GegentoreJWR.py"), remote("EigeneToreJWR.py")];
    assert_eq!(
        pick_file(&files, PlotKind::Own).map(|f| f.name()),
        Some("EigeneToreJWR.py".to_string())
    );
    assert_eq!(
        pick_file(&files, PlotKind::Against).map(|f| f.name()),
        Some("GegentoreJWR.py".to_string())
    );
    assert_eq!(pick_file(&[], PlotKind::Own), None);

    // Nothing matches: the first file is still better than nothing.
    let fallback = vec![remote("heatmap.py")];
    assert_eq!(
        pick_file(&fallback, PlotKind::Own).map(|f| f.name()),
        Some("heatmap.py".to_string())
    );
}

#[test]
fn own_and_conceded_prefix_conventions() {
    let files = vec![
        remote("EigeneToreJWR.py"),
        remote("EigeneToreGegenpressing.py"),
        remote("GegentoreJWR.py"),
        remote("GegentoreJWR_alt.py"),
        remote("Heatmap.py"),
    ];
    let own: Vec<String> = own_goal_files(&files).iter().map(|f| f.name()).collect();
    assert_eq!(own, vec!["EigeneToreJWR.py"]);

    let conceded: Vec<String> = conceded_goal_files(&files).iter().map(|f| f.name()).collect();
    assert_eq!(conceded, vec!["GegentoreJWR.py", "GegentoreJWR_alt.py"]);
}

#[test]
fn videos_bucket_by_keyword() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path();
    let dir = base.join("Voitsberg");
    fs::create_dir(&dir).unwrap();
    for name in [
        "01_JWR_Voitsberg_Elfmeter.mp4",
        "02_JWR_Voitsberg_1Touch_Huber.mp4",
        "03_JWR_Voitsberg_2Touch.mp4",
        "04_JWR_Voitsberg_Konter.mp4",
        "notizen.txt",
    ] {
        fs::write(dir.join(name), b"x").unwrap();
    }

    let buckets = load_team_videos(base, "ASK Voitsberg");
    assert_eq!(buckets.penalty.len(), 1);
    assert_eq!(buckets.one_touch.len(), 1);
    assert_eq!(buckets.two_touch.len(), 1);
    assert_eq!(buckets.other.len(), 1);
    assert_eq!(buckets.total(), 4);

    let names: Vec<String> = buckets.all().iter().map(|f| f.name()).collect();
    assert_eq!(names[0], "01_JWR_Voitsberg_Elfmeter.mp4");
}

#[test]
fn team_dir_resolution_strips_club_prefixes() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path();
    fs::create_dir(base.join("Voitsberg")).unwrap();
    fs::create_dir(base.join("St. Anna")).unwrap();

    assert_eq!(
        resolve_team_dir(base, "ASK Voitsberg"),
        Some(base.join("Voitsberg"))
    );
    assert_eq!(resolve_team_dir(base, "Voitsberg"), Some(base.join("Voitsberg")));
    assert_eq!(resolve_team_dir(base, "DSV Leoben"), None);
}

#[test]
fn player_listing_filters_by_extension() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path();
    let dir = base.join("Mueller");
    fs::create_dir(&dir).unwrap();
    fs::create_dir(base.join("Huber")).unwrap();
    fs::write(dir.join("Sprints.mp4"), b"x").unwrap();
    fs::write(dir.join("Standards.pptx"), b"x").unwrap();
    fs::write(dir.join("notizen.txt"), b"x").unwrap();

    assert_eq!(list_players(base), vec!["Huber", "Mueller"]);
    assert_eq!(list_player_files(&dir).len(), 2);
}

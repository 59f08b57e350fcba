use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::filename::ShotCategory;

pub const VIDEO_EXTS: [&str; 6] = ["mp4", "mov", "m4v", "avi", "mkv", "webm"];
pub const DOC_EXTS: [&str; 3] = ["pptx", "pdf", "xlsx"];

/// Club-prefix tokens stripped before fuzzy name matching ("SV Ried" and
/// "Ried" should land in the same folder).
const CLUB_PREFIX_TOKENS: [&str; 12] = [
    "sv", "fc", "sc", "ask", "usk", "sk", "dsc", "atsv", "esv", "spg", "sg", "tsv",
];

static PLOT_FILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(eigene|gegen).*tore").expect("plot file pattern"));

/// A listable file the pipeline can read: a local path or a manifest URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FileRef {
    Local { path: PathBuf },
    Remote {
        name: String,
        label: Option<String>,
        url: String,
    },
}

impl FileRef {
    pub fn local(path: impl Into<PathBuf>) -> Self {
        FileRef::Local { path: path.into() }
    }

    /// File name as listed; empty only for degenerate paths.
    pub fn name(&self) -> String {
        match self {
            FileRef::Local { path } => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            FileRef::Remote { name, .. } => name.clone(),
        }
    }

    /// Display label: the manifest label when present, else the name.
    pub fn display_label(&self) -> String {
        match self {
            FileRef::Remote {
                label: Some(label), ..
            } if !label.is_empty() => label.clone(),
            _ => self.name(),
        }
    }
}

/// Teams and their plot-source files, in listing order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamIndex {
    pub teams: Vec<String>,
    pub plot_files: HashMap<String, Vec<FileRef>>,
}

/// Lists the team folders under the analyses dir; per team, the plot
/// sources are the *.py files whose name mentions eigene/gegen + tore.
/// A missing base dir is an empty index, not an error.
pub fn list_teams_and_files(base_dir: &Path, preferred: &str) -> TeamIndex {
    let mut index = TeamIndex::default();
    for dir in sorted_subdirs(base_dir) {
        let Some(team) = dir.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };
        index.plot_files.insert(team.clone(), list_plot_sources(&dir));
        index.teams.push(team);
    }
    prefer_team(&mut index.teams, preferred);
    index
}

/// Moves the club's own team to the front of the list.
pub fn prefer_team(teams: &mut Vec<String>, preferred: &str) {
    if let Some(pos) = teams.iter().position(|t| t == preferred) {
        let team = teams.remove(pos);
        teams.insert(0, team);
    }
}

fn list_plot_sources(dir: &Path) -> Vec<FileRef> {
    sorted_files(dir)
        .into_iter()
        .filter(|p| {
            p.extension().and_then(|e| e.to_str()) == Some("py")
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| PLOT_FILE_RE.is_match(n))
        })
        .map(FileRef::local)
        .collect()
}

/// Which of the two plot sources a view wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    Own,
    Against,
}

/// Picks the file for a view: all wanted terms beat any wanted term beats
/// first-in-list.
pub fn pick_file<'a>(files: &'a [FileRef], kind: PlotKind) -> Option<&'a FileRef> {
    let wanted: [&str; 2] = match kind {
        PlotKind::Own => ["eigene", "tore"],
        PlotKind::Against => ["gegen", "tore"],
    };
    let lowered = |f: &FileRef| f.name().to_lowercase();
    files
        .iter()
        .find(|f| wanted.iter().all(|t| lowered(f).contains(t)))
        .or_else(|| {
            files
                .iter()
                .find(|f| wanted.iter().any(|t| lowered(f).contains(t)))
        })
        .or_else(|| files.first())
}

/// Only the genuine own-goal sources: EigeneTore*.py, no "gegen" anywhere
/// in the name (backups and conceded files drop out).
pub fn own_goal_files(files: &[FileRef]) -> Vec<FileRef> {
    files
        .iter()
        .filter(|f| {
            let name = f.name().to_lowercase();
            name.starts_with("eigenetore") && !name.contains("gegen")
        })
        .cloned()
        .collect()
}

/// GegenTore*.py only.
pub fn conceded_goal_files(files: &[FileRef]) -> Vec<FileRef> {
    files
        .iter()
        .filter(|f| f.name().to_lowercase().starts_with("gegentore"))
        .cloned()
        .collect()
}

/// A team's goal clips, bucketed by category in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VideoBuckets {
    pub penalty: Vec<FileRef>,
    pub one_touch: Vec<FileRef>,
    pub two_touch: Vec<FileRef>,
    pub other: Vec<FileRef>,
}

impl VideoBuckets {
    pub fn push(&mut self, category: ShotCategory, file: FileRef) {
        self.bucket_mut(category).push(file);
    }

    pub fn bucket(&self, category: ShotCategory) -> &[FileRef] {
        match category {
            ShotCategory::Penalty => &self.penalty,
            ShotCategory::OneTouch => &self.one_touch,
            ShotCategory::TwoTouch => &self.two_touch,
            ShotCategory::Other => &self.other,
        }
    }

    fn bucket_mut(&mut self, category: ShotCategory) -> &mut Vec<FileRef> {
        match category {
            ShotCategory::Penalty => &mut self.penalty,
            ShotCategory::OneTouch => &mut self.one_touch,
            ShotCategory::TwoTouch => &mut self.two_touch,
            ShotCategory::Other => &mut self.other,
        }
    }

    /// All clips in category order, the order the scorer table sees them.
    pub fn all(&self) -> Vec<FileRef> {
        ShotCategory::ALL
            .iter()
            .flat_map(|cat| self.bucket(*cat).iter().cloned())
            .collect()
    }

    pub fn total(&self) -> usize {
        ShotCategory::ALL.iter().map(|cat| self.bucket(*cat).len()).sum()
    }
}

/// Lists a team's clips from the videos dir, bucketed by filename keyword.
/// Unresolvable team folder means empty buckets.
pub fn load_team_videos(videos_dir: &Path, team: &str) -> VideoBuckets {
    let Some(dir) = resolve_team_dir(videos_dir, team) else {
        return VideoBuckets::default();
    };
    let mut buckets = VideoBuckets::default();
    for path in sorted_files(&dir).into_iter().filter(|p| is_video(p)) {
        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };
        buckets.push(ShotCategory::classify(&name), FileRef::local(path));
    }
    buckets
}

/// Team folders rarely spell the club name exactly. Normalize, strip club
/// prefixes, then fall back to prefix/containment matching.
pub fn resolve_team_dir(base: &Path, team: &str) -> Option<PathBuf> {
    let mapping: Vec<(String, PathBuf)> = sorted_subdirs(base)
        .into_iter()
        .filter_map(|p| {
            let name = p.file_name()?.to_str()?.to_string();
            Some((normalize_name(&name), p))
        })
        .collect();

    let norm = normalize_name(team);
    if let Some((_, path)) = mapping.iter().find(|(key, _)| *key == norm) {
        return Some(path.clone());
    }
    let stripped = strip_tokens(&norm);
    for (key, path) in &mapping {
        let ks = strip_tokens(key);
        if ks == stripped
            || key.starts_with(stripped)
            || stripped.starts_with(key.as_str())
            || ks.starts_with(stripped)
            || stripped.starts_with(ks)
        {
            return Some(path.clone());
        }
    }
    None
}

/// Player folders for the individual analyses, sorted.
pub fn list_players(base: &Path) -> Vec<String> {
    sorted_subdirs(base)
        .into_iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .collect()
}

/// A player's clips and documents, sorted.
pub fn list_player_files(player_dir: &Path) -> Vec<FileRef> {
    sorted_files(player_dir)
        .into_iter()
        .filter(|p| is_video(p) || is_document(p))
        .map(FileRef::local)
        .collect()
}

/// Lowercased, alphanumeric only.
pub fn normalize_name(s: &str) -> String {
    s.to_lowercase().chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Strips each club-prefix token at most once, in order, off the front of
/// an already-normalized name ("svried" -> "ried").
pub fn strip_tokens(name_norm: &str) -> &str {
    let mut out = name_norm;
    for token in CLUB_PREFIX_TOKENS {
        if let Some(rest) = out.strip_prefix(token) {
            out = rest;
        }
    }
    out
}

fn is_video(path: &Path) -> bool {
    has_extension(path, &VIDEO_EXTS)
}

fn is_document(path: &Path) -> bool {
    has_extension(path, &DOC_EXTS)
}

fn has_extension(path: &Path, exts: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| exts.contains(&ext.to_lowercase().as_str()))
}

fn sorted_subdirs(base: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = match fs::read_dir(base) {
        Ok(entries) => entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect(),
        Err(_) => Vec::new(),
    };
    dirs.sort();
    dirs
}

fn sorted_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect(),
        Err(_) => Vec::new(),
    };
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_drops_punctuation() {
        assert_eq!(normalize_name("St. Anna"), "stanna");
        assert_eq!(normalize_name("SV Ried II"), "svriedii");
    }

    #[test]
    fn strip_tokens_is_sequential() {
        assert_eq!(strip_tokens("svried"), "ried");
        assert_eq!(strip_tokens("asklafnitz"), "lafnitz");
        // Each token strips at most once, front only.
        assert_eq!(strip_tokens("riedsv"), "riedsv");
    }
}

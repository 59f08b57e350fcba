use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cache::TtlCache;
use crate::fetch;
use crate::filename::ShotCategory;
use crate::files::{FileRef, VideoBuckets};

/// One file entry in the remote manifest. Which of `name`/`label` is
/// present depends on the export that produced the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    pub url: String,
}

impl ManifestFile {
    pub fn to_file_ref(&self) -> FileRef {
        FileRef::Remote {
            name: self
                .name
                .clone()
                .or_else(|| self.label.clone())
                .unwrap_or_default(),
            label: self.label.clone(),
            url: self.url.clone(),
        }
    }
}

/// The OneDrive manifest: plot sources and videos per team, analysis
/// files per player. Missing sections deserialize to empty maps.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub plots_base: HashMap<String, Vec<ManifestFile>>,
    #[serde(default)]
    pub videos: HashMap<String, HashMap<String, Vec<ManifestFile>>>,
    #[serde(default)]
    pub analysen: HashMap<String, Vec<ManifestFile>>,
}

impl Manifest {
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid manifest json")
    }

    /// Every team that has plots or videos, sorted.
    pub fn teams(&self) -> Vec<String> {
        let mut teams: Vec<String> = self
            .plots_base
            .keys()
            .chain(self.videos.keys())
            .cloned()
            .collect();
        teams.sort();
        teams.dedup();
        teams
    }

    pub fn team_plot_files(&self, team: &str) -> Vec<FileRef> {
        self.plots_base
            .get(team)
            .map(|files| files.iter().map(ManifestFile::to_file_ref).collect())
            .unwrap_or_default()
    }

    /// Videos bucketed by the manifest's category keys; unknown keys are
    /// ignored rather than misfiled.
    pub fn team_videos(&self, team: &str) -> VideoBuckets {
        let mut buckets = VideoBuckets::default();
        let Some(categories) = self.videos.get(team) else {
            return buckets;
        };
        for category in ShotCategory::ALL {
            if let Some(files) = categories.get(category.bucket()) {
                for file in files {
                    buckets.push(category, file.to_file_ref());
                }
            }
        }
        buckets
    }

    pub fn players(&self) -> Vec<String> {
        let mut players: Vec<String> = self.analysen.keys().cloned().collect();
        players.sort();
        players
    }

    pub fn player_files(&self, player: &str) -> Vec<FileRef> {
        self.analysen
            .get(player)
            .map(|files| files.iter().map(ManifestFile::to_file_ref).collect())
            .unwrap_or_default()
    }
}

/// Fetches and decodes the manifest through the TTL cache.
pub fn load_manifest(cache: &TtlCache, url: &str) -> Result<Manifest> {
    let body = fetch::fetch_text_cached(cache, url)?;
    Manifest::parse(&body)
}

use serde::Serialize;

/// Build-up classification of a goal clip, inferred from filename keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShotCategory {
    Penalty,
    OneTouch,
    TwoTouch,
    Other,
}

impl ShotCategory {
    pub const ALL: [ShotCategory; 4] = [
        ShotCategory::Penalty,
        ShotCategory::OneTouch,
        ShotCategory::TwoTouch,
        ShotCategory::Other,
    ];

    /// First keyword wins; a name carrying both "elfmeter" and "1touch"
    /// stays a penalty.
    pub fn classify(stem: &str) -> Self {
        let low = stem.to_lowercase();
        if low.contains("elfmeter") {
            ShotCategory::Penalty
        } else if low.contains("1touch") {
            ShotCategory::OneTouch
        } else if low.contains("2touch") {
            ShotCategory::TwoTouch
        } else {
            ShotCategory::Other
        }
    }

    /// Label form, as the clip labels and tables spell it.
    pub fn label(&self) -> &'static str {
        match self {
            ShotCategory::Penalty => "Elfmeter",
            ShotCategory::OneTouch => "1Touch",
            ShotCategory::TwoTouch => "2Touch",
            ShotCategory::Other => "Sonstiges Tor",
        }
    }

    /// Category key used by the video folders and the remote manifest.
    pub fn bucket(&self) -> &'static str {
        match self {
            ShotCategory::Penalty => "Elfmeter",
            ShotCategory::OneTouch => "1 Touch",
            ShotCategory::TwoTouch => "2 Touch",
            ShotCategory::Other => "Sonstiges",
        }
    }

    pub fn from_bucket(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cat| cat.bucket() == key)
    }
}

/// One goal clip decomposed from its file name. Constructed once per file
/// at listing time and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalEvent {
    pub team: String,
    pub opponent: String,
    pub category: ShotCategory,
    /// Only present when the name carries a fifth underscore field; the
    /// scorer table keys on presence.
    pub scorer: Option<String>,
    /// Original file name, retained for tables and detail views.
    pub file: String,
}

impl GoalEvent {
    /// Total over any input; malformed names degrade field by field
    /// rather than erroring.
    pub fn from_file_name(name: &str) -> Self {
        let stem = stem_of(name);
        let parts: Vec<&str> = stem.split('_').collect();
        let team = if parts.len() >= 2 {
            parts[1].to_string()
        } else {
            stem.to_string()
        };
        let opponent = if parts.len() >= 3 {
            parts[2].to_string()
        } else {
            String::new()
        };
        let scorer = (parts.len() >= 5).then(|| parts[4].to_string());

        GoalEvent {
            team,
            opponent,
            category: ShotCategory::classify(stem),
            scorer,
            file: name.to_string(),
        }
    }

    /// The scorer, when the filename actually names one.
    pub fn named_scorer(&self) -> Option<&str> {
        self.scorer.as_deref().filter(|s| !s.is_empty())
    }
}

/// Strips the last extension off a file name ("07_JWR_WAC.mp4" ->
/// "07_JWR_WAC"). A leading dot is not an extension separator.
pub fn stem_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_strips_last_extension_only() {
        assert_eq!(stem_of("03_JWR_StAnna_1Touch_Mueller.mp4"), "03_JWR_StAnna_1Touch_Mueller");
        assert_eq!(stem_of("archive.tar.gz"), "archive.tar");
        assert_eq!(stem_of(".env"), ".env");
        assert_eq!(stem_of("no_extension"), "no_extension");
    }

    #[test]
    fn bucket_round_trips() {
        for cat in ShotCategory::ALL {
            assert_eq!(ShotCategory::from_bucket(cat.bucket()), Some(cat));
        }
        assert_eq!(ShotCategory::from_bucket("Eigentore"), None);
    }
}

//! Track compatibility table: baccalauréat series → domain and category.
//!
//! Read-only process-wide configuration. The three score values below are
//! fixed constants, not per-call parameters.

use serde::Serialize;

use crate::knowledge::models::{fold_case, track_code, Occupation};

/// Score when the track code is not in the table.
pub const UNKNOWN_TRACK_SCORE: f64 = 0.5;
/// Score when the track's category fits the occupation's sector.
pub const COMPATIBLE_TRACK_SCORE: f64 = 0.8;
/// Score when it does not.
pub const INCOMPATIBLE_TRACK_SCORE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackCategory {
    Scientific,
    Literary,
    Economic,
    Technical,
    Service,
}

impl TrackCategory {
    /// Sector keywords (lower-case) this category is compatible with.
    pub fn sector_keywords(self) -> &'static [&'static str] {
        match self {
            TrackCategory::Scientific => &[
                "santé",
                "sciences",
                "ingénierie",
                "technique",
                "médecine",
                "recherche",
            ],
            TrackCategory::Literary => &[
                "communication",
                "education",
                "langues",
                "culture",
                "média",
                "enseignement",
            ],
            TrackCategory::Economic => &["économie", "banque", "finance", "administration", "gestion"],
            TrackCategory::Technical => &[
                "technique",
                "ingénierie",
                "industrie",
                "construction",
                "technologie",
            ],
            TrackCategory::Service => &["commerce", "service", "vente", "administration", "secrétariat"],
        }
    }

    /// Strength tags reported for a profile of this category.
    pub fn strengths(self) -> &'static [&'static str] {
        match self {
            TrackCategory::Scientific => &["Mathématiques", "Sciences", "Logique", "Analyse"],
            TrackCategory::Literary => &["Communication", "Langues", "Rédaction", "Culture générale"],
            TrackCategory::Economic => &["Gestion", "Économie", "Sciences sociales", "Administration"],
            TrackCategory::Technical => &["Techniques", "Pratique", "Technologies", "Innovation"],
            TrackCategory::Service => &["Commerce", "Services", "Gestion", "Communication"],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrackCategory::Scientific => "scientifique",
            TrackCategory::Literary => "littéraire",
            TrackCategory::Economic => "économique",
            TrackCategory::Technical => "technique",
            TrackCategory::Service => "tertiaire",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackInfo {
    pub code: &'static str,
    pub domain: &'static str,
    pub category: TrackCategory,
}

const fn track(code: &'static str, domain: &'static str, category: TrackCategory) -> TrackInfo {
    TrackInfo {
        code,
        domain,
        category,
    }
}

/// Baccalauréat series offered in Benin.
pub const TRACKS: &[TrackInfo] = &[
    track("A1", "Lettres-Langues", TrackCategory::Literary),
    track("A2", "Lettres-Sciences Sociales", TrackCategory::Literary),
    track("B", "Sciences Sociales", TrackCategory::Economic),
    track("C", "Mathématiques-Sciences Physiques", TrackCategory::Scientific),
    track("D", "Mathématiques-Sciences Naturelles", TrackCategory::Scientific),
    track("E", "Mathématiques-Techniques", TrackCategory::Technical),
    track("EA", "Économie-Administration", TrackCategory::Economic),
    track("F1", "Électrotechnique", TrackCategory::Technical),
    track("F2", "Mécanique Générale", TrackCategory::Technical),
    track("F3", "Électricité", TrackCategory::Technical),
    track("F4", "Génie Civil", TrackCategory::Technical),
    track("G1", "Secrétariat", TrackCategory::Service),
    track("G2", "Comptabilité", TrackCategory::Service),
    track("G3", "Commerce", TrackCategory::Service),
];

/// Looks a track up by full label ("D (Mathématiques-...)") or bare code ("D").
pub fn lookup_track(track: &str) -> Option<&'static TrackInfo> {
    let code = track_code(track)?;
    TRACKS.iter().find(|info| info.code == code)
}

/// An absent category is compatible with everything.
pub fn category_compatible_with_sector(category: Option<TrackCategory>, sector: &str) -> bool {
    let Some(category) = category else {
        return true;
    };
    let sector = fold_case(sector);
    category
        .sector_keywords()
        .iter()
        .any(|keyword| sector.contains(keyword))
}

pub fn track_to_occupation_score(track: &str, occupation: &Occupation) -> f64 {
    match lookup_track(track) {
        None => UNKNOWN_TRACK_SCORE,
        Some(info) if category_compatible_with_sector(Some(info.category), &occupation.sector) => {
            COMPATIBLE_TRACK_SCORE
        }
        Some(_) => INCOMPATIBLE_TRACK_SCORE,
    }
}

//! Entity model of the orientation knowledge base.
//!
//! These are the in-memory, immutable-after-load shapes. The on-disk record
//! shapes (French keys of the source documents) live in `knowledge::records`
//! and are converted into these types one entry at a time.

use serde::{Serialize, Serializer};

/// Case folding used for every case-insensitive comparison in the store.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

// ────────────────────────────────────────────────────────────────────────────
// Occupations
// ────────────────────────────────────────────────────────────────────────────

/// Market demand for an occupation as declared in the source data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemandLevel {
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
    /// A non-empty label the table does not know. Kept verbatim.
    Unrecognized(String),
}

impl DemandLevel {
    /// Parses a source label. Blank input means "unset" and yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let level = match fold_case(trimmed).as_str() {
            "très élevé" | "tres eleve" => DemandLevel::VeryHigh,
            "élevé" | "eleve" => DemandLevel::High,
            "moyen" => DemandLevel::Medium,
            "faible" => DemandLevel::Low,
            "très faible" | "tres faible" => DemandLevel::VeryLow,
            _ => DemandLevel::Unrecognized(trimmed.to_string()),
        };
        Some(level)
    }

    pub fn label(&self) -> &str {
        match self {
            DemandLevel::VeryHigh => "Très élevé",
            DemandLevel::High => "Élevé",
            DemandLevel::Medium => "Moyen",
            DemandLevel::Low => "Faible",
            DemandLevel::VeryLow => "Très faible",
            DemandLevel::Unrecognized(raw) => raw,
        }
    }
}

impl Serialize for DemandLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Occupation {
    pub name: String,
    pub description: String,
    pub sector: String,
    pub technical_skills: Vec<String>,
    pub transversal_skills: Vec<String>,
    pub training_paths: Vec<String>,
    pub market_demand: Option<DemandLevel>,
    pub growth_outlook: Option<bool>,
    pub local_relevance: String,
}

impl Occupation {
    /// Technical then transversal skills, in declaration order.
    pub fn all_skills(&self) -> impl Iterator<Item = &str> {
        self.technical_skills
            .iter()
            .chain(self.transversal_skills.iter())
            .map(String::as_str)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sectors, skills, training paths
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sector {
    pub name: String,
    pub description: String,
    pub expected_growth: String,
    /// Weak references to occupation names.
    pub key_occupations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Technical,
    Transversal,
}

impl SkillCategory {
    pub fn parse(raw: &str) -> Option<Self> {
        match fold_case(raw.trim()).as_str() {
            "technique" | "technical" => Some(SkillCategory::Technical),
            "transversale" | "transversal" => Some(SkillCategory::Transversal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skill {
    pub name: String,
    pub description: String,
    pub category: Option<SkillCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingPath {
    pub name: String,
    pub description: String,
    /// Weak references to occupation names.
    pub prepares_for: Vec<String>,
    pub category: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Institutions → departments → programs
// ────────────────────────────────────────────────────────────────────────────

/// Marker inside an accepted-track entry meaning every track is admitted.
pub const ALL_TRACKS_SENTINEL: &str = "toutes";

/// Short code of a track label: the text before the first whitespace,
/// e.g. "D" from "D (Mathématiques-Sciences Naturelles)".
/// The code is upper-cased so "d" and "D" name the same series.
pub fn track_code(track: &str) -> Option<String> {
    track.split_whitespace().next().map(str::to_uppercase)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub name: String,
    pub description: String,
    pub credential: String,
    pub duration_years: u32,
    pub admission: String,
    /// Empty means unrestricted.
    pub accepted_tracks: Vec<String>,
    pub other_prerequisites: String,
    /// Weak references to occupation names.
    pub target_occupations: Vec<String>,
}

impl Program {
    pub fn is_track_restricted(&self) -> bool {
        !self.accepted_tracks.is_empty()
    }

    pub fn accepts_all_tracks(&self) -> bool {
        self.accepted_tracks
            .iter()
            .any(|track| fold_case(track).contains(ALL_TRACKS_SENTINEL))
    }

    /// True if the program admits the given track code prefix (e.g. "D").
    ///
    /// The prefix only has to appear inside one accepted entry, so "D" is
    /// admitted by an entry written "Série D".
    pub fn admits_track_code(&self, code: &str) -> bool {
        if !self.is_track_restricted() || self.accepts_all_tracks() {
            return true;
        }
        self.accepted_tracks.iter().any(|track| track.contains(code))
    }

    /// True if any target occupation contains `folded_query` (already case-folded).
    pub fn targets_occupation(&self, folded_query: &str) -> bool {
        self.target_occupations
            .iter()
            .any(|target| fold_case(target).contains(folded_query))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Department {
    pub name: String,
    pub programs: Vec<Program>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstitutionStatus {
    Public,
    PrivateAccredited,
    /// Any other label, kept verbatim and ranked with the non-public ones.
    Unrecognized(String),
}

impl InstitutionStatus {
    /// "Public" or "Publique" (any case) is public; anything mentioning
    /// "priv" is private-accredited.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let folded = fold_case(trimmed);
        if folded.starts_with("public") {
            InstitutionStatus::Public
        } else if folded.contains("priv") {
            InstitutionStatus::PrivateAccredited
        } else {
            InstitutionStatus::Unrecognized(trimmed.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            InstitutionStatus::Public => "Public",
            InstitutionStatus::PrivateAccredited => "Privé Agréé",
            InstitutionStatus::Unrecognized(label) => label,
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, InstitutionStatus::Public)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, InstitutionStatus::Unrecognized(_))
    }
}

impl Serialize for InstitutionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Institution {
    pub name: String,
    pub abbreviation: Option<String>,
    pub status: InstitutionStatus,
    pub location: String,
    pub website: String,
    pub departments: Vec<Department>,
}

impl Institution {
    pub fn programs(&self) -> impl Iterator<Item = (&Department, &Program)> {
        self.departments
            .iter()
            .flat_map(|department| department.programs.iter().map(move |p| (department, p)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Knowledge base
// ────────────────────────────────────────────────────────────────────────────

/// All top-level collections. Read-only once loaded; collections keep
/// source order, which is the tie-break order for every lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KnowledgeBase {
    pub occupations: Vec<Occupation>,
    pub sectors: Vec<Sector>,
    pub skills: Vec<Skill>,
    pub training_paths: Vec<TrainingPath>,
    pub institutions: Vec<Institution>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(tracks: &[&str]) -> Program {
        Program {
            name: "Licence".to_string(),
            description: String::new(),
            credential: "Licence".to_string(),
            duration_years: 3,
            admission: String::new(),
            accepted_tracks: tracks.iter().map(|t| t.to_string()).collect(),
            other_prerequisites: String::new(),
            target_occupations: vec!["Médecin généraliste".to_string()],
        }
    }

    #[test]
    fn test_demand_level_parses_known_labels() {
        assert_eq!(DemandLevel::parse("Très élevé"), Some(DemandLevel::VeryHigh));
        assert_eq!(DemandLevel::parse("  ÉLEVÉ "), Some(DemandLevel::High));
        assert_eq!(DemandLevel::parse("Moyen"), Some(DemandLevel::Medium));
        assert_eq!(DemandLevel::parse("Très faible"), Some(DemandLevel::VeryLow));
    }

    #[test]
    fn test_demand_level_blank_is_unset_and_unknown_is_kept() {
        assert_eq!(DemandLevel::parse("   "), None);
        assert_eq!(
            DemandLevel::parse("En hausse"),
            Some(DemandLevel::Unrecognized("En hausse".to_string()))
        );
    }

    #[test]
    fn test_institution_status_parsing() {
        assert_eq!(InstitutionStatus::parse("Public"), InstitutionStatus::Public);
        assert_eq!(InstitutionStatus::parse(" Publique "), InstitutionStatus::Public);
        assert_eq!(
            InstitutionStatus::parse("Privé Agréé"),
            InstitutionStatus::PrivateAccredited
        );

        let other = InstitutionStatus::parse(" Confessionnel ");
        assert_eq!(other, InstitutionStatus::Unrecognized("Confessionnel".to_string()));
        assert!(!other.is_public());
        assert!(!other.is_recognized());
        assert_eq!(other.label(), "Confessionnel");
    }

    #[test]
    fn test_program_track_admission() {
        let restricted = program(&["D", "C"]);
        assert!(restricted.admits_track_code("D"));
        assert!(!restricted.admits_track_code("A1"));

        let open = program(&[]);
        assert!(open.admits_track_code("A1"));

        let all = program(&["Toutes séries"]);
        assert!(all.admits_track_code("G3"));
    }

    #[test]
    fn test_track_code_is_upper_cased() {
        assert_eq!(track_code("d (Mathématiques-Sciences Naturelles)").as_deref(), Some("D"));
        assert_eq!(track_code("g3").as_deref(), Some("G3"));
        assert_eq!(track_code("   "), None);
    }

    #[test]
    fn test_program_targets_by_folded_substring() {
        let p = program(&[]);
        assert!(p.targets_occupation("médecin"));
        assert!(!p.targets_occupation("avocat"));
    }

    #[test]
    fn test_demand_level_serializes_as_label() {
        let json = serde_json::to_string(&DemandLevel::VeryHigh).unwrap();
        assert_eq!(json, "\"Très élevé\"");
    }
}

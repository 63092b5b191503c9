//! Student profile and its analysis.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::knowledge::models::fold_case;
use crate::matching::tracks::{lookup_track, TrackCategory};

/// Domain used when a current program matches no keyword.
pub const DEFAULT_DOMAIN: &str = "Général";

/// Keyword → domain, checked in order; first hit wins.
const PROGRAM_DOMAIN_KEYWORDS: &[(&str, &str)] = &[
    ("médecine", "Santé"),
    ("pharmacie", "Santé"),
    ("infirmier", "Santé"),
    ("informatique", "Technologies"),
    ("génie", "Ingénierie"),
    ("math", "Sciences"),
    ("droit", "Juridique"),
    ("avocat", "Juridique"),
    ("économie", "Économie"),
    ("gestion", "Gestion"),
    ("commerce", "Commerce"),
    ("lettres", "Lettres"),
    ("langue", "Langues"),
    ("communication", "Communication"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    #[serde(alias = "Élève (Futur Bachelier)")]
    ProspectiveStudent,
    #[serde(alias = "Étudiant Universitaire")]
    EnrolledStudent,
}

impl ProfileStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProfileStatus::ProspectiveStudent => "Élève (Futur Bachelier)",
            ProfileStatus::EnrolledStudent => "Étudiant Universitaire",
        }
    }

    fn profile_type(self) -> &'static str {
        match self {
            ProfileStatus::ProspectiveStudent => "Élève",
            ProfileStatus::EnrolledStudent => "Étudiant",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("aspired_occupation cannot be empty")]
    MissingAspiredOccupation,

    #[error("track and current_program are mutually exclusive")]
    TrackAndCurrentProgram,
}

/// Per-request profile. Optional fields stay `None` all the way down; a
/// blank string is treated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub status: ProfileStatus,
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub current_program: Option<String>,
    pub aspired_occupation: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Profile {
    pub fn new(status: ProfileStatus, aspired_occupation: impl Into<String>) -> Self {
        Self {
            status,
            track: None,
            current_program: None,
            aspired_occupation: aspired_occupation.into(),
            first_name: None,
            last_name: None,
        }
    }

    pub fn with_track(mut self, track: impl Into<String>) -> Self {
        self.track = Some(track.into());
        self
    }

    pub fn with_current_program(mut self, program: impl Into<String>) -> Self {
        self.current_program = Some(program.into());
        self
    }
}

impl Profile {
    pub fn track(&self) -> Option<&str> {
        present(&self.track)
    }

    pub fn current_program(&self) -> Option<&str> {
        present(&self.current_program)
    }

    pub fn aspired_occupation(&self) -> &str {
        self.aspired_occupation.trim()
    }

    /// Boundary check for incoming profiles. The engine itself never
    /// rejects a profile.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.aspired_occupation().is_empty() {
            return Err(ProfileError::MissingAspiredOccupation);
        }
        if self.track().is_some() && self.current_program().is_some() {
            return Err(ProfileError::TrackAndCurrentProgram);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileAnalysis {
    pub profile_type: &'static str,
    pub domain_of_origin: Option<&'static str>,
    pub category: Option<TrackCategory>,
    pub category_label: Option<&'static str>,
    pub strengths: Vec<&'static str>,
}

/// Domain of a free-text current program, by keyword.
pub fn domain_from_program(program: &str) -> &'static str {
    let program = fold_case(program);
    PROGRAM_DOMAIN_KEYWORDS
        .iter()
        .find(|(keyword, _)| program.contains(keyword))
        .map_or(DEFAULT_DOMAIN, |&(_, domain)| domain)
}

pub fn analyze_profile(profile: &Profile) -> ProfileAnalysis {
    let mut analysis = ProfileAnalysis {
        profile_type: profile.status.profile_type(),
        domain_of_origin: None,
        category: None,
        category_label: None,
        strengths: Vec::new(),
    };

    if let Some(track) = profile.track() {
        if let Some(info) = lookup_track(track) {
            analysis.domain_of_origin = Some(info.domain);
            analysis.category = Some(info.category);
            analysis.category_label = Some(info.category.label());
            analysis.strengths = info.category.strengths().to_vec();
        }
    } else if let Some(program) = profile.current_program() {
        analysis.domain_of_origin = Some(domain_from_program(program));
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scientific_track_analysis() {
        let profile = Profile::new(ProfileStatus::ProspectiveStudent, "Médecin")
            .with_track("C (Mathématiques-Sciences Physiques)");
        let analysis = analyze_profile(&profile);

        assert_eq!(analysis.profile_type, "Élève");
        assert_eq!(analysis.domain_of_origin, Some("Mathématiques-Sciences Physiques"));
        assert_eq!(analysis.category, Some(TrackCategory::Scientific));
        assert_eq!(
            analysis.strengths,
            vec!["Mathématiques", "Sciences", "Logique", "Analyse"]
        );
    }

    #[test]
    fn test_current_program_domain_by_keyword() {
        let profile = Profile::new(ProfileStatus::EnrolledStudent, "Développeur web")
            .with_current_program("Licence en Informatique de Gestion");
        let analysis = analyze_profile(&profile);

        assert_eq!(analysis.profile_type, "Étudiant");
        assert_eq!(analysis.domain_of_origin, Some("Technologies"));
        assert_eq!(analysis.category, None);
        assert!(analysis.strengths.is_empty());
    }

    #[test]
    fn test_unmatched_program_defaults_to_general() {
        assert_eq!(domain_from_program("Master en Archéologie"), DEFAULT_DOMAIN);
    }

    #[test]
    fn test_unknown_track_and_missing_fields_stay_absent() {
        let unknown = Profile::new(ProfileStatus::ProspectiveStudent, "Avocat").with_track("Z");
        assert_eq!(analyze_profile(&unknown).domain_of_origin, None);

        let bare = Profile::new(ProfileStatus::ProspectiveStudent, "Avocat").with_track("   ");
        let analysis = analyze_profile(&bare);
        assert_eq!(analysis.domain_of_origin, None);
        assert_eq!(analysis.category_label, None);
    }

    #[test]
    fn test_profile_validation() {
        let empty = Profile::new(ProfileStatus::ProspectiveStudent, "  ");
        assert_eq!(empty.validate(), Err(ProfileError::MissingAspiredOccupation));

        let both = Profile::new(ProfileStatus::EnrolledStudent, "Comptable")
            .with_track("G2 (Comptabilité)")
            .with_current_program("Licence en Gestion");
        assert_eq!(both.validate(), Err(ProfileError::TrackAndCurrentProgram));

        let blank_program = Profile::new(ProfileStatus::ProspectiveStudent, "Comptable")
            .with_track("G2")
            .with_current_program("");
        assert!(blank_program.validate().is_ok());
    }

    #[test]
    fn test_status_accepts_french_labels() {
        let profile: Profile = serde_json::from_str(
            r#"{"status": "Élève (Futur Bachelier)", "aspired_occupation": "Médecin"}"#,
        )
        .unwrap();
        assert_eq!(profile.status, ProfileStatus::ProspectiveStudent);
        assert_eq!(profile.track(), None);
    }
}

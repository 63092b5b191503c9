//! Source-document record shapes and their conversion into the entity model.
//!
//! Keys follow the knowledge files (`nom_metier`, `secteur_activite`, ...).
//! Unknown keys are ignored; optional keys tolerate `null`.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::knowledge::models::{
    DemandLevel, Institution, InstitutionStatus, Occupation, Program, Sector, Skill,
    SkillCategory, TrainingPath,
};

/// Why a structurally valid record was still rejected.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("duration must be a positive whole number of years, got {0}")]
    InvalidDuration(String),
}

fn require(value: String, field: &'static str) -> Result<String, RecordError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecordError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn list(value: Option<Vec<String>>) -> Vec<String> {
    value.unwrap_or_default()
}

/// Tri-state growth outlook: booleans pass through, yes/no words are read,
/// anything else is unset.
fn growth_outlook(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(raw) => match raw.trim().to_lowercase().as_str() {
            "oui" | "true" | "yes" | "vrai" => Some(true),
            "non" | "false" | "no" | "faux" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Study length in years: an integer, a whole float or a numeric string,
/// at least 1.
fn duration_years(value: &Value) -> Option<u32> {
    let whole = |years: f64| (years.fract() == 0.0 && years >= 1.0).then_some(years as u64);
    let years = match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole)),
        Value::String(raw) => {
            let raw = raw.trim();
            raw.parse::<u64>()
                .ok()
                .or_else(|| raw.parse::<f64>().ok().and_then(whole))
        }
        _ => None,
    }?;
    u32::try_from(years).ok().filter(|years| *years > 0)
}

// ────────────────────────────────────────────────────────────────────────────
// Occupations, sectors, skills, training paths
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OccupationRecord {
    pub nom_metier: String,
    pub description: String,
    pub secteur_activite: String,
    #[serde(default)]
    pub competences_requises_techniques: Option<Vec<String>>,
    #[serde(default)]
    pub competences_requises_transversales: Option<Vec<String>>,
    #[serde(default)]
    pub formations_typiques_generales: Option<Vec<String>>,
    #[serde(default)]
    pub niveau_demande_marche: Option<String>,
    #[serde(default)]
    pub perspectives_croissance: Value,
    #[serde(default)]
    pub pertinence_realites_africaines_benin: Option<String>,
}

impl TryFrom<OccupationRecord> for Occupation {
    type Error = RecordError;

    fn try_from(record: OccupationRecord) -> Result<Self, Self::Error> {
        Ok(Occupation {
            name: require(record.nom_metier, "nom_metier")?,
            description: record.description,
            sector: record.secteur_activite,
            technical_skills: list(record.competences_requises_techniques),
            transversal_skills: list(record.competences_requises_transversales),
            training_paths: list(record.formations_typiques_generales),
            market_demand: record
                .niveau_demande_marche
                .as_deref()
                .and_then(DemandLevel::parse),
            growth_outlook: growth_outlook(&record.perspectives_croissance),
            local_relevance: text(record.pertinence_realites_africaines_benin),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SectorRecord {
    pub nom_secteur: String,
    pub description: String,
    #[serde(default)]
    pub croissance_prevue: Option<String>,
    #[serde(default)]
    pub metiers_cles: Option<Vec<String>>,
}

impl TryFrom<SectorRecord> for Sector {
    type Error = RecordError;

    fn try_from(record: SectorRecord) -> Result<Self, Self::Error> {
        Ok(Sector {
            name: require(record.nom_secteur, "nom_secteur")?,
            description: record.description,
            expected_growth: text(record.croissance_prevue),
            key_occupations: list(record.metiers_cles),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SkillRecord {
    pub nom_competence: String,
    pub description: String,
    #[serde(default)]
    pub type_competence: Option<String>,
}

impl TryFrom<SkillRecord> for Skill {
    type Error = RecordError;

    fn try_from(record: SkillRecord) -> Result<Self, Self::Error> {
        Ok(Skill {
            name: require(record.nom_competence, "nom_competence")?,
            description: record.description,
            category: record.type_competence.as_deref().and_then(SkillCategory::parse),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TrainingPathRecord {
    pub nom_formation_generale: String,
    pub description: String,
    #[serde(default)]
    pub metiers_prepares: Option<Vec<String>>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl TryFrom<TrainingPathRecord> for TrainingPath {
    type Error = RecordError;

    fn try_from(record: TrainingPathRecord) -> Result<Self, Self::Error> {
        Ok(TrainingPath {
            name: require(record.nom_formation_generale, "nom_formation_generale")?,
            description: record.description,
            prepares_for: list(record.metiers_prepares),
            category: text(record.kind),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Institutions
// ────────────────────────────────────────────────────────────────────────────

/// Institution shell. Departments stay raw so each one can fail on its own.
#[derive(Debug, Deserialize)]
pub struct InstitutionRecord {
    pub nom_universite: String,
    #[serde(default)]
    pub sigle: Option<String>,
    pub statut: String,
    #[serde(default)]
    pub localisation: Option<String>,
    #[serde(default)]
    pub site_web: Option<String>,
    #[serde(default)]
    pub facultes_ecoles: Option<Vec<Value>>,
}

impl InstitutionRecord {
    /// Builds the institution without departments; the loader fills them in.
    /// An unrecognized status is kept; the caller decides how to report it.
    pub fn into_shell(self) -> Result<(Institution, Vec<Value>), RecordError> {
        let status = InstitutionStatus::parse(&self.statut);
        let abbreviation = self
            .sigle
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let institution = Institution {
            name: require(self.nom_universite, "nom_universite")?,
            abbreviation,
            status,
            location: text(self.localisation),
            website: text(self.site_web),
            departments: Vec::new(),
        };
        Ok((institution, self.facultes_ecoles.unwrap_or_default()))
    }
}

#[derive(Debug, Deserialize)]
pub struct DepartmentRecord {
    pub nom_faculte_ecole: String,
    #[serde(default)]
    pub filieres: Option<Vec<Value>>,
}

impl DepartmentRecord {
    pub fn into_parts(self) -> Result<(String, Vec<Value>), RecordError> {
        let name = require(self.nom_faculte_ecole, "nom_faculte_ecole")?;
        Ok((name, self.filieres.unwrap_or_default()))
    }
}

#[derive(Debug, Deserialize)]
pub struct ProgramRecord {
    pub nom_filiere: String,
    #[serde(default)]
    pub description_filiere: Option<String>,
    pub diplome_delivre: String,
    pub duree_etudes_ans: Value,
    #[serde(default)]
    pub conditions_admission_texte: Option<String>,
    #[serde(default)]
    pub series_bac_requises: Option<Vec<String>>,
    #[serde(default)]
    pub autres_prerequis: Option<String>,
    #[serde(default)]
    pub metiers_vises_typiques: Option<Vec<String>>,
}

impl TryFrom<ProgramRecord> for Program {
    type Error = RecordError;

    fn try_from(record: ProgramRecord) -> Result<Self, Self::Error> {
        let duration_years = duration_years(&record.duree_etudes_ans)
            .ok_or_else(|| RecordError::InvalidDuration(record.duree_etudes_ans.to_string()))?;

        Ok(Program {
            name: require(record.nom_filiere, "nom_filiere")?,
            description: text(record.description_filiere),
            credential: record.diplome_delivre,
            duration_years,
            admission: text(record.conditions_admission_texte),
            accepted_tracks: list(record.series_bac_requises),
            other_prerequisites: text(record.autres_prerequis),
            target_occupations: list(record.metiers_vises_typiques),
        })
    }
}

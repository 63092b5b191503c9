//! Knowledge loader: source file → `KnowledgeBase` + `LoadReport`.
//!
//! Each entry is parsed on its own into a `Result`; a bad entry becomes an
//! `EntryDiagnostic` and never aborts the batch. Only a source that cannot be
//! read or is not a JSON object fails the load, and even then the caller gets
//! an empty base plus the error in the report.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::knowledge::models::{
    fold_case, Department, Institution, KnowledgeBase, Occupation, Program, Sector, Skill,
    TrainingPath,
};
use crate::knowledge::records::{
    DepartmentRecord, InstitutionRecord, OccupationRecord, ProgramRecord, RecordError,
    SectorRecord, SkillRecord, TrainingPathRecord,
};
use crate::knowledge::sample;

const OCCUPATIONS_KEY: &str = "metiers";
const SECTORS_KEY: &str = "secteurs_porteurs";
const SKILLS_KEY: &str = "competences";
const TRAINING_PATHS_KEY: &str = "formations_generales";
const INSTITUTIONS_KEY: &str = "universites";
const DEPARTMENTS_KEY: &str = "facultes_ecoles";
const PROGRAMS_KEY: &str = "filieres";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read knowledge source {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write example knowledge source {path}: {source}")]
    WriteSample {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("knowledge source is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("knowledge source must be a JSON object of named collections")]
    NotAnObject,
}

/// One dropped entry, or one kept entry with a degraded field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDiagnostic {
    /// Path of the containing list, e.g. `universites[0].facultes_ecoles`.
    pub collection: String,
    /// Position in that list; unset when the list itself is malformed.
    pub index: Option<usize>,
    pub name: Option<String>,
    pub reason: String,
}

impl EntryDiagnostic {
    fn entry(collection: &str, index: usize, name: Option<String>, reason: String) -> Self {
        Self {
            collection: collection.to_string(),
            index: Some(index),
            name,
            reason,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub created_sample: bool,
    pub load_error: Option<String>,
    pub diagnostics: Vec<EntryDiagnostic>,
}

impl LoadReport {
    fn new(source: String) -> Self {
        Self {
            source,
            loaded_at: Utc::now(),
            created_sample: false,
            load_error: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.load_error.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub base: KnowledgeBase,
    pub report: LoadReport,
}

impl LoadOutcome {
    fn failed(mut report: LoadReport, error: LoadError) -> Self {
        warn!("Knowledge load failed, continuing with an empty base: {error}");
        report.load_error = Some(error.to_string());
        Self {
            base: KnowledgeBase::default(),
            report,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Path resolution and file loading
// ────────────────────────────────────────────────────────────────────────────

/// Absolute paths are kept. Relative paths are tried against the working
/// directory, then the executable's directory; otherwise kept as given.
pub fn resolve_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    let candidates = [
        std::env::current_dir().ok(),
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf)),
    ];

    candidates
        .into_iter()
        .flatten()
        .map(|dir| dir.join(path))
        .find(|candidate| candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Loads the knowledge file, writing the example dataset first if it is missing.
pub fn load_from_path(requested: &Path) -> LoadOutcome {
    let path = resolve_path(requested);
    let mut report = LoadReport::new(path.display().to_string());

    if !path.exists() {
        if let Err(source) = sample::write_sample(&path) {
            return LoadOutcome::failed(report, LoadError::WriteSample { path, source });
        }
        info!("Knowledge source missing, wrote example dataset to {}", path.display());
        report.created_sample = true;
    }

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(source) => return LoadOutcome::failed(report, LoadError::Read { path, source }),
    };

    match parse_str(&text) {
        Ok((base, diagnostics)) => {
            info!(
                "Knowledge loaded from {}: {} occupations, {} institutions, {} diagnostics",
                path.display(),
                base.occupations.len(),
                base.institutions.len(),
                diagnostics.len()
            );
            report.diagnostics = diagnostics;
            LoadOutcome { base, report }
        }
        Err(error) => LoadOutcome::failed(report, error),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document parsing
// ────────────────────────────────────────────────────────────────────────────

/// Parses a knowledge document held in memory.
pub fn parse_str(text: &str) -> Result<(KnowledgeBase, Vec<EntryDiagnostic>), LoadError> {
    let document: Value = serde_json::from_str(text)?;
    let collections = document.as_object().ok_or(LoadError::NotAnObject)?;
    Ok(parse_document(collections))
}

fn parse_document(doc: &Map<String, Value>) -> (KnowledgeBase, Vec<EntryDiagnostic>) {
    let mut diagnostics = Vec::new();

    let occupations = parse_indexed::<OccupationRecord, Occupation>(
        doc,
        OCCUPATIONS_KEY,
        "nom_metier",
        &mut diagnostics,
    );
    let occupations = reject_duplicate_occupations(occupations, &mut diagnostics);

    let base = KnowledgeBase {
        occupations,
        sectors: parse_collection::<SectorRecord, Sector>(
            doc,
            SECTORS_KEY,
            "nom_secteur",
            &mut diagnostics,
        ),
        skills: parse_collection::<SkillRecord, Skill>(
            doc,
            SKILLS_KEY,
            "nom_competence",
            &mut diagnostics,
        ),
        training_paths: parse_collection::<TrainingPathRecord, TrainingPath>(
            doc,
            TRAINING_PATHS_KEY,
            "nom_formation_generale",
            &mut diagnostics,
        ),
        institutions: parse_institutions(doc, &mut diagnostics),
    };

    for diagnostic in &diagnostics {
        debug!(
            "Knowledge entry {}[{:?}] ({:?}): {}",
            diagnostic.collection, diagnostic.index, diagnostic.name, diagnostic.reason
        );
    }

    (base, diagnostics)
}

/// Parses one record into its entity. This is the per-entry result.
fn parse_entry<R, T>(raw: &Value) -> Result<T, String>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = RecordError>,
{
    let record = R::deserialize(raw).map_err(|e| e.to_string())?;
    T::try_from(record).map_err(|e| e.to_string())
}

fn entry_name(raw: &Value, name_key: &str) -> Option<String> {
    raw.get(name_key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Returns the entries of a list-valued key. Missing or null is an empty list;
/// any other shape is reported once for the whole collection.
fn list_at<'a>(
    doc: &'a Map<String, Value>,
    key: &str,
    collection: &str,
    diagnostics: &mut Vec<EntryDiagnostic>,
) -> &'a [Value] {
    match doc.get(key) {
        None | Some(Value::Null) => &[],
        Some(Value::Array(items)) => items.as_slice(),
        Some(_) => {
            diagnostics.push(EntryDiagnostic {
                collection: collection.to_string(),
                index: None,
                name: None,
                reason: "expected a list".to_string(),
            });
            &[]
        }
    }
}

/// Parsed entities paired with their position in the source list.
fn parse_indexed<R, T>(
    doc: &Map<String, Value>,
    key: &str,
    name_key: &str,
    diagnostics: &mut Vec<EntryDiagnostic>,
) -> Vec<(usize, T)>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = RecordError>,
{
    let entries = list_at(doc, key, key, diagnostics);

    let mut parsed = Vec::with_capacity(entries.len());
    for (index, raw) in entries.iter().enumerate() {
        match parse_entry::<R, T>(raw) {
            Ok(entity) => parsed.push((index, entity)),
            Err(reason) => diagnostics.push(EntryDiagnostic::entry(
                key,
                index,
                entry_name(raw, name_key),
                reason,
            )),
        }
    }
    parsed
}

fn parse_collection<R, T>(
    doc: &Map<String, Value>,
    key: &str,
    name_key: &str,
    diagnostics: &mut Vec<EntryDiagnostic>,
) -> Vec<T>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = RecordError>,
{
    parse_indexed::<R, T>(doc, key, name_key, diagnostics)
        .into_iter()
        .map(|(_, entity)| entity)
        .collect()
}

/// Keeps the first occupation for each case-insensitive name.
fn reject_duplicate_occupations(
    occupations: Vec<(usize, Occupation)>,
    diagnostics: &mut Vec<EntryDiagnostic>,
) -> Vec<Occupation> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(occupations.len());

    for (index, occupation) in occupations {
        if seen.insert(fold_case(&occupation.name)) {
            kept.push(occupation);
        } else {
            diagnostics.push(EntryDiagnostic::entry(
                OCCUPATIONS_KEY,
                index,
                Some(occupation.name),
                "duplicate occupation name, first occurrence kept".to_string(),
            ));
        }
    }
    kept
}

// ────────────────────────────────────────────────────────────────────────────
// Institutions: three levels, each entry fails on its own
// ────────────────────────────────────────────────────────────────────────────

fn parse_institutions(
    doc: &Map<String, Value>,
    diagnostics: &mut Vec<EntryDiagnostic>,
) -> Vec<Institution> {
    let entries = list_at(doc, INSTITUTIONS_KEY, INSTITUTIONS_KEY, diagnostics);
    let mut institutions = Vec::with_capacity(entries.len());

    for (index, raw) in entries.iter().enumerate() {
        let shell = InstitutionRecord::deserialize(raw)
            .map_err(|e| e.to_string())
            .and_then(|record| record.into_shell().map_err(|e| e.to_string()));

        match shell {
            Ok((mut institution, departments)) => {
                if !institution.status.is_recognized() {
                    diagnostics.push(EntryDiagnostic::entry(
                        INSTITUTIONS_KEY,
                        index,
                        Some(institution.name.clone()),
                        format!(
                            "unrecognized institution status '{}', ranked as non-public",
                            institution.status.label()
                        ),
                    ));
                }
                let parent = format!("{INSTITUTIONS_KEY}[{index}]");
                institution.departments = parse_departments(&parent, &departments, diagnostics);
                institutions.push(institution);
            }
            Err(reason) => diagnostics.push(EntryDiagnostic::entry(
                INSTITUTIONS_KEY,
                index,
                entry_name(raw, "nom_universite"),
                reason,
            )),
        }
    }
    institutions
}

fn parse_departments(
    parent: &str,
    entries: &[Value],
    diagnostics: &mut Vec<EntryDiagnostic>,
) -> Vec<Department> {
    let collection = format!("{parent}.{DEPARTMENTS_KEY}");
    let mut departments = Vec::with_capacity(entries.len());

    for (index, raw) in entries.iter().enumerate() {
        let parts = DepartmentRecord::deserialize(raw)
            .map_err(|e| e.to_string())
            .and_then(|record| record.into_parts().map_err(|e| e.to_string()));

        match parts {
            Ok((name, programs)) => {
                let parent = format!("{collection}[{index}]");
                let programs = parse_programs(&parent, &programs, diagnostics);
                departments.push(Department { name, programs });
            }
            Err(reason) => diagnostics.push(EntryDiagnostic::entry(
                &collection,
                index,
                entry_name(raw, "nom_faculte_ecole"),
                reason,
            )),
        }
    }
    departments
}

fn parse_programs(
    parent: &str,
    entries: &[Value],
    diagnostics: &mut Vec<EntryDiagnostic>,
) -> Vec<Program> {
    let collection = format!("{parent}.{PROGRAMS_KEY}");
    let mut programs = Vec::with_capacity(entries.len());

    for (index, raw) in entries.iter().enumerate() {
        match parse_entry::<ProgramRecord, Program>(raw) {
            Ok(program) => programs.push(program),
            Err(reason) => diagnostics.push(EntryDiagnostic::entry(
                &collection,
                index,
                entry_name(raw, "nom_filiere"),
                reason,
            )),
        }
    }
    programs
}

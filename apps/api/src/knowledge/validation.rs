//! Data-quality checks over a loaded knowledge base.
//!
//! Dangling name references are warnings, never errors. The only error is a
//! base that was never loaded at all.

use std::collections::HashSet;

use serde::Serialize;

use crate::knowledge::models::KnowledgeBase;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }
}

pub fn validate(base: Option<&KnowledgeBase>) -> ValidationReport {
    let mut report = ValidationReport::default();

    let Some(base) = base else {
        report.errors.push("knowledge base not loaded".to_string());
        return report;
    };

    let empties = [
        (base.occupations.is_empty(), "occupations"),
        (base.sectors.is_empty(), "sectors"),
        (base.skills.is_empty(), "skills"),
        (base.training_paths.is_empty(), "training paths"),
        (base.institutions.is_empty(), "institutions"),
    ];
    for (empty, collection) in empties {
        if empty {
            report.warnings.push(format!("no {collection} defined"));
        }
    }

    // Reference checks are exact and case-sensitive.
    let occupation_names: HashSet<&str> =
        base.occupations.iter().map(|o| o.name.as_str()).collect();

    for institution in &base.institutions {
        for (_, program) in institution.programs() {
            for target in &program.target_occupations {
                if !occupation_names.contains(target.as_str()) {
                    report.warnings.push(format!(
                        "occupation '{target}' referenced by program '{}' ({}) is not defined",
                        program.name, institution.name
                    ));
                }
            }
        }
    }

    for sector in &base.sectors {
        for name in &sector.key_occupations {
            if !occupation_names.contains(name.as_str()) {
                report.warnings.push(format!(
                    "occupation '{name}' listed in sector '{}' is not defined",
                    sector.name
                ));
            }
        }
    }

    for path in &base.training_paths {
        for name in &path.prepares_for {
            if !occupation_names.contains(name.as_str()) {
                report.warnings.push(format!(
                    "occupation '{name}' prepared by training path '{}' is not defined",
                    path.name
                ));
            }
        }
    }

    if !base.skills.is_empty() {
        let skill_names: HashSet<&str> = base.skills.iter().map(|s| s.name.as_str()).collect();
        for occupation in &base.occupations {
            let missing: Vec<&str> = occupation
                .all_skills()
                .filter(|skill| !skill_names.contains(skill))
                .collect();
            if !missing.is_empty() {
                report.warnings.push(format!(
                    "occupation '{}' requires skills not defined in the base: {}",
                    occupation.name,
                    missing.join(", ")
                ));
            }
        }
    }

    report
}

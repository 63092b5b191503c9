//! Lookup primitives over a loaded `KnowledgeBase`.
//!
//! Every query is a pure read over the snapshot and returns references into
//! it. Iteration order of the underlying collections is the tie-break.

use std::collections::HashSet;

use serde::Serialize;

use crate::knowledge::models::{
    fold_case, track_code, Institution, InstitutionStatus, KnowledgeBase, Occupation, Program,
};

/// Shortest query (in characters) allowed to match an occupation by substring.
/// Shorter queries only match exactly.
pub const MIN_SUBSTRING_QUERY_CHARS: usize = 3;

/// Minimum number of shared skills for a skill-based alternative.
const MIN_SHARED_SKILLS: usize = 2;

/// A program that qualified for an occupation search, with its department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramMatch<'a> {
    pub department: &'a str,
    #[serde(flatten)]
    pub program: &'a Program,
}

/// An institution with its qualifying programs only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstitutionMatch<'a> {
    pub name: &'a str,
    pub abbreviation: Option<&'a str>,
    pub status: &'a InstitutionStatus,
    pub location: &'a str,
    pub website: &'a str,
    pub programs: Vec<ProgramMatch<'a>>,
}

impl<'a> InstitutionMatch<'a> {
    fn new(institution: &'a Institution, programs: Vec<ProgramMatch<'a>>) -> Self {
        Self {
            name: &institution.name,
            abbreviation: institution.abbreviation.as_deref(),
            status: &institution.status,
            location: &institution.location,
            website: &institution.website,
            programs,
        }
    }

    pub fn is_public(&self) -> bool {
        self.status.is_public()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub occupations: usize,
    pub institutions: usize,
    pub sectors: usize,
    pub skills: usize,
    pub training_paths: usize,
    pub programs: usize,
}

impl KnowledgeBase {
    /// Exact case-insensitive match first, then the first occupation whose
    /// name contains the query (queries of at least
    /// `MIN_SUBSTRING_QUERY_CHARS` characters only).
    pub fn find_occupation(&self, name: &str) -> Option<&Occupation> {
        let query = fold_case(name.trim());
        if query.is_empty() {
            return None;
        }

        if let Some(exact) = self
            .occupations
            .iter()
            .find(|occupation| fold_case(&occupation.name) == query)
        {
            return Some(exact);
        }

        if query.chars().count() < MIN_SUBSTRING_QUERY_CHARS {
            return None;
        }

        self.occupations
            .iter()
            .find(|occupation| fold_case(&occupation.name).contains(&query))
    }

    /// Occupations whose sector contains `sector_query`, case-insensitively.
    pub fn find_occupations_by_sector(&self, sector_query: &str) -> Vec<&Occupation> {
        let query = fold_case(sector_query);
        self.occupations
            .iter()
            .filter(|occupation| fold_case(&occupation.sector).contains(&query))
            .collect()
    }

    /// Institutions offering at least one program aimed at `occupation`.
    ///
    /// With a track, a restricted program must also list the track's code
    /// (or the all-tracks sentinel) among its accepted tracks.
    pub fn find_institutions_for_occupation(
        &self,
        occupation: &str,
        track: Option<&str>,
    ) -> Vec<InstitutionMatch<'_>> {
        let query = fold_case(occupation.trim());
        if query.is_empty() {
            return Vec::new();
        }
        let code = track.and_then(track_code);

        self.institutions
            .iter()
            .filter_map(|institution| {
                let programs: Vec<ProgramMatch<'_>> = institution
                    .programs()
                    .filter(|(_, program)| program.targets_occupation(&query))
                    .filter(|(_, program)| {
                        code.as_deref().map_or(true, |c| program.admits_track_code(c))
                    })
                    .map(|(department, program)| ProgramMatch {
                        department: &department.name,
                        program,
                    })
                    .collect();

                (!programs.is_empty()).then(|| InstitutionMatch::new(institution, programs))
            })
            .collect()
    }

    /// Up to `limit` alternatives to `name`: same-sector occupations first,
    /// then occupations sharing at least two skills with it.
    pub fn alternative_occupations(&self, name: &str, limit: usize) -> Vec<&Occupation> {
        let Some(target) = self.find_occupation(name) else {
            return Vec::new();
        };

        let mut alternatives: Vec<&Occupation> = self
            .find_occupations_by_sector(&target.sector)
            .into_iter()
            .filter(|occupation| occupation.name != target.name)
            .collect();

        let target_skills: HashSet<&str> = target.all_skills().collect();

        for candidate in &self.occupations {
            if candidate.name == target.name
                || alternatives.iter().any(|known| known.name == candidate.name)
            {
                continue;
            }

            let shared: HashSet<&str> = candidate
                .all_skills()
                .filter(|skill| target_skills.contains(skill))
                .collect();
            if shared.len() >= MIN_SHARED_SKILLS {
                alternatives.push(candidate);
            }
        }

        alternatives.truncate(limit);
        alternatives
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            occupations: self.occupations.len(),
            institutions: self.institutions.len(),
            sectors: self.sectors.len(),
            skills: self.skills.len(),
            training_paths: self.training_paths.len(),
            programs: self
                .institutions
                .iter()
                .map(|institution| institution.programs().count())
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::fixtures::benin_base;

    fn names<'a>(occupations: &[&'a Occupation]) -> Vec<&'a str> {
        occupations.iter().map(|o| o.name.as_str()).collect()
    }

    fn institution_names<'a>(matches: &[InstitutionMatch<'a>]) -> Vec<&'a str> {
        matches.iter().map(|m| m.name).collect()
    }

    #[test]
    fn test_find_occupation_exact_is_case_insensitive() {
        let base = benin_base();
        assert_eq!(base.find_occupation("MÉDECIN").unwrap().name, "Médecin");
        assert_eq!(base.find_occupation("  avocat ").unwrap().name, "Avocat");
    }

    #[test]
    fn test_find_occupation_falls_back_to_substring() {
        let base = benin_base();
        assert_eq!(
            base.find_occupation("informatique").unwrap().name,
            "Ingénieur en informatique"
        );
        assert_eq!(base.find_occupation("Pharma").unwrap().name, "Pharmacien");
    }

    #[test]
    fn test_short_query_never_matches_by_substring() {
        let base = benin_base();
        assert!(base.find_occupation("in").is_none());
        assert!(base.find_occupation("a").is_none());
        assert!(base.find_occupation("   ").is_none());
    }

    #[test]
    fn test_find_occupations_by_sector_keeps_order() {
        let base = benin_base();
        let found = base.find_occupations_by_sector("santé");
        assert_eq!(names(&found), vec!["Médecin", "Infirmier", "Pharmacien"]);
        assert!(base.find_occupations_by_sector("Aéronautique").is_empty());
    }

    #[test]
    fn test_institutions_for_occupation_with_compatible_track() {
        let base = benin_base();
        let found = base
            .find_institutions_for_occupation("Médecin", Some("D (Mathématiques-Sciences Naturelles)"));

        assert_eq!(
            institution_names(&found),
            vec!["Université d'Abomey-Calavi", "Université de Parakou"]
        );
        let uac = &found[0];
        assert_eq!(uac.abbreviation, Some("UAC"));
        assert_eq!(uac.programs.len(), 1);
        assert_eq!(uac.programs[0].program.name, "Doctorat en Médecine");
        assert_eq!(uac.programs[0].department, "Faculté des Sciences de la Santé");
    }

    #[test]
    fn test_institutions_for_occupation_rejects_incompatible_track() {
        let base = benin_base();
        let found = base.find_institutions_for_occupation("Médecin", Some("A1 (Lettres-Langues)"));
        assert!(found.is_empty());
    }

    #[test]
    fn test_all_tracks_sentinel_and_unrestricted_programs() {
        let base = benin_base();
        let found = base.find_institutions_for_occupation("Développeur web", Some("G2 (Comptabilité)"));
        assert_eq!(institution_names(&found), vec!["ESGIS", "HECM"]);

        let found = base.find_institutions_for_occupation("Comptable", Some("A1 (Lettres-Langues)"));
        assert_eq!(institution_names(&found), vec!["ESGIS"]);
    }

    #[test]
    fn test_no_track_means_no_track_filter() {
        let base = benin_base();
        let found = base.find_institutions_for_occupation("Développeur web", None);
        assert_eq!(
            institution_names(&found),
            vec!["Université d'Abomey-Calavi", "ESGIS", "HECM"]
        );
    }

    #[test]
    fn test_blank_occupation_query_matches_nothing() {
        let base = benin_base();
        assert!(base.find_institutions_for_occupation("  ", None).is_empty());
    }

    #[test]
    fn test_alternatives_sector_first_then_shared_skills() {
        let base = benin_base();
        let found = base.alternative_occupations("Médecin", 8);
        assert_eq!(names(&found), vec!["Infirmier", "Pharmacien", "Avocat"]);

        let limited = base.alternative_occupations("Médecin", 2);
        assert_eq!(names(&limited), vec!["Infirmier", "Pharmacien"]);
    }

    #[test]
    fn test_alternatives_for_unknown_occupation_are_empty() {
        let base = benin_base();
        assert!(base.alternative_occupations("Astronaute", 5).is_empty());
    }

    #[test]
    fn test_statistics_counts_programs_across_departments() {
        let stats = benin_base().statistics();
        assert_eq!(stats.occupations, 8);
        assert_eq!(stats.institutions, 5);
        assert_eq!(stats.sectors, 2);
        assert_eq!(stats.skills, 2);
        assert_eq!(stats.training_paths, 1);
        assert_eq!(stats.programs, 9);
    }
}

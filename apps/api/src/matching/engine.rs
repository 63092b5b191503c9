//! Matching engine: a profile against the knowledge base.
//!
//! The engine borrows the knowledge snapshot for the length of one request.
//! The snapshot is optional: with no base every operation returns the same
//! "not found" / empty shapes an unknown occupation would produce.
//!
//! Everything here is synchronous and deterministic.

use std::collections::HashSet;

use serde::Serialize;

use crate::knowledge::models::{fold_case, KnowledgeBase, Occupation};
use crate::knowledge::queries::InstitutionMatch;
use crate::matching::profile::{analyze_profile, Profile, ProfileAnalysis};
use crate::matching::tracks::{category_compatible_with_sector, lookup_track};

/// Cap on name-similarity suggestions.
pub const MAX_SUGGESTIONS: usize = 5;
/// Below this many institutions the search is widened to similar names.
const WIDEN_BELOW_INSTITUTIONS: usize = 3;
/// How many similar names the widened search queries.
const WIDEN_QUERY_COUNT: usize = 3;
pub const MAX_INSTITUTIONS: usize = 10;
/// Alternatives fetched before track filtering.
const ALTERNATIVE_POOL: usize = 8;
pub const MAX_ALTERNATIVES: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Outcome of looking up the aspired occupation. Not finding it is a normal
/// outcome carrying name-similarity suggestions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupationAnalysis<'kb> {
    pub found: bool,
    pub occupation: Option<&'kb Occupation>,
    pub suggestions: Vec<&'kb str>,
}

impl<'kb> OccupationAnalysis<'kb> {
    fn found(occupation: &'kb Occupation) -> Self {
        Self {
            found: true,
            occupation: Some(occupation),
            suggestions: Vec::new(),
        }
    }

    fn not_found(suggestions: Vec<&'kb str>) -> Self {
        Self {
            found: false,
            occupation: None,
            suggestions,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct MatchingEngine<'kb> {
    pub(crate) base: Option<&'kb KnowledgeBase>,
}

/// Lower-case word set: maximal runs of alphanumeric or underscore characters.
fn word_set(text: &str) -> HashSet<String> {
    fold_case(text)
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

impl<'kb> MatchingEngine<'kb> {
    pub fn new(base: Option<&'kb KnowledgeBase>) -> Self {
        Self { base }
    }

    pub fn analyze_profile(&self, profile: &Profile) -> ProfileAnalysis {
        analyze_profile(profile)
    }

    pub fn find_occupation(&self, name: &str) -> Option<&'kb Occupation> {
        self.base.and_then(|base| base.find_occupation(name))
    }

    pub fn analyze_aspired_occupation(&self, name: &str) -> OccupationAnalysis<'kb> {
        match self.find_occupation(name) {
            Some(occupation) => OccupationAnalysis::found(occupation),
            None => OccupationAnalysis::not_found(self.similar_occupation_names(name)),
        }
    }

    /// Occupations sharing at least one word with `name`, in base order, at
    /// most `MAX_SUGGESTIONS`.
    pub fn similar_occupation_names(&self, name: &str) -> Vec<&'kb str> {
        let Some(base) = self.base else {
            return Vec::new();
        };
        let query_words = word_set(name);
        if query_words.is_empty() {
            return Vec::new();
        }

        base.occupations
            .iter()
            .filter(|occupation| !word_set(&occupation.name).is_disjoint(&query_words))
            .map(|occupation| occupation.name.as_str())
            .take(MAX_SUGGESTIONS)
            .collect()
    }

    /// Institutions for the aspired occupation, widened to similar names when
    /// the direct search is thin, de-duplicated by name, public first then
    /// alphabetical, at most `MAX_INSTITUTIONS`.
    pub fn recommend_institutions(&self, profile: &Profile) -> Vec<InstitutionMatch<'kb>> {
        let Some(base) = self.base else {
            return Vec::new();
        };
        let aspired = profile.aspired_occupation();
        let track = profile.track();

        let mut matches = base.find_institutions_for_occupation(aspired, track);

        if matches.len() < WIDEN_BELOW_INSTITUTIONS {
            for similar in self
                .similar_occupation_names(aspired)
                .into_iter()
                .take(WIDEN_QUERY_COUNT)
            {
                matches.extend(base.find_institutions_for_occupation(similar, track));
            }
        }

        let mut seen = HashSet::new();
        matches.retain(|candidate| seen.insert(candidate.name));

        matches.sort_by_key(|candidate| (!candidate.is_public(), candidate.name));
        matches.truncate(MAX_INSTITUTIONS);
        matches
    }

    /// Alternatives to the aspired occupation. With a track, sector-compatible
    /// ones are preferred when there are any.
    pub fn propose_alternatives(&self, profile: &Profile) -> Vec<&'kb Occupation> {
        let Some(base) = self.base else {
            return Vec::new();
        };
        let pool = base.alternative_occupations(profile.aspired_occupation(), ALTERNATIVE_POOL);

        if let Some(track) = profile.track() {
            let category = lookup_track(track).map(|info| info.category);
            let compatible: Vec<&'kb Occupation> = pool
                .iter()
                .copied()
                .filter(|occupation| category_compatible_with_sector(category, &occupation.sector))
                .take(MAX_ALTERNATIVES)
                .collect();
            if !compatible.is_empty() {
                return compatible;
            }
        }

        pool.into_iter().take(MAX_ALTERNATIVES).collect()
    }
}

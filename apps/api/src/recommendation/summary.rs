//! Compact, model-consumable view of a recommendation result.

use serde::Serialize;

use crate::knowledge::models::DemandLevel;
use crate::knowledge::queries::InstitutionMatch;
use crate::matching::engine::OccupationAnalysis;
use crate::matching::profile::{Profile, ProfileAnalysis, ProfileStatus};
use crate::matching::scoring::CompatibilityScores;
use crate::recommendation::assembler::RecommendationResult;

/// Entries of each ranked list carried into the summary.
pub const SUMMARY_TOP_N: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary<'a> {
    pub status: ProfileStatus,
    pub track: Option<&'a str>,
    pub current_program: Option<&'a str>,
    pub aspired_occupation: &'a str,
    pub analysis: &'a ProfileAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeSummary<'a> {
    pub name: &'a str,
    pub sector: &'a str,
    pub demand: Option<&'a DemandLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationSummary<'a> {
    pub profile: ProfileSummary<'a>,
    pub occupation_analysis: &'a OccupationAnalysis<'a>,
    pub institutions_found: usize,
    pub top_institutions: &'a [InstitutionMatch<'a>],
    pub alternatives: Vec<AlternativeSummary<'a>>,
    pub scores: CompatibilityScores,
    pub local_context: bool,
}

pub fn build_model_summary<'a>(
    profile: &'a Profile,
    result: &'a RecommendationResult<'a>,
) -> RecommendationSummary<'a> {
    let top = result.institutions.len().min(SUMMARY_TOP_N);

    RecommendationSummary {
        profile: ProfileSummary {
            status: profile.status,
            track: profile.track(),
            current_program: profile.current_program(),
            aspired_occupation: profile.aspired_occupation(),
            analysis: &result.profile_analysis,
        },
        occupation_analysis: &result.occupation_analysis,
        institutions_found: result.institutions.len(),
        top_institutions: &result.institutions[..top],
        alternatives: result
            .alternatives
            .iter()
            .take(SUMMARY_TOP_N)
            .map(|occupation| AlternativeSummary {
                name: &occupation.name,
                sector: &occupation.sector,
                demand: occupation.market_demand.as_ref(),
            })
            .collect(),
        scores: result.scores,
        local_context: true,
    }
}

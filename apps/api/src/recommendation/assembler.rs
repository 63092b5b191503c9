//! Recommendation assembler: one call that runs every matching step for a
//! profile and bundles the results.

use serde::Serialize;

use crate::knowledge::models::{KnowledgeBase, Occupation};
use crate::knowledge::queries::InstitutionMatch;
use crate::matching::engine::{MatchingEngine, OccupationAnalysis};
use crate::matching::pathway::SuggestedPathway;
use crate::matching::profile::{Profile, ProfileAnalysis};
use crate::matching::scoring::CompatibilityScores;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult<'kb> {
    pub profile_analysis: ProfileAnalysis,
    pub occupation_analysis: OccupationAnalysis<'kb>,
    pub institutions: Vec<InstitutionMatch<'kb>>,
    pub alternatives: Vec<&'kb Occupation>,
    pub scores: CompatibilityScores,
    pub pathway: SuggestedPathway<'kb>,
}

pub fn generate_recommendations<'kb>(
    base: Option<&'kb KnowledgeBase>,
    profile: &Profile,
) -> RecommendationResult<'kb> {
    let engine = MatchingEngine::new(base);

    RecommendationResult {
        profile_analysis: engine.analyze_profile(profile),
        occupation_analysis: engine.analyze_aspired_occupation(profile.aspired_occupation()),
        institutions: engine.recommend_institutions(profile),
        alternatives: engine.propose_alternatives(profile),
        scores: engine.compatibility_scores(profile),
        pathway: engine.suggest_pathway(profile),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::knowledge::fixtures::{benin_base, sample_base};
    use crate::matching::profile::ProfileStatus;

    fn medicine_candidate() -> Profile {
        Profile::new(ProfileStatus::ProspectiveStudent, "Médecin")
            .with_track("D (Mathématiques-Sciences Naturelles)")
    }

    #[test]
    fn test_sample_base_medicine_scenario() {
        let base = sample_base();
        let result = generate_recommendations(Some(&base), &medicine_candidate());

        assert!(result.occupation_analysis.found);
        assert_eq!(result.scores.market_demand, 1.0);
        assert_eq!(result.scores.track_occupation, 0.8);

        let uac = result
            .institutions
            .iter()
            .find(|m| m.abbreviation == Some("UAC"))
            .expect("UAC is recommended");
        assert_eq!(uac.programs[0].program.name, "Doctorat en Médecine");
    }

    #[test]
    fn test_unknown_occupation_scenario() {
        let base = sample_base();
        let profile = Profile::new(ProfileStatus::ProspectiveStudent, "Astronaute").with_track("C");
        let result = generate_recommendations(Some(&base), &profile);

        assert!(!result.occupation_analysis.found);
        assert!(result.occupation_analysis.suggestions.len() <= 5);
        assert!(result.institutions.is_empty());
        assert!(result.alternatives.is_empty());
        assert_eq!(result.scores, CompatibilityScores::default());
        assert_eq!(result.pathway.steps.len(), 5);
        assert!(result.pathway.skills_to_develop.is_empty());
    }

    #[test]
    fn test_generation_is_idempotent() {
        let base = benin_base();
        let profile = Profile::new(ProfileStatus::EnrolledStudent, "Développeur web")
            .with_current_program("Licence en Informatique de Gestion");

        let first = generate_recommendations(Some(&base), &profile);
        let second = generate_recommendations(Some(&base), &profile);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn test_institutions_unique_and_public_first() {
        let base = benin_base();
        for aspired in ["Médecin", "Développeur web", "informatique web", "Comptable"] {
            let profile = Profile::new(ProfileStatus::ProspectiveStudent, aspired);
            let result = generate_recommendations(Some(&base), &profile);

            let names: HashSet<&str> = result.institutions.iter().map(|m| m.name).collect();
            assert_eq!(names.len(), result.institutions.len(), "{aspired}");

            for pair in result.institutions.windows(2) {
                let key = |m: &InstitutionMatch<'_>| (!m.is_public(), m.name.to_string());
                assert!(key(&pair[0]) <= key(&pair[1]), "{aspired}: order");
            }
        }
    }

    #[test]
    fn test_scores_always_within_unit_range() {
        let base = benin_base();
        let tracks = [None, Some("A1"), Some("C"), Some("G2 (Comptabilité)"), Some("Z9")];
        for occupation in &base.occupations {
            for track in tracks {
                let mut profile = Profile::new(ProfileStatus::ProspectiveStudent, occupation.name.clone());
                profile.track = track.map(str::to_string);
                let scores = generate_recommendations(Some(&base), &profile).scores;
                for score in [
                    scores.track_occupation,
                    scores.market_demand,
                    scores.program_availability,
                ] {
                    assert!((0.0..=1.0).contains(&score), "{} {track:?}", occupation.name);
                }
            }
        }
    }

    #[test]
    fn test_absent_base_still_assembles() {
        let result = generate_recommendations(None, &medicine_candidate());
        assert!(!result.occupation_analysis.found);
        assert!(result.institutions.is_empty());
        assert_eq!(result.profile_analysis.category_label, Some("scientifique"));
        assert_eq!(result.pathway.steps.len(), 5);
    }

    #[test]
    fn test_result_serializes_program_fields_flat() {
        let base = sample_base();
        let result = generate_recommendations(Some(&base), &medicine_candidate());
        let json = serde_json::to_value(&result).unwrap();

        let program = &json["institutions"][0]["programs"][0];
        assert_eq!(program["name"], "Doctorat en Médecine");
        assert!(program["department"].is_string());
        assert_eq!(json["occupation_analysis"]["occupation"]["market_demand"], "Très élevé");
    }
}

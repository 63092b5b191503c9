//! Suggested study pathway: fixed steps per profile status plus the first
//! few skills of the aspired occupation.

use serde::Serialize;

use crate::matching::engine::MatchingEngine;
use crate::matching::profile::{Profile, ProfileStatus};

const TECHNICAL_SKILLS_SHOWN: usize = 3;
const TRANSVERSAL_SKILLS_SHOWN: usize = 2;
pub const UNDETERMINED_DURATION: &str = "À déterminer";

const PROSPECTIVE_STEPS: [&str; 5] = [
    "1. Réussir le Baccalauréat avec une mention appropriée",
    "2. S'inscrire dans une université/filière recommandée",
    "3. Compléter la formation initiale",
    "4. Effectuer des stages pratiques",
    "5. Obtenir le diplôme et rechercher un emploi/stage professionnel",
];

const ENROLLED_STEPS: [&str; 5] = [
    "1. Terminer la formation actuelle",
    "2. Évaluer les possibilités de spécialisation",
    "3. Considérer une formation complémentaire si nécessaire",
    "4. Développer l'expérience pratique",
    "5. Rechercher des opportunités dans le domaine visé",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestedPathway<'kb> {
    pub steps: &'static [&'static str],
    pub skills_to_develop: Vec<&'kb str>,
    pub total_duration: &'static str,
    /// Local-context notes about the aspired occupation, when it is known.
    pub specific_advice: Vec<&'kb str>,
}

pub fn steps_for(status: ProfileStatus) -> &'static [&'static str] {
    match status {
        ProfileStatus::ProspectiveStudent => &PROSPECTIVE_STEPS,
        ProfileStatus::EnrolledStudent => &ENROLLED_STEPS,
    }
}

impl<'kb> MatchingEngine<'kb> {
    pub fn suggest_pathway(&self, profile: &Profile) -> SuggestedPathway<'kb> {
        let mut pathway = SuggestedPathway {
            steps: steps_for(profile.status),
            skills_to_develop: Vec::new(),
            total_duration: UNDETERMINED_DURATION,
            specific_advice: Vec::new(),
        };

        if let Some(occupation) = self.find_occupation(profile.aspired_occupation()) {
            pathway.skills_to_develop = occupation
                .technical_skills
                .iter()
                .take(TECHNICAL_SKILLS_SHOWN)
                .chain(occupation.transversal_skills.iter().take(TRANSVERSAL_SKILLS_SHOWN))
                .map(String::as_str)
                .collect();

            let relevance = occupation.local_relevance.trim();
            if !relevance.is_empty() {
                pathway.specific_advice.push(relevance);
            }
        }

        pathway
    }
}

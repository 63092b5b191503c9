// Prompt constants and builders for the counselling model.

use crate::matching::profile::Profile;
use crate::recommendation::assembler::RecommendationResult;

/// System prompt shared by every counselling call.
pub const COUNSELOR_SYSTEM: &str = "Tu es un conseiller d'orientation professionnel expert du Bénin, \
    spécialisé dans l'aide aux étudiants pour leurs choix de carrière et d'études.";

const PROMPT_TOP_N: usize = 3;
const PROMPT_TECHNICAL_SKILLS: usize = 5;
const PROMPT_TRANSVERSAL_SKILLS: usize = 3;

/// Fixed closing section of the analysis prompt.
const ANALYSIS_MISSION: &str = r#"
MISSION:
Fournis une analyse personnalisée et des conseils d'orientation pour cet étudiant béninois. Ton analyse doit inclure:

1. **ÉVALUATION DU CHOIX DE CARRIÈRE** (2-3 phrases)
   - Pertinence du choix par rapport au profil et au contexte béninois
   - Forces et défis potentiels

2. **RECOMMANDATIONS D'UNIVERSITÉS** (3-4 phrases)
   - Pourquoi les universités recommandées sont adaptées
   - Conseils sur les critères de choix (public vs privé, localisation, etc.)

3. **PARCOURS PERSONNALISÉ** (4-5 points concrets)
   - Étapes clés à suivre
   - Compétences prioritaires à développer
   - Conseils spécifiques au contexte béninois

4. **CONSEILS PRATIQUES** (2-3 recommandations)
   - Actions immédiates à entreprendre
   - Ressources ou contacts utiles

STYLE: Professionnel mais bienveillant, concret et actionnable. Adapte tes conseils à la réalité du marché du travail et du système éducatif béninois.

LONGUEUR: 300-400 mots maximum.
"#;

/// Domain advice prompt. Replace `{domain}` before sending.
pub const DOMAIN_ADVICE_PROMPT_TEMPLATE: &str = "Donne un conseil pratique et spécifique de 2-3 phrases \
pour un étudiant béninois intéressé par le domaine {domain}.

Le conseil doit être:
- Actionnable
- Adapté au contexte béninois
- Encourageant

Commence directement par le conseil sans préambule.";

/// Connectivity check prompt; the expected answer is a couple of words.
pub const CONNECTION_CHECK_PROMPT: &str =
    "Bonjour, veuillez répondre simplement 'Test réussi' pour confirmer la connexion.";

fn percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

pub fn build_analysis_prompt(profile: &Profile, result: &RecommendationResult<'_>) -> String {
    let mut prompt = format!(
        "Tu es un conseiller d'orientation professionnel expert du système éducatif et du marché du travail au Bénin.

PROFIL ÉTUDIANT:
- Statut: {}
- Série de BAC: {}
- Filière actuelle: {}
- Carrière envisagée: {}

ANALYSE DU MÉTIER ENVISAGÉ:
- Métier trouvé dans la base: {}
",
        profile.status.label(),
        profile.track().unwrap_or("Non spécifié"),
        profile.current_program().unwrap_or("Non applicable"),
        profile.aspired_occupation(),
        if result.occupation_analysis.found { "Oui" } else { "Non" },
    );

    if let Some(occupation) = result.occupation_analysis.occupation {
        let technical: Vec<&str> = occupation
            .technical_skills
            .iter()
            .take(PROMPT_TECHNICAL_SKILLS)
            .map(String::as_str)
            .collect();
        let transversal: Vec<&str> = occupation
            .transversal_skills
            .iter()
            .take(PROMPT_TRANSVERSAL_SKILLS)
            .map(String::as_str)
            .collect();

        prompt.push_str(&format!(
            "- Secteur d'activité: {}
- Demande sur le marché: {}
- Pertinence pour le Bénin: {}
- Compétences techniques requises: {}
- Compétences transversales: {}
",
            occupation.sector,
            occupation.market_demand.as_ref().map_or("", |d| d.label()),
            occupation.local_relevance,
            technical.join(", "),
            transversal.join(", "),
        ));
    }

    prompt.push_str(&format!(
        "\nUNIVERSITÉS ET FILIÈRES DISPONIBLES: {} options trouvées\n",
        result.institutions.len()
    ));
    if !result.institutions.is_empty() {
        prompt.push_str("Top 3 recommandations:\n");
        for (rank, institution) in result.institutions.iter().take(PROMPT_TOP_N).enumerate() {
            prompt.push_str(&format!(
                "{}. {} ({}) - {} filières compatibles\n",
                rank + 1,
                institution.name,
                institution.status.label(),
                institution.programs.len()
            ));
        }
    }

    if !result.alternatives.is_empty() {
        prompt.push_str(&format!(
            "\nCARRIÈRES ALTERNATIVES IDENTIFIÉES: {}\n",
            result.alternatives.len()
        ));
        for alternative in result.alternatives.iter().take(PROMPT_TOP_N) {
            prompt.push_str(&format!(
                "- {} (Secteur: {})\n",
                alternative.name, alternative.sector
            ));
        }
    }

    let scores = &result.scores;
    prompt.push_str(&format!(
        "\nSCORES DE COMPATIBILITÉ:
- Compatibilité série-métier: {}
- Pertinence marché béninois: {}
- Formations disponibles: {}
",
        percent(scores.track_occupation),
        percent(scores.market_demand),
        percent(scores.program_availability),
    ));

    prompt.push_str(ANALYSIS_MISSION);
    prompt
}

pub fn build_domain_advice_prompt(domain: &str) -> String {
    DOMAIN_ADVICE_PROMPT_TEMPLATE.replace("{domain}", domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::fixtures::benin_base;
    use crate::matching::profile::ProfileStatus;
    use crate::recommendation::assembler::generate_recommendations;

    #[test]
    fn test_prompt_lists_occupation_institutions_and_scores() {
        let base = benin_base();
        let profile = Profile::new(ProfileStatus::ProspectiveStudent, "Médecin")
            .with_track("D (Mathématiques-Sciences Naturelles)");
        let result = generate_recommendations(Some(&base), &profile);
        let prompt = build_analysis_prompt(&profile, &result);

        assert!(prompt.contains("- Série de BAC: D (Mathématiques-Sciences Naturelles)"));
        assert!(prompt.contains("- Filière actuelle: Non applicable"));
        assert!(prompt.contains("- Métier trouvé dans la base: Oui"));
        assert!(prompt.contains("- Demande sur le marché: Très élevé"));
        assert!(prompt.contains("- Compétences transversales: Communication, Empathie, Gestion du stress"));
        assert!(prompt.contains("2 options trouvées"));
        assert!(prompt.contains("1. Université d'Abomey-Calavi (Public) - 1 filières compatibles"));
        assert!(prompt.contains("- Compatibilité série-métier: 80.0%"));
        assert!(prompt.contains("- Pertinence marché béninois: 100.0%"));
        assert!(prompt.ends_with("LONGUEUR: 300-400 mots maximum.\n"));
    }

    #[test]
    fn test_prompt_for_unknown_occupation_skips_details() {
        let base = benin_base();
        let profile = Profile::new(ProfileStatus::EnrolledStudent, "Astronaute")
            .with_current_program("Licence en Physique");
        let result = generate_recommendations(Some(&base), &profile);
        let prompt = build_analysis_prompt(&profile, &result);

        assert!(prompt.contains("- Série de BAC: Non spécifié"));
        assert!(prompt.contains("- Métier trouvé dans la base: Non"));
        assert!(!prompt.contains("Secteur d'activité"));
        assert!(!prompt.contains("Top 3 recommandations"));
        assert!(!prompt.contains("CARRIÈRES ALTERNATIVES"));
        assert!(prompt.contains("0 options trouvées"));
    }

    #[test]
    fn test_domain_advice_prompt_substitutes_domain() {
        let prompt = build_domain_advice_prompt("Santé");
        assert!(prompt.contains("intéressé par le domaine Santé."));
        assert!(!prompt.contains("{domain}"));
    }
}

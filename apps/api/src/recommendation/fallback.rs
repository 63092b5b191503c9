//! Template analysis rendered from a recommendation result alone, used
//! whenever the counselling model is unavailable.

use crate::matching::profile::Profile;
use crate::recommendation::assembler::RecommendationResult;

const GENERAL_RECOMMENDATIONS: &str = "

**📋 Recommandations personnalisées :**

1. **Validation du choix :** Rencontrez des professionnels du domaine pour confirmer votre intérêt
2. **Préparation académique :** Renforcez vos compétences dans les matières clés de votre série
3. **Exploration d'alternatives :** Considérez des métiers connexes dans le même secteur
4. **Recherche d'informations :** Contactez directement les universités pour les conditions d'admission

**🔍 Prochaines étapes :**
- Visitez les universités recommandées lors de leurs journées portes ouvertes
- Consultez un conseiller d'orientation dans votre établissement
- Préparez-vous aux éventuels concours d'entrée
";

pub fn fallback_analysis(profile: &Profile, result: &RecommendationResult<'_>) -> String {
    let aspired = profile.aspired_occupation();
    let origin = profile.track().unwrap_or_else(|| profile.status.label());

    let mut text = format!(
        "**🎯 Évaluation de votre choix : {aspired}**

Votre profil ({origin}) a été analysé en fonction de notre base de données des opportunités au Bénin.

**📊 Analyse de compatibilité :**
"
    );

    match result.occupation_analysis.occupation {
        Some(occupation) => {
            let demand = occupation
                .market_demand
                .as_ref()
                .map_or("À évaluer", |d| d.label());
            let relevance = match occupation.local_relevance.trim() {
                "" => "Secteur en développement",
                relevance => relevance,
            };
            text.push_str(&format!(
                "
- **Secteur d'activité :** {}
- **Demande sur le marché :** {demand}
- **Pertinence au Bénin :** {relevance}
",
                occupation.sector
            ));
        }
        None => {
            text.push_str(&format!(
                "\nLe métier '{aspired}' nécessite une analyse plus approfondie. "
            ));
        }
    }

    if result.institutions.is_empty() {
        text.push_str(
            "

**🏛️ Formations :**
Les formations pour ce métier pourraient nécessiter des recherches supplémentaires ou être disponibles dans des institutions spécialisées.
",
        );
    } else {
        text.push_str(&format!(
            "

**🏛️ Formations disponibles :**
Nous avons identifié {} institution(s) proposant des formations dans ce domaine, incluant des options publiques et privées agréées.
",
            result.institutions.len()
        ));
    }

    text.push_str(GENERAL_RECOMMENDATIONS);
    text
}

/// Advice for a domain when the model was reachable in principle but failed.
pub fn domain_advice_after_failure(domain: &str) -> String {
    format!(
        "Explorez les opportunités croissantes dans le domaine {domain} en vous rapprochant \
         des professionnels locaux et des associations sectorielles."
    )
}

/// Advice for a domain when no model is configured at all.
pub fn domain_advice_without_model(domain: &str) -> String {
    format!("Conseil : Explorez davantage les opportunités dans le domaine {domain} au Bénin.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::fixtures::benin_base;
    use crate::matching::profile::ProfileStatus;
    use crate::recommendation::assembler::generate_recommendations;

    #[test]
    fn test_fallback_for_known_occupation() {
        let base = benin_base();
        let profile = Profile::new(ProfileStatus::ProspectiveStudent, "Médecin").with_track("D");
        let result = generate_recommendations(Some(&base), &profile);
        let text = fallback_analysis(&profile, &result);

        assert!(text.starts_with("**🎯 Évaluation de votre choix : Médecin**"));
        assert!(text.contains("Votre profil (D)"));
        assert!(text.contains("- **Secteur d'activité :** Santé"));
        assert!(text.contains("- **Demande sur le marché :** Très élevé"));
        assert!(text.contains("Nous avons identifié 2 institution(s)"));
        assert!(text.contains("**🔍 Prochaines étapes :**"));
    }

    #[test]
    fn test_fallback_for_unknown_occupation_without_base() {
        let profile = Profile::new(ProfileStatus::EnrolledStudent, "Astronaute");
        let result = generate_recommendations(None, &profile);
        let text = fallback_analysis(&profile, &result);

        assert!(text.contains("Votre profil (Étudiant Universitaire)"));
        assert!(text.contains("Le métier 'Astronaute' nécessite une analyse plus approfondie."));
        assert!(text.contains("**🏛️ Formations :**"));
    }

    #[test]
    fn test_missing_demand_reads_as_to_be_assessed() {
        let base = benin_base();
        let profile = Profile::new(ProfileStatus::ProspectiveStudent, "Journaliste");
        let result = generate_recommendations(Some(&base), &profile);

        assert!(fallback_analysis(&profile, &result).contains("- **Demande sur le marché :** À évaluer"));
    }

    #[test]
    fn test_domain_advice_templates() {
        assert_eq!(
            domain_advice_without_model("Santé"),
            "Conseil : Explorez davantage les opportunités dans le domaine Santé au Bénin."
        );
        assert!(domain_advice_after_failure("Santé").contains("domaine Santé en vous rapprochant"));
    }
}

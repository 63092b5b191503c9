//! Minimal example dataset written when the configured knowledge file is missing.

use std::path::Path;

use serde_json::{json, Value};

/// The example document, in the same shape as a real knowledge file.
pub fn sample_document() -> Value {
    json!({
        "metiers": [
            {
                "nom_metier": "Médecin",
                "description": "Professionnel de santé qui diagnostique et traite les maladies",
                "secteur_activite": "Santé",
                "competences_requises_techniques": ["Anatomie", "Physiologie", "Pharmacologie"],
                "competences_requises_transversales": ["Communication", "Empathie", "Gestion du stress"],
                "formations_typiques_generales": ["Doctorat en Médecine"],
                "niveau_demande_marche": "Très élevé",
                "perspectives_croissance": true,
                "pertinence_realites_africaines_benin": "Très pertinent, forte demande en santé publique"
            }
        ],
        "secteurs_porteurs": [
            {
                "nom_secteur": "Santé",
                "description": "Secteur des soins de santé et services médicaux",
                "croissance_prevue": "Forte croissance",
                "metiers_cles": ["Médecin", "Infirmier", "Pharmacien"]
            }
        ],
        "competences": [
            {
                "nom_competence": "Communication",
                "description": "Capacité à transmettre efficacement des informations",
                "type_competence": "Transversale"
            }
        ],
        "formations_generales": [
            {
                "nom_formation_generale": "Doctorat en Médecine",
                "description": "Formation médicale complète de 7 ans",
                "metiers_prepares": ["Médecin", "Chirurgien"],
                "type": "Universitaire"
            }
        ],
        "universites": [
            {
                "nom_universite": "Université d'Abomey-Calavi",
                "sigle": "UAC",
                "statut": "Public",
                "localisation": "Abomey-Calavi",
                "site_web": "https://www.uac.bj",
                "facultes_ecoles": [
                    {
                        "nom_faculte_ecole": "Faculté des Sciences de la Santé",
                        "filieres": [
                            {
                                "nom_filiere": "Doctorat en Médecine",
                                "description_filiere": "Formation médicale générale",
                                "diplome_delivre": "Doctorat",
                                "duree_etudes_ans": 7,
                                "conditions_admission_texte": "BAC série D ou C avec mention",
                                "series_bac_requises": ["D", "C"],
                                "autres_prerequis": "Concours d'entrée",
                                "metiers_vises_typiques": ["Médecin généraliste", "Médecin spécialiste"]
                            }
                        ]
                    }
                ]
            }
        ]
    })
}

/// Writes the example document, pretty-printed, creating parent directories.
pub fn write_sample(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(&sample_document())?;
    std::fs::write(path, body)
}

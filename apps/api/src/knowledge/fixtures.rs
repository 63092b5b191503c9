//! Test knowledge base shared by the unit tests of every module.

use serde_json::json;

use crate::knowledge::loader::parse_str;
use crate::knowledge::models::KnowledgeBase;

pub fn benin_base() -> KnowledgeBase {
    let document = json!({
        "metiers": [
            occupation("Médecin", "Santé", &["Anatomie", "Physiologie", "Pharmacologie"], &["Communication", "Empathie", "Gestion du stress"], "Très élevé"),
            occupation("Infirmier", "Santé", &["Soins infirmiers", "Anatomie"], &["Empathie", "Communication"], "Élevé"),
            occupation("Pharmacien", "Santé", &["Pharmacologie", "Chimie"], &["Rigueur"], "Élevé"),
            occupation("Ingénieur en informatique", "Technologies de l'information", &["Programmation", "Algorithmique", "Bases de données"], &["Travail en équipe", "Communication"], "Très élevé"),
            occupation("Développeur web", "Technologies de l'information", &["Programmation", "HTML/CSS"], &["Travail en équipe"], "Élevé"),
            occupation("Avocat", "Juridique", &["Droit civil", "Procédure"], &["Communication", "Éloquence", "Empathie"], "Moyen"),
            occupation("Comptable", "Finance et gestion", &["Comptabilité", "Fiscalité"], &["Rigueur"], "En hausse"),
            occupation("Journaliste", "Communication et média", &["Rédaction"], &["Communication"], "")
        ],
        "secteurs_porteurs": [
            {
                "nom_secteur": "Santé",
                "description": "Soins et services médicaux",
                "croissance_prevue": "Forte croissance",
                "metiers_cles": ["Médecin", "Infirmier", "Sage-femme"]
            },
            {
                "nom_secteur": "Technologies de l'information",
                "description": "Numérique",
                "metiers_cles": ["Ingénieur en informatique", "Développeur web"]
            }
        ],
        "competences": [
            {"nom_competence": "Communication", "description": "Transmettre", "type_competence": "Transversale"},
            {"nom_competence": "Programmation", "description": "Écrire du code", "type_competence": "Technique"}
        ],
        "formations_generales": [
            {
                "nom_formation_generale": "Doctorat en Médecine",
                "description": "Formation médicale",
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
                            program("Doctorat en Médecine", "Doctorat", 7, &["D", "C"], &["Médecin généraliste", "Médecin spécialiste"]),
                            program("Licence en Sciences Infirmières", "Licence", 3, &["D"], &["Infirmier"])
                        ]
                    },
                    {
                        "nom_faculte_ecole": "Faculté de Droit et de Science Politique",
                        "filieres": [
                            program("Licence en Droit", "Licence", 3, &["A1", "A2", "B", "D"], &["Avocat", "Juriste"])
                        ]
                    },
                    {
                        "nom_faculte_ecole": "Institut de Formation et de Recherche en Informatique",
                        "filieres": [
                            program("Licence en Informatique", "Licence", 3, &["C", "D", "E"], &["Ingénieur en informatique", "Développeur web"])
                        ]
                    }
                ]
            },
            {
                "nom_universite": "Université de Parakou",
                "sigle": "UP",
                "statut": "Public",
                "localisation": "Parakou",
                "facultes_ecoles": [
                    {
                        "nom_faculte_ecole": "Faculté de Médecine",
                        "filieres": [
                            program("Doctorat en Médecine", "Doctorat", 7, &["D", "C"], &["Médecin généraliste"])
                        ]
                    }
                ]
            },
            {
                "nom_universite": "ESGIS",
                "statut": "Privé Agréé",
                "localisation": "Cotonou",
                "facultes_ecoles": [
                    {
                        "nom_faculte_ecole": "École d'Informatique",
                        "filieres": [
                            program("Licence en Génie Logiciel", "Licence", 3, &["Toutes séries"], &["Développeur web", "Ingénieur en informatique"]),
                            program("Licence en Comptabilité", "Licence", 3, &[], &["Comptable"])
                        ]
                    }
                ]
            },
            {
                "nom_universite": "HECM",
                "statut": "Privé Agréé",
                "localisation": "Cotonou",
                "facultes_ecoles": [
                    {
                        "nom_faculte_ecole": "Département Informatique de Gestion",
                        "filieres": [
                            program("Licence en Informatique de Gestion", "Licence", 3, &["B", "G2", "EA", "C", "D"], &["Développeur web"])
                        ]
                    }
                ]
            },
            {
                "nom_universite": "Université Catholique de l'Afrique de l'Ouest",
                "sigle": "UCAO",
                "statut": "Privé Agréé",
                "localisation": "Cotonou",
                "facultes_ecoles": [
                    {
                        "nom_faculte_ecole": "Faculté des Sciences Sociales",
                        "filieres": [
                            program("Licence en Journalisme", "Licence", 3, &["A1", "A2"], &["Journaliste"])
                        ]
                    }
                ]
            }
        ]
    });

    let (base, diagnostics) = parse_str(&document.to_string()).expect("fixture parses");
    assert!(diagnostics.is_empty(), "fixture has no bad entries: {diagnostics:?}");
    base
}

/// Agriculture-only base larger than every ranking cap: ten occupations in
/// one sector and twelve institutions training agronomists, alternately
/// private (odd numbers) and public (even numbers).
pub fn crowded_base() -> KnowledgeBase {
    let occupations: Vec<serde_json::Value> = [
        "Agronome",
        "Zootechnicien",
        "Pisciculteur",
        "Vétérinaire",
        "Forestier",
        "Horticulteur",
        "Aviculteur",
        "Apiculteur",
        "Pédologue",
        "Géomètre agricole",
    ]
    .iter()
    .map(|name| occupation(name, "Agriculture", &["Agronomie"], &["Rigueur"], "Élevé"))
    .collect();

    let institutions: Vec<serde_json::Value> = (1..=12)
        .map(|n| {
            let status = if n % 2 == 0 { "Public" } else { "Privé Agréé" };
            json!({
                "nom_universite": format!("Institut Agricole {n:02}"),
                "statut": status,
                "facultes_ecoles": [{
                    "nom_faculte_ecole": "Agronomie",
                    "filieres": [program("Licence en Production Végétale", "Licence", 3, &[], &["Agronome"])]
                }]
            })
        })
        .collect();

    let document = json!({"metiers": occupations, "universites": institutions});
    let (base, diagnostics) = parse_str(&document.to_string()).expect("fixture parses");
    assert!(diagnostics.is_empty(), "fixture has no bad entries: {diagnostics:?}");
    base
}

/// The single-occupation base written as the example dataset.
pub fn sample_base() -> KnowledgeBase {
    let document = crate::knowledge::sample::sample_document();
    parse_str(&document.to_string()).expect("sample parses").0
}

fn occupation(
    name: &str,
    sector: &str,
    technical: &[&str],
    transversal: &[&str],
    demand: &str,
) -> serde_json::Value {
    json!({
        "nom_metier": name,
        "description": format!("Description de {name}"),
        "secteur_activite": sector,
        "competences_requises_techniques": technical,
        "competences_requises_transversales": transversal,
        "niveau_demande_marche": demand,
        "perspectives_croissance": true,
        "pertinence_realites_africaines_benin": format!("{name} : besoin réel au Bénin")
    })
}

fn program(
    name: &str,
    credential: &str,
    years: u32,
    tracks: &[&str],
    targets: &[&str],
) -> serde_json::Value {
    json!({
        "nom_filiere": name,
        "diplome_delivre": credential,
        "duree_etudes_ans": years,
        "series_bac_requises": tracks,
        "metiers_vises_typiques": targets
    })
}

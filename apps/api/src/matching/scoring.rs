//! Compatibility scores between a profile and its aspired occupation.
//!
//! Three independent numbers in [0, 1]. No composite score is computed.

use serde::Serialize;

use crate::knowledge::models::DemandLevel;
use crate::matching::engine::MatchingEngine;
use crate::matching::profile::Profile;
use crate::matching::tracks::track_to_occupation_score;

/// Institutions needed for a full program-availability score.
const FULL_AVAILABILITY_INSTITUTIONS: f64 = 3.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CompatibilityScores {
    pub track_occupation: f64,
    pub market_demand: f64,
    pub program_availability: f64,
}

/// Demand label → score. An unrecognized label is neutral; an absent one
/// scores zero.
pub fn demand_score(demand: Option<&DemandLevel>) -> f64 {
    match demand {
        None => 0.0,
        Some(DemandLevel::VeryHigh) => 1.0,
        Some(DemandLevel::High) => 0.8,
        Some(DemandLevel::Medium) => 0.6,
        Some(DemandLevel::Low) => 0.4,
        Some(DemandLevel::VeryLow) => 0.2,
        Some(DemandLevel::Unrecognized(_)) => 0.5,
    }
}

impl<'kb> MatchingEngine<'kb> {
    /// All-zero when the aspired occupation is unknown. The track score is
    /// zero without a track.
    pub fn compatibility_scores(&self, profile: &Profile) -> CompatibilityScores {
        let Some(occupation) = self.find_occupation(profile.aspired_occupation()) else {
            return CompatibilityScores::default();
        };

        let track_occupation = profile
            .track()
            .map_or(0.0, |track| track_to_occupation_score(track, occupation));

        let institutions = self.base.map_or(0, |base| {
            base.find_institutions_for_occupation(profile.aspired_occupation(), profile.track())
                .len()
        });
        let program_availability = (institutions as f64 / FULL_AVAILABILITY_INSTITUTIONS).min(1.0);

        CompatibilityScores {
            track_occupation,
            market_demand: demand_score(occupation.market_demand.as_ref()),
            program_availability,
        }
    }
}

// Matching engine: profile analysis, occupation lookup, institution ranking,
// alternatives, compatibility scores and pathway. Pure and synchronous.

pub mod engine;
pub mod pathway;
pub mod profile;
pub mod scoring;
pub mod tracks;

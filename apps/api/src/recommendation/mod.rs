// Recommendation layer: assembles matching results, summarises them for the
// model, and renders counselling text (model-backed or template).

pub mod advisor;
pub mod assembler;
pub mod fallback;
pub mod handlers;
pub mod prompts;
pub mod summary;

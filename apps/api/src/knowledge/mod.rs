// Knowledge store: the immutable-after-load snapshot of occupations, sectors,
// skills, training paths and institutions, plus the lookups over it.

pub mod handlers;
pub mod loader;
pub mod models;
pub mod queries;
pub mod records;
pub mod sample;
pub mod store;
pub mod validation;

#[cfg(test)]
pub mod fixtures;

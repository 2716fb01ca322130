//! Scoring rubric and inter-rater reliability.

pub mod loader;
pub mod reliability;

pub use loader::{Rubric, RubricDimension};
pub use reliability::{cohens_kappa, percent_agreement};

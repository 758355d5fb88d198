//! Named-entity extraction domain

mod extractor;

pub use extractor::{Entity, EntityExtractor, EntityLabel};

#[cfg(test)]
pub use extractor::MockEntityExtractor;

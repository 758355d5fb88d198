//! Entity extractor implementations

mod rule_based;

pub use rule_based::RuleBasedEntityExtractor;

//! Entity extractor trait and types

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Coarse category of an extracted span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityLabel {
    Date,
    Money,
    Percent,
    Organization,
    /// Nationality, religious or political group ("Indian", "Buddhist")
    Nationality,
    /// Proper name that could not be narrowed further (person, place, group)
    Name,
}

impl EntityLabel {
    /// Whether this label denotes a time expression
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date)
    }

    /// Whether this label denotes a named thing (organization, group, place, person)
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Organization | Self::Nationality | Self::Name)
    }
}

/// A span of the input text tagged as an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    /// Byte offset of the span start in the source text
    pub start: usize,
    /// Byte offset one past the span end
    pub end: usize,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label,
            start,
            end,
        }
    }
}

/// Extracts named spans from free text, in order of appearance.
///
/// Output is informational only; it never influences a verdict.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EntityExtractor: Send + Sync + Debug {
    /// Extract entities; may return an empty list
    async fn extract(&self, text: &str) -> Result<Vec<Entity>, DomainError>;

    /// Get the extractor name
    fn extractor_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_categories() {
        assert!(EntityLabel::Date.is_temporal());
        assert!(!EntityLabel::Money.is_temporal());
        assert!(EntityLabel::Organization.is_named());
        assert!(EntityLabel::Name.is_named());
        assert!(EntityLabel::Nationality.is_named());
        assert!(!EntityLabel::Nationality.is_temporal());
        assert!(!EntityLabel::Percent.is_named());
    }

    #[test]
    fn test_entity_serialization() {
        let entity = Entity::new("July 2025", EntityLabel::Date, 40, 49);
        let json = serde_json::to_string(&entity).unwrap();

        assert!(json.contains("\"label\":\"date\""));
        assert!(json.contains("\"text\":\"July 2025\""));
    }
}

//! Strongly-typed identifier value objects.
//!
//! Identifiers come from datasets and external suggestion sources, so they
//! wrap arbitrary non-empty strings rather than generated UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Identifier of an ambiguous topic (search query under clarification).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    /// Creates a TopicId, rejecting empty strings.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("topic_id"));
        }
        Ok(Self(value))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TopicId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Identifier of a facet (one disambiguated interpretation of a topic).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetId(String);

impl FacetId {
    /// Creates a FacetId, rejecting empty strings.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("facet_id"));
        }
        Ok(Self(value))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FacetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FacetId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_id_rejects_blank() {
        assert!(TopicId::new("  ").is_err());
        assert!(TopicId::new("").is_err());
    }

    #[test]
    fn facet_id_parses_and_displays() {
        let id: FacetId = "12".parse().unwrap();
        assert_eq!(id.to_string(), "12");
        assert_eq!(id.as_str(), "12");
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = TopicId::new("apple").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"apple\"");

        let back: TopicId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

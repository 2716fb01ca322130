//! YAML rubric loading and validation.

use std::collections::BTreeMap;
use std::path::Path;

use csp_core::errors::RubricError;
use csp_core::types::SurveyResponse;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// One scored dimension of the rubric with its anchor descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricDimension {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Score level → anchor text. Keys are stringified (`"0"`..`"5"`).
    pub anchors: BTreeMap<String, String>,
}

/// A versioned set of rubric dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rubric {
    pub version: String,
    pub name: String,
    pub dimensions: Vec<RubricDimension>,
}

/// Loose shape used to report missing fields by name rather than as a
/// generic deserialisation failure.
#[derive(Deserialize)]
struct RawRubric {
    version: Option<Value>,
    name: Option<Value>,
    dimensions: Option<Value>,
}

#[derive(Deserialize)]
struct RawDimension {
    id: Option<Value>,
    name: Option<Value>,
    description: Option<Value>,
    anchors: Option<Value>,
}

impl Rubric {
    /// Read and validate a rubric file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RubricError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RubricError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let rubric = Self::parse(&text, &path.display().to_string())?;
        tracing::info!(
            path = %path.display(),
            version = %rubric.version,
            dimensions = rubric.dimensions.len(),
            "rubric loaded"
        );
        Ok(rubric)
    }

    /// Parse and validate rubric YAML held in memory.
    pub fn from_yaml_str(text: &str) -> Result<Self, RubricError> {
        Self::parse(text, "<string>")
    }

    fn parse(text: &str, origin: &str) -> Result<Self, RubricError> {
        let yaml_err = |e: serde_yaml::Error| RubricError::Yaml {
            path: origin.to_string(),
            message: e.to_string(),
        };

        let raw: RawRubric = serde_yaml::from_str(text).map_err(yaml_err)?;
        let version = required(raw.version, "version")?;
        let name = required(raw.name, "name")?;

        let items = match raw.dimensions {
            Some(Value::Sequence(items)) if !items.is_empty() => items,
            Some(_) => return Err(RubricError::NoDimensions),
            None => return Err(missing("dimensions")),
        };

        let dimensions = items
            .into_iter()
            .map(|item| {
                let raw: RawDimension = serde_yaml::from_value(item).map_err(yaml_err)?;
                let anchors = match raw.anchors {
                    Some(Value::Mapping(m)) => m
                        .into_iter()
                        .map(|(k, v)| (scalar_string(k), scalar_string(v)))
                        .collect(),
                    Some(Value::Null) => BTreeMap::new(),
                    Some(_) => {
                        return Err(RubricError::Yaml {
                            path: origin.to_string(),
                            message: "dimension anchors must be a mapping".to_string(),
                        })
                    }
                    None => return Err(missing("dimensions[].anchors")),
                };
                Ok(RubricDimension {
                    id: required(raw.id, "dimensions[].id")?,
                    name: required(raw.name, "dimensions[].name")?,
                    description: required(raw.description, "dimensions[].description")?,
                    anchors,
                })
            })
            .collect::<Result<Vec<_>, RubricError>>()?;

        Ok(Self {
            version,
            name,
            dimensions,
        })
    }

    /// Dimension ids in rubric order.
    pub fn dimension_ids(&self) -> Vec<&str> {
        self.dimensions.iter().map(|d| d.id.as_str()).collect()
    }

    pub fn dimension(&self, id: &str) -> Option<&RubricDimension> {
        self.dimensions.iter().find(|d| d.id == id)
    }

    /// Dimension ids used in `response` that this rubric does not declare,
    /// sorted and deduplicated.
    pub fn unknown_dimensions(&self, response: &SurveyResponse) -> Vec<String> {
        let mut unknown: Vec<String> = response
            .responses
            .iter()
            .flat_map(|e| e.dimensions.keys())
            .filter(|id| self.dimension(id).is_none())
            .cloned()
            .collect();
        unknown.sort_unstable();
        unknown.dedup();
        unknown
    }
}

fn missing(field: &str) -> RubricError {
    RubricError::MissingField {
        field: field.to_string(),
    }
}

fn required(value: Option<Value>, field: &str) -> Result<String, RubricError> {
    match value {
        Some(Value::Null) | None => Err(missing(field)),
        Some(v) => Ok(scalar_string(v)),
    }
}

/// YAML scalars as strings; numeric versions like `1.0` stay `"1.0"`.
fn scalar_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUBRIC: &str = r#"
version: 1.0
name: CSP rubric
dimensions:
  - id: transferability
    name: Transferability
    description: How readily the technique transfers to capability work
    anchors:
      0: none
      5: direct
"#;

    #[test]
    fn test_numeric_keys_are_stringified() {
        let rubric = Rubric::from_yaml_str(RUBRIC).unwrap();
        assert_eq!(rubric.version, "1.0");
        assert_eq!(rubric.dimensions[0].anchors["5"], "direct");
    }

    #[test]
    fn test_missing_name_reported() {
        let err = Rubric::from_yaml_str("version: 1\ndimensions: [{id: a}]").unwrap_err();
        assert!(matches!(err, RubricError::MissingField { ref field } if field == "name"));
    }

    #[test]
    fn test_empty_dimensions_rejected() {
        let err = Rubric::from_yaml_str("version: 1\nname: x\ndimensions: []").unwrap_err();
        assert!(matches!(err, RubricError::NoDimensions));
    }
}

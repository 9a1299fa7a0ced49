//! Configuration Sections and the Generic Field Binder
//!
//! Ability blueprints are described by flat key/value sections inside the
//! psychic definition files. This module provides the generic value model
//! (`ConfigValue`/`ConfigSection`), the data-only field schema (`FieldSpec`),
//! and the binder that converts and range-checks a section against a schema.
//!
//! Binding is total: every declared field is processed and every violation is
//! collected, so a single load attempt reports all configuration mistakes at
//! once instead of stopping at the first one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::concept::AbilityType;
use super::stats::{Damage, ItemRef, StatSpec};

/// A flat key → value configuration section.
pub type ConfigSection = BTreeMap<String, ConfigValue>;

/// A dynamically typed configuration value as it appears in a definition file.
///
/// Untagged so RON authors write plain literals: `40`, `10.0`, `true`,
/// `"ACTIVE"`, `["line"]`, `{ "coefficient": 1.5 }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<ConfigValue>),
    Section(ConfigSection),
}

impl ConfigValue {
    /// Human-readable name of this value's shape, used in mismatch reports.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Int(_) => "int",
            ConfigValue::Float(_) => "float",
            ConfigValue::Text(_) => "text",
            ConfigValue::List(_) => "list",
            ConfigValue::Section(_) => "section",
        }
    }

    /// Render a scalar value for template substitution.
    /// Lists and nested sections have no single-string rendering.
    pub fn as_display_string(&self) -> Option<String> {
        match self {
            ConfigValue::Bool(b) => Some(b.to_string()),
            ConfigValue::Int(n) => Some(n.to_string()),
            ConfigValue::Float(x) => Some(x.to_string()),
            ConfigValue::Text(s) => Some(s.clone()),
            ConfigValue::List(_) | ConfigValue::Section(_) => None,
        }
    }
}

/// Semantic type a configuration field converts into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Int,
    Float,
    Bool,
    /// List of text lines (ability descriptions).
    TextList,
    /// PASSIVE / ACTIVE / TOGGLE.
    AbilityType,
    /// Nested damage descriptor section.
    Damage,
    /// Nested healing statistic section.
    Healing,
    /// Nested item identity section.
    Item,
}

impl FieldKind {
    fn expected_name(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Int => "int",
            FieldKind::Float => "float",
            FieldKind::Bool => "bool",
            FieldKind::TextList => "list of text",
            FieldKind::AbilityType => "PASSIVE, ACTIVE or TOGGLE",
            FieldKind::Damage => "damage section",
            FieldKind::Healing => "healing section",
            FieldKind::Item => "item section",
        }
    }
}

/// Data-only descriptor of one configuration field.
///
/// The key doubles as the section key; `min` applies to int/float kinds only.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min: Option<f64>,
}

/// A configuration violation detected during binding.
///
/// Fatal to the concept being loaded; the loader attaches psychic/ability
/// context when reporting.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A required key is absent from the section.
    MissingField { key: String },
    /// A value is present but cannot convert to the declared kind.
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: String,
    },
    /// A numeric value is below the field's minimum.
    OutOfRange { key: String, min: f64, value: f64 },
}

impl ConfigError {
    /// The offending configuration key.
    pub fn key(&self) -> &str {
        match self {
            ConfigError::MissingField { key }
            | ConfigError::TypeMismatch { key, .. }
            | ConfigError::OutOfRange { key, .. } => key,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingField { key } => {
                write!(f, "missing required field '{}'", key)
            }
            ConfigError::TypeMismatch {
                key,
                expected,
                found,
            } => {
                write!(f, "field '{}' expected {}, found {}", key, expected, found)
            }
            ConfigError::OutOfRange { key, min, value } => {
                write!(f, "field '{}' must be >= {}, found {}", key, min, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A successfully converted field value.
#[derive(Clone, Debug)]
pub enum BoundValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    TextList(Vec<String>),
    AbilityType(AbilityType),
    Damage(Damage),
    Healing(StatSpec),
    Item(ItemRef),
}

/// The typed result of binding a section against a schema.
///
/// Optional fields that were absent simply have no entry; accessors return
/// `None` and callers apply their defaults.
#[derive(Clone, Debug, Default)]
pub struct BoundConfig {
    values: BTreeMap<&'static str, BoundValue>,
}

impl BoundConfig {
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(BoundValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(BoundValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        match self.values.get(key) {
            Some(BoundValue::Float(x)) => Some(*x),
            _ => None,
        }
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(BoundValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn text_list(&self, key: &str) -> Option<&[String]> {
        match self.values.get(key) {
            Some(BoundValue::TextList(lines)) => Some(lines),
            _ => None,
        }
    }

    pub fn ability_type(&self, key: &str) -> Option<AbilityType> {
        match self.values.get(key) {
            Some(BoundValue::AbilityType(t)) => Some(*t),
            _ => None,
        }
    }

    pub fn damage(&self, key: &str) -> Option<Damage> {
        match self.values.get(key) {
            Some(BoundValue::Damage(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn healing(&self, key: &str) -> Option<StatSpec> {
        match self.values.get(key) {
            Some(BoundValue::Healing(s)) => Some(*s),
            _ => None,
        }
    }

    pub fn item(&self, key: &str) -> Option<&ItemRef> {
        match self.values.get(key) {
            Some(BoundValue::Item(item)) => Some(item),
            _ => None,
        }
    }
}

/// Bind a configuration section against a field schema.
///
/// Processes every declared field and collects every violation; returns the
/// fully typed values only when no field failed.
pub fn bind(section: &ConfigSection, schema: &[FieldSpec]) -> Result<BoundConfig, Vec<ConfigError>> {
    let mut bound = BoundConfig::default();
    let mut errors = Vec::new();

    for spec in schema {
        let raw = match section.get(spec.key) {
            Some(raw) => raw,
            None => {
                if spec.required {
                    errors.push(ConfigError::MissingField {
                        key: spec.key.to_string(),
                    });
                }
                continue;
            }
        };

        match convert(spec, raw) {
            Ok(value) => {
                if let Some(err) = range_violation(spec, &value) {
                    errors.push(err);
                } else {
                    bound.values.insert(spec.key, value);
                }
            }
            Err(err) => errors.push(err),
        }
    }

    if errors.is_empty() {
        Ok(bound)
    } else {
        Err(errors)
    }
}

/// Convert a raw value to the field's declared kind.
fn convert(spec: &FieldSpec, raw: &ConfigValue) -> Result<BoundValue, ConfigError> {
    let mismatch = || ConfigError::TypeMismatch {
        key: spec.key.to_string(),
        expected: spec.kind.expected_name(),
        found: raw.kind_name().to_string(),
    };

    match (spec.kind, raw) {
        (FieldKind::Text, ConfigValue::Text(s)) => Ok(BoundValue::Text(s.clone())),
        (FieldKind::Int, ConfigValue::Int(n)) => Ok(BoundValue::Int(*n)),
        // Integer literals are accepted where a float is declared.
        (FieldKind::Float, ConfigValue::Float(x)) => Ok(BoundValue::Float(*x)),
        (FieldKind::Float, ConfigValue::Int(n)) => Ok(BoundValue::Float(*n as f64)),
        (FieldKind::Bool, ConfigValue::Bool(b)) => Ok(BoundValue::Bool(*b)),
        (FieldKind::TextList, ConfigValue::List(items)) => {
            let mut lines = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    ConfigValue::Text(s) => lines.push(s.clone()),
                    other => {
                        return Err(ConfigError::TypeMismatch {
                            key: spec.key.to_string(),
                            expected: spec.kind.expected_name(),
                            found: format!("list containing {}", other.kind_name()),
                        })
                    }
                }
            }
            Ok(BoundValue::TextList(lines))
        }
        (FieldKind::AbilityType, ConfigValue::Text(s)) => match AbilityType::parse(s) {
            Some(t) => Ok(BoundValue::AbilityType(t)),
            None => Err(ConfigError::TypeMismatch {
                key: spec.key.to_string(),
                expected: spec.kind.expected_name(),
                found: format!("'{}'", s),
            }),
        },
        (FieldKind::Damage, ConfigValue::Section(nested)) => {
            Damage::from_section(spec.key, nested).map(BoundValue::Damage)
        }
        (FieldKind::Healing, ConfigValue::Section(nested)) => {
            StatSpec::from_section(spec.key, nested).map(BoundValue::Healing)
        }
        (FieldKind::Item, ConfigValue::Section(nested)) => {
            ItemRef::from_section(spec.key, nested).map(BoundValue::Item)
        }
        _ => Err(mismatch()),
    }
}

/// Check a converted numeric value against the field's minimum.
fn range_violation(spec: &FieldSpec, value: &BoundValue) -> Option<ConfigError> {
    let min = spec.min?;
    let numeric = match value {
        BoundValue::Int(n) => *n as f64,
        BoundValue::Float(x) => *x,
        _ => return None,
    };
    if numeric < min {
        Some(ConfigError::OutOfRange {
            key: spec.key.to_string(),
            min,
            value: numeric,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec {
                key: "label",
                kind: FieldKind::Text,
                required: true,
                min: None,
            },
            FieldSpec {
                key: "count",
                kind: FieldKind::Int,
                required: false,
                min: Some(0.0),
            },
            FieldSpec {
                key: "weight",
                kind: FieldKind::Float,
                required: false,
                min: Some(0.0),
            },
        ]
    }

    #[test]
    fn test_bind_collects_all_errors() {
        let mut section = ConfigSection::new();
        section.insert("count".to_string(), ConfigValue::Int(-3));
        // "label" missing, "count" out of range: both must be reported.
        let errors = bind(&section, &schema()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::MissingField { key } if key == "label")));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::OutOfRange { key, .. } if key == "count")));
    }

    #[test]
    fn test_int_literal_accepted_as_float() {
        let mut section = ConfigSection::new();
        section.insert("label".to_string(), ConfigValue::Text("x".to_string()));
        section.insert("weight".to_string(), ConfigValue::Int(4));
        let bound = bind(&section, &schema()).unwrap();
        assert_eq!(bound.float("weight"), Some(4.0));
    }

    #[test]
    fn test_type_mismatch_reports_shapes() {
        let mut section = ConfigSection::new();
        section.insert("label".to_string(), ConfigValue::Int(1));
        let errors = bind(&section, &schema()).unwrap_err();
        assert_eq!(
            errors,
            vec![ConfigError::TypeMismatch {
                key: "label".to_string(),
                expected: "text",
                found: "int".to_string(),
            }]
        );
    }
}

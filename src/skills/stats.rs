//! Combat Statistics Boundary Types
//!
//! The combat/statistics subsystem is an external collaborator: this module
//! only models the descriptors a blueprint stores (which stat a value scales
//! with and by how much) and the lookup function a caller supplies to turn a
//! descriptor into a caster-specific number.

use std::fmt;

use super::config::{ConfigError, ConfigSection, ConfigValue};

/// Which caster statistic a combat value scales with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalingStat {
    AttackPower,
    SpellPower,
}

impl ScalingStat {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "attack-power" => Some(ScalingStat::AttackPower),
            "spell-power" => Some(ScalingStat::SpellPower),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScalingStat::AttackPower => "attack-power",
            ScalingStat::SpellPower => "spell-power",
        }
    }
}

impl fmt::Display for ScalingStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A statistic descriptor: `stat value × coefficient`.
///
/// Healing values are configured as a bare `StatSpec`; damage wraps one in a
/// [`Damage`] descriptor together with its delivery kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatSpec {
    pub scales_with: ScalingStat,
    pub coefficient: f64,
}

impl StatSpec {
    /// Parse a nested `{ "scales-with": ..., "coefficient": ... }` section.
    /// `parent_key` prefixes nested keys in error reports (`healing.coefficient`).
    pub fn from_section(parent_key: &str, section: &ConfigSection) -> Result<Self, ConfigError> {
        let scales_with = required_text(parent_key, "scales-with", section)?;
        let scales_with = ScalingStat::parse(&scales_with).ok_or_else(|| ConfigError::TypeMismatch {
            key: format!("{}.scales-with", parent_key),
            expected: "attack-power or spell-power",
            found: format!("'{}'", scales_with),
        })?;
        let coefficient = required_float(parent_key, "coefficient", section)?;
        Ok(StatSpec {
            scales_with,
            coefficient,
        })
    }
}

/// How a damaging ability delivers its damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageKind {
    Melee,
    Ranged,
    Spell,
}

impl DamageKind {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "melee" => Some(DamageKind::Melee),
            "ranged" => Some(DamageKind::Ranged),
            "spell" => Some(DamageKind::Spell),
            _ => None,
        }
    }
}

/// Damage descriptor: delivery kind plus the statistic it scales with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Damage {
    pub kind: DamageKind,
    pub stats: StatSpec,
}

impl Damage {
    /// Parse a nested `{ "type": ..., "scales-with": ..., "coefficient": ... }` section.
    pub fn from_section(parent_key: &str, section: &ConfigSection) -> Result<Self, ConfigError> {
        let kind = required_text(parent_key, "type", section)?;
        let kind = DamageKind::parse(&kind).ok_or_else(|| ConfigError::TypeMismatch {
            key: format!("{}.type", parent_key),
            expected: "melee, ranged or spell",
            found: format!("'{}'", kind),
        })?;
        let stats = StatSpec::from_section(parent_key, section)?;
        Ok(Damage { kind, stats })
    }
}

/// Item identity used to gate ability activation (the "wand").
///
/// A stand-in for the host engine's item type; concepts store and return it
/// only as copies so callers can never alias the stored value.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemRef {
    pub material: String,
    pub display_name: Option<String>,
}

impl ItemRef {
    /// Parse a nested `{ "material": ..., "display-name": ... }` section.
    pub fn from_section(parent_key: &str, section: &ConfigSection) -> Result<Self, ConfigError> {
        let material = required_text(parent_key, "material", section)?;
        let display_name = match section.get("display-name") {
            None => None,
            Some(ConfigValue::Text(s)) => Some(s.clone()),
            Some(other) => {
                return Err(ConfigError::TypeMismatch {
                    key: format!("{}.display-name", parent_key),
                    expected: "text",
                    found: other.kind_name().to_string(),
                })
            }
        };
        Ok(ItemRef {
            material,
            display_name,
        })
    }
}

/// Caster statistics supplied at tooltip render time.
///
/// The lookup maps a statistic descriptor to the caster's current value for
/// it. [`zero_stats`] is the default when no caster is in scope.
pub type StatLookup = dyn Fn(&StatSpec) -> f64;

/// Default lookup: every statistic resolves to 0.0.
pub fn zero_stats(_spec: &StatSpec) -> f64 {
    0.0
}

fn required_text(parent_key: &str, key: &str, section: &ConfigSection) -> Result<String, ConfigError> {
    match section.get(key) {
        Some(ConfigValue::Text(s)) => Ok(s.clone()),
        Some(other) => Err(ConfigError::TypeMismatch {
            key: format!("{}.{}", parent_key, key),
            expected: "text",
            found: other.kind_name().to_string(),
        }),
        None => Err(ConfigError::MissingField {
            key: format!("{}.{}", parent_key, key),
        }),
    }
}

fn required_float(parent_key: &str, key: &str, section: &ConfigSection) -> Result<f64, ConfigError> {
    match section.get(key) {
        Some(ConfigValue::Float(x)) => Ok(*x),
        Some(ConfigValue::Int(n)) => Ok(*n as f64),
        Some(other) => Err(ConfigError::TypeMismatch {
            key: format!("{}.{}", parent_key, key),
            expected: "float",
            found: other.kind_name().to_string(),
        }),
        None => Err(ConfigError::MissingField {
            key: format!("{}.{}", parent_key, key),
        }),
    }
}

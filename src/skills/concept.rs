//! Ability Concepts (Blueprints)
//!
//! An `AbilityConcept` is the validated, immutable definition of one ability:
//! identity, timing, cost, combat values and description text. Loading goes
//! through two explicit stages: the binder produces a mutable [`ConceptDraft`]
//! from the raw section, and the draft is consumed exactly once to build the
//! immutable concept (rendering the phase-1 description templates on the way).
//! A failed bind means no concept value ever exists, so a half-initialized
//! blueprint cannot be observed.

use std::fmt;

use super::config::{bind, ConfigError, ConfigSection, FieldKind, FieldSpec};
use super::stats::{Damage, ItemRef, StatSpec};
use super::template::{render_config_vars_all, TemplateVars};
use super::tooltip::format_stat;
use super::TICKS_PER_SECOND;

/// How an ability is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AbilityType {
    /// Applied automatically; never cast.
    Passive,
    /// Cast directly by the caster.
    Active,
    /// Switched on and off. Never auto-selected, only configured explicitly.
    Toggle,
}

impl AbilityType {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "PASSIVE" => Some(AbilityType::Passive),
            "ACTIVE" => Some(AbilityType::Active),
            "TOGGLE" => Some(AbilityType::Toggle),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AbilityType::Passive => "PASSIVE",
            AbilityType::Active => "ACTIVE",
            AbilityType::Toggle => "TOGGLE",
        }
    }
}

impl fmt::Display for AbilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field schema for ability concept sections.
///
/// `duration-ticks` deliberately carries no minimum: the schema validates
/// every other numeric field, and negative durations clamp to zero at draft
/// assembly instead of failing the load.
pub const CONCEPT_SCHEMA: &[FieldSpec] = &[
    FieldSpec {
        key: "display-name",
        kind: FieldKind::Text,
        required: false,
        min: None,
    },
    FieldSpec {
        key: "type",
        kind: FieldKind::AbilityType,
        required: false,
        min: None,
    },
    FieldSpec {
        key: "cooldown-ticks",
        kind: FieldKind::Int,
        required: false,
        min: Some(0.0),
    },
    FieldSpec {
        key: "cost",
        kind: FieldKind::Float,
        required: false,
        min: Some(0.0),
    },
    FieldSpec {
        key: "casting-ticks",
        kind: FieldKind::Int,
        required: false,
        min: Some(0.0),
    },
    FieldSpec {
        key: "interruptible",
        kind: FieldKind::Bool,
        required: false,
        min: None,
    },
    FieldSpec {
        key: "duration-ticks",
        kind: FieldKind::Int,
        required: false,
        min: None,
    },
    FieldSpec {
        key: "range",
        kind: FieldKind::Float,
        required: false,
        min: Some(0.0),
    },
    FieldSpec {
        key: "damage",
        kind: FieldKind::Damage,
        required: false,
        min: None,
    },
    FieldSpec {
        key: "healing",
        kind: FieldKind::Healing,
        required: false,
        min: None,
    },
    FieldSpec {
        key: "wand",
        kind: FieldKind::Item,
        required: false,
        min: None,
    },
    FieldSpec {
        key: "description",
        kind: FieldKind::TextList,
        required: true,
        min: None,
    },
];

/// Tick counts are stored as `u32`; values outside that range saturate at the
/// boundaries (negatives to zero, oversized to `u32::MAX`).
fn ticks_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// Mutable load-time stage of a concept.
///
/// Produced by the binder, consumed once by [`ConceptDraft::into_concept`].
#[derive(Clone, Debug)]
pub struct ConceptDraft {
    pub display_name: Option<String>,
    pub ability_type: Option<AbilityType>,
    pub cooldown_ticks: u32,
    pub cost: f64,
    pub casting_ticks: u32,
    pub interruptible: bool,
    pub duration_ticks: u32,
    pub range: f64,
    pub damage: Option<Damage>,
    pub healing: Option<StatSpec>,
    pub wand: Option<ItemRef>,
    pub description: Vec<String>,
}

impl ConceptDraft {
    /// Bind a raw configuration section into a draft.
    ///
    /// Collects every violation; a draft only exists when the whole section
    /// bound cleanly.
    pub fn from_section(section: &ConfigSection) -> Result<Self, Vec<ConfigError>> {
        let bound = bind(section, CONCEPT_SCHEMA)?;
        Ok(ConceptDraft {
            display_name: bound.text("display-name").map(String::from),
            ability_type: bound.ability_type("type"),
            cooldown_ticks: ticks_u32(bound.int("cooldown-ticks").unwrap_or(0)),
            cost: bound.float("cost").unwrap_or(0.0),
            casting_ticks: ticks_u32(bound.int("casting-ticks").unwrap_or(0)),
            interruptible: bound.bool("interruptible").unwrap_or(false),
            // No range validator on duration: negative values clamp to zero.
            duration_ticks: ticks_u32(bound.int("duration-ticks").unwrap_or(0)),
            range: bound.float("range").unwrap_or(0.0),
            damage: bound.damage("damage"),
            healing: bound.healing("healing"),
            wand: bound.item("wand").cloned(),
            description: bound
                .text_list("description")
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
        })
    }

    /// Consume the draft into an immutable concept.
    ///
    /// Resolves the ability type (explicit config value wins, else ACTIVE when
    /// the bound behavior declares the active capability, else PASSIVE),
    /// defaults the display name to the container's description name, and
    /// runs the phase-1 template pass over the description.
    pub fn into_concept(
        self,
        name: &str,
        container_name: &str,
        psychic_name: &str,
        behavior_active: bool,
        section: &ConfigSection,
    ) -> AbilityConcept {
        let ability_type = match self.ability_type {
            Some(explicit) => explicit,
            None if behavior_active => AbilityType::Active,
            None => AbilityType::Passive,
        };
        let display_name = self
            .display_name
            .clone()
            .unwrap_or_else(|| container_name.to_string());

        let vars = self.phase_one_vars(&display_name, section);
        let description = render_config_vars_all(&self.description, &vars);

        AbilityConcept {
            name: name.to_string(),
            display_name,
            ability_type,
            cooldown_ticks: self.cooldown_ticks,
            cost: self.cost,
            casting_ticks: self.casting_ticks,
            interruptible: self.interruptible,
            duration_ticks: self.duration_ticks,
            range: self.range,
            damage: self.damage,
            healing: self.healing,
            wand: self.wand,
            description,
            psychic_name: psychic_name.to_string(),
        }
    }

    /// Config-variable surface for the phase-1 pass: every scalar entry of
    /// the raw section by its own key, plus the derived second-based values.
    fn phase_one_vars(&self, display_name: &str, section: &ConfigSection) -> TemplateVars {
        let mut vars = TemplateVars::new();
        for (key, value) in section {
            if let Some(text) = value.as_display_string() {
                vars.insert(key.clone(), text);
            }
        }
        vars.insert("display-name".to_string(), display_name.to_string());
        vars.insert(
            "cooldown-time".to_string(),
            format_stat(self.cooldown_ticks as f64 / TICKS_PER_SECOND),
        );
        vars.insert("cost".to_string(), format_stat(self.cost));
        vars.insert(
            "casting-time".to_string(),
            format_stat(self.casting_ticks as f64 / TICKS_PER_SECOND),
        );
        vars.insert("range".to_string(), format_stat(self.range));
        vars.insert(
            "duration-time".to_string(),
            format_stat(self.duration_ticks as f64 / TICKS_PER_SECOND),
        );
        vars
    }
}

/// Immutable ability blueprint.
///
/// Built exactly once per ability during load and shared read-only afterwards
/// (the loader wraps it in an `Arc`). All access goes through getters; the
/// `wand` getter returns a defensive copy.
#[derive(Clone, Debug)]
pub struct AbilityConcept {
    name: String,
    display_name: String,
    ability_type: AbilityType,
    cooldown_ticks: u32,
    cost: f64,
    casting_ticks: u32,
    interruptible: bool,
    duration_ticks: u32,
    range: f64,
    damage: Option<Damage>,
    healing: Option<StatSpec>,
    wand: Option<ItemRef>,
    description: Vec<String>,
    psychic_name: String,
}

impl AbilityConcept {
    /// Unique ability identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Localized label shown in tooltips.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn ability_type(&self) -> AbilityType {
        self.ability_type
    }

    pub fn cooldown_ticks(&self) -> u32 {
        self.cooldown_ticks
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn casting_ticks(&self) -> u32 {
        self.casting_ticks
    }

    /// Whether the casting window is a channel that can be interrupted.
    pub fn interruptible(&self) -> bool {
        self.interruptible
    }

    pub fn duration_ticks(&self) -> u32 {
        self.duration_ticks
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn damage(&self) -> Option<Damage> {
        self.damage
    }

    pub fn healing(&self) -> Option<StatSpec> {
        self.healing
    }

    /// The item bound to this ability, as a defensive copy. Mutating the
    /// returned value never affects the concept.
    pub fn wand(&self) -> Option<ItemRef> {
        self.wand.clone()
    }

    /// Description lines, phase-1 rendered at load time.
    pub fn description(&self) -> &[String] {
        &self.description
    }

    /// Name of the owning psychic (lookup-only back-reference).
    pub fn psychic_name(&self) -> &str {
        &self.psychic_name
    }

    pub fn cooldown_seconds(&self) -> f64 {
        self.cooldown_ticks as f64 / TICKS_PER_SECOND
    }

    pub fn casting_seconds(&self) -> f64 {
        self.casting_ticks as f64 / TICKS_PER_SECOND
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_ticks as f64 / TICKS_PER_SECOND
    }
}

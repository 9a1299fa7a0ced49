//! Behaviors, Ability Containers and Psychic Concepts
//!
//! A behavior is the runtime implementation an ability binds to. Behaviors
//! are described by data (`BehaviorSpec`): an explicit active-capability flag
//! decides type promotion, a constructor function stamps out per-caster
//! behavior objects, and an optional hook extends tooltip rendering. The
//! container ties one behavior to one validated concept; the psychic concept
//! aggregates the containers of one skill set.

use bevy::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use super::concept::{AbilityConcept, ConceptDraft};
use super::config::{ConfigError, ConfigSection};
use super::instance::AbilityInstance;
use super::stats::StatLookup;
use super::tooltip::{render_tooltip, TooltipBuilder, TooltipHook, TooltipText};

/// Per-caster runtime logic of an ability.
///
/// The scheduler that drives casters is outside this crate; instances call
/// these hooks as their state machine advances.
pub trait AbilityBehavior: Send + Sync {
    /// Called once when an instance is attached to its caster.
    fn on_enable(&mut self, _concept: &AbilityConcept) {}

    /// Called when a cast completes (immediately for instant abilities).
    fn on_cast(&mut self, _concept: &AbilityConcept) {}
}

/// Descriptor of one runtime implementation.
#[derive(Clone, Copy, Debug)]
pub struct BehaviorSpec {
    pub name: &'static str,
    /// Active-capability flag: concepts bound to this behavior default to
    /// ACTIVE unless the configuration says otherwise.
    pub active: bool,
    pub build: fn() -> Box<dyn AbilityBehavior>,
    pub tooltip_hook: Option<TooltipHook>,
}

/// Registry of available behaviors, looked up by name during load.
///
/// An ability configured with a name missing from this registry is a fatal
/// load error (a packaging/config mismatch, not a runtime condition).
#[derive(Default)]
pub struct BehaviorRegistry {
    behaviors: HashMap<&'static str, BehaviorSpec>,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, spec: BehaviorSpec) {
        self.behaviors.insert(spec.name, spec);
    }

    pub fn get(&self, name: &str) -> Option<&BehaviorSpec> {
        self.behaviors.get(name)
    }

    pub fn behavior_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.behaviors.keys().copied()
    }

    /// The built-in behavior set shipped with this prototype.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(BehaviorSpec {
            name: "focus-aura",
            active: false,
            build: || Box::new(FocusAura),
            tooltip_hook: None,
        });
        registry.register(BehaviorSpec {
            name: "psychic-bolt",
            active: true,
            build: || Box::<PsychicBolt>::default(),
            tooltip_hook: Some(psychic_bolt_tooltip),
        });
        registry.register(BehaviorSpec {
            name: "radiant-mend",
            active: true,
            build: || Box::<RadiantMend>::default(),
            tooltip_hook: None,
        });
        registry
    }
}

/// Passive aura granted while the ability is held.
struct FocusAura;

impl AbilityBehavior for FocusAura {}

/// Single-target bolt of psychic force.
#[derive(Default)]
struct PsychicBolt {
    casts: u32,
}

impl AbilityBehavior for PsychicBolt {
    fn on_cast(&mut self, concept: &AbilityConcept) {
        self.casts += 1;
        debug!("{}: bolt cast #{}", concept.name(), self.casts);
    }
}

fn psychic_bolt_tooltip(tooltip: &mut TooltipBuilder, _stats: &StatLookup) -> Result<(), String> {
    tooltip.add_line("관통: 대상의 보호막을 무시합니다.");
    Ok(())
}

/// Channelled single-target heal.
#[derive(Default)]
struct RadiantMend {
    casts: u32,
}

impl AbilityBehavior for RadiantMend {
    fn on_cast(&mut self, concept: &AbilityConcept) {
        self.casts += 1;
        debug!("{}: mend channel complete #{}", concept.name(), self.casts);
    }
}

/// Binds one behavior to one validated concept and acts as the instance
/// factory. A container only exists for concepts that loaded cleanly.
#[derive(Debug)]
pub struct AbilityContainer {
    name: String,
    behavior: BehaviorSpec,
    concept: Arc<AbilityConcept>,
}

impl AbilityContainer {
    /// Build the container by binding and validating the ability section.
    ///
    /// On failure the concept is never constructed and the caller must not
    /// register anything; all violations are returned together.
    pub fn load(
        name: &str,
        behavior: BehaviorSpec,
        psychic_name: &str,
        section: &ConfigSection,
    ) -> Result<Self, Vec<ConfigError>> {
        let draft = ConceptDraft::from_section(section)?;
        let concept = draft.into_concept(name, name, psychic_name, behavior.active, section);
        Ok(AbilityContainer {
            name: name.to_string(),
            behavior,
            concept: Arc::new(concept),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn behavior(&self) -> &BehaviorSpec {
        &self.behavior
    }

    pub fn concept(&self) -> &Arc<AbilityConcept> {
        &self.concept
    }

    /// Stamp out a runtime instance for one caster: one concept, many
    /// instances.
    pub fn create_instance(&self) -> AbilityInstance {
        let mut behavior = (self.behavior.build)();
        behavior.on_enable(&self.concept);
        AbilityInstance::new(Arc::clone(&self.concept), behavior)
    }

    /// Render this ability's tooltip, including the behavior's hook.
    pub fn render_tooltip(&self, stats: &StatLookup) -> TooltipText {
        render_tooltip(&self.concept, stats, self.behavior.tooltip_hook)
    }
}

/// A skill set: the aggregate owning one or more ability containers.
#[derive(Debug)]
pub struct PsychicConcept {
    name: String,
    display_name: String,
    containers: Vec<AbilityContainer>,
}

impl PsychicConcept {
    pub fn new(name: String, display_name: String, containers: Vec<AbilityContainer>) -> Self {
        Self {
            name,
            display_name,
            containers,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn containers(&self) -> &[AbilityContainer] {
        &self.containers
    }

    pub fn ability(&self, name: &str) -> Option<&AbilityContainer> {
        self.containers.iter().find(|c| c.name() == name)
    }

    pub fn ability_names(&self) -> impl Iterator<Item = &str> {
        self.containers.iter().map(|c| c.name())
    }
}

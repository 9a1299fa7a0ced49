//! Psionics - Psychic Ability Blueprint System Prototype
//!
//! A prototype skill system where psychic skill sets and their abilities are
//! defined declaratively in config files, validated once at load time, and
//! stamped into per-caster runtime instances.
//!
//! This library exposes the core skill modules for testing and reuse.

pub mod cli;
pub mod skills;

// Re-export commonly used types
pub use skills::concept::{AbilityConcept, AbilityType};
pub use skills::config::{ConfigError, ConfigSection, ConfigValue};
pub use skills::container::{
    AbilityBehavior, AbilityContainer, BehaviorRegistry, BehaviorSpec, PsychicConcept,
};
pub use skills::instance::{AbilityInstance, CastPhase, CastRefused};
pub use skills::loader::PsychicRegistry;
pub use skills::stats::{Damage, DamageKind, ItemRef, ScalingStat, StatLookup, StatSpec};
pub use skills::tooltip::{TooltipBuilder, TooltipText};
pub use skills::{SkillsPlugin, TICKS_PER_SECOND};

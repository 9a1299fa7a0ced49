//! Psychic Skill System Core
//!
//! Config-loaded ability blueprints: binding and validation, the two-phase
//! template pipeline, tooltip assembly, and the per-caster runtime instances
//! stamped out from each blueprint.
//!
//! Loading flow: raw RON section → [`config::bind`] validates and types the
//! fields → [`concept::ConceptDraft`] becomes an immutable
//! [`concept::AbilityConcept`] (phase-1 template pass included) → the
//! [`container::AbilityContainer`] owns the concept and creates
//! [`instance::AbilityInstance`]s on demand. Tooltips are rendered on request
//! from the immutable concept plus a caller-supplied stat lookup.

use bevy::prelude::*;
use std::path::Path;

pub mod concept;
pub mod config;
pub mod container;
pub mod instance;
pub mod loader;
pub mod stats;
pub mod template;
pub mod tooltip;

/// Discrete simulation time: 20 ticks = 1 second.
pub const TICKS_PER_SECOND: f64 = 20.0;

/// Default location of the shipped psychic definitions.
pub const DEFAULT_PSYCHICS_DIR: &str = "assets/config/psychics";

/// Bevy plugin for the psychic skill system.
///
/// Loads all psychic definitions at startup and registers the instance tick
/// system. Configuration must be valid at startup; a bad definition panics
/// rather than starting with a partial skill set.
pub struct SkillsPlugin;

impl Plugin for SkillsPlugin {
    fn build(&self, app: &mut App) {
        let behaviors = container::BehaviorRegistry::builtin();
        match loader::load_psychics(Path::new(DEFAULT_PSYCHICS_DIR), &behaviors) {
            Ok(registry) => {
                app.insert_resource(registry);
            }
            Err(e) => {
                panic!("Failed to load psychic definitions: {}", e);
            }
        }

        app.add_systems(FixedUpdate, instance::tick_ability_instances);
    }
}

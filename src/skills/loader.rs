//! Psychic Definition Loading
//!
//! Psychic skill sets are defined in RON files, one psychic per file. The
//! loader parses each file, resolves behavior names against the registry,
//! binds and validates every ability section, and produces the
//! `PsychicRegistry` resource. Any violation fails the load with a message
//! carrying enough context (psychic, ability, field) to fix the file.

use bevy::prelude::*;
use ron::extensions::Extensions;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::config::ConfigSection;
use super::container::{AbilityContainer, BehaviorRegistry, PsychicConcept};

/// One ability entry inside a psychic file.
#[derive(Debug, Clone, Deserialize)]
pub struct AbilityEntry {
    /// Name of the runtime behavior this ability binds to.
    pub behavior: String,
    /// The ability's configuration section.
    pub config: ConfigSection,
}

/// A psychic definition as written in a RON file.
#[derive(Debug, Clone, Deserialize)]
pub struct PsychicFile {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub abilities: BTreeMap<String, AbilityEntry>,
}

/// Resource containing all loaded psychic concepts.
///
/// Loaded once at startup; concepts are immutable afterwards and shared by
/// reference with every reader.
#[derive(Resource, Default, Debug)]
pub struct PsychicRegistry {
    psychics: BTreeMap<String, PsychicConcept>,
}

impl PsychicRegistry {
    pub fn get(&self, name: &str) -> Option<&PsychicConcept> {
        self.psychics.get(name)
    }

    /// Convenience lookup of one ability container.
    pub fn ability(&self, psychic: &str, ability: &str) -> Option<&AbilityContainer> {
        self.psychics.get(psychic).and_then(|p| p.ability(ability))
    }

    pub fn psychics(&self) -> impl Iterator<Item = &PsychicConcept> {
        self.psychics.values()
    }

    pub fn psychic_names(&self) -> impl Iterator<Item = &str> {
        self.psychics.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.psychics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.psychics.is_empty()
    }
}

/// Build a psychic concept from a parsed file, resolving behaviors and
/// validating every ability section.
pub fn build_psychic(
    file: PsychicFile,
    behaviors: &BehaviorRegistry,
) -> Result<PsychicConcept, String> {
    let mut containers = Vec::with_capacity(file.abilities.len());

    for (ability_name, entry) in &file.abilities {
        let spec = behaviors.get(&entry.behavior).ok_or_else(|| {
            format!(
                "{}/{}: unknown behavior '{}' (cannot instantiate)",
                file.name, ability_name, entry.behavior
            )
        })?;

        let container = AbilityContainer::load(ability_name, *spec, &file.name, &entry.config)
            .map_err(|errors| {
                let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
                format!("{}/{}: {}", file.name, ability_name, details.join("; "))
            })?;
        containers.push(container);
    }

    let display_name = file.display_name.unwrap_or_else(|| file.name.clone());
    Ok(PsychicConcept::new(file.name, display_name, containers))
}

/// Parse a psychic definition from RON text.
///
/// `IMPLICIT_SOME` is enabled so optional fields like `display_name` are
/// written as plain values in the definition files.
pub fn parse_psychic_str(contents: &str) -> Result<PsychicFile, String> {
    ron::Options::default()
        .with_default_extension(Extensions::IMPLICIT_SOME)
        .from_str(contents)
        .map_err(|e| e.to_string())
}

/// Load one psychic definition file.
pub fn load_psychic_file(
    path: &Path,
    behaviors: &BehaviorRegistry,
) -> Result<PsychicConcept, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let file = parse_psychic_str(&contents)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    build_psychic(file, behaviors)
}

/// Load every `.ron` psychic definition in a directory.
pub fn load_psychics(dir: &Path, behaviors: &BehaviorRegistry) -> Result<PsychicRegistry, String> {
    let entries =
        std::fs::read_dir(dir).map_err(|e| format!("Failed to read {}: {}", dir.display(), e))?;

    // Sorted for deterministic load order and duplicate reporting.
    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    paths.sort();

    let mut registry = PsychicRegistry::default();
    for path in &paths {
        let psychic = load_psychic_file(path, behaviors)?;
        if registry.psychics.contains_key(psychic.name()) {
            return Err(format!(
                "{}: duplicate psychic '{}'",
                path.display(),
                psychic.name()
            ));
        }
        registry
            .psychics
            .insert(psychic.name().to_string(), psychic);
    }

    info!(
        "Loaded {} psychic definitions from {}",
        registry.len(),
        dir.display()
    );
    Ok(registry)
}

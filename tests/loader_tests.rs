//! Integration tests for psychic definition loading
//!
//! These tests verify that:
//! - The shipped RON definitions load end to end
//! - Phase-1 template rendering happens during load
//! - Unknown behaviors and invalid sections fail with contextual messages
//! - Duplicate psychic names across files are rejected
//! - The plugin makes the registry available as a bevy resource

use bevy::prelude::*;
use std::path::Path;

use psionics::skills::concept::AbilityType;
use psionics::skills::container::BehaviorRegistry;
use psionics::skills::loader::{
    build_psychic, load_psychics, parse_psychic_str, PsychicFile, PsychicRegistry,
};
use psionics::SkillsPlugin;

const SHIPPED_DIR: &str = "assets/config/psychics";

// =============================================================================
// Shipped definitions
// =============================================================================

#[test]
fn test_shipped_definitions_load() {
    let behaviors = BehaviorRegistry::builtin();
    let registry = load_psychics(Path::new(SHIPPED_DIR), &behaviors)
        .expect("shipped definitions should load");

    assert_eq!(registry.len(), 2);
    let names: Vec<&str> = registry.psychic_names().collect();
    assert_eq!(names, vec!["archmage", "warpriest"]);
    assert_eq!(registry.get("archmage").unwrap().display_name(), "아크메이지");
    assert_eq!(registry.get("warpriest").unwrap().display_name(), "성전사");
}

#[test]
fn test_optional_fields_parse_as_plain_values() {
    // display_name is optional but written as a bare string in the files.
    let file = parse_psychic_str(
        r#"(
            name: "plain",
            display_name: "평문",
            abilities: {},
        )"#,
    )
    .expect("bare optional values should parse");
    assert_eq!(file.display_name.as_deref(), Some("평문"));
}

#[test]
fn test_archmage_bolt_binds_expected_values() {
    let behaviors = BehaviorRegistry::builtin();
    let registry = load_psychics(Path::new(SHIPPED_DIR), &behaviors).unwrap();

    let bolt = registry
        .ability("archmage", "psychic-bolt")
        .expect("archmage should carry psychic-bolt");
    let concept = bolt.concept();

    assert_eq!(concept.display_name(), "염동 화살");
    assert_eq!(concept.ability_type(), AbilityType::Active);
    assert_eq!(concept.cooldown_ticks(), 40);
    assert_eq!(concept.cost(), 10.0);
    assert_eq!(concept.casting_ticks(), 20);
    assert_eq!(concept.range(), 5.0);
    assert!(concept.damage().is_some());
}

#[test]
fn test_load_renders_phase_one_templates() {
    let behaviors = BehaviorRegistry::builtin();
    let registry = load_psychics(Path::new(SHIPPED_DIR), &behaviors).unwrap();

    let bolt = registry.ability("archmage", "psychic-bolt").unwrap();
    let description = bolt.concept().description();
    assert_eq!(
        description[2], "재사용 대기시간 2.0초",
        "$cooldown-time should be rendered at load"
    );
    assert_eq!(
        description[1], "<damage>의 피해를 입힙니다.",
        "runtime placeholders must survive load untouched"
    );

    let aura = registry.ability("archmage", "focus-aura").unwrap();
    assert_eq!(aura.concept().description()[0], "10.0초 동안 주변 아군의");
}

#[test]
fn test_warpriest_mend_is_a_channel_with_wand() {
    let behaviors = BehaviorRegistry::builtin();
    let registry = load_psychics(Path::new(SHIPPED_DIR), &behaviors).unwrap();

    let mend = registry
        .ability("warpriest", "radiant-mend")
        .expect("warpriest should carry radiant-mend");
    let concept = mend.concept();

    assert!(concept.interruptible());
    assert!(concept.healing().is_some());
    let wand = concept.wand().expect("mend defines a wand");
    assert_eq!(wand.material, "blaze_rod");
}

// =============================================================================
// Load failures
// =============================================================================

fn parse_file(source: &str) -> PsychicFile {
    parse_psychic_str(source).expect("test fixture should parse")
}

#[test]
fn test_unknown_behavior_is_a_fatal_load_error() {
    let file = parse_file(
        r#"(
            name: "broken",
            abilities: {
                "mystery": (
                    behavior: "no-such-behavior",
                    config: { "description": ["x"] },
                ),
            },
        )"#,
    );

    let err = build_psychic(file, &BehaviorRegistry::builtin()).unwrap_err();
    assert_eq!(
        err,
        "broken/mystery: unknown behavior 'no-such-behavior' (cannot instantiate)"
    );
}

#[test]
fn test_invalid_section_error_names_psychic_and_ability() {
    let file = parse_file(
        r#"(
            name: "broken",
            abilities: {
                "bolt": (
                    behavior: "psychic-bolt",
                    config: { "cooldown-ticks": -5 },
                ),
            },
        )"#,
    );

    let err = build_psychic(file, &BehaviorRegistry::builtin()).unwrap_err();
    assert!(
        err.starts_with("broken/bolt: "),
        "error should carry psychic/ability context: {}",
        err
    );
    assert!(err.contains("cooldown-ticks"), "error should name the field: {}", err);
    assert!(err.contains("description"), "all violations are reported: {}", err);
}

#[test]
fn test_duplicate_psychic_names_are_rejected() {
    let dir = std::env::temp_dir().join("psionics-loader-duplicate-test");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("temp dir");

    let definition = r#"(
        name: "twin",
        abilities: {
            "aura": (
                behavior: "focus-aura",
                config: { "description": ["x"] },
            ),
        },
    )"#;
    std::fs::write(dir.join("a.ron"), definition).expect("write fixture");
    std::fs::write(dir.join("b.ron"), definition).expect("write fixture");

    let err = load_psychics(&dir, &BehaviorRegistry::builtin()).unwrap_err();
    assert!(err.contains("duplicate psychic 'twin'"), "got: {}", err);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_directory_is_an_error() {
    let behaviors = BehaviorRegistry::builtin();
    let result = load_psychics(Path::new("assets/config/no-such-dir"), &behaviors);
    assert!(result.is_err());
}

// =============================================================================
// Plugin integration
// =============================================================================

#[test]
fn test_plugin_inserts_registry_resource() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(SkillsPlugin);

    let registry = app
        .world()
        .get_resource::<PsychicRegistry>()
        .expect("plugin should insert the psychic registry");
    assert_eq!(registry.len(), 2);
    assert!(registry.get("archmage").is_some());
}

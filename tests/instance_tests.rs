//! Integration tests for runtime ability instances
//!
//! These tests verify that:
//! - The cast/cooldown cycle counts in whole ticks
//! - Instant abilities complete on the cast call itself
//! - Only channelled casts can be interrupted, and without cooldown
//! - Passive abilities refuse direct casting
//! - Instances of the same concept track state independently

use psionics::skills::config::{ConfigSection, ConfigValue};
use psionics::skills::container::{AbilityContainer, BehaviorRegistry, BehaviorSpec};
use psionics::skills::instance::{AbilityInstance, CastPhase, CastRefused};

// =============================================================================
// Helpers
// =============================================================================

fn text(value: &str) -> ConfigValue {
    ConfigValue::Text(value.to_string())
}

fn behavior(name: &str) -> BehaviorSpec {
    *BehaviorRegistry::builtin().get(name).expect("builtin behavior")
}

fn base_section() -> ConfigSection {
    let mut section = ConfigSection::new();
    section.insert(
        "description".to_string(),
        ConfigValue::List(vec![text("a line")]),
    );
    section
}

fn instance_with(
    behavior_name: &str,
    extra: &[(&str, ConfigValue)],
) -> AbilityInstance {
    let mut section = base_section();
    for (key, value) in extra {
        section.insert(key.to_string(), value.clone());
    }
    let container = AbilityContainer::load("test", behavior(behavior_name), "set", &section)
        .expect("section should load");
    container.create_instance()
}

// =============================================================================
// Cast and cooldown cycle
// =============================================================================

#[test]
fn test_instant_cast_completes_immediately_and_starts_cooldown() {
    let mut instance = instance_with(
        "psychic-bolt",
        &[("cooldown-ticks", ConfigValue::Int(40))],
    );

    assert!(instance.can_cast());
    instance.try_cast().expect("cast should succeed");

    assert_eq!(instance.phase(), CastPhase::Ready);
    assert_eq!(instance.cooldown_remaining(), 40);
    assert_eq!(instance.try_cast(), Err(CastRefused::OnCooldown));
}

#[test]
fn test_cooldown_counts_down_one_per_tick() {
    let mut instance = instance_with(
        "psychic-bolt",
        &[("cooldown-ticks", ConfigValue::Int(3))],
    );
    instance.try_cast().expect("cast should succeed");

    instance.tick();
    instance.tick();
    assert_eq!(instance.cooldown_remaining(), 1);
    assert!(!instance.can_cast());

    instance.tick();
    assert_eq!(instance.cooldown_remaining(), 0);
    assert!(instance.can_cast());
}

#[test]
fn test_hard_cast_completes_after_its_window() {
    let mut instance = instance_with(
        "psychic-bolt",
        &[
            ("cooldown-ticks", ConfigValue::Int(40)),
            ("casting-ticks", ConfigValue::Int(20)),
        ],
    );
    instance.try_cast().expect("cast should succeed");
    assert_eq!(instance.phase(), CastPhase::Casting { remaining: 20 });

    // 19 ticks in the cast is still running
    for _ in 0..19 {
        instance.tick();
    }
    assert_eq!(instance.phase(), CastPhase::Casting { remaining: 1 });
    assert_eq!(instance.cooldown_remaining(), 0);

    // the 20th tick completes the cast and arms the cooldown
    instance.tick();
    assert_eq!(instance.phase(), CastPhase::Ready);
    assert_eq!(instance.cooldown_remaining(), 40);
}

#[test]
fn test_casting_instance_refuses_a_second_cast() {
    let mut instance = instance_with(
        "psychic-bolt",
        &[("casting-ticks", ConfigValue::Int(20))],
    );
    instance.try_cast().expect("first cast should succeed");
    assert_eq!(instance.try_cast(), Err(CastRefused::AlreadyCasting));
}

// =============================================================================
// Interruption
// =============================================================================

#[test]
fn test_channel_can_be_interrupted_without_cooldown() {
    let mut instance = instance_with(
        "radiant-mend",
        &[
            ("cooldown-ticks", ConfigValue::Int(100)),
            ("casting-ticks", ConfigValue::Int(40)),
            ("interruptible", ConfigValue::Bool(true)),
        ],
    );
    instance.try_cast().expect("cast should succeed");
    assert_eq!(instance.phase(), CastPhase::Channeling { remaining: 40 });

    assert!(instance.interrupt(), "channel should be interruptible");
    assert_eq!(instance.phase(), CastPhase::Ready);
    assert_eq!(
        instance.cooldown_remaining(),
        0,
        "interrupted channel must not trigger its cooldown"
    );
    assert!(instance.can_cast());
}

#[test]
fn test_hard_cast_cannot_be_interrupted() {
    let mut instance = instance_with(
        "psychic-bolt",
        &[("casting-ticks", ConfigValue::Int(20))],
    );
    instance.try_cast().expect("cast should succeed");

    assert!(!instance.interrupt(), "hard cast must ignore interrupts");
    assert_eq!(instance.phase(), CastPhase::Casting { remaining: 20 });
}

#[test]
fn test_interrupt_on_idle_instance_is_a_no_op() {
    let mut instance = instance_with("psychic-bolt", &[]);
    assert!(!instance.interrupt());
    assert_eq!(instance.phase(), CastPhase::Ready);
}

// =============================================================================
// Passive abilities
// =============================================================================

#[test]
fn test_passive_ability_refuses_casting() {
    let mut instance = instance_with(
        "focus-aura",
        &[("duration-ticks", ConfigValue::Int(200))],
    );

    assert!(!instance.can_cast());
    assert_eq!(instance.try_cast(), Err(CastRefused::NotActive));
}

// =============================================================================
// Instance independence
// =============================================================================

#[test]
fn test_instances_of_one_concept_track_state_independently() {
    let mut section = base_section();
    section.insert("cooldown-ticks".to_string(), ConfigValue::Int(40));
    let container =
        AbilityContainer::load("bolt", behavior("psychic-bolt"), "set", &section).unwrap();

    let mut first = container.create_instance();
    let second = container.create_instance();

    first.try_cast().expect("cast should succeed");
    assert_eq!(first.cooldown_remaining(), 40);
    assert_eq!(
        second.cooldown_remaining(),
        0,
        "casting one instance must not affect another"
    );

    // Both instances still see the same shared concept.
    assert_eq!(first.concept().name(), second.concept().name());
}

//! Psionics - Psychic Ability Blueprint System Prototype
//!
//! Loads and validates psychic definition files, and renders tooltip previews
//! for individual abilities.

use psionics::cli::{self, StatProfile};
use psionics::skills::container::BehaviorRegistry;
use psionics::skills::loader;

fn main() {
    let args = cli::parse_args();

    let behaviors = BehaviorRegistry::builtin();
    let registry = match loader::load_psychics(&args.config_dir, &behaviors) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let profile = match &args.stats {
        Some(path) => match StatProfile::load_from_file(path) {
            Ok(profile) => profile,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => StatProfile::default(),
    };

    match &args.tooltip {
        Some(selector) => {
            let Some((psychic, ability)) = selector.split_once('/') else {
                eprintln!("Expected PSYCHIC/ABILITY, got '{}'", selector);
                std::process::exit(1);
            };
            let Some(container) = registry.ability(psychic, ability) else {
                eprintln!("Unknown ability '{}'", selector);
                std::process::exit(1);
            };
            let lookup = move |spec: &psionics::StatSpec| profile.resolve(spec);
            println!("{}", container.render_tooltip(&lookup));
        }
        None => {
            println!("Validated {} psychic definitions", registry.len());
            for psychic in registry.psychics() {
                println!("{} ({})", psychic.name(), psychic.display_name());
                for container in psychic.containers() {
                    let concept = container.concept();
                    println!("  {} [{}]", container.name(), concept.ability_type());
                }
            }
        }
    }
}

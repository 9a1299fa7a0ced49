//! Command-line interface for the psionics tools
//!
//! Validates psychic definition directories and renders tooltip previews,
//! optionally against a JSON stat profile standing in for a live caster.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::skills::stats::{ScalingStat, StatSpec};

/// Psychic ability blueprint validator and tooltip previewer
#[derive(Parser, Debug)]
#[command(name = "psionics")]
#[command(about = "Psychic ability blueprint validator and tooltip previewer")]
#[command(version)]
pub struct Args {
    /// Directory containing psychic definition files
    #[arg(long, value_name = "CONFIG_DIR", default_value = "assets/config/psychics")]
    pub config_dir: PathBuf,

    /// Render a tooltip preview for the given PSYCHIC/ABILITY
    #[arg(long, value_name = "PSYCHIC/ABILITY")]
    pub tooltip: Option<String>,

    /// JSON stat profile used to resolve damage/healing placeholders
    #[arg(long, value_name = "STATS_FILE")]
    pub stats: Option<PathBuf>,
}

pub fn parse_args() -> Args {
    Args::parse()
}

/// Caster stat profile loaded from JSON
///
/// ```json
/// { "attack_power": 35.0, "spell_power": 50.0 }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatProfile {
    #[serde(default)]
    pub attack_power: f64,
    #[serde(default)]
    pub spell_power: f64,
}

impl StatProfile {
    /// Load a profile from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read stats file: {}", e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse JSON: {}", e))
    }

    /// Resolve a statistic descriptor against this profile.
    pub fn resolve(&self, spec: &StatSpec) -> f64 {
        let stat = match spec.scales_with {
            ScalingStat::AttackPower => self.attack_power,
            ScalingStat::SpellPower => self.spell_power,
        };
        stat * spec.coefficient
    }
}

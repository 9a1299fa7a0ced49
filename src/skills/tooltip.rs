//! Tooltip Assembly
//!
//! Builds the ordered, human-readable summary of a concept: title line, stat
//! block, description, then any behavior-appended footer lines. The builder
//! carries the runtime template map; [`TooltipBuilder::build`] applies the
//! phase-2 pass to every line, so `<damage>`/`<healing>` placeholders in the
//! stat block and in the description always resolve to the same values.
//!
//! Tooltip output is best-effort cosmetic text: a failing extension hook is
//! logged and discarded, never propagated.

use bevy::prelude::*;
use smallvec::SmallVec;
use std::fmt;

use super::concept::AbilityConcept;
use super::stats::StatLookup;
use super::template::{render_runtime_vars, TemplateVars};

/// Fixed-point rendering used for every stat value ("2.0", "10.0").
pub fn format_stat(value: f64) -> String {
    format!("{:.1}", value)
}

/// Extension hook run after the standard tooltip block.
///
/// The renderer explicitly discards an `Err`: tooltip production must never
/// abort because of a buggy extension.
pub type TooltipHook = fn(&mut TooltipBuilder, &StatLookup) -> Result<(), String>;

/// A rendered tooltip: ordered lines of plain text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipText {
    pub lines: Vec<String>,
}

impl fmt::Display for TooltipText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Accumulates tooltip content in its fixed order, then renders phase-2
/// placeholders over the whole block.
#[derive(Default)]
pub struct TooltipBuilder {
    title: String,
    stats: SmallVec<[String; 8]>,
    description: Vec<String>,
    footer: Vec<String>,
    templates: TemplateVars,
}

impl TooltipBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Add a labeled stat line. Zero and negative values are omitted so the
    /// block only shows stats the ability actually has.
    pub fn add_stat(&mut self, label: &str, value: f64, unit: &str) {
        if value <= 0.0 {
            return;
        }
        if unit.is_empty() {
            self.stats.push(format!("{}: {}", label, format_stat(value)));
        } else {
            self.stats
                .push(format!("{}: {} {}", label, format_stat(value), unit));
        }
    }

    /// Add a stat line whose value is a phase-2 placeholder (`<healing>`).
    pub fn add_stat_template(&mut self, label: &str, placeholder: &str) {
        self.stats.push(format!("{}: {}", label, placeholder));
    }

    pub fn add_description(&mut self, lines: &[String]) {
        self.description.extend_from_slice(lines);
    }

    /// Append a footer line after the standard block (extension hook API).
    pub fn add_line(&mut self, line: impl Into<String>) {
        self.footer.push(line.into());
    }

    /// Bind a runtime template value for the phase-2 pass.
    pub fn add_template(&mut self, key: &str, value: impl Into<String>) {
        self.templates.insert(key.to_string(), value.into());
    }

    /// Render phase-2 placeholders over every accumulated line, in order:
    /// title, stat block, description, footer.
    pub fn build(&self) -> TooltipText {
        let mut lines = Vec::with_capacity(1 + self.stats.len() + self.description.len() + self.footer.len());
        lines.push(render_runtime_vars(&self.title, &self.templates));
        for line in &self.stats {
            lines.push(render_runtime_vars(line, &self.templates));
        }
        for line in &self.description {
            lines.push(render_runtime_vars(line, &self.templates));
        }
        for line in &self.footer {
            lines.push(render_runtime_vars(line, &self.templates));
        }
        TooltipText { lines }
    }
}

/// Render the full tooltip for a concept.
///
/// Pure with respect to the concept: the same concept and the same lookup
/// always produce identical output. The hook (if any) runs after the standard
/// block; its error is discarded.
pub fn render_tooltip(
    concept: &AbilityConcept,
    stats: &StatLookup,
    hook: Option<TooltipHook>,
) -> TooltipText {
    let mut tooltip = TooltipBuilder::new();
    tooltip.set_title(format!(
        "{:<16}{:>16}",
        concept.display_name(),
        concept.ability_type()
    ));

    tooltip.add_stat("재사용 대기시간", concept.cooldown_seconds(), "초");
    tooltip.add_stat("마나 소모", concept.cost(), "");
    let casting_label = if concept.interruptible() {
        "집중 시간"
    } else {
        "시전 시간"
    };
    tooltip.add_stat(casting_label, concept.casting_seconds(), "초");
    tooltip.add_stat("지속 시간", concept.duration_seconds(), "초");
    tooltip.add_stat("사거리", concept.range(), "블록");
    if concept.healing().is_some() {
        tooltip.add_stat_template("치유량", "<healing>");
    }
    if concept.damage().is_some() {
        tooltip.add_stat_template("피해량", "<damage>");
    }
    tooltip.add_description(concept.description());

    // Repopulate the runtime map with the same values the stat block shows,
    // so description placeholders can never diverge from it.
    tooltip.add_template("display-name", concept.display_name());
    tooltip.add_template("cooldown-time", format_stat(concept.cooldown_seconds()));
    tooltip.add_template("cost", format_stat(concept.cost()));
    tooltip.add_template("casting-time", format_stat(concept.casting_seconds()));
    tooltip.add_template("range", format_stat(concept.range()));
    tooltip.add_template("duration-time", format_stat(concept.duration_seconds()));
    if let Some(damage) = concept.damage() {
        tooltip.add_template("damage", format_stat(stats(&damage.stats)));
    }
    if let Some(healing) = concept.healing() {
        tooltip.add_template("healing", format_stat(stats(&healing)));
    }

    if let Some(hook) = hook {
        if let Err(err) = hook(&mut tooltip, stats) {
            warn!("tooltip hook for '{}' failed: {}", concept.name(), err);
        }
    }

    tooltip.build()
}

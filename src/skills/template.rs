//! Two-Phase Text Templating
//!
//! Description and tooltip text carry two independent placeholder syntaxes:
//!
//! * `$name` — config variables, resolved once at load time against the
//!   concept's bound values (`$cost`, `$cooldown-time`, ...).
//! * `<name>` — runtime variables, resolved on every tooltip render against
//!   the builder's template map (`<damage>`, `<healing>`, ...).
//!
//! Placeholder names are `[A-Za-z0-9_-]+`. Unresolved placeholders are left
//! verbatim in the output and reported with `warn!`; rendering itself never
//! fails. Phase-1 output contains no remaining `$` variables for resolved
//! names, so re-rendering already-rendered text is a no-op for them.

use bevy::prelude::*;
use std::collections::BTreeMap;

/// Name → replacement map for either placeholder phase.
pub type TemplateVars = BTreeMap<String, String>;

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Resolve `$name` config variables. Unknown names stay verbatim.
pub fn render_config_vars(text: &str, vars: &TemplateVars) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let name_len = after.chars().take_while(|&c| is_name_char(c)).count();
        if name_len == 0 {
            out.push('$');
            rest = after;
            continue;
        }
        let name = &after[..name_len];
        match vars.get(name) {
            Some(value) => out.push_str(value),
            None => {
                warn!("unresolved config variable ${} in \"{}\"", name, text);
                out.push('$');
                out.push_str(name);
            }
        }
        rest = &after[name_len..];
    }
    out.push_str(rest);
    out
}

/// Resolve `<name>` runtime variables. Unknown names stay verbatim, and text
/// between angle brackets that is not a well-formed name is never touched.
pub fn render_runtime_vars(text: &str, vars: &TemplateVars) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let name_len = after.chars().take_while(|&c| is_name_char(c)).count();
        let closed = after[name_len..].starts_with('>');
        if name_len == 0 || !closed {
            out.push('<');
            rest = after;
            continue;
        }
        let name = &after[..name_len];
        match vars.get(name) {
            Some(value) => out.push_str(value),
            None => {
                warn!("unresolved runtime variable <{}> in \"{}\"", name, text);
                out.push('<');
                out.push_str(name);
                out.push('>');
            }
        }
        rest = &after[name_len + 1..];
    }
    out.push_str(rest);
    out
}

/// Phase-1 render over a whole description block.
pub fn render_config_vars_all(lines: &[String], vars: &TemplateVars) -> Vec<String> {
    lines
        .iter()
        .map(|line| render_config_vars(line, vars))
        .collect()
}

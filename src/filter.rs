//! Regex and prefix based suppression of reconstructed names.

use regex::Regex;

use crate::core::{ClassUnit, UnitKind};

/// Suppression decisions for unit and member names.
///
/// Two independent patterns: one applied to class/protocol/category names,
/// one to method and property names. A pattern that fails to compile logs a
/// warning and the corresponding filter never suppresses anything.
#[derive(Debug, Default)]
pub struct NameFilter {
    class_pattern: Option<Regex>,
    method_pattern: Option<Regex>,
    kill_prefixes: Vec<String>,
}

impl NameFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the unit-name exclusion pattern.
    pub fn set_class_pattern(&mut self, pattern: &str) {
        self.class_pattern = compile(pattern);
    }

    /// Configure the method/property-name exclusion pattern.
    pub fn set_method_pattern(&mut self, pattern: &str) {
        self.method_pattern = compile(pattern);
    }

    /// Add a literal prefix that suppresses matching names. Leading
    /// underscores of the checked name are ignored; empty prefixes never
    /// match.
    pub fn add_kill_prefix(&mut self, prefix: impl Into<String>) {
        self.kill_prefixes.push(prefix.into());
    }

    /// Whether `name` should be dropped from the output.
    pub fn is_suppressed(&self, name: &str, check_prefix: bool) -> bool {
        if let Some(pattern) = &self.class_pattern {
            if pattern.is_match(name) {
                return true;
            }
        }
        if check_prefix {
            let stripped = name.trim_start_matches('_');
            for prefix in &self.kill_prefixes {
                if !prefix.is_empty() && stripped.starts_with(prefix.as_str()) {
                    return true;
                }
            }
        }
        false
    }

    /// Whether a method or property name should be dropped.
    pub fn method_suppressed(&self, name: &str) -> bool {
        self.method_pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(name))
    }

    /// A configured method filter switches rendering into a method-focused
    /// view (no ivar blocks, units collapse when nothing survives).
    pub fn has_method_filter(&self) -> bool {
        self.method_pattern.is_some()
    }

    /// Whether any unit-level suppression is configured at all.
    pub fn filters_units(&self) -> bool {
        self.class_pattern.is_some() || !self.kill_prefixes.is_empty()
    }

    /// Unit-level suppression. Categories survive as long as either their
    /// own name or their extended class's name survives; the prefix check
    /// only applies to non-category names.
    pub fn unit_suppressed(&self, unit: &ClassUnit) -> bool {
        match unit.kind {
            UnitKind::Category => {
                self.is_suppressed(&unit.name, false)
                    && self.is_suppressed(unit.extended_class(), false)
            }
            _ => self.is_suppressed(&unit.name, true),
        }
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(err) => {
            log::warn!("ignoring unparsable filter pattern '{pattern}': {err}");
            None
        }
    }
}

//! Unit and member ordering policies.
//!
//! Sorting never moves the backing records; it produces index vectors over
//! them, so ties keep declaration order (the sorts are stable).

use crate::core::{ClassUnit, Method, Property, UnitKind};

/// Whole-unit ordering across the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSort {
    #[default]
    Declaration,
    /// Protocols first, then by major name (a category's major name is its
    /// extended class), then by minor name with absent minors first.
    Alphabetic,
}

/// Per-class member ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberSort {
    #[default]
    Declaration,
    /// Raw selector order.
    Alphabetic,
    /// Class methods before instance methods, `init…` selectors first
    /// within each group, raw selector order after that.
    AlphabeticAlt,
}

/// Order of `units` under `policy`, as indices into the slice.
pub fn unit_order(units: &[ClassUnit], policy: UnitSort) -> Vec<usize> {
    let mut order: Vec<usize> = (0..units.len()).collect();
    if policy == UnitSort::Alphabetic {
        order.sort_by(|&a, &b| {
            let ua = &units[a];
            let ub = &units[b];
            (ua.kind != UnitKind::Protocol, ua.major_name(), ua.minor_name()).cmp(&(
                ub.kind != UnitKind::Protocol,
                ub.major_name(),
                ub.minor_name(),
            ))
        });
    }
    order
}

/// Order of `properties` under `policy`. Any non-default policy sorts
/// properties alphabetically by name.
pub fn property_order(properties: &[Property], policy: MemberSort) -> Vec<usize> {
    let mut order: Vec<usize> = (0..properties.len()).collect();
    if policy != MemberSort::Declaration {
        order.sort_by(|&a, &b| properties[a].name.cmp(&properties[b].name));
    }
    order
}

/// Order of `methods` under `policy`.
pub fn method_order(methods: &[Method], policy: MemberSort) -> Vec<usize> {
    let mut order: Vec<usize> = (0..methods.len()).collect();
    match policy {
        MemberSort::Declaration => {}
        MemberSort::Alphabetic => {
            order.sort_by(|&a, &b| methods[a].raw_name.cmp(&methods[b].raw_name));
        }
        MemberSort::AlphabeticAlt => {
            order.sort_by(|&a, &b| {
                let ma = &methods[a];
                let mb = &methods[b];
                (
                    !ma.is_class_method,
                    !is_init_selector(&ma.raw_name),
                    ma.raw_name.as_str(),
                )
                    .cmp(&(
                        !mb.is_class_method,
                        !is_init_selector(&mb.raw_name),
                        mb.raw_name.as_str(),
                    ))
            });
        }
    }
    order
}

/// Literal `init` prefix not followed by a lowercase letter, so that
/// `initWithFrame:` and `init` qualify but `initialize` does not.
fn is_init_selector(raw_name: &str) -> bool {
    match raw_name.strip_prefix("init") {
        Some(rest) => !rest.starts_with(|c: char| c.is_ascii_lowercase()),
        None => false,
    }
}

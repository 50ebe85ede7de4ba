//! The type-record service boundary.
//!
//! The type-encoding decoder and its dependency bookkeeping live in the
//! metadata extractor; this crate only consumes them through [`TypeRecord`].
//! [`registry::TypeRegistry`] is the in-process implementation wired up from
//! the extractor's JSON handoff.

pub mod registry;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Stable identifier of a type inside the record service.
pub type TypeIndex = usize;

/// How hard a declaration depends on a referenced type.
///
/// A strong edge needs the full definition (an import); a weak edge only
/// needs the name (a forward declaration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStrength {
    Weak,
    Strong,
}

/// Interface of the external type-record service.
///
/// Formatting methods never fail; an unknown index degrades to a generic
/// rendering rather than a fault.
pub trait TypeRecord {
    /// Format a type reference with an attached member name (empty for a
    /// bare type).
    fn format(&self, ty: TypeIndex, member_name: &str) -> String {
        self.format_indented(ty, member_name, 0)
    }

    /// Same as [`TypeRecord::format`] with a leading tab indent per level.
    fn format_indented(&self, ty: TypeIndex, member_name: &str, indent: usize) -> String;

    /// Format a type as a standalone declaration (used for struct types).
    fn format_as_declaration(&self, ty: TypeIndex) -> String;

    /// Outgoing dependency edges of a unit's type, if any were recorded.
    fn dependencies(&self, ty: TypeIndex) -> Option<&HashMap<TypeIndex, EdgeStrength>>;

    fn is_struct_type(&self, ty: TypeIndex) -> bool;

    fn is_external_type(&self, ty: TypeIndex) -> bool;

    /// Whether the type is a generic object reference (`id`-like).
    fn is_id_type(&self, ty: TypeIndex) -> bool;

    fn name_of_type(&self, ty: TypeIndex) -> &str;

    /// Every externally visible struct type, in registration order.
    fn all_public_struct_types(&self) -> Vec<TypeIndex>;

    /// Order a type list alphabetically by name.
    fn sort_alphabetically(&self, types: &mut [TypeIndex]);

    /// Render struct declarations, each preceded by forward declarations of
    /// the structs it depends on.
    fn format_structs_with_forward_declarations(&self, types: &[TypeIndex]) -> String;

    /// Render one forward-declaration block (`@class …; @protocol …;`) for
    /// the given types.
    fn format_forward_declaration(&self, types: &[TypeIndex]) -> String;

    /// Number of incoming edges pointing at `ty`, optionally counting only
    /// strong ones.
    fn link_count(&self, ty: TypeIndex, only_strong: bool) -> usize;

    /// Parse a quoted object-type string (`@"Name"`) into a type index,
    /// registering it when unseen.
    fn parse(&mut self, quoted: &str, is_struct: bool) -> TypeIndex;

    fn add_strong_link(&mut self, from: TypeIndex, to: TypeIndex);

    fn add_weak_link(&mut self, from: TypeIndex, to: TypeIndex);
}

/// Merge `extra` into `into`; on key collisions the stronger edge wins.
pub fn combine_dependencies(
    into: &mut HashMap<TypeIndex, EdgeStrength>,
    extra: &HashMap<TypeIndex, EdgeStrength>,
) {
    for (&ty, &strength) in extra {
        into.entry(ty)
            .and_modify(|existing| {
                if strength > *existing {
                    *existing = strength;
                }
            })
            .or_insert(strength);
    }
}

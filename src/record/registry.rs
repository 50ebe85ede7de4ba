//! In-process implementation of [`TypeRecord`] backed by the extractor's
//! types table.
//!
//! The registry does not decode type encodings; it works from named entries
//! the extractor already resolved, plus an explicit directed edge map keyed
//! by type index so that mutually referencing classes stay representable.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::record::{EdgeStrength, TypeIndex, TypeRecord};

/// Shape category of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// The generic object reference, `id`.
    Id,
    /// An object pointer type, rendered as `Name *`.
    Class,
    /// A protocol-qualified reference, rendered as `id<Name>`.
    Protocol,
    /// A value type referenced by its typedef name.
    Struct,
    /// Anything rendered verbatim by name (`int`, `void`, `SEL`, …).
    Primitive,
}

/// One named type known to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub name: String,
    pub kind: TypeKind,
    /// Defined outside the binary being dumped.
    #[serde(default)]
    pub external: bool,
    /// Externally visible; only public structs reach the shared structs
    /// header.
    #[serde(default)]
    pub public: bool,
    /// Preformatted struct declaration text, without a trailing semicolon.
    #[serde(default)]
    pub definition: Option<String>,
}

#[derive(Debug, Default)]
pub struct TypeRegistry {
    entries: Vec<TypeEntry>,
    by_name: HashMap<String, TypeIndex>,
    edges: HashMap<TypeIndex, HashMap<TypeIndex, EdgeStrength>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type entry, returning its index. The first entry under a
    /// given name owns the name lookup.
    pub fn insert(&mut self, entry: TypeEntry) -> TypeIndex {
        let index = self.entries.len();
        self.by_name.entry(entry.name.clone()).or_insert(index);
        self.entries.push(entry);
        index
    }

    pub fn index_of(&self, name: &str) -> Option<TypeIndex> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, ty: TypeIndex) -> Option<&TypeEntry> {
        self.entries.get(ty)
    }

    /// Look up or register a type by name.
    fn intern(&mut self, name: &str, kind: TypeKind) -> TypeIndex {
        if let Some(index) = self.index_of(name) {
            return index;
        }
        self.insert(TypeEntry {
            name: name.to_string(),
            kind,
            external: true,
            public: false,
            definition: None,
        })
    }
}

impl TypeRecord for TypeRegistry {
    fn format_indented(&self, ty: TypeIndex, member_name: &str, indent: usize) -> String {
        let mut out = "\t".repeat(indent);
        let type_text = match self.entry(ty) {
            Some(entry) => match entry.kind {
                TypeKind::Id => "id".to_string(),
                TypeKind::Class => format!("{} *", entry.name),
                TypeKind::Protocol => format!("id<{}>", entry.name),
                TypeKind::Struct | TypeKind::Primitive => entry.name.clone(),
            },
            None => {
                log::debug!("formatting unknown type index {ty}");
                "id".to_string()
            }
        };
        out.push_str(&type_text);
        if !member_name.is_empty() {
            if !out.ends_with('*') {
                out.push(' ');
            }
            out.push_str(member_name);
        }
        out
    }

    fn format_as_declaration(&self, ty: TypeIndex) -> String {
        match self.entry(ty) {
            Some(entry) if entry.kind == TypeKind::Struct => match &entry.definition {
                Some(definition) => definition.clone(),
                None => format!("typedef struct {0} {0}", entry.name),
            },
            _ => self.format(ty, ""),
        }
    }

    fn dependencies(&self, ty: TypeIndex) -> Option<&HashMap<TypeIndex, EdgeStrength>> {
        self.edges.get(&ty)
    }

    fn is_struct_type(&self, ty: TypeIndex) -> bool {
        matches!(self.entry(ty), Some(e) if e.kind == TypeKind::Struct)
    }

    fn is_external_type(&self, ty: TypeIndex) -> bool {
        matches!(self.entry(ty), Some(e) if e.external)
    }

    fn is_id_type(&self, ty: TypeIndex) -> bool {
        matches!(self.entry(ty), Some(e) if e.kind == TypeKind::Id)
    }

    fn name_of_type(&self, ty: TypeIndex) -> &str {
        self.entry(ty).map(|e| e.name.as_str()).unwrap_or("")
    }

    fn all_public_struct_types(&self) -> Vec<TypeIndex> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.kind == TypeKind::Struct && e.public)
            .map(|(i, _)| i)
            .collect()
    }

    fn sort_alphabetically(&self, types: &mut [TypeIndex]) {
        types.sort_by(|&a, &b| self.name_of_type(a).cmp(self.name_of_type(b)));
    }

    fn format_structs_with_forward_declarations(&self, types: &[TypeIndex]) -> String {
        let mut out = String::new();
        let mut declared: HashSet<TypeIndex> = HashSet::new();
        for &ty in types {
            if let Some(deps) = self.edges.get(&ty) {
                let mut struct_deps: Vec<TypeIndex> = deps
                    .keys()
                    .copied()
                    .filter(|&dep| dep != ty && self.is_struct_type(dep) && !declared.contains(&dep))
                    .collect();
                struct_deps.sort_unstable();
                for dep in struct_deps {
                    out.push_str(&format!("struct {};\n", self.name_of_type(dep)));
                    declared.insert(dep);
                }
            }
            out.push_str(&self.format_as_declaration(ty));
            out.push_str(";\n\n");
            declared.insert(ty);
        }
        out
    }

    fn format_forward_declaration(&self, types: &[TypeIndex]) -> String {
        let mut classes: Vec<&str> = Vec::new();
        let mut protocols: Vec<&str> = Vec::new();
        for &ty in types {
            match self.entry(ty) {
                Some(e) if e.kind == TypeKind::Class => classes.push(&e.name),
                Some(e) if e.kind == TypeKind::Protocol => {
                    protocols.extend(e.name.split(',').filter(|p| !p.is_empty()));
                }
                _ => {}
            }
        }
        let mut out = String::new();
        if !classes.is_empty() {
            out.push_str(&format!("@class {};\n", classes.join(", ")));
        }
        if !protocols.is_empty() {
            out.push_str(&format!("@protocol {};\n", protocols.join(", ")));
        }
        out
    }

    fn link_count(&self, ty: TypeIndex, only_strong: bool) -> usize {
        self.edges
            .values()
            .filter_map(|deps| deps.get(&ty))
            .filter(|&&strength| !only_strong || strength == EdgeStrength::Strong)
            .count()
    }

    fn parse(&mut self, quoted: &str, is_struct: bool) -> TypeIndex {
        let inner = quoted
            .strip_prefix("@\"")
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(quoted);
        if is_struct {
            return self.intern(inner, TypeKind::Struct);
        }
        if let Some(protocol_list) = inner.strip_prefix('<') {
            let name = protocol_list.trim_end_matches('>');
            return self.intern(name, TypeKind::Protocol);
        }
        // `Name<P1,P2>` keeps only the class part; the protocol
        // qualification belongs to the full decoder.
        let class_name = inner.split('<').next().unwrap_or(inner);
        self.intern(class_name, TypeKind::Class)
    }

    fn add_strong_link(&mut self, from: TypeIndex, to: TypeIndex) {
        self.edges
            .entry(from)
            .or_default()
            .insert(to, EdgeStrength::Strong);
    }

    fn add_weak_link(&mut self, from: TypeIndex, to: TypeIndex) {
        self.edges
            .entry(from)
            .or_default()
            .entry(to)
            .or_insert(EdgeStrength::Weak);
    }
}

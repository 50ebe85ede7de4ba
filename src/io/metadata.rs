//! Loads the decoded-metadata document produced by the extractor.
//!
//! The extractor owns the Mach-O parsing and the type-encoding decoding; its
//! output is a JSON document carrying the types table, the recorded
//! dependency edges, known include paths of external types, and the class
//! units themselves.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::ClassUnit;
use crate::record::registry::{TypeEntry, TypeRegistry};
use crate::record::{EdgeStrength, TypeIndex, TypeRecord};

/// One recorded dependency edge, indices into the types table.
#[derive(Debug, Clone, Deserialize)]
pub struct DependencyRecord {
    pub from: TypeIndex,
    pub to: TypeIndex,
    pub strength: EdgeStrength,
}

/// On-disk shape of the extractor handoff.
#[derive(Debug, Deserialize)]
pub struct MetadataDocument {
    /// Path of the binary the metadata was extracted from.
    #[serde(default)]
    pub binary_path: Option<String>,
    #[serde(default)]
    pub types: Vec<TypeEntry>,
    #[serde(default)]
    pub dependencies: Vec<DependencyRecord>,
    /// Include path per external type name (`Foundation/Foundation.h` or a
    /// directory path ending in `/`).
    #[serde(default)]
    pub include_paths: HashMap<String, String>,
    #[serde(default)]
    pub classes: Vec<ClassUnit>,
}

/// Fully wired session inputs.
#[derive(Debug)]
pub struct LoadedMetadata {
    pub binary_path: Option<String>,
    pub registry: TypeRegistry,
    pub units: Vec<ClassUnit>,
    pub include_paths: HashMap<TypeIndex, String>,
}

/// Read and wire a metadata document from disk.
pub fn read_metadata_file(path: &Path) -> Result<LoadedMetadata> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read metadata {}", path.display()))?;
    let document: MetadataDocument = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse metadata {}", path.display()))?;
    load_metadata(document)
}

/// Wire a parsed document into a registry plus unit list.
pub fn load_metadata(document: MetadataDocument) -> Result<LoadedMetadata> {
    let mut registry = TypeRegistry::new();
    for entry in document.types {
        registry.insert(entry);
    }
    for edge in &document.dependencies {
        match edge.strength {
            EdgeStrength::Strong => registry.add_strong_link(edge.from, edge.to),
            EdgeStrength::Weak => registry.add_weak_link(edge.from, edge.to),
        }
    }

    let mut include_paths = HashMap::new();
    for (name, path) in &document.include_paths {
        match registry.index_of(name) {
            Some(ty) => {
                include_paths.insert(ty, path.clone());
            }
            None => log::warn!("include path for unknown type '{name}' ignored"),
        }
    }

    log::debug!(
        "loaded {} types and {} classes",
        registry.len(),
        document.classes.len()
    );

    Ok(LoadedMetadata {
        binary_path: document.binary_path,
        registry,
        units: document.classes,
        include_paths,
    })
}

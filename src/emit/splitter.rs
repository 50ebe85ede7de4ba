//! Distributes rendered declarations into dependency-correct header files.
//!
//! Every class or protocol gets a file named after it (categories share the
//! extended class's file); an aggregation header includes them all, and a
//! shared structs header carries the value types. Imports and forward
//! declarations are derived per file from the merged dependency sets.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::ClassUnit;
use crate::emit::banner;
use crate::record::{combine_dependencies, EdgeStrength, TypeIndex};
use crate::render::Renderer;

/// Where and how header files are written.
#[derive(Debug)]
pub struct SplitterConfig<'a> {
    pub out_dir: &'a Path,
    /// Known include paths of external types. An exact path is used as-is; a
    /// path ending in `/` is a directory and gets the type's bare name plus
    /// `.h` appended.
    pub include_paths: &'a HashMap<TypeIndex, String>,
}

/// One output header being assembled: concatenated declarations plus the
/// union of the contributing units' dependency edges.
#[derive(Debug, Default)]
struct HeaderFile {
    declaration: String,
    dependencies: HashMap<TypeIndex, EdgeStrength>,
}

/// Render every unit and write the aggregation header, the shared structs
/// header, and one header per class/category base name. Returns the written
/// paths.
pub fn write_header_files(
    config: &SplitterConfig,
    units: &[ClassUnit],
    renderer: &Renderer,
    source: &str,
) -> Result<Vec<PathBuf>> {
    let record = renderer.record;
    let base = aggregation_basename(source);

    let mut public_structs = record.all_public_struct_types();
    if renderer.filter.filters_units() {
        public_structs.retain(|&ty| !renderer.filter.is_suppressed(record.name_of_type(ty), true));
    }

    // Distribute each unit into its file; same-named units merge in
    // encounter order.
    let mut headers: BTreeMap<String, HeaderFile> = BTreeMap::new();
    for unit in units {
        let declaration = renderer.render_unit(unit);
        // An empty rendering still claims a placeholder file when another
        // unit imports it.
        if declaration.is_empty() && record.link_count(unit.type_index, true) == 0 {
            continue;
        }
        let dependencies = record
            .dependencies(unit.type_index)
            .cloned()
            .unwrap_or_default();
        let mut file_name = unit.base_name().to_string();
        if file_name == base {
            file_name.push_str("-Class");
        }
        let header = headers.entry(file_name).or_default();
        header.declaration.push_str(&declaration);
        combine_dependencies(&mut header.dependencies, &dependencies);
    }

    let banner_text = banner(source);
    let mut written = Vec::new();

    // Aggregation header first.
    let mut aggregate = banner_text.clone();
    let _ = writeln!(aggregate, "#import \"{base}-Structs.h\"");
    for name in headers.keys() {
        let _ = writeln!(aggregate, "#import \"{name}.h\"");
    }
    written.push(write_file(config.out_dir, &format!("{base}.h"), &aggregate)?);

    // Shared structs header.
    let mut structs_out = banner_text.clone();
    structs_out.push_str(&record.format_structs_with_forward_declarations(&public_structs));
    structs_out.push('\n');
    written.push(write_file(
        config.out_dir,
        &format!("{base}-Structs.h"),
        &structs_out,
    )?);

    // Per-type headers.
    for (name, header) in &headers {
        let mut out = banner_text.clone();
        let mut needs_struct_import = true;
        let mut weak_dependencies: Vec<TypeIndex> = Vec::new();
        let mut already_included: HashSet<String> = HashSet::new();

        let mut dependencies: Vec<(TypeIndex, EdgeStrength)> = header
            .dependencies
            .iter()
            .map(|(&ty, &strength)| (ty, strength))
            .collect();
        dependencies.sort_unstable_by_key(|&(ty, _)| ty);

        for (ty, strength) in dependencies {
            if record.is_struct_type(ty) {
                if needs_struct_import {
                    needs_struct_import = false;
                    let _ = writeln!(out, "#import \"{base}-Structs.h\"");
                }
            } else if strength == EdgeStrength::Strong {
                if record.is_external_type(ty) {
                    if let Some(path) = config.include_paths.get(&ty) {
                        let mut include_path = path.clone();
                        if include_path.ends_with('/') {
                            include_path.push_str(record.name_of_type(ty));
                            include_path.push_str(".h");
                        }
                        if already_included.insert(include_path.clone()) {
                            let _ = writeln!(out, "#import <{include_path}>");
                        }
                    } else {
                        let _ = writeln!(
                            out,
                            "#import <{}.h> // Unknown library",
                            record.name_of_type(ty)
                        );
                    }
                } else {
                    let _ = writeln!(out, "#import \"{}.h\"", record.name_of_type(ty));
                }
            } else {
                weak_dependencies.push(ty);
            }
        }

        out.push('\n');
        out.push_str(&record.format_forward_declaration(&weak_dependencies));
        out.push('\n');
        out.push_str(&header.declaration);
        written.push(write_file(config.out_dir, &format!("{name}.h"), &out)?);
    }

    Ok(written)
}

/// Output basename: last path component of the source, extension stripped.
pub fn aggregation_basename(source: &str) -> String {
    let last = source.rsplit('/').next().unwrap_or(source);
    match last.rfind('.') {
        Some(dot) => last[..dot].to_string(),
        None => last.to_string(),
    }
}

fn write_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

//! Persisted per-method type hints.
//!
//! A hint store lets corrections from earlier runs survive: the user edits
//! the stored type cells for a method, and later runs render those cells
//! instead of the recorded encodings. When an edited cell specializes a
//! generic `id` reference into a named type, loading the store feeds a weak
//! dependency edge back into the type record so the emitted header forward
//! declares the name.

pub mod tsv;

use std::path::{Path, PathBuf};

use crate::core::{ClassUnit, Method, UnitKind, FIRST_ARGUMENT_COMPONENT};
use crate::record::TypeRecord;

pub use tsv::HintError;
use tsv::{TableId, TsvFile};

const METHODS_TABLE: &str = "methods";

/// Canonical hint key for a method: `-[Receiver selector]` with `+` for
/// class methods; protocol receivers render as `id<Name>` and categories use
/// the extended class name.
pub fn canonical_signature(unit: &ClassUnit, method: &Method) -> String {
    let mut key = String::from(if method.is_class_method { "+[" } else { "-[" });
    match unit.kind {
        UnitKind::Protocol => {
            key.push_str("id<");
            key.push_str(&unit.name);
            key.push('>');
        }
        UnitKind::Category => key.push_str(unit.extended_class()),
        UnitKind::Class => key.push_str(&unit.name),
    }
    key.push(' ');
    key.push_str(&method.raw_name);
    if !key.ends_with(']') {
        key.push(']');
    }
    key
}

/// Loaded hint table bound to its backing file path.
///
/// Mutated only inside [`HintStore::load`]; rendering reads it through
/// [`HintStore::lookup`].
#[derive(Debug)]
pub struct HintStore {
    file: TsvFile,
    table: TableId,
    path: PathBuf,
}

impl HintStore {
    /// Read the store (creating an empty table on first use), seed a row for
    /// every method, and register weak edges for hint cells that specialize
    /// a generic `id` reference.
    pub fn load(
        path: &Path,
        units: &[ClassUnit],
        record: &mut dyn TypeRecord,
    ) -> Result<Self, HintError> {
        let mut file = TsvFile::read(path)?;
        let (table, existed) = file.add_table(METHODS_TABLE);
        if !existed {
            file.add_table_comment(
                table,
                "This section contains customized type signatures for Objective-C methods.",
            );
            file.add_table_comment(
                table,
                "You can replace \"id\" with a more specific type to improve the headers.",
            );
            file.add_table_comment(table, "");
            file.add_table_comment(table, "Method\tAttributes\tReturn type\tArg2\tArg3\t...");
        }

        for unit in units {
            for method in &unit.methods {
                let key = canonical_signature(unit, method);
                let row = file.add_row(table, &key);
                seed_missing_cells(file.row_mut(table, row), method, &*record);
                register_specialized_references(file.row(table, row), unit, method, record);
            }
        }

        Ok(Self {
            file,
            table,
            path: path.to_path_buf(),
        })
    }

    /// Hint text for a formatting request. Index 0 asks for the return type;
    /// other indices are component indices of arguments. The stored cell
    /// layout reserves cell 0 (the attribute column), so requests map to
    /// cell `index - 1` with the return type living at cell 1. A missing row
    /// or cell is a miss, not an error.
    pub fn lookup(&self, key: &str, index: usize) -> Option<&str> {
        let row = self.file.find_row(self.table, key)?;
        let cells = self.file.row(self.table, row);
        let cell = if index == 0 { 1 } else { index - 1 };
        cells.get(cell).map(String::as_str)
    }

    /// Persist the table back to the path it was loaded from.
    pub fn write(&self) -> Result<(), HintError> {
        self.file.write(&self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Grow a row to its full width: attribute cell, return type, one cell per
/// argument from the third component on. Cells already present are left
/// untouched, so user edits survive re-seeding.
fn seed_missing_cells(cells: &mut Vec<String>, method: &Method, record: &dyn TypeRecord) {
    let width = match method.types.len() {
        0 => 1,
        n => n.max(FIRST_ARGUMENT_COMPONENT) - FIRST_ARGUMENT_COMPONENT + 2,
    };
    while cells.len() < width {
        let text = match cells.len() {
            0 => String::new(),
            1 => method
                .types
                .first()
                .map(|&ty| record.format(ty, ""))
                .unwrap_or_default(),
            cell => method
                .types
                .get(cell + 1)
                .map(|&ty| record.format(ty, ""))
                .unwrap_or_default(),
        };
        cells.push(text);
    }
}

/// Walk the (cell, original type) pairs: cell 1 against the return type,
/// then one cell per argument type. A weak edge is registered whenever an
/// edited cell names a concrete type where the runtime only recorded `id`.
fn register_specialized_references(
    cells: &[String],
    unit: &ClassUnit,
    method: &Method,
    record: &mut dyn TypeRecord,
) {
    let mut cell_idx = 1usize;
    let mut type_idx = 0usize;
    while type_idx < method.types.len() {
        let ty = method.types[type_idx];
        if record.is_id_type(ty) {
            if let Some(cell) = cells.get(cell_idx) {
                if cell.as_str() != "id" {
                    if let Some(name) = specialize(cell) {
                        let parsed = record.parse(&format!("@\"{name}\""), false);
                        record.add_weak_link(unit.type_index, parsed);
                    }
                }
            }
        }
        if type_idx == 0 {
            type_idx = FIRST_ARGUMENT_COMPONENT - 1;
        }
        type_idx += 1;
        cell_idx += 1;
    }
}

/// Reduce an edited cell like `NSArray *` or `id<NSCoding> x` to the bare
/// referenced name: cut at the first character outside the identifier /
/// angle-bracket / comma set, then drop a leading `id`.
fn specialize(text: &str) -> Option<&str> {
    let cut = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '$' | '_' | '<' | '>' | ',')))
        .unwrap_or(text.len());
    let mut kept = &text[..cut];
    kept = kept.strip_prefix("id").unwrap_or(kept);
    if kept.is_empty() {
        None
    } else {
        Some(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PropertizeStatus;

    fn unit(kind: UnitKind, name: &str, superclass: Option<&str>) -> ClassUnit {
        ClassUnit {
            kind,
            name: name.to_string(),
            superclass: superclass.map(str::to_string),
            adopted_protocols: Vec::new(),
            hidden: false,
            exception: false,
            ivars: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            type_index: 0,
        }
    }

    fn method(raw_name: &str, is_class_method: bool) -> Method {
        Method {
            raw_name: raw_name.to_string(),
            components: vec![String::new(); 3],
            arg_names: Vec::new(),
            types: vec![0, 0, 0],
            is_class_method,
            propertize_status: PropertizeStatus::None,
            address: None,
            optional: false,
        }
    }

    #[test]
    fn canonical_signature_by_receiver_kind() {
        let m = method("count", false);
        assert_eq!(
            canonical_signature(&unit(UnitKind::Class, "Widget", None), &m),
            "-[Widget count]"
        );
        assert_eq!(
            canonical_signature(&unit(UnitKind::Protocol, "NSCoding", None), &m),
            "-[id<NSCoding> count]"
        );
        assert_eq!(
            canonical_signature(
                &unit(UnitKind::Category, "Extras", Some("Widget")),
                &method("reload", true)
            ),
            "+[Widget reload]"
        );
    }

    #[test]
    fn canonical_signature_keeps_existing_bracket() {
        let m = method("weird]", false);
        assert_eq!(
            canonical_signature(&unit(UnitKind::Class, "Widget", None), &m),
            "-[Widget weird]"
        );
    }

    #[test]
    fn specialize_cuts_at_first_foreign_character() {
        assert_eq!(specialize("NSArray *"), Some("NSArray"));
        assert_eq!(specialize("id<NSCoding>"), Some("<NSCoding>"));
        assert_eq!(specialize("id"), None);
        assert_eq!(specialize(""), None);
        assert_eq!(specialize("OMG<WTF,BBQ>*"), Some("OMG<WTF,BBQ>"));
    }
}

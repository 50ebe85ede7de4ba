//! Header emission: provenance banner, combined stream, struct stream.

pub mod splitter;

use std::io::Write;

use anyhow::Result;

use crate::core::ClassUnit;
use crate::filter::NameFilter;
use crate::record::TypeRecord;
use crate::render::Renderer;
use crate::sort::{self, UnitSort};

/// Provenance banner prefixed to every generated header.
pub fn banner(source: &str) -> String {
    format!(
        "/**\n * This header is generated by declassify {}.\n * declassify reconstructs Objective-C interfaces from decoded runtime metadata.\n *\n * Source: {}\n */\n\n",
        env!("CARGO_PKG_VERSION"),
        source
    )
}

/// Write every unit's declaration to one sink, ordered by `unit_sort`.
pub fn write_combined<W: Write>(
    writer: &mut W,
    units: &[ClassUnit],
    renderer: &Renderer,
    unit_sort: UnitSort,
) -> Result<()> {
    let order = sort::unit_order(units, unit_sort);
    for &i in &order {
        writer.write_all(renderer.render_unit(&units[i]).as_bytes())?;
    }
    Ok(())
}

/// Write the banner and every public struct declaration that survives the
/// name filter, optionally alphabetically.
pub fn write_struct_declarations<W: Write>(
    writer: &mut W,
    record: &dyn TypeRecord,
    filter: &NameFilter,
    alphabetic: bool,
    source: &str,
) -> Result<()> {
    writer.write_all(banner(source).as_bytes())?;
    let mut types = record.all_public_struct_types();
    if alphabetic {
        record.sort_alphabetically(&mut types);
    }
    for ty in types {
        if !filter.is_suppressed(record.name_of_type(ty), true) {
            writeln!(writer, "{};\n", record.format_as_declaration(ty))?;
        }
    }
    Ok(())
}

// Export modules for library usage
pub mod cli;
pub mod core;
pub mod emit;
pub mod filter;
pub mod hints;
pub mod io;
pub mod record;
pub mod render;
pub mod sort;

// Re-export commonly used types
pub use crate::core::{
    ClassUnit, GcStrength, ImplMethod, Ivar, Method, Property, PropertizeStatus, UnitKind,
};

pub use crate::emit::{
    banner,
    splitter::{write_header_files, SplitterConfig},
    write_combined, write_struct_declarations,
};

pub use crate::filter::NameFilter;

pub use crate::hints::{canonical_signature, HintError, HintStore};

pub use crate::io::metadata::{load_metadata, read_metadata_file, LoadedMetadata, MetadataDocument};

pub use crate::record::{
    combine_dependencies,
    registry::{TypeEntry, TypeKind, TypeRegistry},
    EdgeStrength, TypeIndex, TypeRecord,
};

pub use crate::render::{RenderOptions, Renderer};

pub use crate::sort::{MemberSort, UnitSort};

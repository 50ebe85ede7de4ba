use std::collections::HashMap;
use std::fs;
use std::path::Path;

use declassify::{
    write_header_files, NameFilter, RenderOptions, Renderer, SplitterConfig, TypeEntry, TypeKind,
    TypeRecord, TypeRegistry,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

mod common;
use common::*;

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

fn split(
    dir: &Path,
    registry: &TypeRegistry,
    units: &[declassify::ClassUnit],
    filter: &NameFilter,
    include_paths: &HashMap<usize, String>,
) -> Vec<std::path::PathBuf> {
    let options = RenderOptions::default();
    let renderer = Renderer::new(registry, filter, None, &options);
    let config = SplitterConfig {
        out_dir: dir,
        include_paths,
    };
    write_header_files(&config, units, &renderer, "/usr/lib/Meta.dylib").unwrap()
}

#[test]
fn aggregation_lists_each_unit_file_exactly_once() {
    let dir = tempdir().unwrap();
    let mut registry = test_registry();
    let foo = register_unit_type(&mut registry, "Foo");
    let baz = register_unit_type(&mut registry, "Baz");
    let units = vec![class("Foo", "NSObject", foo), class("Baz", "NSObject", baz)];

    split(dir.path(), &registry, &units, &NameFilter::new(), &HashMap::new());

    let aggregate = read(dir.path(), "Meta.h");
    assert_eq!(aggregate.matches("#import \"Meta-Structs.h\"").count(), 1);
    assert_eq!(aggregate.matches("#import \"Foo.h\"").count(), 1);
    assert_eq!(aggregate.matches("#import \"Baz.h\"").count(), 1);

    // Dependency-free units get no import lines of their own.
    let foo_header = read(dir.path(), "Foo.h");
    assert!(!foo_header.contains("#import"));
    assert!(foo_header.contains("@interface Foo : NSObject"));
    assert!(foo_header.starts_with("/**\n * This header is generated by declassify"));
    assert!(foo_header.contains("Source: /usr/lib/Meta.dylib"));
}

#[test]
fn category_shares_the_extended_class_file() {
    let dir = tempdir().unwrap();
    let mut registry = test_registry();
    let bar = register_unit_type(&mut registry, "Bar");
    let extras = register_unit_type(&mut registry, "Extras");
    let mut bar_unit = class("Bar", "NSObject", bar);
    bar_unit.methods.push(method("core", VOID, &[]));
    let mut extras_unit = category("Extras", "Bar", extras);
    extras_unit.methods.push(method("bonus", VOID, &[]));
    let units = vec![bar_unit, extras_unit];

    let written = split(dir.path(), &registry, &units, &NameFilter::new(), &HashMap::new());

    assert!(!written.iter().any(|p| p.ends_with("Extras.h")));
    let merged = read(dir.path(), "Bar.h");
    let class_pos = merged.find("@interface Bar : NSObject").unwrap();
    let category_pos = merged.find("@interface Bar (Extras)").unwrap();
    assert!(class_pos < category_pos);

    let aggregate = read(dir.path(), "Meta.h");
    assert_eq!(aggregate.matches("#import \"Bar.h\"").count(), 1);
    assert!(!aggregate.contains("Extras.h"));
}

#[test]
fn merged_dependencies_union_with_strong_winning() {
    let dir = tempdir().unwrap();
    let mut registry = test_registry();
    let bar = register_unit_type(&mut registry, "Bar");
    let extras = register_unit_type(&mut registry, "Extras");
    let other = register_unit_type(&mut registry, "Other");
    let helper = register_unit_type(&mut registry, "Helper");

    // The class only names Other (weak); the category needs its full
    // definition (strong) and weakly references Helper.
    registry.add_weak_link(bar, other);
    registry.add_strong_link(extras, other);
    registry.add_weak_link(extras, helper);

    let units = vec![class("Bar", "NSObject", bar), category("Extras", "Bar", extras)];
    split(dir.path(), &registry, &units, &NameFilter::new(), &HashMap::new());

    let merged = read(dir.path(), "Bar.h");
    assert!(merged.contains("#import \"Other.h\"\n"));
    assert!(!merged.contains("@class Other"));
    assert!(merged.contains("@class Helper;\n"));
}

#[test]
fn unit_colliding_with_the_aggregate_name_is_renamed() {
    let dir = tempdir().unwrap();
    let mut registry = test_registry();
    let meta = register_unit_type(&mut registry, "Meta");
    let units = vec![class("Meta", "NSObject", meta)];

    split(dir.path(), &registry, &units, &NameFilter::new(), &HashMap::new());

    let aggregate = read(dir.path(), "Meta.h");
    assert!(aggregate.contains("#import \"Meta-Class.h\"\n"));
    let renamed = read(dir.path(), "Meta-Class.h");
    assert!(renamed.contains("@interface Meta : NSObject"));
}

#[test]
fn suppressed_unit_keeps_a_placeholder_only_when_strongly_referenced() {
    let dir = tempdir().unwrap();
    let mut registry = test_registry();
    let kept = register_unit_type(&mut registry, "Kept");
    let wanted = register_unit_type(&mut registry, "SecretWanted");
    let dropped = register_unit_type(&mut registry, "SecretDropped");
    registry.add_strong_link(kept, wanted);

    let units = vec![
        class("Kept", "NSObject", kept),
        class("SecretWanted", "NSObject", wanted),
        class("SecretDropped", "NSObject", dropped),
    ];
    let mut filter = NameFilter::new();
    filter.set_class_pattern("^Secret");

    split(dir.path(), &registry, &units, &filter, &HashMap::new());

    // The strongly referenced unit leaves an empty placeholder so the
    // import in Kept.h resolves; the unreferenced one vanishes.
    let placeholder = read(dir.path(), "SecretWanted.h");
    assert!(!placeholder.contains("@interface"));
    assert!(!dir.path().join("SecretDropped.h").exists());
    let kept_header = read(dir.path(), "Kept.h");
    assert!(kept_header.contains("#import \"SecretWanted.h\"\n"));
}

#[test]
fn external_strong_dependencies_resolve_through_the_path_table() {
    let dir = tempdir().unwrap();
    let mut registry = test_registry();
    let widget = register_unit_type(&mut registry, "Widget");
    let view = registry.insert(TypeEntry {
        external: true,
        ..entry("UIView", TypeKind::Class)
    });
    let ghost = registry.insert(TypeEntry {
        external: true,
        ..entry("Ghost", TypeKind::Class)
    });
    registry.add_strong_link(widget, NSSTRING);
    registry.add_strong_link(widget, view);
    registry.add_strong_link(widget, ghost);

    let include_paths = HashMap::from([
        (NSSTRING, "Foundation/Foundation.h".to_string()),
        (view, "UIKit/".to_string()),
    ]);
    let units = vec![class("Widget", "NSObject", widget)];
    split(dir.path(), &registry, &units, &NameFilter::new(), &include_paths);

    let header = read(dir.path(), "Widget.h");
    assert!(header.contains("#import <Foundation/Foundation.h>\n"));
    // Directory paths get the bare type name and suffix appended.
    assert!(header.contains("#import <UIKit/UIView.h>\n"));
    assert!(header.contains("#import <Ghost.h> // Unknown library\n"));
}

#[test]
fn resolved_paths_deduplicate_but_unknown_fallbacks_do_not() {
    let dir = tempdir().unwrap();
    let mut registry = test_registry();
    let widget = register_unit_type(&mut registry, "Widget");
    let date = registry.insert(TypeEntry {
        external: true,
        ..entry("NSDate", TypeKind::Class)
    });
    // Two distinct unknown externals sharing one name: the fallback line
    // repeats because only resolved path strings are deduplicated.
    let ghost_a = registry.insert(TypeEntry {
        external: true,
        ..entry("Ghost", TypeKind::Class)
    });
    let ghost_b = registry.insert(TypeEntry {
        name: "Ghost".to_string(),
        kind: TypeKind::Class,
        external: true,
        public: false,
        definition: None,
    });
    registry.add_strong_link(widget, NSSTRING);
    registry.add_strong_link(widget, date);
    registry.add_strong_link(widget, ghost_a);
    registry.add_strong_link(widget, ghost_b);

    let include_paths = HashMap::from([
        (NSSTRING, "Foundation/Foundation.h".to_string()),
        (date, "Foundation/Foundation.h".to_string()),
    ]);
    let units = vec![class("Widget", "NSObject", widget)];
    split(dir.path(), &registry, &units, &NameFilter::new(), &include_paths);

    let header = read(dir.path(), "Widget.h");
    assert_eq!(header.matches("#import <Foundation/Foundation.h>").count(), 1);
    assert_eq!(header.matches("#import <Ghost.h> // Unknown library").count(), 2);
}

#[test]
fn struct_dependencies_pull_in_the_shared_structs_header_once() {
    let dir = tempdir().unwrap();
    let mut registry = test_registry();
    let widget = register_unit_type(&mut registry, "Widget");
    let size = registry.insert(TypeEntry {
        public: true,
        ..entry("CGSize", TypeKind::Struct)
    });
    registry.add_strong_link(widget, CGRECT);
    registry.add_weak_link(widget, size);

    let units = vec![class("Widget", "NSObject", widget)];
    split(dir.path(), &registry, &units, &NameFilter::new(), &HashMap::new());

    let header = read(dir.path(), "Widget.h");
    assert_eq!(header.matches("#import \"Meta-Structs.h\"").count(), 1);

    let structs = read(dir.path(), "Meta-Structs.h");
    assert!(structs.contains("typedef struct CGRect {"));
    assert!(structs.contains("typedef struct CGSize CGSize;\n"));
}

#[test]
fn filtered_struct_types_stay_out_of_the_structs_header() {
    let dir = tempdir().unwrap();
    let mut registry = test_registry();
    let widget = register_unit_type(&mut registry, "Widget");
    registry.insert(TypeEntry {
        public: true,
        ..entry("SecretBlob", TypeKind::Struct)
    });

    let mut filter = NameFilter::new();
    filter.set_class_pattern("^Secret");
    let units = vec![class("Widget", "NSObject", widget)];
    split(dir.path(), &registry, &units, &filter, &HashMap::new());

    let structs = read(dir.path(), "Meta-Structs.h");
    assert!(!structs.contains("SecretBlob"));
    assert!(structs.contains("typedef struct CGRect {"));
}

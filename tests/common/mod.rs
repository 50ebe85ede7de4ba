// Test utility module for declassify integration tests
#![allow(dead_code)]

use declassify::{
    ClassUnit, GcStrength, ImplMethod, Ivar, Method, Property, PropertizeStatus, TypeEntry,
    TypeIndex, TypeKind, TypeRegistry, UnitKind,
};

// Indices of the baseline types registered by `test_registry`.
pub const ID: TypeIndex = 0;
pub const VOID: TypeIndex = 1;
pub const INT: TypeIndex = 2;
pub const NSSTRING: TypeIndex = 3;
pub const NSOBJECT: TypeIndex = 4;
pub const CGRECT: TypeIndex = 5;

pub fn entry(name: &str, kind: TypeKind) -> TypeEntry {
    TypeEntry {
        name: name.to_string(),
        kind,
        external: false,
        public: false,
        definition: None,
    }
}

/// Registry with the handful of types most fixtures need.
pub fn test_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.insert(entry("id", TypeKind::Id));
    registry.insert(entry("void", TypeKind::Primitive));
    registry.insert(entry("int", TypeKind::Primitive));
    registry.insert(TypeEntry {
        external: true,
        ..entry("NSString", TypeKind::Class)
    });
    registry.insert(TypeEntry {
        external: true,
        ..entry("NSObject", TypeKind::Class)
    });
    registry.insert(TypeEntry {
        public: true,
        definition: Some(
            "typedef struct CGRect {\n\tfloat x;\n\tfloat y;\n\tfloat w;\n\tfloat h;\n} CGRect"
                .to_string(),
        ),
        ..entry("CGRect", TypeKind::Struct)
    });
    registry
}

/// Register an internally defined class type for a unit under test.
pub fn register_unit_type(registry: &mut TypeRegistry, name: &str) -> TypeIndex {
    registry.insert(entry(name, TypeKind::Class))
}

pub fn class(name: &str, superclass: &str, type_index: TypeIndex) -> ClassUnit {
    ClassUnit {
        kind: UnitKind::Class,
        name: name.to_string(),
        superclass: Some(superclass.to_string()),
        adopted_protocols: Vec::new(),
        hidden: false,
        exception: false,
        ivars: Vec::new(),
        properties: Vec::new(),
        methods: Vec::new(),
        type_index,
    }
}

pub fn protocol(name: &str, type_index: TypeIndex) -> ClassUnit {
    ClassUnit {
        kind: UnitKind::Protocol,
        superclass: None,
        ..class(name, "", type_index)
    }
}

pub fn category(name: &str, extended_class: &str, type_index: TypeIndex) -> ClassUnit {
    ClassUnit {
        kind: UnitKind::Category,
        ..class(name, extended_class, type_index)
    }
}

/// Build a method from its selector: `doX:withY:` becomes two argument
/// components with argument names `arg1`, `arg2` and one type per argument.
pub fn method(raw_name: &str, return_type: TypeIndex, arg_types: &[TypeIndex]) -> Method {
    let mut components = vec![String::new(), String::new(), String::new()];
    let mut arg_names = vec![String::new(), String::new(), String::new()];
    let mut types = vec![return_type, ID, ID];
    for (i, part) in raw_name.split(':').filter(|p| !p.is_empty()).enumerate() {
        if arg_types.is_empty() {
            break;
        }
        components.push(part.to_string());
        arg_names.push(format!("arg{}", i + 1));
        types.push(arg_types.get(i).copied().unwrap_or(ID));
    }
    Method {
        raw_name: raw_name.to_string(),
        components,
        arg_names,
        types,
        is_class_method: false,
        propertize_status: PropertizeStatus::None,
        address: None,
        optional: false,
    }
}

pub fn property(name: &str, ty: TypeIndex) -> Property {
    Property {
        name: name.to_string(),
        ty,
        readonly: false,
        copy: false,
        retain: false,
        nonatomic: false,
        getter: None,
        setter: None,
        gc_strength: GcStrength::None,
        impl_method: ImplMethod::None,
        hidden: PropertizeStatus::None,
        getter_address: None,
        setter_address: None,
        optional: false,
    }
}

pub fn ivar(name: &str, ty: TypeIndex, offset: u32, is_private: bool) -> Ivar {
    Ivar {
        name: name.to_string(),
        ty,
        offset,
        is_private,
    }
}

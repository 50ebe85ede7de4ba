pub mod types;

pub use types::{
    ClassUnit, GcStrength, ImplMethod, Ivar, Method, Property, PropertizeStatus, UnitKind,
    FIRST_ARGUMENT_COMPONENT,
};

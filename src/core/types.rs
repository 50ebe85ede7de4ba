//! Decoded Objective-C runtime metadata records.
//!
//! These records are produced by the external metadata extractor and arrive
//! through the JSON handoff in `crate::io::metadata`. They are read-only from
//! this crate's perspective: rendering and dependency aggregation never
//! mutate a unit after construction.

use serde::{Deserialize, Serialize};

use crate::record::TypeIndex;

/// What kind of declaration a [`ClassUnit`] reconstructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Class,
    Protocol,
    Category,
}

/// Links a method to the property it implements, or to protocol adoption /
/// inheritance. Controls whether the member renders as an active declaration
/// or as a comment, depending on the comment verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertizeStatus {
    #[default]
    None,
    DeclaredGetter,
    DeclaredSetter,
    ConvertedGetter,
    ConvertedSetter,
    AdoptingProtocol,
    Inherited,
}

impl PropertizeStatus {
    /// Comment prefix rendered before a member carrying this classification.
    pub fn comment_prefix(self) -> &'static str {
        match self {
            PropertizeStatus::None => "",
            PropertizeStatus::DeclaredGetter => "// declared property getter: ",
            PropertizeStatus::DeclaredSetter => "// declared property setter: ",
            PropertizeStatus::ConvertedGetter => "// converted property getter: ",
            PropertizeStatus::ConvertedSetter => "// converted property setter: ",
            PropertizeStatus::AdoptingProtocol => "// in a protocol: ",
            PropertizeStatus::Inherited => "// inherited: ",
        }
    }

    /// AdoptingProtocol and Inherited survive at comment verbosity 1; the
    /// accessor classifications only appear at verbosity 2.
    pub fn is_adoption_or_inheritance(self) -> bool {
        matches!(
            self,
            PropertizeStatus::AdoptingProtocol | PropertizeStatus::Inherited
        )
    }
}

/// Garbage-collection write barrier strength of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GcStrength {
    #[default]
    None,
    Strong,
    Weak,
}

/// How a property is backed in the implementation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplMethod {
    #[default]
    None,
    /// `@synthesize`, carrying the backing ivar name.
    Synthesized(String),
    Dynamic,
    /// Declared as a property but implemented as a plain method pair.
    Converted,
}

/// Instance variable of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ivar {
    pub name: String,
    pub ty: TypeIndex,
    pub offset: u32,
    #[serde(default)]
    pub is_private: bool,
}

/// Reconstructed `@property` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub ty: TypeIndex,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default)]
    pub copy: bool,
    #[serde(default)]
    pub retain: bool,
    #[serde(default)]
    pub nonatomic: bool,
    #[serde(default)]
    pub getter: Option<String>,
    #[serde(default)]
    pub setter: Option<String>,
    #[serde(default)]
    pub gc_strength: GcStrength,
    #[serde(default)]
    pub impl_method: ImplMethod,
    /// Mirrors [`Method::propertize_status`]; a non-`None` value demotes the
    /// property to a comment (or hides it) depending on verbosity.
    #[serde(default)]
    pub hidden: PropertizeStatus,
    #[serde(default)]
    pub getter_address: Option<u64>,
    #[serde(default)]
    pub setter_address: Option<u64>,
    /// Protocol-optional requirement, shared with methods for the
    /// `@optional`/`@required` run markers.
    #[serde(default)]
    pub optional: bool,
}

/// First component index that carries a user-visible argument.
///
/// Components 0–2 of a runtime selector encoding hold the
/// receiver/selector/superclass machinery.
pub const FIRST_ARGUMENT_COMPONENT: usize = 3;

/// Reconstructed method declaration.
///
/// `components` and `arg_names` are parallel vectors; `types[0]` is the
/// return type and argument types share the component indices from
/// [`FIRST_ARGUMENT_COMPONENT`] on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub raw_name: String,
    pub components: Vec<String>,
    #[serde(default)]
    pub arg_names: Vec<String>,
    pub types: Vec<TypeIndex>,
    #[serde(default)]
    pub is_class_method: bool,
    #[serde(default)]
    pub propertize_status: PropertizeStatus,
    #[serde(default)]
    pub address: Option<u64>,
    #[serde(default)]
    pub optional: bool,
}

impl Method {
    /// Number of user-visible arguments.
    pub fn argument_count(&self) -> usize {
        self.types.len().saturating_sub(FIRST_ARGUMENT_COMPONENT)
    }
}

/// One reconstructed class, protocol, or category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassUnit {
    pub kind: UnitKind,
    pub name: String,
    /// Superclass name; categories store the extended class name here.
    #[serde(default)]
    pub superclass: Option<String>,
    /// Adopted protocol names in original declaration order.
    #[serde(default)]
    pub adopted_protocols: Vec<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub exception: bool,
    #[serde(default)]
    pub ivars: Vec<Ivar>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub methods: Vec<Method>,
    /// Back-reference into the type-record service, used for dependency
    /// lookups and hint-derived edge registration.
    pub type_index: TypeIndex,
}

impl ClassUnit {
    /// Name of the class this unit extends, for categories.
    pub fn extended_class(&self) -> &str {
        self.superclass.as_deref().unwrap_or("")
    }

    /// File-grouping name: categories file under their extended class.
    pub fn base_name(&self) -> &str {
        match self.kind {
            UnitKind::Category => self.extended_class(),
            _ => &self.name,
        }
    }

    /// Primary sort name: the extended class for categories, else the unit's
    /// own name.
    pub fn major_name(&self) -> &str {
        self.base_name()
    }

    /// Secondary sort name; only categories have one, and its absence sorts
    /// first.
    pub fn minor_name(&self) -> Option<&str> {
        match self.kind {
            UnitKind::Category => Some(&self.name),
            _ => None,
        }
    }
}

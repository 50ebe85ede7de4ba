//! Turns metadata records into Objective-C declaration text.
//!
//! One [`Renderer`] borrows the pieces of a dump session (name filter, hint
//! store, type record, options) and renders whole units. Members that fall
//! to a filter or to the comment verbosity render as empty strings; empty is
//! the ordinary "nothing to print" value, never an error.

use std::fmt::Write as _;

use crate::core::{
    ClassUnit, GcStrength, ImplMethod, Method, Property, PropertizeStatus, UnitKind,
    FIRST_ARGUMENT_COMPONENT,
};
use crate::filter::NameFilter;
use crate::hints::{canonical_signature, HintStore};
use crate::record::TypeRecord;
use crate::sort::{self, MemberSort};

/// Rendering switches for one dump pass.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Append method and accessor addresses as trailing comments.
    pub addresses: bool,
    /// 0 hides every filtered/auxiliary member; 1 also shows
    /// protocol-adoption and inheritance stubs as comments; 2 additionally
    /// shows accessor classifications and `@synthesize`/`@dynamic`
    /// annotations.
    pub verbosity: u8,
    /// Append ivar byte offsets as trailing comments.
    pub ivar_offsets: bool,
    pub member_sort: MemberSort,
    /// Drop units marked hidden in the binary.
    pub exported_only: bool,
    /// Space between the `+`/`-` sigil and the return type.
    pub sigil_space: bool,
    pub hide_categories: bool,
    pub hide_protocols: bool,
}

/// Borrowed session state for rendering declarations.
pub struct Renderer<'a> {
    pub record: &'a dyn TypeRecord,
    pub filter: &'a NameFilter,
    pub hints: Option<&'a HintStore>,
    pub options: &'a RenderOptions,
}

impl<'a> Renderer<'a> {
    pub fn new(
        record: &'a dyn TypeRecord,
        filter: &'a NameFilter,
        hints: Option<&'a HintStore>,
        options: &'a RenderOptions,
    ) -> Self {
        Self {
            record,
            filter,
            hints,
            options,
        }
    }

    /// Render a whole unit, or empty text when it is suppressed.
    pub fn render_unit(&self, unit: &ClassUnit) -> String {
        let options = self.options;
        if (options.hide_categories && unit.kind == UnitKind::Category)
            || (options.hide_protocols && unit.kind == UnitKind::Protocol)
        {
            return String::new();
        }
        if self.filter.unit_suppressed(unit) {
            return String::new();
        }

        let mut out = String::new();
        if unit.hidden {
            if options.exported_only {
                return String::new();
            }
            if unit.exception {
                out.push_str("__attribute__((visibility(\"hidden\"),objc_exception))\n");
            } else {
                out.push_str("__attribute__((visibility(\"hidden\")))\n");
            }
        } else if unit.exception {
            out.push_str("__attribute__((objc_exception))\n");
        }

        match unit.kind {
            UnitKind::Class => {
                out.push_str("@interface ");
                out.push_str(&unit.name);
                if let Some(superclass) = &unit.superclass {
                    out.push_str(" : ");
                    out.push_str(superclass);
                }
            }
            UnitKind::Protocol => {
                out.push_str("@protocol ");
                out.push_str(&unit.name);
            }
            UnitKind::Category => {
                out.push_str("@interface ");
                out.push_str(unit.extended_class());
                out.push_str(" (");
                out.push_str(&unit.name);
                out.push(')');
            }
        }

        if !unit.adopted_protocols.is_empty() {
            out.push_str(" <");
            out.push_str(&unit.adopted_protocols.join(", "));
            out.push('>');
        }

        // A method filter means a method-focused view; the ivar block is
        // omitted entirely, braces included.
        if unit.kind == UnitKind::Class && !self.filter.has_method_filter() {
            out.push_str(" {\n");
            let mut in_private = false;
            for ivar in &unit.ivars {
                if in_private != ivar.is_private {
                    out.push_str(if ivar.is_private {
                        "@private\n"
                    } else {
                        "@protected\n"
                    });
                    in_private = ivar.is_private;
                }
                out.push_str(&self.record.format_indented(ivar.ty, &ivar.name, 1));
                out.push(';');
                if options.ivar_offsets {
                    let _ = write!(out, "\t// {} = {:#x}", ivar.offset, ivar.offset);
                }
                out.push('\n');
            }
            out.push('}');
        }
        out.push('\n');

        let property_order = sort::property_order(&unit.properties, options.member_sort);
        let method_order = sort::method_order(&unit.methods, options.member_sort);

        let mut all_members_filtered = true;
        let mut in_optional = false;
        for &i in &property_order {
            let property = &unit.properties[i];
            let text = self.render_property(property);
            if !text.is_empty() {
                if property.optional != in_optional {
                    in_optional = property.optional;
                    out.push_str(if in_optional {
                        "@optional\n"
                    } else {
                        "@required\n"
                    });
                }
                all_members_filtered = false;
                out.push_str(&text);
            }
        }
        for &i in &method_order {
            let method = &unit.methods[i];
            let text = self.render_method(unit, method);
            if !text.is_empty() {
                if method.optional != in_optional {
                    in_optional = method.optional;
                    out.push_str(if in_optional {
                        "@optional\n"
                    } else {
                        "@required\n"
                    });
                }
                all_members_filtered = false;
                out.push_str(&text);
            }
        }

        // Nothing of interest survived a method filter: drop the header and
        // trailer too.
        if all_members_filtered && self.filter.has_method_filter() {
            return String::new();
        }

        out.push_str("@end\n\n");
        out
    }

    /// Render one property line, or empty text when it is suppressed.
    pub fn render_property(&self, property: &Property) -> String {
        let options = self.options;
        if property.hidden != PropertizeStatus::None && options.verbosity == 0 {
            return String::new();
        }
        if self.filter.method_suppressed(&property.name) {
            return String::new();
        }

        let mut out = String::from(property.hidden.comment_prefix());
        out.push_str("@property(");
        if property.readonly {
            out.push_str("readonly, ");
        }
        if property.copy {
            out.push_str("copy");
        } else if property.retain {
            out.push_str("retain");
        } else {
            out.push_str("assign");
        }
        if property.nonatomic {
            out.push_str(", nonatomic");
        }
        if let Some(getter) = &property.getter {
            out.push_str(", getter=");
            out.push_str(getter);
        }
        if let Some(setter) = &property.setter {
            out.push_str(", setter=");
            out.push_str(setter);
        }
        out.push_str(") ");
        match property.gc_strength {
            GcStrength::Strong => out.push_str("__strong "),
            GcStrength::Weak => out.push_str("__weak "),
            GcStrength::None => {}
        }
        out.push_str(&self.record.format(property.ty, &property.name));
        out.push(';');

        let mut commented = false;
        if options.addresses
            && (property.getter_address.is_some() || property.setter_address.is_some())
        {
            commented = true;
            out.push_str("\t// ");
            if let Some(address) = property.getter_address {
                let _ = write!(out, "G={address:#x}; ");
            }
            if let Some(address) = property.setter_address {
                let _ = write!(out, "S={address:#x}; ");
            }
        }
        if options.verbosity >= 2 && property.impl_method != ImplMethod::None {
            if !commented {
                out.push_str("\t// ");
            }
            match &property.impl_method {
                ImplMethod::Synthesized(ivar) => {
                    out.push_str("@synthesize");
                    if *ivar != property.name {
                        out.push('=');
                        out.push_str(ivar);
                    }
                }
                ImplMethod::Dynamic => out.push_str("@dynamic"),
                ImplMethod::Converted => out.push_str("converted property"),
                ImplMethod::None => {}
            }
        }

        out.push('\n');
        out
    }

    /// Render one method line, or empty text when it is suppressed.
    pub fn render_method(&self, unit: &ClassUnit, method: &Method) -> String {
        let options = self.options;
        let status = method.propertize_status;
        if status != PropertizeStatus::None
            && (options.verbosity == 0
                || (options.verbosity == 1 && !status.is_adoption_or_inheritance()))
        {
            return String::new();
        }
        if self.filter.method_suppressed(&method.raw_name) {
            return String::new();
        }

        let key = canonical_signature(unit, method);

        let mut out = String::from(status.comment_prefix());
        out.push(if method.is_class_method { '+' } else { '-' });
        if options.sigil_space {
            out.push(' ');
        }
        out.push('(');
        out.push_str(&self.hinted_type(&key, method, 0));
        out.push(')');

        if method.components.len() == FIRST_ARGUMENT_COMPONENT {
            out.push_str(&method.raw_name);
            if out.ends_with(']') {
                out.pop();
            }
        } else {
            for i in FIRST_ARGUMENT_COMPONENT..method.components.len() {
                if i != FIRST_ARGUMENT_COMPONENT {
                    out.push(' ');
                }
                out.push_str(&method.components[i]);
                out.push_str(":(");
                out.push_str(&self.hinted_type(&key, method, i));
                out.push(')');
                if let Some(arg_name) = method.arg_names.get(i) {
                    out.push_str(arg_name);
                }
            }
        }
        out.push(';');

        if options.addresses {
            if let Some(address) = method.address {
                let _ = write!(out, "\t// {address:#x}");
            }
        }

        out.push('\n');
        out
    }

    /// Type text for a method slot: the hint store wins when it has a cell
    /// for this signature, otherwise the type record's formatting.
    fn hinted_type(&self, key: &str, method: &Method, index: usize) -> String {
        if let Some(hints) = self.hints {
            if let Some(text) = hints.lookup(key, index) {
                return text.to_string();
            }
        }
        method
            .types
            .get(index)
            .map(|&ty| self.record.format(ty, ""))
            .unwrap_or_default()
    }
}

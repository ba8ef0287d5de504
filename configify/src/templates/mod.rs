//! Go source templates for the generated options file.
//!
//! Each template is a pure function from a small value record to text. The
//! header is rendered once; every included field adds one fragment built by
//! the template for its [`ShapeCategory`]. Output follows gofmt layout.

mod header;
mod option;

use std::collections::BTreeSet;

pub use header::render_header;
pub use option::render_field;

use crate::classify::{Carrier, ShapeCategory};
use crate::imports::ImportSet;

/// Values consumed by the header template.
#[derive(Debug, Clone, Copy)]
pub struct HeaderValues<'a> {
    /// Package clause name.
    pub package: &'a str,
    /// Target struct type name.
    pub target: &'a str,
    /// Imports needed by the field fragments.
    pub imports: &'a ImportSet,
    /// Identifiers used inside generated bodies.
    pub locals: &'a LocalNames,
}

/// Values consumed by a per-field template.
#[derive(Debug, Clone, Copy)]
pub struct FieldValues<'a> {
    /// Field identifier as declared.
    pub orig_name: &'a str,
    /// Lower-camel form, used for the option carrier name.
    pub name_lower: &'a str,
    /// Upper-camel form, used for the `With*` factory name.
    pub name_upper: &'a str,
    /// Payload type text (the pointee for pointer fields).
    pub orig_type: &'a str,
    /// Carrier representation.
    pub carrier: Carrier,
    /// Target struct type name.
    pub target: &'a str,
    /// Identifiers used inside generated bodies.
    pub locals: &'a LocalNames,
}

/// Local identifiers used by generated method bodies.
///
/// Chosen so none of them shadows an imported package or a package-level
/// type that a body refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalNames {
    /// Receiver of `Apply` on the target and parameter of option `Apply`.
    pub target: String,
    /// Variadic options parameter.
    pub options: String,
    /// Loop variable over options.
    pub option: String,
    /// Receiver of option carrier methods.
    pub carrier: String,
    /// Factory parameter and pointer copy.
    pub value: String,
    /// Map merge key.
    pub key: String,
    /// Map merge element.
    pub elem: String,
}

impl Default for LocalNames {
    fn default() -> Self {
        Self {
            target: "cfg".to_owned(),
            options: "options".to_owned(),
            option: "option".to_owned(),
            carrier: "o".to_owned(),
            value: "value".to_owned(),
            key: "key".to_owned(),
            elem: "elem".to_owned(),
        }
    }
}

impl LocalNames {
    /// Picks local names that avoid every identifier in `taken`.
    #[must_use]
    pub fn avoiding(taken: &BTreeSet<&str>) -> Self {
        let defaults = Self::default();
        Self {
            target: fresh(&defaults.target, taken),
            options: fresh(&defaults.options, taken),
            option: fresh(&defaults.option, taken),
            carrier: fresh(&defaults.carrier, taken),
            value: fresh(&defaults.value, taken),
            key: fresh(&defaults.key, taken),
            elem: fresh(&defaults.elem, taken),
        }
    }
}

fn fresh(base: &str, taken: &BTreeSet<&str>) -> String {
    if !taken.contains(base) {
        return base.to_owned();
    }
    (1_u32..)
        .map(|suffix| format!("{base}{suffix}"))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .unwrap_or_else(|| format!("{base}_"))
}

/// Category-independent description of a rendered field, used in logs.
#[must_use]
pub fn describe(category: ShapeCategory, values: &FieldValues<'_>) -> String {
    format!(
        "{} option With{}({}) for field {}",
        category.as_str(),
        values.name_upper,
        values.orig_type,
        values.orig_name
    )
}

//! Field shape classification.
//!
//! Every struct field is sorted into one [`ShapeCategory`] by looking at its
//! fully resolved underlying type. The category picks the option template;
//! the rendered payload type and its imports travel with it in a
//! [`ClassifiedField`]. Shapes with no template are reported as a
//! [`SkipReason`] instead of failing the run.

mod render;

use thiserror::Error;

pub use render::render_type;

use crate::imports::{ImportConflict, ImportSet, collect_imports};
use crate::model::{GoType, StructField};

const UNSAFE_POINTER: &str = "unsafe.Pointer";

/// How a field's option applies its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeCategory {
    /// Basic, array, function and struct values: plain assignment.
    Scalar,
    /// Pointer fields: the option carries the pointee and stores a copy.
    Pointer,
    /// Slice fields: the new slice replaces the old one.
    Slice,
    /// Map fields: entries are merged into the existing map.
    Map,
    /// Interface fields: plain assignment of an opaque value.
    Interface,
}

impl ShapeCategory {
    /// Returns the lowercase category name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Pointer => "pointer",
            Self::Slice => "slice",
            Self::Map => "map",
            Self::Interface => "interface",
        }
    }
}

/// Representation of the private option type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Carrier {
    /// `type xOption T`, converted back with `T(o)`.
    Defined,
    /// `type xOption struct { value T }`.
    ///
    /// Go rejects methods on defined types whose underlying type is an
    /// interface, a pointer or `unsafe.Pointer`.
    Wrapped,
}

/// A field ready for templating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedField {
    /// Field identifier as declared.
    pub name: String,
    /// Selected apply strategy.
    pub category: ShapeCategory,
    /// Option payload type as Go text; the pointee for pointer fields.
    pub rendered_type: String,
    /// Option type representation.
    pub carrier: Carrier,
    /// Packages referenced by `rendered_type`.
    pub imports: ImportSet,
}

/// Why a field produced no option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The resolved type has no option template.
    #[error("{shape} types are not supported")]
    UnsupportedShape {
        /// Human-readable shape name.
        shape: &'static str,
    },
    /// Named interface declared in another package.
    #[error("interface {name} is declared in package '{path}'; cross-package interfaces are not supported")]
    ForeignInterface {
        /// Rendered interface type.
        name: String,
        /// Declaring package path.
        path: String,
    },
    /// Named type whose underlying type the loader did not resolve.
    #[error("named type {name} has no underlying type information")]
    MissingUnderlying {
        /// Rendered named type.
        name: String,
    },
    /// The payload type needs two packages under one name.
    #[error(transparent)]
    ImportConflict(#[from] ImportConflict),
    /// Blank (`_`) fields cannot be assigned.
    #[error("blank fields cannot be set")]
    BlankIdentifier,
    /// Another field already produced the same factory name.
    #[error("{factory} is already generated for field '{previous}'")]
    DuplicateFactory {
        /// The contested `With*` name.
        factory: String,
        /// Field that claimed it first.
        previous: String,
    },
    /// A generated carrier or factory name is already a package type.
    #[error("{name} is already declared in the package")]
    NameTaken {
        /// The contested identifier.
        name: String,
    },
}

/// Classifies a non-embedded field declared in the package at `local_path`.
///
/// Rules are tried against the field's underlying type: basic, array,
/// function and struct types are scalars; slices, maps, pointers and
/// interfaces get their own categories; channels and bare type parameters
/// are rejected.
///
/// # Errors
///
/// Returns a [`SkipReason`] when the field cannot be given an option.
pub fn classify(field: &StructField, local_path: &str) -> Result<ClassifiedField, SkipReason> {
    if field.name == "_" {
        return Err(SkipReason::BlankIdentifier);
    }

    let underlying = field
        .ty
        .underlying()
        .ok_or_else(|| SkipReason::MissingUnderlying {
            name: render_type(&field.ty, local_path),
        })?;

    let (category, payload) = match underlying {
        GoType::Basic { .. } | GoType::Array { .. } | GoType::Func { .. } | GoType::Struct { .. } => {
            (ShapeCategory::Scalar, &field.ty)
        }
        GoType::Slice { .. } => (ShapeCategory::Slice, &field.ty),
        GoType::Map { .. } => (ShapeCategory::Map, &field.ty),
        GoType::Pointer { elem } => (ShapeCategory::Pointer, elem.as_ref()),
        GoType::Interface { .. } => {
            ensure_local_interface(&field.ty, local_path)?;
            (ShapeCategory::Interface, &field.ty)
        }
        GoType::Chan { .. } => return Err(SkipReason::UnsupportedShape { shape: "channel" }),
        GoType::TypeParam { .. } => {
            return Err(SkipReason::UnsupportedShape {
                shape: "type parameter",
            });
        }
        GoType::Named { .. } => {
            return Err(SkipReason::MissingUnderlying {
                name: render_type(&field.ty, local_path),
            });
        }
    };

    let carrier = match category {
        ShapeCategory::Interface => Carrier::Wrapped,
        _ => carrier_for(payload),
    };

    Ok(ClassifiedField {
        name: field.name.clone(),
        category,
        rendered_type: render_type(payload, local_path),
        carrier,
        imports: collect_imports(payload, local_path)?,
    })
}

fn ensure_local_interface(ty: &GoType, local_path: &str) -> Result<(), SkipReason> {
    match ty {
        GoType::Named {
            package: Some(package),
            ..
        } if package.path != local_path => Err(SkipReason::ForeignInterface {
            name: render_type(ty, local_path),
            path: package.path.clone(),
        }),
        _ => Ok(()),
    }
}

/// Go rejects methods on defined types whose underlying type is an
/// interface, a pointer or `unsafe.Pointer`.
fn carrier_for(payload: &GoType) -> Carrier {
    match payload.underlying() {
        Some(GoType::Interface { .. } | GoType::Pointer { .. }) | None => Carrier::Wrapped,
        Some(GoType::Basic { name }) if name == UNSAFE_POINTER => Carrier::Wrapped,
        Some(_) => Carrier::Defined,
    }
}

#[cfg(test)]
mod tests;

//! Functional options generator for Go struct types.
//!
//! Given a type-checked snapshot of a Go package and the name of a struct
//! type declared in it, `configify` emits Go source containing:
//!
//! - a `New` constructor and an `Apply` method on the struct,
//! - an `Option` interface, and
//! - one `With*` factory per supported field.
//!
//! Scalars, arrays, functions and structs are assigned; pointers store a copy
//! of the given value; slices are replaced; maps are merged; interfaces are
//! assigned as opaque values. Unsupported fields are skipped with a
//! diagnostic.

pub mod classify;
pub mod config;
pub mod error;
pub mod format;
pub mod fs_helpers;
pub mod generate;
pub mod imports;
pub mod loader;
pub mod model;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod templates;

pub use error::ConfigifyError;
pub use generate::{FieldDiagnostic, GeneratedUnit, generate};

//! Generation driver: turns one struct declaration into an options file.
//!
//! Fields are visited in declaration order. Embedded fields are passed over
//! quietly; every other field either yields an option fragment or a
//! [`FieldDiagnostic`] explaining why it was skipped. Only problems with the
//! target type itself abort generation.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;
use tracing::{debug, warn};

use crate::classify::{ClassifiedField, SkipReason, classify};
use crate::error::ConfigifyError;
use crate::imports::ImportSet;
use crate::model::{PackageSnapshot, StructField};
use crate::naming::{carrier_name, factory_name, lower_form, upper_form};
use crate::templates::{
    FieldValues, HeaderValues, LocalNames, describe, render_field, render_header,
};

/// Package-level names the generated file always declares.
const RESERVED_NAMES: [&str; 2] = ["Option", "New"];

/// A field that produced no option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("skipping field '{field}': {reason}")]
pub struct FieldDiagnostic {
    /// Field identifier as declared.
    pub field: String,
    /// Why the field was skipped.
    pub reason: SkipReason,
}

/// Unformatted output for one target type.
#[derive(Debug, Clone)]
pub struct GeneratedUnit {
    /// Package clause name.
    pub package: String,
    /// Target struct type name.
    pub target: String,
    /// Header followed by one fragment per included field.
    pub text: String,
    /// Fields that received an option, in declaration order.
    pub fields: Vec<ClassifiedField>,
    /// Imports emitted in the header.
    pub imports: ImportSet,
    /// Fields that were skipped, in declaration order.
    pub diagnostics: Vec<FieldDiagnostic>,
}

/// Generates options for `type_name` declared in `package`.
///
/// # Errors
///
/// Returns an error when the type is missing, is not a struct or is generic,
/// and when the package already declares a type named `Option` or `New`.
pub fn generate(package: &PackageSnapshot, type_name: &str) -> Result<GeneratedUnit, ConfigifyError> {
    let decl = package
        .find_type(type_name)
        .ok_or_else(|| ConfigifyError::TypeNotFound {
            name: type_name.to_owned(),
            package: package.path.clone(),
        })?;
    if !decl.type_params.is_empty() {
        return Err(ConfigifyError::GenericTarget(decl.name.clone()));
    }
    let fields = decl
        .struct_fields()
        .ok_or_else(|| ConfigifyError::NotAStruct(decl.name.clone()))?;
    if let Some(reserved) = package
        .types
        .iter()
        .find(|other| RESERVED_NAMES.contains(&other.name.as_str()))
    {
        return Err(ConfigifyError::ReservedTypeName(reserved.name.clone()));
    }

    let collected = collect_fields(fields, package);
    let locals = local_names(package, &collected.imports);

    let mut text = render_header(&HeaderValues {
        package: &package.name,
        target: &decl.name,
        imports: &collected.imports,
        locals: &locals,
    });
    for field in &collected.fields {
        let name_lower = lower_form(&field.name);
        let name_upper = upper_form(&field.name);
        let values = FieldValues {
            orig_name: &field.name,
            name_lower: &name_lower,
            name_upper: &name_upper,
            orig_type: &field.rendered_type,
            carrier: field.carrier,
            target: &decl.name,
            locals: &locals,
        };
        debug!(target_type = %decl.name, "{}", describe(field.category, &values));
        text.push_str(&render_field(field.category, &values));
    }

    Ok(GeneratedUnit {
        package: package.name.clone(),
        target: decl.name.clone(),
        text,
        fields: collected.fields,
        imports: collected.imports,
        diagnostics: collected.diagnostics,
    })
}

#[derive(Debug, Default)]
struct Collected<'a> {
    package_types: BTreeSet<&'a str>,
    fields: Vec<ClassifiedField>,
    imports: ImportSet,
    diagnostics: Vec<FieldDiagnostic>,
    factories: BTreeMap<String, String>,
}

impl Collected<'_> {
    fn admit(&mut self, field: ClassifiedField) -> Result<(), SkipReason> {
        let factory = factory_name(&field.name);
        if let Some(name) = [carrier_name(&field.name), factory.clone()]
            .into_iter()
            .find(|name| self.package_types.contains(name.as_str()))
        {
            return Err(SkipReason::NameTaken { name });
        }
        if let Some(previous) = self.factories.get(&factory) {
            return Err(SkipReason::DuplicateFactory {
                factory,
                previous: previous.clone(),
            });
        }
        self.imports.extend_checked(&field.imports)?;
        self.factories.insert(factory, field.name.clone());
        self.fields.push(field);
        Ok(())
    }
}

fn collect_fields<'a>(fields: &[StructField], package: &'a PackageSnapshot) -> Collected<'a> {
    let mut collected = Collected {
        package_types: package.types.iter().map(|decl| decl.name.as_str()).collect(),
        ..Collected::default()
    };
    for field in fields {
        if field.embedded {
            debug!(field = %field.name, "skipping embedded field");
            continue;
        }
        let outcome = classify(field, &package.path).and_then(|classified| collected.admit(classified));
        if let Err(reason) = outcome {
            warn!(field = %field.name, %reason, "skipping field");
            collected.diagnostics.push(FieldDiagnostic {
                field: field.name.clone(),
                reason,
            });
        }
    }
    collected
}

/// Generated bodies must not shadow imported packages or package-level types
/// referenced by payload types.
fn local_names(package: &PackageSnapshot, imports: &ImportSet) -> LocalNames {
    let taken: BTreeSet<&str> = imports
        .names()
        .chain(package.types.iter().map(|decl| decl.name.as_str()))
        .collect();
    LocalNames::avoiding(&taken)
}

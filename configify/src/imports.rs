//! Import accumulation for the generated unit.
//!
//! Paths are kept in a [`BTreeMap`] so the header lists them in lexicographic
//! order and repeated runs produce byte-identical output.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::{GoType, PackageRef};

/// Two different import paths competing for one package name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("package name '{name}' refers to both '{existing}' and '{requested}'")]
pub struct ImportConflict {
    /// The contested package name.
    pub name: String,
    /// Path already recorded under that name.
    pub existing: String,
    /// Path that was being added.
    pub requested: String,
}

/// Deduplicated set of import paths referenced by generated code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    by_path: BTreeMap<String, String>,
}

impl ImportSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no imports have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Number of distinct import paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    /// Whether `path` has been recorded.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    /// Package names in use, in path order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_path.values().map(String::as_str)
    }

    /// Iterates `(path, name)` pairs in lexicographic path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_path
            .iter()
            .map(|(path, name)| (path.as_str(), name.as_str()))
    }

    /// Adds a package, rejecting a second path under an already used name.
    ///
    /// # Errors
    ///
    /// Returns [`ImportConflict`] when `package.name` is already bound to a
    /// different path.
    pub fn insert(&mut self, package: &PackageRef) -> Result<(), ImportConflict> {
        if let Some((existing, _)) = self
            .by_path
            .iter()
            .find(|(path, name)| **name == package.name && **path != package.path)
        {
            return Err(ImportConflict {
                name: package.name.clone(),
                existing: existing.clone(),
                requested: package.path.clone(),
            });
        }
        self.by_path
            .insert(package.path.clone(), package.name.clone());
        Ok(())
    }

    /// Merges every package of `other` into `self`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ImportConflict`]; `self` is left untouched in that
    /// case.
    pub fn extend_checked(&mut self, other: &Self) -> Result<(), ImportConflict> {
        let mut merged = self.clone();
        for (path, name) in other.iter() {
            merged.insert(&PackageRef::new(path, name))?;
        }
        *self = merged;
        Ok(())
    }
}

/// Collects every package referenced by the rendered form of `ty`.
///
/// Packages whose path equals `local_path` are not imports. The underlying
/// type of a named type is never rendered, so it is not visited.
///
/// # Errors
///
/// Returns [`ImportConflict`] when the type itself mentions two packages
/// sharing a name.
pub fn collect_imports(ty: &GoType, local_path: &str) -> Result<ImportSet, ImportConflict> {
    let mut set = ImportSet::new();
    visit(ty, local_path, &mut set)?;
    Ok(set)
}

fn visit(ty: &GoType, local_path: &str, set: &mut ImportSet) -> Result<(), ImportConflict> {
    match ty {
        GoType::Basic { name } => {
            if name.starts_with("unsafe.") {
                set.insert(&PackageRef::new("unsafe", "unsafe"))?;
            }
        }
        GoType::Named {
            package, type_args, ..
        } => {
            if let Some(package) = package.as_ref().filter(|pkg| pkg.path != local_path) {
                set.insert(package)?;
            }
            for arg in type_args {
                visit(arg, local_path, set)?;
            }
        }
        GoType::TypeParam { .. } => {}
        GoType::Array { elem, .. }
        | GoType::Slice { elem }
        | GoType::Pointer { elem }
        | GoType::Chan { elem, .. } => visit(elem, local_path, set)?,
        GoType::Map { key, value } => {
            visit(key, local_path, set)?;
            visit(value, local_path, set)?;
        }
        GoType::Func {
            params, results, ..
        } => {
            for part in params.iter().chain(results) {
                visit(part, local_path, set)?;
            }
        }
        GoType::Struct { fields } => {
            for field in fields {
                visit(&field.ty, local_path, set)?;
            }
        }
        GoType::Interface { methods, embedded } => {
            for method in methods {
                visit(&method.signature, local_path, set)?;
            }
            for term in embedded {
                visit(term, local_path, set)?;
            }
        }
    }
    Ok(())
}

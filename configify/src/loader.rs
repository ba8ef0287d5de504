//! Package loading.
//!
//! Type-checking Go is delegated to an external loader command that prints a
//! package snapshot as JSON on stdout. A snapshot can also be read straight
//! from a file, which is how tests and offline runs feed the generator.

use std::process::Command;

use camino::Utf8PathBuf;
use tracing::debug;

use crate::error::ConfigifyError;
use crate::fs_helpers;
use crate::model::{LoadedPackages, PackageSnapshot, SNAPSHOT_VERSION};

/// What to load: package patterns and optional build tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadRequest {
    /// Directory, file or import path patterns.
    pub patterns: Vec<String>,
    /// Build tags applied while loading.
    pub tags: Vec<String>,
}

/// Source of type-checked package snapshots.
pub trait PackageLoader {
    /// Loads every package matched by `request`.
    ///
    /// # Errors
    ///
    /// Returns an error when loading fails or the output is not a valid
    /// snapshot document.
    fn load(&self, request: &LoadRequest) -> Result<LoadedPackages, ConfigifyError>;
}

/// Runs an external loader and parses its stdout.
///
/// The command receives `-tags=a,b` when tags are requested, followed by the
/// patterns.
#[derive(Debug, Clone)]
pub struct CommandLoader {
    command: Vec<String>,
}

impl CommandLoader {
    /// Creates a loader running `command` (program followed by fixed
    /// arguments).
    #[must_use]
    pub const fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    fn arguments(&self, request: &LoadRequest) -> Vec<String> {
        let mut args: Vec<String> = self.command.iter().skip(1).cloned().collect();
        if !request.tags.is_empty() {
            args.push(format!("-tags={}", request.tags.join(",")));
        }
        args.extend(request.patterns.iter().cloned());
        args
    }
}

impl PackageLoader for CommandLoader {
    fn load(&self, request: &LoadRequest) -> Result<LoadedPackages, ConfigifyError> {
        let program = self
            .command
            .first()
            .ok_or(ConfigifyError::EmptyCommand("loader"))?;
        let args = self.arguments(request);
        debug!(%program, ?args, "running package loader");

        let output = Command::new(program)
            .args(&args)
            .output()
            .map_err(|source| ConfigifyError::LoaderSpawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            let status = output.status.code().unwrap_or(-1);
            let message = format!(
                "{}{}",
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
            return Err(ConfigifyError::LoaderFailure { status, message });
        }

        let stdout =
            String::from_utf8(output.stdout).map_err(|source| ConfigifyError::LoaderOutputEncoding {
                program: program.clone(),
                source,
            })?;
        parse_snapshot(&stdout)
    }
}

/// Reads a previously captured snapshot, ignoring the request.
#[derive(Debug, Clone)]
pub struct SnapshotFileLoader {
    path: Utf8PathBuf,
}

impl SnapshotFileLoader {
    /// Creates a loader reading the snapshot at `path`.
    #[must_use]
    pub const fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

impl PackageLoader for SnapshotFileLoader {
    fn load(&self, request: &LoadRequest) -> Result<LoadedPackages, ConfigifyError> {
        debug!(path = %self.path, patterns = ?request.patterns, "reading package snapshot");
        parse_snapshot(&fs_helpers::read_to_string(&self.path)?)
    }
}

/// Parses a snapshot document and checks its schema version.
///
/// # Errors
///
/// Returns [`ConfigifyError::SnapshotJson`] for malformed documents and
/// [`ConfigifyError::SnapshotVersion`] for unsupported versions.
pub fn parse_snapshot(json: &str) -> Result<LoadedPackages, ConfigifyError> {
    let loaded: LoadedPackages = serde_json::from_str(json)?;
    if loaded.version != SNAPSHOT_VERSION {
        return Err(ConfigifyError::SnapshotVersion {
            found: loaded.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    Ok(loaded)
}

/// Takes the only package out of `loaded`.
///
/// # Errors
///
/// Returns [`ConfigifyError::PackageCount`] unless exactly one package was
/// loaded.
pub fn select_single_package(loaded: LoadedPackages) -> Result<PackageSnapshot, ConfigifyError> {
    let count = loaded.packages.len();
    let mut packages = loaded.packages.into_iter();
    match (packages.next(), packages.next()) {
        (Some(package), None) => Ok(package),
        _ => Err(ConfigifyError::PackageCount(count)),
    }
}

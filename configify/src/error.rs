//! Error types for `configify`.
//!
//! Everything here is fatal: the run stops without writing output. Problems
//! confined to a single field are [`SkipReason`](crate::classify::SkipReason)s
//! instead and never reach this type.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the `configify` pipeline.
#[derive(Debug, Error)]
pub enum ConfigifyError {
    /// Reading or writing a file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path involved in the failed operation.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The loader output was not a valid snapshot document.
    #[error("failed to parse package snapshot: {0}")]
    SnapshotJson(#[from] serde_json::Error),

    /// The loader speaks a different snapshot schema version.
    #[error("package snapshot version '{found}' is not supported (expected '{expected}')")]
    SnapshotVersion {
        /// Version reported by the loader.
        found: String,
        /// Version this build understands.
        expected: &'static str,
    },

    /// The load patterns did not resolve to exactly one package.
    #[error("expected exactly one package, found {0}")]
    PackageCount(usize),

    /// The requested type is not declared in the loaded package.
    #[error("type '{name}' not found in package '{package}'")]
    TypeNotFound {
        /// Requested type name.
        name: String,
        /// Package that was searched.
        package: String,
    },

    /// The requested type is not a struct.
    #[error("type '{0}' is not a struct type")]
    NotAStruct(String),

    /// The requested type declares type parameters.
    #[error("type '{0}' is generic; options can only be generated for non-generic structs")]
    GenericTarget(String),

    /// A package type shares its name with a generated package-level declaration.
    #[error("package type '{0}' collides with the generated {0} declaration")]
    ReservedTypeName(String),

    /// Build tags were combined with explicit file patterns.
    #[error("--tags applies only to directories, not when files are specified")]
    TagsWithFiles,

    /// A configured external command has no program.
    #[error("{0} command is empty")]
    EmptyCommand(&'static str),

    /// The package loader could not be started.
    #[error("failed to run package loader '{program}': {source}")]
    LoaderSpawn {
        /// Loader program.
        program: String,
        /// Spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The package loader exited unsuccessfully.
    #[error("package loader failed (status {status}): {message}")]
    LoaderFailure {
        /// Exit status, or -1 when killed by a signal.
        status: i32,
        /// Captured stdout and stderr.
        message: String,
    },

    /// The package loader wrote a snapshot that is not valid UTF-8.
    #[error("package loader '{program}' wrote non-UTF-8 output: {source}")]
    LoaderOutputEncoding {
        /// Loader program.
        program: String,
        /// Decoding error.
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// An explicitly requested configuration file does not exist.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(Utf8PathBuf),

    /// Configuration layers could not be merged.
    #[error("failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),
}

//! End-to-end generation: load, select, generate, format.

use tracing::info;

use crate::error::ConfigifyError;
use crate::format::SourceFormatter;
use crate::generate::{GeneratedUnit, generate};
use crate::loader::{LoadRequest, PackageLoader, select_single_package};

/// A single generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Target struct type name.
    pub type_name: String,
    /// Packages to load.
    pub load: LoadRequest,
}

/// Result of a generation run, ready to be written.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// Unformatted unit with per-field details.
    pub unit: GeneratedUnit,
    /// Final source text.
    pub source: String,
    /// Set when formatting failed and `source` is unformatted.
    pub format_warning: Option<String>,
}

/// Runs the pipeline with the given loader and formatter.
///
/// # Errors
///
/// Propagates loader failures, package selection errors and fatal target
/// errors. Formatting problems are reported in
/// [`GenerationOutput::format_warning`] instead.
pub fn run(
    request: &GenerationRequest,
    loader: &dyn PackageLoader,
    formatter: &dyn SourceFormatter,
) -> Result<GenerationOutput, ConfigifyError> {
    let package = select_single_package(loader.load(&request.load)?)?;
    let unit = generate(&package, &request.type_name)?;
    info!(
        package = %unit.package,
        target_type = %unit.target,
        options = unit.fields.len(),
        skipped = unit.diagnostics.len(),
        "generated options"
    );
    let formatted = formatter.format(&unit.text);
    Ok(GenerationOutput {
        unit,
        source: formatted.text,
        format_warning: formatted.warning,
    })
}

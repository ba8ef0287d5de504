//! Output path resolution and writing.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::error::ConfigifyError;
use crate::fs_helpers;

/// Inputs that decide where the generated file goes.
#[derive(Debug, Clone, Copy)]
pub struct OutputRequest<'a> {
    /// Load patterns as given on the command line.
    pub patterns: &'a [String],
    /// Build tags; only allowed with a single directory pattern.
    pub tags: &'a [String],
    /// Explicit output file, overriding the derived one.
    pub explicit: Option<&'a Utf8Path>,
    /// Target type name.
    pub type_name: &'a str,
    /// Suffix appended to the lower-cased type name.
    pub suffix: &'a str,
}

/// Resolves the output file path.
///
/// A single directory pattern places the file in that directory; otherwise
/// the patterns are treated as files and the file goes next to the first one.
/// The file name is the lower-cased type name followed by `suffix`. Build
/// tags are rejected up front when the patterns are files, even if an
/// explicit output path is given.
///
/// # Errors
///
/// Returns [`ConfigifyError::TagsWithFiles`] when tags accompany file
/// patterns and [`ConfigifyError::Io`] when the first pattern cannot be
/// inspected.
pub fn resolve_output_path(request: &OutputRequest<'_>) -> Result<Utf8PathBuf, ConfigifyError> {
    let dir = source_directory(request.patterns, request.tags)?;
    if let Some(explicit) = request.explicit {
        return Ok(explicit.to_path_buf());
    }
    let file_name = format!("{}{}", request.type_name.to_lowercase(), request.suffix);
    Ok(dir.join(file_name))
}

fn source_directory(patterns: &[String], tags: &[String]) -> Result<Utf8PathBuf, ConfigifyError> {
    let Some(first) = patterns.first().map(Utf8Path::new) else {
        return Ok(Utf8PathBuf::from("."));
    };
    if let [only] = patterns
        && fs_helpers::is_directory(Utf8Path::new(only))?
    {
        return Ok(first.to_path_buf());
    }
    if !tags.is_empty() {
        return Err(ConfigifyError::TagsWithFiles);
    }
    Ok(fs_helpers::parent_or_current(first).to_path_buf())
}

/// Writes the generated source, replacing any previous file.
///
/// # Errors
///
/// Returns [`ConfigifyError::Io`] when the file cannot be written.
pub fn write_source(path: &Utf8Path, source: &str) -> Result<(), ConfigifyError> {
    debug!(%path, bytes = source.len(), "writing generated source");
    fs_helpers::write_file(path, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Workspace {
        _temp: TempDir,
        root: Utf8PathBuf,
    }

    fn workspace() -> Workspace {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf-8 temp path");
        fs_helpers::write_file(&root.join("pkg/a.go"), "package pkg\n").expect("a.go");
        fs_helpers::write_file(&root.join("pkg/b.go"), "package pkg\n").expect("b.go");
        Workspace { _temp: temp, root }
    }

    fn resolve(
        patterns: &[String],
        tags: &[String],
        explicit: Option<&Utf8Path>,
    ) -> Result<Utf8PathBuf, ConfigifyError> {
        resolve_output_path(&OutputRequest {
            patterns,
            tags,
            explicit,
            type_name: "MyConfig",
            suffix: "_option.go",
        })
    }

    #[test]
    fn directory_pattern_places_file_inside() {
        let ws = workspace();
        let pkg = ws.root.join("pkg");
        let path = resolve(&[pkg.to_string()], &["integration".to_owned()], None).expect("resolve");
        assert_eq!(path, pkg.join("myconfig_option.go"));
    }

    #[test]
    fn file_patterns_use_the_first_files_directory() {
        let ws = workspace();
        let patterns = [
            ws.root.join("pkg/a.go").to_string(),
            ws.root.join("pkg/b.go").to_string(),
        ];
        let path = resolve(&patterns, &[], None).expect("resolve");
        assert_eq!(path, ws.root.join("pkg/myconfig_option.go"));
    }

    #[test]
    fn tags_with_files_are_rejected_even_with_explicit_output() {
        let ws = workspace();
        let patterns = [ws.root.join("pkg/a.go").to_string()];
        let explicit = ws.root.join("out.go");
        let err = resolve(&patterns, &["integration".to_owned()], Some(&explicit))
            .expect_err("tags with files");
        assert!(matches!(err, ConfigifyError::TagsWithFiles));
    }

    #[test]
    fn explicit_output_wins() {
        let ws = workspace();
        let explicit = ws.root.join("gen/options.go");
        let path = resolve(&[ws.root.join("pkg").to_string()], &[], Some(&explicit)).expect("resolve");
        assert_eq!(path, explicit);
    }

    #[test]
    fn missing_single_pattern_is_an_error() {
        let ws = workspace();
        let err = resolve(&[ws.root.join("nope").to_string()], &[], None).expect_err("missing");
        assert!(matches!(err, ConfigifyError::Io { .. }));
    }

    #[test]
    fn writes_replace_previous_output() {
        let ws = workspace();
        let path = ws.root.join("pkg/myconfig_option.go");
        write_source(&path, "old\n").expect("first");
        write_source(&path, "new\n").expect("second");
        assert_eq!(fs_helpers::read_to_string(&path).expect("read"), "new\n");
    }
}

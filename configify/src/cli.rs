//! Command-line interface definitions for `configify`.

use camino::Utf8PathBuf;
use clap::{Args as ClapArgs, Parser};

use configify::config::SettingsOverrides;

/// Parsed CLI arguments for `configify`.
#[derive(Debug, Parser)]
#[command(name = "configify")]
#[command(about = "Generate functional options for a Go struct type")]
#[command(version)]
pub struct Args {
    /// Struct type to generate options for.
    #[arg(long = "type", value_name = "T")]
    pub type_name: String,
    /// Comma-separated build tags; only valid with a single directory.
    #[arg(long, value_name = "tags", value_delimiter = ',')]
    pub tags: Vec<String>,
    /// Output file (default: <dir>/<lowercase T><suffix>).
    #[arg(long, value_name = "file")]
    pub output: Option<Utf8PathBuf>,
    /// Read a package snapshot from this file instead of running the loader.
    #[arg(long, value_name = "file")]
    pub snapshot: Option<Utf8PathBuf>,
    /// Configuration file (default: ./configify.toml when present).
    #[arg(long, value_name = "file")]
    pub config: Option<Utf8PathBuf>,
    /// Settings overridden on the command line.
    #[command(flatten)]
    pub overrides: OverrideArgs,
    /// Package directory, or Go files of one package (default: `.`).
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,
}

/// Flags layered over file and environment settings.
#[derive(Debug, Clone, ClapArgs)]
pub struct OverrideArgs {
    /// Write the generated source without running the formatter.
    #[arg(long = "no-format")]
    pub should_skip_format: bool,
    /// Loader command as comma-separated program and arguments.
    #[arg(long = "loader", value_name = "program,args", value_delimiter = ',')]
    pub loader_command: Vec<String>,
}

impl Args {
    /// Returns the load patterns, defaulting to the current directory.
    #[must_use]
    pub fn patterns(&self) -> Vec<String> {
        if self.patterns.is_empty() {
            vec![".".to_owned()]
        } else {
            self.patterns.clone()
        }
    }
}

impl OverrideArgs {
    /// Converts the flags into settings overrides; absent flags stay unset.
    #[must_use]
    pub fn to_overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            should_format: self.should_skip_format.then_some(false),
            loader_command: (!self.loader_command.is_empty()).then(|| self.loader_command.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("configify").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn patterns_default_to_current_directory() {
        let args = parse(&["--type", "config"]);
        assert_eq!(args.patterns(), ["."]);
        assert_eq!(args.overrides.to_overrides(), SettingsOverrides::default());
    }

    #[test]
    fn tags_split_on_commas() {
        let args = parse(&["--type", "config", "--tags", "a,b", "./pkg"]);
        assert_eq!(args.tags, ["a", "b"]);
        assert_eq!(args.patterns(), ["./pkg"]);
    }

    #[rstest]
    #[case::no_format(&["--no-format"], Some(false), None)]
    #[case::loader(&["--loader", "go,run,./loader"], None, Some(vec!["go", "run", "./loader"]))]
    fn flags_become_overrides(
        #[case] flags: &[&str],
        #[case] should_format: Option<bool>,
        #[case] loader: Option<Vec<&str>>,
    ) {
        let mut argv = vec!["--type", "config"];
        argv.extend_from_slice(flags);
        let overrides = parse(&argv).overrides.to_overrides();
        assert_eq!(overrides.should_format, should_format);
        assert_eq!(
            overrides.loader_command,
            loader.map(|parts| parts.into_iter().map(str::to_owned).collect::<Vec<_>>())
        );
    }

    #[test]
    fn type_is_required() {
        let err = Args::try_parse_from(["configify", "."]).expect_err("missing --type");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}

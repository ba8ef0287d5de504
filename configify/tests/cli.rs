//! Tests for the `configify` binary.

use std::process::{Command, Output};

use camino::Utf8PathBuf;
use configify::fs_helpers;
use rstest::{fixture, rstest};
use tempfile::TempDir;
use test_helpers::sample::{SAMPLE_SOURCE, sample_package, snapshot_of, write_snapshot};

struct Project {
    _temp: TempDir,
    root: Utf8PathBuf,
    snapshot: Utf8PathBuf,
}

impl Project {
    fn package_dir(&self) -> Utf8PathBuf {
        self.root.join("example")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_configify"))
            .args(args)
            .current_dir(&self.root)
            .env_remove("CONFIGIFY_SHOULD_FORMAT")
            .env_remove("CONFIGIFY_LOADER_COMMAND")
            .env("CONFIGIFY_LOG", "warn")
            .output()
            .expect("run configify")
    }
}

#[fixture]
fn project() -> Project {
    let temp = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf-8 temp path");
    fs_helpers::write_file(&root.join("example/example.go"), SAMPLE_SOURCE).expect("source");
    let snapshot = write_snapshot(&root, &snapshot_of(vec![sample_package()])).expect("snapshot");
    Project {
        _temp: temp,
        root,
        snapshot,
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[rstest]
fn writes_options_next_to_a_directory_pattern(project: Project) {
    let output = project.run(&[
        "--type",
        "config",
        "--snapshot",
        project.snapshot.as_str(),
        "--no-format",
        project.package_dir().as_str(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let generated = fs_helpers::read_to_string(&project.package_dir().join("config_option.go"))
        .expect("generated file");
    assert!(generated.starts_with("// Code generated by configify; DO NOT EDIT.\n"));
    assert!(generated.contains("func WithHeight(value int) Option {"));
    assert!(stderr(&output).contains("inter"), "skip warning expected");
}

#[rstest]
fn file_patterns_write_beside_the_first_file(project: Project) {
    let file = project.package_dir().join("example.go");
    let output = project.run(&[
        "--type",
        "config",
        "--snapshot",
        project.snapshot.as_str(),
        "--no-format",
        file.as_str(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(fs_helpers::is_file(&project.package_dir().join("config_option.go")));
}

#[rstest]
fn explicit_output_overrides_the_default_location(project: Project) {
    let target = project.root.join("gen/options.go");
    let output = project.run(&[
        "--type",
        "config",
        "--snapshot",
        project.snapshot.as_str(),
        "--no-format",
        "--output",
        target.as_str(),
        project.package_dir().as_str(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(fs_helpers::is_file(&target));
    assert!(!fs_helpers::is_file(&project.package_dir().join("config_option.go")));
}

#[rstest]
fn tags_with_file_patterns_fail_without_output(project: Project) {
    let file = project.package_dir().join("example.go");
    let output = project.run(&[
        "--type",
        "config",
        "--snapshot",
        project.snapshot.as_str(),
        "--tags",
        "integration",
        file.as_str(),
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--tags applies only to directories"));
    assert!(!fs_helpers::is_file(&project.package_dir().join("config_option.go")));
}

#[rstest]
#[case::missing_type("absent", "type 'absent' not found")]
#[case::not_a_struct("MyType", "is not a struct type")]
fn unusable_targets_fail_without_output(
    project: Project,
    #[case] type_name: &str,
    #[case] message: &str,
) {
    let output = project.run(&[
        "--type",
        type_name,
        "--snapshot",
        project.snapshot.as_str(),
        "--no-format",
        project.package_dir().as_str(),
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains(message), "stderr: {}", stderr(&output));
    let expected = project
        .package_dir()
        .join(format!("{}_option.go", type_name.to_lowercase()));
    assert!(!fs_helpers::is_file(&expected));
}

#[rstest]
fn missing_type_flag_is_a_usage_error(project: Project) {
    let output = project.run(&[project.package_dir().as_str()]);
    assert_eq!(output.status.code(), Some(2));
}

#[rstest]
fn configuration_file_sets_the_output_suffix(project: Project) {
    fs_helpers::write_file(
        &project.root.join("configify.toml"),
        "output_suffix = \"_options_gen.go\"\nshould_format = false\n",
    )
    .expect("config");
    let output = project.run(&[
        "--type",
        "config",
        "--snapshot",
        project.snapshot.as_str(),
        project.package_dir().as_str(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(fs_helpers::is_file(
        &project.package_dir().join("config_options_gen.go")
    ));
}

#[rstest]
fn unavailable_formatter_still_writes_source(project: Project) {
    fs_helpers::write_file(
        &project.root.join("custom.toml"),
        "formatter_command = [\"configify-no-such-formatter\"]\n",
    )
    .expect("config");
    let output = project.run(&[
        "--type",
        "config",
        "--snapshot",
        project.snapshot.as_str(),
        "--config",
        "custom.toml",
        project.package_dir().as_str(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("compile the package to analyze the error"));
    assert!(fs_helpers::is_file(&project.package_dir().join("config_option.go")));
}

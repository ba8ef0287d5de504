//! Throwaway Go modules for compiling generated code.
//!
//! Tests that need a Go toolchain call [`go_available`] first and return
//! early when it is missing. Each [`GoModule`] lives in its own temporary
//! directory with private build and module caches, so runs never touch the
//! user's Go environment and never download a toolchain.

use std::process::{Command, Output};

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use configify::fs_helpers;
use tempfile::TempDir;

/// Reports whether `go version` runs successfully.
#[must_use]
pub fn go_available() -> bool {
    Command::new("go")
        .arg("version")
        .output()
        .is_ok_and(|output| output.status.success())
}

/// A Go module rooted in a temporary directory.
pub struct GoModule {
    _temp: TempDir,
    root: Utf8PathBuf,
}

impl GoModule {
    /// Creates a module named `module` with a `go.mod` targeting Go 1.18.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory or `go.mod` cannot be created.
    pub fn new(module: &str) -> Result<Self> {
        let temp = TempDir::new().context("create temp dir")?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| anyhow::anyhow!("temp dir is not UTF-8: {}", path.display()))?;
        let go_module = Self { _temp: temp, root };
        go_module.write("go.mod", &format!("module {module}\n\ngo 1.18\n"))?;
        Ok(go_module)
    }

    /// Root directory of the module.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Writes `contents` to `relative` inside the module.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(relative);
        fs_helpers::write_file(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Runs `go` with `args` in the module root.
    ///
    /// # Errors
    ///
    /// Returns an error when `go` cannot be started or exits unsuccessfully;
    /// the error carries the combined output.
    pub fn go(&self, args: &[&str]) -> Result<String> {
        let output = self
            .command(args)
            .output()
            .with_context(|| format!("run go {}", args.join(" ")))?;
        if !output.status.success() {
            bail!(
                "go {} failed with status {:?}:\n{}",
                args.join(" "),
                output.status.code(),
                combined(&output)
            );
        }
        Ok(combined(&output))
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new("go");
        command
            .args(args)
            .current_dir(&self.root)
            .env("GOCACHE", self.root.join(".cache/go-build"))
            .env("GOPATH", self.root.join(".cache/gopath"))
            .env("GOFLAGS", "-mod=mod")
            .env("GOTOOLCHAIN", "local")
            .env("GO111MODULE", "on");
        command
    }
}

fn combined(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_module_writes_go_mod() {
        let module = GoModule::new("example").expect("module");
        let go_mod = fs_helpers::read_to_string(&module.root().join("go.mod")).expect("go.mod");
        assert_eq!(go_mod, "module example\n\ngo 1.18\n");
    }
}

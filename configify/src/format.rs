//! Source formatting for generated Go code.
//!
//! Formatting never fails the run: when the formatter cannot be started or
//! rejects the input, the unformatted text is kept and a warning is returned
//! alongside it so the file can still be written and inspected.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use tracing::warn;

/// Formatter result: the text to write and an optional warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    /// Formatted text, or the raw input when formatting failed.
    pub text: String,
    /// Why formatting was abandoned, if it was.
    pub warning: Option<String>,
}

impl Formatted {
    fn unchanged(raw: &str, warning: Option<String>) -> Self {
        Self {
            text: raw.to_owned(),
            warning,
        }
    }
}

/// Canonicalises generated Go source.
pub trait SourceFormatter {
    /// Formats `raw`, falling back to the input on failure.
    fn format(&self, raw: &str) -> Formatted;
}

/// Pipes source through a gofmt-compatible command.
#[derive(Debug, Clone)]
pub struct GofmtFormatter {
    command: Vec<String>,
}

impl GofmtFormatter {
    /// Creates a formatter running `command`, which reads stdin and writes
    /// the formatted source to stdout.
    #[must_use]
    pub const fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    fn run(&self, raw: &str) -> Result<String, String> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| "formatter command is empty".to_owned())?;
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| format!("failed to run formatter '{program}': {err}"))?;

        // stdin is fed from its own thread while stdout and stderr drain,
        // so neither side blocks on a full pipe buffer.
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || {
                stdin.map_or(Ok(()), |mut stdin| stdin.write_all(raw.as_bytes()))
            });
            let output = child.wait_with_output();
            (writer.join(), output)
        });
        let output =
            output.map_err(|err| format!("failed to wait for formatter '{program}': {err}"))?;

        if !output.status.success() {
            return Err(format!(
                "formatter '{program}' exited with status {}: {}",
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim_end()
            ));
        }
        match written {
            Ok(Ok(())) => {}
            Ok(Err(err)) => return Err(format!("failed to write to formatter '{program}': {err}")),
            Err(_) => return Err(format!("writing to formatter '{program}' panicked")),
        }
        String::from_utf8(output.stdout)
            .map_err(|_| format!("formatter '{program}' produced non-UTF-8 output"))
    }
}

impl SourceFormatter for GofmtFormatter {
    fn format(&self, raw: &str) -> Formatted {
        match self.run(raw) {
            Ok(text) => Formatted {
                text,
                warning: None,
            },
            Err(warning) => {
                warn!(%warning, "invalid Go generated; writing unformatted source");
                warn!("compile the package to analyze the error");
                Formatted::unchanged(raw, Some(warning))
            }
        }
    }
}

/// Leaves the source untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughFormatter;

impl SourceFormatter for PassthroughFormatter {
    fn format(&self, raw: &str) -> Formatted {
        Formatted::unchanged(raw, None)
    }
}

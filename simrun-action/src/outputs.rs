//! Step outputs and failure signal
//!
//! Outputs are appended to the file named by `GITHUB_OUTPUT` when the runner
//! provides one, and printed as `name=value` otherwise. Failures are reported
//! with an `::error::` workflow command on stdout.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

const OUTPUT_FILE_ENV: &str = "GITHUB_OUTPUT";
const MULTILINE_DELIMITER: &str = "SIMRUN_OUTPUT_EOF";

/// Sink for step outputs
#[derive(Debug, Clone, Default)]
pub struct StepOutputs {
    path: Option<PathBuf>,
}

impl StepOutputs {
    /// Uses the output file provided by the CI runner, if any
    pub fn from_env() -> Self {
        let path = std::env::var_os(OUTPUT_FILE_ENV)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        Self::new(path)
    }

    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Sets output `name` to `value`
    pub fn set(&self, name: &str, value: &str) -> std::io::Result<()> {
        let entry = format_entry(name, value);
        debug!("Setting output {}={}", name, value);

        match &self.path {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(entry.as_bytes())
            }
            None => {
                print!("{}", entry);
                Ok(())
            }
        }
    }

    /// Signals a step failure with `message`
    pub fn fail(message: &str) {
        println!("::error::{}", escape_command_data(message));
    }
}

fn format_entry(name: &str, value: &str) -> String {
    if value.contains('\n') || value.contains('\r') {
        format!(
            "{name}<<{delim}\n{value}\n{delim}\n",
            name = name,
            value = value,
            delim = MULTILINE_DELIMITER
        )
    } else {
        format!("{}={}\n", name, value)
    }
}

/// Escapes a workflow command message so it stays on one line
fn escape_command_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        std::fs::write(&path, "existing=1\n").unwrap();

        let outputs = StepOutputs::new(Some(path.clone()));
        outputs.set("run_id", "run-1").unwrap();
        outputs.set("score", "85.00").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "existing=1\nrun_id=run-1\nscore=85.00\n");
    }

    #[test]
    fn test_set_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new_output");

        StepOutputs::new(Some(path.clone()))
            .set("status", "completed")
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "status=completed\n");
    }

    #[test]
    fn test_multiline_value_uses_delimiter() {
        assert_eq!(
            format_entry("summary", "line one\nline two"),
            "summary<<SIMRUN_OUTPUT_EOF\nline one\nline two\nSIMRUN_OUTPUT_EOF\n"
        );
    }

    #[test]
    fn test_escape_command_data() {
        assert_eq!(
            escape_command_data("50% done\nnext"),
            "50%25 done%0Anext"
        );
    }
}

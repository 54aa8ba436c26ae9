//! Body suggestion via an external helper process.
//!
//! The helper is a configured command line; the subject is appended as the
//! final argument. Stdout and stderr are captured together and trimmed.
//! Every failure mode degrades to an empty suggestion.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::SuggestConfig;

/// Runs the configured suggestion helper.
#[derive(Debug, Clone)]
pub struct SubjectSuggester {
    command: Vec<String>,
    timeout: Duration,
}

impl SubjectSuggester {
    /// Create a suggester from an argv-style command and a timeout.
    pub fn new(command: Vec<String>, timeout: Duration) -> Self {
        Self { command, timeout }
    }

    /// Create a suggester from the configuration section.
    pub fn from_config(config: &SuggestConfig) -> Self {
        Self::new(
            config.command.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Produce a suggested body for the given subject.
    ///
    /// The helper's exit status is not inspected; whatever it printed is
    /// the suggestion. A spawn failure or timeout yields an empty string,
    /// and a helper that outruns the timeout is killed.
    pub async fn suggest(&self, subject: &str) -> String {
        let Some((program, args)) = self.command.split_first() else {
            return String::new();
        };

        let mut cmd = Command::new(program);
        cmd.args(args)
            .arg(subject)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!(program = %program, error = %e, "Suggestion helper failed to run");
                return String::new();
            }
            Err(_) => {
                warn!(
                    program = %program,
                    timeout_secs = self.timeout.as_secs(),
                    "Suggestion helper timed out"
                );
                return String::new();
            }
        };

        let mut merged = String::from_utf8_lossy(&output.stdout).into_owned();
        merged.push_str(&String::from_utf8_lossy(&output.stderr));

        let suggestion = merged.trim().to_string();
        debug!(
            subject = %subject,
            bytes = suggestion.len(),
            "Suggestion helper finished"
        );
        suggestion
    }
}

//! Scorer adapters
//!
//! `ProcessScorer` runs the prediction model as a child process: the
//! biometrics go to stdin as one JSON object and the score comes back on
//! stdout.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::errors::{HerdError, Result};
use crate::schemas::{Biometrics, Config, ScorerConfig, ScorerMode};

use super::{normalize_score, Scorer};

/// Scorer returning the same value for every request
#[derive(Debug, Clone, Copy)]
pub struct FixedScorer {
    score: f64,
}

impl FixedScorer {
    pub fn new(score: f64) -> Self {
        FixedScorer { score }
    }
}

#[async_trait]
impl Scorer for FixedScorer {
    async fn score(&self, _biometrics: &Biometrics) -> Result<f64> {
        normalize_score(self.score)
    }
}

/// Scorer that spawns the configured model command per request
#[derive(Debug, Clone)]
pub struct ProcessScorer {
    command: String,
    args: Vec<String>,
    cwd: PathBuf,
    timeout_seconds: u32,
}

impl ProcessScorer {
    pub fn new(config: &ScorerConfig, cwd: impl Into<PathBuf>, timeout_seconds: u32) -> Self {
        ProcessScorer {
            command: config.command.clone(),
            args: config.args.clone(),
            cwd: cwd.into(),
            timeout_seconds,
        }
    }
}

#[async_trait]
impl Scorer for ProcessScorer {
    /// Run the model once.
    ///
    /// This function:
    /// 1. Spawns the command with the configured args
    /// 2. Writes the biometrics JSON to stdin and closes it
    /// 3. Reads stdout and stderr concurrently
    /// 4. Kills the child if the timeout elapses
    /// 5. Parses and normalizes the score
    async fn score(&self, biometrics: &Biometrics) -> Result<f64> {
        let payload = serde_json::to_vec(biometrics)
            .map_err(|e| HerdError::wrap(e, "Failed to encode biometrics"))?;

        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .current_dir(&self.cwd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            HerdError::Collaborator(format!("Failed to spawn scorer '{}': {}", self.command, e))
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&payload).await.map_err(|e| {
                HerdError::Collaborator(format!("Failed to write to scorer stdin: {}", e))
            })?;
            // stdin is dropped here, closing it
        }

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let timeout_duration = Duration::from_secs(u64::from(self.timeout_seconds));

        let result = timeout(timeout_duration, async {
            let stdout_handle = tokio::spawn(async move {
                let mut output = String::new();
                if let Some(mut stdout) = stdout {
                    let _ = stdout.read_to_string(&mut output).await;
                }
                output
            });

            let stderr_handle = tokio::spawn(async move {
                let mut output = String::new();
                if let Some(mut stderr) = stderr {
                    let _ = stderr.read_to_string(&mut output).await;
                }
                output
            });

            let stdout_output = stdout_handle.await.unwrap_or_default();
            let stderr_output = stderr_handle.await.unwrap_or_default();

            (stdout_output, stderr_output, child.wait().await)
        })
        .await;

        let (stdout_output, stderr_output, wait_result) = match result {
            Ok(finished) => finished,
            Err(_) => {
                // Timeout occurred - kill the process
                let _ = child.kill().await;
                return Err(HerdError::Collaborator(format!(
                    "Scorer timed out after {}s",
                    self.timeout_seconds
                )));
            }
        };

        let status = wait_result
            .map_err(|e| HerdError::Collaborator(format!("Failed to wait for scorer: {}", e)))?;
        if !status.success() {
            return Err(HerdError::Collaborator(format!(
                "Scorer exited with {}: {}",
                status
                    .code()
                    .map_or_else(|| "signal".to_string(), |c| c.to_string()),
                stderr_output.trim()
            )));
        }

        let raw = parse_scorer_output(&stdout_output)?;
        debug!(raw, animal = %biometrics.name, "Scorer responded");
        normalize_score(raw)
    }
}

/// Parse scorer stdout: a JSON object with `score` or `probability`, or a
/// bare number.
pub fn parse_scorer_output(output: &str) -> Result<f64> {
    let trimmed = output.trim();
    let value: Value = serde_json::from_str(trimmed).map_err(|_| {
        HerdError::Collaborator(format!("Unparseable scorer output: {:?}", trimmed))
    })?;

    let number = match &value {
        Value::Number(n) => n.as_f64(),
        Value::Object(map) => map
            .get("score")
            .or_else(|| map.get("probability"))
            .and_then(Value::as_f64),
        _ => None,
    };

    number.ok_or_else(|| {
        HerdError::Collaborator(format!("Scorer output has no numeric score: {}", trimmed))
    })
}

/// Build the scorer selected by the configuration
pub fn build_scorer(config: &Config, cwd: impl Into<PathBuf>) -> Box<dyn Scorer> {
    match config.scorer.mode {
        ScorerMode::Fixed => Box::new(FixedScorer::new(config.scorer.fixed_score)),
        ScorerMode::Process => Box::new(ProcessScorer::new(
            &config.scorer,
            cwd,
            config.timeout_seconds,
        )),
    }
}

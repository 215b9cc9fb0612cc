//! Common test utilities for udrcmd integration tests
//!
//! This module provides shared test infrastructure including:
//! - A working directory with a config file pointing at a mock API
//! - CLI invocation helpers
//! - Canned API response bodies

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Path of the API script on the mock server
pub const API_PATH: &str = "/api/call.cgi";

/// Body of a successful call
pub const OK_BODY: &str = "[RESPONSE]\ncode = 200\ndescription = Command completed successfully\nEOF\n";

/// Body of a failed call
pub const NOT_FOUND_BODY: &str = "[RESPONSE]\ncode = 404\ndescription = Object not found\nEOF\n";

/// Exit status codes matching the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Error = 2,
}

impl From<i32> for ExitStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => ExitStatus::Success,
            _ => ExitStatus::Error,
        }
    }
}

/// Result of running the CLI
#[derive(Debug)]
pub struct CliResponse {
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Exit status code
    pub exit_status: ExitStatus,
    /// Raw exit code
    pub exit_code: i32,
}

impl CliResponse {
    /// Parse stdout as JSON
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(self.stdout.trim()).ok()
    }

    /// Check if stdout contains a substring
    pub fn contains(&self, needle: &str) -> bool {
        self.stdout.contains(needle)
    }
}

impl std::ops::Deref for CliResponse {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.stdout
    }
}

/// Working directory for one CLI run
pub struct MockEnvironment {
    /// Temporary working directory, holds `udrcmd.cfg`
    pub work_dir: TempDir,
    /// Environment variables to set
    pub env_vars: HashMap<String, String>,
    /// Standard input content
    pub stdin: Option<Vec<u8>>,
}

impl Default for MockEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnvironment {
    /// Create an environment without a config file
    pub fn new() -> Self {
        let work_dir = TempDir::new().expect("Failed to create temp work dir");
        Self {
            work_dir,
            env_vars: HashMap::new(),
            stdin: None,
        }
    }

    /// Create an environment whose config points at `endpoint` and carries credentials
    pub fn with_endpoint(endpoint: &str) -> Self {
        let mut env = Self::new();
        env.write_config(&serde_json::json!({
            "url": endpoint,
            "s_login": "reseller",
            "s_pw": "secret"
        }));
        env
    }

    /// Write `udrcmd.cfg` in the working directory
    pub fn write_config(&mut self, config: &serde_json::Value) -> &mut Self {
        let content = serde_json::to_string_pretty(config).expect("Failed to serialize config");
        std::fs::write(self.config_path(), content).expect("Failed to write config");
        self
    }

    /// Set an environment variable
    pub fn set_env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Set stdin content
    pub fn set_stdin(&mut self, content: &str) -> &mut Self {
        self.stdin = Some(content.as_bytes().to_vec());
        self
    }

    /// Path of the default config file
    pub fn config_path(&self) -> PathBuf {
        self.work_dir.path().join("udrcmd.cfg")
    }
}

/// API endpoint on a mock server
pub fn endpoint(server_uri: &str) -> String {
    format!("{}{}", server_uri, API_PATH)
}

/// Run the CLI with the given arguments in a fresh environment
pub fn udrcmd(args: &[&str]) -> CliResponse {
    udrcmd_with_env(args, &MockEnvironment::new())
}

/// Run the CLI with the given arguments and environment
pub fn udrcmd_with_env(args: &[&str], env: &MockEnvironment) -> CliResponse {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_udrcmd"));
    cmd.args(args);
    cmd.current_dir(env.work_dir.path());

    // Keep the caller's environment from leaking into the run
    cmd.env_remove("UDRCMD_CONFIG");
    cmd.env_remove("UDRCMD_URL");
    cmd.env_remove("RUST_LOG");
    for (key, value) in &env.env_vars {
        cmd.env(key, value);
    }

    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    if let Some(ref stdin_data) = env.stdin {
        cmd.stdin(Stdio::piped());
        let mut child = cmd.spawn().expect("Failed to spawn command");
        {
            let stdin = child.stdin.as_mut().expect("Failed to open stdin");
            stdin.write_all(stdin_data).expect("Failed to write to stdin");
        }
        let output = child.wait_with_output().expect("Failed to wait for command");
        parse_output(output)
    } else {
        cmd.stdin(Stdio::null());
        let output = cmd.output().expect("Failed to execute command");
        parse_output(output)
    }
}

fn parse_output(output: Output) -> CliResponse {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(1);

    CliResponse {
        stdout,
        stderr,
        exit_status: ExitStatus::from(exit_code),
        exit_code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_from_i32() {
        assert_eq!(ExitStatus::from(0), ExitStatus::Success);
        assert_eq!(ExitStatus::from(2), ExitStatus::Error);
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(endpoint("http://127.0.0.1:1234"), "http://127.0.0.1:1234/api/call.cgi");
    }
}

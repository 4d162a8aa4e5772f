// Dweve Cypher Fluent - Immutable Cypher query builder
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Structured error types for the CLI.
//!
//! All commands return `Result<T, CliError>`; `main` prints the message and
//! exits non-zero.

use cypher_fluent::CypherError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for CLI operations.
///
/// Implements `Clone`, so library errors are carried as their rendered
/// message rather than as the source value.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (file read, write, or metadata access).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// File size exceeds the maximum allowed limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        /// The file path that exceeded the limit
        path: PathBuf,
        /// The actual file size in bytes
        actual: u64,
        /// The maximum allowed file size in bytes
        max: u64,
        /// The maximum allowed file size in MB (for display)
        max_mb: u64,
    },

    /// The plan or config file is not valid JSON for its schema.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// A plan step was rejected by the query builder.
    #[error("Step {step} ({name}) failed: {message}")]
    Step {
        /// Zero-based position in the plan
        step: usize,
        /// Step name as written in the plan
        name: &'static str,
        /// The builder's error message
        message: String,
    },

    /// Any other query builder error.
    #[error("Query error: {0}")]
    Query(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a file-too-large error.
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    /// Wrap a builder error raised by the plan step at `step`.
    pub fn step(step: usize, name: &'static str, source: CypherError) -> Self {
        Self::Step {
            step,
            name,
            message: source.to_string(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: err.to_string(),
        }
    }
}

impl From<CypherError> for CliError {
    fn from(err: CypherError) -> Self {
        Self::Query(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message() {
        let err = CliError::io_error(
            "plan.json",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "I/O error for 'plan.json': missing");
    }

    #[test]
    fn test_file_too_large_reports_megabytes() {
        let err = CliError::file_too_large("big.json", 5 * 1024 * 1024, 2 * 1024 * 1024);
        assert!(err.to_string().contains("(2 MB)"));
    }

    #[test]
    fn test_step_error_names_step() {
        let err = CliError::step(
            3,
            "relate",
            CypherError::UnsupportedOperation("RELATE is gone".to_string()),
        );
        let message = err.to_string();
        assert!(message.starts_with("Step 3 (relate) failed"));
        assert!(message.contains("RELATE is gone"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(CliError::from(json_err), CliError::JsonFormat { .. }));
    }
}

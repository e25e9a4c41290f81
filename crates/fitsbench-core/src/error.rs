// FitsBench - FITS I/O benchmark campaign driver
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

//! Error types for campaign and plotting operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Benchmark campaign error types.
///
/// Test-case errors (`MalformedInput`) only abort the offending record, while
/// results-table errors (`MalformedSamples`, `MalformedResult`) abort the whole
/// plot step because grid sizing depends on a clean series count.
///
/// # Examples
///
/// ```
/// use fitsbench_core::BenchError;
///
/// let err = BenchError::MalformedInput {
///     record: "test case at line 3".to_string(),
///     field: "HDU count".to_string(),
///     value: "many".to_string(),
/// };
///
/// assert_eq!(
///     err.to_string(),
///     "Malformed test case at line 3: field 'HDU count' has value 'many'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum BenchError {
    /// A test-case field could not be interpreted.
    #[error("Malformed {record}: field '{field}' has value '{value}'")]
    MalformedInput {
        /// Human-readable record location, e.g. "test case at line 3".
        record: String,
        /// Column name of the offending field.
        field: String,
        /// Raw text of the offending field.
        value: String,
    },

    /// A results row carries a sample that is not a finite, non-negative number.
    ///
    /// # Examples
    ///
    /// ```
    /// use fitsbench_core::BenchError;
    ///
    /// let err = BenchError::MalformedSamples {
    ///     row: 4,
    ///     token: "fast".to_string(),
    /// };
    /// assert!(err.to_string().contains("row 4"));
    /// ```
    #[error("Malformed samples in results row {row}: '{token}' is not a duration in ms")]
    MalformedSamples {
        /// Line number of the row in the results table (1-based, header is line 1).
        row: usize,
        /// The token that failed to parse.
        token: String,
    },

    /// A results row carries a non-sample field that could not be interpreted.
    #[error("Malformed results row {row}: field '{field}' has value '{value}'")]
    MalformedResult {
        /// Line number of the row in the results table.
        row: usize,
        /// Column name of the offending field.
        field: String,
        /// Raw text of the offending field.
        value: String,
    },

    /// A table lacks a required column.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Plotting was requested on an empty results table.
    #[error("No benchmark results to plot")]
    NoData,

    /// Invalid configuration parameter.
    #[error("Invalid configuration for '{parameter}': {reason}")]
    InvalidConfig {
        /// Parameter name.
        parameter: String,
        /// Reason for invalidity.
        reason: String,
    },

    /// The benchmark executable could not be started.
    #[error("Failed to launch '{program}': {message}")]
    Launch {
        /// Program that failed to launch.
        program: String,
        /// Underlying error message.
        message: String,
    },

    /// The plot image could not be drawn.
    #[error("Failed to render plot '{path}': {message}")]
    Render {
        /// Destination of the image.
        path: PathBuf,
        /// Underlying drawing error.
        message: String,
    },

    /// I/O operation failed on a specific path.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Error from the underlying CSV library.
    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl BenchError {
    /// Create an I/O error with file path context.
    ///
    /// ```
    /// use fitsbench_core::BenchError;
    /// use std::io;
    ///
    /// let err = BenchError::io_error(
    ///     "/tmp/benchmark.csv",
    ///     io::Error::new(io::ErrorKind::NotFound, "not found"),
    /// );
    /// assert!(err.to_string().contains("/tmp/benchmark.csv"));
    /// ```
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a render error for the image at `path`.
    pub fn render(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Render {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create a launch error for `program`.
    pub fn launch(program: impl Into<String>, source: io::Error) -> Self {
        Self::Launch {
            program: program.into(),
            message: source.to_string(),
        }
    }
}

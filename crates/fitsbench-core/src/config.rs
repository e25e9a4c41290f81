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

//! Campaign and plot configuration.
//!
//! Provides the paths, executable names and layout parameters shared by the
//! command builder, the campaign runner and the plot layout engine.

use crate::error::{BenchError, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default path of the FITS file generated by the benchmark executables.
pub const DEFAULT_OUTPUT: &str = "/tmp/test.fits";

/// Default results table of the I/O benchmark.
pub const DEFAULT_RESULTS: &str = "/tmp/benchmark.csv";

/// Default results table of the compression benchmark.
pub const DEFAULT_COMPRESSION_RESULTS: &str = "/tmp/compressionBenchmark.csv";

/// Executable running one I/O test case.
pub const DEFAULT_SHAPE_EXECUTABLE: &str = "EleFitsRunBenchmark";

/// Executable running one compression test case.
pub const DEFAULT_COMPRESSION_EXECUTABLE: &str = "EleFitsRunCompressionBenchmark";

/// Number of columns of every benchmarked binary table.
pub const DEFAULT_TABLE_COLUMNS: u64 = 10;

/// Number of columns of the plot grid.
pub const DEFAULT_PLOT_COLUMNS: usize = 2;

/// Axis label of the sample distributions.
pub const DEFAULT_X_LABEL: &str = "Time (ms)";

/// Logging level forwarded to the benchmark executables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Fatal,
}

impl LogLevel {
    /// Spelling expected by the executables' `--log-level` option.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            other => Err(BenchError::invalid_config(
                "log_level",
                format!("unknown level '{}'", other),
            )),
        }
    }
}

/// Configuration of a benchmark campaign.
///
/// # Example
///
/// ```
/// use fitsbench_core::{CampaignConfig, LogLevel};
///
/// let config = CampaignConfig::default()
///     .with_results("/tmp/results.tsv")
///     .with_log_level(LogLevel::Debug)
///     .with_table_columns(20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignConfig {
    /// Executable running I/O test cases.
    pub shape_executable: String,
    /// Executable running compression test cases.
    pub compression_executable: String,
    /// FITS file written by the executables.
    pub output: PathBuf,
    /// Results table the executables append to.
    pub results: PathBuf,
    /// Level forwarded as `--log-level`.
    pub log_level: LogLevel,
    /// Columns per binary table, used to turn value counts into row counts.
    pub table_columns: u64,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            shape_executable: DEFAULT_SHAPE_EXECUTABLE.to_string(),
            compression_executable: DEFAULT_COMPRESSION_EXECUTABLE.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            results: PathBuf::from(DEFAULT_RESULTS),
            log_level: LogLevel::default(),
            table_columns: DEFAULT_TABLE_COLUMNS,
        }
    }
}

impl CampaignConfig {
    /// Sets the I/O benchmark executable.
    pub fn with_shape_executable(mut self, executable: impl Into<String>) -> Self {
        self.shape_executable = executable.into();
        self
    }

    /// Sets the compression benchmark executable.
    pub fn with_compression_executable(mut self, executable: impl Into<String>) -> Self {
        self.compression_executable = executable.into();
        self
    }

    /// Sets the generated FITS file path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Sets the results table path.
    pub fn with_results(mut self, results: impl Into<PathBuf>) -> Self {
        self.results = results.into();
        self
    }

    /// Sets the forwarded log level.
    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    /// Sets the number of columns per binary table.
    pub fn with_table_columns(mut self, columns: u64) -> Self {
        self.table_columns = columns;
        self
    }

    /// Checks parameters that would make command construction meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.table_columns == 0 {
            return Err(BenchError::invalid_config(
                "table_columns",
                "must be at least 1",
            ));
        }
        if self.shape_executable.trim().is_empty() {
            return Err(BenchError::invalid_config(
                "shape_executable",
                "must not be empty",
            ));
        }
        if self.compression_executable.trim().is_empty() {
            return Err(BenchError::invalid_config(
                "compression_executable",
                "must not be empty",
            ));
        }
        Ok(())
    }
}

/// Configuration of the results plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Number of grid columns.
    pub columns: usize,
    /// Columns per binary table, used in shape descriptions.
    pub table_columns: u64,
    /// Label of the sample axis, shown on bottom cells only.
    pub x_label: String,
    /// Width of one cell in pixels.
    pub cell_width: usize,
    /// Height of one cell in pixels.
    pub cell_height: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_PLOT_COLUMNS,
            table_columns: DEFAULT_TABLE_COLUMNS,
            x_label: DEFAULT_X_LABEL.to_string(),
            cell_width: 500,
            cell_height: 300,
        }
    }
}

impl PlotConfig {
    /// Sets the number of grid columns.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Sets the number of columns per binary table.
    pub fn with_table_columns(mut self, columns: u64) -> Self {
        self.table_columns = columns;
        self
    }

    /// Sets the sample axis label.
    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    /// Sets the size of one cell in pixels.
    pub fn with_cell_size(mut self, width: usize, height: usize) -> Self {
        self.cell_width = width;
        self.cell_height = height;
        self
    }

    /// Checks grid columns, table columns and cell size.
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(BenchError::invalid_config("columns", "must be at least 1"));
        }
        if self.table_columns == 0 {
            return Err(BenchError::invalid_config(
                "table_columns",
                "must be at least 1",
            ));
        }
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(BenchError::invalid_config(
                "cell_size",
                "width and height must be at least 1 pixel",
            ));
        }
        Ok(())
    }
}

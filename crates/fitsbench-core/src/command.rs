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

//! Translation of test cases into benchmark executable invocations.

use crate::config::{CampaignConfig, LogLevel};
use crate::error::Result;
use crate::test_case::{CompressionTestCase, HduType, ShapeTestCase, TestCaseRecord};
use std::fmt;
use std::path::PathBuf;

/// A fully-formed invocation of a benchmark executable.
///
/// Arguments are kept as a list and handed to the process as-is; the
/// `Display` implementation renders the equivalent shell command line, with
/// free-text labels double-quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Indices into `args` of the free-text arguments quoted in the command line.
    quoted: Vec<usize>,
}

impl BenchmarkCommand {
    fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            quoted: Vec::new(),
        }
    }

    fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn quoted_arg(mut self, arg: impl Into<String>) -> Self {
        self.quoted.push(self.args.len());
        self.args.push(arg.into());
        self
    }

    fn option(self, name: &str, value: impl Into<String>) -> Self {
        self.arg(name).arg(value)
    }

    fn quoted_option(self, name: &str, value: impl Into<String>) -> Self {
        self.arg(name).quoted_arg(value)
    }

    /// Value following `name`, if the option is present.
    ///
    /// ```
    /// use fitsbench_core::{CampaignConfig, CommandBuilder, HduType, ShapeTestCase};
    ///
    /// let builder = CommandBuilder::new(&CampaignConfig::default()).unwrap();
    /// let case = ShapeTestCase {
    ///     test_setup: "A".to_string(),
    ///     hdu_type: HduType::Image,
    ///     hdu_count: 3,
    ///     value_count_per_hdu: 1000,
    ///     line: 2,
    /// };
    /// let command = builder.shape_command(&case);
    /// assert_eq!(command.option_value("--pixels"), Some("1000"));
    /// ```
    pub fn option_value(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|arg| arg == name)
            .and_then(|index| self.args.get(index + 1))
            .map(String::as_str)
    }

    /// Whether the bare flag `name` is present.
    pub fn has_flag(&self, name: &str) -> bool {
        self.args.iter().any(|arg| arg == name)
    }
}

/// Double-quote `text` for a POSIX shell.
fn shell_quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

impl fmt::Display for BenchmarkCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for (index, arg) in self.args.iter().enumerate() {
            if self.quoted.contains(&index) {
                write!(f, " {}", shell_quote(arg))?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Builds benchmark invocations from test cases.
///
/// The builder is a pure function of its configuration and the test case:
/// the same inputs always yield the same command.
///
/// # Examples
///
/// ```
/// use fitsbench_core::{CampaignConfig, CommandBuilder, HduType, ShapeTestCase};
///
/// let builder = CommandBuilder::new(&CampaignConfig::default()).unwrap();
/// let case = ShapeTestCase {
///     test_setup: "EleFits optimal".to_string(),
///     hdu_type: HduType::BinaryTable,
///     hdu_count: 2,
///     value_count_per_hdu: 1000,
///     line: 2,
/// };
/// assert_eq!(
///     builder.shape_command(&case).to_string(),
///     "EleFitsRunBenchmark --log-level INFO --output /tmp/test.fits \
///      --res /tmp/benchmark.csv --setup \"EleFits optimal\" --tables 2 --rows 100"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    shape_executable: String,
    compression_executable: String,
    output: PathBuf,
    results: PathBuf,
    log_level: LogLevel,
    table_columns: u64,
}

impl CommandBuilder {
    /// Creates a builder, validating the configuration first.
    pub fn new(config: &CampaignConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            shape_executable: config.shape_executable.clone(),
            compression_executable: config.compression_executable.clone(),
            output: config.output.clone(),
            results: config.results.clone(),
            log_level: config.log_level,
            table_columns: config.table_columns,
        })
    }

    /// Builds the command of either test-case flavor.
    pub fn build(&self, record: &TestCaseRecord) -> BenchmarkCommand {
        match record {
            TestCaseRecord::Shape(case) => self.shape_command(case),
            TestCaseRecord::Compression(case) => self.compression_command(case),
        }
    }

    /// Builds an I/O benchmark invocation.
    ///
    /// Binary tables are assumed to have `table_columns` columns, so the row
    /// count is the value count floor-divided by that number.
    pub fn shape_command(&self, case: &ShapeTestCase) -> BenchmarkCommand {
        let command = BenchmarkCommand::new(&self.shape_executable)
            .option("--log-level", self.log_level.as_str())
            .option("--output", self.output.display().to_string())
            .option("--res", self.results.display().to_string())
            .quoted_option("--setup", &case.test_setup);
        match case.hdu_type {
            HduType::Image => command
                .option("--images", case.hdu_count.to_string())
                .option("--pixels", case.value_count_per_hdu.to_string()),
            HduType::BinaryTable => command
                .option("--tables", case.hdu_count.to_string())
                .option(
                    "--rows",
                    (case.value_count_per_hdu / self.table_columns).to_string(),
                ),
        }
    }

    /// Builds a compression benchmark invocation.
    pub fn compression_command(&self, case: &CompressionTestCase) -> BenchmarkCommand {
        let mut command = BenchmarkCommand::new(&self.compression_executable)
            .quoted_arg(&case.filename)
            .arg(self.output.display().to_string())
            .quoted_option("--case", &case.compression_case)
            .option("--res", self.results.display().to_string())
            .option("--log-level", self.log_level.as_str());
        if case.lossy {
            command = command.arg("--lossy");
        }
        if case.ext_gzip {
            command = command.arg("--extGZIP");
        }
        command
    }
}

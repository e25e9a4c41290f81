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

//! Sequential execution of benchmark campaigns.
//!
//! Test cases run one at a time, each awaited before the next one starts, so
//! that timings are never co-scheduled with a sibling benchmark. There is no
//! timeout: a hung executable blocks the campaign.

use crate::command::{BenchmarkCommand, CommandBuilder};
use crate::config::CampaignConfig;
use crate::error::{BenchError, Result};
use crate::test_case::TestCaseRecord;
use std::fmt;
use std::io;
use std::process::Command;
use tracing::{error, info, info_span, warn};

/// Exit status of a finished benchmark process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl ProcessExit {
    /// Whether the process exited normally with status 0.
    ///
    /// A process killed by a signal has no code and is not successful.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for ProcessExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// Starts a benchmark process and waits for it to exit.
pub trait Launcher {
    fn launch(&mut self, command: &BenchmarkCommand) -> io::Result<ProcessExit>;
}

/// Launches commands as child processes, without a shell, inheriting stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&mut self, command: &BenchmarkCommand) -> io::Result<ProcessExit> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .status()?;
        Ok(ProcessExit {
            code: status.code(),
        })
    }
}

/// Counts of a finished campaign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CampaignSummary {
    /// Test cases for which a process was started or attempted.
    pub attempted: usize,
    pub succeeded: usize,
    /// Launch failures and non-zero exits.
    pub failed: usize,
    /// Rows that could not be turned into a test case.
    pub skipped: usize,
}

impl CampaignSummary {
    /// Whether every row ran and exited successfully.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }
}

impl fmt::Display for CampaignSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} test cases run: {} succeeded, {} failed, {} skipped",
            self.attempted, self.succeeded, self.failed, self.skipped
        )
    }
}

/// Runs test cases through a [`Launcher`], one after the other.
///
/// # Examples
///
/// ```no_run
/// use fitsbench_core::{CampaignConfig, CampaignRunner, SystemLauncher};
/// use fitsbench_core::test_case::{load_test_cases, TableKind};
///
/// # fn main() -> fitsbench_core::Result<()> {
/// let config = CampaignConfig::default();
/// let rows = load_test_cases("tests.tsv", TableKind::Shape)?;
/// let mut runner = CampaignRunner::new(&config, SystemLauncher)?;
/// let summary = runner.run(rows);
/// println!("{}", summary);
/// # Ok(())
/// # }
/// ```
pub struct CampaignRunner<L> {
    builder: CommandBuilder,
    launcher: L,
}

impl<L: Launcher> CampaignRunner<L> {
    /// Runner for `config`, rejecting invalid configurations.
    pub fn new(config: &CampaignConfig, launcher: L) -> Result<Self> {
        Ok(Self {
            builder: CommandBuilder::new(config)?,
            launcher,
        })
    }

    /// Runs one test case synchronously.
    ///
    /// Returns the exit status of the benchmark process, which may be a
    /// failure. Only a process that cannot be started is an error.
    pub fn run_case(&mut self, record: &TestCaseRecord) -> Result<ProcessExit> {
        let command = self.builder.build(record);
        info!("{}", command);
        self.launcher
            .launch(&command)
            .map_err(|e| BenchError::launch(&command.program, e))
    }

    /// Runs every row in table order and never stops early.
    ///
    /// Rows that failed validation are logged and skipped; failing processes
    /// are logged and counted.
    pub fn run<I>(&mut self, rows: I) -> CampaignSummary
    where
        I: IntoIterator<Item = Result<TestCaseRecord>>,
    {
        let mut summary = CampaignSummary::default();
        for row in rows {
            let record = match row {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping test case: {}", e);
                    summary.skipped += 1;
                    continue;
                }
            };

            let span = info_span!("case", line = record.line());
            let _enter = span.enter();
            summary.attempted += 1;
            match self.run_case(&record) {
                Ok(exit) if exit.success() => summary.succeeded += 1,
                Ok(exit) => {
                    warn!("Test case {} failed with {}", record.label(), exit);
                    summary.failed += 1;
                }
                Err(e) => {
                    error!("{}", e);
                    summary.failed += 1;
                }
            }
        }
        info!("{}", summary);
        summary
    }

    /// Consumes the runner, returning its launcher.
    pub fn into_launcher(self) -> L {
        self.launcher
    }
}

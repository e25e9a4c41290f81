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

//! Run and compression commands - benchmark campaigns

use crate::error::{CliError, Result};
use fitsbench_core::test_case::{load_test_cases, TableKind};
use fitsbench_core::{CampaignConfig, CampaignRunner, CampaignSummary, SystemLauncher};
use std::path::PathBuf;
use tracing::info;

/// Options shared by both campaign commands.
#[derive(Debug, Clone, Default)]
pub struct CampaignOptions {
    /// Test-case table; no campaign is run without one.
    pub tests: Option<PathBuf>,
    /// Turn failed or skipped test cases into an error.
    pub strict: bool,
}

/// Run the I/O benchmark campaign described by `options.tests`.
///
/// # Errors
///
/// Returns `Err` if:
/// - The configuration is invalid
/// - The test-case table cannot be read or lacks a required column
/// - In strict mode, if any test case failed or was skipped
pub fn run_campaign(config: &CampaignConfig, options: &CampaignOptions) -> Result<()> {
    campaign(config, options, TableKind::Shape)
}

/// Run the compression benchmark campaign described by `options.tests`.
pub fn run_compression_campaign(config: &CampaignConfig, options: &CampaignOptions) -> Result<()> {
    campaign(config, options, TableKind::Compression)
}

fn campaign(config: &CampaignConfig, options: &CampaignOptions, kind: TableKind) -> Result<()> {
    config.validate()?;
    let Some(tests) = &options.tests else {
        info!("No test-case table given, skipping campaign");
        return Ok(());
    };

    info!("Running test cases of {}", tests.display());
    let rows = load_test_cases(tests, kind)?;
    let mut runner = CampaignRunner::new(config, SystemLauncher)?;
    let summary = runner.run(rows);
    check(&summary, options.strict)
}

fn check(summary: &CampaignSummary, strict: bool) -> Result<()> {
    if strict && !summary.is_clean() {
        return Err(CliError::CampaignFailed {
            failed: summary.failed,
            skipped: summary.skipped,
        });
    }
    Ok(())
}

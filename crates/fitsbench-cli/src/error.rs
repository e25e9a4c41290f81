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

//! Error type of the `fitsbench` command-line interface.

use fitsbench_core::BenchError;
use thiserror::Error;

/// Errors reported by `fitsbench` subcommands.
#[derive(Error, Debug)]
pub enum CliError {
    /// Failure in test-case parsing, aggregation or plotting.
    #[error(transparent)]
    Bench(#[from] BenchError),

    /// A strict campaign had failing or skipped test cases.
    #[error("Campaign not clean: {failed} test cases failed, {skipped} skipped")]
    CampaignFailed {
        /// Test cases whose process failed or could not start.
        failed: usize,
        /// Rows that could not be turned into a test case.
        skipped: usize,
    },
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bench_error_is_transparent() {
        let err: CliError = BenchError::NoData.into();
        assert_eq!(err.to_string(), "No benchmark results to plot");
    }

    #[test]
    fn test_campaign_failed_message() {
        let err = CliError::CampaignFailed {
            failed: 2,
            skipped: 1,
        };
        assert_eq!(
            err.to_string(),
            "Campaign not clean: 2 test cases failed, 1 skipped"
        );
    }
}

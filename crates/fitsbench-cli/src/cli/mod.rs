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

//! Command definitions and argument parsing.

use crate::commands::{self, CampaignOptions};
use crate::error::{CliError, Result};
use clap::Subcommand;
use fitsbench_core::config::{
    DEFAULT_COMPRESSION_EXECUTABLE, DEFAULT_COMPRESSION_RESULTS, DEFAULT_OUTPUT,
    DEFAULT_PLOT_COLUMNS, DEFAULT_RESULTS, DEFAULT_SHAPE_EXECUTABLE, DEFAULT_TABLE_COLUMNS,
};
use fitsbench_core::{CampaignConfig, LogLevel, PlotConfig};
use std::path::PathBuf;

/// Top-level commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use fitsbench_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an I/O benchmark campaign
    ///
    /// Runs the benchmark executable once per row of the test-case table, in
    /// table order, then plots the results table if a plot path is given.
    Run {
        /// Test-case table (no campaign is run if absent)
        #[arg(long, value_name = "PATH")]
        tests: Option<PathBuf>,

        /// FITS file generated by the benchmark
        #[arg(long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Results table the benchmark appends to
        #[arg(long, value_name = "PATH", default_value = DEFAULT_RESULTS)]
        res: PathBuf,

        /// SVG plot output (no plot is produced if absent)
        #[arg(long, value_name = "PATH")]
        plot: Option<PathBuf>,

        /// Log level forwarded to the benchmark executable
        #[arg(long, default_value = "INFO")]
        log_level: LogLevel,

        /// Benchmark executable
        #[arg(long, default_value = DEFAULT_SHAPE_EXECUTABLE)]
        executable: String,

        /// Columns per benchmarked binary table
        #[arg(long, default_value_t = DEFAULT_TABLE_COLUMNS)]
        table_columns: u64,

        /// Columns of the plot grid
        #[arg(long, default_value_t = DEFAULT_PLOT_COLUMNS)]
        plot_columns: usize,

        /// Fail if any test case fails or is skipped
        #[arg(long)]
        strict: bool,
    },

    /// Run a compression benchmark campaign
    Compression {
        /// Compression test-case table (no campaign is run if absent)
        #[arg(long, value_name = "PATH")]
        tests: Option<PathBuf>,

        /// FITS file generated by the benchmark
        #[arg(long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Results table the benchmark appends to
        #[arg(long, value_name = "PATH", default_value = DEFAULT_COMPRESSION_RESULTS)]
        res: PathBuf,

        /// Log level forwarded to the benchmark executable
        #[arg(long, default_value = "INFO")]
        log_level: LogLevel,

        /// Benchmark executable
        #[arg(long, default_value = DEFAULT_COMPRESSION_EXECUTABLE)]
        executable: String,

        /// Fail if any test case fails or is skipped
        #[arg(long)]
        strict: bool,
    },

    /// Plot an existing results table
    Plot {
        /// Results table
        #[arg(long, value_name = "PATH", default_value = DEFAULT_RESULTS)]
        res: PathBuf,

        /// SVG plot output
        #[arg(long, value_name = "PATH")]
        plot: PathBuf,

        /// Columns per benchmarked binary table
        #[arg(long, default_value_t = DEFAULT_TABLE_COLUMNS)]
        table_columns: u64,

        /// Columns of the plot grid
        #[arg(long, default_value_t = DEFAULT_PLOT_COLUMNS)]
        plot_columns: usize,
    },
}

impl Commands {
    /// Execute the command.
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Run {
                tests,
                output,
                res,
                plot,
                log_level,
                executable,
                table_columns,
                plot_columns,
                strict,
            } => {
                let config = CampaignConfig::default()
                    .with_shape_executable(executable)
                    .with_output(output)
                    .with_results(res.clone())
                    .with_log_level(log_level)
                    .with_table_columns(table_columns);
                let options = CampaignOptions { tests, strict };
                let campaign = commands::run_campaign(&config, &options);
                if matches!(campaign, Err(CliError::Bench(_))) {
                    return campaign;
                }

                // A strict campaign with failures is still plotted.
                if let Some(plot) = plot {
                    let plot_config = PlotConfig::default()
                        .with_columns(plot_columns)
                        .with_table_columns(table_columns);
                    commands::plot_results(&res, &plot, plot_config)?;
                }
                campaign
            }
            Commands::Compression {
                tests,
                output,
                res,
                log_level,
                executable,
                strict,
            } => {
                let config = CampaignConfig::default()
                    .with_compression_executable(executable)
                    .with_output(output)
                    .with_results(res)
                    .with_log_level(log_level);
                commands::run_compression_campaign(&config, &CampaignOptions { tests, strict })
            }
            Commands::Plot {
                res,
                plot,
                table_columns,
                plot_columns,
            } => {
                let plot_config = PlotConfig::default()
                    .with_columns(plot_columns)
                    .with_table_columns(table_columns);
                commands::plot_results(&res, &plot, plot_config)
            }
        }
    }
}

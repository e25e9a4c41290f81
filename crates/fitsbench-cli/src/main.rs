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

//! FitsBench command line interface

use clap::Parser;
use fitsbench_cli::cli::Commands;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// FitsBench - FITS I/O benchmark campaign driver
///
/// Runs the FITS benchmark executables over a table of test cases and plots
/// the timing samples they record.
///
/// # Examples
///
/// ```bash
/// # Run a campaign and plot its results
/// fitsbench run --tests tests.tsv --res /tmp/benchmark.csv --plot /tmp/benchmark.svg
///
/// # Run a compression campaign
/// fitsbench compression --tests compression.tsv
///
/// # Replot existing results
/// fitsbench plot --res /tmp/benchmark.csv --plot /tmp/benchmark.svg
/// ```
#[derive(Parser)]
#[command(name = "fitsbench")]
#[command(author, version, about = "FitsBench - FITS I/O benchmark campaign driver", long_about = None)]
struct Cli {
    /// Log debug messages, including parsed rows and samples
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let directive = if verbose {
        "fitsbench=debug"
    } else {
        "fitsbench=info"
    };
    let filter = match directive.parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

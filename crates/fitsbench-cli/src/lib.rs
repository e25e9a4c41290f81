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

//! FITS benchmark command-line interface.
//!
//! # Commands
//!
//! - **run**: run an I/O benchmark campaign, then optionally plot its results
//! - **compression**: run a compression benchmark campaign
//! - **plot**: plot an existing results table
//!
//! # Examples
//!
//! ```no_run
//! use fitsbench_cli::commands::plot_results;
//! use fitsbench_core::PlotConfig;
//!
//! # fn main() -> fitsbench_cli::error::Result<()> {
//! plot_results("/tmp/benchmark.csv", "/tmp/benchmark.svg", PlotConfig::default())?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;

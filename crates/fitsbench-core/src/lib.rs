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

//! Benchmark campaign driver for FITS file I/O.
//!
//! This crate turns a table of test cases into invocations of the FITS
//! benchmark executables, and turns the results table they append to into a
//! grid of box plots.
//!
//! # Features
//!
//! - **Test cases**: tab-separated I/O and compression test-case tables, parsed into typed records
//! - **Commands**: deterministic command lines for `EleFitsRunBenchmark` and `EleFitsRunCompressionBenchmark`
//! - **Campaigns**: sequential, blocking execution with a final success/failure summary
//! - **Results**: grouping of timing samples by test name and test setup
//! - **Layout**: row-major grid assignment and percentile-trimmed box summaries, drawn by any [`PlotBackend`]
//!
//! # Examples
//!
//! ## Building a command
//!
//! ```
//! use fitsbench_core::{CampaignConfig, CommandBuilder, HduType, ShapeTestCase, TestCaseRecord};
//!
//! let builder = CommandBuilder::new(&CampaignConfig::default()).unwrap();
//! let case = ShapeTestCase {
//!     test_setup: "A".to_string(),
//!     hdu_type: HduType::Image,
//!     hdu_count: 100,
//!     value_count_per_hdu: 1_000_000,
//!     line: 2,
//! };
//! let command = builder.build(&TestCaseRecord::Shape(case));
//! assert!(command.to_string().contains("--images 100 --pixels 1000000"));
//! ```
//!
//! ## Planning a plot
//!
//! ```
//! use fitsbench_core::{PlotLayoutEngine, SeriesTable};
//!
//! let mut table = SeriesTable::new();
//! table.insert("Write Image\n(10 HDUs x 1e3 pixels)", "A", vec![1.0, 2.0, 3.0]);
//! table.insert("Write Image\n(10 HDUs x 1e3 pixels)", "B", vec![2.0, 3.0, 4.0]);
//!
//! let plans = PlotLayoutEngine::default().plan(&table).unwrap();
//! assert_eq!(plans.len(), 1);
//! assert_eq!(plans[0].boxes.len(), 2);
//! ```

pub mod campaign;
pub mod command;
pub mod config;
mod error;
mod format;
pub mod layout;
pub mod results;
mod stats;
pub mod test_case;

pub use campaign::{CampaignRunner, CampaignSummary, Launcher, ProcessExit, SystemLauncher};
pub use command::{BenchmarkCommand, CommandBuilder};
pub use config::{CampaignConfig, LogLevel, PlotConfig};
pub use error::{BenchError, Result};
pub use format::scientific_notation;
pub use layout::{CellAddress, CellPlan, CellPosition, GridShape, PlotBackend, PlotLayoutEngine};
pub use results::{ResultAggregator, ResultRow, Series, SeriesKey, SeriesTable};
pub use stats::BoxSummary;
pub use test_case::{CompressionTestCase, HduType, ShapeTestCase, TableKind, TestCaseRecord};

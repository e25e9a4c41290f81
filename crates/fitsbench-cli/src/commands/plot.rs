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

//! Plot command - box plots of a results table

use crate::error::Result;
use fitsbench_core::results::load_series;
use fitsbench_core::{PlotConfig, PlotLayoutEngine, ResultAggregator};
use fitsbench_plot::SvgPlotBackend;
use std::path::Path;
use tracing::info;

/// Aggregate the results table at `results` and write its plot grid to `plot`.
///
/// # Errors
///
/// Returns `Err` if:
/// - The results table cannot be read or lacks a required column
/// - A results row is malformed
/// - The results table is empty
/// - The plot cannot be written
pub fn plot_results(
    results: impl AsRef<Path>,
    plot: impl AsRef<Path>,
    config: PlotConfig,
) -> Result<()> {
    let results = results.as_ref();
    info!("Reading results of {}", results.display());
    let aggregator = ResultAggregator::new(config.table_columns)?;
    let table = load_series(results, &aggregator)?;

    let mut backend = SvgPlotBackend::new(&config);
    let engine = PlotLayoutEngine::new(config)?;
    let shape = engine.render(&table, &mut backend, plot.as_ref())?;
    info!(
        "Plotted {} series in {} rows of {} columns",
        shape.cells, shape.rows, shape.columns
    );
    Ok(())
}

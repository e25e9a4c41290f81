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

//! Grid layout of series plots.
//!
//! Series are assigned to grid cells in row-major order: with two columns the
//! first series goes to row 0 column 0, the second to row 0 column 1, the
//! third to row 1 column 0, and so on. Drawing is delegated to a
//! [`PlotBackend`].

use crate::config::PlotConfig;
use crate::error::{BenchError, Result};
use crate::results::SeriesTable;
use crate::stats::BoxSummary;
use std::path::Path;
use tracing::{info, warn};

/// Dimensions of a plot grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub rows: usize,
    pub columns: usize,
    /// Number of occupied cells; trailing cells of the last row may be empty.
    pub cells: usize,
}

/// Row and column of a cell, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPosition {
    pub row: usize,
    pub column: usize,
}

/// How a cell is addressed in a grid.
///
/// Single-row grids are indexed by column alone and single-column grids by
/// row alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellAddress {
    Column(usize),
    Row(usize),
    Cell { row: usize, column: usize },
}

impl GridShape {
    /// Grid holding `series` cells in `columns` columns.
    ///
    /// ```
    /// use fitsbench_core::GridShape;
    ///
    /// let shape = GridShape::for_series(5, 2).unwrap();
    /// assert_eq!(shape.rows, 3);
    /// assert!(GridShape::for_series(0, 2).is_err());
    /// ```
    pub fn for_series(series: usize, columns: usize) -> Result<Self> {
        if columns == 0 {
            return Err(BenchError::invalid_config("columns", "must be at least 1"));
        }
        if series == 0 {
            return Err(BenchError::NoData);
        }
        Ok(Self {
            rows: (series + columns - 1) / columns,
            columns,
            cells: series,
        })
    }

    /// Position of the `index`-th series, filling rows left to right.
    pub fn position(&self, index: usize) -> CellPosition {
        CellPosition {
            row: index / self.columns,
            column: index % self.columns,
        }
    }

    /// Address of `position`: by column in a single-row grid, by row in a
    /// single-column grid, by both otherwise.
    ///
    /// ```
    /// use fitsbench_core::{CellAddress, GridShape};
    ///
    /// let row = GridShape::for_series(2, 2).unwrap();
    /// assert_eq!(row.address(row.position(1)), CellAddress::Column(1));
    ///
    /// let grid = GridShape::for_series(3, 2).unwrap();
    /// assert_eq!(grid.address(grid.position(2)), CellAddress::Cell { row: 1, column: 0 });
    /// ```
    pub fn address(&self, position: CellPosition) -> CellAddress {
        if self.rows == 1 {
            CellAddress::Column(position.column)
        } else if self.columns == 1 {
            CellAddress::Row(position.row)
        } else {
            CellAddress::Cell {
                row: position.row,
                column: position.column,
            }
        }
    }

    /// Whether no occupied cell lies below `position` in its column.
    pub fn is_bottom(&self, position: CellPosition) -> bool {
        (position.row + 1) * self.columns + position.column >= self.cells
    }
}

/// Everything a backend needs to draw one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellPlan {
    pub position: CellPosition,
    pub address: CellAddress,
    /// Test name, line break included.
    pub title: String,
    /// One box per setup, in setup order.
    pub boxes: Vec<(String, BoxSummary)>,
    /// Sample axis label, set on bottom cells only.
    pub x_label: Option<String>,
}

/// Drawing surface for a plot grid.
pub trait PlotBackend {
    /// Prepares an empty grid.
    fn begin(&mut self, shape: GridShape) -> Result<()>;

    fn draw_cell(&mut self, cell: &CellPlan) -> Result<()>;

    /// Writes the finished grid to `path`.
    fn finish(&mut self, path: &Path) -> Result<()>;
}

/// Lays out a [`SeriesTable`] and drives a [`PlotBackend`].
#[derive(Debug, Clone, Default)]
pub struct PlotLayoutEngine {
    config: PlotConfig,
}

impl PlotLayoutEngine {
    /// Engine for `config`, rejecting invalid configurations.
    pub fn new(config: PlotConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Grid shape for `table`.
    pub fn shape(&self, table: &SeriesTable) -> Result<GridShape> {
        GridShape::for_series(table.len(), self.config.columns)
    }

    /// Computes one cell plan per series, in table order.
    pub fn plan(&self, table: &SeriesTable) -> Result<Vec<CellPlan>> {
        let shape = self.shape(table)?;
        let plans = table
            .iter()
            .enumerate()
            .map(|(index, series)| {
                let position = shape.position(index);
                let boxes = series
                    .setups()
                    .filter_map(|(setup, samples)| match BoxSummary::from_samples(samples) {
                        Some(summary) => Some((setup.to_string(), summary)),
                        None => {
                            warn!("No samples for setup {} of {}", setup, series.test_name);
                            None
                        }
                    })
                    .collect();
                CellPlan {
                    position,
                    address: shape.address(position),
                    title: series.test_name.clone(),
                    boxes,
                    x_label: shape
                        .is_bottom(position)
                        .then(|| self.config.x_label.clone()),
                }
            })
            .collect();
        Ok(plans)
    }

    /// Draws every series through `backend` and writes the result to `path`.
    pub fn render<B: PlotBackend>(
        &self,
        table: &SeriesTable,
        backend: &mut B,
        path: impl AsRef<Path>,
    ) -> Result<GridShape> {
        let shape = self.shape(table)?;
        let plans = self.plan(table)?;
        info!("Plotting {} graphs...", plans.len());
        backend.begin(shape)?;
        for plan in &plans {
            info!("- {}", plan.title.replace('\n', " "));
            backend.draw_cell(plan)?;
        }
        backend.finish(path.as_ref())?;
        Ok(shape)
    }
}

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

//! SVG backend for the FITS benchmark plot grid.
//!
//! Every cell holds horizontal box plots drawn from precomputed percentiles,
//! so whiskers stop at the 5th and 95th percentiles and no outlier points are
//! drawn. The whole grid is one vector image whose bounds are exactly the
//! grid, with no outer margin.
//!
//! ```no_run
//! use fitsbench_core::{PlotConfig, PlotLayoutEngine, SeriesTable};
//! use fitsbench_plot::SvgPlotBackend;
//!
//! let mut table = SeriesTable::new();
//! table.insert("Write Image\n(1 HDUs x 1e3 pixels)", "A", vec![1.0, 2.0, 3.0]);
//!
//! let config = PlotConfig::default();
//! let mut backend = SvgPlotBackend::new(&config);
//! PlotLayoutEngine::new(config).unwrap().render(&table, &mut backend, "plot.svg").unwrap();
//! ```

use fitsbench_core::{
    BenchError, BoxSummary, CellPlan, GridShape, PlotBackend, PlotConfig, Result,
};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const TITLE_LINE_HEIGHT: i32 = 18;
/// Rough advance of one label character in the fallback font.
const LABEL_CHAR_WIDTH: i32 = 7;

const BOX_COLOR: RGBColor = RGBColor(31, 119, 180);
const MEDIAN_COLOR: RGBColor = RGBColor(255, 127, 14);

/// Half height of a box within its band.
const BOX_HALF_HEIGHT: f64 = 0.3;
/// Half height of a whisker cap within its band.
const CAP_HALF_HEIGHT: f64 = 0.15;

/// Renders a plot grid to an SVG file.
#[derive(Debug, Clone)]
pub struct SvgPlotBackend {
    cell_width: usize,
    cell_height: usize,
    shape: Option<GridShape>,
    cells: Vec<CellPlan>,
}

impl SvgPlotBackend {
    /// Backend drawing cells of the size set in `config`.
    pub fn new(config: &PlotConfig) -> Self {
        Self {
            cell_width: config.cell_width,
            cell_height: config.cell_height,
            shape: None,
            cells: Vec::new(),
        }
    }

    fn started(&self) -> Result<GridShape> {
        self.shape.ok_or_else(|| {
            BenchError::invalid_config("plot", "no grid was started before writing")
        })
    }

    /// Canvas size in pixels for the started grid.
    pub fn canvas_size(&self) -> Result<(u32, u32)> {
        let shape = self.started()?;
        let width = pixels(self.cell_width, shape.columns, "cell_width")?;
        let height = pixels(self.cell_height, shape.rows, "cell_height")?;
        Ok((width, height))
    }

    /// SVG document of the cells drawn so far.
    ///
    /// `path` only names the destination in error messages.
    pub fn document(&self, path: &Path) -> Result<String> {
        let shape = self.started()?;
        let (width, height) = self.canvas_size()?;
        let fail = |e: DrawingAreaErrorKind<_>| BenchError::render(path, e);
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(fail)?;
            let areas = root.split_evenly((shape.rows, shape.columns));
            for cell in &self.cells {
                let index = cell.position.row * shape.columns + cell.position.column;
                let Some(area) = areas.get(index) else {
                    return Err(BenchError::render(path, "cell lies outside the grid"));
                };
                paint_cell(&root, area, cell).map_err(fail)?;
            }
            root.present().map_err(fail)?;
        }
        Ok(svg)
    }
}

impl PlotBackend for SvgPlotBackend {
    fn begin(&mut self, shape: GridShape) -> Result<()> {
        self.shape = Some(shape);
        self.cells.clear();
        Ok(())
    }

    fn draw_cell(&mut self, cell: &CellPlan) -> Result<()> {
        debug!(row = cell.position.row, column = cell.position.column, "queue cell");
        self.cells.push(cell.clone());
        Ok(())
    }

    fn finish(&mut self, path: &Path) -> Result<()> {
        let svg = self.document(path)?;
        fs::write(path, svg).map_err(|e| BenchError::io_error(path, e))?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

fn pixels(cell: usize, count: usize, parameter: &str) -> Result<u32> {
    cell.checked_mul(count)
        .and_then(|total| u32::try_from(total).ok())
        .ok_or_else(|| BenchError::invalid_config(parameter, "plot canvas is too large"))
}

fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Horizontal extent covering every whisker, padded by 5%.
fn sample_range(boxes: &[(String, BoxSummary)]) -> (f64, f64) {
    let low = boxes
        .iter()
        .map(|(_, b)| b.whisker_low)
        .fold(f64::INFINITY, f64::min);
    let high = boxes
        .iter()
        .map(|(_, b)| b.whisker_high)
        .fold(f64::NEG_INFINITY, f64::max);
    if !low.is_finite() || !high.is_finite() {
        return (0.0, 1.0);
    }
    let span = if high > low { high - low } else { high.abs().max(1.0) };
    (low - span * 0.05, high + span * 0.05)
}

/// Draws one cell. `root` receives the setup names, which sit left of the
/// plotting area in canvas coordinates.
fn paint_cell<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    area: &DrawingArea<DB, Shift>,
    cell: &CellPlan,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let width = to_i32(area.dim_in_pixel().0 as usize);
    let title_style = TextStyle::from(("sans-serif", 15).into_font())
        .pos(Pos::new(HPos::Center, VPos::Top));
    let lines: Vec<&str> = cell.title.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        let y = 4 + to_i32(i) * TITLE_LINE_HEIGHT;
        area.draw_text(line, &title_style, (width / 2, y))?;
    }
    let title_height = 8 + to_i32(lines.len()) * TITLE_LINE_HEIGHT;
    let (_, body) = area.split_vertically(title_height);

    let longest = cell.boxes.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);
    let label_width = (to_i32(longest) * LABEL_CHAR_WIDTH + 12).min(width / 2);
    let axis_height: i32 = if cell.x_label.is_some() { 45 } else { 25 };
    let (x_min, x_max) = sample_range(&cell.boxes);
    let bands = cell.boxes.len().max(1) as f64;

    let mut chart = ChartBuilder::on(&body)
        .margin(8)
        .x_label_area_size(axis_height)
        .y_label_area_size(label_width)
        .build_cartesian_2d(x_min..x_max, 0.0..bands)?;

    let mut mesh = chart.configure_mesh();
    mesh.disable_y_mesh().disable_y_axis().x_labels(6);
    if let Some(label) = &cell.x_label {
        mesh.x_desc(label.as_str());
    }
    mesh.draw()?;

    // First setup on top.
    let centers: Vec<f64> = (0..cell.boxes.len())
        .map(|i| bands - i as f64 - 0.5)
        .collect();

    chart.draw_series(cell.boxes.iter().zip(&centers).map(|((_, b), &y)| {
        Rectangle::new(
            [(b.q1, y - BOX_HALF_HEIGHT), (b.q3, y + BOX_HALF_HEIGHT)],
            BOX_COLOR.mix(0.35).filled(),
        )
    }))?;
    chart.draw_series(cell.boxes.iter().zip(&centers).map(|((_, b), &y)| {
        Rectangle::new(
            [(b.q1, y - BOX_HALF_HEIGHT), (b.q3, y + BOX_HALF_HEIGHT)],
            BOX_COLOR.stroke_width(1),
        )
    }))?;
    chart.draw_series(cell.boxes.iter().zip(&centers).map(|((_, b), &y)| {
        PathElement::new(
            vec![(b.median, y - BOX_HALF_HEIGHT), (b.median, y + BOX_HALF_HEIGHT)],
            MEDIAN_COLOR.stroke_width(2),
        )
    }))?;
    chart.draw_series(cell.boxes.iter().zip(&centers).flat_map(|((_, b), &y)| {
        [
            vec![(b.whisker_low, y), (b.q1, y)],
            vec![(b.q3, y), (b.whisker_high, y)],
            vec![(b.whisker_low, y - CAP_HALF_HEIGHT), (b.whisker_low, y + CAP_HALF_HEIGHT)],
            vec![(b.whisker_high, y - CAP_HALF_HEIGHT), (b.whisker_high, y + CAP_HALF_HEIGHT)],
        ]
        .into_iter()
        .map(|points| PathElement::new(points, BLACK.stroke_width(1)))
    }))?;

    let label_style = TextStyle::from(("sans-serif", 13).into_font())
        .pos(Pos::new(HPos::Right, VPos::Center));
    for ((name, _), &y) in cell.boxes.iter().zip(&centers) {
        let (px, py) = chart.backend_coord(&(x_min, y));
        root.draw_text(name, &label_style, (px - 6, py))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitsbench_core::{CellAddress, CellPosition};

    fn cell(title: &str, x_label: Option<&str>) -> CellPlan {
        CellPlan {
            position: CellPosition { row: 0, column: 0 },
            address: CellAddress::Column(0),
            title: title.to_string(),
            boxes: vec![(
                "setup-a".to_string(),
                BoxSummary::from_samples(&[1.0, 2.0, 3.0, 4.0]).unwrap(),
            )],
            x_label: x_label.map(str::to_string),
        }
    }

    #[test]
    fn test_finish_without_begin() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = SvgPlotBackend::new(&PlotConfig::default());
        let err = backend.finish(&dir.path().join("plot.svg")).unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfig { .. }));
    }

    #[test]
    fn test_canvas_matches_grid() {
        let mut backend = SvgPlotBackend::new(&PlotConfig::default().with_cell_size(400, 250));
        backend.begin(GridShape::for_series(5, 3).unwrap()).unwrap();
        assert_eq!(backend.canvas_size().unwrap(), (1200, 500));
    }

    #[test]
    fn test_document_is_self_contained() {
        let mut backend = SvgPlotBackend::new(&PlotConfig::default());
        backend.begin(GridShape::for_series(1, 3).unwrap()).unwrap();
        backend
            .draw_cell(&cell("Read Image\n(1 HDUs x 1e3 pixels)", Some("Time (ms)")))
            .unwrap();
        let svg = backend.document(Path::new("plot.svg")).unwrap();
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("<script"));
        assert!(!svg.contains("http://cdn") && !svg.contains("https://"));
        assert!(svg.contains("Read Image"));
        assert!(svg.contains("(1 HDUs x 1e3 pixels)"));
        assert!(svg.contains("setup-a"));
        assert!(svg.contains("Time (ms)"));
    }

    #[test]
    fn test_sample_range_pads_whiskers() {
        let boxes = vec![(
            "a".to_string(),
            BoxSummary::from_samples(&[10.0, 20.0]).unwrap(),
        )];
        let (low, high) = sample_range(&boxes);
        assert!(low < boxes[0].1.whisker_low);
        assert!(high > boxes[0].1.whisker_high);
        assert_eq!(sample_range(&[]), (0.0, 1.0));
    }

    #[test]
    fn test_constant_samples_have_nonempty_range() {
        let boxes = vec![("a".to_string(), BoxSummary::from_samples(&[5.0]).unwrap())];
        let (low, high) = sample_range(&boxes);
        assert!(high > low);
    }
}

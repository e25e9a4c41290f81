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

//! Results table parsing and aggregation into named series.
//!
//! The benchmark executables append one row per run to a tab-separated
//! results table. Rows are grouped by a synthesized test name (mode, HDU type,
//! HDU count and shape) and, within a test name, by test setup.

use crate::config::DEFAULT_TABLE_COLUMNS;
use crate::error::{BenchError, Result};
use crate::format::scientific_notation;
use crate::test_case::{parse_count, HduType};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const REQUIRED_COLUMNS: &[&str] = &[
    "Mode",
    "HDU type",
    "HDU count",
    "Value count / HDU",
    "Test setup",
    "Samples (ms)",
];

/// One row of the results table.
///
/// Only the columns needed for plotting are kept; the executables also write
/// dates, file sizes and summary statistics, which are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultRow {
    /// "Write" or "Read".
    #[serde(rename = "Mode")]
    pub mode: String,
    #[serde(rename = "HDU type")]
    pub hdu_type: String,
    /// Kept verbatim for display.
    #[serde(rename = "HDU count")]
    pub hdu_count: String,
    #[serde(rename = "Value count / HDU")]
    pub value_count_per_hdu: String,
    #[serde(rename = "Test setup")]
    pub test_setup: String,
    /// Comma-separated durations in milliseconds.
    #[serde(rename = "Samples (ms)")]
    pub samples_ms: String,
    /// Line of the row in the results table.
    #[serde(skip)]
    pub line: usize,
}

/// Identity of one sample list in a [`SeriesTable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    pub test_name: String,
    pub test_setup: String,
}

/// Sample lists of one test name, by setup, in first-insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    pub test_name: String,
    setups: Vec<(String, Vec<f64>)>,
}

impl Series {
    fn new(test_name: String) -> Self {
        Self {
            test_name,
            setups: Vec::new(),
        }
    }

    /// Inserts or replaces the samples of `setup`, keeping its position.
    fn upsert(&mut self, setup: String, samples: Vec<f64>) {
        match self.setups.iter_mut().find(|(name, _)| *name == setup) {
            Some((_, existing)) => *existing = samples,
            None => self.setups.push((setup, samples)),
        }
    }

    /// Setups with their samples, in first-appearance order.
    pub fn setups(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.setups
            .iter()
            .map(|(name, samples)| (name.as_str(), samples.as_slice()))
    }

    /// Samples of `setup`, or `None` if the setup never ran this test.
    pub fn samples(&self, setup: &str) -> Option<&[f64]> {
        self.setups
            .iter()
            .find(|(name, _)| name == setup)
            .map(|(_, samples)| samples.as_slice())
    }

    /// Number of distinct setups, empty ones included.
    pub fn setup_count(&self) -> usize {
        self.setups.len()
    }
}

/// Named series in first-insertion order of their test names.
///
/// # Examples
///
/// ```
/// use fitsbench_core::SeriesTable;
///
/// let mut table = SeriesTable::new();
/// table.insert("Write Image", "A", vec![1.0, 2.0]);
/// table.insert("Write Image", "A", vec![3.0]);
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.get("Write Image").unwrap().samples("A"), Some(&[3.0][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesTable {
    series: Vec<Series>,
    index: HashMap<String, usize>,
}

impl SeriesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the samples of `(test_name, test_setup)`.
    pub fn insert(
        &mut self,
        test_name: impl Into<String>,
        test_setup: impl Into<String>,
        samples: Vec<f64>,
    ) {
        let test_name = test_name.into();
        let position = match self.index.get(&test_name) {
            Some(&position) => position,
            None => {
                self.series.push(Series::new(test_name.clone()));
                self.index.insert(test_name, self.series.len() - 1);
                self.series.len() - 1
            }
        };
        self.series[position].upsert(test_setup.into(), samples);
    }

    /// Series of `test_name`, if any row carried it.
    pub fn get(&self, test_name: &str) -> Option<&Series> {
        self.index.get(test_name).map(|&position| &self.series[position])
    }

    /// Samples stored under `key`.
    pub fn samples(&self, key: &SeriesKey) -> Option<&[f64]> {
        self.get(&key.test_name)
            .and_then(|series| series.samples(&key.test_setup))
    }

    /// Every key, series by series, setups in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = SeriesKey> + '_ {
        self.series.iter().flat_map(|series| {
            series.setups().map(move |(setup, _)| SeriesKey {
                test_name: series.test_name.clone(),
                test_setup: setup.to_string(),
            })
        })
    }

    /// Series in first-appearance order of their test names.
    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    /// Number of series, which is also the number of plot cells.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Human-readable shape of one HDU.
///
/// Images are described by their pixel count, binary tables by their column
/// and row counts.
pub fn shape_description(hdu_type: &str, value_count: u64, table_columns: u64) -> String {
    match hdu_type.parse::<HduType>() {
        Ok(HduType::Image) => format!("{} pixels", scientific_notation(value_count as f64)),
        _ => format!(
            "{} columns x {} rows",
            table_columns,
            scientific_notation(value_count as f64 / table_columns as f64)
        ),
    }
}

/// Parse a comma-separated sample list.
///
/// Every token must be a finite, non-negative number of milliseconds.
pub fn parse_samples(text: &str, row: usize) -> Result<Vec<f64>> {
    text.split(',')
        .map(|token| {
            let token = token.trim();
            match token.parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
                _ => Err(BenchError::MalformedSamples {
                    row,
                    token: token.to_string(),
                }),
            }
        })
        .collect()
}

/// Groups result rows into series.
#[derive(Debug, Clone)]
pub struct ResultAggregator {
    table_columns: u64,
}

impl Default for ResultAggregator {
    fn default() -> Self {
        Self {
            table_columns: DEFAULT_TABLE_COLUMNS,
        }
    }
}

impl ResultAggregator {
    /// Creates an aggregator describing binary tables with `table_columns` columns.
    pub fn new(table_columns: u64) -> Result<Self> {
        if table_columns == 0 {
            return Err(BenchError::invalid_config(
                "table_columns",
                "must be at least 1",
            ));
        }
        Ok(Self { table_columns })
    }

    /// Synthesized test name, e.g. `"Write Image\n(10 HDUs x 1e3 pixels)"`.
    pub fn test_name(&self, row: &ResultRow) -> Result<String> {
        let value_count = parse_count(
            &row.value_count_per_hdu,
            "Value count / HDU",
            &format!("results row {}", row.line),
        )
        .map_err(|_| BenchError::MalformedResult {
            row: row.line,
            field: "Value count / HDU".to_string(),
            value: row.value_count_per_hdu.clone(),
        })?;
        let shape = shape_description(&row.hdu_type, value_count, self.table_columns);
        Ok(format!(
            "{} {}\n({} HDUs x {})",
            row.mode, row.hdu_type, row.hdu_count, shape
        ))
    }

    /// Groups rows in table order; the last row of a duplicate key wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use fitsbench_core::results::{read_results, ResultAggregator};
    ///
    /// let tsv = "Mode\tHDU type\tHDU count\tValue count / HDU\tTest setup\tSamples (ms)\n\
    ///            Write\tImage\t10\t1000\tA\t1.0,2.0,3.0\n\
    ///            Write\tImage\t10\t1000\tB\t2.0,3.0,4.0\n";
    /// let rows = read_results(tsv.as_bytes()).unwrap();
    /// let table = ResultAggregator::default().aggregate(&rows).unwrap();
    /// assert_eq!(table.len(), 1);
    /// let series = table.get("Write Image\n(10 HDUs x 1e3 pixels)").unwrap();
    /// assert_eq!(series.setup_count(), 2);
    /// ```
    pub fn aggregate(&self, rows: &[ResultRow]) -> Result<SeriesTable> {
        let mut table = SeriesTable::new();
        for row in rows {
            let test_name = self.test_name(row)?;
            let samples = parse_samples(&row.samples_ms, row.line)?;
            debug!(
                "{} {}: {:?}",
                test_name.replace('\n', " "),
                row.test_setup,
                samples
            );
            table.insert(test_name, row.test_setup.clone(), samples);
        }
        Ok(table)
    }
}

/// Read the results table from any reader.
pub fn read_results<R: Read>(reader: R) -> Result<Vec<ResultRow>> {
    let mut tsv = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = tsv.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(BenchError::MissingColumn((*column).to_string()));
        }
    }

    let mut rows = Vec::new();
    for (index, record) in tsv.records().enumerate() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        let mut row: ResultRow = record.deserialize(Some(&headers))?;
        row.line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);
        rows.push(row);
    }
    Ok(rows)
}

/// Read and aggregate a results table file.
pub fn load_series(path: impl AsRef<Path>, aggregator: &ResultAggregator) -> Result<SeriesTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| BenchError::io_error(path, e))?;
    let rows = read_results(file)?;
    aggregator.aggregate(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HEADER: &str = "Mode\tHDU type\tHDU count\tValue count / HDU\tTest setup\tSamples (ms)\n";

    fn row(mode: &str, hdu_type: &str, hdu_count: &str, values: &str, setup: &str, samples: &str) -> ResultRow {
        ResultRow {
            mode: mode.to_string(),
            hdu_type: hdu_type.to_string(),
            hdu_count: hdu_count.to_string(),
            value_count_per_hdu: values.to_string(),
            test_setup: setup.to_string(),
            samples_ms: samples.to_string(),
            line: 2,
        }
    }

    #[test]
    fn test_image_test_name() {
        let name = ResultAggregator::default()
            .test_name(&row("Write", "Image", "10", "1000", "A", "1"))
            .unwrap();
        assert_eq!(name, "Write Image\n(10 HDUs x 1e3 pixels)");
    }

    #[test]
    fn test_table_test_name() {
        let name = ResultAggregator::default()
            .test_name(&row("Read", "Binary table", "2", "25000", "A", "1"))
            .unwrap();
        assert_eq!(name, "Read Binary table\n(2 HDUs x 10 columns x 2.5e3 rows)");
    }

    #[test]
    fn test_table_test_name_with_custom_columns() {
        let name = ResultAggregator::new(4)
            .unwrap()
            .test_name(&row("Read", "Binary table", "1", "1000", "A", "1"))
            .unwrap();
        assert_eq!(name, "Read Binary table\n(1 HDUs x 4 columns x 2.5e2 rows)");
    }

    #[test]
    fn test_two_setups_share_one_series() {
        let tsv = format!(
            "{}Write\tImage\t10\t1000\tA\t1,2,3\nWrite\tImage\t10\t1000\tB\t4,5,6\n",
            HEADER
        );
        let rows = read_results(tsv.as_bytes()).unwrap();
        let table = ResultAggregator::default().aggregate(&rows).unwrap();
        assert_eq!(table.len(), 1);
        let series = table.iter().next().unwrap();
        let setups: Vec<&str> = series.setups().map(|(name, _)| name).collect();
        assert_eq!(setups, vec!["A", "B"]);
        assert_eq!(series.samples("B"), Some(&[4.0, 5.0, 6.0][..]));
    }

    #[test]
    fn test_series_order_follows_first_appearance() {
        let rows = vec![
            row("Write", "Image", "1", "100", "A", "1"),
            row("Read", "Image", "1", "100", "A", "1"),
            row("Write", "Image", "1", "100", "B", "1"),
        ];
        let table = ResultAggregator::default().aggregate(&rows).unwrap();
        let names: Vec<&str> = table.iter().map(|s| s.test_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Write Image\n(1 HDUs x 1e2 pixels)",
                "Read Image\n(1 HDUs x 1e2 pixels)"
            ]
        );
    }

    #[test]
    fn test_last_duplicate_wins() {
        let rows = vec![
            row("Write", "Image", "1", "100", "A", "1,1"),
            row("Write", "Image", "1", "100", "B", "2"),
            row("Write", "Image", "1", "100", "A", "3,3,3"),
        ];
        let table = ResultAggregator::default().aggregate(&rows).unwrap();
        let series = table.iter().next().unwrap();
        assert_eq!(series.samples("A"), Some(&[3.0, 3.0, 3.0][..]));
        let setups: Vec<&str> = series.setups().map(|(name, _)| name).collect();
        assert_eq!(setups, vec!["A", "B"]);
    }

    #[test]
    fn test_malformed_sample_names_row() {
        let tsv = format!(
            "{}Write\tImage\t1\t100\tA\t1.5,2.0\nWrite\tImage\t1\t100\tB\t1.5,fast\n",
            HEADER
        );
        let rows = read_results(tsv.as_bytes()).unwrap();
        let err = ResultAggregator::default().aggregate(&rows).unwrap_err();
        match err {
            BenchError::MalformedSamples { row, token } => {
                assert_eq!(row, 3);
                assert_eq!(token, "fast");
            }
            other => panic!("expected MalformedSamples, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_and_negative_samples_rejected() {
        assert!(parse_samples("", 2).is_err());
        assert!(parse_samples("1,,2", 2).is_err());
        assert!(parse_samples("1,-2", 2).is_err());
        assert!(parse_samples("1,NaN", 2).is_err());
        assert_eq!(parse_samples(" 1.5 , 2 ", 2).unwrap(), vec![1.5, 2.0]);
    }

    #[test]
    fn test_malformed_value_count() {
        let rows = vec![row("Write", "Image", "1", "lots", "A", "1")];
        let err = ResultAggregator::default().aggregate(&rows).unwrap_err();
        assert!(matches!(err, BenchError::MalformedResult { ref field, .. } if field == "Value count / HDU"));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let tsv = "Date\tTest setup\tMode\tHDU type\tHDU count\tValue count / HDU\tTotal value count\tSamples (ms)\n\
                   2023-01-01\tA\tWrite\tImage\t1\t100\t100\t0.5,0.7\n";
        let rows = read_results(tsv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].test_setup, "A");
        assert_eq!(rows[0].samples_ms, "0.5,0.7");
        assert_eq!(rows[0].line, 2);
    }

    #[test]
    fn test_missing_samples_column() {
        let tsv = "Mode\tHDU type\tHDU count\tValue count / HDU\tTest setup\n";
        let err = read_results(tsv.as_bytes()).unwrap_err();
        assert!(matches!(err, BenchError::MissingColumn(ref c) if c == "Samples (ms)"));
    }

    #[test]
    fn test_empty_results_table() {
        let rows = read_results(HEADER.as_bytes()).unwrap();
        let table = ResultAggregator::default().aggregate(&rows).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_zero_columns_aggregator_rejected() {
        assert!(ResultAggregator::new(0).is_err());
    }

    fn arb_row() -> impl Strategy<Value = ResultRow> {
        (
            prop::sample::select(vec!["Write", "Read"]),
            prop::sample::select(vec!["Image", "Binary table"]),
            1u64..5,
            prop::sample::select(vec![100u64, 1000, 25_000]),
            prop::sample::select(vec!["A", "B", "C"]),
            prop::collection::vec(0.0f64..1000.0, 1..5),
        )
            .prop_map(|(mode, hdu_type, count, values, setup, samples)| {
                let samples: Vec<String> = samples.iter().map(|s| s.to_string()).collect();
                row(
                    mode,
                    hdu_type,
                    &count.to_string(),
                    &values.to_string(),
                    setup,
                    &samples.join(","),
                )
            })
    }

    proptest! {
        #[test]
        fn prop_aggregation_is_idempotent(rows in prop::collection::vec(arb_row(), 0..20)) {
            let aggregator = ResultAggregator::default();
            let first = aggregator.aggregate(&rows).unwrap();
            let second = aggregator.aggregate(&rows).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_reordering_keeps_key_set(rows in prop::collection::vec(arb_row(), 0..20)) {
            let aggregator = ResultAggregator::default();
            let forward = aggregator.aggregate(&rows).unwrap();
            let reversed: Vec<ResultRow> = rows.iter().rev().cloned().collect();
            let backward = aggregator.aggregate(&reversed).unwrap();

            let mut forward_keys: Vec<SeriesKey> = forward.keys().collect();
            let mut backward_keys: Vec<SeriesKey> = backward.keys().collect();
            let sort = |keys: &mut Vec<SeriesKey>| {
                keys.sort_by(|a, b| (&a.test_name, &a.test_setup).cmp(&(&b.test_name, &b.test_setup)))
            };
            sort(&mut forward_keys);
            sort(&mut backward_keys);
            prop_assert_eq!(forward_keys, backward_keys);
        }
    }
}

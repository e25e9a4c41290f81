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

//! Test-case tables.
//!
//! A test-case table is a tab-separated file with a header row. Two flavors
//! exist:
//!
//! - **Shape** tables (`Test setup`, `HDU type`, `HDU count`, `Value count / HDU`)
//!   drive the I/O benchmark.
//! - **Compression** tables (`Filename`, `Comptype`, `Lossy`, `ExtGZIP`) drive
//!   the compression benchmark.
//!
//! Each row is validated once, when the table is read, into a typed
//! [`TestCaseRecord`]. A malformed row does not abort the table: it is kept as
//! an `Err` so that the campaign can log it and move on to the next row.

use crate::error::{BenchError, Result};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Kind of header-data unit exercised by a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HduType {
    Image,
    BinaryTable,
}

impl HduType {
    /// Spelling used in test-case and results tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            HduType::Image => "Image",
            HduType::BinaryTable => "Binary table",
        }
    }
}

impl fmt::Display for HduType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HduType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("")
            .to_ascii_lowercase();
        match normalized.as_str() {
            "image" => Ok(HduType::Image),
            "binarytable" => Ok(HduType::BinaryTable),
            _ => Err(()),
        }
    }
}

/// One row of a shape test-case table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeTestCase {
    /// Configuration variant under test, e.g. "EleFits optimal".
    pub test_setup: String,
    pub hdu_type: HduType,
    pub hdu_count: u64,
    /// Pixels per image, or values per binary table.
    pub value_count_per_hdu: u64,
    /// Line of the row in its table (the header is line 1).
    pub line: usize,
}

/// One row of a compression test-case table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionTestCase {
    /// Input FITS file to compress.
    pub filename: String,
    /// Compression algorithm label, e.g. "RICE".
    pub compression_case: String,
    pub lossy: bool,
    /// Whether the whole output file is gzipped.
    pub ext_gzip: bool,
    pub line: usize,
}

/// A validated test case of either flavor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestCaseRecord {
    Shape(ShapeTestCase),
    Compression(CompressionTestCase),
}

impl TestCaseRecord {
    /// Line of the row in its table.
    pub fn line(&self) -> usize {
        match self {
            TestCaseRecord::Shape(case) => case.line,
            TestCaseRecord::Compression(case) => case.line,
        }
    }

    /// Short label used in logs.
    pub fn label(&self) -> String {
        match self {
            TestCaseRecord::Shape(case) => format!(
                "{}: {} x {} {}",
                case.test_setup, case.hdu_count, case.value_count_per_hdu, case.hdu_type
            ),
            TestCaseRecord::Compression(case) => {
                format!("{}: {}", case.compression_case, case.filename)
            }
        }
    }
}

/// Flavor of a test-case table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Shape,
    Compression,
}

impl TableKind {
    fn required_columns(&self) -> &'static [&'static str] {
        match self {
            TableKind::Shape => &["Test setup", "HDU type", "HDU count", "Value count / HDU"],
            TableKind::Compression => &["Filename", "Comptype"],
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawShapeRow {
    #[serde(rename = "Test setup")]
    test_setup: String,
    #[serde(rename = "HDU type")]
    hdu_type: String,
    #[serde(rename = "HDU count")]
    hdu_count: String,
    #[serde(rename = "Value count / HDU")]
    value_count_per_hdu: String,
}

#[derive(Debug, Deserialize)]
struct RawCompressionRow {
    #[serde(rename = "Filename")]
    filename: String,
    #[serde(rename = "Comptype")]
    compression_case: String,
    #[serde(rename = "Lossy", default)]
    lossy: Option<String>,
    #[serde(rename = "ExtGZIP", default)]
    ext_gzip: Option<String>,
}

fn record_label(line: usize) -> String {
    format!("test case at line {}", line)
}

/// Parse a count which may be written as a float, e.g. `1e6` or `12.7`.
///
/// The value is truncated toward zero.
///
/// ```
/// use fitsbench_core::test_case::parse_count;
///
/// assert_eq!(parse_count("1e6", "HDU count", "test case at line 2").unwrap(), 1_000_000);
/// assert_eq!(parse_count("12.7", "HDU count", "test case at line 2").unwrap(), 12);
/// assert!(parse_count("ten", "HDU count", "test case at line 2").is_err());
/// ```
pub fn parse_count(text: &str, field: &str, record: &str) -> Result<u64> {
    let malformed = || BenchError::MalformedInput {
        record: record.to_string(),
        field: field.to_string(),
        value: text.to_string(),
    };
    let value: f64 = text.trim().parse().map_err(|_| malformed())?;
    if !value.is_finite() || value < 0.0 || value >= u64::MAX as f64 {
        return Err(malformed());
    }
    Ok(value.trunc() as u64)
}

/// Lenient boolean: `yes`, `true`, `t` and `1` (any case) are true, anything else is false.
///
/// ```
/// use fitsbench_core::test_case::parse_flag;
///
/// assert!(parse_flag("Yes"));
/// assert!(parse_flag("T"));
/// assert!(!parse_flag("no"));
/// assert!(!parse_flag(""));
/// ```
pub fn parse_flag(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "yes" | "true" | "t" | "1"
    )
}

impl ShapeTestCase {
    fn from_raw(raw: RawShapeRow, line: usize) -> Result<Self> {
        let record = record_label(line);
        let hdu_type = raw
            .hdu_type
            .parse::<HduType>()
            .map_err(|_| BenchError::MalformedInput {
                record: record.clone(),
                field: "HDU type".to_string(),
                value: raw.hdu_type.clone(),
            })?;
        Ok(Self {
            hdu_count: parse_count(&raw.hdu_count, "HDU count", &record)?,
            value_count_per_hdu: parse_count(
                &raw.value_count_per_hdu,
                "Value count / HDU",
                &record,
            )?,
            test_setup: raw.test_setup,
            hdu_type,
            line,
        })
    }
}

impl CompressionTestCase {
    fn from_raw(raw: RawCompressionRow, line: usize) -> Self {
        Self {
            filename: raw.filename,
            compression_case: raw.compression_case,
            lossy: raw.lossy.as_deref().map(parse_flag).unwrap_or(false),
            ext_gzip: raw.ext_gzip.as_deref().map(parse_flag).unwrap_or(false),
            line,
        }
    }
}

/// Read a test-case table from any reader.
///
/// The outer `Result` fails on unreadable input or missing columns. Each row
/// is parsed independently; malformed rows come back as `Err` in table order.
///
/// # Examples
///
/// ```
/// use fitsbench_core::test_case::{read_test_cases, TableKind, TestCaseRecord};
///
/// let tsv = "Test setup\tHDU type\tHDU count\tValue count / HDU\nA\tImage\t1e2\t1e6\n";
/// let rows = read_test_cases(tsv.as_bytes(), TableKind::Shape).unwrap();
/// match rows[0].as_ref().unwrap() {
///     TestCaseRecord::Shape(case) => assert_eq!(case.value_count_per_hdu, 1_000_000),
///     _ => unreachable!(),
/// }
/// ```
pub fn read_test_cases<R: Read>(reader: R, kind: TableKind) -> Result<Vec<Result<TestCaseRecord>>> {
    let mut tsv = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = tsv.headers()?.clone();
    for column in kind.required_columns() {
        if !headers.iter().any(|h| h == *column) {
            return Err(BenchError::MissingColumn((*column).to_string()));
        }
    }

    let mut rows = Vec::new();
    for (index, record) in tsv.byte_records().enumerate() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);
        let record = match csv::StringRecord::from_byte_record(record) {
            Ok(record) => record,
            Err(e) => {
                let column = e.utf8_error().field();
                let value = e
                    .into_byte_record()
                    .get(column)
                    .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                    .unwrap_or_default();
                let malformed = BenchError::MalformedInput {
                    record: record_label(line),
                    field: headers.get(column).unwrap_or("?").to_string(),
                    value,
                };
                debug!(line, %malformed, "undecodable test case");
                rows.push(Err(malformed));
                continue;
            }
        };
        let parsed = match kind {
            TableKind::Shape => record
                .deserialize::<RawShapeRow>(Some(&headers))
                .map_err(BenchError::from)
                .and_then(|raw| ShapeTestCase::from_raw(raw, line))
                .map(TestCaseRecord::Shape),
            TableKind::Compression => record
                .deserialize::<RawCompressionRow>(Some(&headers))
                .map_err(BenchError::from)
                .map(|raw| TestCaseRecord::Compression(CompressionTestCase::from_raw(raw, line))),
        };
        debug!(line, ?parsed, "read test case");
        rows.push(parsed);
    }
    Ok(rows)
}

/// Read a test-case table from a file.
pub fn load_test_cases(path: impl AsRef<Path>, kind: TableKind) -> Result<Vec<Result<TestCaseRecord>>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| BenchError::io_error(path, e))?;
    read_test_cases(file, kind)
}

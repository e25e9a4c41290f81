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

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const RESULTS_HEADER: &str =
    "Date\tMode\tHDU type\tHDU count\tValue count / HDU\tTest setup\tSamples (ms)\n";

fn fitsbench_cmd() -> Command {
    Command::cargo_bin("fitsbench").expect("Failed to find fitsbench binary")
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write temp file");
    path
}

fn shape_tests(dir: &Path) -> PathBuf {
    write_file(
        dir,
        "tests.tsv",
        "Test setup\tHDU type\tHDU count\tValue count / HDU\n\
         CFITSIO\tImage\t1e2\t1e6\n\
         EleFits\tBinary table\t10\t1000\n",
    )
}

fn results(dir: &Path) -> PathBuf {
    write_file(
        dir,
        "results.tsv",
        &format!(
            "{}2024-01-01\tWrite\tImage\t10\t1000\tA\t1.0,2.0,3.0\n\
             2024-01-01\tWrite\tImage\t10\t1000\tB\t2.0,3.0,4.0\n\
             2024-01-01\tRead\tBinary table\t1\t25000\tA\t0.5,0.6\n",
            RESULTS_HEADER
        ),
    )
}

// ===== Help =====

#[test]
fn test_help_lists_commands() {
    fitsbench_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("FitsBench - FITS I/O benchmark campaign driver"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("compression"))
        .stdout(predicate::str::contains("plot"));
}

#[test]
fn test_invalid_log_level() {
    fitsbench_cmd()
        .args(["run", "--log-level", "chatty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chatty"));
}

// ===== Campaigns =====

#[test]
fn test_run_without_tests_or_plot_does_nothing() {
    fitsbench_cmd()
        .args(["run", "--executable", "/nonexistent/benchmark"])
        .assert()
        .success();
}

#[cfg(unix)]
#[test]
fn test_run_campaign_with_succeeding_executable() {
    let dir = TempDir::new().unwrap();
    let tests = shape_tests(dir.path());
    fitsbench_cmd()
        .arg("run")
        .arg("--tests")
        .arg(&tests)
        .arg("--res")
        .arg(dir.path().join("results.tsv"))
        .args(["--executable", "true"])
        .assert()
        .success()
        .stderr(predicate::str::contains("--images 100 --pixels 1000000"))
        .stderr(predicate::str::contains("--tables 10 --rows 100"))
        .stderr(predicate::str::contains("2 test cases run: 2 succeeded, 0 failed, 0 skipped"));
}

#[cfg(unix)]
#[test]
fn test_failing_executable_does_not_halt_campaign() {
    let dir = TempDir::new().unwrap();
    let tests = shape_tests(dir.path());
    fitsbench_cmd()
        .arg("run")
        .arg("--tests")
        .arg(&tests)
        .args(["--executable", "false"])
        .assert()
        .success()
        .stderr(predicate::str::contains("2 test cases run: 0 succeeded, 2 failed"));
}

#[cfg(unix)]
#[test]
fn test_strict_campaign_fails_on_failures() {
    let dir = TempDir::new().unwrap();
    let tests = shape_tests(dir.path());
    fitsbench_cmd()
        .arg("run")
        .arg("--tests")
        .arg(&tests)
        .args(["--executable", "false", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Campaign not clean: 2 test cases failed"));
}

#[cfg(unix)]
#[test]
fn test_malformed_row_is_skipped() {
    let dir = TempDir::new().unwrap();
    let tests = write_file(
        dir.path(),
        "tests.tsv",
        "Test setup\tHDU type\tHDU count\tValue count / HDU\n\
         A\tImage\tmany\t100\n\
         B\tImage\t1\t100\n",
    );
    fitsbench_cmd()
        .arg("run")
        .arg("--tests")
        .arg(&tests)
        .args(["--executable", "true"])
        .assert()
        .success()
        .stderr(predicate::str::contains("field 'HDU count' has value 'many'"))
        .stderr(predicate::str::contains("1 succeeded, 0 failed, 1 skipped"));
}

#[test]
fn test_missing_tests_file() {
    fitsbench_cmd()
        .args(["run", "--tests", "/nonexistent/tests.tsv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_zero_table_columns_rejected() {
    let dir = TempDir::new().unwrap();
    let tests = shape_tests(dir.path());
    fitsbench_cmd()
        .arg("run")
        .arg("--tests")
        .arg(&tests)
        .args(["--table-columns", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("table_columns"));
}

#[cfg(unix)]
#[test]
fn test_compression_campaign() {
    let dir = TempDir::new().unwrap();
    let tests = write_file(
        dir.path(),
        "compression.tsv",
        "Filename\tComptype\tLossy\tExtGZIP\n\
         data.fits\tRICE\tyes\tno\n",
    );
    fitsbench_cmd()
        .arg("compression")
        .arg("--tests")
        .arg(&tests)
        .args(["--executable", "true"])
        .assert()
        .success()
        .stderr(predicate::str::contains("--case \"RICE\""))
        .stderr(predicate::str::contains("--lossy"))
        .stderr(predicate::str::contains("1 test cases run: 1 succeeded"));
}

// ===== Plotting =====

#[test]
fn test_plot_command_writes_svg() {
    let dir = TempDir::new().unwrap();
    let res = results(dir.path());
    let plot = dir.path().join("plot.svg");
    fitsbench_cmd()
        .arg("plot")
        .arg("--res")
        .arg(&res)
        .arg("--plot")
        .arg(&plot)
        .assert()
        .success()
        .stderr(predicate::str::contains("Plotting 2 graphs"));

    let svg = fs::read_to_string(&plot).unwrap();
    assert!(svg.contains("10 HDUs x 1e3 pixels"));
    assert!(svg.contains("1 HDUs x 10 columns x 2.5e3 rows"));
}

#[test]
fn test_run_plots_without_campaign() {
    let dir = TempDir::new().unwrap();
    let res = results(dir.path());
    let plot = dir.path().join("plot.svg");
    fitsbench_cmd()
        .arg("run")
        .arg("--res")
        .arg(&res)
        .arg("--plot")
        .arg(&plot)
        .args(["--plot-columns", "1"])
        .assert()
        .success();
    assert!(plot.exists());
}

#[test]
fn test_plot_empty_results_fails() {
    let dir = TempDir::new().unwrap();
    let res = write_file(dir.path(), "results.tsv", RESULTS_HEADER);
    let plot = dir.path().join("plot.svg");
    fitsbench_cmd()
        .arg("plot")
        .arg("--res")
        .arg(&res)
        .arg("--plot")
        .arg(&plot)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No benchmark results to plot"));
    assert!(!plot.exists());
}

#[test]
fn test_plot_malformed_samples_fails() {
    let dir = TempDir::new().unwrap();
    let res = write_file(
        dir.path(),
        "results.tsv",
        &format!("{}2024-01-01\tWrite\tImage\t1\t100\tA\t1.0,oops\n", RESULTS_HEADER),
    );
    fitsbench_cmd()
        .arg("plot")
        .arg("--res")
        .arg(&res)
        .arg("--plot")
        .arg(dir.path().join("plot.svg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("'oops'"));
}

#[test]
fn test_plot_missing_samples_column_fails() {
    let dir = TempDir::new().unwrap();
    let res = write_file(
        dir.path(),
        "results.tsv",
        "Mode\tHDU type\tHDU count\tValue count / HDU\tTest setup\n",
    );
    fitsbench_cmd()
        .arg("plot")
        .arg("--res")
        .arg(&res)
        .arg("--plot")
        .arg(dir.path().join("plot.svg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Samples (ms)"));
}

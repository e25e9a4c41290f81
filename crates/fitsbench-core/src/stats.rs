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

//! Percentile summaries of sample lists.

/// Box-and-whisker summary of one sample list.
///
/// Whiskers stop at the 5th and 95th percentiles; samples beyond them are not
/// part of the summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSummary {
    /// 5th percentile.
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// 95th percentile.
    pub whisker_high: f64,
    /// Number of samples summarized.
    pub count: usize,
}

impl BoxSummary {
    /// Summarizes `samples`, or returns `None` when there are none.
    ///
    /// Percentiles interpolate linearly between the closest ranks.
    ///
    /// ```
    /// use fitsbench_core::BoxSummary;
    ///
    /// let summary = BoxSummary::from_samples(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    /// assert_eq!(summary.median, 3.0);
    /// assert_eq!(summary.q1, 2.0);
    /// assert!((summary.whisker_low - 1.2).abs() < 1e-9);
    /// ```
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            whisker_low: percentile(&sorted, 0.05),
            q1: percentile(&sorted, 0.25),
            median: percentile(&sorted, 0.50),
            q3: percentile(&sorted, 0.75),
            whisker_high: percentile(&sorted, 0.95),
            count: sorted.len(),
        })
    }
}

/// Percentile `p` (in `[0, 1]`) of a non-empty sorted slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = (sorted.len() - 1) as f64 * p;
    let below = rank.floor() as usize;
    let above = rank.ceil() as usize;
    let weight = rank - below as f64;
    (sorted[below] + (sorted[above] - sorted[below]) * weight).min(sorted[above])
}

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

//! Compact scientific notation for plot labels.

/// Format a magnitude as `<mantissa>e<exponent>`.
///
/// The mantissa is rounded to two decimals with `1 <= mantissa < 10`. Trailing
/// zeros are dropped, and so is the decimal point for integer mantissas.
///
/// # Examples
///
/// ```
/// use fitsbench_core::scientific_notation;
///
/// assert_eq!(scientific_notation(1000.0), "1e3");
/// assert_eq!(scientific_notation(2500.0), "2.5e3");
/// assert_eq!(scientific_notation(12.0), "1.2e1");
/// assert_eq!(scientific_notation(0.0), "0e0");
/// ```
pub fn scientific_notation(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.2e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let mantissa = if mantissa.contains('.') {
                mantissa.trim_end_matches('0').trim_end_matches('.')
            } else {
                mantissa
            };
            // "-0" can only come from a negative zero input
            let mantissa = if mantissa == "-0" { "0" } else { mantissa };
            format!("{}e{}", mantissa, exponent)
        }
        None => formatted,
    }
}

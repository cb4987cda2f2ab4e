// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! The workload whose result the diagnostic reports.

use core::fmt;

/// A 3x3 matrix of signed 32-bit integers.
pub type Matrix3 = [[i32; 3]; 3];

pub const MATRIX_A: Matrix3 = [[1, 2, 3], [4, 5, 6], [7, 8, 9]];
pub const MATRIX_B: Matrix3 = [[9, 8, 7], [6, 5, 4], [3, 2, 1]];

/// Element-wise product of `a` and `b`, summed.
pub fn convolution3x3(a: &Matrix3, b: &Matrix3) -> i32 {
    a.iter()
        .flatten()
        .zip(b.iter().flatten())
        .map(|(x, y)| x * y)
        .sum()
}

// "-2147483648" plus slack.
const DECIMAL_CAPACITY: usize = 12;

/// Decimal text of an `i32`, held on the stack.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Decimal {
    buf: [u8; DECIMAL_CAPACITY],
    len: usize,
}

impl Decimal {
    pub fn as_bytes(&self) -> &[u8] { &self.buf[..self.len] }

    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }
}

impl fmt::Write for Decimal {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > DECIMAL_CAPACITY {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// Formats `value` as decimal digits with a leading '-' when negative.
/// No padding and no terminator.
pub fn format_decimal(value: i32) -> Result<Decimal, fmt::Error> {
    let mut text = Decimal::default();
    fmt::write(&mut text, format_args!("{}", value))?;
    Ok(text)
}

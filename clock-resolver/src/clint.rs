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

// CLINT machine timer.

use crate::Ticks;
use mmio_register::RegisterAccess;
use reg_constants::clint::*;

/// Read-only view of the CLINT's 64-bit `mtime` counter.
pub struct Clint<R: RegisterAccess> {
    regs: R,
}

impl<R: RegisterAccess> Clint<R> {
    pub fn new(regs: R) -> Self { Clint { regs } }

    /// Reads `mtime` through its two 32-bit halves, retrying if the low
    /// word wrapped between the reads.
    pub fn mtime(&self) -> Ticks {
        loop {
            let high = self.regs.read32(CLINT_MTIME_HIGH_REG_OFFSET);
            let low = self.regs.read32(CLINT_MTIME_LOW_REG_OFFSET);
            if self.regs.read32(CLINT_MTIME_HIGH_REG_OFFSET) == high {
                return (high as Ticks) << 32 | low as Ticks;
            }
        }
    }
}

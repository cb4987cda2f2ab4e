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

// RISC-V machine-mode counters.

use crate::{Clint, Cycles, Ticks, Timebase};
use mmio_register::RegisterAccess;
use static_assertions::assert_cfg;

assert_cfg!(any(target_arch = "riscv32", target_arch = "riscv64"));

/// Reads the `mcycle` CSR.
#[cfg(target_arch = "riscv64")]
pub fn read_mcycle() -> Cycles {
    let cycles: u64;
    unsafe { core::arch::asm!("csrr {}, mcycle", out(reg) cycles) };
    cycles
}

/// Reads the `mcycle`/`mcycleh` CSR pair.
#[cfg(target_arch = "riscv32")]
pub fn read_mcycle() -> Cycles {
    loop {
        let (high, low, again): (u32, u32, u32);
        unsafe {
            core::arch::asm!(
                "csrr {0}, mcycleh",
                "csrr {1}, mcycle",
                "csrr {2}, mcycleh",
                out(reg) high,
                out(reg) low,
                out(reg) again,
            )
        };
        if high == again {
            return (high as Cycles) << 32 | low as Cycles;
        }
    }
}

/// The hart's own `mcycle` against the CLINT `mtime`.
pub struct MachineTimebase<R: RegisterAccess> {
    clint: Clint<R>,
}

impl<R: RegisterAccess> MachineTimebase<R> {
    pub fn new(clint: Clint<R>) -> Self { MachineTimebase { clint } }
}

impl<R: RegisterAccess> Timebase for MachineTimebase<R> {
    fn mtime(&self) -> Ticks { self.clint.mtime() }
    fn mcycle(&self) -> Cycles { read_mcycle() }
}

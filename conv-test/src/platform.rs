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


//! Board description handed to the diagnostic.

use cfg_if::cfg_if;
use clock_resolver::Ticks;
use reg_constants::*;
use uart_driver::{PollLimit, UartConfig};

/// `mtime` polls allowed per calibration tick before the RTC is
/// declared stopped.
pub const CALIBRATION_POLLS_PER_TICK: u32 = 10_000;

cfg_if! {
    if #[cfg(feature = "CONFIG_UNBOUNDED_POLL")] {
        const UART_POLL_LIMIT: PollLimit = PollLimit::Unbounded;
        const CALIBRATION_POLL_LIMIT: PollLimit = PollLimit::Unbounded;
    } else {
        use uart_driver::UART_DEFAULT_POLL_ITERATIONS;

        const UART_POLL_LIMIT: PollLimit = PollLimit::Iterations(UART_DEFAULT_POLL_ITERATIONS);
        const CALIBRATION_POLL_LIMIT: PollLimit = PollLimit::Iterations(
            CALIBRATION_POLLS_PER_TICK * CHESHIRE_CORE_FREQ_CALIBRATION_TICKS as u32,
        );
    }
}

/// A register window: base address and size in bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Window {
    pub base: usize,
    pub size: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlatformConfig {
    pub sys_regs: Window,
    pub uart_regs: Window,
    pub clint_regs: Window,
    // RTC ticks the core clock is measured over.
    pub calibration_ticks: Ticks,
    pub calibration_poll_limit: PollLimit,
    pub uart: UartConfig,
}

impl PlatformConfig {
    pub const fn cheshire() -> Self {
        PlatformConfig {
            sys_regs: Window {
                base: CHESHIRE_REGS_BASE_ADDR,
                size: CHESHIRE_REGS_SIZE_BYTES,
            },
            uart_regs: Window {
                base: CHESHIRE_UART_BASE_ADDR,
                size: CHESHIRE_UART_SIZE_BYTES,
            },
            clint_regs: Window {
                base: CHESHIRE_CLINT_BASE_ADDR,
                size: CHESHIRE_CLINT_SIZE_BYTES,
            },
            calibration_ticks: CHESHIRE_CORE_FREQ_CALIBRATION_TICKS,
            calibration_poll_limit: CALIBRATION_POLL_LIMIT,
            uart: UartConfig::boot().with_poll_limit(UART_POLL_LIMIT),
        }
    }

    /// Same board with a different polling policy everywhere.
    pub const fn with_poll_limit(self, poll_limit: PollLimit) -> Self {
        PlatformConfig {
            calibration_poll_limit: poll_limit,
            uart: self.uart.with_poll_limit(poll_limit),
            ..self
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self { Self::cheshire() }
}

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

//! Derives the core clock frequency by timing the core against the RTC.
//!
//! The RTC frequency is published by the SoC control block; the core
//! frequency is not, so it is measured: count `mcycle` while `mtime`
//! (driven by the RTC) advances a fixed number of ticks, then scale.
//!
//! ```text
//!   core_hz = (end_mcycle - start_mcycle) * rtc_hz / (end_mtime - start_mtime)
//! ```

#![cfg_attr(not(test), no_std)]

mod clint;
#[cfg(any(test, feature = "fake"))]
mod fake;

use cfg_if::cfg_if;
use log::{error, info};
use mmio_register::{spin_until, RegisterAccess};
use num_enum::{FromPrimitive, IntoPrimitive};
use reg_constants::cheshire::CHESHIRE_RTC_FREQ_REG_OFFSET;

pub use clint::Clint;
#[cfg(any(test, feature = "fake"))]
pub use fake::FakeTimebase;
pub use mmio_register::PollLimit;

cfg_if! {
    if #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))] {
        mod arch;
        pub use arch::{read_mcycle, MachineTimebase};
    }
}

pub type Ticks = u64;
pub type Cycles = u64;

/// The two free-running counters the measurement compares.
pub trait Timebase {
    // RTC-driven machine timer.
    fn mtime(&self) -> Ticks;
    // Core clock cycle counter.
    fn mcycle(&self) -> Cycles;
}

#[repr(usize)]
#[derive(Debug, Default, Eq, PartialEq, FromPrimitive, IntoPrimitive)]
pub enum ClockError {
    Success = 0,
    ZeroReference,
    ZeroTicks,
    CalibrationStalled,
    Overflow,
    #[default]
    UnknownError,
}
impl From<ClockError> for Result<(), ClockError> {
    fn from(err: ClockError) -> Result<(), ClockError> {
        if err == ClockError::Success {
            Ok(())
        } else {
            Err(err)
        }
    }
}

/// Reads the RTC frequency (Hz) from the SoC control block.
pub fn rtc_frequency<R: RegisterAccess>(regs: &R) -> u32 { regs.read32(CHESHIRE_RTC_FREQ_REG_OFFSET) }

/// Scales a cycle count measured over `ticks` of a `reference_hz` clock
/// to a frequency in Hz.
///
/// The product is formed in 128 bits so it cannot overflow; only a result
/// that does not fit in a u64 is an error.
pub fn scale_frequency(cycles: Cycles, ticks: Ticks, reference_hz: u32) -> Result<u64, ClockError> {
    if reference_hz == 0 {
        return Err(ClockError::ZeroReference);
    }
    if ticks == 0 {
        return Err(ClockError::ZeroTicks);
    }
    let freq = cycles as u128 * reference_hz as u128 / ticks as u128;
    u64::try_from(freq).or(Err(ClockError::Overflow))
}

/// Measures the core frequency over `num_ticks` ticks of the reference
/// clock.
///
/// Spins on `mtime` for the whole window, so with `PollLimit::Unbounded`
/// a stopped RTC hangs here forever.
pub fn core_frequency<T: Timebase + ?Sized>(
    timebase: &T,
    reference_hz: u32,
    num_ticks: Ticks,
    limit: PollLimit,
) -> Result<u64, ClockError> {
    if reference_hz == 0 {
        error!("reference clock reports 0 Hz");
        return Err(ClockError::ZeroReference);
    }
    if num_ticks == 0 {
        return Err(ClockError::ZeroTicks);
    }

    let start_mtime = timebase.mtime();
    let start_mcycle = timebase.mcycle();
    let mut end_mtime = start_mtime;
    spin_until(limit, || {
        end_mtime = timebase.mtime();
        end_mtime.wrapping_sub(start_mtime) >= num_ticks
    })
    .map_err(|stall| {
        error!("mtime did not advance {} ticks in {} polls", num_ticks, stall.polls);
        ClockError::CalibrationStalled
    })?;
    let end_mcycle = timebase.mcycle();

    let cycles = end_mcycle.wrapping_sub(start_mcycle);
    let ticks = end_mtime.wrapping_sub(start_mtime);
    let freq = scale_frequency(cycles, ticks, reference_hz)?;
    info!(
        "core clock {} Hz ({} cycles over {} ticks at {} Hz)",
        freq, cycles, ticks, reference_hz
    );
    Ok(freq)
}

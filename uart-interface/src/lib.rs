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

//! Types shared between the UART driver and its users.

#![no_std]

use num_enum::{FromPrimitive, IntoPrimitive};
use reg_constants::CHESHIRE_BOOT_BAUDRATE;

pub use mmio_register::PollLimit;

/// Polls spent waiting on a single status condition before giving up,
/// for the bounded policy used by [`UartConfig::boot`].
pub const UART_DEFAULT_POLL_ITERATIONS: u32 = 1_000_000;

#[repr(usize)]
#[derive(Debug, Default, Eq, PartialEq, FromPrimitive, IntoPrimitive)]
pub enum UartDriverError {
    Success = 0,
    // Configuration errors.
    BadBaudRate,
    BadDivisor,
    // Hardware stalls (bounded polling only).
    TxStalled,
    FlushStalled,
    #[default]
    UnknownError,
}
impl From<UartDriverError> for Result<(), UartDriverError> {
    fn from(err: UartDriverError) -> Result<(), UartDriverError> {
        if err == UartDriverError::Success {
            Ok(())
        } else {
            Err(err)
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Parity {
    None,
    Odd,
    Even,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StopBits {
    One,
    // 1.5 stop bits when DataBits::Five is selected.
    Two,
}

/// Everything `Uart::init` needs besides the input clock.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UartConfig {
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    // Hardware RTS/CTS flow control.
    pub auto_flow: bool,
    pub poll_limit: PollLimit,
}

impl UartConfig {
    /// 8N1 at the boot baud rate with auto-flow on and bounded polling.
    pub const fn boot() -> Self {
        UartConfig {
            baud_rate: CHESHIRE_BOOT_BAUDRATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            auto_flow: true,
            poll_limit: PollLimit::Iterations(UART_DEFAULT_POLL_ITERATIONS),
        }
    }

    pub const fn with_baud_rate(self, baud_rate: u32) -> Self {
        UartConfig { baud_rate, ..self }
    }

    pub const fn with_poll_limit(self, poll_limit: PollLimit) -> Self {
        UartConfig { poll_limit, ..self }
    }
}

impl Default for UartConfig {
    fn default() -> Self { Self::boot() }
}

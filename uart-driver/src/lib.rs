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

//! Polled driver for the 16550-compatible boot UART.
//!
//! There are no interrupts and no software buffering: every byte waits for
//! the transmit holding register to empty and is then written straight to
//! the hardware FIFO. [`Uart::init`] is the only way to obtain a [`Uart`],
//! so nothing can be written before the baud divisor is programmed.

#![cfg_attr(not(test), no_std)]

#[cfg(any(test, feature = "fake"))]
extern crate alloc;

#[cfg(any(test, feature = "fake"))]
mod fake;
mod uart;

use cfg_if::cfg_if;
use core::fmt;
use log::{debug, error};
use mmio_register::{spin_until, Field, RegisterAccess};
use reg_constants::uart::*;

pub use uart_interface::*;
#[cfg(any(test, feature = "fake"))]
pub use fake::FakeUart;

use uart::{Fcr, Ier, Lcr, Mcr, RxTrigger, WordLen};

const DIVISOR_LSB: Field = Field::new(UART_DLAB_BYTE_MASK, UART_DLAB_LSB_OFFSET);
const DIVISOR_MSB: Field = Field::new(UART_DLAB_BYTE_MASK, UART_DLAB_MSB_OFFSET);

/// Computes the baud divisor for a UART clocked at `core_freq` Hz.
///
/// divisor = core_freq / (16 * baud_rate), truncated. The latch is 16 bits
/// wide; zero or anything wider is a configuration error.
pub fn compute_divisor(core_freq: u64, baud_rate: u32) -> Result<u16, UartDriverError> {
    if baud_rate == 0 {
        return Err(UartDriverError::BadBaudRate);
    }
    let divisor = core_freq / (UART_OVERSAMPLING * baud_rate as u64);
    match u16::try_from(divisor) {
        Ok(0) | Err(_) => Err(UartDriverError::BadDivisor),
        Ok(divisor) => Ok(divisor),
    }
}

fn line_control(config: &UartConfig) -> Lcr {
    let word_len = match config.data_bits {
        DataBits::Five => WordLen::Bits5,
        DataBits::Six => WordLen::Bits6,
        DataBits::Seven => WordLen::Bits7,
        DataBits::Eight => WordLen::Bits8,
    };
    Lcr::new()
        .with_word_len(word_len)
        .with_two_stop_bits(config.stop_bits == StopBits::Two)
        .with_parity_enable(config.parity != Parity::None)
        .with_even_parity(config.parity == Parity::Even)
}

cfg_if! {
    if #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))] {
        // Orders prior device writes before the status reads that follow.
        #[inline(always)]
        fn io_fence() { unsafe { core::arch::asm!("fence iorw, iorw") } }
    } else {
        #[inline(always)]
        fn io_fence() { core::sync::atomic::fence(core::sync::atomic::Ordering::SeqCst) }
    }
}

/// An initialized UART. Owns its register window; not `Clone`.
pub struct Uart<R: RegisterAccess> {
    regs: R,
    config: UartConfig,
    divisor: u16,
}

impl<R: RegisterAccess> Uart<R> {
    /// Programs the divisor latch, line format, FIFOs and flow control.
    pub fn init(mut regs: R, core_freq: u64, config: &UartConfig) -> Result<Self, UartDriverError> {
        let divisor = compute_divisor(core_freq, config.baud_rate).map_err(|err| {
            error!(
                "cannot derive divisor from {} Hz for {} baud: {:?}",
                core_freq, config.baud_rate, err
            );
            err
        })?;
        debug!("core {} Hz, {} baud, divisor {}", core_freq, config.baud_rate, divisor);

        uart::set_ier(&mut regs, Ier::new());
        uart::set_lcr(&mut regs, Lcr::new().with_dlab(true));
        uart::set_dll(&mut regs, DIVISOR_LSB.get(divisor as u32) as u8);
        uart::set_dlm(&mut regs, DIVISOR_MSB.get(divisor as u32) as u8);
        uart::set_lcr(&mut regs, line_control(config));
        uart::set_fcr(
            &mut regs,
            Fcr::new()
                .with_enable(true)
                .with_rx_reset(true)
                .with_tx_reset(true)
                .with_rx_trigger(RxTrigger::Bytes14),
        );
        uart::set_mcr(&mut regs, Mcr::new().with_auto_flow(config.auto_flow));

        Ok(Uart {
            regs,
            config: *config,
            divisor,
        })
    }

    pub fn divisor(&self) -> u16 { self.divisor }

    pub fn config(&self) -> &UartConfig { &self.config }

    pub fn set_poll_limit(&mut self, poll_limit: PollLimit) { self.config.poll_limit = poll_limit; }

    pub fn regs(&self) -> &R { &self.regs }

    /// Gives up the UART and returns its register window.
    pub fn into_inner(self) -> R { self.regs }

    /// Waits for room in the transmit FIFO and queues one byte.
    pub fn write_byte(&mut self, byte: u8) -> Result<(), UartDriverError> {
        let regs = &self.regs;
        spin_until(self.config.poll_limit, || uart::get_lsr(regs).thr_empty()).map_err(
            |stall| {
                error!("tx stalled after {} polls", stall.polls);
                UartDriverError::TxStalled
            },
        )?;
        uart::set_thr(&mut self.regs, byte);
        Ok(())
    }

    /// Queues `bytes` in order, one at a time. An empty slice touches no
    /// registers.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), UartDriverError> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), UartDriverError> { self.write(s.as_bytes()) }

    /// Blocks until the FIFO is empty and the last stop bit has left the
    /// transmitter.
    pub fn flush(&mut self) -> Result<(), UartDriverError> {
        io_fence();
        let regs = &self.regs;
        spin_until(self.config.poll_limit, || {
            let lsr = uart::get_lsr(regs);
            lsr.thr_empty() && lsr.tmit_empty()
        })
        .map_err(|stall| {
            error!("flush stalled after {} polls", stall.polls);
            UartDriverError::FlushStalled
        })?;
        Ok(())
    }
}

impl<R: RegisterAccess> fmt::Write for Uart<R> {
    fn write_str(&mut self, s: &str) -> fmt::Result { self.write(s.as_bytes()).or(Err(fmt::Error)) }
}

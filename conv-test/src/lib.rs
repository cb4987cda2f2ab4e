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


//! Cheshire bring-up diagnostic.
//!
//! Measures the core clock against the RTC, brings up the boot UART at
//! 115200 baud and prints the result of a fixed 3x3 convolution:
//!
//! ```text
//! The result of the convolution is: 165\r\n
//! ```
//!
//! On the board `main` is called by the C runtime and its return value is
//! the exit status. Everything else builds on the host so the whole
//! sequence can be exercised against fakes.

#![cfg_attr(target_os = "none", no_std)]

pub mod convolution;
pub mod logger;
pub mod platform;

use cfg_if::cfg_if;
use clock_resolver::{core_frequency, rtc_frequency, ClockError, Timebase};
use core::fmt;
use log::info;
use mmio_register::RegisterAccess;
use uart_driver::{Uart, UartDriverError};

pub use convolution::{convolution3x3, format_decimal, Decimal, Matrix3, MATRIX_A, MATRIX_B};
pub use logger::{BootLogger, BOOT_LOGGER};
pub use platform::{PlatformConfig, Window};

pub const LABEL: &str = "The result of the convolution is: ";
pub const LINE_END: &[u8] = b"\r\n";

#[derive(Debug, Eq, PartialEq)]
pub enum DiagnosticError {
    Clock(ClockError),
    Uart(UartDriverError),
    // Result did not fit the payload buffer.
    Format,
}

impl From<ClockError> for DiagnosticError {
    fn from(err: ClockError) -> Self { DiagnosticError::Clock(err) }
}

impl From<UartDriverError> for DiagnosticError {
    fn from(err: UartDriverError) -> Self { DiagnosticError::Uart(err) }
}

impl From<fmt::Error> for DiagnosticError {
    fn from(_err: fmt::Error) -> Self { DiagnosticError::Format }
}

impl DiagnosticError {
    /// Process exit status reported for this failure.
    pub fn exit_code(&self) -> i32 { 1 }
}

fn transmit<R: RegisterAccess>(uart: &mut Uart<R>, payload: &[u8]) -> Result<(), UartDriverError> {
    uart.write_str(LABEL)?;
    uart.write(payload)?;
    uart.write(LINE_END)
}

/// Runs the diagnostic end to end and returns the UART it printed on.
///
/// The output is flushed even when a write fails; the first error wins.
pub fn run_diagnostic<S, U, T>(
    sys_regs: &S,
    uart_regs: U,
    timebase: &T,
    platform: &PlatformConfig,
) -> Result<Uart<U>, DiagnosticError>
where
    S: RegisterAccess,
    U: RegisterAccess,
    T: Timebase + ?Sized,
{
    let rtc_hz = rtc_frequency(sys_regs);
    let core_hz = core_frequency(
        timebase,
        rtc_hz,
        platform.calibration_ticks,
        platform.calibration_poll_limit,
    )?;
    let mut uart = Uart::init(uart_regs, core_hz, &platform.uart)?;

    let result = convolution3x3(&MATRIX_A, &MATRIX_B);
    let payload = format_decimal(result)?;
    info!("convolution result {}", result);

    let written = transmit(&mut uart, payload.as_bytes());
    let flushed = uart.flush();
    written?;
    flushed?;
    Ok(uart)
}

cfg_if! {
    if #[cfg(all(target_os = "none", any(target_arch = "riscv32", target_arch = "riscv64")))] {
        use clock_resolver::{Clint, MachineTimebase};
        use mmio_register::MmioRegion;

        #[no_mangle]
        pub extern "C" fn main() -> i32 {
            logger::init(log::LevelFilter::Debug);

            let platform = PlatformConfig::cheshire();
            // SAFETY: each window comes from the Cheshire memory map and is
            // claimed exactly once, here.
            let (sys_regs, uart_regs, clint_regs) = unsafe {
                (
                    MmioRegion::new(platform.sys_regs.base, platform.sys_regs.size),
                    MmioRegion::new(platform.uart_regs.base, platform.uart_regs.size),
                    MmioRegion::new(platform.clint_regs.base, platform.clint_regs.size),
                )
            };
            let timebase = MachineTimebase::new(Clint::new(clint_regs));

            match run_diagnostic(&sys_regs, uart_regs, &timebase, &platform) {
                Ok(_) => 0,
                Err(err) => {
                    log::error!("diagnostic failed: {:?}", err);
                    err.exit_code()
                }
            }
        }

        #[inline(never)]
        #[panic_handler]
        fn panic(info: &core::panic::PanicInfo) -> ! {
            use core::sync::atomic::{self, Ordering};

            log::error!("{}", info);
            loop {
                atomic::compiler_fence(Ordering::SeqCst);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clock_resolver::FakeTimebase;
    use mmio_register::{PollLimit, ScratchRegion};
    use reg_constants::cheshire::CHESHIRE_RTC_FREQ_REG_OFFSET;
    use uart_driver::FakeUart;

    type SysRegs = ScratchRegion<32>;

    fn sys_regs(rtc_hz: u32) -> SysRegs { SysRegs::new().with(CHESHIRE_RTC_FREQ_REG_OFFSET, rtc_hz) }

    #[test]
    fn label_is_sent_whole() {
        assert_eq!(LABEL.len(), 34);
        assert!(LABEL.ends_with(": "));
    }

    #[test]
    fn error_conversions() {
        assert_eq!(
            DiagnosticError::from(ClockError::ZeroReference),
            DiagnosticError::Clock(ClockError::ZeroReference)
        );
        assert_eq!(
            DiagnosticError::from(UartDriverError::TxStalled),
            DiagnosticError::Uart(UartDriverError::TxStalled)
        );
        assert_eq!(DiagnosticError::from(fmt::Error), DiagnosticError::Format);
        assert_eq!(DiagnosticError::Format.exit_code(), 1);
    }

    #[test]
    fn prints_one_line() {
        let mut fake = FakeUart::new();
        let uart = run_diagnostic(
            &sys_regs(1_000_000),
            &mut fake,
            &FakeTimebase::new(50),
            &PlatformConfig::cheshire(),
        )
        .unwrap();
        assert_eq!(uart.divisor(), 27);
        drop(uart);
        assert_eq!(fake.transmitted(), b"The result of the convolution is: 165\r\n");
        assert!(fake.is_idle());
    }

    #[test]
    fn zero_rtc_touches_no_uart_register() {
        let mut fake = FakeUart::new();
        let err = run_diagnostic(
            &sys_regs(0),
            &mut fake,
            &FakeTimebase::new(50),
            &PlatformConfig::cheshire(),
        )
        .err();
        assert_eq!(err, Some(DiagnosticError::Clock(ClockError::ZeroReference)));
        assert_eq!(fake.writes(), 0);
        assert_eq!(fake.reads(), 0);
    }

    #[test]
    fn stuck_transmitter_still_flushes() {
        let mut fake = FakeUart::new();
        fake.set_stuck(true);
        let timebase = FakeTimebase::new(50);
        let platform = PlatformConfig {
            calibration_poll_limit: PollLimit::Unbounded,
            ..PlatformConfig::cheshire().with_poll_limit(PollLimit::Iterations(8))
        };
        let err = run_diagnostic(&sys_regs(1_000_000), &mut fake, &timebase, &platform).err();
        assert_eq!(err, Some(DiagnosticError::Uart(UartDriverError::TxStalled)));
        // One bounded wait for the first byte, one for the flush.
        assert_eq!(fake.lsr_polls(), 16);
        assert!(fake.transmitted().is_empty());
    }
}

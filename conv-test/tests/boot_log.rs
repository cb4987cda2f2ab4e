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


// The diagnostic's log records land in the boot ring, never on the UART.

use clock_resolver::FakeTimebase;
use conv_test::{logger, run_diagnostic, PlatformConfig, BOOT_LOGGER};
use mmio_register::ScratchRegion;
use reg_constants::cheshire::CHESHIRE_RTC_FREQ_REG_OFFSET;
use uart_driver::FakeUart;

#[test]
fn records_go_to_ring() {
    logger::init(log::LevelFilter::Info);

    let sys_regs = ScratchRegion::<32>::new().with(CHESHIRE_RTC_FREQ_REG_OFFSET, 1_000_000);
    let mut fake = FakeUart::new();
    run_diagnostic(&sys_regs, &mut fake, &FakeTimebase::new(50), &PlatformConfig::cheshire())
        .expect("diagnostic");
    assert_eq!(fake.transmitted(), b"The result of the convolution is: 165\r\n");

    let mut out = [0u8; logger::LOG_RING_SIZE];
    let n = BOOT_LOGGER.drain(&mut out);
    let text = core::str::from_utf8(&out[..n]).expect("utf8");
    assert!(text.contains("clock_resolver::core clock 50000000 Hz"), "{}", text);
    assert!(text.contains("conv_test::convolution result 165\n"), "{}", text);
    assert_eq!(BOOT_LOGGER.discarded(), 0);
}

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

// Cheshire platform definitions (base addresses and boot parameters).

// SoC control registers (scratch, boot mode, RTC frequency, ...).
pub const CHESHIRE_REGS_BASE_ADDR: usize = 0x0300_0000;
pub const CHESHIRE_REGS_SIZE_BYTES: usize = 0x1000;

// 16550-compatible boot UART.
pub const CHESHIRE_UART_BASE_ADDR: usize = 0x0300_2000;
pub const CHESHIRE_UART_SIZE_BYTES: usize = 0x1000;

// Core-local interruptor (mtime/mtimecmp/msip).
pub const CHESHIRE_CLINT_BASE_ADDR: usize = 0x0204_0000;
pub const CHESHIRE_CLINT_SIZE_BYTES: usize = 0x1_0000;

// Baud rate used by the boot ROM and all bring-up tests.
pub const CHESHIRE_BOOT_BAUDRATE: u32 = 115_200;

// Number of RTC ticks sampled when measuring the core clock.
pub const CHESHIRE_CORE_FREQ_CALIBRATION_TICKS: u64 = 2500;

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

// SoC control register block.

pub const CHESHIRE_PARAM_REG_WIDTH: u32 = 32;

pub const CHESHIRE_SCRATCH_0_REG_OFFSET: usize = 0x0;
pub const CHESHIRE_SCRATCH_MULTIREG_COUNT: usize = 16;

pub const CHESHIRE_BOOT_MODE_REG_OFFSET: usize = 0x40;
pub const CHESHIRE_BOOT_MODE_BOOT_MODE_MASK: u32 = 0x3;
pub const CHESHIRE_BOOT_MODE_BOOT_MODE_OFFSET: usize = 0;

// Frequency (Hz) of the real-time clock driving the CLINT mtime counter.
pub const CHESHIRE_RTC_FREQ_REG_OFFSET: usize = 0x44;

pub const CHESHIRE_PLATFORM_ROM_REG_OFFSET: usize = 0x48;
pub const CHESHIRE_HW_FEATURES_REG_OFFSET: usize = 0x4c;
pub const CHESHIRE_LLC_SIZE_REG_OFFSET: usize = 0x50;
pub const CHESHIRE_VGA_PARAMS_REG_OFFSET: usize = 0x54;

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

// RISC-V CLINT (single hart).

pub const CLINT_MSIP_REG_OFFSET: usize = 0x0;
pub const CLINT_MTIMECMP_LOW_REG_OFFSET: usize = 0x4000;
pub const CLINT_MTIMECMP_HIGH_REG_OFFSET: usize = 0x4004;
pub const CLINT_MTIME_LOW_REG_OFFSET: usize = 0xbff8;
pub const CLINT_MTIME_HIGH_REG_OFFSET: usize = 0xbffc;

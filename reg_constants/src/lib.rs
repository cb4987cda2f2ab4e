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

//! Memory map of the Cheshire SoC as seen by bare-metal software.
//!
//! Offsets are byte offsets from the base of each block. Every register
//! is 32 bits wide and 32-bit aligned.

#![no_std]

use cfg_if::cfg_if;

pub mod cheshire;
pub mod clint;
pub mod uart;

cfg_if! {
    if #[cfg(feature = "CONFIG_PLAT_CHESHIRE")] {
        mod plat_cheshire;
        pub use plat_cheshire::*;
    } else {
        compile_error!("reg_constants: no platform selected");
    }
}

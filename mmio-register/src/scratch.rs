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

// Plain-memory stand-in for a register block.

use crate::RegisterAccess;

/// A register window backed by ordinary memory: reads return whatever was
/// last written. Good enough for configuration blocks whose registers do
/// not change underneath software.
#[derive(Clone, Debug, PartialEq)]
pub struct ScratchRegion<const WORDS: usize> {
    words: [u32; WORDS],
}

impl<const WORDS: usize> ScratchRegion<WORDS> {
    pub const fn new() -> Self { ScratchRegion { words: [0; WORDS] } }

    /// Presets the register at `offset`.
    pub fn with(mut self, offset: usize, value: u32) -> Self {
        self.write32(offset, value);
        self
    }

    fn index(offset: usize) -> usize {
        assert!(offset % 4 == 0, "unaligned register offset {:#x}", offset);
        assert!(offset / 4 < WORDS, "register offset {:#x} outside window", offset);
        offset / 4
    }
}

impl<const WORDS: usize> Default for ScratchRegion<WORDS> {
    fn default() -> Self { Self::new() }
}

impl<const WORDS: usize> RegisterAccess for ScratchRegion<WORDS> {
    fn read32(&self, offset: usize) -> u32 { self.words[Self::index(offset)] }

    fn write32(&mut self, offset: usize, value: u32) { self.words[Self::index(offset)] = value; }
}

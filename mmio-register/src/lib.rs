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

//! Helpers to read/write MMIO registers.
//!
//! Everything above this crate talks to hardware through [`RegisterAccess`]
//! using named offsets from `reg_constants`; only [`MmioRegion`] turns an
//! offset into a pointer.

#![cfg_attr(not(test), no_std)]

mod poll;
#[cfg(any(test, feature = "fake"))]
mod scratch;

pub use poll::{spin_until, PollLimit, Stalled};
#[cfg(any(test, feature = "fake"))]
pub use scratch::ScratchRegion;

/// 32-bit register access at byte offsets within one peripheral window.
///
/// Reads are not assumed to be idempotent: status and timer registers may
/// change between two reads of the same offset.
pub trait RegisterAccess {
    fn read32(&self, offset: usize) -> u32;
    fn write32(&mut self, offset: usize, value: u32);
}

impl<T: RegisterAccess + ?Sized> RegisterAccess for &mut T {
    fn read32(&self, offset: usize) -> u32 { (**self).read32(offset) }
    fn write32(&mut self, offset: usize, value: u32) { (**self).write32(offset, value) }
}

/// A memory-mapped device window.
///
/// Holds a raw pointer, so it is neither `Send` nor `Sync`; whoever owns
/// the region is the only writer of that device.
pub struct MmioRegion {
    base: *mut u8,
    size: usize,
}

impl MmioRegion {
    /// Creates a window over `size` bytes of device registers at `base`.
    ///
    /// # Safety
    ///
    /// `base..base + size` must be a device block listed in the platform
    /// memory map, identity-mapped and accessible with 32-bit loads and
    /// stores, and no other `MmioRegion` may cover it.
    pub const unsafe fn new(base: usize, size: usize) -> Self {
        MmioRegion {
            base: base as *mut u8,
            size,
        }
    }

    pub fn base(&self) -> usize { self.base as usize }

    pub fn size(&self) -> usize { self.size }

    fn reg(&self, offset: usize) -> *mut u32 {
        debug_assert!(
            offset % 4 == 0 && offset + 4 <= self.size,
            "register offset {:#x} outside {:#x}-byte window",
            offset,
            self.size
        );
        // NB: in bounds of the window promised to new().
        unsafe { self.base.add(offset).cast::<u32>() }
    }
}

impl RegisterAccess for MmioRegion {
    fn read32(&self, offset: usize) -> u32 { unsafe { self.reg(offset).read_volatile() } }

    fn write32(&mut self, offset: usize, value: u32) {
        unsafe { self.reg(offset).write_volatile(value) }
    }
}

/// A bit field inside a 32-bit register.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Field {
    mask: u32,
    offset: usize,
}

impl Field {
    pub const fn new(mask: u32, offset: usize) -> Self { Field { mask, offset } }

    /// Extracts the field from a register value.
    pub const fn get(&self, reg: u32) -> u32 { (reg >> self.offset) & self.mask }

    /// Returns `reg` with the field replaced by `value`, truncated to the mask.
    pub const fn set(&self, reg: u32, value: u32) -> u32 {
        (reg & !(self.mask << self.offset)) | ((value & self.mask) << self.offset)
    }
}

pub const fn bit(x: u32) -> u32 { 1 << x }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mmio_region_reads_and_writes_words() {
        let mut backing = [0u32; 8];
        let mut region =
            unsafe { MmioRegion::new(backing.as_mut_ptr() as usize, backing.len() * 4) };
        region.write32(0x0, 0xdead_beef);
        region.write32(0x1c, 0x1234_5678);
        assert_eq!(region.read32(0x0), 0xdead_beef);
        assert_eq!(region.read32(0x1c), 0x1234_5678);
        assert_eq!(region.read32(0x4), 0);
        assert_eq!(backing[0], 0xdead_beef);
        assert_eq!(backing[7], 0x1234_5678);
    }

    #[test]
    #[should_panic]
    fn mmio_region_rejects_offset_past_window() {
        let mut backing = [0u32; 2];
        let region = unsafe { MmioRegion::new(backing.as_mut_ptr() as usize, 8) };
        region.read32(0x8);
    }

    fn poke<R: RegisterAccess>(mut regs: R) -> u32 {
        regs.write32(0x4, 7);
        regs.read32(0x4)
    }

    #[test]
    fn mut_ref_forwards() {
        let mut scratch = ScratchRegion::<4>::new();
        assert_eq!(poke(&mut scratch), 7);
        assert_eq!(scratch.read32(0x4), 7);
    }

    #[test]
    fn field_get_set() {
        let lsb = Field::new(0xff, 0);
        let msb = Field::new(0xff, 8);
        assert_eq!(lsb.get(0x1234), 0x34);
        assert_eq!(msb.get(0x1234), 0x12);
        assert_eq!(msb.set(0xffff_0034, 0x12), 0xffff_1234);
        // Values wider than the field are truncated.
        assert_eq!(lsb.set(0, 0x1ff), 0xff);
    }

    #[test]
    fn bits() {
        assert_eq!(bit(0), 1);
        assert_eq!(bit(5), 0x20);
        assert_eq!(bit(31), 0x8000_0000);
    }
}

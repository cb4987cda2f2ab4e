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

// Deterministic Timebase for host-side tests.

use crate::{Cycles, Ticks, Timebase};
use core::cell::Cell;

/// A core running a fixed number of cycles per RTC tick.
///
/// Every `mtime` read returns the current tick and then advances time by
/// one tick, unless frozen. `mcycle` reports the cycles elapsed up to the
/// current tick.
#[derive(Debug)]
pub struct FakeTimebase {
    now: Cell<Ticks>,
    cycles_per_tick: Cycles,
    frozen: Cell<bool>,
    mtime_reads: Cell<usize>,
}

impl FakeTimebase {
    pub fn new(cycles_per_tick: Cycles) -> Self { Self::starting_at(0, cycles_per_tick) }

    pub fn starting_at(now: Ticks, cycles_per_tick: Cycles) -> Self {
        FakeTimebase {
            now: Cell::new(now),
            cycles_per_tick,
            frozen: Cell::new(false),
            mtime_reads: Cell::new(0),
        }
    }

    /// Stops (or restarts) the RTC.
    pub fn set_frozen(&self, frozen: bool) { self.frozen.set(frozen); }

    pub fn mtime_reads(&self) -> usize { self.mtime_reads.get() }
}

impl Timebase for FakeTimebase {
    fn mtime(&self) -> Ticks {
        self.mtime_reads.set(self.mtime_reads.get() + 1);
        let now = self.now.get();
        if !self.frozen.get() {
            self.now.set(now.wrapping_add(1));
        }
        now
    }

    fn mcycle(&self) -> Cycles { self.now.get().wrapping_mul(self.cycles_per_tick) }
}

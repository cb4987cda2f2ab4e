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

// Busy-wait polling with an explicit give-up policy.

use log::trace;

/// How long a polling loop may spin before reporting a stall.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PollLimit {
    /// Spin until the condition holds, possibly forever.
    Unbounded,
    /// Evaluate the condition at most this many times.
    Iterations(u32),
}

/// A bounded poll gave up without observing its condition.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Stalled {
    pub polls: u32,
}

/// Spins until `ready` returns true and returns the number of polls taken.
///
/// `Iterations(0)` never evaluates `ready` and reports a stall immediately.
pub fn spin_until(limit: PollLimit, mut ready: impl FnMut() -> bool) -> Result<u32, Stalled> {
    let mut polls: u32 = 0;
    loop {
        if let PollLimit::Iterations(max) = limit {
            if polls >= max {
                trace!("gave up after {} polls", polls);
                return Err(Stalled { polls });
            }
        }
        polls = polls.saturating_add(1);
        if ready() {
            return Ok(polls);
        }
        core::hint::spin_loop();
    }
}

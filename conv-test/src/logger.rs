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


//! In-memory log sink for the boot diagnostic.
//!
//! The UART carries exactly one line of output, so log records go to a
//! byte ring instead. Each record is stored as `<target>::<msg>\n`; when
//! the ring is full the oldest bytes are overwritten. The ring can be
//! dumped from a debugger (`BOOT_LOGGER`) or drained by tests.

use circular_buffer::Buffer;
use core::sync::atomic::{AtomicUsize, Ordering};
use core2::io::{Cursor, Write};
use log::{LevelFilter, Metadata, Record};
use spin::Mutex;

pub const LOG_RING_SIZE: usize = 1024;
pub const MAX_MSG_LEN: usize = 160;

pub struct BootLogger {
    ring: Mutex<Buffer<LOG_RING_SIZE>>,
    discarded: AtomicUsize,
}

impl BootLogger {
    pub const fn new() -> Self {
        BootLogger {
            ring: Mutex::new(Buffer::new()),
            discarded: AtomicUsize::new(0),
        }
    }

    /// Moves buffered log bytes, oldest first, into `out`. Returns the
    /// number of bytes copied.
    pub fn drain(&self, out: &mut [u8]) -> usize { self.ring.lock().drain_into(out) }

    pub fn len(&self) -> usize { self.ring.lock().len() }

    pub fn is_empty(&self) -> bool { self.ring.lock().is_empty() }

    /// Bytes overwritten because the ring was full.
    pub fn discarded(&self) -> usize { self.discarded.load(Ordering::Relaxed) }
}

impl Default for BootLogger {
    fn default() -> Self { Self::new() }
}

impl log::Log for BootLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool { true }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut buf = [0u8; MAX_MSG_LEN];
        let mut cur = Cursor::new(&mut buf[..]);
        write!(&mut cur, "{}::{}\n", record.target(), record.args()).unwrap_or_else(|_| {
            // Too big, indicate overflow with a trailing "...".
            cur.set_position((MAX_MSG_LEN - 4) as u64);
            let _ = cur.write(b"...\n");
        });
        let pos = cur.position() as usize;

        // Re-entered from a panic raised while the ring is held.
        if let Some(mut ring) = self.ring.try_lock() {
            let discarded = ring.extend_overwrite(&buf[..pos]);
            self.discarded.fetch_add(discarded, Ordering::Relaxed);
        }
    }

    fn flush(&self) {}
}

pub static BOOT_LOGGER: BootLogger = BootLogger::new();

/// Installs `BOOT_LOGGER` as the global logger. Later calls only adjust
/// the level.
pub fn init(level: LevelFilter) {
    let _ = log::set_logger(&BOOT_LOGGER);
    log::set_max_level(level);
}

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

// Behavioral model of the 16550 transmit path for host-side tests.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use mmio_register::{bit, RegisterAccess};
use reg_constants::uart::*;

/// Stands in for the UART register window.
///
/// Each read of LSR advances the transmitter by one step: the shifter
/// puts its byte on the line, then loads the next byte from the FIFO.
/// THRE reads as set once the FIFO is empty, TEMT once the shifter is
/// idle as well. A stuck UART never advances and reports LSR as zero.
#[derive(Debug, Default)]
pub struct FakeUart {
    ier: u32,
    fcr: u32,
    lcr: u32,
    mcr: u32,
    scr: u32,
    dll: u8,
    dlm: u8,
    fifo: RefCell<VecDeque<u8>>,
    shifter: Cell<Option<u8>>,
    line: RefCell<Vec<u8>>,
    stuck: Cell<bool>,
    dropped: usize,
    reads: Cell<usize>,
    lsr_polls: Cell<usize>,
    write_log: Vec<(usize, u32)>,
}

impl FakeUart {
    pub fn new() -> Self { Self::default() }

    pub fn set_stuck(&self, stuck: bool) { self.stuck.set(stuck); }

    /// Bytes that have left the transmitter, in wire order.
    pub fn transmitted(&self) -> Vec<u8> { self.line.borrow().clone() }

    /// True when nothing is queued or being shifted out.
    pub fn is_idle(&self) -> bool { self.fifo.borrow().is_empty() && self.shifter.get().is_none() }

    pub fn divisor(&self) -> u16 { (self.dlm as u16) << 8 | self.dll as u16 }

    pub fn ier(&self) -> u32 { self.ier }
    pub fn fcr(&self) -> u32 { self.fcr }
    pub fn lcr(&self) -> u32 { self.lcr }
    pub fn mcr(&self) -> u32 { self.mcr }

    // Access counters.
    pub fn reads(&self) -> usize { self.reads.get() }
    pub fn writes(&self) -> usize { self.write_log.len() }
    pub fn lsr_polls(&self) -> usize { self.lsr_polls.get() }

    /// Bytes written to THR while the FIFO was full.
    pub fn dropped(&self) -> usize { self.dropped }

    /// Every register write as (offset, value), oldest first.
    pub fn write_log(&self) -> &[(usize, u32)] { &self.write_log }

    fn dlab(&self) -> bool { self.lcr & bit(UART_LINE_CONTROL_DLAB_BIT) != 0 }

    fn step(&self) {
        if let Some(byte) = self.shifter.take() {
            self.line.borrow_mut().push(byte);
        }
        self.shifter.set(self.fifo.borrow_mut().pop_front());
    }

    fn line_status(&self) -> u32 {
        if self.stuck.get() {
            return 0;
        }
        self.step();
        let mut lsr = 0;
        if self.fifo.borrow().is_empty() {
            lsr |= bit(UART_LINE_STATUS_THR_EMPTY_BIT);
            if self.shifter.get().is_none() {
                lsr |= bit(UART_LINE_STATUS_TMIT_EMPTY_BIT);
            }
        }
        lsr
    }
}

impl RegisterAccess for FakeUart {
    fn read32(&self, offset: usize) -> u32 {
        self.reads.set(self.reads.get() + 1);
        match offset {
            UART_RBR_REG_OFFSET => {
                if self.dlab() {
                    self.dll as u32
                } else {
                    0
                }
            }
            UART_INTR_ENABLE_REG_OFFSET => {
                if self.dlab() {
                    self.dlm as u32
                } else {
                    self.ier
                }
            }
            // No interrupt pending.
            UART_INTR_IDENT_REG_OFFSET => 0x01,
            UART_LINE_CONTROL_REG_OFFSET => self.lcr,
            UART_MODEM_CONTROL_REG_OFFSET => self.mcr,
            UART_LINE_STATUS_REG_OFFSET => {
                self.lsr_polls.set(self.lsr_polls.get() + 1);
                self.line_status()
            }
            UART_MODEM_STATUS_REG_OFFSET => 0,
            UART_SCRATCH_REG_OFFSET => self.scr,
            _ => panic!("read outside UART window: {:#x}", offset),
        }
    }

    fn write32(&mut self, offset: usize, value: u32) {
        self.write_log.push((offset, value));
        match offset {
            UART_THR_REG_OFFSET => {
                if self.dlab() {
                    self.dll = value as u8;
                } else if self.fifo.borrow().len() >= UART_FIFO_CAPACITY {
                    self.dropped += 1;
                } else {
                    self.fifo.borrow_mut().push_back((value & UART_DATA_MASK) as u8);
                }
            }
            UART_INTR_ENABLE_REG_OFFSET => {
                if self.dlab() {
                    self.dlm = value as u8;
                } else {
                    self.ier = value;
                }
            }
            UART_FIFO_CONTROL_REG_OFFSET => {
                self.fcr = value;
                if value & bit(UART_FIFO_CONTROL_TX_RESET_BIT) != 0 {
                    self.fifo.borrow_mut().clear();
                }
            }
            UART_LINE_CONTROL_REG_OFFSET => self.lcr = value,
            UART_MODEM_CONTROL_REG_OFFSET => self.mcr = value,
            UART_SCRATCH_REG_OFFSET => self.scr = value,
            // Read-only; writes are ignored by the hardware.
            UART_LINE_STATUS_REG_OFFSET | UART_MODEM_STATUS_REG_OFFSET => {}
            _ => panic!("write outside UART window: {:#x}", offset),
        }
    }
}

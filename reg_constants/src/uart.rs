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

// 16550-compatible UART, registers on a 4-byte stride.
//
// Offset 0x0 and 0x4 are banked: with LCR.DLAB set they address the
// divisor latch (DLL/DLM) instead of THR/RBR and IER.

pub const UART_RBR_REG_OFFSET: usize = 0x0;
pub const UART_THR_REG_OFFSET: usize = 0x0;
pub const UART_DLAB_LSB_REG_OFFSET: usize = 0x0;
pub const UART_INTR_ENABLE_REG_OFFSET: usize = 0x4;
pub const UART_DLAB_MSB_REG_OFFSET: usize = 0x4;
pub const UART_INTR_IDENT_REG_OFFSET: usize = 0x8;
pub const UART_FIFO_CONTROL_REG_OFFSET: usize = 0x8;
pub const UART_LINE_CONTROL_REG_OFFSET: usize = 0xc;
pub const UART_MODEM_CONTROL_REG_OFFSET: usize = 0x10;
pub const UART_LINE_STATUS_REG_OFFSET: usize = 0x14;
pub const UART_MODEM_STATUS_REG_OFFSET: usize = 0x18;
pub const UART_SCRATCH_REG_OFFSET: usize = 0x1c;

// Data registers carry one byte in bits [7:0].
pub const UART_DATA_MASK: u32 = 0xff;

// The divisor latch is split across DLL (low byte) and DLM (high byte).
pub const UART_DLAB_LSB_OFFSET: usize = 0;
pub const UART_DLAB_MSB_OFFSET: usize = 8;
pub const UART_DLAB_BYTE_MASK: u32 = 0xff;

// Receiver samples each bit 16 times; divisor = clk / (16 * baud).
pub const UART_OVERSAMPLING: u64 = 16;

pub const UART_INTR_ENABLE_RX_AVAIL_BIT: u32 = 0;
pub const UART_INTR_ENABLE_THR_EMPTY_BIT: u32 = 1;
pub const UART_INTR_ENABLE_RX_LINE_STATUS_BIT: u32 = 2;
pub const UART_INTR_ENABLE_MODEM_STATUS_BIT: u32 = 3;

pub const UART_FIFO_CONTROL_ENABLE_BIT: u32 = 0;
pub const UART_FIFO_CONTROL_RX_RESET_BIT: u32 = 1;
pub const UART_FIFO_CONTROL_TX_RESET_BIT: u32 = 2;
pub const UART_FIFO_CONTROL_DMA_MODE_BIT: u32 = 3;
pub const UART_FIFO_CONTROL_RX_TRIGGER_MASK: u32 = 0x3;
pub const UART_FIFO_CONTROL_RX_TRIGGER_OFFSET: usize = 6;
pub const UART_FIFO_CONTROL_RX_TRIGGER_VALUE_1: u32 = 0x0;
pub const UART_FIFO_CONTROL_RX_TRIGGER_VALUE_4: u32 = 0x1;
pub const UART_FIFO_CONTROL_RX_TRIGGER_VALUE_8: u32 = 0x2;
pub const UART_FIFO_CONTROL_RX_TRIGGER_VALUE_14: u32 = 0x3;

pub const UART_LINE_CONTROL_WORD_LEN_MASK: u32 = 0x3;
pub const UART_LINE_CONTROL_WORD_LEN_OFFSET: usize = 0;
pub const UART_LINE_CONTROL_WORD_LEN_VALUE_5: u32 = 0x0;
pub const UART_LINE_CONTROL_WORD_LEN_VALUE_6: u32 = 0x1;
pub const UART_LINE_CONTROL_WORD_LEN_VALUE_7: u32 = 0x2;
pub const UART_LINE_CONTROL_WORD_LEN_VALUE_8: u32 = 0x3;
pub const UART_LINE_CONTROL_STOP_BITS_BIT: u32 = 2;
pub const UART_LINE_CONTROL_PARITY_ENABLE_BIT: u32 = 3;
pub const UART_LINE_CONTROL_EVEN_PARITY_BIT: u32 = 4;
pub const UART_LINE_CONTROL_STICK_PARITY_BIT: u32 = 5;
pub const UART_LINE_CONTROL_BREAK_BIT: u32 = 6;
pub const UART_LINE_CONTROL_DLAB_BIT: u32 = 7;

pub const UART_MODEM_CONTROL_DTR_BIT: u32 = 0;
pub const UART_MODEM_CONTROL_RTS_BIT: u32 = 1;
pub const UART_MODEM_CONTROL_OUT1_BIT: u32 = 2;
pub const UART_MODEM_CONTROL_OUT2_BIT: u32 = 3;
pub const UART_MODEM_CONTROL_LOOPBACK_BIT: u32 = 4;
pub const UART_MODEM_CONTROL_AUTO_FLOW_BIT: u32 = 5;

pub const UART_LINE_STATUS_DATA_READY_BIT: u32 = 0;
pub const UART_LINE_STATUS_OVERRUN_ERR_BIT: u32 = 1;
pub const UART_LINE_STATUS_PARITY_ERR_BIT: u32 = 2;
pub const UART_LINE_STATUS_FRAMING_ERR_BIT: u32 = 3;
pub const UART_LINE_STATUS_BREAK_BIT: u32 = 4;
pub const UART_LINE_STATUS_THR_EMPTY_BIT: u32 = 5;
pub const UART_LINE_STATUS_TMIT_EMPTY_BIT: u32 = 6;
pub const UART_LINE_STATUS_FIFO_ERR_BIT: u32 = 7;

// Depth of the transmit and receive FIFOs.
pub const UART_FIFO_CAPACITY: usize = 16;

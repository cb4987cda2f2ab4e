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

// Helpers to read/write 16550 UART registers.

use mmio_register::RegisterAccess;
use modular_bitfield::prelude::*;
use reg_constants::uart::*;

fn to_reg(bytes: [u8; 4]) -> u32 { u32::from_le_bytes(bytes) }
fn from_reg(value: u32) -> [u8; 4] { value.to_le_bytes() }

// Interrupt Enable register (DLAB clear).
#[bitfield]
pub struct Ier {
    pub rx_avail: bool,
    pub thr_empty: bool,
    pub rx_line_status: bool,
    pub modem_status: bool,
    #[skip]
    __: B28,
}
pub fn set_ier<R: RegisterAccess>(regs: &mut R, ier: Ier) {
    regs.write32(UART_INTR_ENABLE_REG_OFFSET, to_reg(ier.into_bytes()))
}

// FIFO Control register (WO, shares its offset with IIR).
#[repr(u32)]
#[derive(BitfieldSpecifier, Debug, Eq, PartialEq)]
pub enum RxTrigger {
    Bytes1 = UART_FIFO_CONTROL_RX_TRIGGER_VALUE_1,
    Bytes4 = UART_FIFO_CONTROL_RX_TRIGGER_VALUE_4,
    Bytes8 = UART_FIFO_CONTROL_RX_TRIGGER_VALUE_8,
    Bytes14 = UART_FIFO_CONTROL_RX_TRIGGER_VALUE_14,
}
#[bitfield]
pub struct Fcr {
    pub enable: bool,
    pub rx_reset: bool,
    pub tx_reset: bool,
    pub dma_mode: bool,
    #[skip]
    __: B2,
    #[bits = 2]
    pub rx_trigger: RxTrigger,
    #[skip]
    __: B24,
}
pub fn set_fcr<R: RegisterAccess>(regs: &mut R, fcr: Fcr) {
    regs.write32(UART_FIFO_CONTROL_REG_OFFSET, to_reg(fcr.into_bytes()))
}

// Line Control register.
#[repr(u32)]
#[derive(BitfieldSpecifier, Debug, Eq, PartialEq)]
pub enum WordLen {
    Bits5 = UART_LINE_CONTROL_WORD_LEN_VALUE_5,
    Bits6 = UART_LINE_CONTROL_WORD_LEN_VALUE_6,
    Bits7 = UART_LINE_CONTROL_WORD_LEN_VALUE_7,
    Bits8 = UART_LINE_CONTROL_WORD_LEN_VALUE_8,
}
#[bitfield]
pub struct Lcr {
    #[bits = 2]
    pub word_len: WordLen,
    pub two_stop_bits: bool,
    pub parity_enable: bool,
    pub even_parity: bool,
    pub stick_parity: bool,
    pub set_break: bool,
    pub dlab: bool,
    #[skip]
    __: B24,
}
pub fn set_lcr<R: RegisterAccess>(regs: &mut R, lcr: Lcr) {
    regs.write32(UART_LINE_CONTROL_REG_OFFSET, to_reg(lcr.into_bytes()))
}

// Modem Control register.
#[bitfield]
pub struct Mcr {
    pub dtr: bool,
    pub rts: bool,
    pub out1: bool,
    pub out2: bool,
    pub loopback: bool,
    pub auto_flow: bool,
    #[skip]
    __: B26,
}
pub fn set_mcr<R: RegisterAccess>(regs: &mut R, mcr: Mcr) {
    regs.write32(UART_MODEM_CONTROL_REG_OFFSET, to_reg(mcr.into_bytes()))
}

// Line Status register (RO).
#[bitfield]
pub struct Lsr {
    pub data_ready: bool,
    pub overrun_err: bool,
    pub parity_err: bool,
    pub framing_err: bool,
    pub break_int: bool,
    pub thr_empty: bool,
    pub tmit_empty: bool,
    pub fifo_err: bool,
    #[skip]
    __: B24,
}
pub fn get_lsr<R: RegisterAccess>(regs: &R) -> Lsr {
    Lsr::from_bytes(from_reg(regs.read32(UART_LINE_STATUS_REG_OFFSET)))
}

// Divisor latch, only visible while LCR.DLAB is set.
pub fn set_dll<R: RegisterAccess>(regs: &mut R, lsb: u8) {
    regs.write32(UART_DLAB_LSB_REG_OFFSET, lsb as u32)
}
pub fn set_dlm<R: RegisterAccess>(regs: &mut R, msb: u8) {
    regs.write32(UART_DLAB_MSB_REG_OFFSET, msb as u32)
}

// Transmit Holding register (WO, DLAB clear).
pub fn set_thr<R: RegisterAccess>(regs: &mut R, byte: u8) {
    regs.write32(UART_THR_REG_OFFSET, byte as u32 & UART_DATA_MASK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmio_register::ScratchRegion;

    // Validate modular_bitfield defs against reg_constants.

    fn bit(x: u32) -> u32 { 1 << x }
    fn field(v: u32, mask: u32, shift: usize) -> u32 { (v & mask) << shift }

    #[test]
    fn ier() {
        assert_eq!(
            to_reg(Ier::new().with_rx_avail(true).into_bytes()),
            bit(UART_INTR_ENABLE_RX_AVAIL_BIT)
        );
        assert_eq!(
            to_reg(Ier::new().with_thr_empty(true).into_bytes()),
            bit(UART_INTR_ENABLE_THR_EMPTY_BIT)
        );
        assert_eq!(
            to_reg(Ier::new().with_rx_line_status(true).into_bytes()),
            bit(UART_INTR_ENABLE_RX_LINE_STATUS_BIT)
        );
        assert_eq!(
            to_reg(Ier::new().with_modem_status(true).into_bytes()),
            bit(UART_INTR_ENABLE_MODEM_STATUS_BIT)
        );
    }

    #[test]
    fn fcr() {
        assert_eq!(
            to_reg(Fcr::new().with_enable(true).into_bytes()),
            bit(UART_FIFO_CONTROL_ENABLE_BIT)
        );
        assert_eq!(
            to_reg(Fcr::new().with_rx_reset(true).into_bytes()),
            bit(UART_FIFO_CONTROL_RX_RESET_BIT)
        );
        assert_eq!(
            to_reg(Fcr::new().with_tx_reset(true).into_bytes()),
            bit(UART_FIFO_CONTROL_TX_RESET_BIT)
        );
        assert_eq!(
            to_reg(Fcr::new().with_dma_mode(true).into_bytes()),
            bit(UART_FIFO_CONTROL_DMA_MODE_BIT)
        );
        assert_eq!(
            to_reg(Fcr::new().with_rx_trigger(RxTrigger::Bytes8).into_bytes()),
            field(
                UART_FIFO_CONTROL_RX_TRIGGER_VALUE_8,
                UART_FIFO_CONTROL_RX_TRIGGER_MASK,
                UART_FIFO_CONTROL_RX_TRIGGER_OFFSET
            )
        );
        // Enable, clear both FIFOs, 14-byte receive threshold.
        assert_eq!(
            to_reg(
                Fcr::new()
                    .with_enable(true)
                    .with_rx_reset(true)
                    .with_tx_reset(true)
                    .with_rx_trigger(RxTrigger::Bytes14)
                    .into_bytes()
            ),
            0xc7
        );
    }

    #[test]
    fn lcr() {
        for (len, value) in [
            (WordLen::Bits5, UART_LINE_CONTROL_WORD_LEN_VALUE_5),
            (WordLen::Bits6, UART_LINE_CONTROL_WORD_LEN_VALUE_6),
            (WordLen::Bits7, UART_LINE_CONTROL_WORD_LEN_VALUE_7),
            (WordLen::Bits8, UART_LINE_CONTROL_WORD_LEN_VALUE_8),
        ] {
            assert_eq!(
                to_reg(Lcr::new().with_word_len(len).into_bytes()),
                field(
                    value,
                    UART_LINE_CONTROL_WORD_LEN_MASK,
                    UART_LINE_CONTROL_WORD_LEN_OFFSET
                )
            );
        }
        assert_eq!(
            to_reg(Lcr::new().with_two_stop_bits(true).into_bytes()),
            bit(UART_LINE_CONTROL_STOP_BITS_BIT)
        );
        assert_eq!(
            to_reg(Lcr::new().with_parity_enable(true).into_bytes()),
            bit(UART_LINE_CONTROL_PARITY_ENABLE_BIT)
        );
        assert_eq!(
            to_reg(Lcr::new().with_even_parity(true).into_bytes()),
            bit(UART_LINE_CONTROL_EVEN_PARITY_BIT)
        );
        assert_eq!(
            to_reg(Lcr::new().with_stick_parity(true).into_bytes()),
            bit(UART_LINE_CONTROL_STICK_PARITY_BIT)
        );
        assert_eq!(
            to_reg(Lcr::new().with_set_break(true).into_bytes()),
            bit(UART_LINE_CONTROL_BREAK_BIT)
        );
        assert_eq!(
            to_reg(Lcr::new().with_dlab(true).into_bytes()),
            bit(UART_LINE_CONTROL_DLAB_BIT)
        );
    }

    #[test]
    fn mcr() {
        assert_eq!(to_reg(Mcr::new().with_dtr(true).into_bytes()), bit(UART_MODEM_CONTROL_DTR_BIT));
        assert_eq!(to_reg(Mcr::new().with_rts(true).into_bytes()), bit(UART_MODEM_CONTROL_RTS_BIT));
        assert_eq!(
            to_reg(Mcr::new().with_out1(true).into_bytes()),
            bit(UART_MODEM_CONTROL_OUT1_BIT)
        );
        assert_eq!(
            to_reg(Mcr::new().with_out2(true).into_bytes()),
            bit(UART_MODEM_CONTROL_OUT2_BIT)
        );
        assert_eq!(
            to_reg(Mcr::new().with_loopback(true).into_bytes()),
            bit(UART_MODEM_CONTROL_LOOPBACK_BIT)
        );
        assert_eq!(
            to_reg(Mcr::new().with_auto_flow(true).into_bytes()),
            bit(UART_MODEM_CONTROL_AUTO_FLOW_BIT)
        );
    }

    #[test]
    fn lsr() {
        let regs = ScratchRegion::<8>::new().with(
            UART_LINE_STATUS_REG_OFFSET,
            bit(UART_LINE_STATUS_THR_EMPTY_BIT) | bit(UART_LINE_STATUS_TMIT_EMPTY_BIT),
        );
        let lsr = get_lsr(&regs);
        assert!(lsr.thr_empty());
        assert!(lsr.tmit_empty());
        assert!(!lsr.data_ready());
        assert!(!lsr.fifo_err());

        let regs = ScratchRegion::<8>::new().with(
            UART_LINE_STATUS_REG_OFFSET,
            bit(UART_LINE_STATUS_DATA_READY_BIT)
                | bit(UART_LINE_STATUS_OVERRUN_ERR_BIT)
                | bit(UART_LINE_STATUS_PARITY_ERR_BIT)
                | bit(UART_LINE_STATUS_FRAMING_ERR_BIT)
                | bit(UART_LINE_STATUS_BREAK_BIT)
                | bit(UART_LINE_STATUS_FIFO_ERR_BIT),
        );
        let lsr = get_lsr(&regs);
        assert!(lsr.data_ready());
        assert!(lsr.overrun_err());
        assert!(lsr.parity_err());
        assert!(lsr.framing_err());
        assert!(lsr.break_int());
        assert!(lsr.fifo_err());
        assert!(!lsr.thr_empty());
        assert!(!lsr.tmit_empty());
    }

    #[test]
    fn data_registers_carry_one_byte() {
        let mut regs = ScratchRegion::<8>::new();
        set_thr(&mut regs, b'A');
        assert_eq!(regs.read32(UART_THR_REG_OFFSET), b'A' as u32);
        set_dlm(&mut regs, 0x12);
        assert_eq!(regs.read32(UART_DLAB_MSB_REG_OFFSET), 0x12);
    }
}

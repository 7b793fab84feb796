//! CPU register file and the primitive operations commands build on.
//!
//! `State` is everything an instruction can touch: the six registers plus
//! the bus handle. Commands and addressing modes work exclusively through
//! this type; the driver owns it and hands out read-only snapshots.

use crate::bus::SharedBus;
use crate::byteutil;
use crate::flags::{Status, B, I, U};

/// Little-endian pointer loaded into PC on reset.
pub const RESET_VECTOR: u16 = 0xFFFC;
/// Little-endian pointer loaded into PC by BRK/IRQ.
pub const IRQ_VECTOR: u16 = 0xFFFE;

const STACK_BASE: u16 = 0x0100;
const INIT_STACK_PTR: u8 = 0xFD;
const INIT_STATUS: u8 = I | B | U;
const OPERAND_OFFSET: u16 = 1;

/// Registers and the bus handle, as seen by executing instructions.
pub struct State {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Processor status.
    pub p: Status,
    /// Stack pointer; the stack lives in page `0x01`.
    pub s: u8,
    /// Program counter.
    pub pc: u16,
    bus: SharedBus,
}

/// A copy of the register file. Mutating it does not affect the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub p: Status,
    pub s: u8,
    pub pc: u16,
}

impl State {
    /// Create a zeroed register file attached to `bus`.
    #[must_use]
    pub fn new(bus: SharedBus) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            p: Status(0),
            s: 0,
            pc: 0,
            bus,
        }
    }

    /// Restore the power-up register values and reload PC from the reset
    /// vector. The bus handle is kept.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.p = Status(INIT_STATUS);
        self.s = INIT_STACK_PTR;
        self.load_reset_vector();
    }

    /// Snapshot the register file.
    #[must_use]
    pub fn registers(&self) -> Registers {
        Registers {
            a: self.a,
            x: self.x,
            y: self.y,
            p: self.p,
            s: self.s,
            pc: self.pc,
        }
    }

    /// Read a byte through the bus.
    #[must_use]
    pub fn read(&self, addr: u16) -> u8 {
        self.bus.borrow_mut().read(addr)
    }

    /// Write a byte through the bus.
    pub fn write(&mut self, addr: u16, value: u8) {
        self.bus.borrow_mut().write(addr, value);
    }

    /// Read a little-endian word from `addr` and `addr + 1`.
    #[must_use]
    pub fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read(addr);
        let hi = self.read(addr.wrapping_add(1));
        byteutil::merge(hi, lo)
    }

    /// Read a little-endian word whose high byte comes from within the
    /// same page: a pointer at `0xXXFF` wraps to `0xXX00`.
    ///
    /// This is how the hardware fetches indirect-JMP targets and
    /// zero-page pointers.
    #[must_use]
    pub fn read_word_page_wrap(&self, addr: u16) -> u16 {
        let lo = self.read(addr);
        let hi = self.read(byteutil::increment_low(addr));
        byteutil::merge(hi, lo)
    }

    /// Load PC from the reset vector.
    pub fn load_reset_vector(&mut self) {
        self.pc = self.read_word(RESET_VECTOR);
    }

    /// Load PC from the IRQ/BRK vector.
    pub fn load_irq_vector(&mut self) {
        self.pc = self.read_word(IRQ_VECTOR);
    }

    /// Address of the byte following the current opcode.
    #[must_use]
    pub fn operand_addr(&self) -> u16 {
        self.pc.wrapping_add(OPERAND_OFFSET)
    }

    /// Read the one-byte operand of the current instruction.
    #[must_use]
    pub fn read_operand(&self) -> u8 {
        self.read(self.operand_addr())
    }

    /// Read the two-byte little-endian operand of the current instruction.
    #[must_use]
    pub fn read_operand_word(&self) -> u16 {
        self.read_word(self.operand_addr())
    }

    /// Read the opcode byte at PC.
    #[must_use]
    pub fn read_opcode(&self) -> u8 {
        self.read(self.pc)
    }

    /// Push a byte onto the stack.
    pub fn push(&mut self, value: u8) {
        self.write(self.stack_addr(), value);
        self.s = self.s.wrapping_sub(1);
    }

    /// Push a word onto the stack, high byte first.
    pub fn push_word(&mut self, value: u16) {
        self.push(byteutil::high(value));
        self.push(byteutil::low(value));
    }

    /// Pull a byte from the stack.
    #[must_use]
    pub fn pull(&mut self) -> u8 {
        self.s = self.s.wrapping_add(1);
        self.read(self.stack_addr())
    }

    /// Pull a word from the stack, low byte first.
    #[must_use]
    pub fn pull_word(&mut self) -> u16 {
        let lo = self.pull();
        let hi = self.pull();
        byteutil::merge(hi, lo)
    }

    fn stack_addr(&self) -> u16 {
        STACK_BASE | u16::from(self.s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{shared, TestBus};

    const ADDRESS: u16 = 0xCAFE;
    const VALUE: u8 = 0xC7;
    const WORD: u16 = 0x2F9C;
    const WORD_HI: u8 = 0x2F;
    const WORD_LO: u8 = 0x9C;

    fn state_with(entries: &[(u16, u8)]) -> State {
        State::new(shared(TestBus::with(entries)))
    }

    #[test]
    fn operand_addr_follows_pc() {
        let mut s = state_with(&[]);
        s.pc = ADDRESS;
        assert_eq!(s.operand_addr(), ADDRESS + 1);
    }

    #[test]
    fn reads_byte_through_bus() {
        let s = state_with(&[(ADDRESS, VALUE)]);
        assert_eq!(s.read(ADDRESS), VALUE);
    }

    #[test]
    fn read_word_crosses_page_boundary() {
        let s = state_with(&[(0xCAFF, WORD_LO), (0xCB00, WORD_HI)]);
        assert_eq!(s.read_word(0xCAFF), WORD);
    }

    #[test]
    fn read_word_page_wrap_stays_in_page() {
        let s = state_with(&[(0xCAFF, WORD_LO), (0xCA00, WORD_HI)]);
        assert_eq!(s.read_word_page_wrap(0xCAFF), WORD);
    }

    #[test]
    fn reads_opcode_and_operands_relative_to_pc() {
        let mut s = state_with(&[
            (ADDRESS, 0xEA),
            (ADDRESS + 1, WORD_LO),
            (ADDRESS + 2, WORD_HI),
        ]);
        s.pc = ADDRESS;
        assert_eq!(s.read_opcode(), 0xEA);
        assert_eq!(s.read_operand(), WORD_LO);
        assert_eq!(s.read_operand_word(), WORD);
    }

    #[test]
    fn load_vectors_into_pc() {
        let mut s = state_with(&[
            (RESET_VECTOR, 0x50),
            (RESET_VECTOR + 1, 0x10),
            (IRQ_VECTOR, 0x60),
            (IRQ_VECTOR + 1, 0x10),
        ]);
        s.load_reset_vector();
        assert_eq!(s.pc, 0x1050);
        s.load_irq_vector();
        assert_eq!(s.pc, 0x1060);
    }

    #[test]
    fn push_writes_then_decrements() {
        let mut s = state_with(&[]);
        s.s = 0xFD;
        s.push(VALUE);
        assert_eq!(s.read(0x01FD), VALUE);
        assert_eq!(s.s, 0xFC);
    }

    #[test]
    fn pull_increments_then_reads() {
        let mut s = state_with(&[(0x01FD, VALUE)]);
        s.s = 0xFC;
        assert_eq!(s.pull(), VALUE);
        assert_eq!(s.s, 0xFD);
    }

    #[test]
    fn word_round_trips_through_stack() {
        let mut s = state_with(&[]);
        s.s = 0xFD;
        s.push_word(WORD);
        assert_eq!(s.read(0x01FD), WORD_HI);
        assert_eq!(s.read(0x01FC), WORD_LO);
        assert_eq!(s.pull_word(), WORD);
        assert_eq!(s.s, 0xFD);
    }

    #[test]
    fn stack_pointer_wraps_around_page() {
        let mut s = state_with(&[]);
        s.s = 0x00;
        s.push(VALUE);
        assert_eq!(s.s, 0xFF);
        assert_eq!(s.pull(), VALUE);
        assert_eq!(s.s, 0x00);
    }

    #[test]
    fn reset_restores_initial_registers_and_vector() {
        let mut s = state_with(&[(RESET_VECTOR, 0x50), (RESET_VECTOR + 1, 0x10)]);
        s.a = 1;
        s.x = 2;
        s.y = 3;
        s.p = Status(0xFF);
        s.s = 0x12;
        s.reset();
        assert_eq!(s.a, 0);
        assert_eq!(s.x, 0);
        assert_eq!(s.y, 0);
        assert_eq!(s.p, Status(0x34));
        assert_eq!(s.s, 0xFD);
        assert_eq!(s.pc, 0x1050);
    }

    #[test]
    fn registers_snapshot_matches_state() {
        let mut s = state_with(&[]);
        s.a = 1;
        s.pc = ADDRESS;
        let regs = s.registers();
        assert_eq!(regs.a, 1);
        assert_eq!(regs.pc, ADDRESS);
    }
}

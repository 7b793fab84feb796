//! Addressing modes.
//!
//! An [`Instruction`] pairs a command with one of the 13 addressing modes.
//! Executing it resolves the operand address against the current PC,
//! advances PC by the instruction size and only then runs the command, so
//! control-flow commands see PC already pointing at the next instruction.
//!
//! Cycle reporting happens after execution: indexed absolute and indirect
//! modes remember whether the last execute crossed a page, and the
//! relative mode remembers whether the branch was taken and how far. That
//! bonus state lives inside the table cell and is recomputed on every
//! execute.

use crate::byteutil;
use crate::flags::Status;
use crate::state::State;

/// Command over the register file alone.
pub type ImpliedCmd = fn(&mut State);
/// Command over the register file and a resolved target address.
pub type AddressedCmd = fn(&mut State, u16);
/// Branch predicate over the status register.
pub type BranchCmd = fn(Status) -> bool;

const IMPLIED_SIZE: u16 = 1;
const IMMEDIATE_SIZE: u16 = 2;
const ONE_BYTE_ADDR_SIZE: u16 = 2;
const TWO_BYTE_ADDR_SIZE: u16 = 3;
const RELATIVE_SIZE: u16 = 2;
const RELATIVE_CYCLES: u8 = 2;

/// A command bound to an addressing mode and its cycle cost.
#[derive(Debug, Clone, Copy)]
pub enum Instruction {
    Implied { cmd: ImpliedCmd, cycles: u8 },
    Immediate { cmd: AddressedCmd, cycles: u8 },
    ZeroPage { cmd: AddressedCmd, cycles: u8 },
    ZeroPageX { cmd: AddressedCmd, cycles: u8 },
    ZeroPageY { cmd: AddressedCmd, cycles: u8 },
    Absolute { cmd: AddressedCmd, cycles: u8 },
    AbsoluteX(PageCross),
    AbsoluteY(PageCross),
    Indirect { cmd: AddressedCmd, cycles: u8 },
    IndirectX { cmd: AddressedCmd, cycles: u8 },
    IndirectY(PageCross),
    Relative { cmd: BranchCmd, bonus: u8 },
}

/// State shared by the modes that pay a penalty when the effective
/// address leaves the page of the base address.
#[derive(Debug, Clone, Copy)]
pub struct PageCross {
    cmd: AddressedCmd,
    cycles: u8,
    bonus: u8,
    crossed: bool,
}

impl PageCross {
    const fn new(cmd: AddressedCmd, cycles: u8, bonus: u8) -> Self {
        Self {
            cmd,
            cycles,
            bonus,
            crossed: false,
        }
    }

    fn check(&mut self, base: u16, final_addr: u16) {
        self.crossed = !byteutil::same_page(base, final_addr);
    }

    fn cycles(&self) -> u8 {
        if self.crossed {
            self.cycles + self.bonus
        } else {
            self.cycles
        }
    }
}

impl Instruction {
    /// No operand; the command works on registers alone.
    #[must_use]
    pub const fn implied(cmd: ImpliedCmd, cycles: u8) -> Self {
        Self::Implied { cmd, cycles }
    }

    /// Operates on the accumulator. Identical dispatch to [`implied`],
    /// kept separate so tables read like the data sheet.
    ///
    /// [`implied`]: Self::implied
    #[must_use]
    pub const fn accumulator(cmd: ImpliedCmd, cycles: u8) -> Self {
        Self::Implied { cmd, cycles }
    }

    /// The operand byte itself is the target; its address is passed on.
    #[must_use]
    pub const fn immediate(cmd: AddressedCmd, cycles: u8) -> Self {
        Self::Immediate { cmd, cycles }
    }

    /// One-byte address into page zero.
    #[must_use]
    pub const fn zero_page(cmd: AddressedCmd, cycles: u8) -> Self {
        Self::ZeroPage { cmd, cycles }
    }

    /// Zero-page address plus X, wrapping within page zero.
    #[must_use]
    pub const fn zero_page_x(cmd: AddressedCmd, cycles: u8) -> Self {
        Self::ZeroPageX { cmd, cycles }
    }

    /// Zero-page address plus Y, wrapping within page zero.
    #[must_use]
    pub const fn zero_page_y(cmd: AddressedCmd, cycles: u8) -> Self {
        Self::ZeroPageY { cmd, cycles }
    }

    /// Full two-byte address.
    #[must_use]
    pub const fn absolute(cmd: AddressedCmd, cycles: u8) -> Self {
        Self::Absolute { cmd, cycles }
    }

    /// Two-byte address plus X; `bonus` extra cycles on a page cross.
    #[must_use]
    pub const fn absolute_x(cmd: AddressedCmd, cycles: u8, bonus: u8) -> Self {
        Self::AbsoluteX(PageCross::new(cmd, cycles, bonus))
    }

    /// Two-byte address plus Y; `bonus` extra cycles on a page cross.
    #[must_use]
    pub const fn absolute_y(cmd: AddressedCmd, cycles: u8, bonus: u8) -> Self {
        Self::AbsoluteY(PageCross::new(cmd, cycles, bonus))
    }

    /// Target read through a two-byte pointer. The pointer's high byte is
    /// fetched from within its own page (JMP page-wrap quirk).
    #[must_use]
    pub const fn indirect(cmd: AddressedCmd, cycles: u8) -> Self {
        Self::Indirect { cmd, cycles }
    }

    /// Pointer at `(operand + X) mod 256` in page zero.
    #[must_use]
    pub const fn indirect_x(cmd: AddressedCmd, cycles: u8) -> Self {
        Self::IndirectX { cmd, cycles }
    }

    /// Pointer at `operand` in page zero, plus Y after the fetch;
    /// `bonus` extra cycles on a page cross.
    #[must_use]
    pub const fn indirect_y(cmd: AddressedCmd, cycles: u8, bonus: u8) -> Self {
        Self::IndirectY(PageCross::new(cmd, cycles, bonus))
    }

    /// Signed one-byte offset from the next instruction; two base cycles,
    /// one more when taken, another when the target crosses a page.
    #[must_use]
    pub const fn relative(cmd: BranchCmd) -> Self {
        Self::Relative { cmd, bonus: 0 }
    }

    /// Resolve the operand, advance PC and run the command.
    pub fn execute(&mut self, s: &mut State) {
        match self {
            Self::Implied { cmd, .. } => {
                s.pc = s.pc.wrapping_add(IMPLIED_SIZE);
                cmd(s);
            }
            Self::Immediate { cmd, .. } => {
                let addr = s.operand_addr();
                s.pc = s.pc.wrapping_add(IMMEDIATE_SIZE);
                cmd(s, addr);
            }
            Self::ZeroPage { cmd, .. } => {
                let addr = u16::from(s.read_operand());
                s.pc = s.pc.wrapping_add(ONE_BYTE_ADDR_SIZE);
                cmd(s, addr);
            }
            Self::ZeroPageX { cmd, .. } => {
                let addr = u16::from(s.read_operand().wrapping_add(s.x));
                s.pc = s.pc.wrapping_add(ONE_BYTE_ADDR_SIZE);
                cmd(s, addr);
            }
            Self::ZeroPageY { cmd, .. } => {
                let addr = u16::from(s.read_operand().wrapping_add(s.y));
                s.pc = s.pc.wrapping_add(ONE_BYTE_ADDR_SIZE);
                cmd(s, addr);
            }
            Self::Absolute { cmd, .. } => {
                let addr = s.read_operand_word();
                s.pc = s.pc.wrapping_add(TWO_BYTE_ADDR_SIZE);
                cmd(s, addr);
            }
            Self::AbsoluteX(mode) => {
                let base = s.read_operand_word();
                let addr = base.wrapping_add(u16::from(s.x));
                mode.check(base, addr);
                s.pc = s.pc.wrapping_add(TWO_BYTE_ADDR_SIZE);
                (mode.cmd)(s, addr);
            }
            Self::AbsoluteY(mode) => {
                let base = s.read_operand_word();
                let addr = base.wrapping_add(u16::from(s.y));
                mode.check(base, addr);
                s.pc = s.pc.wrapping_add(TWO_BYTE_ADDR_SIZE);
                (mode.cmd)(s, addr);
            }
            Self::Indirect { cmd, .. } => {
                let pointer = s.read_operand_word();
                let addr = s.read_word_page_wrap(pointer);
                s.pc = s.pc.wrapping_add(TWO_BYTE_ADDR_SIZE);
                cmd(s, addr);
            }
            Self::IndirectX { cmd, .. } => {
                let pointer = u16::from(s.read_operand().wrapping_add(s.x));
                let addr = s.read_word_page_wrap(pointer);
                s.pc = s.pc.wrapping_add(ONE_BYTE_ADDR_SIZE);
                cmd(s, addr);
            }
            Self::IndirectY(mode) => {
                let pointer = u16::from(s.read_operand());
                let base = s.read_word_page_wrap(pointer);
                let addr = base.wrapping_add(u16::from(s.y));
                mode.check(base, addr);
                s.pc = s.pc.wrapping_add(ONE_BYTE_ADDR_SIZE);
                (mode.cmd)(s, addr);
            }
            Self::Relative { cmd, bonus } => {
                *bonus = 0;
                let offset = byteutil::sign_extend(s.read_operand());
                s.pc = s.pc.wrapping_add(RELATIVE_SIZE);
                if cmd(s.p) {
                    let target = s.pc.wrapping_add(offset);
                    *bonus = if byteutil::same_page(s.pc, target) { 1 } else { 2 };
                    s.pc = target;
                }
            }
        }
    }

    /// Cycle count of the most recent execute.
    #[must_use]
    pub fn cycles(&self) -> u8 {
        match self {
            Self::Implied { cycles, .. }
            | Self::Immediate { cycles, .. }
            | Self::ZeroPage { cycles, .. }
            | Self::ZeroPageX { cycles, .. }
            | Self::ZeroPageY { cycles, .. }
            | Self::Absolute { cycles, .. }
            | Self::Indirect { cycles, .. }
            | Self::IndirectX { cycles, .. } => *cycles,
            Self::AbsoluteX(mode) | Self::AbsoluteY(mode) | Self::IndirectY(mode) => mode.cycles(),
            Self::Relative { bonus, .. } => RELATIVE_CYCLES + bonus,
        }
    }
}

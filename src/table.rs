//! Opcode decode table.
//!
//! The driver executes whatever table the host hands it, so alternative
//! opcode sets can reuse the engine. [`InstructionSet::official`] builds
//! the documented 2A03 set; undocumented opcodes are left empty and fault
//! as unknown.

use crate::commands as cmd;
use crate::modes::Instruction;

/// Opcode-indexed instruction table. Empty slots decode as unknown.
#[derive(Clone)]
pub struct InstructionSet {
    entries: [Option<Instruction>; 256],
}

impl InstructionSet {
    /// A table with every slot empty.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: [None; 256],
        }
    }

    /// Place an instruction at `code`, replacing any previous entry.
    pub fn insert(&mut self, code: u8, instruction: Instruction) {
        self.entries[usize::from(code)] = Some(instruction);
    }

    /// Look up the instruction for `code`.
    #[must_use]
    pub fn get(&self, code: u8) -> Option<&Instruction> {
        self.entries[usize::from(code)].as_ref()
    }

    pub(crate) fn get_mut(&mut self, code: u8) -> Option<&mut Instruction> {
        self.entries[usize::from(code)].as_mut()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// True when no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    /// The 151 documented opcodes with their data-sheet cycle counts.
    #[must_use]
    pub fn official() -> Self {
        let mut set = Self::empty();

        // Loads
        set.insert(0xA9, Instruction::immediate(cmd::lda, 2));
        set.insert(0xA5, Instruction::zero_page(cmd::lda, 3));
        set.insert(0xB5, Instruction::zero_page_x(cmd::lda, 4));
        set.insert(0xAD, Instruction::absolute(cmd::lda, 4));
        set.insert(0xBD, Instruction::absolute_x(cmd::lda, 4, 1));
        set.insert(0xB9, Instruction::absolute_y(cmd::lda, 4, 1));
        set.insert(0xA1, Instruction::indirect_x(cmd::lda, 6));
        set.insert(0xB1, Instruction::indirect_y(cmd::lda, 5, 1));

        set.insert(0xA2, Instruction::immediate(cmd::ldx, 2));
        set.insert(0xA6, Instruction::zero_page(cmd::ldx, 3));
        set.insert(0xB6, Instruction::zero_page_y(cmd::ldx, 4));
        set.insert(0xAE, Instruction::absolute(cmd::ldx, 4));
        set.insert(0xBE, Instruction::absolute_y(cmd::ldx, 4, 1));

        set.insert(0xA0, Instruction::immediate(cmd::ldy, 2));
        set.insert(0xA4, Instruction::zero_page(cmd::ldy, 3));
        set.insert(0xB4, Instruction::zero_page_x(cmd::ldy, 4));
        set.insert(0xAC, Instruction::absolute(cmd::ldy, 4));
        set.insert(0xBC, Instruction::absolute_x(cmd::ldy, 4, 1));

        // Stores
        set.insert(0x85, Instruction::zero_page(cmd::sta, 3));
        set.insert(0x95, Instruction::zero_page_x(cmd::sta, 4));
        set.insert(0x8D, Instruction::absolute(cmd::sta, 4));
        set.insert(0x9D, Instruction::absolute_x(cmd::sta, 5, 0));
        set.insert(0x99, Instruction::absolute_y(cmd::sta, 5, 0));
        set.insert(0x81, Instruction::indirect_x(cmd::sta, 6));
        set.insert(0x91, Instruction::indirect_y(cmd::sta, 6, 0));

        set.insert(0x86, Instruction::zero_page(cmd::stx, 3));
        set.insert(0x96, Instruction::zero_page_y(cmd::stx, 4));
        set.insert(0x8E, Instruction::absolute(cmd::stx, 4));

        set.insert(0x84, Instruction::zero_page(cmd::sty, 3));
        set.insert(0x94, Instruction::zero_page_x(cmd::sty, 4));
        set.insert(0x8C, Instruction::absolute(cmd::sty, 4));

        // Register transfers
        set.insert(0xAA, Instruction::implied(cmd::tax, 2));
        set.insert(0xA8, Instruction::implied(cmd::tay, 2));
        set.insert(0xBA, Instruction::implied(cmd::tsx, 2));
        set.insert(0x8A, Instruction::implied(cmd::txa, 2));
        set.insert(0x9A, Instruction::implied(cmd::txs, 2));
        set.insert(0x98, Instruction::implied(cmd::tya, 2));

        // Stack operations
        set.insert(0x48, Instruction::implied(cmd::pha, 3));
        set.insert(0x08, Instruction::implied(cmd::php, 3));
        set.insert(0x68, Instruction::implied(cmd::pla, 4));
        set.insert(0x28, Instruction::implied(cmd::plp, 4));

        // Logic
        set.insert(0x29, Instruction::immediate(cmd::and, 2));
        set.insert(0x25, Instruction::zero_page(cmd::and, 3));
        set.insert(0x35, Instruction::zero_page_x(cmd::and, 4));
        set.insert(0x2D, Instruction::absolute(cmd::and, 4));
        set.insert(0x3D, Instruction::absolute_x(cmd::and, 4, 1));
        set.insert(0x39, Instruction::absolute_y(cmd::and, 4, 1));
        set.insert(0x21, Instruction::indirect_x(cmd::and, 6));
        set.insert(0x31, Instruction::indirect_y(cmd::and, 5, 1));

        set.insert(0x49, Instruction::immediate(cmd::eor, 2));
        set.insert(0x45, Instruction::zero_page(cmd::eor, 3));
        set.insert(0x55, Instruction::zero_page_x(cmd::eor, 4));
        set.insert(0x4D, Instruction::absolute(cmd::eor, 4));
        set.insert(0x5D, Instruction::absolute_x(cmd::eor, 4, 1));
        set.insert(0x59, Instruction::absolute_y(cmd::eor, 4, 1));
        set.insert(0x41, Instruction::indirect_x(cmd::eor, 6));
        set.insert(0x51, Instruction::indirect_y(cmd::eor, 5, 1));

        set.insert(0x09, Instruction::immediate(cmd::ora, 2));
        set.insert(0x05, Instruction::zero_page(cmd::ora, 3));
        set.insert(0x15, Instruction::zero_page_x(cmd::ora, 4));
        set.insert(0x0D, Instruction::absolute(cmd::ora, 4));
        set.insert(0x1D, Instruction::absolute_x(cmd::ora, 4, 1));
        set.insert(0x19, Instruction::absolute_y(cmd::ora, 4, 1));
        set.insert(0x01, Instruction::indirect_x(cmd::ora, 6));
        set.insert(0x11, Instruction::indirect_y(cmd::ora, 5, 1));

        set.insert(0x24, Instruction::zero_page(cmd::bit, 3));
        set.insert(0x2C, Instruction::absolute(cmd::bit, 4));

        // Arithmetic
        set.insert(0x69, Instruction::immediate(cmd::adc, 2));
        set.insert(0x65, Instruction::zero_page(cmd::adc, 3));
        set.insert(0x75, Instruction::zero_page_x(cmd::adc, 4));
        set.insert(0x6D, Instruction::absolute(cmd::adc, 4));
        set.insert(0x7D, Instruction::absolute_x(cmd::adc, 4, 1));
        set.insert(0x79, Instruction::absolute_y(cmd::adc, 4, 1));
        set.insert(0x61, Instruction::indirect_x(cmd::adc, 6));
        set.insert(0x71, Instruction::indirect_y(cmd::adc, 5, 1));

        set.insert(0xE9, Instruction::immediate(cmd::sbc, 2));
        set.insert(0xE5, Instruction::zero_page(cmd::sbc, 3));
        set.insert(0xF5, Instruction::zero_page_x(cmd::sbc, 4));
        set.insert(0xED, Instruction::absolute(cmd::sbc, 4));
        set.insert(0xFD, Instruction::absolute_x(cmd::sbc, 4, 1));
        set.insert(0xF9, Instruction::absolute_y(cmd::sbc, 4, 1));
        set.insert(0xE1, Instruction::indirect_x(cmd::sbc, 6));
        set.insert(0xF1, Instruction::indirect_y(cmd::sbc, 5, 1));

        // Compares
        set.insert(0xC9, Instruction::immediate(cmd::cmp, 2));
        set.insert(0xC5, Instruction::zero_page(cmd::cmp, 3));
        set.insert(0xD5, Instruction::zero_page_x(cmd::cmp, 4));
        set.insert(0xCD, Instruction::absolute(cmd::cmp, 4));
        set.insert(0xDD, Instruction::absolute_x(cmd::cmp, 4, 1));
        set.insert(0xD9, Instruction::absolute_y(cmd::cmp, 4, 1));
        set.insert(0xC1, Instruction::indirect_x(cmd::cmp, 6));
        set.insert(0xD1, Instruction::indirect_y(cmd::cmp, 5, 1));

        set.insert(0xE0, Instruction::immediate(cmd::cpx, 2));
        set.insert(0xE4, Instruction::zero_page(cmd::cpx, 3));
        set.insert(0xEC, Instruction::absolute(cmd::cpx, 4));

        set.insert(0xC0, Instruction::immediate(cmd::cpy, 2));
        set.insert(0xC4, Instruction::zero_page(cmd::cpy, 3));
        set.insert(0xCC, Instruction::absolute(cmd::cpy, 4));

        // Increments and decrements
        set.insert(0xE6, Instruction::zero_page(cmd::inc, 5));
        set.insert(0xF6, Instruction::zero_page_x(cmd::inc, 6));
        set.insert(0xEE, Instruction::absolute(cmd::inc, 6));
        set.insert(0xFE, Instruction::absolute_x(cmd::inc, 7, 0));

        set.insert(0xC6, Instruction::zero_page(cmd::dec, 5));
        set.insert(0xD6, Instruction::zero_page_x(cmd::dec, 6));
        set.insert(0xCE, Instruction::absolute(cmd::dec, 6));
        set.insert(0xDE, Instruction::absolute_x(cmd::dec, 7, 0));

        set.insert(0xE8, Instruction::implied(cmd::inx, 2));
        set.insert(0xC8, Instruction::implied(cmd::iny, 2));
        set.insert(0xCA, Instruction::implied(cmd::dex, 2));
        set.insert(0x88, Instruction::implied(cmd::dey, 2));

        // Shifts and rotates
        set.insert(0x0A, Instruction::accumulator(cmd::asl_a, 2));
        set.insert(0x06, Instruction::zero_page(cmd::asl, 5));
        set.insert(0x16, Instruction::zero_page_x(cmd::asl, 6));
        set.insert(0x0E, Instruction::absolute(cmd::asl, 6));
        set.insert(0x1E, Instruction::absolute_x(cmd::asl, 7, 0));

        set.insert(0x4A, Instruction::accumulator(cmd::lsr_a, 2));
        set.insert(0x46, Instruction::zero_page(cmd::lsr, 5));
        set.insert(0x56, Instruction::zero_page_x(cmd::lsr, 6));
        set.insert(0x4E, Instruction::absolute(cmd::lsr, 6));
        set.insert(0x5E, Instruction::absolute_x(cmd::lsr, 7, 0));

        set.insert(0x2A, Instruction::accumulator(cmd::rol_a, 2));
        set.insert(0x26, Instruction::zero_page(cmd::rol, 5));
        set.insert(0x36, Instruction::zero_page_x(cmd::rol, 6));
        set.insert(0x2E, Instruction::absolute(cmd::rol, 6));
        set.insert(0x3E, Instruction::absolute_x(cmd::rol, 7, 0));

        set.insert(0x6A, Instruction::accumulator(cmd::ror_a, 2));
        set.insert(0x66, Instruction::zero_page(cmd::ror, 5));
        set.insert(0x76, Instruction::zero_page_x(cmd::ror, 6));
        set.insert(0x6E, Instruction::absolute(cmd::ror, 6));
        set.insert(0x7E, Instruction::absolute_x(cmd::ror, 7, 0));

        // Jumps and subroutines
        set.insert(0x4C, Instruction::absolute(cmd::jmp, 3));
        set.insert(0x6C, Instruction::indirect(cmd::jmp, 5));
        set.insert(0x20, Instruction::absolute(cmd::jsr, 6));
        set.insert(0x60, Instruction::implied(cmd::rts, 6));

        // Branches
        set.insert(0x90, Instruction::relative(cmd::bcc));
        set.insert(0xB0, Instruction::relative(cmd::bcs));
        set.insert(0xF0, Instruction::relative(cmd::beq));
        set.insert(0x30, Instruction::relative(cmd::bmi));
        set.insert(0xD0, Instruction::relative(cmd::bne));
        set.insert(0x10, Instruction::relative(cmd::bpl));
        set.insert(0x50, Instruction::relative(cmd::bvc));
        set.insert(0x70, Instruction::relative(cmd::bvs));

        // Flag manipulation
        set.insert(0x18, Instruction::implied(cmd::clc, 2));
        set.insert(0xD8, Instruction::implied(cmd::cld, 2));
        set.insert(0x58, Instruction::implied(cmd::cli, 2));
        set.insert(0xB8, Instruction::implied(cmd::clv, 2));
        set.insert(0x38, Instruction::implied(cmd::sec, 2));
        set.insert(0xF8, Instruction::implied(cmd::sed, 2));
        set.insert(0x78, Instruction::implied(cmd::sei, 2));

        // Interrupts and the rest
        set.insert(0x00, Instruction::implied(cmd::brk, 7));
        set.insert(0x40, Instruction::implied(cmd::rti, 6));
        set.insert(0xEA, Instruction::implied(cmd::nop, 2));

        set
    }
}

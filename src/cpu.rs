//! The fetch/decode/tick driver.

use thiserror::Error;

use crate::bus::SharedBus;
use crate::state::{Registers, State};
use crate::table::InstructionSet;

/// Fatal decode faults raised by [`Ricoh2A03::tick`].
///
/// Both signal a broken table or a corrupt program rather than a
/// runtime condition; the CPU makes no attempt to recover. The host may
/// catch them and reset.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// The opcode byte at PC has no entry in the instruction table.
    #[error("unknown instruction code: {0:#04x}")]
    UnknownOpcode(u8),
    /// A table entry reported zero cycles, which no instruction takes.
    #[error("encountered instruction needs 0 cycles to execute: {0:#04x}")]
    ZeroCycles(u8),
}

/// The NES CPU: a 6502 with the decimal mode disconnected, driven one
/// clock cycle at a time.
///
/// An instruction retires in exactly as many ticks as its declared cycle
/// count. All observable work happens on the first tick; the remaining
/// ticks only drain the cycle counter, which keeps the instruction stream
/// aligned with the master clock the host derives ticks from.
pub struct Ricoh2A03 {
    state: State,
    instructions: InstructionSet,
    remaining_cycles: u8,
}

impl Ricoh2A03 {
    /// Create a CPU on `bus` driven by `instructions`, and reset it.
    #[must_use]
    pub fn new(bus: SharedBus, instructions: InstructionSet) -> Self {
        let mut cpu = Self {
            state: State::new(bus),
            instructions,
            remaining_cycles: 0,
        };
        cpu.reset();
        cpu
    }

    /// Create a CPU with the documented 2A03 instruction set.
    #[must_use]
    pub fn with_official_set(bus: SharedBus) -> Self {
        Self::new(bus, InstructionSet::official())
    }

    /// Restore power-up register state, clear the cycle counter and
    /// reload PC from the reset vector.
    pub fn reset(&mut self) {
        self.state.reset();
        self.remaining_cycles = 0;
    }

    /// Advance one clock cycle.
    ///
    /// When no instruction is in flight, fetches and executes the next
    /// one and arms the cycle counter with its cost; every call then
    /// consumes one cycle. A decode fault aborts the tick with the
    /// counter untouched.
    pub fn tick(&mut self) -> Result<(), CpuError> {
        if self.remaining_cycles == 0 {
            let code = self.state.read_opcode();
            let instruction = self
                .instructions
                .get_mut(code)
                .ok_or(CpuError::UnknownOpcode(code))?;
            instruction.execute(&mut self.state);
            let cycles = instruction.cycles();
            if cycles == 0 {
                return Err(CpuError::ZeroCycles(code));
            }
            self.remaining_cycles = cycles;
        }
        self.remaining_cycles -= 1;
        Ok(())
    }

    /// Snapshot of the register file. Mutating the copy has no effect on
    /// the CPU.
    #[must_use]
    pub fn registers(&self) -> Registers {
        self.state.registers()
    }

    /// Current program counter.
    #[must_use]
    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    /// Cycles left before the next instruction fetch.
    #[must_use]
    pub fn remaining_cycles(&self) -> u8 {
        self.remaining_cycles
    }
}

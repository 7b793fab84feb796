//! Cycle-accurate Ricoh 2A03 CPU core.
//!
//! The 2A03 is the NES variant of the MOS 6502: the documented instruction
//! set with the decimal mode disconnected. This crate emulates it at
//! instruction granularity with exact cycle accounting: each `tick()`
//! advances one clock cycle, an instruction performs all of its work on its
//! first cycle and then idles for the remainder of its declared count,
//! including page-cross and branch penalties.
//!
//! The host supplies two things at construction:
//!
//! - a memory bus implementing [`Bus`], shared through [`SharedBus`], and
//! - an [`InstructionSet`] mapping opcode bytes to instructions, so the
//!   same engine can be driven with a custom opcode set.
//!   [`InstructionSet::official`] builds the stock 2A03 table.
//!
//! Instructions are composed from an addressing mode ([`Instruction`]) and
//! a command function (module [`commands`]), mirroring how the hardware
//! separates operand resolution from the operation itself.

pub mod byteutil;
pub mod commands;
pub mod flags;

mod bus;
mod cpu;
mod modes;
mod state;
mod table;

#[cfg(test)]
pub(crate) mod testutil;

pub use bus::{Bus, SharedBus};
pub use cpu::{CpuError, Ricoh2A03};
pub use flags::Status;
pub use modes::{AddressedCmd, BranchCmd, ImpliedCmd, Instruction};
pub use state::{Registers, State, IRQ_VECTOR, RESET_VECTOR};
pub use table::InstructionSet;

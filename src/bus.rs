//! Memory bus interface supplied by the host.

use std::cell::RefCell;
use std::rc::Rc;

/// Memory and I/O bus with a 16-bit address space.
///
/// The host maps the address space however it likes; every address yields
/// some byte and there is no error channel. Reads and writes may have
/// side effects (memory-mapped I/O), so the CPU never caches or elides
/// bus accesses.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, addr: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, addr: u16, value: u8);
}

/// Shared handle to a host bus.
///
/// The CPU and the host both access the bus: the CPU during `tick()`, the
/// host between ticks (e.g. DMA). Everything is single-threaded, so a
/// runtime-borrow-checked cell is sufficient. The host must not touch CPU
/// state from inside a bus callback while a tick is in progress.
pub type SharedBus = Rc<RefCell<dyn Bus>>;

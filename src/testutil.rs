//! Shared test fixtures: a sparse bus plus builders for common layouts.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::bus::Bus;
use crate::state::RESET_VECTOR;

/// Sparse 64 KiB memory; unwritten cells read as zero.
pub struct TestBus {
    cells: HashMap<u16, u8>,
}

impl TestBus {
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }

    pub fn with(entries: &[(u16, u8)]) -> Self {
        let mut bus = Self::new();
        for &(addr, value) in entries {
            bus.cells.insert(addr, value);
        }
        bus
    }

    /// A bus whose reset vector points at `addr`, with `program` laid out
    /// there.
    pub fn with_reset_program(addr: u16, program: &[u8]) -> Self {
        let mut bus = Self::with(&[
            (RESET_VECTOR, crate::byteutil::low(addr)),
            (RESET_VECTOR + 1, crate::byteutil::high(addr)),
        ]);
        bus.load(addr, program);
        bus
    }

    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        for (i, &value) in bytes.iter().enumerate() {
            self.cells.insert(addr.wrapping_add(i as u16), value);
        }
    }
}

impl Bus for TestBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.cells.get(&addr).copied().unwrap_or(0)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.cells.insert(addr, value);
    }
}

pub fn shared(bus: TestBus) -> Rc<RefCell<TestBus>> {
    Rc::new(RefCell::new(bus))
}

//! Harness for Tom Harte's `SingleStepTests` 2A03 vectors.
//!
//! Each of the 151 documented opcodes has a JSON file of 10,000 cases
//! giving the full register/memory state before and after one
//! instruction, plus the per-cycle bus trace. This runs every case
//! through the instruction table and compares final state and cycle
//! count (this core does not model per-cycle bus activity).
//!
//! Vector files live in `test-data/nes6502/v1/XX.json`; override the
//! location with the `SINGLE_STEP_DIR` environment variable. Get them
//! from: https://github.com/SingleStepTests/65x02

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use serde::Deserialize;

use cpu_2a03::{Bus, InstructionSet, State, Status};

/// Flat 64 KiB RAM bus.
struct RamBus {
    ram: Vec<u8>,
}

impl RamBus {
    fn new() -> Self {
        Self {
            ram: vec![0; 0x10000],
        }
    }

    fn load(&mut self, entries: &[(u16, u8)]) {
        for &(addr, value) in entries {
            self.ram[addr as usize] = value;
        }
    }
}

impl Bus for RamBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.ram[addr as usize] = value;
    }
}

#[derive(Deserialize)]
struct TestCase {
    name: String,
    initial: CpuState,
    #[serde(rename = "final")]
    final_state: CpuState,
    cycles: Vec<(u16, u8, String)>,
}

#[derive(Deserialize)]
struct CpuState {
    pc: u16,
    s: u8,
    a: u8,
    x: u8,
    y: u8,
    p: u8,
    ram: Vec<(u16, u8)>,
}

fn vector_dir() -> PathBuf {
    std::env::var_os("SINGLE_STEP_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("test-data/nes6502/v1"))
}

fn run_case(set: &InstructionSet, opcode: u8, case: &TestCase) -> Vec<String> {
    let mut bus = RamBus::new();
    bus.load(&case.initial.ram);
    let bus = Rc::new(RefCell::new(bus));

    let mut s = State::new(bus.clone());
    s.pc = case.initial.pc;
    s.s = case.initial.s;
    s.a = case.initial.a;
    s.x = case.initial.x;
    s.y = case.initial.y;
    s.p = Status(case.initial.p);

    // Table cells carry bonus-cycle state; run a private copy.
    let mut instruction = *set.get(opcode).expect("opcode in official set");
    instruction.execute(&mut s);

    let mut errors = Vec::new();
    let expected = &case.final_state;
    if s.pc != expected.pc {
        errors.push(format!("PC: got ${:04X}, want ${:04X}", s.pc, expected.pc));
    }
    if s.s != expected.s {
        errors.push(format!("S: got ${:02X}, want ${:02X}", s.s, expected.s));
    }
    if s.a != expected.a {
        errors.push(format!("A: got ${:02X}, want ${:02X}", s.a, expected.a));
    }
    if s.x != expected.x {
        errors.push(format!("X: got ${:02X}, want ${:02X}", s.x, expected.x));
    }
    if s.y != expected.y {
        errors.push(format!("Y: got ${:02X}, want ${:02X}", s.y, expected.y));
    }
    if s.p.0 != expected.p {
        errors.push(format!("P: got ${:02X}, want ${:02X}", s.p.0, expected.p));
    }
    for &(addr, value) in &expected.ram {
        let got = bus.borrow_mut().read(addr);
        if got != value {
            errors.push(format!(
                "RAM[${addr:04X}]: got ${got:02X}, want ${value:02X}"
            ));
        }
    }
    let cycles = usize::from(instruction.cycles());
    if cycles != case.cycles.len() {
        errors.push(format!(
            "cycles: got {cycles}, want {}",
            case.cycles.len()
        ));
    }
    errors
}

#[test]
#[ignore = "requires test-data/nes6502 — run with --ignored"]
fn run_all() {
    let dir = vector_dir();
    if !dir.exists() {
        eprintln!("Vector files not found at {}, skipping.", dir.display());
        return;
    }

    let set = InstructionSet::official();
    let mut total_pass = 0u64;
    let mut total_fail = 0u64;

    for opcode in 0..=0xFF_u8 {
        if set.get(opcode).is_none() {
            continue;
        }
        let path = dir.join(format!("{opcode:02x}.json"));
        if !path.exists() {
            continue;
        }

        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
        let cases: Vec<TestCase> = serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()));

        let mut file_fail = 0u32;
        for case in &cases {
            let errors = run_case(&set, opcode, case);
            if errors.is_empty() {
                total_pass += 1;
            } else {
                total_fail += 1;
                if file_fail < 5 {
                    eprintln!("FAIL ${opcode:02X} [{}]: {}", case.name, errors.join(", "));
                }
                file_fail += 1;
            }
        }
    }

    println!("single-step: {total_pass} passed, {total_fail} failed");
    assert_eq!(total_fail, 0, "{total_fail} cases failed");
}

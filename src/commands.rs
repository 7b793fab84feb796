//! The 2A03 command set, one function per mnemonic.
//!
//! Commands contain only the operation itself; fetching operands,
//! advancing PC and cycle accounting belong to the addressing modes.
//! Three shapes exist:
//!
//! - implied commands take the register file alone,
//! - addressed commands additionally take a resolved target address,
//! - branch commands are predicates over the status register.

use crate::byteutil;
use crate::flags::{Status, B, C, D, I, N, U, V, Z};
use crate::state::State;

const BREAK_MARK_SIZE: u16 = 1;
const SUBROUTINE_OFFSET: u16 = 1;

// Loads and stores

pub fn lda(s: &mut State, addr: u16) {
    s.a = s.read(addr);
    s.p.update_nz(s.a);
}

pub fn ldx(s: &mut State, addr: u16) {
    s.x = s.read(addr);
    s.p.update_nz(s.x);
}

pub fn ldy(s: &mut State, addr: u16) {
    s.y = s.read(addr);
    s.p.update_nz(s.y);
}

pub fn sta(s: &mut State, addr: u16) {
    s.write(addr, s.a);
}

pub fn stx(s: &mut State, addr: u16) {
    s.write(addr, s.x);
}

pub fn sty(s: &mut State, addr: u16) {
    s.write(addr, s.y);
}

// Register transfers

pub fn tax(s: &mut State) {
    s.x = s.a;
    s.p.update_nz(s.x);
}

pub fn tay(s: &mut State) {
    s.y = s.a;
    s.p.update_nz(s.y);
}

pub fn tsx(s: &mut State) {
    s.x = s.s;
    s.p.update_nz(s.x);
}

pub fn txa(s: &mut State) {
    s.a = s.x;
    s.p.update_nz(s.a);
}

pub fn tya(s: &mut State) {
    s.a = s.y;
    s.p.update_nz(s.a);
}

/// The only transfer that leaves the flags untouched.
pub fn txs(s: &mut State) {
    s.s = s.x;
}

// Stack operations

pub fn pha(s: &mut State) {
    s.push(s.a);
}

pub fn php(s: &mut State) {
    s.push(s.p.0);
}

pub fn pla(s: &mut State) {
    s.a = s.pull();
    s.p.update_nz(s.a);
}

/// Break and unused read back as set regardless of what was pushed.
pub fn plp(s: &mut State) {
    s.p = Status(s.pull());
    s.p.set(B | U);
}

// Logic

pub fn and(s: &mut State, addr: u16) {
    s.a &= s.read(addr);
    s.p.update_nz(s.a);
}

pub fn eor(s: &mut State, addr: u16) {
    s.a ^= s.read(addr);
    s.p.update_nz(s.a);
}

pub fn ora(s: &mut State, addr: u16) {
    s.a |= s.read(addr);
    s.p.update_nz(s.a);
}

/// Zero from `A & M`; negative and overflow copied straight from bits 7
/// and 6 of the operand. The accumulator is not modified.
pub fn bit(s: &mut State, addr: u16) {
    let m = s.read(addr);
    s.p.set_if(Z, s.a & m == 0);
    s.p.set_if(N, m & N != 0);
    s.p.set_if(V, m & V != 0);
}

// Arithmetic

pub fn adc(s: &mut State, addr: u16) {
    let m = s.read(addr);
    add_with_carry(s, m);
}

/// Subtraction is addition of the operand's complement.
pub fn sbc(s: &mut State, addr: u16) {
    let m = !s.read(addr);
    add_with_carry(s, m);
}

// The 2A03 has no decimal circuitry; D is a plain storage bit here.
fn add_with_carry(s: &mut State, m: u8) {
    let sum = u16::from(s.a) + u16::from(m) + u16::from(s.p.carry_in());
    let a = s.a;
    s.a = byteutil::low(sum);
    s.p.update_arithmetic(a, m, sum);
}

pub fn cmp(s: &mut State, addr: u16) {
    compare(s, s.a, addr);
}

pub fn cpx(s: &mut State, addr: u16) {
    compare(s, s.x, addr);
}

pub fn cpy(s: &mut State, addr: u16) {
    compare(s, s.y, addr);
}

fn compare(s: &mut State, register: u8, addr: u16) {
    let m = s.read(addr);
    s.p.update_nz(register.wrapping_sub(m));
    s.p.set_if(C, register >= m);
}

// Increments and decrements

pub fn inc(s: &mut State, addr: u16) {
    let value = s.read(addr).wrapping_add(1);
    s.p.update_nz(value);
    s.write(addr, value);
}

pub fn dec(s: &mut State, addr: u16) {
    let value = s.read(addr).wrapping_sub(1);
    s.p.update_nz(value);
    s.write(addr, value);
}

pub fn inx(s: &mut State) {
    s.x = s.x.wrapping_add(1);
    s.p.update_nz(s.x);
}

pub fn iny(s: &mut State) {
    s.y = s.y.wrapping_add(1);
    s.p.update_nz(s.y);
}

pub fn dex(s: &mut State) {
    s.x = s.x.wrapping_sub(1);
    s.p.update_nz(s.x);
}

pub fn dey(s: &mut State) {
    s.y = s.y.wrapping_sub(1);
    s.p.update_nz(s.y);
}

// Shifts and rotates. Carry always captures the bit shifted out, before
// the shift happens; rotates feed the previous carry into the vacated
// position.

pub fn asl(s: &mut State, addr: u16) {
    let value = s.read(addr);
    let result = shift_left(&mut s.p, value);
    s.write(addr, result);
}

pub fn asl_a(s: &mut State) {
    s.a = shift_left(&mut s.p, s.a);
}

pub fn lsr(s: &mut State, addr: u16) {
    let value = s.read(addr);
    let result = shift_right(&mut s.p, value);
    s.write(addr, result);
}

pub fn lsr_a(s: &mut State) {
    s.a = shift_right(&mut s.p, s.a);
}

pub fn rol(s: &mut State, addr: u16) {
    let value = s.read(addr);
    let result = rotate_left(&mut s.p, value);
    s.write(addr, result);
}

pub fn rol_a(s: &mut State) {
    s.a = rotate_left(&mut s.p, s.a);
}

pub fn ror(s: &mut State, addr: u16) {
    let value = s.read(addr);
    let result = rotate_right(&mut s.p, value);
    s.write(addr, result);
}

pub fn ror_a(s: &mut State) {
    s.a = rotate_right(&mut s.p, s.a);
}

fn shift_left(p: &mut Status, value: u8) -> u8 {
    p.set_if(C, byteutil::is_negative(value));
    let result = value << 1;
    p.update_nz(result);
    result
}

fn shift_right(p: &mut Status, value: u8) -> u8 {
    p.set_if(C, value & 0x01 != 0);
    let result = value >> 1;
    p.update_nz(result);
    result
}

fn rotate_left(p: &mut Status, value: u8) -> u8 {
    let carry = p.carry_in();
    p.set_if(C, byteutil::is_negative(value));
    let result = value << 1 | carry;
    p.update_nz(result);
    result
}

fn rotate_right(p: &mut Status, value: u8) -> u8 {
    let carry = p.carry_in() << 7;
    p.set_if(C, value & 0x01 != 0);
    let result = value >> 1 | carry;
    p.update_nz(result);
    result
}

// Jumps and returns

pub fn jmp(s: &mut State, addr: u16) {
    s.pc = addr;
}

/// PC already points past the three-byte instruction when the command
/// runs; the hardware saves the address of its last byte.
pub fn jsr(s: &mut State, addr: u16) {
    let return_addr = s.pc.wrapping_sub(SUBROUTINE_OFFSET);
    s.push_word(return_addr);
    s.pc = addr;
}

pub fn rts(s: &mut State) {
    s.pc = s.pull_word().wrapping_add(SUBROUTINE_OFFSET);
}

pub fn rti(s: &mut State) {
    plp(s);
    s.pc = s.pull_word();
}

// Interrupt entry

/// Skips the break mark byte, saves PC and P, masks interrupts and jumps
/// through the IRQ vector. P is pushed exactly as stored.
pub fn brk(s: &mut State) {
    s.pc = s.pc.wrapping_add(BREAK_MARK_SIZE);
    let pc = s.pc;
    s.push_word(pc);
    php(s);
    sei(s);
    s.load_irq_vector();
}

// Flag manipulation

pub fn clc(s: &mut State) {
    s.p.clear(C);
}

pub fn cld(s: &mut State) {
    s.p.clear(D);
}

pub fn cli(s: &mut State) {
    s.p.clear(I);
}

pub fn clv(s: &mut State) {
    s.p.clear(V);
}

pub fn sec(s: &mut State) {
    s.p.set(C);
}

pub fn sed(s: &mut State) {
    s.p.set(D);
}

pub fn sei(s: &mut State) {
    s.p.set(I);
}

pub fn nop(_: &mut State) {}

// Branch predicates

pub fn bcc(status: Status) -> bool {
    !status.is_set(C)
}

pub fn bcs(status: Status) -> bool {
    status.is_set(C)
}

pub fn bne(status: Status) -> bool {
    !status.is_set(Z)
}

pub fn beq(status: Status) -> bool {
    status.is_set(Z)
}

pub fn bpl(status: Status) -> bool {
    !status.is_set(N)
}

pub fn bmi(status: Status) -> bool {
    status.is_set(N)
}

pub fn bvc(status: Status) -> bool {
    !status.is_set(V)
}

pub fn bvs(status: Status) -> bool {
    status.is_set(V)
}

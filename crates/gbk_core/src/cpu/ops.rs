//! Opcode descriptor tables.
//!
//! Two flat 256-entry tables map an opcode byte to its [`Operation`]: one for
//! the base opcode space and one for the space behind the 0xCB prefix. Both
//! are built once on first use and never change afterwards.

use lazy_static::lazy_static;

use super::{Bus, Cpu};

/// Execution routine. Receives the opcode byte it was dispatched for (the
/// byte after 0xCB for prefixed instructions).
pub type Execute = fn(&mut Cpu, &mut dyn Bus, u8);

pub type OpTable = [Option<Operation>; 256];

/// Static metadata and behaviour of a single instruction.
#[derive(Clone, Copy, Debug)]
pub struct Operation {
    pub mnemonic: &'static str,
    /// Instruction length in bytes, including any 0xCB prefix.
    pub length: u8,
    /// T-cycles; for branches, the cost when the branch is taken.
    pub cycles: u32,
    /// T-cycles of a conditional branch that falls through.
    pub not_taken_cycles: u32,
    pub branch: bool,
    pub execute: Execute,
}

impl Operation {
    fn new(mnemonic: &'static str, length: u8, cycles: u32, execute: Execute) -> Option<Self> {
        Some(Self {
            mnemonic,
            length,
            cycles,
            not_taken_cycles: cycles,
            branch: false,
            execute,
        })
    }

    fn branch(
        mnemonic: &'static str,
        length: u8,
        taken: u32,
        not_taken: u32,
        execute: Execute,
    ) -> Option<Self> {
        Some(Self {
            mnemonic,
            length,
            cycles: taken,
            not_taken_cycles: not_taken,
            branch: true,
            execute,
        })
    }
}

lazy_static! {
    pub static ref BASE_OPS: OpTable = build_base_table();
    pub static ref CB_OPS: OpTable = build_cb_table();
}

/// Descriptor for `opcode` in the base or prefixed table.
#[inline]
pub fn lookup(opcode: u8, prefixed: bool) -> Option<&'static Operation> {
    let table: &'static OpTable = if prefixed { &*CB_OPS } else { &*BASE_OPS };
    table[opcode as usize].as_ref()
}

/// Cycle cost of an 8-bit operand slot: (HL) costs one extra memory access.
const fn mem_cost(index: u8, reg: u32, hl: u32) -> u32 {
    if index == 6 {
        hl
    } else {
        reg
    }
}

fn build_base_table() -> OpTable {
    let mut t: OpTable = [None; 256];

    t[0x00] = Operation::new("NOP", 1, 4, Cpu::exec_nop);
    t[0x08] = Operation::new("LD (a16),SP", 3, 20, Cpu::exec_ld_a16_sp);
    t[0x10] = Operation::new("STOP", 2, 4, Cpu::exec_stop);
    t[0x18] = Operation::branch("JR r8", 2, 12, 12, Cpu::exec_jr);

    t[0x02] = Operation::new("LD (BC),A", 1, 8, Cpu::exec_ld_ind_a);
    t[0x12] = Operation::new("LD (DE),A", 1, 8, Cpu::exec_ld_ind_a);
    t[0x22] = Operation::new("LD (HL+),A", 1, 8, Cpu::exec_ld_ind_a);
    t[0x32] = Operation::new("LD (HL-),A", 1, 8, Cpu::exec_ld_ind_a);
    t[0x0A] = Operation::new("LD A,(BC)", 1, 8, Cpu::exec_ld_a_ind);
    t[0x1A] = Operation::new("LD A,(DE)", 1, 8, Cpu::exec_ld_a_ind);
    t[0x2A] = Operation::new("LD A,(HL+)", 1, 8, Cpu::exec_ld_a_ind);
    t[0x3A] = Operation::new("LD A,(HL-)", 1, 8, Cpu::exec_ld_a_ind);

    t[0x07] = Operation::new("RLCA", 1, 4, Cpu::exec_rotate_a);
    t[0x0F] = Operation::new("RRCA", 1, 4, Cpu::exec_rotate_a);
    t[0x17] = Operation::new("RLA", 1, 4, Cpu::exec_rotate_a);
    t[0x1F] = Operation::new("RRA", 1, 4, Cpu::exec_rotate_a);
    t[0x27] = Operation::new("DAA", 1, 4, Cpu::exec_daa);
    t[0x2F] = Operation::new("CPL", 1, 4, Cpu::exec_cpl);
    t[0x37] = Operation::new("SCF", 1, 4, Cpu::exec_scf);
    t[0x3F] = Operation::new("CCF", 1, 4, Cpu::exec_ccf);

    for cc in 0..4u8 {
        let row = cc << 3;
        t[(0x20 | row) as usize] = Operation::branch("JR cc,r8", 2, 12, 8, Cpu::exec_jr_cc);
        t[(0xC0 | row) as usize] = Operation::branch("RET cc", 1, 20, 8, Cpu::exec_ret_cc);
        t[(0xC2 | row) as usize] = Operation::branch("JP cc,a16", 3, 16, 12, Cpu::exec_jp_cc);
        t[(0xC4 | row) as usize] = Operation::branch("CALL cc,a16", 3, 24, 12, Cpu::exec_call_cc);
    }

    for rr in 0..4u8 {
        let row = rr << 4;
        t[(0x01 | row) as usize] = Operation::new("LD rr,d16", 3, 12, Cpu::exec_ld_rr_d16);
        t[(0x03 | row) as usize] = Operation::new("INC rr", 1, 8, Cpu::exec_inc_rr);
        t[(0x09 | row) as usize] = Operation::new("ADD HL,rr", 1, 8, Cpu::exec_add_hl_rr);
        t[(0x0B | row) as usize] = Operation::new("DEC rr", 1, 8, Cpu::exec_dec_rr);
        t[(0xC1 | row) as usize] = Operation::new("POP rr", 1, 12, Cpu::exec_pop);
        t[(0xC5 | row) as usize] = Operation::new("PUSH rr", 1, 16, Cpu::exec_push);
    }

    for r in 0..8u8 {
        let row = r << 3;
        t[(0x04 | row) as usize] = Operation::new("INC r", 1, mem_cost(r, 4, 12), Cpu::exec_inc_r);
        t[(0x05 | row) as usize] = Operation::new("DEC r", 1, mem_cost(r, 4, 12), Cpu::exec_dec_r);
        t[(0x06 | row) as usize] =
            Operation::new("LD r,d8", 2, mem_cost(r, 8, 12), Cpu::exec_ld_r_d8);
        t[(0xC6 | row) as usize] = Operation::new("ALU A,d8", 2, 8, Cpu::exec_alu_d8);
        t[(0xC7 | row) as usize] = Operation::branch("RST n", 1, 16, 16, Cpu::exec_rst);
    }

    for opcode in 0x40..=0x7Fu8 {
        let dst = (opcode >> 3) & 0x07;
        let src = opcode & 0x07;
        let cycles = if dst == 6 || src == 6 { 8 } else { 4 };
        t[opcode as usize] = Operation::new("LD r,r'", 1, cycles, Cpu::exec_ld_r_r);
    }
    t[0x76] = Operation::new("HALT", 1, 4, Cpu::exec_halt);

    for opcode in 0x80..=0xBFu8 {
        let cycles = mem_cost(opcode & 0x07, 4, 8);
        t[opcode as usize] = Operation::new("ALU A,r", 1, cycles, Cpu::exec_alu_r);
    }

    t[0xC3] = Operation::branch("JP a16", 3, 16, 16, Cpu::exec_jp);
    t[0xC9] = Operation::branch("RET", 1, 16, 16, Cpu::exec_ret);
    t[0xCD] = Operation::branch("CALL a16", 3, 24, 24, Cpu::exec_call);
    t[0xD9] = Operation::branch("RETI", 1, 16, 16, Cpu::exec_reti);
    t[0xE9] = Operation::branch("JP HL", 1, 4, 4, Cpu::exec_jp_hl);

    t[0xE0] = Operation::new("LDH (a8),A", 2, 12, Cpu::exec_ldh_a8_a);
    t[0xF0] = Operation::new("LDH A,(a8)", 2, 12, Cpu::exec_ldh_a_a8);
    t[0xE2] = Operation::new("LD (C),A", 1, 8, Cpu::exec_ld_c_a);
    t[0xF2] = Operation::new("LD A,(C)", 1, 8, Cpu::exec_ld_a_c);
    t[0xEA] = Operation::new("LD (a16),A", 3, 16, Cpu::exec_ld_a16_a);
    t[0xFA] = Operation::new("LD A,(a16)", 3, 16, Cpu::exec_ld_a_a16);
    t[0xE8] = Operation::new("ADD SP,r8", 2, 16, Cpu::exec_add_sp_r8);
    t[0xF8] = Operation::new("LD HL,SP+r8", 2, 12, Cpu::exec_ld_hl_sp_r8);
    t[0xF9] = Operation::new("LD SP,HL", 1, 8, Cpu::exec_ld_sp_hl);
    t[0xF3] = Operation::new("DI", 1, 4, Cpu::exec_di);
    t[0xFB] = Operation::new("EI", 1, 4, Cpu::exec_ei);

    t
}

fn build_cb_table() -> OpTable {
    let mut t: OpTable = [None; 256];

    for cb in 0..=0xFFu8 {
        let z = cb & 0x07;
        t[cb as usize] = match cb >> 6 {
            0 => Operation::new("ROT r", 2, mem_cost(z, 8, 16), Cpu::exec_cb_shift),
            1 => Operation::new("BIT b,r", 2, mem_cost(z, 8, 12), Cpu::exec_cb_bit),
            2 => Operation::new("RES b,r", 2, mem_cost(z, 8, 16), Cpu::exec_cb_res),
            _ => Operation::new("SET b,r", 2, mem_cost(z, 8, 16), Cpu::exec_cb_set),
        };
    }

    t
}

mod alu;
mod exec;
mod helpers;
mod init;
pub mod interrupts;
pub mod ops;
mod regs;

pub use interrupts::Interrupt;
pub use ops::Operation;
pub use regs::{Reg16, Reg8, Registers};

use crate::error::{Error, Result};

/// Lead byte selecting the CB-prefixed opcode table.
pub const PREFIX: u8 = 0xCB;

/// Cost of one `step` while the CPU sits in HALT/STOP.
pub const HALTED_CYCLES: u32 = 4;

/// Flag bits in the F register.
///
/// Layout (bit index in the byte, from MSB to LSB):
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
/// - bits 0–3 are always zero.
#[derive(Clone, Copy, Debug)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}

/// Abstraction over the Game Boy address space as seen by the CPU.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);
}

/// LR35902 instruction engine.
///
/// The CPU owns only its register file and the IME/HALT latches; all memory
/// traffic goes through the [`Bus`] passed to [`Cpu::step`].
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    pub halted: bool,
    /// Set by the jump helpers while a routine runs; tells `step` that a
    /// branch moved PC itself.
    branched: bool,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        let bit = flag as u8;
        (self.regs.f() & (1 << bit)) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let bit = flag as u8;
        let f = self.regs.f();
        let f = if value { f | (1 << bit) } else { f & !(1 << bit) };
        self.regs.set(Reg8::F, f);
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.set(Reg8::F, 0);
    }

    /// Execute one instruction and return the T-cycles it took.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        if self.halted {
            return Ok(HALTED_CYCLES);
        }

        let pc = self.regs.pc;
        let lead = bus.read8(pc);
        let (opcode, prefixed) = if lead == PREFIX {
            (bus.read8(pc.wrapping_add(1)), true)
        } else {
            (lead, false)
        };

        let op = match ops::lookup(opcode, prefixed) {
            Some(op) => op,
            None => {
                log::error!(
                    "GB CPU invalid opcode {}0x{:02X} at PC=0x{:04X} AF=0x{:04X} BC=0x{:04X} DE=0x{:04X} HL=0x{:04X} SP=0x{:04X}",
                    if prefixed { "CB " } else { "" },
                    opcode,
                    pc,
                    self.regs.af(),
                    self.regs.bc(),
                    self.regs.de(),
                    self.regs.hl(),
                    self.regs.sp,
                );
                return Err(Error::InvalidOpcode {
                    opcode,
                    prefixed,
                    pc,
                });
            }
        };

        self.branched = false;
        (op.execute)(self, bus, opcode);

        if op.branch && self.branched {
            return Ok(op.cycles);
        }

        self.regs.pc = match pc.checked_add(op.length as u16) {
            Some(next) => next,
            None => {
                log::error!(
                    "GB CPU PC overflow: {} at 0x{:04X} (length {})",
                    op.mnemonic,
                    pc,
                    op.length
                );
                return Err(Error::PcOutOfRange {
                    pc,
                    length: op.length,
                });
            }
        };

        Ok(if op.branch {
            op.not_taken_cycles
        } else {
            op.cycles
        })
    }
}

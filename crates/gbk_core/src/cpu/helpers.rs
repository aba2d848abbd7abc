use super::{Bus, Cpu, Flag, Reg16, Reg8};

/// Register order used by the 3-bit operand fields of the opcode map.
const REG8_ORDER: [Option<Reg8>; 8] = [
    Some(Reg8::B),
    Some(Reg8::C),
    Some(Reg8::D),
    Some(Reg8::E),
    Some(Reg8::H),
    Some(Reg8::L),
    None, // (HL)
    Some(Reg8::A),
];

impl Cpu {
    /// Read an 8-bit register or (HL) by index:
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
    #[inline]
    pub(super) fn read_reg8(&mut self, bus: &mut dyn Bus, index: u8) -> u8 {
        match REG8_ORDER[(index & 0x07) as usize] {
            Some(reg) => self.regs.get(reg),
            None => bus.read8(self.regs.hl()),
        }
    }

    /// Write an 8-bit register or (HL) by index; same encoding as `read_reg8`.
    #[inline]
    pub(super) fn write_reg8(&mut self, bus: &mut dyn Bus, index: u8, value: u8) {
        match REG8_ORDER[(index & 0x07) as usize] {
            Some(reg) => self.regs.set(reg, value),
            None => bus.write8(self.regs.hl(), value),
        }
    }

    /// 16-bit register by the 2-bit `rr` field of LD/INC/DEC/ADD: BC, DE, HL, SP.
    pub(super) fn read_rr(&self, index: u8) -> u16 {
        match index & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => self.regs.hl(),
            _ => self.regs.sp,
        }
    }

    pub(super) fn write_rr(&mut self, index: u8, value: u16) {
        match index & 0x03 {
            0 => self.regs.set_pair(Reg16::BC, value),
            1 => self.regs.set_pair(Reg16::DE, value),
            2 => self.regs.set_pair(Reg16::HL, value),
            _ => self.regs.sp = value,
        }
    }

    /// PUSH/POP variant of the `rr` field, where slot 3 is AF instead of SP.
    pub(super) fn stack_pair(index: u8) -> Reg16 {
        match index & 0x03 {
            0 => Reg16::BC,
            1 => Reg16::DE,
            2 => Reg16::HL,
            _ => Reg16::AF,
        }
    }

    /// Immediate byte following the opcode. PC still points at the opcode
    /// while a routine runs.
    #[inline]
    pub(super) fn imm8(&self, bus: &mut dyn Bus) -> u8 {
        bus.read8(self.regs.pc.wrapping_add(1))
    }

    /// Little-endian immediate word following the opcode.
    #[inline]
    pub(super) fn imm16(&self, bus: &mut dyn Bus) -> u16 {
        let lo = bus.read8(self.regs.pc.wrapping_add(1));
        let hi = bus.read8(self.regs.pc.wrapping_add(2));
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(crate) fn push_u16(&mut self, bus: &mut dyn Bus, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        // Stack grows downward: memory[SP] = low, memory[SP+1] = high.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16(&mut self, bus: &mut dyn Bus) -> u16 {
        let lo = bus.read8(self.regs.sp);
        let hi = bus.read8(self.regs.sp.wrapping_add(1));
        self.regs.sp = self.regs.sp.wrapping_add(2);
        u16::from_le_bytes([lo, hi])
    }

    /// Move PC and mark the running instruction as a taken branch.
    #[inline]
    pub(super) fn jump(&mut self, addr: u16) {
        self.regs.pc = addr;
        self.branched = true;
    }

    /// Condition field of JR/JP/CALL/RET cc: NZ, Z, NC, C.
    #[inline]
    pub(super) fn cc_condition(&self, cc: u8) -> bool {
        match cc & 0x03 {
            0 => !self.get_flag(Flag::Z),
            1 => self.get_flag(Flag::Z),
            2 => !self.get_flag(Flag::C),
            _ => self.get_flag(Flag::C),
        }
    }

    /// Relative jump: the signed displacement is applied to the address of
    /// the next instruction (PC+2).
    pub(super) fn jr(&mut self, bus: &mut dyn Bus, cond: bool) {
        if cond {
            let offset = self.imm8(bus) as i8;
            let target = self.regs.pc.wrapping_add(2).wrapping_add(offset as u16);
            self.jump(target);
        }
    }

    pub(super) fn jp_cond(&mut self, bus: &mut dyn Bus, cond: bool) {
        if cond {
            let addr = self.imm16(bus);
            self.jump(addr);
        }
    }

    /// CALL pushes the address after the 3-byte instruction.
    pub(super) fn call_cond(&mut self, bus: &mut dyn Bus, cond: bool) {
        if cond {
            let addr = self.imm16(bus);
            let ret = self.regs.pc.wrapping_add(3);
            self.push_u16(bus, ret);
            self.jump(addr);
        }
    }

    pub(super) fn ret_cond(&mut self, bus: &mut dyn Bus, cond: bool) {
        if cond {
            let addr = self.pop_u16(bus);
            self.jump(addr);
        }
    }
}

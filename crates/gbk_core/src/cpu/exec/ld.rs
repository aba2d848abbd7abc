use crate::cpu::{Bus, Cpu, Reg8};

impl Cpu {
    /// Address for the (BC)/(DE)/(HL+)/(HL-) forms in column 2 and A.
    fn indirect_addr(&mut self, opcode: u8) -> u16 {
        match (opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            _ => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(in crate::cpu) fn exec_ld_r_r(&mut self, bus: &mut dyn Bus, opcode: u8) {
        debug_assert!((0x40..=0x7F).contains(&opcode) && opcode != 0x76);
        let dst = (opcode >> 3) & 0x07;
        let src = opcode & 0x07;
        let value = self.read_reg8(bus, src);
        self.write_reg8(bus, dst, value);
    }

    pub(in crate::cpu) fn exec_ld_r_d8(&mut self, bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(opcode & 0xC7 == 0x06);
        let value = self.imm8(bus);
        self.write_reg8(bus, (opcode >> 3) & 0x07, value);
    }

    pub(in crate::cpu) fn exec_ld_rr_d16(&mut self, bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(opcode & 0xCF == 0x01);
        let value = self.imm16(bus);
        self.write_rr(opcode >> 4, value);
    }

    pub(in crate::cpu) fn exec_ld_ind_a(&mut self, bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(matches!(opcode, 0x02 | 0x12 | 0x22 | 0x32));
        let addr = self.indirect_addr(opcode);
        bus.write8(addr, self.regs.a());
    }

    pub(in crate::cpu) fn exec_ld_a_ind(&mut self, bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(matches!(opcode, 0x0A | 0x1A | 0x2A | 0x3A));
        let addr = self.indirect_addr(opcode);
        let value = bus.read8(addr);
        self.regs.set_a(value);
    }

    pub(in crate::cpu) fn exec_ld_a16_sp(&mut self, bus: &mut dyn Bus, _opcode: u8) {
        let addr = self.imm16(bus);
        let [hi, lo] = self.regs.sp.to_be_bytes();
        bus.write8(addr, lo);
        bus.write8(addr.wrapping_add(1), hi);
    }

    // LDH (a8),A / LDH A,(a8) / LD (C),A / LD A,(C) all address 0xFF00+n.

    pub(in crate::cpu) fn exec_ldh_a8_a(&mut self, bus: &mut dyn Bus, _opcode: u8) {
        let addr = 0xFF00 | self.imm8(bus) as u16;
        bus.write8(addr, self.regs.a());
    }

    pub(in crate::cpu) fn exec_ldh_a_a8(&mut self, bus: &mut dyn Bus, _opcode: u8) {
        let addr = 0xFF00 | self.imm8(bus) as u16;
        let value = bus.read8(addr);
        self.regs.set_a(value);
    }

    pub(in crate::cpu) fn exec_ld_c_a(&mut self, bus: &mut dyn Bus, _opcode: u8) {
        let addr = 0xFF00 | self.regs.get(Reg8::C) as u16;
        bus.write8(addr, self.regs.a());
    }

    pub(in crate::cpu) fn exec_ld_a_c(&mut self, bus: &mut dyn Bus, _opcode: u8) {
        let addr = 0xFF00 | self.regs.get(Reg8::C) as u16;
        let value = bus.read8(addr);
        self.regs.set_a(value);
    }

    pub(in crate::cpu) fn exec_ld_a16_a(&mut self, bus: &mut dyn Bus, _opcode: u8) {
        let addr = self.imm16(bus);
        bus.write8(addr, self.regs.a());
    }

    pub(in crate::cpu) fn exec_ld_a_a16(&mut self, bus: &mut dyn Bus, _opcode: u8) {
        let addr = self.imm16(bus);
        let value = bus.read8(addr);
        self.regs.set_a(value);
    }

    pub(in crate::cpu) fn exec_ld_hl_sp_r8(&mut self, bus: &mut dyn Bus, _opcode: u8) {
        let imm = self.imm8(bus);
        let value = self.alu_add16_signed(self.regs.sp, imm);
        self.regs.set_hl(value);
    }

    pub(in crate::cpu) fn exec_ld_sp_hl(&mut self, _bus: &mut dyn Bus, _opcode: u8) {
        self.regs.sp = self.regs.hl();
    }
}

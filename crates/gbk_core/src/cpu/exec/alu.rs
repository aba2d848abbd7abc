use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    /// 0x80-0xBF: ADD/ADC/SUB/SBC/AND/XOR/OR/CP A,r.
    pub(in crate::cpu) fn exec_alu_r(&mut self, bus: &mut dyn Bus, opcode: u8) {
        debug_assert!((0x80..=0xBF).contains(&opcode));
        let value = self.read_reg8(bus, opcode & 0x07);
        self.alu_op(opcode >> 3, value);
    }

    /// 0xC6, 0xCE, ... 0xFE: the same eight operations with an immediate.
    pub(in crate::cpu) fn exec_alu_d8(&mut self, bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(opcode & 0xC7 == 0xC6);
        let value = self.imm8(bus);
        self.alu_op(opcode >> 3, value);
    }

    pub(in crate::cpu) fn exec_add_hl_rr(&mut self, _bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(opcode & 0xCF == 0x09);
        let value = self.read_rr(opcode >> 4);
        self.alu_add16_hl(value);
    }

    pub(in crate::cpu) fn exec_add_sp_r8(&mut self, bus: &mut dyn Bus, _opcode: u8) {
        let imm = self.imm8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
    }

    pub(in crate::cpu) fn exec_daa(&mut self, _bus: &mut dyn Bus, _opcode: u8) {
        self.alu_daa();
    }

    pub(in crate::cpu) fn exec_cpl(&mut self, _bus: &mut dyn Bus, _opcode: u8) {
        let a = !self.regs.a();
        self.regs.set_a(a);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
    }

    pub(in crate::cpu) fn exec_scf(&mut self, _bus: &mut dyn Bus, _opcode: u8) {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, true);
    }

    pub(in crate::cpu) fn exec_ccf(&mut self, _bus: &mut dyn Bus, _opcode: u8) {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, !carry);
    }

    /// RLCA/RRCA/RLA/RRA: the CB rotate on A, except Z is always cleared.
    pub(in crate::cpu) fn exec_rotate_a(&mut self, _bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(matches!(opcode, 0x07 | 0x0F | 0x17 | 0x1F));
        let result = self.shift_op(opcode >> 3, self.regs.a());
        self.regs.set_a(result);
        self.set_flag(Flag::Z, false);
    }
}

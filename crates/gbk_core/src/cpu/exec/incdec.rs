use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(in crate::cpu) fn exec_inc_r(&mut self, bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(opcode & 0xC7 == 0x04);
        let index = (opcode >> 3) & 0x07;
        let value = self.read_reg8(bus, index);
        let result = self.alu_inc8(value);
        self.write_reg8(bus, index, result);
    }

    pub(in crate::cpu) fn exec_dec_r(&mut self, bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(opcode & 0xC7 == 0x05);
        let index = (opcode >> 3) & 0x07;
        let value = self.read_reg8(bus, index);
        let result = self.alu_dec8(value);
        self.write_reg8(bus, index, result);
    }

    // 16-bit INC/DEC touch no flags.

    pub(in crate::cpu) fn exec_inc_rr(&mut self, _bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(opcode & 0xCF == 0x03);
        let index = opcode >> 4;
        let value = self.read_rr(index).wrapping_add(1);
        self.write_rr(index, value);
    }

    pub(in crate::cpu) fn exec_dec_rr(&mut self, _bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(opcode & 0xCF == 0x0B);
        let index = opcode >> 4;
        let value = self.read_rr(index).wrapping_sub(1);
        self.write_rr(index, value);
    }
}

use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(in crate::cpu) fn exec_push(&mut self, bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(opcode & 0xCF == 0xC5);
        let value = self.regs.pair(Self::stack_pair(opcode >> 4));
        self.push_u16(bus, value);
    }

    /// POP AF goes through `set_pair`, which drops the low nibble of F.
    pub(in crate::cpu) fn exec_pop(&mut self, bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(opcode & 0xCF == 0xC1);
        let value = self.pop_u16(bus);
        self.regs.set_pair(Self::stack_pair(opcode >> 4), value);
    }
}

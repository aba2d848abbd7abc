use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(in crate::cpu) fn exec_jr(&mut self, bus: &mut dyn Bus, _opcode: u8) {
        self.jr(bus, true);
    }

    pub(in crate::cpu) fn exec_jr_cc(&mut self, bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(matches!(opcode, 0x20 | 0x28 | 0x30 | 0x38));
        let cond = self.cc_condition(opcode >> 3);
        self.jr(bus, cond);
    }

    pub(in crate::cpu) fn exec_jp(&mut self, bus: &mut dyn Bus, _opcode: u8) {
        self.jp_cond(bus, true);
    }

    pub(in crate::cpu) fn exec_jp_cc(&mut self, bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(matches!(opcode, 0xC2 | 0xCA | 0xD2 | 0xDA));
        let cond = self.cc_condition(opcode >> 3);
        self.jp_cond(bus, cond);
    }

    pub(in crate::cpu) fn exec_jp_hl(&mut self, _bus: &mut dyn Bus, _opcode: u8) {
        let addr = self.regs.hl();
        self.jump(addr);
    }

    pub(in crate::cpu) fn exec_call(&mut self, bus: &mut dyn Bus, _opcode: u8) {
        self.call_cond(bus, true);
    }

    pub(in crate::cpu) fn exec_call_cc(&mut self, bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(matches!(opcode, 0xC4 | 0xCC | 0xD4 | 0xDC));
        let cond = self.cc_condition(opcode >> 3);
        self.call_cond(bus, cond);
    }

    pub(in crate::cpu) fn exec_ret(&mut self, bus: &mut dyn Bus, _opcode: u8) {
        self.ret_cond(bus, true);
    }

    pub(in crate::cpu) fn exec_ret_cc(&mut self, bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(matches!(opcode, 0xC0 | 0xC8 | 0xD0 | 0xD8));
        let cond = self.cc_condition(opcode >> 3);
        self.ret_cond(bus, cond);
    }

    pub(in crate::cpu) fn exec_reti(&mut self, bus: &mut dyn Bus, _opcode: u8) {
        self.ret_cond(bus, true);
        self.ime = true;
    }

    /// RST n: the vector is encoded in bits 5-3 of the opcode.
    pub(in crate::cpu) fn exec_rst(&mut self, bus: &mut dyn Bus, opcode: u8) {
        debug_assert!(opcode & 0xC7 == 0xC7);
        let ret = self.regs.pc.wrapping_add(1);
        self.push_u16(bus, ret);
        self.jump((opcode & 0x38) as u16);
    }
}

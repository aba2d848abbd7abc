use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(in crate::cpu) fn exec_nop(&mut self, _bus: &mut dyn Bus, _opcode: u8) {}

    pub(in crate::cpu) fn exec_halt(&mut self, _bus: &mut dyn Bus, _opcode: u8) {
        self.halted = true;
    }

    /// STOP shares HALT's wait state; the joypad interrupt ends it.
    pub(in crate::cpu) fn exec_stop(&mut self, _bus: &mut dyn Bus, _opcode: u8) {
        log::debug!("GB CPU STOP at PC=0x{:04X}", self.regs.pc);
        self.halted = true;
    }

    pub(in crate::cpu) fn exec_di(&mut self, _bus: &mut dyn Bus, _opcode: u8) {
        self.ime = false;
    }

    pub(in crate::cpu) fn exec_ei(&mut self, _bus: &mut dyn Bus, _opcode: u8) {
        self.ime = true;
    }
}

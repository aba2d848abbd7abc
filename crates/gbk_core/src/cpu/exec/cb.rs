use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    /// Rotate/shift selected by `kind` (bits 5-3 of a CB opcode):
    /// RLC, RRC, RL, RR, SLA, SRA, SWAP, SRL.
    ///
    /// Sets Z from the result, clears N and H, and sets C from the bit
    /// shifted out (SWAP clears it).
    pub(in crate::cpu) fn shift_op(&mut self, kind: u8, value: u8) -> u8 {
        let carry_in = self.get_flag(Flag::C);
        let (result, carry) = match kind & 0x07 {
            0 => (value.rotate_left(1), value & 0x80 != 0),
            1 => (value.rotate_right(1), value & 0x01 != 0),
            2 => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            3 => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            4 => (value << 1, value & 0x80 != 0),
            5 => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            6 => (value.rotate_left(4), false),
            _ => (value >> 1, value & 0x01 != 0),
        };

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::C, carry);
        result
    }

    /// CB 0x00-0x3F.
    pub(in crate::cpu) fn exec_cb_shift(&mut self, bus: &mut dyn Bus, cb: u8) {
        debug_assert!(cb < 0x40);
        let z = cb & 0x07;
        let value = self.read_reg8(bus, z);
        let result = self.shift_op(cb >> 3, value);
        self.write_reg8(bus, z, result);
    }

    /// BIT b,r: Z is the complement of the tested bit; H=1, N=0, C kept.
    pub(in crate::cpu) fn exec_cb_bit(&mut self, bus: &mut dyn Bus, cb: u8) {
        debug_assert!((0x40..=0x7F).contains(&cb));
        let bit = (cb >> 3) & 0x07;
        let value = self.read_reg8(bus, cb & 0x07);
        self.set_flag(Flag::Z, value & (1 << bit) == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, true);
    }

    pub(in crate::cpu) fn exec_cb_res(&mut self, bus: &mut dyn Bus, cb: u8) {
        debug_assert!((0x80..=0xBF).contains(&cb));
        let bit = (cb >> 3) & 0x07;
        let z = cb & 0x07;
        let value = self.read_reg8(bus, z) & !(1 << bit);
        self.write_reg8(bus, z, value);
    }

    pub(in crate::cpu) fn exec_cb_set(&mut self, bus: &mut dyn Bus, cb: u8) {
        debug_assert!(cb >= 0xC0);
        let bit = (cb >> 3) & 0x07;
        let z = cb & 0x07;
        let value = self.read_reg8(bus, z) | (1 << bit);
        self.write_reg8(bus, z, value);
    }
}

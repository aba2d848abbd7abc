use super::{Cpu, Reg16, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Power-on state: every register zero, execution starts at 0x0000
    /// (where the boot ROM is mapped).
    pub fn new() -> Self {
        Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            branched: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Initialize registers to match the DMG boot ROM's state after it
    /// hands control to cartridge code at 0x0100.
    pub fn apply_post_boot_state(&mut self) {
        self.regs.set_pair(Reg16::AF, 0x01B0);
        self.regs.set_pair(Reg16::BC, 0x0013);
        self.regs.set_pair(Reg16::DE, 0x00D8);
        self.regs.set_pair(Reg16::HL, 0x014D);
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;
        // IME is clear at 0x0100; the game enables interrupts itself.
        self.ime = false;
        self.halted = false;
    }
}

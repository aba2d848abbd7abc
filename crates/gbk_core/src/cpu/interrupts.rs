use super::{Bus, Cpu};

/// T-cycles spent pushing PC and jumping to a vector.
pub const INTERRUPT_ENTRY_CYCLES: u32 = 20;

/// The five interrupt lines, in service priority order.
///
/// The discriminant is the bit index in IE/IF.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interrupt {
    VBlank = 0,
    Lcd = 1,
    Timer = 2,
    Serial = 3,
    Joypad = 4,
}

impl Interrupt {
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::Lcd,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    #[inline]
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Fixed handler address: 0x40, 0x48, 0x50, 0x58, 0x60.
    #[inline]
    pub const fn vector(self) -> u16 {
        0x0040 + (self as u16) * 8
    }
}

impl Cpu {
    /// Dispatch into an interrupt handler.
    ///
    /// Clears IME and HALT, pushes the current PC and jumps to the vector.
    /// The caller has already acknowledged the request bit.
    pub fn enter_interrupt<B: Bus>(&mut self, bus: &mut B, interrupt: Interrupt) -> u32 {
        log::debug!(
            "GB CPU interrupt: {:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X}",
            interrupt,
            interrupt.vector(),
            self.regs.pc,
            self.regs.sp
        );

        self.ime = false;
        self.halted = false;

        let pc = self.regs.pc;
        self.push_u16(bus, pc);
        self.regs.pc = interrupt.vector();

        INTERRUPT_ENTRY_CYCLES
    }
}

use crate::cpu::Interrupt;

use super::InterruptController;

const SC_START: u8 = 0x80;
const SC_INTERNAL_CLOCK: u8 = 0x01;

/// SB/SC serial port with no link partner.
///
/// An internally clocked transfer completes as soon as it starts: the
/// outgoing byte is captured, nothing comes back (SB reads 0xFF) and the
/// Serial interrupt is raised. Test ROMs print through this path.
#[derive(Clone, Debug, Default)]
pub struct Serial {
    sb: u8,
    sc: u8,
    output: Vec<u8>,
}

impl Serial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_sb(&self) -> u8 {
        self.sb
    }

    pub fn write_sb(&mut self, value: u8) {
        self.sb = value;
    }

    /// Bits 6-1 are unused and read as 1.
    pub fn read_sc(&self) -> u8 {
        0x7E | self.sc
    }

    pub fn write_sc(&mut self, value: u8, interrupts: &mut InterruptController) {
        self.sc = value & (SC_START | SC_INTERNAL_CLOCK);
        if self.sc == SC_START | SC_INTERNAL_CLOCK {
            self.output.push(self.sb);
            self.sb = 0xFF;
            self.sc &= !SC_START;
            interrupts.request(Interrupt::Serial);
        }
    }

    /// Bytes sent since the last [`Serial::take_output`]. Nothing is
    /// dropped, so long runs should drain it.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }
}

use crate::cpu::Interrupt;

/// IE/IF pair.
///
/// Peripherals only ever set request bits; the master enable lives on the
/// CPU and is passed in when the machine asks for the next interrupt.
#[derive(Clone, Debug, Default)]
pub struct InterruptController {
    enable: u8,
    request: u8,
}

impl InterruptController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn request(&mut self, interrupt: Interrupt) {
        self.request |= interrupt.bit();
    }

    /// Requested and enabled lines, regardless of IME.
    #[inline]
    pub fn pending(&self) -> u8 {
        self.enable & self.request & 0x1F
    }

    /// Highest-priority line that is both requested and enabled, with its
    /// request bit acknowledged. Nothing is taken while IME is off.
    pub fn take_pending(&mut self, ime: bool) -> Option<Interrupt> {
        if !ime {
            return None;
        }
        let pending = self.pending();
        let interrupt = Interrupt::ALL
            .into_iter()
            .find(|irq| pending & irq.bit() != 0)?;
        self.request &= !interrupt.bit();
        Some(interrupt)
    }

    /// IF: bits 7-5 always read as 1.
    pub fn read_if(&self) -> u8 {
        0xE0 | self.request
    }

    pub fn write_if(&mut self, value: u8) {
        self.request = value & 0x1F;
    }

    pub fn read_ie(&self) -> u8 {
        self.enable
    }

    pub fn write_ie(&mut self, value: u8) {
        self.enable = value;
    }
}

/// T-cycles an OAM DMA transfer keeps the bus busy.
pub const DMA_CYCLES: u32 = 160;
/// Bytes copied into OAM.
pub const DMA_LENGTH: u16 = 0xA0;

/// OAM DMA engine.
///
/// The copy itself happens at the end of the transfer and goes through the
/// bus; until then the bus locks out everything below HRAM.
#[derive(Clone, Debug, Default)]
pub struct Dma {
    active: bool,
    source: u16,
    elapsed: u32,
    /// Last value written to FF46.
    page: u8,
}

impl Dma {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn page(&self) -> u8 {
        self.page
    }

    pub fn trigger(&mut self, page: u8) {
        log::debug!("GB DMA start: source=0x{:02X}00", page);
        self.page = page;
        self.source = (page as u16) << 8;
        self.elapsed = 0;
        self.active = true;
    }

    /// Advance the transfer; returns the source base once it completes.
    pub fn tick(&mut self, cycles: u32) -> Option<u16> {
        if !self.active {
            return None;
        }
        self.elapsed += cycles;
        if self.elapsed < DMA_CYCLES {
            return None;
        }
        self.active = false;
        Some(self.source)
    }
}

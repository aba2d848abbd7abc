mod boot;
pub mod bus;
pub mod cartridge;
pub mod dma;
mod gameboy;
pub mod interrupts;
pub mod joypad;
pub mod ppu;
pub mod serial;
pub mod timer;

pub use boot::{BOOT_ROM_SIZE, BUILTIN_BOOT_ROM};
pub use bus::MemoryBus;
pub use cartridge::Cartridge;
pub use gameboy::GameBoy;
pub use interrupts::InterruptController;

/// Size of the boot ROM overlay at 0x0000.
pub const BOOT_ROM_SIZE: usize = 0x100;

// LCD off, clear VRAM, BGP=0xFC, LCD on, BC/DE post-boot values.
const PROLOGUE: [u8; 28] = [
    0x31, 0xFE, 0xFF, // LD SP,0xFFFE
    0xAF, //             XOR A
    0xE0, 0x40, //       LDH (LCDC),A
    0x21, 0xFF, 0x9F, // LD HL,0x9FFF
    0x32, //             LD (HL-),A
    0xCB, 0x7C, //       BIT 7,H
    0x20, 0xFB, //       JR NZ,-5
    0x3E, 0xFC, //       LD A,0xFC
    0xE0, 0x47, //       LDH (BGP),A
    0x3E, 0x91, //       LD A,0x91
    0xE0, 0x40, //       LDH (LCDC),A
    0x01, 0x13, 0x00, // LD BC,0x0013
    0x11, 0xD8, 0x00, // LD DE,0x00D8
];

// AF/HL post-boot values, then unmap. The LDH ends at 0x00FF so the next
// fetch comes from the cartridge at 0x0100.
const EPILOGUE: [u8; 11] = [
    0x21, 0xB0, 0x01, // LD HL,0x01B0
    0xE5, //             PUSH HL
    0xF1, //             POP AF
    0x21, 0x4D, 0x01, // LD HL,0x014D
    0x00, //             NOP
    0xE0, 0x50, //       LDH (BOOT),A
];

/// Boot image used by `BootRom::Builtin`. Between the prologue and the
/// epilogue it is all NOPs.
pub static BUILTIN_BOOT_ROM: [u8; BOOT_ROM_SIZE] = build();

const fn build() -> [u8; BOOT_ROM_SIZE] {
    let mut rom = [0u8; BOOT_ROM_SIZE];
    let mut i = 0;
    while i < PROLOGUE.len() {
        rom[i] = PROLOGUE[i];
        i += 1;
    }
    let base = BOOT_ROM_SIZE - EPILOGUE.len();
    let mut i = 0;
    while i < EPILOGUE.len() {
        rom[base + i] = EPILOGUE[i];
        i += 1;
    }
    rom
}

/// IO register values the DMG boot ROM leaves behind, applied when the
/// boot ROM is skipped.
pub const POST_BOOT_IO: [(u16, u8); 14] = [
    (0xFF05, 0x00),
    (0xFF06, 0x00),
    (0xFF07, 0x00),
    (0xFF0F, 0x01),
    (0xFF40, 0x91),
    (0xFF42, 0x00),
    (0xFF43, 0x00),
    (0xFF45, 0x00),
    (0xFF47, 0xFC),
    (0xFF48, 0xFF),
    (0xFF49, 0xFF),
    (0xFF4A, 0x00),
    (0xFF4B, 0x00),
    (0xFFFF, 0x00),
];

/// DIV value at 0x0100 on DMG.
pub const POST_BOOT_DIV: u8 = 0xAB;

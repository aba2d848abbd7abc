pub mod key;

pub use key::Key;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new_rgb(0, 0, 0);
    pub const WHITE: Color = Color::new_rgb(255, 255, 255);

    /// The two intermediate DMG shades.
    pub const LIGHT_GRAY: Color = Color::new_rgb(0xAA, 0xAA, 0xAA);
    pub const DARK_GRAY: Color = Color::new_rgb(0x55, 0x55, 0x55);

    #[inline]
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    #[inline]
    pub const fn new_rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub fn to_u32(&self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }
}

/// Shade 0 (lightest) to 3 (darkest), as produced by a monochrome LCD.
pub const DMG_PALETTE: [Color; 4] = [
    Color::WHITE,
    Color::LIGHT_GRAY,
    Color::DARK_GRAY,
    Color::BLACK,
];

/// The eight inputs wired to the P1 joypad matrix.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    Right,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start,
}

impl Key {
    pub const ALL: [Key; 8] = [
        Key::Right,
        Key::Left,
        Key::Up,
        Key::Down,
        Key::A,
        Key::B,
        Key::Select,
        Key::Start,
    ];

    /// True for the d-pad group (P1 bit 4), false for the button group (bit 5).
    #[inline]
    pub const fn is_direction(self) -> bool {
        matches!(self, Key::Right | Key::Left | Key::Up | Key::Down)
    }

    /// Bit position of this key inside its group's low nibble.
    #[inline]
    pub const fn line(self) -> u8 {
        match self {
            Key::Right | Key::A => 0,
            Key::Left | Key::B => 1,
            Key::Up | Key::Select => 2,
            Key::Down | Key::Start => 3,
        }
    }
}

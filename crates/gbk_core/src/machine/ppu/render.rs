use crate::renderer::Renderer;
use crate::SCREEN_WIDTH;

use super::{LcdControl, Ppu};

const MAX_SPRITES_PER_LINE: usize = 10;

const ATTR_BEHIND_BG: u8 = 0x80;
const ATTR_FLIP_Y: u8 = 0x40;
const ATTR_FLIP_X: u8 = 0x20;
const ATTR_OBP1: u8 = 0x10;

/// OAM entry translated to screen coordinates.
#[derive(Clone, Copy, Debug)]
struct Sprite {
    y: i16,
    x: i16,
    tile: u8,
    attrs: u8,
}

/// Shade (0-3) that palette register `palette` assigns to colour `index`.
#[inline]
fn palette_shade(palette: u8, index: u8) -> u8 {
    (palette >> (index * 2)) & 0x03
}

impl Ppu {
    /// Composite scanline LY and hand its 160 pixels to the renderer.
    pub(super) fn render_scanline(&mut self, renderer: &mut dyn Renderer) {
        let ly = self.ly;
        let sprites = self.sprites_on_line(ly);
        let window_active = self.lcdc.contains(LcdControl::WINDOW_ENABLE) && ly >= self.wy;
        let mut window_drawn = false;

        for x in 0..SCREEN_WIDTH as u8 {
            let in_window = window_active && x as u16 + 7 >= self.wx as u16;
            let bg_index = self.background_index(x, ly, in_window);
            window_drawn |= in_window && self.lcdc.contains(LcdControl::BG_ENABLE);

            let shade = self
                .sprite_shade(&sprites, x, ly, bg_index)
                .unwrap_or_else(|| palette_shade(self.bgp, bg_index));
            renderer.render(x, ly, self.palette[shade as usize]);
        }

        if window_drawn {
            self.window_line = self.window_line.wrapping_add(1);
        }
    }

    /// Background or window colour index (before palette) at screen `x`.
    fn background_index(&self, x: u8, ly: u8, in_window: bool) -> u8 {
        // On DMG, LCDC bit 0 blanks both background and window.
        if !self.lcdc.contains(LcdControl::BG_ENABLE) {
            return 0;
        }

        if in_window {
            let map = if self.lcdc.contains(LcdControl::WINDOW_MAP_HIGH) {
                0x9C00
            } else {
                0x9800
            };
            let wx = (x as u16 + 7 - self.wx as u16) as u8;
            return self.tile_map_index(map, wx, self.window_line);
        }

        let map = if self.lcdc.contains(LcdControl::BG_MAP_HIGH) {
            0x9C00
        } else {
            0x9800
        };
        self.tile_map_index(map, x.wrapping_add(self.scx), ly.wrapping_add(self.scy))
    }

    /// Colour index at (`px`, `py`) of the 256x256 layer described by the
    /// tile map at `map_base`.
    fn tile_map_index(&self, map_base: u16, px: u8, py: u8) -> u8 {
        let entry = map_base + (py as u16 / 8) * 32 + px as u16 / 8;
        let tile = self.vram_at(entry);
        let tile_addr = if self.lcdc.contains(LcdControl::TILE_DATA_UNSIGNED) {
            0x8000 + tile as u16 * 16
        } else {
            (0x9000i32 + (tile as i8 as i32) * 16) as u16
        };
        self.tile_index(tile_addr, px & 0x07, py & 0x07)
    }

    /// Decode one pixel of a 2bpp tile. `row` may exceed 7 for the lower
    /// half of an 8x16 sprite, which lives in the following tile.
    fn tile_index(&self, tile_addr: u16, col: u8, row: u8) -> u8 {
        let row_addr = tile_addr + row as u16 * 2;
        let lo = self.vram_at(row_addr);
        let hi = self.vram_at(row_addr + 1);
        let bit = 7 - col;
        (((hi >> bit) & 0x01) << 1) | ((lo >> bit) & 0x01)
    }

    #[inline]
    fn vram_at(&self, addr: u16) -> u8 {
        self.vram[(addr & 0x1FFF) as usize]
    }

    fn sprite_height(&self) -> i16 {
        if self.lcdc.contains(LcdControl::OBJ_TALL) {
            16
        } else {
            8
        }
    }

    /// Up to ten sprites overlapping line `ly`, in OAM order, then sorted by
    /// x. The sort is stable so OAM order breaks ties.
    fn sprites_on_line(&self, ly: u8) -> Vec<Sprite> {
        if !self.lcdc.contains(LcdControl::OBJ_ENABLE) {
            return Vec::new();
        }

        let height = self.sprite_height();
        let line = ly as i16;
        let mut sprites: Vec<Sprite> = self
            .oam
            .chunks_exact(4)
            .map(|entry| Sprite {
                y: entry[0] as i16 - 16,
                x: entry[1] as i16 - 8,
                tile: entry[2],
                attrs: entry[3],
            })
            .filter(|s| line >= s.y && line < s.y + height)
            .take(MAX_SPRITES_PER_LINE)
            .collect();
        sprites.sort_by_key(|s| s.x);
        sprites
    }

    /// Shade of the first opaque sprite pixel at `x`, or `None` to show the
    /// background.
    fn sprite_shade(&self, sprites: &[Sprite], x: u8, ly: u8, bg_index: u8) -> Option<u8> {
        let height = self.sprite_height();

        for sprite in sprites {
            let mut col = x as i16 - sprite.x;
            if !(0..8).contains(&col) {
                continue;
            }
            let mut row = ly as i16 - sprite.y;
            if sprite.attrs & ATTR_FLIP_Y != 0 {
                row = height - 1 - row;
            }
            if sprite.attrs & ATTR_FLIP_X != 0 {
                col = 7 - col;
            }

            let tile = if height == 16 {
                sprite.tile & 0xFE
            } else {
                sprite.tile
            };
            let index = self.tile_index(0x8000 + tile as u16 * 16, col as u8, row as u8);
            // Colour 0 is transparent.
            if index == 0 {
                continue;
            }
            if sprite.attrs & ATTR_BEHIND_BG != 0 && bg_index != 0 {
                return None;
            }

            let palette = if sprite.attrs & ATTR_OBP1 != 0 {
                self.obp1
            } else {
                self.obp0
            };
            return Some(palette_shade(palette, index));
        }

        None
    }
}

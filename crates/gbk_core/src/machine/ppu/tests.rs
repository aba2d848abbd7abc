use gbk_common::{Color, DMG_PALETTE};

use super::*;

#[derive(Default)]
struct Recorder {
    pixels: Vec<(u8, u8, Color)>,
    refreshes: u32,
}

impl Renderer for Recorder {
    fn render(&mut self, x: u8, y: u8, color: Color) {
        self.pixels.push((x, y, color));
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }
}

const WHITE: Color = DMG_PALETTE[0];
const LIGHT: Color = DMG_PALETTE[1];
const DARK: Color = DMG_PALETTE[2];
const BLACK: Color = DMG_PALETTE[3];

fn ppu() -> Ppu {
    let mut ppu = Ppu::new(DMG_PALETTE, false);
    ppu.bgp = 0xE4;
    ppu.obp0 = 0xE4;
    ppu.obp1 = 0x1B;
    ppu
}

/// Fill tile `index` (0x8000-based) with a single colour index.
fn solid_tile(ppu: &mut Ppu, index: usize, color: u8) {
    let lo = if color & 1 != 0 { 0xFF } else { 0x00 };
    let hi = if color & 2 != 0 { 0xFF } else { 0x00 };
    for row in 0..8 {
        ppu.vram[index * 16 + row * 2] = lo;
        ppu.vram[index * 16 + row * 2 + 1] = hi;
    }
}

fn set_sprite(ppu: &mut Ppu, slot: usize, x: i16, y: i16, tile: u8, attrs: u8) {
    ppu.oam[slot * 4] = (y + 16) as u8;
    ppu.oam[slot * 4 + 1] = (x + 8) as u8;
    ppu.oam[slot * 4 + 2] = tile;
    ppu.oam[slot * 4 + 3] = attrs;
}

fn render_line(ppu: &mut Ppu, ly: u8) -> Vec<Color> {
    let mut rec = Recorder::default();
    ppu.ly = ly;
    ppu.render_scanline(&mut rec);
    assert_eq!(rec.pixels.len(), 160);
    rec.pixels.into_iter().map(|(_, _, c)| c).collect()
}

#[test]
fn one_scanline_walks_oam_transfer_hblank() {
    let mut ppu = ppu();
    let mut ic = InterruptController::new();
    let mut rec = Recorder::default();
    assert_eq!(ppu.mode(), Mode::OamSearch);
    assert_eq!(ppu.ly(), 0);

    ppu.tick(80, &mut ic, &mut rec);
    assert_eq!(ppu.mode(), Mode::LcdTransfer);
    assert_eq!(rec.pixels.len(), 160, "line composited on entering transfer");
    ppu.tick(172, &mut ic, &mut rec);
    assert_eq!(ppu.mode(), Mode::HBlank);
    ppu.tick(204, &mut ic, &mut rec);
    assert_eq!(ppu.mode(), Mode::OamSearch);
    assert_eq!(ppu.ly(), 1);
}

#[test]
fn large_ticks_carry_over_between_modes() {
    let mut ppu = ppu();
    let mut ic = InterruptController::new();
    let mut rec = Recorder::default();
    ppu.tick(80 + 172 + 204, &mut ic, &mut rec);
    assert_eq!(ppu.ly(), 1);
    assert_eq!(ppu.mode(), Mode::OamSearch);
    ppu.tick(100, &mut ic, &mut rec);
    assert_eq!(ppu.mode(), Mode::LcdTransfer);
}

#[test]
fn vblank_fires_once_per_frame_at_line_144() {
    let mut ppu = ppu();
    let mut ic = InterruptController::new();
    ic.write_ie(Interrupt::VBlank.bit());
    let mut rec = Recorder::default();

    let mut hits = Vec::new();
    for step in 0..(2 * 70_224 / 4) {
        ppu.tick(4, &mut ic, &mut rec);
        if ic.take_pending(true).is_some() {
            hits.push((step, ppu.ly()));
            assert_eq!(ppu.mode(), Mode::VBlank);
        }
    }
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|&(_, ly)| ly == VBLANK_LINE));
    assert_eq!(hits[1].0 - hits[0].0, 70_224 / 4);
}

#[test]
fn vblank_spans_ten_lines_then_wraps_to_zero() {
    let mut ppu = ppu();
    let mut ic = InterruptController::new();
    let mut rec = Recorder::default();
    ppu.tick(144 * 456, &mut ic, &mut rec);
    assert_eq!(ppu.ly(), 144);
    assert_eq!(ppu.mode(), Mode::VBlank);
    assert_eq!(rec.pixels.len(), 160 * 144);

    for line in 145..=153 {
        ppu.tick(456, &mut ic, &mut rec);
        assert_eq!(ppu.ly(), line);
        assert_eq!(ppu.mode(), Mode::VBlank);
    }
    assert_eq!(rec.refreshes, 0);

    ppu.tick(456, &mut ic, &mut rec);
    assert_eq!(ppu.ly(), 0);
    assert_eq!(ppu.mode(), Mode::OamSearch);
    assert_eq!(rec.refreshes, 1);
}

#[test]
fn pixels_arrive_in_raster_order() {
    let mut ppu = ppu();
    let mut ic = InterruptController::new();
    let mut rec = Recorder::default();
    ppu.tick(70_224, &mut ic, &mut rec);

    assert_eq!(rec.pixels.len(), 160 * 144);
    for (i, &(x, y, _)) in rec.pixels.iter().enumerate() {
        assert_eq!((x as usize, y as usize), (i % 160, i / 160));
    }
}

#[test]
fn stat_mode_interrupts_follow_select_bits() {
    let mut ppu = ppu();
    let mut ic = InterruptController::new();
    ic.write_ie(Interrupt::Lcd.bit());
    let mut rec = Recorder::default();

    ppu.tick(80 + 172, &mut ic, &mut rec);
    assert_eq!(ic.take_pending(true), None, "no select bits set");

    ppu.write_register(0xFF41, LcdStatus::HBLANK_SELECT.bits());
    ppu.tick(204 + 80 + 172, &mut ic, &mut rec);
    assert_eq!(ppu.mode(), Mode::HBlank);
    assert_eq!(ic.take_pending(true), Some(Interrupt::Lcd));

    ppu.write_register(0xFF41, LcdStatus::OAM_SELECT.bits());
    ppu.tick(204, &mut ic, &mut rec);
    assert_eq!(ppu.mode(), Mode::OamSearch);
    assert_eq!(ic.take_pending(true), Some(Interrupt::Lcd));
}

#[test]
fn lyc_match_sets_coincidence_and_interrupt() {
    let mut ppu = ppu();
    let mut ic = InterruptController::new();
    ic.write_ie(Interrupt::Lcd.bit());
    let mut rec = Recorder::default();

    ppu.write_register(0xFF45, 3);
    ppu.write_register(0xFF41, LcdStatus::LYC_SELECT.bits());
    assert_eq!(ppu.read_register(0xFF41) & 0x04, 0);

    ppu.tick(2 * 456, &mut ic, &mut rec);
    assert_eq!(ic.take_pending(true), None);
    ppu.tick(456, &mut ic, &mut rec);
    assert_eq!(ppu.ly(), 3);
    assert_eq!(ppu.read_register(0xFF41) & 0x04, 0x04);
    assert_eq!(ic.take_pending(true), Some(Interrupt::Lcd));

    ppu.tick(456, &mut ic, &mut rec);
    assert_eq!(ppu.read_register(0xFF41) & 0x04, 0);
}

#[test]
fn stat_reads_mode_and_keeps_read_only_bits() {
    let mut ppu = ppu();
    let mut ic = InterruptController::new();
    let mut rec = Recorder::default();
    ppu.write_register(0xFF41, 0xFF);
    // Coincidence (LY=LYC=0) and mode 2 survive the write.
    assert_eq!(ppu.read_register(0xFF41), 0x80 | 0x78 | 0x04 | 0x02);
    ppu.tick(80, &mut ic, &mut rec);
    assert_eq!(ppu.read_register(0xFF41) & 0x03, 3);
}

#[test]
fn ly_write_resets_counter() {
    let mut ppu = ppu();
    let mut ic = InterruptController::new();
    let mut rec = Recorder::default();
    ppu.tick(10 * 456, &mut ic, &mut rec);
    assert_eq!(ppu.read_register(0xFF44), 10);
    ppu.write_register(0xFF44, 0x99);
    assert_eq!(ppu.read_register(0xFF44), 0);
    assert_eq!(ppu.mode(), Mode::OamSearch);
}

#[test]
fn ly_write_during_vblank_restarts_a_full_frame() {
    let mut ppu = ppu();
    let mut ic = InterruptController::new();
    ic.write_ie(Interrupt::VBlank.bit());
    let mut rec = Recorder::default();

    ppu.tick(146 * 456, &mut ic, &mut rec);
    assert_eq!(ppu.mode(), Mode::VBlank);
    ic.take_pending(true);
    ppu.write_register(0xFF44, 0x00);
    rec.pixels.clear();

    let mut vblank_lines = 0;
    let mut vblank_irqs = 0;
    for _ in 0..154 {
        ppu.tick(456, &mut ic, &mut rec);
        if ppu.mode() == Mode::VBlank {
            vblank_lines += 1;
        }
        if ic.take_pending(true).is_some() {
            vblank_irqs += 1;
        }
    }
    assert_eq!(vblank_lines, 10);
    assert_eq!(vblank_irqs, 1);
    assert_eq!(rec.pixels.len(), 160 * 144);
    assert_eq!(ppu.ly(), 0);
}

#[test]
fn vram_locked_during_transfer_but_writes_land() {
    let mut ppu = ppu();
    let mut ic = InterruptController::new();
    let mut rec = Recorder::default();
    ppu.tick(80, &mut ic, &mut rec);
    assert_eq!(ppu.mode(), Mode::LcdTransfer);

    ppu.write_vram(0x8000, 0x42);
    assert_eq!(ppu.read_vram(0x8000), LOCKED_READ);
    ppu.tick(172, &mut ic, &mut rec);
    assert_eq!(ppu.read_vram(0x8000), 0x42);
}

#[test]
fn oam_only_readable_in_vblank() {
    let mut ppu = ppu();
    let mut ic = InterruptController::new();
    let mut rec = Recorder::default();
    ppu.write_oam(0xFE00, 0x10);
    assert_eq!(ppu.read_oam(0xFE00), LOCKED_READ);

    ppu.tick(144 * 456, &mut ic, &mut rec);
    assert_eq!(ppu.mode(), Mode::VBlank);
    assert_eq!(ppu.read_oam(0xFE00), 0x10);
}

#[test]
fn strict_mode_drops_locked_writes() {
    let mut ppu = Ppu::new(DMG_PALETTE, true);
    let mut ic = InterruptController::new();
    let mut rec = Recorder::default();
    ppu.tick(80, &mut ic, &mut rec);
    ppu.write_vram(0x8000, 0x42);
    ppu.write_oam(0xFE00, 0x42);
    ppu.tick(172, &mut ic, &mut rec);
    assert_eq!(ppu.read_vram(0x8000), 0x00);
    assert_eq!(ppu.oam[0], 0x00);
}

#[test]
fn lcd_off_freezes_and_unlocks() {
    let mut ppu = ppu();
    let mut ic = InterruptController::new();
    let mut rec = Recorder::default();
    ppu.tick(20 * 456 + 100, &mut ic, &mut rec);
    ppu.write_register(0xFF40, 0x11);
    assert_eq!(ppu.ly(), 0);
    assert_eq!(ppu.read_register(0xFF41) & 0x03, 0);

    ppu.tick(10_000, &mut ic, &mut rec);
    assert_eq!(ppu.ly(), 0);
    assert!(ppu.vram_accessible());
    assert!(ppu.oam_accessible());

    ppu.write_register(0xFF40, 0x91);
    assert_eq!(ppu.mode(), Mode::OamSearch);
    ppu.tick(456, &mut ic, &mut rec);
    assert_eq!(ppu.ly(), 1);
}

#[test]
fn background_tile_and_scroll() {
    let mut ppu = ppu();
    solid_tile(&mut ppu, 1, 3);
    // Map entry (0,0) at 0x9800.
    ppu.vram[0x1800] = 1;

    let line = render_line(&mut ppu, 0);
    assert!(line[..8].iter().all(|&c| c == BLACK));
    assert!(line[8..].iter().all(|&c| c == WHITE));

    ppu.scx = 4;
    let line = render_line(&mut ppu, 0);
    assert!(line[..4].iter().all(|&c| c == BLACK));
    assert_eq!(line[4], WHITE);

    // SCX wraps around the 256-pixel map.
    ppu.scx = 252;
    let line = render_line(&mut ppu, 0);
    assert!(line[..4].iter().all(|&c| c == WHITE));
    assert!(line[4..12].iter().all(|&c| c == BLACK));

    // SCY selects the map row.
    ppu.scx = 0;
    ppu.scy = 8;
    let line = render_line(&mut ppu, 0);
    assert!(line.iter().all(|&c| c == WHITE));
}

#[test]
fn signed_tile_addressing() {
    let mut ppu = ppu();
    ppu.lcdc = LcdControl::from_bits_retain(0x81);
    // Index 0 -> 0x9000, index 0x80 -> 0x8800.
    solid_tile(&mut ppu, 0x100, 2);
    solid_tile(&mut ppu, 0x80, 1);
    ppu.vram[0x1801] = 0x80;

    let line = render_line(&mut ppu, 0);
    assert!(line[..8].iter().all(|&c| c == DARK));
    assert!(line[8..16].iter().all(|&c| c == LIGHT));
    assert!(line[16..].iter().all(|&c| c == DARK));
}

#[test]
fn palette_remaps_colour_indices() {
    let mut ppu = ppu();
    solid_tile(&mut ppu, 0, 1);
    ppu.bgp = 0b0000_1100; // index 1 -> shade 3
    let line = render_line(&mut ppu, 0);
    assert!(line.iter().all(|&c| c == BLACK));
}

#[test]
fn bg_disabled_renders_colour_zero() {
    let mut ppu = ppu();
    solid_tile(&mut ppu, 0, 3);
    ppu.lcdc = LcdControl::from_bits_retain(0x90);
    let line = render_line(&mut ppu, 0);
    assert!(line.iter().all(|&c| c == WHITE));
}

#[test]
fn window_overlays_background_from_wx() {
    let mut ppu = ppu();
    solid_tile(&mut ppu, 1, 3);
    ppu.lcdc = LcdControl::from_bits_retain(0xF1);
    ppu.vram[0x1C00] = 1; // window map 0x9C00, tile (0,0)
    ppu.wx = 7 + 80;
    ppu.wy = 2;

    let line = render_line(&mut ppu, 0);
    assert!(line.iter().all(|&c| c == WHITE), "above WY");
    assert_eq!(ppu.window_line, 0);

    let line = render_line(&mut ppu, 2);
    assert!(line[..80].iter().all(|&c| c == WHITE));
    assert!(line[80..88].iter().all(|&c| c == BLACK));
    assert!(line[88..].iter().all(|&c| c == WHITE));
    assert_eq!(ppu.window_line, 1);

    // The window keeps its own row counter: 7 more lines finish tile row 0.
    for ly in 3..10 {
        render_line(&mut ppu, ly);
    }
    assert_eq!(ppu.window_line, 8);
    let line = render_line(&mut ppu, 10);
    assert!(line[80..88].iter().all(|&c| c == WHITE));
}

#[test]
fn sprite_draws_over_background_with_transparency() {
    let mut ppu = ppu();
    ppu.lcdc = LcdControl::from_bits_retain(0x93);
    // Tile 2: left half colour 0, right half colour 1.
    for row in 0..8 {
        ppu.vram[2 * 16 + row * 2] = 0x0F;
    }
    set_sprite(&mut ppu, 0, 10, 0, 2, 0);

    let line = render_line(&mut ppu, 0);
    assert!(line[10..14].iter().all(|&c| c == WHITE), "colour 0 shows background");
    assert!(line[14..18].iter().all(|&c| c == LIGHT));
    assert_eq!(line[18], WHITE);

    // Not on line 8.
    let line = render_line(&mut ppu, 8);
    assert!(line.iter().all(|&c| c == WHITE));
}

#[test]
fn sprite_flip_and_palette_select() {
    let mut ppu = ppu();
    ppu.lcdc = LcdControl::from_bits_retain(0x93);
    for row in 0..8 {
        ppu.vram[2 * 16 + row * 2] = 0x0F;
    }
    // X flip moves the opaque half left; OBP1 (0x1B) maps index 1 to shade 2.
    set_sprite(&mut ppu, 0, 10, 0, 2, ATTR_FLIP_X | ATTR_OBP1);
    let line = render_line(&mut ppu, 0);
    assert!(line[10..14].iter().all(|&c| c == DARK));
    assert!(line[14..18].iter().all(|&c| c == WHITE));
}

#[test]
fn sprite_behind_background() {
    let mut ppu = ppu();
    ppu.lcdc = LcdControl::from_bits_retain(0x93);
    solid_tile(&mut ppu, 1, 3);
    solid_tile(&mut ppu, 2, 1);
    ppu.vram[0x1800] = 1; // BG opaque over x 0..8
    set_sprite(&mut ppu, 0, 4, 0, 2, ATTR_BEHIND_BG);

    let line = render_line(&mut ppu, 0);
    assert!(line[4..8].iter().all(|&c| c == BLACK), "BG colour 1-3 wins");
    assert!(line[8..12].iter().all(|&c| c == LIGHT), "BG colour 0 does not");
}

#[test]
fn lower_x_sprite_wins_overlap() {
    let mut ppu = ppu();
    ppu.lcdc = LcdControl::from_bits_retain(0x93);
    solid_tile(&mut ppu, 2, 1);
    solid_tile(&mut ppu, 3, 2);
    set_sprite(&mut ppu, 0, 20, 0, 2, 0);
    set_sprite(&mut ppu, 1, 16, 0, 3, 0);

    let line = render_line(&mut ppu, 0);
    assert!(line[16..24].iter().all(|&c| c == DARK));
    assert!(line[24..28].iter().all(|&c| c == LIGHT));
}

#[test]
fn at_most_ten_sprites_per_line() {
    let mut ppu = ppu();
    ppu.lcdc = LcdControl::from_bits_retain(0x93);
    solid_tile(&mut ppu, 2, 3);
    for slot in 0..11 {
        set_sprite(&mut ppu, slot, slot as i16 * 10, 0, 2, 0);
    }

    let line = render_line(&mut ppu, 0);
    assert_eq!(line[90], BLACK);
    assert_eq!(line[100], WHITE, "eleventh sprite is dropped");
}

#[test]
fn tall_sprites_span_two_tiles() {
    let mut ppu = ppu();
    ppu.lcdc = LcdControl::from_bits_retain(0x97);
    solid_tile(&mut ppu, 4, 1);
    solid_tile(&mut ppu, 5, 2);
    // Bit 0 of the tile index is ignored in 8x16 mode.
    set_sprite(&mut ppu, 0, 0, 0, 5, 0);

    assert_eq!(render_line(&mut ppu, 0)[0], LIGHT);
    assert_eq!(render_line(&mut ppu, 8)[0], DARK);
    assert_eq!(render_line(&mut ppu, 15)[0], DARK);
    assert_eq!(render_line(&mut ppu, 16)[0], WHITE);

    set_sprite(&mut ppu, 0, 0, 0, 4, ATTR_FLIP_Y);
    assert_eq!(render_line(&mut ppu, 0)[0], DARK);
    assert_eq!(render_line(&mut ppu, 15)[0], LIGHT);
}

const ATTR_BEHIND_BG: u8 = 0x80;
const ATTR_FLIP_Y: u8 = 0x40;
const ATTR_FLIP_X: u8 = 0x20;
const ATTR_OBP1: u8 = 0x10;

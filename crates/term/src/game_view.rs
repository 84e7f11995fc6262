//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const BOARD_BG: Rgb = Rgb::hex(0xbbada0);
const EMPTY_BG: Rgb = Rgb::hex(0xcdc1b4);
const DARK_TEXT: Rgb = Rgb::hex(0x776e65);
const LIGHT_TEXT: Rgb = Rgb::hex(0xf9f6f2);

/// Background per tile exponent (2 = index 1 ... 2048 = index 11).
/// Larger tiles share the last entry.
const TILE_COLORS: [Rgb; 13] = [
    EMPTY_BG,
    Rgb::hex(0xeee4da),
    Rgb::hex(0xede0c8),
    Rgb::hex(0xf2b179),
    Rgb::hex(0xf59563),
    Rgb::hex(0xf67c5f),
    Rgb::hex(0xf65e3b),
    Rgb::hex(0xedcf72),
    Rgb::hex(0xedcc61),
    Rgb::hex(0xedc850),
    Rgb::hex(0xedc53f),
    Rgb::hex(0xedc22e),
    Rgb::hex(0x3c3a32),
];

/// Tile style for a cube value (`0` = empty cell).
pub fn tile_style(value: u32) -> CellStyle {
    if value == 0 {
        return CellStyle::new(DARK_TEXT, EMPTY_BG).dim();
    }
    let exp = value.trailing_zeros() as usize;
    let bg = TILE_COLORS[exp.min(TILE_COLORS.len() - 1)];
    let fg = if value <= 4 { DARK_TEXT } else { LIGHT_TEXT };
    CellStyle::new(fg, bg).bold()
}

/// A lightweight terminal renderer for the cube game.
pub struct GameView {
    /// Board cell width in terminal columns (fits the value label).
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Five columns hold values up to 16384 with a space of padding.
        Self {
            cell_w: 5,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer size of the bordered board for a snapshot.
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        (
            snap.width.saturating_mul(self.cell_w).saturating_add(2),
            snap.height.saturating_mul(self.cell_h).saturating_add(2),
        )
    }

    /// Render into an existing framebuffer, reusing its allocation.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (frame_w, frame_h) = self.frame_size(snap);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::new(BOARD_BG, Rgb::new(0, 0, 0)).bold();
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Settled tiles.
        for y in 0..snap.height {
            for x in 0..snap.width {
                let value = snap.value_at(x, y);
                self.draw_tile(fb, start_x, start_y, x, y, value);
            }
        }

        if let Some(active) = snap.active {
            // Landing preview.
            if let Some(landing_y) = snap.landing_y {
                if landing_y != active.y && in_grid(snap, active.x, landing_y) {
                    let style = CellStyle::new(tile_style(active.value).bg, EMPTY_BG).dim();
                    self.fill_cell(fb, start_x, start_y, active.x as u16, landing_y as u16, '░', style);
                }
            }

            if in_grid(snap, active.x, active.y) {
                let (x, y) = (active.x as u16, active.y as u16);
                self.draw_tile(fb, start_x, start_y, x, y, active.value);
                // Brackets mark the falling cube.
                let px = start_x + 1 + x * self.cell_w;
                let py = start_y + 1 + y * self.cell_h + self.cell_h / 2;
                let marker = tile_style(active.value);
                if digit_count(active.value) + 2 <= self.cell_w {
                    fb.put_char(px, py, '[', marker);
                    fb.put_char(px + self.cell_w - 1, py, ']', marker);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if snap.game_over {
            self.draw_game_over(fb, snap, start_x, start_y, frame_w, frame_h);
        } else if snap.paused {
            self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, &["PAUSED", "P to resume"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '╭', style);
        fb.put_char(x + w - 1, y, '╮', style);
        fb.put_char(x, y + h - 1, '╰', style);
        fb.put_char(x + w - 1, y + h - 1, '╯', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16, value: u32) {
        let style = tile_style(value);
        if value == 0 {
            self.fill_cell(fb, start_x, start_y, x, y, ' ', style);
            let px = start_x + 1 + x * self.cell_w;
            let py = start_y + 1 + y * self.cell_h + self.cell_h / 2;
            fb.put_str_centered(px, py, self.cell_w, "·", style);
            return;
        }

        self.fill_cell(fb, start_x, start_y, x, y, ' ', style);
        let px = start_x + 1 + x * self.cell_w;
        let py = start_y + 1 + y * self.cell_h + self.cell_h / 2;
        let mut digits = [0u8; 10];
        let len = crate::fb::format_u32(value, &mut digits) as u16;
        if len <= self.cell_w {
            let pad = (self.cell_w - len) / 2;
            fb.put_u32(px + pad, py, value, style);
        } else {
            // Too wide for the cell: show the exponent instead (2^15 -> "^15").
            fb.put_char(px, py, '^', style);
            fb.put_u32(px + 1, py, value.trailing_zeros(), style);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let hint = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BEST", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.high_score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SPEED", label);
        y = y.saturating_add(1);
        let ms = snap.drop_interval_ms.round().clamp(0.0, u32::MAX as f64) as u32;
        fb.put_u32(panel_x, y, ms, value);
        let ms_x = panel_x + digit_count(ms);
        fb.put_str(ms_x, y, "ms", hint);
        y = y.saturating_add(2);

        for line in ["←/→ move", "↓ step", "SPACE drop", "P pause", "R restart", "Q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_game_over(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let mut score_line = [0u8; 16];
        let score = score_label(snap.score, &mut score_line);
        if snap.is_new_high_score() {
            self.draw_overlay(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                &["GAME OVER", score, "NEW HIGH SCORE!", "R to play again"],
            );
        } else {
            self.draw_overlay(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                &["GAME OVER", score, "R to play again"],
            );
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let box_h = lines.len() as u16 + 2;
        let top = start_y.saturating_add(frame_h.saturating_sub(box_h) / 2);
        let inner_w = frame_w.saturating_sub(2);

        fb.fill_rect(start_x + 1, top, inner_w, box_h, ' ', style);
        for (i, line) in lines.iter().enumerate() {
            fb.put_str_centered(start_x + 1, top + 1 + i as u16, inner_w, line, style);
        }
    }
}

fn in_grid(snap: &GameSnapshot, x: i32, y: i32) -> bool {
    x >= 0 && y >= 0 && x < snap.width as i32 && y < snap.height as i32
}

fn digit_count(value: u32) -> u16 {
    let mut digits = [0u8; 10];
    crate::fb::format_u32(value, &mut digits) as u16
}

/// "SCORE <n>" into a stack buffer.
fn score_label(score: u32, buf: &mut [u8; 16]) -> &str {
    const PREFIX: &[u8] = b"SCORE ";
    buf[..PREFIX.len()].copy_from_slice(PREFIX);
    let mut digits = [0u8; 10];
    let len = crate::fb::format_u32(score, &mut digits);
    buf[PREFIX.len()..PREFIX.len() + len].copy_from_slice(&digits[..len]);
    std::str::from_utf8(&buf[..PREFIX.len() + len]).unwrap_or("SCORE")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_styles_follow_palette() {
        assert_eq!(tile_style(2).bg, Rgb::hex(0xeee4da));
        assert_eq!(tile_style(2048).bg, Rgb::hex(0xedc22e));
        assert_eq!(tile_style(8192).bg, Rgb::hex(0x3c3a32));
        assert_eq!(tile_style(4).fg, DARK_TEXT);
        assert_eq!(tile_style(8).fg, LIGHT_TEXT);
    }

    #[test]
    fn score_label_formats() {
        let mut buf = [0u8; 16];
        assert_eq!(score_label(1234, &mut buf), "SCORE 1234");
    }
}

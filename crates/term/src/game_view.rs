//! GameView: maps a `GameSnapshot` onto a drawing surface.
//!
//! This module is pure (no I/O) and unit-testable. Cell codes in the
//! snapshot drive color lookup; the view never reaches back into the
//! engine.

use blockfall_core::GameSnapshot;
use blockfall_types::{PieceKind, Status, FIELD_COLS, FIELD_ROWS, MASK_SIZE};

use crate::surface::{Cell, Rgb, Surface, Weight};

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

/// Board cell size in terminal glyphs. 2x1 compensates for typical
/// terminal glyph aspect ratio.
const CELL_W: u16 = 2;
const CELL_H: u16 = 1;

/// Sidebar width reserved beside the playfield.
const SIDEBAR_W: u16 = 18;

const BOARD_BG: Rgb = Rgb(25, 25, 35);
const PANEL_BG: Rgb = Rgb(0, 0, 0);
const LABEL_FG: Rgb = Rgb(220, 220, 220);
const VALUE_FG: Rgb = Rgb(200, 200, 200);

/// A lightweight terminal view for the playfield and sidebar.
#[derive(Debug, Default)]
pub struct GameView;

impl GameView {
    /// Render into an existing surface, sizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, surface: &mut Surface) {
        surface.reset(viewport.width, viewport.height);

        let board_px_w = (FIELD_COLS as u16) * CELL_W;
        let board_px_h = (FIELD_ROWS as u16) * CELL_H;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + SIDEBAR_W) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        draw_border(surface, start_x, start_y, frame_w, frame_h);

        // Committed grid plus falling piece, already merged upstream.
        for (row, cells) in snap.frame.iter().enumerate() {
            for (col, &code) in cells.iter().enumerate() {
                let cell = match PieceKind::from_cell_code(code) {
                    Some(kind) => block_cell(kind),
                    None => EMPTY_CELL,
                };
                let px = start_x + 1 + col as u16 * CELL_W;
                let py = start_y + 1 + row as u16 * CELL_H;
                surface.flood(px, py, CELL_W, CELL_H, cell);
            }
        }

        draw_sidebar(surface, snap, viewport, start_x, start_y, frame_w);

        match snap.status {
            Status::Paused => draw_banner(surface, start_x, start_y, frame_w, frame_h, "PAUSED"),
            Status::GameOver => {
                draw_banner(surface, start_x, start_y, frame_w, frame_h, "GAME OVER")
            }
            Status::Running => {}
        }
    }

    /// Convenience helper that allocates a new surface.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> Surface {
        let mut surface = Surface::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut surface);
        surface
    }
}

const EMPTY_CELL: Cell = Cell {
    ch: '·',
    fg: Rgb(70, 70, 85),
    bg: BOARD_BG,
    weight: Weight::Dim,
};

fn block_cell(kind: PieceKind) -> Cell {
    Cell {
        ch: '█',
        fg: kind_color(kind),
        bg: BOARD_BG,
        weight: Weight::Bold,
    }
}

fn border_cell(ch: char) -> Cell {
    Cell {
        ch,
        fg: VALUE_FG,
        bg: PANEL_BG,
        weight: Weight::Normal,
    }
}

fn draw_border(surface: &mut Surface, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }

    surface.put(x, y, border_cell('┌'));
    surface.put(x + w - 1, y, border_cell('┐'));
    surface.put(x, y + h - 1, border_cell('└'));
    surface.put(x + w - 1, y + h - 1, border_cell('┘'));

    for dx in 1..w - 1 {
        surface.put(x + dx, y, border_cell('─'));
        surface.put(x + dx, y + h - 1, border_cell('─'));
    }
    for dy in 1..h - 1 {
        surface.put(x, y + dy, border_cell('│'));
        surface.put(x + w - 1, y + dy, border_cell('│'));
    }
}

fn draw_sidebar(
    surface: &mut Surface,
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

    let mut y = start_y;
    for (name, amount) in [
        ("SCORE", snap.score),
        ("HI-SCORE", snap.high_score),
        ("LEVEL", snap.level),
        ("SPEED", snap.speed),
    ] {
        surface.text(panel_x, y, name, LABEL_FG, PANEL_BG, Weight::Bold);
        let value = amount.to_string();
        surface.text(panel_x, y + 1, &value, VALUE_FG, PANEL_BG, Weight::Normal);
        y = y.saturating_add(3);
    }

    surface.text(panel_x, y, "NEXT", LABEL_FG, PANEL_BG, Weight::Bold);
    y = y.saturating_add(1);
    for row in 0..MASK_SIZE as u16 {
        for col in 0..MASK_SIZE as u16 {
            let code = snap.preview[row as usize][col as usize];
            let cell = match PieceKind::from_cell_code(code) {
                Some(kind) => Cell {
                    bg: PANEL_BG,
                    ..block_cell(kind)
                },
                None => Cell::BLANK,
            };
            surface.flood(
                panel_x + col * CELL_W,
                y + row * CELL_H,
                CELL_W,
                CELL_H,
                cell,
            );
        }
    }
    y = y.saturating_add((MASK_SIZE as u16) * CELL_H + 1);

    for line in ["←/→ move", "↓ drop", "space turn", "p pause  q quit"] {
        if y >= viewport.height {
            break;
        }
        surface.text(panel_x, y, line, VALUE_FG, PANEL_BG, Weight::Dim);
        y = y.saturating_add(1);
    }
}

fn draw_banner(
    surface: &mut Surface,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    text: &str,
) {
    let mid_y = start_y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    surface.text(x, mid_y, text, Rgb(255, 255, 255), PANEL_BG, Weight::Bold);
}

fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb(120, 230, 255),
        PieceKind::O => Rgb(255, 240, 180),
        PieceKind::S => Rgb(180, 240, 190),
        PieceKind::Z => Rgb(255, 180, 180),
        PieceKind::L => Rgb(255, 205, 155),
        PieceKind::J => Rgb(190, 205, 255),
        PieceKind::T => Rgb(230, 190, 255),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_blocks(surface: &Surface) -> usize {
        surface
            .rows()
            .flatten()
            .filter(|cell| cell.ch == '█')
            .count()
    }

    fn find_text(surface: &Surface, needle: &str) -> bool {
        surface.rows().any(|row| {
            let line: String = row.iter().map(|cell| cell.ch).collect();
            line.contains(needle)
        })
    }

    #[test]
    fn renders_active_piece_blocks() {
        let mut snap = GameSnapshot::default();
        // One tetromino's worth of cells in the frame.
        snap.frame[0][3] = 1;
        snap.frame[0][4] = 1;
        snap.frame[0][5] = 1;
        snap.frame[0][6] = 1;

        let view = GameView;
        let surface = view.render(&snap, Viewport::new(80, 24));
        // 4 board cells at 2x1 glyphs each.
        assert_eq!(count_blocks(&surface), 8);
    }

    #[test]
    fn empty_board_cells_render_dim_dots() {
        let view = GameView;
        let surface = view.render(&GameSnapshot::default(), Viewport::new(80, 24));
        let dots = surface
            .rows()
            .flatten()
            .filter(|cell| cell.ch == '·' && cell.weight == Weight::Dim)
            .count();
        assert_eq!(dots, FIELD_ROWS * FIELD_COLS * (CELL_W as usize));
    }

    #[test]
    fn sidebar_shows_labels() {
        let view = GameView;
        let surface = view.render(&GameSnapshot::default(), Viewport::new(80, 24));
        assert!(find_text(&surface, "SCORE"));
        assert!(find_text(&surface, "HI-SCORE"));
        assert!(find_text(&surface, "LEVEL"));
        assert!(find_text(&surface, "SPEED"));
        assert!(find_text(&surface, "NEXT"));
    }

    #[test]
    fn paused_banner_is_drawn() {
        let snap = GameSnapshot {
            status: Status::Paused,
            ..GameSnapshot::default()
        };
        let view = GameView;
        let surface = view.render(&snap, Viewport::new(80, 24));
        assert!(find_text(&surface, "PAUSED"));
    }

    #[test]
    fn game_over_banner_is_drawn() {
        let snap = GameSnapshot {
            status: Status::GameOver,
            ..GameSnapshot::default()
        };
        let view = GameView;
        let surface = view.render(&snap, Viewport::new(80, 24));
        assert!(find_text(&surface, "GAME OVER"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let view = GameView;
        let _ = view.render(&GameSnapshot::default(), Viewport::new(5, 3));
    }
}

use crate::scene::{CellView, Overlay, Scene, Sprite};
use crate::ui::theme::Theme;
use chess::{Piece, PieceColor, PieceKind, Square};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BoardSize {
    square_width: u16,
    square_height: u16,
}

impl BoardSize {
    const SMALL: Self = Self {
        square_width: 5,
        square_height: 3,
    };

    const MEDIUM: Self = Self {
        square_width: 7,
        square_height: 3,
    };

    const LARGE: Self = Self {
        square_width: 11,
        square_height: 5,
    };

    /// Largest variant whose 8x8 grid fits in `inner`.
    fn for_area(inner: Rect) -> Self {
        // Rank labels on the left, file labels below.
        let available_width = inner.width.saturating_sub(LABEL_WIDTH);
        let available_height = inner.height.saturating_sub(LABEL_HEIGHT);

        [Self::LARGE, Self::MEDIUM]
            .into_iter()
            .find(|size| {
                available_width >= size.square_width * 8
                    && available_height >= size.square_height * 8
            })
            .unwrap_or(Self::SMALL)
    }
}

const LABEL_WIDTH: u16 = 3;
const LABEL_HEIGHT: u16 = 1;

/// Where the 64 squares land inside a widget area.
///
/// Shared by rendering and mouse hit-testing so both agree on every cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardGeometry {
    origin_x: u16,
    origin_y: u16,
    size: BoardSize,
    bounds: Rect,
}

impl BoardGeometry {
    /// Geometry of a board rendered into `area` (including its border).
    pub fn for_area(area: Rect) -> Self {
        let inner = board_block().inner(area);
        let size = BoardSize::for_area(inner);

        let total_width = size.square_width * 8 + LABEL_WIDTH;
        let total_height = size.square_height * 8 + LABEL_HEIGHT;
        let offset_x = inner.width.saturating_sub(total_width) / 2;
        let offset_y = inner.height.saturating_sub(total_height) / 2;

        Self {
            origin_x: inner.x + offset_x + LABEL_WIDTH,
            origin_y: inner.y + offset_y,
            size,
            bounds: inner,
        }
    }

    pub fn square_width(&self) -> u16 {
        self.size.square_width
    }

    pub fn square_height(&self) -> u16 {
        self.size.square_height
    }

    /// Terminal cells covered by `square`. Row 0 is drawn at the top.
    pub fn square_rect(&self, square: Square) -> Rect {
        Rect {
            x: self.origin_x + square.col() as u16 * self.size.square_width,
            y: self.origin_y + square.row() as u16 * self.size.square_height,
            width: self.size.square_width,
            height: self.size.square_height,
        }
    }

    /// Square under terminal cell `(x, y)`, if any.
    pub fn square_at(&self, x: u16, y: u16) -> Option<Square> {
        let dx = x.checked_sub(self.origin_x)?;
        let dy = y.checked_sub(self.origin_y)?;
        let col = dx / self.size.square_width;
        let row = dy / self.size.square_height;
        if col >= 8 || row >= 8 {
            return None;
        }
        Square::new(row as u8, col as u8)
    }

    /// Top-left terminal cell of a sprite at pixel offset `(x, y)`.
    fn sprite_origin(&self, sprite: &Sprite, square_size: f32) -> (u16, u16) {
        let scale = |pixels: f32, cells: u16| -> u16 {
            if square_size <= 0.0 {
                return 0;
            }
            (pixels / square_size * cells as f32).round().max(0.0) as u16
        };
        (
            self.origin_x + scale(sprite.x, self.size.square_width),
            self.origin_y + scale(sprite.y, self.size.square_height),
        )
    }

    fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.bounds.x && x < self.bounds.right() && y >= self.bounds.y && y < self.bounds.bottom()
    }
}

fn board_block() -> Block<'static> {
    Block::default().title("♟ Chess Board ♟").borders(Borders::ALL)
}

pub struct BoardWidget<'a> {
    pub scene: &'a Scene,
    pub theme: &'a Theme,
    pub cursor: Option<Square>,
    /// Pixel size of one square in sprite coordinates.
    pub square_size: f32,
}

impl<'a> BoardWidget<'a> {
    pub fn new(scene: &'a Scene, theme: &'a Theme, square_size: f32) -> Self {
        Self {
            scene,
            theme,
            cursor: None,
            square_size,
        }
    }

    pub fn with_cursor(mut self, cursor: Square) -> Self {
        self.cursor = Some(cursor);
        self
    }

    fn background(&self, cell: &CellView, is_light_square: bool) -> Color {
        let overlay = if cell.selected {
            Some(Overlay::Selected)
        } else if cell.candidate {
            Some(Overlay::Candidate)
        } else if cell.last_move {
            Some(Overlay::LastMove)
        } else {
            None
        };
        match overlay {
            Some(overlay) => self.theme.resolve_overlay(overlay, is_light_square),
            None => self.theme.square(is_light_square),
        }
    }

    fn piece_color(&self, color: PieceColor) -> Color {
        match color {
            PieceColor::White => self.theme.white_piece,
            PieceColor::Black => self.theme.black_piece,
        }
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = board_block().border_style(Style::default().fg(self.theme.board_border));
        block.render(area, buf);

        let geometry = BoardGeometry::for_area(area);
        let label_style = Style::default().fg(self.theme.board_label);

        for index in 0..8u8 {
            let Some(square) = Square::new(index, index) else {
                continue;
            };
            let rect = geometry.square_rect(square);

            let rank_y = rect.y + rect.height / 2;
            let rank_x = geometry.origin_x.saturating_sub(2);
            if geometry.contains(rank_x, rank_y) {
                buf.set_string(rank_x, rank_y, square.rank().to_string(), label_style);
            }

            let file_x = rect.x + rect.width / 2;
            let file_y = geometry.origin_y + 8 * geometry.square_height();
            if geometry.contains(file_x, file_y) {
                buf.set_string(file_x, file_y, square.file_char().to_string(), label_style);
            }
        }

        for square in Square::all() {
            let Some(cell) = self.scene.cell(square) else {
                continue;
            };
            let rect = geometry.square_rect(square);
            let is_light_square = (square.row() + square.col()) % 2 == 0;
            let bg = self.background(cell, is_light_square);

            fill(buf, rect, bg, &geometry);
            if let Ok(piece) = Piece::from_code(&cell.asset) {
                draw_piece(buf, rect, piece, bg, &self, &geometry);
            }
            if self.cursor == Some(square) {
                draw_square_outline(buf, rect, self.theme.cursor, &geometry);
            }
        }

        if let Some(sprite) = self.scene.sprite() {
            let (x, y) = geometry.sprite_origin(&sprite, self.square_size);
            let rect = Rect {
                x,
                y,
                width: geometry.square_width(),
                height: geometry.square_height(),
            };
            draw_sprite(buf, rect, sprite.piece, &self, &geometry);
        }
    }
}

fn fill(buf: &mut Buffer, rect: Rect, bg: Color, geometry: &BoardGeometry) {
    let style = Style::default().bg(bg);
    for py in rect.y..rect.bottom() {
        for px in rect.x..rect.right() {
            if geometry.contains(px, py) {
                buf[(px, py)].set_style(style);
            }
        }
    }
}

fn draw_piece(
    buf: &mut Buffer,
    rect: Rect,
    piece: Piece,
    bg: Color,
    widget: &BoardWidget<'_>,
    geometry: &BoardGeometry,
) {
    let (Some(color), Some(kind)) = (piece.color(), piece.kind()) else {
        return;
    };
    let (px, py) = glyph_position(rect);
    if geometry.contains(px, py) {
        let style = Style::default()
            .bg(bg)
            .fg(widget.piece_color(color))
            .add_modifier(Modifier::BOLD);
        buf.set_string(px, py, glyph(kind), style);
    }
}

/// Draw a sliding piece over whatever is underneath, keeping its background.
fn draw_sprite(
    buf: &mut Buffer,
    rect: Rect,
    piece: Piece,
    widget: &BoardWidget<'_>,
    geometry: &BoardGeometry,
) {
    let (Some(color), Some(kind)) = (piece.color(), piece.kind()) else {
        return;
    };
    let (px, py) = glyph_position(rect);
    if geometry.contains(px, py) {
        buf[(px, py)]
            .set_symbol(glyph(kind))
            .set_fg(widget.piece_color(color))
            .set_style(Style::default().add_modifier(Modifier::BOLD));
    }
}

fn glyph_position(rect: Rect) -> (u16, u16) {
    (rect.x + rect.width / 2, rect.y + rect.height / 2)
}

fn glyph(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::King => "♚",
        PieceKind::Queen => "♛",
        PieceKind::Rook => "♜",
        PieceKind::Bishop => "♝",
        PieceKind::Knight => "♞",
        PieceKind::Pawn => "♟",
    }
}

fn draw_square_outline(buf: &mut Buffer, rect: Rect, color: Color, geometry: &BoardGeometry) {
    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let right = rect.right().saturating_sub(1);
    let bottom = rect.bottom().saturating_sub(1);

    for px in rect.x..rect.right() {
        let (top_symbol, bottom_symbol) = if px == rect.x {
            ("┌", "└")
        } else if px == right {
            ("┐", "┘")
        } else {
            ("─", "─")
        };
        if geometry.contains(px, rect.y) {
            buf[(px, rect.y)].set_symbol(top_symbol).set_style(style);
        }
        if geometry.contains(px, bottom) {
            buf[(px, bottom)].set_symbol(bottom_symbol).set_style(style);
        }
    }

    for py in rect.y + 1..bottom {
        for px in [rect.x, right] {
            if geometry.contains(px, py) {
                buf[(px, py)].set_symbol("│").set_style(style);
            }
        }
    }
}

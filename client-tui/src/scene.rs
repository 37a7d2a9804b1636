//! Render model of the board: what every cell shows right now.
//!
//! The terminal widgets draw a `Scene`; the controller and the animation
//! sequencer are the only writers.

use chess::{Board, Piece, Square};

/// Visual state of one board cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    /// Asset key of the static piece (`"wp"`, ... or `"empty"`).
    pub asset: String,
    pub selected: bool,
    pub candidate: bool,
    pub last_move: bool,
}

impl Default for CellView {
    fn default() -> Self {
        Self {
            asset: Piece::Empty.asset_key(),
            selected: false,
            candidate: false,
            last_move: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Selected,
    Candidate,
    LastMove,
}

impl CellView {
    fn overlay_mut(&mut self, overlay: Overlay) -> &mut bool {
        match overlay {
            Overlay::Selected => &mut self.selected,
            Overlay::Candidate => &mut self.candidate,
            Overlay::LastMove => &mut self.last_move,
        }
    }
}

/// A piece in flight, positioned in pixel space (`col * square_size`,
/// `row * square_size`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub piece: Piece,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    cells: Vec<CellView>,
    sprite: Option<Sprite>,
    notice: Option<String>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            cells: vec![CellView::default(); 64],
            sprite: None,
            notice: None,
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, square: Square) -> Option<&CellView> {
        self.cells.get(index(square))
    }

    fn cell_mut(&mut self, square: Square) -> Option<&mut CellView> {
        let cell = self.cells.get_mut(index(square));
        if cell.is_none() {
            tracing::debug!(%square, "No render cell for square");
        }
        cell
    }

    /// Assign every cell the asset of the matching board piece. Overlays are
    /// left alone; repeated calls with the same board are no-ops.
    pub fn paint_board(&mut self, board: &Board) {
        for square in Square::all() {
            let asset = board.piece_at(square).asset_key();
            if let Some(cell) = self.cell_mut(square) {
                cell.asset = asset;
            }
        }
    }

    /// Remove the static piece drawn on `square`.
    pub fn clear_piece(&mut self, square: Square) {
        if let Some(cell) = self.cell_mut(square) {
            cell.asset = Piece::Empty.asset_key();
        }
    }

    pub fn mark(&mut self, square: Square, overlay: Overlay) {
        if let Some(cell) = self.cell_mut(square) {
            *cell.overlay_mut(overlay) = true;
        }
    }

    pub fn unmark(&mut self, square: Square, overlay: Overlay) {
        if let Some(cell) = self.cell_mut(square) {
            *cell.overlay_mut(overlay) = false;
        }
    }

    /// Remove `overlay` from every cell.
    pub fn clear_overlay(&mut self, overlay: Overlay) {
        for cell in &mut self.cells {
            *cell.overlay_mut(overlay) = false;
        }
    }

    pub fn squares_with(&self, overlay: Overlay) -> Vec<Square> {
        Square::all()
            .filter(|sq| {
                self.cell(*sq).is_some_and(|cell| match overlay {
                    Overlay::Selected => cell.selected,
                    Overlay::Candidate => cell.candidate,
                    Overlay::LastMove => cell.last_move,
                })
            })
            .collect()
    }

    pub fn sprite(&self) -> Option<Sprite> {
        self.sprite
    }

    pub fn set_sprite(&mut self, sprite: Option<Sprite>) {
        self.sprite = sprite;
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: Option<String>) {
        self.notice = notice;
    }
}

fn index(square: Square) -> usize {
    square.row() as usize * 8 + square.col() as usize
}

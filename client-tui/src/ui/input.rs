use chess::Square;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    MoveCursor { d_row: i8, d_col: i8 },
    /// Activate the square under the cursor.
    Activate,
}

pub fn handle_key(key: KeyEvent) -> Option<AppAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => AppAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => AppAction::Quit,
        KeyCode::Up | KeyCode::Char('k') => AppAction::MoveCursor { d_row: -1, d_col: 0 },
        KeyCode::Down | KeyCode::Char('j') => AppAction::MoveCursor { d_row: 1, d_col: 0 },
        KeyCode::Left | KeyCode::Char('h') => AppAction::MoveCursor { d_row: 0, d_col: -1 },
        KeyCode::Right | KeyCode::Char('l') => AppAction::MoveCursor { d_row: 0, d_col: 1 },
        KeyCode::Enter | KeyCode::Char(' ') => AppAction::Activate,
        _ => return None,
    };
    Some(action)
}

/// Keyboard cursor over the board, clamped to its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    square: Square,
}

/// e2: where White's first move usually starts.
const HOME: Square = match Square::new(6, 4) {
    Some(square) => square,
    None => panic!("home square out of range"),
};

impl Default for Cursor {
    fn default() -> Self {
        Self { square: HOME }
    }
}

impl Cursor {
    pub fn new(square: Square) -> Self {
        Self { square }
    }

    pub fn square(&self) -> Square {
        self.square
    }

    pub fn set(&mut self, square: Square) {
        self.square = square;
    }

    pub fn shift(&mut self, d_row: i8, d_col: i8) {
        let row = (self.square.row() as i8 + d_row).clamp(0, 7) as u8;
        let col = (self.square.col() as i8 + d_col).clamp(0, 7) as u8;
        if let Some(square) = Square::new(row, col) {
            self.square = square;
        }
    }
}

//! Canonical piece, color and square types shared by the client crates.
//!
//! The wire format used by the game authority is kept at the serde boundary:
//! pieces travel as two-character codes (`"wp"`, `"bK"`, `"--"`) and squares as
//! `[row, col]` arrays with row 0 being the far rank.

use serde::{Deserialize, Serialize};

/// Wire code of an empty square.
pub const EMPTY_CODE: &str = "--";

/// Asset key for an empty square.
pub const EMPTY_ASSET: &str = "empty";

/// Project-owned piece type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Project-owned color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    White,
    Black,
}

impl PieceKind {
    pub fn to_char_upper(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    /// Character used in the authority's piece codes (pawns are lowercase).
    fn to_wire_char(self) -> char {
        match self {
            Self::Pawn => 'p',
            other => other.to_char_upper(),
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }
}

impl PieceColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    fn to_wire_char(self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    fn from_wire_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Self::White),
            'b' => Some(Self::Black),
            _ => None,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char_upper())
    }
}

impl std::fmt::Display for PieceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Piece {
    #[default]
    Empty,
    Occupied { color: PieceColor, kind: PieceKind },
}

impl Piece {
    pub const fn new(color: PieceColor, kind: PieceKind) -> Self {
        Self::Occupied { color, kind }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn color(self) -> Option<PieceColor> {
        match self {
            Self::Empty => None,
            Self::Occupied { color, .. } => Some(color),
        }
    }

    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Self::Empty => None,
            Self::Occupied { kind, .. } => Some(kind),
        }
    }

    /// Parse an authority piece code such as `"wp"`, `"bQ"` or `"--"`.
    pub fn from_code(code: &str) -> Result<Self, ParseError> {
        if code == EMPTY_CODE {
            return Ok(Self::Empty);
        }
        let mut chars = code.chars();
        let (Some(c), Some(k), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseError::InvalidPieceCode(code.to_string()));
        };
        let color =
            PieceColor::from_wire_char(c).ok_or_else(|| ParseError::InvalidPieceCode(code.into()))?;
        let kind = PieceKind::from_char(k).ok_or_else(|| ParseError::InvalidPieceCode(code.into()))?;
        Ok(Self::Occupied { color, kind })
    }

    /// The authority's two-character code for this piece.
    pub fn code(self) -> String {
        match self {
            Self::Empty => EMPTY_CODE.to_string(),
            Self::Occupied { color, kind } => {
                format!("{}{}", color.to_wire_char(), kind.to_wire_char())
            }
        }
    }

    /// Deterministic visual asset key: color+kind, or the empty sentinel.
    pub fn asset_key(self) -> String {
        match self {
            Self::Empty => EMPTY_ASSET.to_string(),
            occupied => occupied.code(),
        }
    }
}

impl TryFrom<String> for Piece {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_code(&value)
    }
}

impl From<Piece> for String {
    fn from(piece: Piece) -> Self {
        piece.code()
    }
}

/// A board cell coordinate. Row 0 is rank 8, column 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[u8; 2]", into = "[u8; 2]")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Returns `None` when either coordinate is outside `0..8`.
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub const fn row(self) -> u8 {
        self.row
    }

    pub const fn col(self) -> u8 {
        self.col
    }

    pub fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    pub fn rank(self) -> u8 {
        8 - self.row
    }

    /// File letter followed by rank digit, e.g. `(6, 4)` → `"e2"`.
    pub fn algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank())
    }

    /// Iterate every square in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }
}

impl TryFrom<[u8; 2]> for Square {
    type Error = ParseError;

    fn try_from([row, col]: [u8; 2]) -> Result<Self, Self::Error> {
        Self::new(row, col).ok_or(ParseError::SquareOutOfRange { row, col })
    }
}

impl From<Square> for [u8; 2] {
    fn from(sq: Square) -> Self {
        [sq.row, sq.col]
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.algebraic())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid piece code: {0:?}")]
    InvalidPieceCode(String),
    #[error("Square out of range: ({row}, {col})")]
    SquareOutOfRange { row: u8, col: u8 },
    #[error("Board must have 8 rows of 8 cells, got {0}")]
    BoardShape(String),
}

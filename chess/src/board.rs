//! 8x8 board mirror as delivered by the game authority.

use crate::types::{ParseError, Piece, PieceColor, PieceKind, Square};
use serde::{Deserialize, Serialize};

/// An 8x8 grid of pieces. Row 0 is the far rank (rank 8).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Piece>>", into = "Vec<Vec<Piece>>")]
pub struct Board {
    squares: [[Piece; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard starting position.
    pub fn standard() -> Self {
        use PieceKind::{Bishop, King, Knight, Pawn, Queen, Rook};

        const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Self::empty();
        for col in 0..8 {
            board.squares[0][col] = Piece::new(PieceColor::Black, BACK_RANK[col]);
            board.squares[1][col] = Piece::new(PieceColor::Black, Pawn);
            board.squares[6][col] = Piece::new(PieceColor::White, Pawn);
            board.squares[7][col] = Piece::new(PieceColor::White, BACK_RANK[col]);
        }
        board
    }

    /// Parse rows of authority piece codes (`"wp"`, `"--"`, ...).
    #[cfg(test)]
    pub fn from_codes<R, C>(rows: R) -> Result<Self, ParseError>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|code| Piece::from_code(code.as_ref()))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from(rows)
    }

    pub fn piece_at(&self, square: Square) -> Piece {
        self.squares[square.row() as usize][square.col() as usize]
    }

    pub fn set(&mut self, square: Square, piece: Piece) {
        self.squares[square.row() as usize][square.col() as usize] = piece;
    }
}

impl TryFrom<Vec<Vec<Piece>>> for Board {
    type Error = ParseError;

    fn try_from(rows: Vec<Vec<Piece>>) -> Result<Self, Self::Error> {
        let shape = || {
            let lens: Vec<usize> = rows.iter().map(Vec::len).collect();
            ParseError::BoardShape(format!("{:?}", lens))
        };
        if rows.len() != 8 || rows.iter().any(|row| row.len() != 8) {
            return Err(shape());
        }

        let mut squares = [[Piece::Empty; 8]; 8];
        for (target, row) in squares.iter_mut().zip(&rows) {
            target.copy_from_slice(row);
        }
        Ok(Self { squares })
    }
}

impl From<Board> for Vec<Vec<Piece>> {
    fn from(board: Board) -> Self {
        board.squares.iter().map(|row| row.to_vec()).collect()
    }
}

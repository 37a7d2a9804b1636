use crate::types::{Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};

/// An authoritative, validated description of a completed half-move.
///
/// Produced only by the game authority. `piece_moved` is whatever the
/// authority reports as the moving piece, which for promotions is the piece
/// standing on the destination square afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveDescriptor {
    pub piece_moved: Piece,
    pub start_square: Square,
    pub end_square: Square,
    #[serde(default)]
    pub is_capture: bool,
    #[serde(default)]
    pub is_promotion: bool,
    #[serde(default)]
    pub is_enpassant: bool,
    #[serde(default)]
    pub checkmate: bool,
    #[serde(default)]
    pub stalemate: bool,
    #[serde(default)]
    pub check: bool,
}

impl MoveDescriptor {
    /// A quiet move with every outcome flag cleared.
    pub fn quiet(piece_moved: Piece, start_square: Square, end_square: Square) -> Self {
        Self {
            piece_moved,
            start_square,
            end_square,
            is_capture: false,
            is_promotion: false,
            is_enpassant: false,
            checkmate: false,
            stalemate: false,
            check: false,
        }
    }

    pub fn kind(&self) -> Option<PieceKind> {
        self.piece_moved.kind()
    }

    /// Absolute file distance travelled.
    pub fn file_distance(&self) -> u8 {
        self.start_square.col().abs_diff(self.end_square.col())
    }
}

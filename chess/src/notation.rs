//! Move notation for the move log.
//!
//! The output is algebraic-like but not strict SAN: there is no disambiguation
//! between identical pieces, promotions always keep the source file on
//! captures, and en passant captures carry an explicit ` e.p.` marker.

use crate::board::Board;
use crate::moves::MoveDescriptor;
use crate::types::{PieceKind, Square};

/// Destination file of a kingside castle (the g-file).
const KINGSIDE_FILE: u8 = 6;

/// One lexical unit of a notation string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotationToken {
    CastleKingside,
    CastleQueenside,
    PieceLetter(PieceKind),
    SourceFile(char),
    Capture,
    Destination(Square),
    Promotion(PieceKind),
    EnPassant,
    Check,
    Checkmate,
    Draw,
}

impl std::fmt::Display for NotationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CastleKingside => f.write_str("O-O"),
            Self::CastleQueenside => f.write_str("O-O-O"),
            Self::PieceLetter(kind) => write!(f, "{}", kind.to_char_upper()),
            Self::SourceFile(file) => write!(f, "{}", file),
            Self::Capture => f.write_str("x"),
            Self::Destination(square) => f.write_str(&square.algebraic()),
            Self::Promotion(kind) => write!(f, "={}", kind.to_char_upper()),
            Self::EnPassant => f.write_str(" e.p."),
            Self::Check => f.write_str("+"),
            Self::Checkmate => f.write_str("#"),
            Self::Draw => f.write_str("1/2-1/2"),
        }
    }
}

/// Render a completed move as a notation string.
///
/// `board` is the position after the move. Stalemate replaces the whole string
/// with the drawn-game result, and checkmate takes precedence over check.
pub fn notate(
    mv: &MoveDescriptor,
    board: &Board,
    checkmate: bool,
    stalemate: bool,
    check: bool,
) -> String {
    tokens(mv, board, checkmate, stalemate, check)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Token sequence behind [`notate`].
pub fn tokens(
    mv: &MoveDescriptor,
    board: &Board,
    checkmate: bool,
    stalemate: bool,
    check: bool,
) -> Vec<NotationToken> {
    if stalemate {
        return vec![NotationToken::Draw];
    }

    let mut out = if mv.kind() == Some(PieceKind::King) && mv.file_distance() == 2 {
        if mv.end_square.col() == KINGSIDE_FILE {
            vec![NotationToken::CastleKingside]
        } else {
            vec![NotationToken::CastleQueenside]
        }
    } else {
        body_tokens(mv, board)
    };

    if checkmate {
        out.push(NotationToken::Checkmate);
    } else if check {
        out.push(NotationToken::Check);
    }
    out
}

fn body_tokens(mv: &MoveDescriptor, board: &Board) -> Vec<NotationToken> {
    let source_file = NotationToken::SourceFile(mv.start_square.file_char());
    let piece_letter = match mv.kind() {
        Some(PieceKind::Pawn) | None => None,
        Some(kind) => Some(NotationToken::PieceLetter(kind)),
    };

    let mut out = Vec::with_capacity(5);
    if mv.is_promotion {
        // The moving slot never names a piece on promotion; captures keep the
        // source file.
        if mv.is_capture {
            out.push(source_file);
            out.push(NotationToken::Capture);
        }
    } else if mv.is_capture {
        out.push(piece_letter.unwrap_or(source_file));
        out.push(NotationToken::Capture);
    } else if let Some(letter) = piece_letter {
        out.push(letter);
    }

    out.push(NotationToken::Destination(mv.end_square));

    if mv.is_promotion {
        out.push(NotationToken::Promotion(promoted_kind(mv, board)));
    }
    if mv.is_enpassant {
        out.push(NotationToken::EnPassant);
    }
    out
}

fn promoted_kind(mv: &MoveDescriptor, board: &Board) -> PieceKind {
    match board.piece_at(mv.end_square).kind() {
        Some(kind @ (PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight)) => {
            kind
        }
        _ => PieceKind::Queen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Piece, PieceColor};
    use proptest::prelude::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    fn white(kind: PieceKind) -> Piece {
        Piece::new(PieceColor::White, kind)
    }

    fn black(kind: PieceKind) -> Piece {
        Piece::new(PieceColor::Black, kind)
    }

    fn board_with(square: Square, piece: Piece) -> Board {
        let mut board = Board::empty();
        board.set(square, piece);
        board
    }

    fn plain(mv: &MoveDescriptor, board: &Board) -> String {
        notate(mv, board, false, false, false)
    }

    #[test]
    fn white_kingside_castle() {
        let mv = MoveDescriptor::quiet(white(PieceKind::King), sq(7, 4), sq(7, 6));
        assert_eq!(plain(&mv, &Board::empty()), "O-O");
    }

    #[test]
    fn black_queenside_castle_with_check() {
        let mv = MoveDescriptor::quiet(black(PieceKind::King), sq(0, 4), sq(0, 2));
        assert_eq!(notate(&mv, &Board::empty(), false, false, true), "O-O-O+");
    }

    #[test]
    fn single_file_king_step_is_not_castling() {
        let mv = MoveDescriptor::quiet(white(PieceKind::King), sq(7, 4), sq(7, 5));
        assert_eq!(plain(&mv, &Board::empty()), "Kf1");
    }

    #[test]
    fn pawn_push() {
        let mv = MoveDescriptor::quiet(white(PieceKind::Pawn), sq(6, 4), sq(4, 4));
        assert_eq!(plain(&mv, &Board::empty()), "e4");
    }

    #[test]
    fn pawn_capture_uses_source_file() {
        let mut mv = MoveDescriptor::quiet(white(PieceKind::Pawn), sq(6, 4), sq(5, 5));
        mv.is_capture = true;
        assert_eq!(plain(&mv, &Board::empty()), "exf3");
    }

    #[test]
    fn piece_move_and_capture() {
        let mv = MoveDescriptor::quiet(black(PieceKind::Knight), sq(0, 6), sq(2, 5));
        assert_eq!(plain(&mv, &Board::empty()), "Nf6");

        let mut capture = MoveDescriptor::quiet(white(PieceKind::Bishop), sq(7, 5), sq(3, 1));
        capture.is_capture = true;
        assert_eq!(plain(&capture, &Board::empty()), "Bxb5");
    }

    #[test]
    fn straight_promotion_drops_piece_letter() {
        let board = board_with(sq(0, 0), white(PieceKind::Queen));

        let mut as_pawn = MoveDescriptor::quiet(white(PieceKind::Pawn), sq(1, 0), sq(0, 0));
        as_pawn.is_promotion = true;
        assert_eq!(plain(&as_pawn, &board), "a8=Q");

        // The authority reports the promoted piece as the mover.
        let mut as_queen = MoveDescriptor::quiet(white(PieceKind::Queen), sq(1, 0), sq(0, 0));
        as_queen.is_promotion = true;
        assert_eq!(plain(&as_queen, &board), "a8=Q");
    }

    #[test]
    fn promotion_with_checkmate() {
        let board = board_with(sq(0, 0), white(PieceKind::Queen));
        let mut mv = MoveDescriptor::quiet(white(PieceKind::Queen), sq(1, 0), sq(0, 0));
        mv.is_promotion = true;
        assert_eq!(notate(&mv, &board, true, false, false), "a8=Q#");
    }

    #[test]
    fn capture_promotion_reinserts_source_file() {
        let board = board_with(sq(7, 3), black(PieceKind::Queen));
        let mut mv = MoveDescriptor::quiet(black(PieceKind::Queen), sq(6, 4), sq(7, 3));
        mv.is_capture = true;
        mv.is_promotion = true;
        assert_eq!(plain(&mv, &board), "exd1=Q");
    }

    #[test]
    fn promotion_suffix_follows_resulting_board() {
        let board = board_with(sq(0, 7), white(PieceKind::Knight));
        let mut mv = MoveDescriptor::quiet(white(PieceKind::Pawn), sq(1, 7), sq(0, 7));
        mv.is_promotion = true;
        assert_eq!(plain(&mv, &board), "h8=N");

        // Nothing promoted on the board: default to queen.
        assert_eq!(plain(&mv, &Board::empty()), "h8=Q");
    }

    #[test]
    fn en_passant_marker() {
        let mut mv = MoveDescriptor::quiet(white(PieceKind::Pawn), sq(3, 4), sq(2, 3));
        mv.is_capture = true;
        mv.is_enpassant = true;
        assert_eq!(plain(&mv, &Board::empty()), "exd6 e.p.");
        assert_eq!(notate(&mv, &Board::empty(), false, false, true), "exd6 e.p.+");
    }

    #[test]
    fn checkmate_wins_over_check() {
        let mv = MoveDescriptor::quiet(white(PieceKind::Queen), sq(4, 7), sq(1, 5));
        assert_eq!(notate(&mv, &Board::empty(), true, false, true), "Qf7#");
    }

    #[test]
    fn token_sequence_for_capture_promotion() {
        let board = board_with(sq(0, 1), white(PieceKind::Queen));
        let mut mv = MoveDescriptor::quiet(white(PieceKind::Queen), sq(1, 0), sq(0, 1));
        mv.is_capture = true;
        mv.is_promotion = true;
        assert_eq!(
            tokens(&mv, &board, false, false, true),
            vec![
                NotationToken::SourceFile('a'),
                NotationToken::Capture,
                NotationToken::Destination(sq(0, 1)),
                NotationToken::Promotion(PieceKind::Queen),
                NotationToken::Check,
            ]
        );
    }

    fn arb_kind() -> impl Strategy<Value = PieceKind> {
        prop_oneof![
            Just(PieceKind::Pawn),
            Just(PieceKind::Knight),
            Just(PieceKind::Bishop),
            Just(PieceKind::Rook),
            Just(PieceKind::Queen),
            Just(PieceKind::King),
        ]
    }

    prop_compose! {
        fn arb_move()(
            kind in arb_kind(),
            black_side in any::<bool>(),
            from in (0u8..8, 0u8..8),
            to in (0u8..8, 0u8..8),
            flags in any::<[bool; 3]>(),
        ) -> MoveDescriptor {
            let color = if black_side { PieceColor::Black } else { PieceColor::White };
            let mut mv = MoveDescriptor::quiet(
                Piece::new(color, kind),
                Square::new(from.0, from.1).unwrap(),
                Square::new(to.0, to.1).unwrap(),
            );
            mv.is_capture = flags[0];
            mv.is_promotion = flags[1];
            mv.is_enpassant = flags[2];
            mv
        }
    }

    proptest! {
        #[test]
        fn stalemate_overrides_everything(
            mv in arb_move(),
            checkmate in any::<bool>(),
            check in any::<bool>(),
        ) {
            prop_assert_eq!(notate(&mv, &Board::standard(), checkmate, true, check), "1/2-1/2");
        }

        #[test]
        fn notation_is_deterministic(
            mv in arb_move(),
            flags in any::<[bool; 3]>(),
        ) {
            let board = Board::standard();
            let first = notate(&mv, &board, flags[0], flags[1], flags[2]);
            let second = notate(&mv.clone(), &board.clone(), flags[0], flags[1], flags[2]);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn checkmate_and_check_never_both_appear(mv in arb_move()) {
            let text = notate(&mv, &Board::empty(), true, false, true);
            prop_assert!(text.ends_with('#'));
            prop_assert!(!text.contains('+'));
        }
    }
}

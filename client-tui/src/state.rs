use chess::{Board, MoveDescriptor, PieceColor};

/// Mirror of the authoritative game state.
///
/// The authority is the source of truth: this is only ever updated from
/// authority events, never from local input.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    pub board: Board,
    pub turn_owner: PieceColor,
    pub local_controls_white: bool,
    pub local_controls_black: bool,
    pub last_move: Option<MoveDescriptor>,
    pub ai_thinking: bool,
    pub game_over: bool,
}

impl Default for MatchState {
    /// Placeholder shown before the first `initialState`; no side is local, so
    /// input is inert until the authority speaks.
    fn default() -> Self {
        Self {
            board: Board::standard(),
            turn_owner: PieceColor::White,
            local_controls_white: false,
            local_controls_black: false,
            last_move: None,
            ai_thinking: false,
            game_over: false,
        }
    }
}

impl MatchState {
    pub fn is_local(&self, color: PieceColor) -> bool {
        match color {
            PieceColor::White => self.local_controls_white,
            PieceColor::Black => self.local_controls_black,
        }
    }

    pub fn both_local(&self) -> bool {
        self.local_controls_white && self.local_controls_black
    }

    /// The local color when exactly one side is played here.
    pub fn single_local_side(&self) -> Option<PieceColor> {
        match (self.local_controls_white, self.local_controls_black) {
            (true, false) => Some(PieceColor::White),
            (false, true) => Some(PieceColor::Black),
            _ => None,
        }
    }

    /// Whether the side to move belongs to the remote opponent in a
    /// one-local-side match that is still running.
    pub fn awaiting_remote_move(&self) -> bool {
        !self.game_over
            && self
                .single_local_side()
                .is_some_and(|local| local.opponent() == self.turn_owner)
    }

    /// Whether local activation input is honoured at all.
    pub fn accepts_input(&self) -> bool {
        !self.ai_thinking && !self.game_over
    }
}

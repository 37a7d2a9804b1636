//! Local piece selection.
//!
//! Pure interaction state: the controller decides which authority requests
//! an [`Activation`] turns into, and paints the highlights.

use crate::state::MatchState;
use chess::Square;

/// Selected square plus the destinations the authority reported for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected: Option<Square>,
    pub candidates: Vec<Square>,
}

/// Result of activating a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Input suppressed or meaningless; nothing changed.
    Ignored,
    /// The selected square was activated again and the selection dropped.
    Deselected,
    /// A new square is selected; its destinations must be requested.
    Selected(Square),
    /// A move-intent from the selected square; the selection is already clear.
    Submitted { start: Square, end: Square },
}

#[derive(Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<Square> {
        self.state.selected
    }

    pub fn candidates(&self) -> &[Square] {
        &self.state.candidates
    }

    /// React to a click (or keyboard activation) on `square`.
    pub fn on_cell_activated(&mut self, square: Square, game: &MatchState) -> Activation {
        if !game.accepts_input() {
            return Activation::Ignored;
        }

        if self.state.selected == Some(square) {
            self.clear();
            return Activation::Deselected;
        }

        let occupant = game.board.piece_at(square).color();
        if occupant == Some(game.turn_owner) && game.is_local(game.turn_owner) {
            self.state.selected = Some(square);
            self.state.candidates.clear();
            return Activation::Selected(square);
        }

        match self.state.selected {
            Some(start) => {
                self.clear();
                Activation::Submitted { start, end: square }
            }
            None => Activation::Ignored,
        }
    }

    /// Accept destinations for `square`. Returns `false` (and changes nothing)
    /// when the response no longer matches the current selection.
    pub fn on_destinations_received(&mut self, square: Square, destinations: Vec<Square>) -> bool {
        if self.state.selected != Some(square) {
            return false;
        }
        self.state.candidates = destinations;
        true
    }

    pub fn clear(&mut self) {
        self.state.selected = None;
        self.state.candidates.clear();
    }
}

//! Messages exchanged with the game authority.
//!
//! Each message is one JSON object per line: `{"event": "...", "data": {...}}`.

use chess::{Board, MoveDescriptor, PieceColor, Square};
use serde::{Deserialize, Serialize};

/// Events pushed by the authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    InitialState(InitialState),
    ValidDestinations(ValidDestinations),
    MoveCompleted(MoveCompleted),
    ThinkingStatus(ThinkingStatus),
    GameOver(GameOver),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialState {
    pub board: Board,
    pub turn_owner: PieceColor,
    pub local_controls_white: bool,
    pub local_controls_black: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidDestinations {
    pub square: Square,
    pub destinations: Vec<Square>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCompleted {
    pub board: Board,
    #[serde(rename = "move")]
    pub mv: MoveDescriptor,
    pub turn_owner: PieceColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinkingStatus {
    pub thinking: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    pub message: String,
}

/// Requests sent to the authority. None of them expects an inline reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Match setup; must reach the authority before the first `initialState`.
    #[serde(rename_all = "camelCase")]
    ConfigureMatch {
        local_controls_white: bool,
        local_controls_black: bool,
        search_depth: u8,
    },
    RequestDestinations { square: Square },
    #[serde(rename_all = "camelCase")]
    SubmitMove {
        start_square: Square,
        end_square: Square,
    },
    RequestRemoteMove,
}

impl ServerEvent {
    /// Protocol name of the event, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitialState(_) => "initialState",
            Self::ValidDestinations(_) => "validDestinations",
            Self::MoveCompleted(_) => "moveCompleted",
            Self::ThinkingStatus(_) => "thinkingStatus",
            Self::GameOver(_) => "gameOver",
        }
    }
}

impl ClientMessage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConfigureMatch { .. } => "configureMatch",
            Self::RequestDestinations { .. } => "requestDestinations",
            Self::SubmitMove { .. } => "submitMove",
            Self::RequestRemoteMove => "requestRemoteMove",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess::{Piece, PieceKind};

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn submit_move_wire_shape() {
        let msg = ClientMessage::SubmitMove {
            start_square: sq(6, 4),
            end_square: sq(4, 4),
        };
        assert_eq!(
            serde_json::to_string(&msg).unwrap(),
            r#"{"event":"submitMove","data":{"startSquare":[6,4],"endSquare":[4,4]}}"#
        );
    }

    #[test]
    fn request_remote_move_has_no_payload() {
        let json = serde_json::to_string(&ClientMessage::RequestRemoteMove).unwrap();
        assert_eq!(json, r#"{"event":"requestRemoteMove"}"#);
    }

    #[test]
    fn configure_match_wire_shape() {
        let msg = ClientMessage::ConfigureMatch {
            local_controls_white: true,
            local_controls_black: false,
            search_depth: 2,
        };
        let value: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["event"], "configureMatch");
        assert_eq!(value["data"]["localControlsWhite"], true);
        assert_eq!(value["data"]["searchDepth"], 2);
    }

    #[test]
    fn decodes_move_completed() {
        let mut rows = vec![vec!["--"; 8]; 8];
        rows[4][4] = "wp";
        let json = serde_json::json!({
            "event": "moveCompleted",
            "data": {
                "board": rows,
                "turnOwner": "black",
                "move": {
                    "pieceMoved": "wp",
                    "startSquare": [6, 4],
                    "endSquare": [4, 4],
                    "isCapture": false,
                    "isPromotion": false,
                    "isEnpassant": false,
                    "checkmate": false,
                    "stalemate": false,
                    "check": false
                }
            }
        });
        let event: ServerEvent = serde_json::from_value(json).unwrap();
        let ServerEvent::MoveCompleted(done) = event else {
            panic!("expected moveCompleted");
        };
        assert_eq!(done.turn_owner, PieceColor::Black);
        assert_eq!(
            done.board.piece_at(sq(4, 4)),
            Piece::new(PieceColor::White, PieceKind::Pawn)
        );
        assert_eq!(done.mv.end_square, sq(4, 4));
    }

    #[test]
    fn rejects_out_of_range_destinations() {
        let json = r#"{"event":"validDestinations","data":{"square":[6,4],"destinations":[[8,1]]}}"#;
        assert!(serde_json::from_str::<ServerEvent>(json).is_err());
    }

    #[test]
    fn decodes_thinking_and_game_over() {
        let thinking: ServerEvent =
            serde_json::from_str(r#"{"event":"thinkingStatus","data":{"thinking":true}}"#).unwrap();
        assert_eq!(
            thinking,
            ServerEvent::ThinkingStatus(ThinkingStatus { thinking: true })
        );

        let over: ServerEvent = serde_json::from_str(
            r#"{"event":"gameOver","data":{"message":"White wins by checkmate"}}"#,
        )
        .unwrap();
        assert_eq!(over.name(), "gameOver");
    }
}

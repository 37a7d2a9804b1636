//! Synchronization between the local view and the game authority.
//!
//! `SyncController` owns the mirrored match state and orchestrates selection,
//! animation and the move log. Every handler runs to completion; time is
//! injected through `now` so the whole controller can be driven from tests.
//!
//! Ordering guarantees:
//! - a confirmed move's board is applied only when its slide settles;
//! - its notation is logged only after the board is applied;
//! - nothing here mutates the board from local input.

use crate::animation::AnimationSequencer;
use crate::config::TimingConfig;
use crate::move_log::MoveLog;
use crate::scene::{Overlay, Scene};
use crate::selection::{Activation, SelectionController, SelectionState};
use crate::state::MatchState;
use chess::{notate, Board, MoveDescriptor, Square};
use chess_client::protocol::{GameOver, InitialState, MoveCompleted, ValidDestinations};
use chess_client::{ClientMessage, ServerEvent, Transport};
use std::time::Instant;

/// Interaction phase of the controller.
///
/// `ai_thinking` and `game_over` live on [`MatchState`] and overlay whichever
/// phase is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    /// Destinations were requested for the selected square.
    AwaitingDestinations,
    /// A move-intent was sent and no confirmation has arrived yet.
    MoveInFlight,
    /// A confirmed move is sliding; the board commit waits for it.
    Animating,
}

/// What a confirmed move commits once its slide settles.
struct PendingCommit {
    board: Board,
    mv: MoveDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Deferred {
    RequestRemoteMove,
    ShowLastMove,
    ShowNotice(String),
    DismissNotice,
}

#[derive(Debug)]
struct Scheduled {
    due: Instant,
    action: Deferred,
}

pub struct SyncController<T: Transport> {
    transport: T,
    timing: TimingConfig,
    game: MatchState,
    selection: SelectionController,
    animator: AnimationSequencer<PendingCommit>,
    move_log: MoveLog,
    scene: Scene,
    phase: SyncPhase,
    timers: Vec<Scheduled>,
}

impl<T: Transport> SyncController<T> {
    pub fn new(transport: T, timing: TimingConfig) -> Self {
        let game = MatchState::default();
        let mut scene = Scene::new();
        scene.paint_board(&game.board);

        Self {
            transport,
            timing,
            game,
            selection: SelectionController::new(),
            animator: AnimationSequencer::new(timing.animation, timing.square_size),
            move_log: MoveLog::new(),
            scene,
            phase: SyncPhase::Idle,
            timers: Vec::new(),
        }
    }

    pub fn match_state(&self) -> &MatchState {
        &self.game
    }

    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    pub fn move_log(&self) -> &MoveLog {
        &self.move_log
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    // --- Local input ---

    /// A board cell was clicked or activated from the keyboard.
    pub fn on_cell_activated(&mut self, square: Square) {
        if self.phase == SyncPhase::Animating {
            tracing::debug!(%square, "Ignoring activation while a move animates");
            return;
        }

        match self.selection.on_cell_activated(square, &self.game) {
            Activation::Ignored => {}
            Activation::Deselected => {
                self.clear_selection_overlays();
                if self.phase == SyncPhase::AwaitingDestinations {
                    self.phase = SyncPhase::Idle;
                }
            }
            Activation::Selected(square) => {
                self.clear_selection_overlays();
                self.scene.mark(square, Overlay::Selected);
                self.send(ClientMessage::RequestDestinations { square });
                self.phase = SyncPhase::AwaitingDestinations;
            }
            Activation::Submitted { start, end } => {
                self.clear_selection_overlays();
                tracing::info!(from = %start, to = %end, "Submitting move");
                self.send(ClientMessage::SubmitMove {
                    start_square: start,
                    end_square: end,
                });
                self.phase = SyncPhase::MoveInFlight;
            }
        }
    }

    // --- Authority events ---

    pub fn handle_event(&mut self, event: ServerEvent, now: Instant) {
        tracing::debug!(event = event.name(), phase = ?self.phase, "Authority event");
        match event {
            ServerEvent::InitialState(initial) => self.on_initial_state(initial, now),
            ServerEvent::ValidDestinations(valid) => self.on_valid_destinations(valid),
            ServerEvent::MoveCompleted(done) => self.on_move_completed(done, now),
            ServerEvent::ThinkingStatus(status) => {
                self.game.ai_thinking = status.thinking;
            }
            ServerEvent::GameOver(over) => self.on_game_over(over, now),
        }
    }

    fn on_initial_state(&mut self, initial: InitialState, now: Instant) {
        if self.animator.abandon(&mut self.scene).is_some() {
            tracing::info!("New match replaced a running animation");
        }
        self.timers.clear();

        self.game = MatchState {
            board: initial.board,
            turn_owner: initial.turn_owner,
            local_controls_white: initial.local_controls_white,
            local_controls_black: initial.local_controls_black,
            last_move: None,
            ai_thinking: false,
            game_over: false,
        };
        self.selection.clear();
        self.move_log.reset();

        self.scene = Scene::new();
        self.scene.paint_board(&self.game.board);
        self.phase = SyncPhase::Idle;

        tracing::info!(
            turn = %self.game.turn_owner,
            white_local = self.game.local_controls_white,
            black_local = self.game.local_controls_black,
            "Match started"
        );

        if self.game.awaiting_remote_move() {
            self.schedule(now, Deferred::RequestRemoteMove);
        }
    }

    fn on_valid_destinations(&mut self, valid: ValidDestinations) {
        let ValidDestinations {
            square,
            destinations,
        } = valid;
        if !self
            .selection
            .on_destinations_received(square, destinations)
        {
            tracing::debug!(%square, "Discarding stale destinations");
            return;
        }

        self.scene.clear_overlay(Overlay::Candidate);
        for destination in self.selection.candidates() {
            self.scene.mark(*destination, Overlay::Candidate);
        }
        if self.phase == SyncPhase::AwaitingDestinations {
            self.phase = SyncPhase::Idle;
        }
    }

    fn on_move_completed(&mut self, done: MoveCompleted, now: Instant) {
        let MoveCompleted {
            board,
            mv,
            turn_owner,
        } = done;

        // One slide at a time: a move still sliding commits before the next.
        if let Some(prior) = self.animator.abandon(&mut self.scene) {
            tracing::warn!("Move confirmed while the previous one was still animating");
            self.commit(prior, now);
        }

        self.selection.clear();
        self.clear_selection_overlays();
        self.game.turn_owner = turn_owner;

        self.timers
            .retain(|timer| timer.action != Deferred::ShowLastMove);
        if let Some(previous) = self.game.last_move.take() {
            self.scene.unmark(previous.start_square, Overlay::LastMove);
            self.scene.unmark(previous.end_square, Overlay::LastMove);
        }
        if self.game.both_local() {
            self.mark_last_move(&mv);
        }

        let piece = match self.game.board.piece_at(mv.start_square) {
            mirrored if !mirrored.is_empty() => mirrored,
            _ => mv.piece_moved,
        };
        let (start, end) = (mv.start_square, mv.end_square);
        self.game.last_move = Some(mv.clone());

        let displaced = self.animator.play(
            &mut self.scene,
            piece,
            start,
            end,
            now,
            PendingCommit { board, mv },
        );
        debug_assert!(displaced.is_none(), "running slide is abandoned before play");
        self.phase = SyncPhase::Animating;
    }

    fn on_game_over(&mut self, over: GameOver, now: Instant) {
        let GameOver { message } = over;
        tracing::info!(%message, "Game over");

        self.game.game_over = true;
        self.selection.clear();
        self.clear_selection_overlays();
        self.timers
            .retain(|timer| timer.action != Deferred::RequestRemoteMove);
        self.schedule(now + self.animator.duration(), Deferred::ShowNotice(message));
    }

    // --- Time ---

    /// Advance the running animation and fire every deferred action due at
    /// `now`. Call once per frame.
    pub fn tick(&mut self, now: Instant) {
        if let Some(commit) = self.animator.advance(&mut self.scene, now) {
            self.commit(commit, now);
        }

        while let Some(timer) = self.take_due(now) {
            self.run(timer);
        }
    }

    /// Settle callback: apply the confirmed board, then log the move.
    fn commit(&mut self, commit: PendingCommit, now: Instant) {
        let PendingCommit { board, mv } = commit;

        self.game.board = board;
        self.scene.paint_board(&self.game.board);

        let notation = notate(&mv, &self.game.board, mv.checkmate, mv.stalemate, mv.check);
        tracing::info!(%notation, ply = self.move_log.len() + 1, "Move applied");
        self.move_log.push(notation);

        if self.phase == SyncPhase::Animating {
            self.phase = SyncPhase::Idle;
        }

        if !self.game.both_local() && self.game.last_move.as_ref() == Some(&mv) {
            self.schedule(now + self.timing.highlight_delay, Deferred::ShowLastMove);
        }
        if self.game.awaiting_remote_move() {
            self.schedule(now + self.animator.duration(), Deferred::RequestRemoteMove);
        }
    }

    fn schedule(&mut self, due: Instant, action: Deferred) {
        self.timers.push(Scheduled { due, action });
    }

    fn take_due(&mut self, now: Instant) -> Option<Scheduled> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= now)
            .min_by_key(|(_, timer)| timer.due)
            .map(|(index, _)| index)?;
        Some(self.timers.remove(index))
    }

    fn run(&mut self, timer: Scheduled) {
        match timer.action {
            Deferred::RequestRemoteMove => {
                if self.game.awaiting_remote_move() {
                    tracing::info!(turn = %self.game.turn_owner, "Requesting remote move");
                    self.send(ClientMessage::RequestRemoteMove);
                }
            }
            Deferred::ShowLastMove => {
                if let Some(mv) = self.game.last_move.clone() {
                    self.mark_last_move(&mv);
                }
            }
            Deferred::ShowNotice(message) => {
                self.scene.set_notice(Some(message));
                self.schedule(
                    timer.due + self.timing.notice_duration,
                    Deferred::DismissNotice,
                );
            }
            Deferred::DismissNotice => self.scene.set_notice(None),
        }
    }

    // --- Helpers ---

    fn send(&mut self, message: ClientMessage) {
        let name = message.name();
        if let Err(e) = self.transport.send(message) {
            tracing::warn!(event = name, "Failed to reach authority: {}", e);
        }
    }

    fn clear_selection_overlays(&mut self) {
        self.scene.clear_overlay(Overlay::Selected);
        self.scene.clear_overlay(Overlay::Candidate);
    }

    fn mark_last_move(&mut self, mv: &MoveDescriptor) {
        self.scene.mark(mv.start_square, Overlay::LastMove);
        self.scene.mark(mv.end_square, Overlay::LastMove);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess::{Piece, PieceColor, PieceKind};
    use chess_client::protocol::ThinkingStatus;
    use chess_client::MockTransport;
    use std::time::Duration;

    const ANIMATION: Duration = Duration::from_millis(300);

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    fn controller() -> (SyncController<MockTransport>, MockTransport) {
        let mock = MockTransport::new();
        (
            SyncController::new(mock.clone(), TimingConfig::default()),
            mock,
        )
    }

    fn initial(white: bool, black: bool) -> ServerEvent {
        ServerEvent::InitialState(InitialState {
            board: Board::standard(),
            turn_owner: PieceColor::White,
            local_controls_white: white,
            local_controls_black: black,
        })
    }

    fn e2e4() -> ServerEvent {
        let mut board = Board::standard();
        let pawn = Piece::new(PieceColor::White, PieceKind::Pawn);
        board.set(sq(6, 4), Piece::Empty);
        board.set(sq(4, 4), pawn);
        ServerEvent::MoveCompleted(MoveCompleted {
            board,
            mv: MoveDescriptor::quiet(pawn, sq(6, 4), sq(4, 4)),
            turn_owner: PieceColor::Black,
        })
    }

    #[test]
    fn phases_follow_selection_round_trip() {
        let (mut ctl, mock) = controller();
        let t0 = Instant::now();
        ctl.handle_event(initial(true, false), t0);
        assert_eq!(ctl.phase(), SyncPhase::Idle);

        ctl.on_cell_activated(sq(6, 4));
        assert_eq!(ctl.phase(), SyncPhase::AwaitingDestinations);
        assert_eq!(
            mock.get_calls(),
            vec![ClientMessage::RequestDestinations { square: sq(6, 4) }]
        );

        ctl.handle_event(
            ServerEvent::ValidDestinations(ValidDestinations {
                square: sq(6, 4),
                destinations: vec![sq(5, 4), sq(4, 4)],
            }),
            t0,
        );
        assert_eq!(ctl.phase(), SyncPhase::Idle);
        assert_eq!(
            ctl.scene().squares_with(Overlay::Candidate),
            vec![sq(4, 4), sq(5, 4)]
        );

        ctl.on_cell_activated(sq(4, 4));
        assert_eq!(ctl.phase(), SyncPhase::MoveInFlight);
        assert!(ctl.scene().squares_with(Overlay::Candidate).is_empty());
        assert!(ctl.scene().squares_with(Overlay::Selected).is_empty());
    }

    #[test]
    fn board_is_untouched_until_settle() {
        let (mut ctl, _mock) = controller();
        let t0 = Instant::now();
        ctl.handle_event(initial(true, false), t0);
        ctl.handle_event(e2e4(), t0);

        assert_eq!(ctl.phase(), SyncPhase::Animating);
        assert_eq!(ctl.match_state().board, Board::standard());
        assert_eq!(ctl.match_state().turn_owner, PieceColor::Black);

        ctl.tick(t0 + ANIMATION / 2);
        assert_eq!(ctl.match_state().board, Board::standard());
        assert!(ctl.move_log().is_empty());

        ctl.tick(t0 + ANIMATION);
        assert_eq!(ctl.phase(), SyncPhase::Idle);
        assert_eq!(ctl.move_log().entries(), &["e4".to_string()]);
        assert_eq!(ctl.scene().cell(sq(4, 4)).unwrap().asset, "wp");
        assert_eq!(ctl.scene().cell(sq(6, 4)).unwrap().asset, "empty");
    }

    #[test]
    fn input_is_ignored_while_animating() {
        let (mut ctl, mock) = controller();
        let t0 = Instant::now();
        ctl.handle_event(initial(true, true), t0);
        ctl.handle_event(e2e4(), t0);
        mock.clear_calls();

        ctl.on_cell_activated(sq(1, 4));
        assert!(mock.get_calls().is_empty());
        assert_eq!(ctl.selection(), &SelectionState::default());
    }

    #[test]
    fn remote_move_requested_after_cosmetic_delay() {
        let (mut ctl, mock) = controller();
        let t0 = Instant::now();
        ctl.handle_event(initial(true, false), t0);
        ctl.handle_event(e2e4(), t0);
        ctl.tick(t0 + ANIMATION);
        assert!(mock.get_calls().is_empty());

        ctl.tick(t0 + ANIMATION * 2 - Duration::from_millis(1));
        assert!(mock.get_calls().is_empty());

        ctl.tick(t0 + ANIMATION * 2);
        assert_eq!(mock.get_calls(), vec![ClientMessage::RequestRemoteMove]);

        ctl.tick(t0 + ANIMATION * 10);
        assert_eq!(mock.get_calls().len(), 1);
    }

    #[test]
    fn hot_seat_never_requests_remote_moves() {
        let (mut ctl, mock) = controller();
        let t0 = Instant::now();
        ctl.handle_event(initial(true, true), t0);
        ctl.handle_event(e2e4(), t0);
        ctl.tick(t0 + ANIMATION * 5);
        assert!(mock.get_calls().is_empty());
    }

    #[test]
    fn last_move_highlight_timing() {
        let (mut ctl, _mock) = controller();
        let t0 = Instant::now();
        ctl.handle_event(initial(true, false), t0);
        ctl.handle_event(e2e4(), t0);
        ctl.tick(t0 + ANIMATION);
        assert!(ctl.scene().squares_with(Overlay::LastMove).is_empty());

        ctl.tick(t0 + ANIMATION + Duration::from_millis(100));
        assert_eq!(
            ctl.scene().squares_with(Overlay::LastMove),
            vec![sq(4, 4), sq(6, 4)]
        );
    }

    #[test]
    fn hot_seat_highlights_last_move_immediately() {
        let (mut ctl, _mock) = controller();
        let t0 = Instant::now();
        ctl.handle_event(initial(true, true), t0);
        ctl.handle_event(e2e4(), t0);
        assert_eq!(
            ctl.scene().squares_with(Overlay::LastMove),
            vec![sq(4, 4), sq(6, 4)]
        );
    }

    #[test]
    fn thinking_status_toggles_flag() {
        let (mut ctl, _mock) = controller();
        let t0 = Instant::now();
        ctl.handle_event(initial(true, false), t0);
        ctl.handle_event(
            ServerEvent::ThinkingStatus(ThinkingStatus { thinking: true }),
            t0,
        );
        assert!(ctl.match_state().ai_thinking);
        ctl.handle_event(
            ServerEvent::ThinkingStatus(ThinkingStatus { thinking: false }),
            t0,
        );
        assert!(!ctl.match_state().ai_thinking);
    }

    #[test]
    fn game_over_notice_shows_then_dismisses() {
        let (mut ctl, mock) = controller();
        let t0 = Instant::now();
        ctl.handle_event(initial(true, false), t0);
        ctl.handle_event(
            ServerEvent::GameOver(GameOver {
                message: "Draw by stalemate".into(),
            }),
            t0,
        );
        assert!(ctl.match_state().game_over);
        assert!(ctl.scene().notice().is_none());

        ctl.tick(t0 + ANIMATION);
        assert_eq!(ctl.scene().notice(), Some("Draw by stalemate"));

        ctl.tick(t0 + ANIMATION + Duration::from_millis(4999));
        assert!(ctl.scene().notice().is_some());
        ctl.tick(t0 + ANIMATION + Duration::from_secs(5));
        assert!(ctl.scene().notice().is_none());

        ctl.on_cell_activated(sq(6, 4));
        assert!(mock.get_calls().is_empty());
    }

    #[test]
    fn game_over_cancels_pending_remote_move() {
        let (mut ctl, mock) = controller();
        let t0 = Instant::now();
        ctl.handle_event(initial(true, false), t0);
        ctl.handle_event(e2e4(), t0);
        ctl.tick(t0 + ANIMATION);
        ctl.handle_event(
            ServerEvent::GameOver(GameOver {
                message: "White wins by checkmate".into(),
            }),
            t0 + ANIMATION,
        );
        ctl.tick(t0 + ANIMATION * 3);
        assert!(mock.get_calls().is_empty());
    }

    #[test]
    fn initial_state_resets_match() {
        let (mut ctl, _mock) = controller();
        let t0 = Instant::now();
        ctl.handle_event(initial(true, false), t0);
        ctl.handle_event(e2e4(), t0);
        ctl.tick(t0 + ANIMATION);
        assert_eq!(ctl.move_log().len(), 1);

        ctl.handle_event(initial(true, false), t0 + ANIMATION);
        assert!(ctl.move_log().is_empty());
        assert_eq!(ctl.match_state().last_move, None);
        assert_eq!(ctl.match_state().board, Board::standard());
        assert!(ctl.scene().squares_with(Overlay::LastMove).is_empty());
    }

    #[test]
    fn initial_state_with_remote_side_to_move_requests_its_move() {
        let (mut ctl, mock) = controller();
        let t0 = Instant::now();
        ctl.handle_event(initial(false, true), t0);
        ctl.tick(t0);
        assert_eq!(mock.get_calls(), vec![ClientMessage::RequestRemoteMove]);
    }

    #[test]
    fn new_match_discards_running_animation() {
        let (mut ctl, _mock) = controller();
        let t0 = Instant::now();
        ctl.handle_event(initial(true, true), t0);
        ctl.handle_event(e2e4(), t0);
        ctl.handle_event(initial(true, true), t0 + ANIMATION / 2);

        assert!(ctl.scene().sprite().is_none());
        ctl.tick(t0 + ANIMATION * 2);
        assert!(ctl.move_log().is_empty());
        assert_eq!(ctl.scene().cell(sq(6, 4)).unwrap().asset, "wp");
    }

    #[test]
    fn transport_failure_is_not_fatal() {
        let (mut ctl, mock) = controller();
        let t0 = Instant::now();
        ctl.handle_event(initial(true, false), t0);
        mock.disconnect();
        ctl.on_cell_activated(sq(6, 4));
        assert_eq!(ctl.selection().selected, Some(sq(6, 4)));
    }
}

use crate::state::MatchState;
use crate::sync::SyncPhase;
use crate::ui::theme::Theme;
use chess::PieceColor;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct GameInfoPanel<'a> {
    pub game: &'a MatchState,
    pub phase: SyncPhase,
    pub connected: bool,
    pub theme: &'a Theme,
}

impl<'a> GameInfoPanel<'a> {
    pub fn new(game: &'a MatchState, phase: SyncPhase, connected: bool, theme: &'a Theme) -> Self {
        Self {
            game,
            phase,
            connected,
            theme,
        }
    }

    fn label(&self, text: &'static str) -> Span<'static> {
        Span::styled(
            text,
            Style::default()
                .fg(self.theme.warning)
                .add_modifier(Modifier::BOLD),
        )
    }

    fn controller_text(&self, color: PieceColor) -> &'static str {
        if self.game.is_local(color) {
            "You"
        } else {
            "Engine"
        }
    }

    /// Short status line: game over, engine thinking, or the phase.
    fn status(&self) -> (&'static str, Color) {
        if !self.connected {
            return ("Disconnected", self.theme.negative);
        }
        if self.game.game_over {
            return ("Game over", self.theme.negative);
        }
        if self.game.ai_thinking {
            return ("Engine thinking...", self.theme.info);
        }
        match self.phase {
            SyncPhase::Idle if self.game.is_local(self.game.turn_owner) => {
                ("Your move", self.theme.positive)
            }
            SyncPhase::Idle => ("Waiting for opponent", self.theme.muted),
            SyncPhase::AwaitingDestinations => ("Select destination", self.theme.info),
            SyncPhase::MoveInFlight => ("Move sent", self.theme.muted),
            SyncPhase::Animating => ("Moving...", self.theme.muted),
        }
    }
}

impl Widget for GameInfoPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("♟ Game Info ♟")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.panel_border));

        let inner = block.inner(area);
        block.render(area, buf);

        let turn = self.game.turn_owner;
        let turn_text = match turn {
            PieceColor::White => "White to move",
            PieceColor::Black => "Black to move",
        };
        let (status, status_color) = self.status();

        let lines = vec![
            Line::from(vec![
                self.label("Turn: "),
                Span::styled(
                    turn_text,
                    Style::default()
                        .fg(self.theme.text_primary)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::raw(""),
            Line::from(vec![
                self.label("White: "),
                Span::raw(self.controller_text(PieceColor::White)),
            ]),
            Line::from(vec![
                self.label("Black: "),
                Span::raw(self.controller_text(PieceColor::Black)),
            ]),
            Line::raw(""),
            Line::from(vec![
                self.label("Status: "),
                Span::styled(
                    status,
                    Style::default()
                        .fg(status_color)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::raw(""),
            Line::styled(
                "Click or Enter to select · q to quit",
                Style::default().fg(self.theme.muted),
            ),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}

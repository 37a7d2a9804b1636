use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Centered transient message (game result).
pub struct NoticeDialog<'a> {
    pub message: &'a str,
    pub theme: &'a Theme,
}

impl<'a> NoticeDialog<'a> {
    pub fn new(message: &'a str, theme: &'a Theme) -> Self {
        Self { message, theme }
    }

    /// Dialog rectangle centered inside `area`.
    pub fn dialog_area(&self, area: Rect) -> Rect {
        let width = u16::try_from(self.message.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_add(6)
            .clamp(24, 60);
        let height = 5;
        let x = area.width.saturating_sub(width) / 2;
        let y = area.height.saturating_sub(height) / 2;
        Rect {
            x: area.x + x,
            y: area.y + y,
            width: width.min(area.width),
            height: height.min(area.height),
        }
    }
}

impl Widget for NoticeDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = self.dialog_area(area);
        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title("♚ Game Over ♔")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.dialog_border))
            .style(Style::default().bg(self.theme.dialog_bg));

        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let lines = vec![
            Line::raw(""),
            Line::styled(
                self.message,
                Style::default()
                    .fg(self.theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_is_centered_and_bounded() {
        let theme = Theme::dark();
        let dialog = NoticeDialog::new("White wins by checkmate", &theme);
        let area = dialog.dialog_area(Rect::new(0, 0, 80, 24));
        assert_eq!(area.width, 29);
        assert_eq!(area.x, (80 - 29) / 2);
        assert_eq!(area.height, 5);

        let tiny = dialog.dialog_area(Rect::new(0, 0, 20, 3));
        assert!(tiny.width <= 20 && tiny.height <= 3);
    }

    #[test]
    fn oversized_message_clamps_width() {
        let theme = Theme::dark();
        for len in [65_532, 70_000] {
            let message = "x".repeat(len);
            let area = NoticeDialog::new(&message, &theme).dialog_area(Rect::new(0, 0, 80, 24));
            assert_eq!(area.width, 60);
        }
    }

    #[test]
    fn oversized_message_renders() {
        let theme = Theme::dark();
        let message = "x".repeat(65_532);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        NoticeDialog::new(&message, &theme).render(area, &mut buf);
    }
}

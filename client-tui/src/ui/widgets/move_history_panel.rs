use crate::move_log::MoveLog;
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct MoveHistoryPanel<'a> {
    pub log: &'a MoveLog,
    pub theme: &'a Theme,
}

impl<'a> MoveHistoryPanel<'a> {
    pub fn new(log: &'a MoveLog, theme: &'a Theme) -> Self {
        Self { log, theme }
    }
}

impl Widget for MoveHistoryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("♔ Move History ♕")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.panel_border));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.log.is_empty() {
            Paragraph::new("No moves yet")
                .style(Style::default().fg(self.theme.muted))
                .render(inner, buf);
            return;
        }

        let header = Style::default()
            .fg(self.theme.warning)
            .add_modifier(Modifier::BOLD);
        let mut lines = vec![Line::from(vec![
            Span::styled(format!("{:>4} ", "#"), header),
            Span::styled(format!("{:<10}", "White"), header),
            Span::styled("Black", header),
        ])];

        for (i, (white, black)) in self.log.rows().enumerate() {
            let mut spans = vec![
                Span::styled(
                    format!("{:>3}. ", i + 1),
                    Style::default().fg(self.theme.warning),
                ),
                Span::styled(
                    format!("{:<10}", white),
                    Style::default()
                        .fg(self.theme.text_primary)
                        .add_modifier(Modifier::BOLD),
                ),
            ];
            if let Some(black) = black {
                spans.push(Span::styled(
                    black.to_string(),
                    Style::default()
                        .fg(self.theme.text_secondary)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            lines.push(Line::from(spans));
        }

        // Keep the newest row visible.
        let visible = inner.height as usize;
        let scroll = lines.len().saturating_sub(visible) as u16;
        Paragraph::new(lines).scroll((scroll, 0)).render(inner, buf);
    }
}

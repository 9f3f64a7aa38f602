use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::centered_fixed;
use crate::theme::THEME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Success,
    Error,
}

/// Blocking message box. While visible it swallows every key; the first key
/// press dismisses it.
pub struct Alert {
    message: Option<(AlertKind, String)>,
}

impl Alert {
    pub fn new() -> Self {
        Self { message: None }
    }

    pub fn show(&mut self, kind: AlertKind, message: impl Into<String>) {
        self.message = Some((kind, message.into()));
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|(_, m)| m.as_str())
    }

    /// Returns true if it consumed the event
    pub fn handle_key(&mut self, _key: KeyEvent) -> bool {
        self.message.take().is_some()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let Some((kind, message)) = &self.message else {
            return;
        };

        let (title, accent) = match kind {
            AlertKind::Info => (" Notice ", THEME.accent_style()),
            AlertKind::Success => (" Success ", THEME.success_style()),
            AlertKind::Error => (" Error ", THEME.error_style()),
        };

        let width = (message.len() as u16 + 6).clamp(30, 70);
        let popup_area = centered_fixed(area, width, 7);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(Span::styled(title, accent.add_modifier(Modifier::BOLD)))
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(accent)
            .style(THEME.card_style());

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(message.as_str(), THEME.title_style())),
            Line::from(""),
            Line::from(Span::styled("press any key", THEME.muted_style())),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }
}

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::data::types::CatalogSource;
use crate::theme::THEME;

pub struct StatusBar {
    pub error_message: Option<String>,
    pub info_message: Option<String>,
    pub loading: bool,
    pub catalog_source: Option<CatalogSource>,
    pub wallet_kind: Option<&'static str>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            error_message: None,
            info_message: None,
            loading: false,
            catalog_source: None,
            wallet_kind: None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let bg = Block::default().style(THEME.header_style());
        frame.render_widget(bg, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(36)])
            .split(area);

        // --- Left side ---
        let left_content = if let Some(ref err) = self.error_message {
            Line::from(vec![
                Span::styled(" ! ", THEME.error_style().add_modifier(Modifier::BOLD)),
                Span::styled(err.as_str(), Style::default().fg(THEME.warning)),
            ])
        } else if self.loading {
            Line::from(Span::styled(" Loading...", THEME.accent_style()))
        } else if let Some(ref info) = self.info_message {
            Line::from(Span::styled(format!(" {info}"), THEME.hash_style()))
        } else {
            Line::from(vec![
                Span::styled(" \u{2190}\u{2191}\u{2192}\u{2193}", THEME.accent_style()),
                Span::styled(":Browse  ", THEME.muted_style()),
                Span::styled("Enter", THEME.accent_style()),
                Span::styled(":Purchase  ", THEME.muted_style()),
                Span::styled("c", THEME.accent_style()),
                Span::styled(":Connect  ", THEME.muted_style()),
                Span::styled("?", THEME.accent_style()),
                Span::styled(":Help  ", THEME.muted_style()),
                Span::styled("q", THEME.accent_style()),
                Span::styled(":Quit", THEME.muted_style()),
            ])
        };

        let left = Paragraph::new(left_content).style(THEME.header_style());
        frame.render_widget(left, chunks[0]);

        // --- Right side: catalog source + wallet kind ---
        let (source_style, source_text) = match self.catalog_source {
            Some(CatalogSource::OnChain) => (THEME.success_style(), CatalogSource::OnChain.to_string()),
            Some(CatalogSource::Fallback) => {
                (Style::default().fg(THEME.warning), CatalogSource::Fallback.to_string())
            }
            None => (THEME.muted_style(), "catalog --".to_string()),
        };

        let wallet_text = self.wallet_kind.unwrap_or("no wallet");

        let right_content = Line::from(vec![
            Span::styled(source_text, source_style),
            Span::styled(" | ", THEME.muted_style()),
            Span::styled(format!("{wallet_text} "), THEME.muted_style()),
        ]);

        let right = Paragraph::new(right_content)
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(right, chunks[1]);
    }
}

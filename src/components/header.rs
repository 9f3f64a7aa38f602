use alloy::primitives::Address;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;
use crate::utils;

pub struct Header {
    pub chain_id: u64,
    pub chain_name: String,
    pub node_connected: bool,
    pub account: Option<Address>,
}

impl Header {
    pub fn new() -> Self {
        Self {
            chain_id: 0,
            chain_name: String::new(),
            node_connected: false,
            account: None,
        }
    }

    fn network_label(&self) -> String {
        if self.node_connected {
            format!("{} ({})", self.chain_name, self.chain_id)
        } else {
            self.chain_name.clone()
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let header_block = Block::default().style(THEME.header_style());
        frame.render_widget(header_block, area);

        // Left: logo | Center: network | Right: wallet button
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(16),
                Constraint::Min(0),
                Constraint::Length(30),
            ])
            .split(area);

        let logo = Paragraph::new(Line::from(vec![
            Span::styled(" \u{25b2} ", THEME.accent_style().add_modifier(Modifier::BOLD)),
            Span::styled("JENGAWIZE", THEME.title_style()),
        ]))
        .style(THEME.header_style());
        frame.render_widget(logo, chunks[0]);

        let dot = if self.node_connected {
            THEME.success_style()
        } else {
            THEME.error_style()
        };
        let network = Paragraph::new(Line::from(vec![
            Span::styled("\u{25cf} ", dot),
            Span::styled(self.network_label(), THEME.muted_style()),
        ]))
        .alignment(Alignment::Center)
        .style(THEME.header_style());
        frame.render_widget(network, chunks[1]);

        let wallet = match self.account {
            Some(account) => Span::styled(
                format!(" \u{2713} Connected {} ", utils::truncate_address(&account)),
                THEME.connected_button_style(),
            ),
            None => Span::styled(" Connect Wallet [c] ", THEME.button_style()),
        };
        let wallet_paragraph = Paragraph::new(Line::from(vec![wallet, Span::raw(" ")]))
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(wallet_paragraph, chunks[2]);
    }
}

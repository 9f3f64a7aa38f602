use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::centered_fixed;
use crate::data::types::Product;
use crate::events::AppEvent;
use crate::theme::THEME;

/// "Confirm Purchase" dialog. Shows nothing unless given a product.
pub struct PurchaseModal {
    pub symbol: String,
}

impl PurchaseModal {
    pub fn new() -> Self {
        Self {
            symbol: "ETH".to_string(),
        }
    }

    /// Keys while the modal is open. The modal owns the keyboard, so every
    /// key is consumed; only confirm and cancel produce events.
    pub fn handle_key(&self, key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => Some(AppEvent::ConfirmPurchase),
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('x') => {
                Some(AppEvent::CancelPurchase)
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, product: Option<&Product>, confirming: bool) {
        let Some(product) = product else {
            return;
        };

        // Dim the page behind the dialog
        frame.render_widget(
            Block::default().style(Style::default().bg(THEME.surface_bright)),
            area,
        );

        let popup_area = centered_fixed(area, 56, 14);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(Span::styled(" Confirm Purchase ", THEME.title_style()))
            .title(
                Line::from(Span::styled(" [x] ", THEME.muted_style())).alignment(Alignment::Right),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(THEME.border_focused_style())
            .style(THEME.card_style())
            .padding(Padding::horizontal(1));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // image
                Constraint::Length(1), // name
                Constraint::Min(2),    // description
                Constraint::Length(2), // price
                Constraint::Length(1), // buttons
            ])
            .split(inner);

        let image = Paragraph::new(Line::from(vec![
            Span::styled("\u{25a3} ", THEME.accent_style()),
            Span::styled(product.image.as_str(), THEME.muted_style()),
        ]));
        frame.render_widget(image, chunks[0]);

        frame.render_widget(
            Paragraph::new(Span::styled(product.name.as_str(), THEME.title_style())),
            chunks[1],
        );

        let description = Paragraph::new(product.description.as_str())
            .style(THEME.muted_style())
            .wrap(Wrap { trim: true });
        frame.render_widget(description, chunks[2]);

        let price = Paragraph::new(Span::styled(
            format!("{} {}", product.price, self.symbol),
            THEME.eth_style(),
        ));
        frame.render_widget(price, chunks[3]);

        let buttons = if confirming {
            Line::from(Span::styled(
                " Waiting for confirmation... ",
                THEME.accent_style().add_modifier(Modifier::SLOW_BLINK),
            ))
        } else {
            Line::from(vec![
                Span::styled(" Cancel [n] ", THEME.secondary_button_style()),
                Span::raw("  "),
                Span::styled(" Confirm Purchase [y] ", THEME.button_style()),
            ])
        };
        frame.render_widget(Paragraph::new(buttons).alignment(Alignment::Right), chunks[4]);
    }
}

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::data::types::Product;
use crate::theme::THEME;

/// Height a card needs, borders included.
pub const CARD_HEIGHT: u16 = 9;

/// One catalog entry: image reference, name, description, price and the
/// purchase button. Highlighted when it is the grid's current card.
pub struct ProductCard<'a> {
    product: &'a Product,
    selected: bool,
    symbol: &'a str,
}

impl<'a> ProductCard<'a> {
    pub fn new(product: &'a Product, selected: bool, symbol: &'a str) -> Self {
        Self {
            product,
            selected,
            symbol,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (style, border) = if self.selected {
            (THEME.selected_card_style(), THEME.border_focused_style())
        } else {
            (THEME.card_style(), THEME.border_style())
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .style(style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // image
                Constraint::Length(1), // name
                Constraint::Min(1),    // description
                Constraint::Length(1), // price + button
            ])
            .split(inner);

        let image = Paragraph::new(Line::from(vec![
            Span::styled("\u{25a3} ", THEME.accent_style()),
            Span::styled(self.product.image.as_str(), THEME.muted_style()),
        ]));
        frame.render_widget(image, chunks[0]);

        let mut name = vec![Span::styled(self.product.name.as_str(), THEME.title_style())];
        if !self.product.is_active {
            name.push(Span::styled("  unavailable", THEME.error_style()));
        }
        frame.render_widget(Paragraph::new(Line::from(name)), chunks[1]);

        let description = Paragraph::new(self.product.description.as_str())
            .style(THEME.muted_style())
            .wrap(Wrap { trim: true });
        frame.render_widget(description, chunks[2]);

        let footer = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(12)])
            .split(chunks[3]);

        let price = Paragraph::new(Span::styled(
            format!("{} {}", self.product.price, self.symbol),
            THEME.eth_style(),
        ));
        frame.render_widget(price, footer[0]);

        let button_style = if self.selected {
            THEME.button_style()
        } else {
            THEME.secondary_button_style()
        };
        let button = Paragraph::new(Span::styled(" \u{1f6d2} Purchase ", button_style))
            .alignment(Alignment::Right);
        frame.render_widget(button, footer[1]);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::data::catalog::fallback_catalog;

    fn render_to_string(product: &Product) -> String {
        let backend = TestBackend::new(40, CARD_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                ProductCard::new(product, true, "ETH").render(frame, frame.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_card_shows_price_in_display_unit() {
        let stone = fallback_catalog()[2].clone();
        let text = render_to_string(&stone);
        assert!(text.contains("Stone"));
        assert!(text.contains("0.015 ETH"));
        assert!(text.contains("images/stone.png"));
    }

    #[test]
    fn test_inactive_card_is_marked() {
        let mut cement = fallback_catalog()[0].clone();
        cement.is_active = false;
        assert!(render_to_string(&cement).contains("unavailable"));
    }
}

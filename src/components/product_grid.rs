use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::product_card::{ProductCard, CARD_HEIGHT};
use crate::components::Component;
use crate::data::types::{CatalogSource, Product};
use crate::events::AppEvent;
use crate::theme::THEME;

const MIN_CARD_WIDTH: u16 = 34;
const MAX_COLUMNS: usize = 3;

/// Responsive grid of product cards (one to three columns).
pub struct ProductGrid {
    pub products: Vec<Product>,
    pub source: Option<CatalogSource>,
    pub symbol: String,
    selected: usize,
    columns: usize,
}

impl ProductGrid {
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            source: None,
            symbol: "ETH".to_string(),
            selected: 0,
            columns: 1,
        }
    }

    pub fn set_products(&mut self, products: Vec<Product>, source: CatalogSource) {
        self.products = products;
        self.source = Some(source);
        self.selected = 0;
    }

    pub fn selected(&self) -> Option<&Product> {
        self.products.get(self.selected)
    }

    fn move_by(&mut self, delta: isize) {
        if self.products.is_empty() {
            return;
        }
        let last = self.products.len() - 1;
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, last as isize) as usize;
    }
}

/// Columns that fit in `width`.
fn columns_for(width: u16) -> usize {
    ((width / MIN_CARD_WIDTH) as usize).clamp(1, MAX_COLUMNS)
}

impl Component for ProductGrid {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Char('l') | KeyCode::Right => {
                self.move_by(1);
                None
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.move_by(-1);
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_by(self.columns as isize);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_by(-(self.columns as isize));
                None
            }
            KeyCode::Char('g') => {
                self.selected = 0;
                None
            }
            KeyCode::Char('G') => {
                self.selected = self.products.len().saturating_sub(1);
                None
            }
            KeyCode::Enter | KeyCode::Char('p') => {
                self.selected().cloned().map(AppEvent::PurchaseIntent)
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = match self.source {
            Some(source) => format!(" Building Materials ({source}) "),
            None => " Building Materials ".to_string(),
        };
        let outer_block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style())
            .style(Style::default().bg(THEME.bg));
        let inner = outer_block.inner(area);
        frame.render_widget(outer_block, area);

        if self.products.is_empty() {
            let msg = if self.source.is_some() {
                "No products available"
            } else {
                "Loading products..."
            };
            let text = Paragraph::new(msg)
                .style(THEME.muted_style())
                .alignment(Alignment::Center);
            frame.render_widget(text, inner);
            return;
        }

        self.columns = columns_for(inner.width);
        let rows_visible = (inner.height / CARD_HEIGHT).max(1) as usize;
        let selected_row = self.selected / self.columns;
        let first_row = selected_row.saturating_sub(rows_visible - 1);

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); rows_visible])
            .split(inner);

        for (slot, row_area) in row_areas.iter().enumerate() {
            let row = first_row + slot;
            let col_areas = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, self.columns as u32); self.columns])
                .spacing(1)
                .split(*row_area);

            for (col, card_area) in col_areas.iter().enumerate() {
                let index = row * self.columns + col;
                if let Some(product) = self.products.get(index) {
                    ProductCard::new(product, index == self.selected, &self.symbol)
                        .render(frame, *card_area);
                }
            }
        }
    }
}

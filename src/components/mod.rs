pub mod alert;
pub mod header;
pub mod help;
pub mod product_card;
pub mod product_grid;
pub mod purchase_modal;
pub mod status_bar;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::events::AppEvent;

/// Trait for all UI components
pub trait Component {
    /// Handle a key event, optionally returning an AppEvent
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent>;

    /// Render the component into the given area
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Centered popup area taking the given percentages of `area`.
pub fn centered_rect(area: Rect, width_pct: u16, height_pct: u16) -> Rect {
    let width = area.width * width_pct / 100;
    let height = area.height * height_pct / 100;
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Centered popup with a fixed size, clamped to `area`.
pub fn centered_fixed(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        assert_eq!(centered_rect(area, 60, 70), Rect::new(20, 7, 60, 35));
    }

    #[test]
    fn test_centered_fixed_clamps() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_fixed(area, 60, 20), area);
        assert_eq!(centered_fixed(area, 20, 4), Rect::new(10, 3, 20, 4));
    }
}

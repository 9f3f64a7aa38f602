use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub bg: Color,
    pub surface: Color,
    pub surface_bright: Color,
    pub text: Color,
    pub text_muted: Color,
    pub text_accent: Color,
    pub brand: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub selected_bg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub eth_value: Color,
    pub hash_color: Color,
}

pub const THEME: Theme = Theme {
    bg: Color::Rgb(243, 244, 246),
    surface: Color::Rgb(255, 255, 255),
    surface_bright: Color::Rgb(229, 231, 235),
    text: Color::Rgb(17, 24, 39),
    text_muted: Color::Rgb(75, 85, 99),
    text_accent: Color::Rgb(37, 99, 235),
    brand: Color::Rgb(37, 99, 235),
    success: Color::Rgb(22, 163, 74),
    error: Color::Rgb(220, 38, 38),
    warning: Color::Rgb(202, 138, 4),
    selected_bg: Color::Rgb(219, 234, 254),
    border: Color::Rgb(209, 213, 219),
    border_focused: Color::Rgb(37, 99, 235),
    eth_value: Color::Rgb(17, 24, 39),
    hash_color: Color::Rgb(107, 114, 128),
};

impl Theme {
    pub const fn header_style(&self) -> Style {
        Style::new().fg(self.text).bg(self.surface)
    }

    pub const fn card_style(&self) -> Style {
        Style::new().fg(self.text).bg(self.surface)
    }

    pub const fn selected_card_style(&self) -> Style {
        Style::new().fg(self.text).bg(self.selected_bg)
    }

    pub const fn border_style(&self) -> Style {
        Style::new().fg(self.border)
    }

    pub const fn border_focused_style(&self) -> Style {
        Style::new().fg(self.border_focused)
    }

    pub const fn muted_style(&self) -> Style {
        Style::new().fg(self.text_muted)
    }

    pub const fn accent_style(&self) -> Style {
        Style::new().fg(self.text_accent)
    }

    pub const fn title_style(&self) -> Style {
        Style::new().fg(self.text).add_modifier(Modifier::BOLD)
    }

    /// Filled call-to-action, like the "Purchase" and "Connect Wallet" buttons.
    pub const fn button_style(&self) -> Style {
        Style::new().fg(Color::White).bg(self.brand).add_modifier(Modifier::BOLD)
    }

    pub const fn connected_button_style(&self) -> Style {
        Style::new().fg(Color::White).bg(self.success).add_modifier(Modifier::BOLD)
    }

    pub const fn secondary_button_style(&self) -> Style {
        Style::new().fg(self.text).bg(self.surface_bright)
    }

    pub const fn success_style(&self) -> Style {
        Style::new().fg(self.success)
    }

    pub const fn error_style(&self) -> Style {
        Style::new().fg(self.error)
    }

    pub const fn eth_style(&self) -> Style {
        Style::new().fg(self.eth_value).add_modifier(Modifier::BOLD)
    }

    pub const fn hash_style(&self) -> Style {
        Style::new().fg(self.hash_color)
    }
}

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const ACCENT: Color = Color::Cyan;
    pub const ACCENT_WARN: Color = Color::Yellow;
    pub const TEXT_PRIMARY: Color = Color::White;
    pub const TEXT_SECONDARY: Color = Color::Gray;
    pub const TEXT_DIM: Color = Color::DarkGray;
    pub const ERROR: Color = Color::Red;

    pub fn border() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn border_type() -> BorderType {
        BorderType::Plain
    }

    pub fn border_type_focused() -> BorderType {
        BorderType::Rounded
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn menu_item() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn menu_selected() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn field_label() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn field_value() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn field_cursor() -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    pub fn description() -> Style {
        Style::default().fg(Self::TEXT_DIM)
    }

    pub fn error_message() -> Style {
        Style::default().fg(Self::ERROR)
    }

    pub fn banner() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn banner_modal() -> Style {
        Style::default()
            .fg(Self::ACCENT_WARN)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input_text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }
}

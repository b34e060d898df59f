use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let status = format!(" {} ", state.status_line());

    // Focus indicator
    let focus_name = match (state.focus, state.input.is_some()) {
        (FocusPanel::Editor, true) => "EDITING",
        (FocusPanel::Editor, false) => "EDITOR",
        (FocusPanel::Menu, _) => "MENU",
    };
    let indicator = format!(" [{}] ", focus_name);

    // Pad to fill remaining space
    let remaining = (area.width as usize).saturating_sub(status.width() + indicator.width());
    let line = Line::from(vec![
        Span::styled(status, Theme::status_bar()),
        Span::styled(" ".repeat(remaining), Theme::status_bar()),
        Span::styled(
            indicator,
            Style::default().fg(Theme::ACCENT).bg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

use crate::store::UiState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub const MODAL_GLYPH: &str = "⚠";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub text: String,
    pub modal: bool,
}

/// `None` when there is no message to show.
pub fn view(ui: &UiState) -> Option<BannerView> {
    if ui.message.is_empty() {
        return None;
    }
    Some(BannerView {
        text: ui.message.clone(),
        modal: ui.message_modal,
    })
}

pub fn render(frame: &mut Frame, area: Rect, banner: &BannerView) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border());

    let line = if banner.modal {
        block = block
            .border_style(Style::default().fg(Theme::ACCENT_WARN))
            .title_bottom(Line::from(" Enter to dismiss ").right_aligned());
        Line::from(vec![
            Span::styled(format!("{} ", MODAL_GLYPH), Theme::banner_modal()),
            Span::styled(banner.text.as_str(), Theme::banner_modal()),
        ])
    } else {
        Line::from(Span::styled(banner.text.as_str(), Theme::banner()))
    };

    let paragraph = Paragraph::new(line)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(banner: &BannerView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), banner))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, 1)].symbol())
            .collect()
    }

    #[test]
    fn empty_message_hides_banner() {
        let ui = UiState {
            message_modal: true,
            ..UiState::default()
        };
        assert_eq!(view(&ui), None);
    }

    #[test]
    fn plain_message() {
        let ui = UiState {
            message: "Dismissed Pyrolizard".to_string(),
            ..UiState::default()
        };
        let banner = view(&ui).unwrap();
        assert!(!banner.modal);
        let row = draw(&banner);
        assert!(row.contains("Dismissed Pyrolizard"));
        assert!(!row.contains(MODAL_GLYPH));
    }

    #[test]
    fn modal_message_shows_glyph() {
        let ui = UiState {
            message: "Server unreachable".to_string(),
            message_modal: true,
            ..UiState::default()
        };
        let row = draw(&view(&ui).unwrap());
        assert!(row.contains(MODAL_GLYPH));
        assert!(row.contains("Server unreachable"));
    }
}

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const MENU_WIDTH: u16 = 28;
pub const BANNER_HEIGHT: u16 = 3;

pub struct AppLayout {
    /// Zero-width when the menu is hidden.
    pub menu: Rect,
    /// The `editor` mount point.
    pub editor: Rect,
    /// Zero-height when there is no message.
    pub banner: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect, show_menu: bool, show_banner: bool) -> AppLayout {
    // Main vertical split: content | banner | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(if show_banner { BANNER_HEIGHT } else { 0 }),
            Constraint::Length(1),
        ])
        .split(area);

    let content = main_chunks[0];
    let banner = main_chunks[1];
    let status_bar = main_chunks[2];

    // Horizontal: menu | gap | editor
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(if show_menu { 1 } else { 0 })
        .constraints([
            Constraint::Length(if show_menu { MENU_WIDTH } else { 0 }),
            Constraint::Min(20),
        ])
        .split(content);

    AppLayout {
        menu: h_chunks[0],
        editor: h_chunks[1],
        banner,
        status_bar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_layout() {
        let layout = compute_layout(Rect::new(0, 0, 100, 30), true, true);
        assert_eq!(layout.menu.width, MENU_WIDTH);
        assert_eq!(layout.editor.x, MENU_WIDTH + 1);
        assert_eq!(layout.banner.height, BANNER_HEIGHT);
        assert_eq!(layout.status_bar.y, 29);
        assert_eq!(layout.status_bar.height, 1);
    }

    #[test]
    fn hidden_menu_and_banner_collapse() {
        let layout = compute_layout(Rect::new(0, 0, 100, 30), false, false);
        assert_eq!(layout.menu.width, 0);
        assert_eq!(layout.editor.width, 100);
        assert_eq!(layout.banner.height, 0);
        assert_eq!(layout.editor.height, 29);
    }
}

mod banner;
mod editor_pane;
mod layout;
mod menu;
mod status_bar;
mod theme;

use crate::app::state::{AppState, FocusPanel};
use ratatui::prelude::*;

/// Draw the root frame (the `app` mount point).
pub fn render(frame: &mut Frame, state: &AppState) {
    let (menu_view, banner_view) = state.store.with(|ui| (menu::view(ui), banner::view(ui)));

    let app_layout =
        layout::compute_layout(frame.area(), menu_view.is_some(), banner_view.is_some());

    if let Some(menu_view) = &menu_view {
        let focused = state.focus == FocusPanel::Menu;
        menu::render(frame, app_layout.menu, menu_view, focused);
    }
    editor_pane::render(frame, app_layout.editor, state);
    if let Some(banner_view) = &banner_view {
        banner::render(frame, app_layout.banner, banner_view);
    }
    status_bar::render(frame, app_layout.status_bar, state);
}

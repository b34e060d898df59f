//! Navigation menu view.
//!
//! Everything shown here comes from [`UiState`]; selection changes are made
//! through the store, never by the view.

use crate::store::UiState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub heading: String,
    pub entries: Vec<MenuEntry>,
}

/// `None` when the menu is hidden.
pub fn view(ui: &UiState) -> Option<MenuView> {
    if !ui.show_menu {
        return None;
    }
    let entries = ui
        .menu_items
        .iter()
        .enumerate()
        .map(|(i, label)| MenuEntry {
            label: label.clone(),
            selected: i == ui.selection_index,
        })
        .collect();
    Some(MenuView {
        heading: ui.menu_heading.to_uppercase(),
        entries,
    })
}

pub fn render(frame: &mut Frame, area: Rect, menu: &MenuView, focused: bool) {
    let (border_style, border_type) = if focused {
        (Theme::border_focused(), Theme::border_type_focused())
    } else {
        (Theme::border(), Theme::border_type())
    };

    let block = Block::default()
        .title(format!(" {} ", menu.heading))
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);

    let items: Vec<ListItem> = menu
        .entries
        .iter()
        .map(|entry| {
            if entry.selected {
                ListItem::new(Span::styled(
                    format!("▶ {}", entry.label),
                    Theme::menu_selected(),
                ))
            } else {
                ListItem::new(Span::styled(
                    format!("  {}", entry.label),
                    Theme::menu_item(),
                ))
            }
        })
        .collect();

    // Scroll so the selected entry stays on screen.
    let selected = menu.entries.iter().position(|e| e.selected);
    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(List::new(items).block(block), area, &mut list_state);
}

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::input::FieldInput;
use crate::app::state::*;
use crate::bridge::LoadOutcome;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(CEvent::Key(key)) if key.kind != KeyEventKind::Release => {
            handle_key(state, key)
        }
        AppEvent::Terminal(CEvent::Resize(..)) => {
            state.mark_dirty();
            vec![]
        }
        AppEvent::Terminal(_) => vec![],
        AppEvent::GdbLoaded(Ok(gdb)) => {
            tracing::info!(data_types = gdb.data_types().len(), "game database loaded");
            let empty = gdb.is_empty();
            state.gdb = Some(gdb);
            state.show_data_types();
            if empty {
                state.menu.display_message("The game database is empty.", false);
            }
            vec![]
        }
        AppEvent::GdbLoaded(Err(e)) => {
            let report = anyhow::Error::new(e);
            tracing::error!("Error loading game database: {report:#}");
            state.level = MenuLevel::Failed;
            state
                .menu
                .display_message("Could not load the game database. See the log for details.", true);
            vec![]
        }
        AppEvent::SchemaLoaded(response) => {
            if let LoadOutcome::Mounted(_) = state.bridge.complete_load(response) {
                // A fresh editor invalidates any half-finished field edit.
                state.input = None;
                if state.focus == FocusPanel::Editor && !state.editor_focusable() {
                    state.focus = FocusPanel::Menu;
                }
            }
            state.mark_dirty();
            vec![]
        }
        AppEvent::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            if state.bridge.pending().is_some() || state.level == MenuLevel::Loading {
                state.mark_dirty();
            }
            vec![]
        }
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    if state.input.is_some() {
        handle_field_input(state, key);
        return vec![];
    }

    if state.menu.is_modal() {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => state.menu.dismiss_message(),
            KeyCode::Char('q') => return vec![Action::Quit],
            _ => {}
        }
        return vec![];
    }

    match key.code {
        KeyCode::Char('q') => return vec![Action::Quit],
        KeyCode::Tab | KeyCode::BackTab => {
            state.toggle_focus();
            return vec![];
        }
        _ => {}
    }

    match state.focus {
        FocusPanel::Menu => handle_menu_key(state, key),
        FocusPanel::Editor => {
            handle_editor_key(state, key);
            vec![]
        }
    }
}

fn handle_menu_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    if !state.menu.is_shown() || state.menu.is_locked() {
        return vec![];
    }
    match key.code {
        KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => {
            state.menu.move_selection(-1);
            state.describe_selection();
        }
        KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => {
            state.menu.move_selection(1);
            state.describe_selection();
        }
        KeyCode::Home => {
            state.menu.move_to_index(0);
            state.describe_selection();
        }
        KeyCode::Enter => return accept_selection(state),
        KeyCode::Esc | KeyCode::Backspace => {
            if let MenuLevel::Items { .. } = state.level {
                state.show_data_types();
            }
        }
        _ => {}
    }
    vec![]
}

fn accept_selection(state: &mut AppState) -> Vec<Action> {
    let Some(index) = state.menu.accept_selection() else {
        return vec![];
    };
    let Some(selected) = state.menu.current_selection().map(str::to_string) else {
        return vec![];
    };
    tracing::debug!(index, %selected, "menu accept");

    match state.level.clone() {
        MenuLevel::DataTypes => {
            state.show_items(&selected);
            vec![]
        }
        MenuLevel::Items { data_type } => {
            let item = state
                .gdb
                .as_ref()
                .and_then(|gdb| gdb.item(&data_type, &selected))
                .cloned()
                .unwrap_or(serde_json::Value::Null);
            vec![Action::LoadEditor { data_type, item }]
        }
        MenuLevel::Loading | MenuLevel::Failed => vec![],
    }
}

fn handle_editor_key(state: &mut AppState, key: KeyEvent) {
    let Some(editor) = state.bridge.editor_mut() else {
        state.focus = FocusPanel::Menu;
        return;
    };
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => editor.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => editor.move_cursor(1),
        KeyCode::Enter => {
            let field = editor.cursor();
            match editor.edit_text(field) {
                Some(text) => state.input = Some(FieldInput::new(field, text)),
                None => {
                    let name = editor.fields()[field].title.clone();
                    state
                        .menu
                        .display_message(&format!("{} cannot be edited here", name), false);
                }
            }
        }
        KeyCode::Esc => state.focus = FocusPanel::Menu,
        _ => {}
    }
}

fn handle_field_input(state: &mut AppState, key: KeyEvent) {
    let Some(input) = state.input.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.delete_word_back()
        }
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.delete_back(),
        KeyCode::Delete => input.delete_forward(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        KeyCode::Esc => state.input = None,
        KeyCode::Enter => {
            if let Some(input) = state.input.take() {
                commit_field(state, input);
            }
        }
        _ => {}
    }
}

fn commit_field(state: &mut AppState, input: FieldInput) {
    let Some(editor) = state.bridge.editor_mut() else {
        return;
    };
    match editor.set_field(input.field, &input.text) {
        Ok(()) => state.menu.display_message("", false),
        Err(e) => {
            tracing::debug!(error = %e, "field edit rejected");
            state.menu.display_message(&e.to_string(), false);
            // Keep the rejected text around so it can be fixed.
            state.input = Some(input);
        }
    }
}

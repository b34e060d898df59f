use crate::app::input::FieldInput;
use crate::app::menu::MenuController;
use crate::bridge::editor::EditorOptions;
use crate::bridge::source::DataSource;
use crate::bridge::{EditorBridge, SlotState};
use crate::config::AppConfig;
use crate::gdb::GlobalDataBindings;
use crate::store::{StateStore, Subscription};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::event::AppEvent;

pub const DATA_TYPES_HEADING: &str = "Data Types";

/// Which menu the navigation pane is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuLevel {
    /// Waiting for the game database.
    Loading,
    /// The game database could not be loaded.
    Failed,
    DataTypes,
    Items { data_type: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPanel {
    Menu,
    Editor,
}

pub struct AppState {
    pub store: StateStore,
    pub menu: MenuController,
    pub bridge: EditorBridge,
    pub gdb: Option<GlobalDataBindings>,
    pub level: MenuLevel,
    pub focus: FocusPanel,
    pub input: Option<FieldInput>,
    pub should_quit: bool,
    pub tick_count: u64,
    dirty: Rc<Cell<bool>>,
    _redraw_on_change: Subscription,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        source: Arc<dyn DataSource>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let store = StateStore::new();
        store.initialize(None);

        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        let redraw = store.subscribe(move |_| flag.set(true));

        let options = EditorOptions::from(&config.editor);
        Self {
            menu: MenuController::new(store.clone()),
            store,
            bridge: EditorBridge::new(source, event_tx, options),
            gdb: None,
            level: MenuLevel::Loading,
            focus: FocusPanel::Menu,
            input: None,
            should_quit: false,
            tick_count: 0,
            dirty,
            _redraw_on_change: redraw,
        }
    }

    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    /// Whether a redraw is due; clears the flag.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    /// Show the top-level menu listing every data type in the database.
    pub fn show_data_types(&mut self) {
        let types = self
            .gdb
            .as_ref()
            .map(GlobalDataBindings::data_types)
            .unwrap_or_default();
        self.menu.set_menu(DATA_TYPES_HEADING, types, true, false);
        self.level = MenuLevel::DataTypes;
        self.menu.display_message("Select a data type", false);
    }

    /// Show the entries stored under `data_type`.
    pub fn show_items(&mut self, data_type: &str) {
        let ids = self
            .gdb
            .as_ref()
            .map(|gdb| gdb.item_ids(data_type))
            .unwrap_or_default();
        let empty = ids.is_empty();
        self.menu.set_menu(data_type, ids, true, false);
        self.level = MenuLevel::Items {
            data_type: data_type.to_string(),
        };
        if empty {
            self.menu
                .display_message(&format!("No entries under {}", data_type), false);
        } else {
            self.describe_selection();
        }
    }

    /// Put the highlighted entry's description in the banner.
    pub fn describe_selection(&mut self) {
        let MenuLevel::Items { data_type } = &self.level else {
            return;
        };
        let description = match (self.gdb.as_ref(), self.menu.current_selection()) {
            (Some(gdb), Some(id)) => gdb.description(data_type, id).unwrap_or("").to_string(),
            _ => String::new(),
        };
        self.menu.display_message(&description, false);
    }

    pub fn editor_focusable(&self) -> bool {
        self.bridge
            .editor()
            .map(|ed| !ed.fields().is_empty())
            .unwrap_or(false)
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPanel::Menu if self.editor_focusable() => FocusPanel::Editor,
            _ => FocusPanel::Menu,
        };
        self.mark_dirty();
    }

    pub fn status_line(&self) -> String {
        let gdb = match &self.gdb {
            Some(gdb) => format!("{} data types", gdb.data_types().len()),
            None => "no database".to_string(),
        };
        let editor = match (self.bridge.state(), self.bridge.pending(), self.bridge.editor()) {
            (SlotState::Loading, Some((id, data_type)), _) => {
                format!("loading {} (#{})", data_type, id)
            }
            (SlotState::Mounted, _, Some(ed)) if ed.is_dirty() => {
                format!("editing {} (modified)", ed.data_type())
            }
            (SlotState::Mounted, _, Some(ed)) => format!("editing {}", ed.data_type()),
            _ => "no editor".to_string(),
        };
        format!("{} | {}", gdb, editor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::error::LoadError;
    use async_trait::async_trait;

    struct NoSource;

    #[async_trait]
    impl DataSource for NoSource {
        async fn fetch_schema(&self, data_type: &str) -> Result<String, LoadError> {
            Err(LoadError::Construct(format!("no schema for {data_type}")))
        }

        async fn fetch_gdb(&self) -> Result<String, LoadError> {
            Err(LoadError::Construct("no gdb".into()))
        }
    }

    fn state() -> AppState {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut state = AppState::new(AppConfig::default(), Arc::new(NoSource), tx);
        state.gdb = Some(
            GlobalDataBindings::from_json(
                r#"{"forms":{"a":{"description":"first"},"b":{}},"moves":{}}"#,
            )
            .unwrap(),
        );
        state
    }

    #[test]
    fn store_changes_mark_dirty() {
        let state = state();
        assert!(state.take_dirty());
        assert!(!state.take_dirty());
        state.store.update(crate::store::UiPatch::new().message("x"));
        assert!(state.take_dirty());
    }

    #[test]
    fn data_type_menu() {
        let mut state = state();
        state.show_data_types();
        let ui = state.store.snapshot();
        assert!(ui.show_menu);
        assert_eq!(ui.menu_heading, DATA_TYPES_HEADING);
        assert_eq!(ui.menu_items, vec!["forms", "moves"]);
        assert_eq!(ui.message, "Select a data type");
        assert_eq!(state.level, MenuLevel::DataTypes);
    }

    #[test]
    fn item_menu_describes_selection() {
        let mut state = state();
        state.show_items("forms");
        let ui = state.store.snapshot();
        assert_eq!(ui.menu_heading, "forms");
        assert_eq!(ui.menu_items, vec!["a", "b"]);
        assert_eq!(ui.message, "first");

        state.menu.move_selection(1);
        state.describe_selection();
        assert_eq!(state.store.snapshot().message, "");
    }

    #[test]
    fn empty_item_menu_says_so() {
        let mut state = state();
        state.show_items("moves");
        assert_eq!(state.store.snapshot().message, "No entries under moves");
    }

    #[test]
    fn focus_stays_on_menu_without_editor() {
        let mut state = state();
        state.toggle_focus();
        assert_eq!(state.focus, FocusPanel::Menu);
        assert_eq!(state.status_line(), "2 data types | no editor");
    }
}

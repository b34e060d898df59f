//! Keyboard-driven menu selection that pushes its state into the store.
//!
//! The views never change the selection themselves; everything they show
//! about the menu arrives through [`UiPatch`]es sent from here.

use crate::store::{StateStore, UiPatch};

pub struct MenuController {
    store: StateStore,
    items: Vec<String>,
    selection: usize,
    lock: bool,
    show: bool,
    modal: bool,
}

impl MenuController {
    pub fn new(store: StateStore) -> Self {
        Self {
            store,
            items: Vec::new(),
            selection: 0,
            lock: false,
            show: false,
            modal: false,
        }
    }

    /// Replace the menu. Selection goes back to the first entry.
    pub fn set_menu(&mut self, heading: &str, items: Vec<String>, show: bool, lock: bool) {
        self.items = items;
        self.selection = 0;
        self.store.update(
            UiPatch::new()
                .menu_heading(heading)
                .menu_items(self.items.clone())
                .selection_index(self.selection),
        );
        self.set_show(show);
        self.lock = lock;
    }

    pub fn set_show(&mut self, show: bool) {
        self.show = show;
        self.store.update(UiPatch::new().show_menu(show));
    }

    pub fn is_shown(&self) -> bool {
        self.show
    }

    pub fn is_locked(&self) -> bool {
        self.lock
    }

    pub fn current_selection(&self) -> Option<&str> {
        self.items.get(self.selection).map(String::as_str)
    }

    /// Jump to `index`, wrapped into range.
    pub fn move_to_index(&mut self, index: usize) {
        if self.lock || self.items.is_empty() {
            return;
        }
        self.selection = index % self.items.len();
        self.store
            .update(UiPatch::new().selection_index(self.selection));
    }

    /// Step by `delta`, wrapping past either end.
    pub fn move_selection(&mut self, delta: isize) {
        if self.lock || self.items.is_empty() {
            return;
        }
        let len = self.items.len() as isize;
        let next = (self.selection as isize + delta).rem_euclid(len);
        self.move_to_index(next as usize);
    }

    /// Index of the accepted entry, or `None` when empty or locked.
    pub fn accept_selection(&self) -> Option<usize> {
        if self.items.is_empty() || self.lock {
            return None;
        }
        Some(self.selection)
    }

    /// Show `msg` in the banner. A modal message locks the menu until
    /// [`dismiss_message`](Self::dismiss_message).
    pub fn display_message(&mut self, msg: &str, modal: bool) {
        if modal {
            self.lock = true;
        }
        self.modal = modal;
        self.store
            .update(UiPatch::new().message(msg).message_modal(modal));
    }

    pub fn is_modal(&self) -> bool {
        self.modal
    }

    pub fn dismiss_message(&mut self) {
        if self.modal {
            self.lock = false;
        }
        self.modal = false;
        self.store
            .update(UiPatch::new().message("").message_modal(false));
    }
}

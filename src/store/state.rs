//! The UI state record and its typed partial patch.

/// Display flags and content driving the navigation menu and message banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub show_menu: bool,
    pub menu_heading: String,
    pub menu_items: Vec<String>,
    /// Not checked against `menu_items`; views treat an out-of-range
    /// index as "nothing selected".
    pub selection_index: usize,
    pub message: String,
    pub message_modal: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_menu: false,
            menu_heading: String::new(),
            menu_items: Vec::new(),
            selection_index: 0,
            message: String::new(),
            message_modal: false,
        }
    }
}

impl UiState {
    /// Shallow merge: every field present in `patch` overwrites the stored
    /// value, `menu_items` included (replaced, never appended).
    pub fn apply(&mut self, patch: UiPatch) {
        let UiPatch {
            show_menu,
            menu_heading,
            menu_items,
            selection_index,
            message,
            message_modal,
        } = patch;

        if let Some(v) = show_menu {
            self.show_menu = v;
        }
        if let Some(v) = menu_heading {
            self.menu_heading = v;
        }
        if let Some(v) = menu_items {
            self.menu_items = v;
        }
        if let Some(v) = selection_index {
            self.selection_index = v;
        }
        if let Some(v) = message {
            self.message = v;
        }
        if let Some(v) = message_modal {
            self.message_modal = v;
        }
    }
}

/// A partial [`UiState`]. `None` fields are left untouched by a merge.
///
/// Built with the chained setters:
///
/// ```ignore
/// let patch = UiPatch::new().menu_heading("File").selection_index(1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiPatch {
    pub show_menu: Option<bool>,
    pub menu_heading: Option<String>,
    pub menu_items: Option<Vec<String>>,
    pub selection_index: Option<usize>,
    pub message: Option<String>,
    pub message_modal: Option<bool>,
}

impl UiPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_menu(mut self, show: bool) -> Self {
        self.show_menu = Some(show);
        self
    }

    pub fn menu_heading(mut self, heading: impl Into<String>) -> Self {
        self.menu_heading = Some(heading.into());
        self
    }

    pub fn menu_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.menu_items = Some(items.into_iter().map(Into::into).collect());
        self
    }

    pub fn selection_index(mut self, index: usize) -> Self {
        self.selection_index = Some(index);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn message_modal(mut self, modal: bool) -> Self {
        self.message_modal = Some(modal);
        self
    }
}

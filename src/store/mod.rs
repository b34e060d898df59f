//! Shared UI state container with synchronous change notification.
//!
//! [`StateStore`] is a cheap-to-clone handle over a single [`UiState`].
//! Updates are shallow merges of a [`UiPatch`]; after every merge the
//! registered subscribers run, in registration order, before `update`
//! returns. The store lives on the event-loop task only, so it uses
//! `Rc<RefCell<..>>` rather than a lock.

mod state;

pub use state::{UiPatch, UiState};

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback = Rc<dyn Fn(&UiState)>;
type WeakCallback = Weak<dyn Fn(&UiState)>;

struct StoreInner {
    state: UiState,
    version: u64,
    subscribers: Vec<WeakCallback>,
}

#[derive(Clone)]
pub struct StateStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subscriber_count = self.subscriber_count();
        let inner = self.inner.borrow();
        f.debug_struct("StateStore")
            .field("state", &inner.state)
            .field("version", &inner.version)
            .field("subscriber_count", &subscriber_count)
            .finish()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                state: UiState::default(),
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Reset to defaults, then merge `initial` over them. Calling this again
    /// just resets again; subscribers are kept and notified.
    pub fn initialize(&self, initial: Option<UiPatch>) {
        {
            let mut inner = self.inner.borrow_mut();
            let mut state = UiState::default();
            if let Some(patch) = initial {
                state.apply(patch);
            }
            inner.state = state;
            inner.version += 1;
        }
        self.notify();
    }

    /// Shallow-merge `patch` into the current state and notify subscribers.
    pub fn update(&self, patch: UiPatch) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.state.apply(patch);
            inner.version += 1;
        }
        tracing::trace!(version = self.version(), "ui state updated");
        self.notify();
    }

    pub fn snapshot(&self) -> UiState {
        self.inner.borrow().state.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&UiState) -> R) -> R {
        f(&self.inner.borrow().state)
    }

    /// Number of merges applied so far, `initialize` included.
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Register `callback` to run after every update. The callback stays
    /// registered for as long as the returned [`Subscription`] is alive.
    #[must_use = "dropping the Subscription unregisters the callback"]
    pub fn subscribe(&self, callback: impl Fn(&UiState) + 'static) -> Subscription {
        let strong: Callback = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription { _guard: strong }
    }

    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.inner.borrow_mut();
        inner.subscribers.retain(|w| w.strong_count() > 0);
        inner.subscribers.len()
    }

    fn notify(&self) {
        // Collect first so callbacks may read the store (or even update it)
        // without hitting an outstanding borrow.
        let callbacks: Vec<Callback> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner.subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        let state = self.snapshot();
        for cb in &callbacks {
            cb(&state);
        }
    }
}

/// Keeps a store callback registered. Drop it to unsubscribe.
pub struct Subscription {
    _guard: Callback,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn initialize_then_update_keeps_untouched_fields() {
        let store = StateStore::new();
        store.initialize(Some(
            UiPatch::new()
                .show_menu(true)
                .menu_heading("File")
                .menu_items(["Open", "Save"])
                .selection_index(1),
        ));
        store.update(UiPatch::new().selection_index(0));

        let state = store.snapshot();
        assert!(state.show_menu);
        assert_eq!(state.menu_heading, "File");
        assert_eq!(state.selection_index, 0);
        assert_eq!(state.menu_items, vec!["Open".to_string(), "Save".to_string()]);
    }

    #[test]
    fn initialize_without_patch_gives_defaults() {
        let store = StateStore::new();
        store.update(UiPatch::new().message("stale"));
        store.initialize(None);
        assert_eq!(store.snapshot(), UiState::default());
    }

    #[test]
    fn reinitialize_resets_previous_updates() {
        let store = StateStore::new();
        store.initialize(Some(UiPatch::new().menu_heading("A")));
        store.update(UiPatch::new().message("hi").show_menu(true));
        store.initialize(Some(UiPatch::new().menu_heading("B")));

        let state = store.snapshot();
        assert_eq!(state.menu_heading, "B");
        assert!(state.message.is_empty());
        assert!(!state.show_menu);
    }

    #[test]
    fn last_write_wins_per_field() {
        let store = StateStore::new();
        let patches = vec![
            UiPatch::new().message("one").selection_index(4),
            UiPatch::new().menu_heading("Heading"),
            UiPatch::new().message("two"),
            UiPatch::new().menu_items(["x"]).message_modal(true),
            UiPatch::new().selection_index(0),
        ];
        for p in patches {
            store.update(p);
        }
        let state = store.snapshot();
        assert_eq!(state.message, "two");
        assert_eq!(state.selection_index, 0);
        assert_eq!(state.menu_heading, "Heading");
        assert_eq!(state.menu_items, vec!["x".to_string()]);
        assert!(state.message_modal);
        assert!(!state.show_menu);
    }

    #[test]
    fn subscribers_run_synchronously_with_new_state() {
        let store = StateStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_cb = Rc::clone(&seen);
        let _sub = store.subscribe(move |s| seen_cb.borrow_mut().push(s.message.clone()));

        store.update(UiPatch::new().message("a"));
        assert_eq!(*seen.borrow(), vec!["a".to_string()]);
        store.update(UiPatch::new().message("b"));
        assert_eq!(*seen.borrow(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn subscribers_notified_in_registration_order() {
        let store = StateStore::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let o1 = Rc::clone(&order);
        let o2 = Rc::clone(&order);
        let _a = store.subscribe(move |_| o1.borrow_mut().push(1));
        let _b = store.subscribe(move |_| o2.borrow_mut().push(2));

        store.update(UiPatch::new().show_menu(true));
        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let store = StateStore::new();
        let count = Rc::new(Cell::new(0u32));
        let c = Rc::clone(&count);
        let sub = store.subscribe(move |_| c.set(c.get() + 1));

        store.update(UiPatch::new().message("x"));
        assert_eq!(count.get(), 1);

        drop(sub);
        store.update(UiPatch::new().message("y"));
        assert_eq!(count.get(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn callback_may_read_store() {
        let store = StateStore::new();
        let reader = store.clone();
        let heading = Rc::new(RefCell::new(String::new()));
        let h = Rc::clone(&heading);
        let _sub = store.subscribe(move |_| {
            *h.borrow_mut() = reader.with(|s| s.menu_heading.clone());
        });

        store.update(UiPatch::new().menu_heading("Items"));
        assert_eq!(*heading.borrow(), "Items");
    }

    #[test]
    fn clones_share_state() {
        let store = StateStore::new();
        let other = store.clone();
        other.update(UiPatch::new().message("shared"));
        assert_eq!(store.snapshot().message, "shared");
        assert_eq!(store.version(), 1);
    }
}

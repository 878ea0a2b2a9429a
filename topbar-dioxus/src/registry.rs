//! The top bar registry.
//!
//! `Topbar` owns every registered item and the popup expansion state.
//! Callers only hold an [`ItemHandle`] for unregistering.
//!
//! The state lives behind a mutex so a `Topbar` can be cloned into UI
//! context and shared freely. The lock is never held while a dismiss handler
//! or change listener runs. Mutations attempted from inside one of those
//! callbacks fail with [`TopbarError::Reentrant`], except [`Topbar::reset`],
//! which is always allowed. Only the thread running the callback is
//! affected; other threads keep using the registry normally.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};
use std::thread::{self, ThreadId};

use parking_lot::Mutex;

use crate::error::TopbarError;
use crate::item::{DismissReply, Item, ItemSpec};
use crate::popup::{DismissOutcome, PopupController, PopupState};
use crate::store::{ItemKey, ItemStore};

/// Listener called synchronously after every registry mutation.
pub type ChangeListener = Arc<dyn Fn(&TopbarChange) + Send + Sync>;

/// What a mutation changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopbarChange {
    Registered(String),
    Unregistered(String),
    /// The expanded popup changed; `None` means every popup is closed.
    Expanded(Option<String>),
    MenuToggled(bool),
}

/// Identifies a subscription made with [`Topbar::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Inner<V> {
    store: ItemStore<V>,
    popup: PopupController,
    listeners: Vec<(ListenerId, ChangeListener)>,
    next_listener: u64,
    /// Dispatch depth per thread currently running a handler or listener.
    dispatching: HashMap<ThreadId, usize>,
}

impl<V> Default for Inner<V> {
    fn default() -> Self {
        Self {
            store: ItemStore::default(),
            popup: PopupController::default(),
            listeners: Vec::new(),
            next_listener: 0,
            dispatching: HashMap::new(),
        }
    }
}

impl<V> Inner<V> {
    fn ensure_idle(&self, operation: &'static str) -> Result<(), TopbarError> {
        if self.dispatching.contains_key(&thread::current().id()) {
            log::warn!("Rejected top bar {operation} from inside a handler");
            return Err(TopbarError::Reentrant { operation });
        }
        Ok(())
    }

    fn expanded_name(&self) -> Option<String> {
        self.popup
            .expanded()
            .and_then(|key| self.store.get(key))
            .map(|item| item.name.clone())
    }
}

/// Marks the registry as dispatching for as long as it is alive.
struct DispatchGuard<'a, V> {
    inner: &'a Mutex<Inner<V>>,
}

impl<'a, V> DispatchGuard<'a, V> {
    fn enter(inner: &'a Mutex<Inner<V>>) -> Self {
        *inner
            .lock()
            .dispatching
            .entry(thread::current().id())
            .or_default() += 1;
        Self { inner }
    }
}

impl<V> Drop for DispatchGuard<'_, V> {
    fn drop(&mut self) {
        let mut inner = self.inner.lock();
        let id = thread::current().id();
        if let Some(depth) = inner.dispatching.get_mut(&id) {
            *depth -= 1;
            if *depth == 0 {
                inner.dispatching.remove(&id);
            }
        }
    }
}

fn notify<V>(inner: &Mutex<Inner<V>>, changes: &[TopbarChange]) {
    if changes.is_empty() {
        return;
    }
    let listeners: Vec<ChangeListener> = inner
        .lock()
        .listeners
        .iter()
        .map(|(_, listener)| Arc::clone(listener))
        .collect();

    let _dispatch = DispatchGuard::enter(inner);
    for change in changes {
        for listener in &listeners {
            listener(change);
        }
    }
}

/// A reactive collection of top bar items, each optionally owning a popup.
///
/// Cloning a `Topbar` yields another handle to the same registry.
pub struct Topbar<V> {
    inner: Arc<Mutex<Inner<V>>>,
}

impl<V> Clone for Topbar<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Default for Topbar<V> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }
}

impl<V> PartialEq for Topbar<V> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<V> fmt::Debug for Topbar<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Topbar")
            .field("items", &inner.store.len())
            .field("expanded", &inner.expanded_name())
            .field("menu_expanded", &inner.popup.menu_expanded())
            .finish_non_exhaustive()
    }
}

impl<V: Clone> Topbar<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new item to the top bar, such as a button or a menu.
    ///
    /// Expands the item's popup right away if the spec asks for `start_open`.
    pub fn register(&self, spec: ItemSpec<V>) -> Result<ItemHandle<V>, TopbarError> {
        spec.validate()?;

        let (handle, changes) = {
            let mut inner = self.inner.lock();
            inner.ensure_idle("register")?;
            if inner.store.contains(&spec.name) {
                log::warn!("Duplicate top bar item name: {}", spec.name);
                return Err(TopbarError::DuplicateName(spec.name));
            }

            let name = spec.name.clone();
            let start_open = spec.start_open;
            log::debug!(
                "Registering top bar item {name} (priority {})",
                spec.priority
            );
            let key = inner.store.insert(spec.into_item());

            let mut changes = vec![TopbarChange::Registered(name.clone())];
            if start_open {
                changes.extend(select_key(&mut inner, key, &name));
            }

            let handle = ItemHandle {
                inner: Arc::downgrade(&self.inner),
                key,
                name,
            };
            (handle, changes)
        };

        notify(&self.inner, &changes);
        Ok(handle)
    }

    /// Snapshot of all items in display order.
    pub fn items(&self) -> Vec<Item<V>> {
        let inner = self.inner.lock();
        inner.store.ordered().into_iter().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<Item<V>> {
        self.inner.lock().store.get_by_name(name).cloned()
    }

    /// The item whose popup is currently visible.
    pub fn current_popup(&self) -> Option<Item<V>> {
        let inner = self.inner.lock();
        inner
            .popup
            .expanded()
            .and_then(|key| inner.store.get(key))
            .cloned()
    }

    pub fn popup_state(&self) -> PopupState {
        self.inner
            .lock()
            .expanded_name()
            .map_or(PopupState::Closed, PopupState::Expanded)
    }

    /// Expand the popup of the item called `name`.
    ///
    /// Returns `false` without changing anything if there is no such item or
    /// it has no popup. Switching away from another expanded item does not
    /// consult that item's dismiss handler.
    pub fn select(&self, name: &str) -> Result<bool, TopbarError> {
        let changes = {
            let mut inner = self.inner.lock();
            inner.ensure_idle("select")?;
            let Some(key) = inner.store.key_of(name) else {
                return Ok(false);
            };
            if !inner.store.get(key).is_some_and(Item::has_popup) {
                return Ok(false);
            }
            select_key(&mut inner, key, name)
        };

        notify(&self.inner, &changes);
        Ok(true)
    }

    /// Close the visible popup, honoring the item's dismiss handler.
    pub fn dismiss(&self) -> Result<DismissOutcome, TopbarError> {
        let (key, name, handler) = {
            let inner = self.inner.lock();
            inner.ensure_idle("dismiss")?;
            let Some(key) = inner.popup.expanded() else {
                return Ok(DismissOutcome::NotExpanded);
            };
            let Some(item) = inner.store.get(key) else {
                return Ok(DismissOutcome::NotExpanded);
            };
            (key, item.name.clone(), item.on_dismiss.clone())
        };

        let reply = match handler {
            Some(handler) => {
                let _dispatch = DispatchGuard::enter(&self.inner);
                handler()
            }
            None => DismissReply::Proceed,
        };

        let (outcome, changes) = {
            let mut inner = self.inner.lock();
            match reply {
                DismissReply::Block => {
                    // The handler may have called `reset` before blocking.
                    if inner.popup.expanded() != Some(key) {
                        log::debug!("Top bar popup {name} closed while its handler ran");
                        return Ok(DismissOutcome::Closed);
                    }
                    log::debug!("Dismissal of top bar popup {name} blocked");
                    return Ok(DismissOutcome::Blocked);
                }
                DismissReply::Unrecognized(value) => {
                    return Err(TopbarError::InvalidDismissResult { name, value });
                }
                DismissReply::Remove => {
                    let mut changes = Vec::new();
                    if inner.store.remove(key).is_some() {
                        log::debug!("Top bar item {name} removed itself on dismissal");
                        changes.push(TopbarChange::Unregistered(name));
                    }
                    if inner.popup.close_if(key) {
                        changes.push(TopbarChange::Expanded(None));
                    }
                    (DismissOutcome::Removed, changes)
                }
                DismissReply::Proceed => {
                    let mut changes = Vec::new();
                    if inner.popup.close_if(key) {
                        log::debug!("Dismissed top bar popup {name}");
                        changes.push(TopbarChange::Expanded(None));
                    }
                    (DismissOutcome::Closed, changes)
                }
            }
        };

        notify(&self.inner, &changes);
        Ok(outcome)
    }

    /// Close every popup and the menu, bypassing dismiss handlers.
    pub fn reset(&self) {
        let changes = {
            let mut inner = self.inner.lock();
            let had_popup = inner.popup.expanded().is_some();
            let had_menu = inner.popup.menu_expanded();
            inner.popup.reset();

            let mut changes = Vec::new();
            if had_menu {
                changes.push(TopbarChange::MenuToggled(false));
            }
            if had_popup {
                changes.push(TopbarChange::Expanded(None));
            }
            changes
        };

        notify(&self.inner, &changes);
    }

    /// Flip the hamburger menu. Returns the new state.
    pub fn toggle_menu(&self) -> Result<bool, TopbarError> {
        let expanded = {
            let mut inner = self.inner.lock();
            inner.ensure_idle("toggle the menu")?;
            inner.popup.toggle_menu()
        };

        notify(&self.inner, &[TopbarChange::MenuToggled(expanded)]);
        Ok(expanded)
    }
}

impl<V> Topbar<V> {
    pub fn menu_expanded(&self) -> bool {
        self.inner.lock().popup.menu_expanded()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.lock().store.contains(name)
    }

    /// Call `listener` after every mutation until [`Topbar::unsubscribe`].
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&TopbarChange) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        let id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(listener_id, _)| *listener_id != id);
        inner.listeners.len() != before
    }
}

fn select_key<V>(inner: &mut Inner<V>, key: ItemKey, name: &str) -> Vec<TopbarChange> {
    let was_expanded = inner.popup.is_expanded(key);
    let had_menu = inner.popup.menu_expanded();
    inner.popup.select(key);

    let mut changes = Vec::new();
    if had_menu {
        changes.push(TopbarChange::MenuToggled(false));
    }
    if !was_expanded {
        log::debug!("Expanded top bar popup {name}");
        changes.push(TopbarChange::Expanded(Some(name.to_string())));
    }
    changes
}

/// Registration returned by [`Topbar::register`].
pub struct ItemHandle<V> {
    inner: Weak<Mutex<Inner<V>>>,
    key: ItemKey,
    name: String,
}

impl<V> ItemHandle<V> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this exact registration is still in the top bar.
    pub fn is_registered(&self) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| inner.lock().store.get(self.key).is_some())
    }

    /// Remove the item, closing its popup if it was expanded.
    ///
    /// Does nothing if the item is already gone, even if another item with
    /// the same name has been registered since.
    pub fn unregister(&self) -> Result<(), TopbarError> {
        let Some(inner) = self.inner.upgrade() else {
            return Ok(());
        };

        let changes = {
            let mut guard = inner.lock();
            guard.ensure_idle("unregister")?;
            if guard.store.get(self.key).is_none() {
                return Ok(());
            }

            let mut changes = Vec::new();
            if guard.popup.close_if(self.key) {
                changes.push(TopbarChange::Expanded(None));
            }
            guard.store.remove(self.key);
            log::debug!("Unregistered top bar item {}", self.name);
            changes.push(TopbarChange::Unregistered(self.name.clone()));
            changes
        };

        notify(&inner, &changes);
        Ok(())
    }
}

impl<V> fmt::Debug for ItemHandle<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemHandle")
            .field("name", &self.name)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

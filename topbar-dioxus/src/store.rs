//! Name-keyed item storage with stable display ordering.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};

use crate::item::Item;

new_key_type! {
    /// Identity of one registration. A name that is re-registered gets a new key.
    pub struct ItemKey;
}

struct Entry<V> {
    item: Item<V>,
    seq: u64,
}

/// Items keyed by name, remembering the order in which they were registered.
pub(crate) struct ItemStore<V> {
    entries: SlotMap<ItemKey, Entry<V>>,
    names: HashMap<String, ItemKey>,
    next_seq: u64,
}

impl<V> Default for ItemStore<V> {
    fn default() -> Self {
        Self {
            entries: SlotMap::with_key(),
            names: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<V> ItemStore<V> {
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn key_of(&self, name: &str) -> Option<ItemKey> {
        self.names.get(name).copied()
    }

    pub fn get(&self, key: ItemKey) -> Option<&Item<V>> {
        self.entries.get(key).map(|entry| &entry.item)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Item<V>> {
        self.key_of(name).and_then(|key| self.get(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Insert an item whose name is known to be free.
    pub fn insert(&mut self, item: Item<V>) -> ItemKey {
        debug_assert!(!self.contains(&item.name));
        let seq = self.next_seq;
        self.next_seq += 1;
        let name = item.name.clone();
        let key = self.entries.insert(Entry { item, seq });
        self.names.insert(name, key);
        key
    }

    /// Remove the registration identified by `key`. Stale keys are ignored.
    pub fn remove(&mut self, key: ItemKey) -> Option<Item<V>> {
        let entry = self.entries.remove(key)?;
        self.names.remove(&entry.item.name);
        Some(entry.item)
    }

    /// Items sorted by descending priority, then by registration order.
    pub fn ordered(&self) -> Vec<&Item<V>> {
        let mut entries: Vec<&Entry<V>> = self.entries.values().collect();
        entries.sort_by_key(|entry| (std::cmp::Reverse(entry.item.priority), entry.seq));
        entries.into_iter().map(|entry| &entry.item).collect()
    }
}

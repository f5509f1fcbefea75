//! Keyed row storage with a monotonically increasing id sequence.

use std::collections::BTreeMap;

#[derive(Debug)]
pub(super) struct Table<V> {
    rows: BTreeMap<i64, V>,
    last_id: i64,
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<V: Clone> Table<V> {
    /// Allocate the next id, store the row `build` produces, and return it.
    pub(super) fn insert_with(&mut self, build: impl FnOnce(i64) -> V) -> V {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }

    pub(super) fn get(&self, id: i64) -> Option<&V> {
        self.rows.get(&id)
    }

    /// Overwrite an existing row. Returns `false` when `id` is absent.
    pub(super) fn replace(&mut self, id: i64, row: V) -> bool {
        match self.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    pub(super) fn remove(&mut self, id: i64) -> Option<V> {
        self.rows.remove(&id)
    }

    pub(super) fn retain(&mut self, mut keep: impl FnMut(&V) -> bool) {
        self.rows.retain(|_, row| keep(row));
    }

    /// Rows in ascending id order.
    pub(super) fn values(&self) -> impl Iterator<Item = &V> {
        self.rows.values()
    }

    /// Clones of the rows accepted by `keep`, in ascending id order.
    pub(super) fn select(&self, keep: impl Fn(&V) -> bool) -> Vec<V> {
        self.rows.values().filter(|row| keep(row)).cloned().collect()
    }
}

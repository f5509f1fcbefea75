//! In-process adapters backing every repository port with shared tables.
//!
//! Used when no database is configured and by the HTTP contract tests. One
//! [`InMemoryStore`] implements all driven ports so deletes can cascade the
//! way the schema's `ON DELETE CASCADE` clauses do. Ids come from per-table
//! sequences starting at 1 and are never reused.

mod accounts;
mod capsules;
mod discussions;
mod stories;
mod table;


use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{
    AccountId, AuthToken, CapsuleContent, CapsuleContentId, CapsuleId, DiscussionComment,
    DiscussionThread, Lookup, LookupId, LookupKind, Prediction, StoryChoice, StoryNode,
    StoryNodeId, ThreadId, TimeCapsule, UserProfile,
};

use self::table::Table;

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Debug, Clone)]
struct AccountRow {
    id: AccountId,
    username: String,
    password_hash: String,
}

#[derive(Debug, Default)]
struct Tables {
    lookups: HashMap<LookupKind, Table<Lookup>>,
    accounts: Table<AccountRow>,
    profiles: Table<UserProfile>,
    tokens: HashMap<AccountId, AuthToken>,
    capsules: Table<TimeCapsule>,
    contents: Table<CapsuleContent>,
    predictions: Table<Prediction>,
    nodes: Table<StoryNode>,
    choices: Table<StoryChoice>,
    threads: Table<DiscussionThread>,
    comments: Table<DiscussionComment>,
}

impl Tables {
    fn seed_lookups(&mut self, skip: &[LookupKind]) {
        for kind in LookupKind::ALL {
            let table = self.lookups.entry(kind).or_default();
            if skip.contains(&kind) {
                continue;
            }
            for name in kind.seed_names() {
                table.insert_with(|id| Lookup::new(LookupId::new(id), *name));
            }
        }
    }

    fn lookup_table(&self, kind: LookupKind) -> Option<&Table<Lookup>> {
        self.lookups.get(&kind)
    }

    fn delete_capsule(&mut self, id: CapsuleId) -> bool {
        if self.capsules.remove(id.get()).is_none() {
            return false;
        }
        let contents: Vec<_> = self
            .contents
            .values()
            .filter(|content| content.capsule == id)
            .map(|content| content.id)
            .collect();
        for content in contents {
            self.delete_content(content);
        }
        let threads: Vec<_> = self
            .threads
            .values()
            .filter(|thread| thread.capsule == id)
            .map(|thread| thread.id)
            .collect();
        for thread in threads {
            self.delete_thread(thread);
        }
        true
    }

    fn delete_content(&mut self, id: CapsuleContentId) -> bool {
        if self.contents.remove(id.get()).is_none() {
            return false;
        }
        self.predictions
            .retain(|prediction| prediction.capsule_content != id);
        let roots: Vec<_> = self
            .nodes
            .values()
            .filter(|node| node.capsule_content == id)
            .map(|node| node.id)
            .collect();
        for node in roots {
            self.delete_node(node);
        }
        true
    }

    /// Remove a node, every node below it, and every choice touching them.
    fn delete_node(&mut self, id: StoryNodeId) -> bool {
        if self.nodes.get(id.get()).is_none() {
            return false;
        }
        let mut doomed = BTreeSet::from([id]);
        let mut frontier = vec![id];
        while let Some(parent) = frontier.pop() {
            for node in self.nodes.values() {
                if node.parent_node == Some(parent) && doomed.insert(node.id) {
                    frontier.push(node.id);
                }
            }
        }
        self.nodes.retain(|node| !doomed.contains(&node.id));
        self.choices
            .retain(|choice| !doomed.contains(&choice.node) && !doomed.contains(&choice.next_node));
        true
    }

    fn delete_thread(&mut self, id: ThreadId) -> bool {
        if self.threads.remove(id.get()).is_none() {
            return false;
        }
        self.comments.retain(|comment| comment.thread != id);
        true
    }
}

/// Shared in-process tables implementing every repository port.
///
/// Clones share the same tables.
///
/// # Examples
/// ```
/// use timecapsule::outbound::memory::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// let other = store.clone();
/// # let _ = other;
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    /// Create a store with every lookup table seeded.
    #[must_use]
    pub fn new() -> Self {
        Self::seeded_except(&[])
    }

    /// Create a store with every lookup table seeded apart from `skip`.
    ///
    /// Skipped tables exist but hold no rows.
    #[must_use]
    pub fn seeded_except(skip: &[LookupKind]) -> Self {
        let mut tables = Tables::default();
        tables.seed_lookups(skip);
        Self {
            tables: Arc::new(Mutex::new(tables)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, &'static str> {
        self.tables.lock().map_err(|_| POISONED)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

//! In-memory user storage backing the HTTP handlers.
//!
//! Records keep insertion order so listings are stable. Ids come from a
//! monotonically increasing counter and are never reused, even after deletes.

use crate::model::User;
use std::sync::Arc;
use tokio::sync::RwLock;

pub type SharedStore = Arc<RwLock<UserStore>>;

#[derive(Debug)]
pub struct UserStore {
    users: Vec<User>,
    next_id: u64,
}

impl UserStore {
    /// A store with no users; the first created user gets id 1.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            users: Vec::new(),
            next_id: 1,
        }
    }

    /// The demo data set: Alice, Bob and Charlie with ids 1..=3.
    #[must_use]
    pub fn seeded() -> Self {
        let mut store = Self::empty();
        for name in ["Alice", "Bob", "Charlie"] {
            store.create(name.to_string());
        }
        store
    }

    #[must_use]
    pub fn shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.users.clone()
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<User> {
        self.users.iter().find(|user| user.id == id).cloned()
    }

    #[must_use]
    pub fn contains(&self, id: u64) -> bool {
        self.users.iter().any(|user| user.id == id)
    }

    pub fn create(&mut self, name: String) -> User {
        let user = User {
            id: self.next_id,
            name,
        };
        self.next_id += 1;
        self.users.push(user.clone());
        user
    }

    /// Replaces the name of an existing user, returning the updated record.
    pub fn rename(&mut self, id: u64, name: String) -> Option<User> {
        let user = self.users.iter_mut().find(|user| user.id == id)?;
        user.name = name;
        Some(user.clone())
    }

    /// Returns `false` when no user had the given id.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.users.len();
        self.users.retain(|user| user.id != id);
        self.users.len() != before
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::seeded()
    }
}

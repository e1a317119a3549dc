use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// A single user record.
///
/// The record carries no id of its own; identity is the key it is stored
/// under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    pub name: String,
    pub age: i64,
}

// Field names match regardless of ASCII case and the last duplicate wins.
// Missing or null fields keep their zero value, unknown fields are skipped.
impl<'de> Deserialize<'de> for User {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(UserVisitor)
    }
}

struct UserVisitor;

impl<'de> Visitor<'de> for UserVisitor {
    type Value = User;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("a user object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<User, A::Error> {
        let mut user = User::default();

        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("name") {
                if let Some(name) = map.next_value::<Option<String>>()? {
                    user.name = name;
                }
            } else if key.eq_ignore_ascii_case("age") {
                if let Some(age) = map.next_value::<Option<i64>>()? {
                    user.age = age;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(user)
    }
}

impl User {
    pub fn new(name: impl Into<String>, age: i64) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }
}

/// Internal HashMap type.
pub type InnerMap = HashMap<String, User>;

/// Shared user store.
///
/// Cloning is cheap: every clone points at the same map. The lock is owned
/// by the store and only ever taken for the length of one operation.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<InnerMap>>,
}

impl UserStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the startup record `"1" -> Yuri, 32`.
    pub fn seeded() -> Self {
        Self::from_iter([("1".to_string(), User::new("Yuri", 32))])
    }

    /// Insert or replace the record under `id`.
    ///
    /// Returns the previous record, if any.
    pub fn upsert(&self, id: impl Into<String>, user: User) -> Option<User> {
        self.write().insert(id.into(), user)
    }

    pub fn get(&self, id: &str) -> Option<User> {
        self.read().get(id).cloned()
    }

    /// Snapshot of every stored record, in no particular order.
    pub fn list(&self) -> Vec<User> {
        self.read().values().cloned().collect()
    }

    /// Remove `id`. Removing a missing id is not an error.
    pub fn delete(&self, id: &str) -> Option<User> {
        self.write().remove(id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Every critical section swaps whole records, so a guard left behind by
    // a panicking holder still protects a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, InnerMap> {
        self.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InnerMap> {
        self.users.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FromIterator<(String, User)> for UserStore {
    fn from_iter<I: IntoIterator<Item = (String, User)>>(iter: I) -> Self {
        Self {
            users: Arc::new(RwLock::new(iter.into_iter().collect())),
        }
    }
}

use serde::de::Error as _;
use tracing::debug;

use crate::errors::UserError;
use crate::state::users::{User, UserStore};

/// Decode the first JSON value of `body` as a user.
///
/// Anything after that value is ignored and a `null` value decodes to the
/// zero user. An empty body is malformed.
pub fn decode_user(body: &[u8]) -> Result<User, UserError> {
    let first = serde_json::Deserializer::from_slice(body)
        .into_iter::<Option<User>>()
        .next()
        .unwrap_or_else(|| Err(serde_json::Error::custom("empty request body")));

    first
        .map(Option::unwrap_or_default)
        .map_err(UserError::MalformedInput)
}

/// Decode `body` as a user and store it under `id`.
///
/// A body that does not decode leaves the store untouched.
pub fn upsert(store: &UserStore, id: String, body: &[u8]) -> Result<(), UserError> {
    let user = decode_user(body)?;

    let replaced = store.upsert(id.clone(), user).is_some();
    debug!(%id, replaced, "upsert user");
    Ok(())
}

/// Fetch a single user.
pub fn get(store: &UserStore, id: &str) -> Result<User, UserError> {
    debug!(%id, "get user");
    store
        .get(id)
        .ok_or_else(|| UserError::NotFound(id.to_string()))
}

/// All stored users, unordered.
pub fn list(store: &UserStore) -> Vec<User> {
    let users = store.list();
    debug!(count = users.len(), "list users");
    users
}

/// Delete a user; deleting an unknown id succeeds.
pub fn delete(store: &UserStore, id: &str) {
    let removed = store.delete(id).is_some();
    debug!(%id, removed, "delete user");
}

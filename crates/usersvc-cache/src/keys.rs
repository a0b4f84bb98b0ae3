//! Cache key builders for usersvc cache entries.
//!
//! Backends add their own configured prefix on top of these keys.

use uuid::Uuid;

/// Cache key for the session record bound to a token's session id.
pub fn session(session_id: Uuid) -> String {
    format!("session:{session_id}")
}

//! The server-side state bound to one issued token.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::RoleRef;

/// Session record stored in the credential store under a token's session id.
///
/// Records are immutable once written; rotation deletes and recreates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// The user this session belongs to.
    pub subject_id: Uuid,
    /// Roles resolved at issuance, in assignment order.
    pub roles: Vec<RoleRef>,
    /// Free-form attributes carried with the session.
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
    /// Session id of the other token issued in the same pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_session_id: Option<Uuid>,
}

impl SessionRecord {
    /// Creates a record with no extra attributes and no pairing.
    pub fn new(subject_id: Uuid, roles: Vec<RoleRef>) -> Self {
        Self {
            subject_id,
            roles,
            extra: BTreeMap::new(),
            paired_session_id: None,
        }
    }

    /// Returns a copy bound to the given sibling session.
    pub fn paired_with(&self, session_id: Uuid) -> Self {
        Self {
            paired_session_id: Some(session_id),
            ..self.clone()
        }
    }
}

//! User record type.

use serde::{Deserialize, Serialize};

/// A single directory entry plus its session-local annotations.
///
/// `id`, `display_name`, `avatar_url` and `reputation` come from the server.
/// `is_blocked` and `is_following` are never sent by the server and never
/// sent back to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Server-assigned unique id.
    pub id: u64,
    /// Display name as shown to users.
    pub display_name: String,
    /// Profile image URL.
    pub avatar_url: String,
    /// Reputation score.
    pub reputation: u64,
    /// Blocked for the rest of the session.
    #[serde(default)]
    pub is_blocked: bool,
    /// Followed in this session.
    #[serde(default)]
    pub is_following: bool,
}

impl UserRecord {
    /// Create an unannotated record.
    pub fn new(
        id: u64,
        display_name: impl Into<String>,
        avatar_url: impl Into<String>,
        reputation: u64,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            avatar_url: avatar_url.into(),
            reputation,
            is_blocked: false,
            is_following: false,
        }
    }
}

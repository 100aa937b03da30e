//! User reference type and denormalised display object.

use super::UserId;
use serde::{Deserialize, Serialize};

/// A user referenced, never owned, by boards, tasks and activities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
}

impl User {
    /// Creates a user reference.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }

    /// Returns the denormalised display object for API views.
    #[must_use]
    pub fn display(&self) -> UserDisplay {
        UserDisplay {
            username: self.username.clone(),
            email: self.email.clone(),
            avatar: None,
        }
    }
}

/// Denormalised user fields embedded in task and activity views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDisplay {
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Avatar URL; always absent for now.
    pub avatar: Option<String>,
}

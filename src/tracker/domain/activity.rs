//! Append-only activity audit records.

use super::{ActivityId, TrackerDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Audit action recorded with each activity.
///
/// The closed variants cover the mutations the tracker itself performs;
/// [`ActivityAction::Custom`] admits externally logged actions without a
/// schema change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivityAction {
    /// A known audit action.
    Known(KnownAction),
    /// An externally supplied action name.
    Custom(String),
}

/// The audit actions the tracker records itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownAction {
    /// An entity was created.
    Created,
    /// An entity was updated.
    Updated,
    /// An entity was deleted.
    Deleted,
}

impl ActivityAction {
    /// The `created` action.
    pub const CREATED: Self = Self::Known(KnownAction::Created);
    /// The `updated` action.
    pub const UPDATED: Self = Self::Known(KnownAction::Updated);
    /// The `deleted` action.
    pub const DELETED: Self = Self::Known(KnownAction::Deleted);

    /// Parses an action from its wire representation.
    ///
    /// Unknown names become [`ActivityAction::Custom`]; only an empty name
    /// is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyActivityAction`] when the value is
    /// empty or whitespace-only.
    pub fn parse(value: &str) -> Result<Self, TrackerDomainError> {
        let trimmed = value.trim();
        match trimmed {
            "" => Err(TrackerDomainError::EmptyActivityAction),
            "created" => Ok(Self::CREATED),
            "updated" => Ok(Self::UPDATED),
            "deleted" => Ok(Self::DELETED),
            other => Ok(Self::Custom(other.to_owned())),
        }
    }

    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(KnownAction::Created) => "created",
            Self::Known(KnownAction::Updated) => "updated",
            Self::Known(KnownAction::Deleted) => "deleted",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured details payload for task audit entries.
///
/// `from_status`/`to_status` are present exactly when the audited change
/// included a status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskChangeDetails {
    /// Task title at audit time.
    pub title: String,
    /// Previous status, for status transitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_status: Option<String>,
    /// New status, for status transitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_status: Option<String>,
}

impl TaskChangeDetails {
    /// Details carrying the title only.
    #[must_use]
    pub fn title_only(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            from_status: None,
            to_status: None,
        }
    }

    /// Details for a status transition.
    #[must_use]
    pub fn status_change(
        title: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            from_status: Some(from.into()),
            to_status: Some(to.into()),
        }
    }

    /// Serialises the details into the free-form payload stored with the
    /// activity.
    #[must_use]
    pub fn into_value(self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// An immutable audit record of an action on an entity.
///
/// Activities are append-only: they are never updated or deleted, and they
/// survive deletion of the entity they reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    id: ActivityId,
    action: ActivityAction,
    entity_type: String,
    entity_id: Uuid,
    user_id: Option<UserId>,
    details: Value,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedActivityData {
    /// Persisted activity identifier.
    pub id: ActivityId,
    /// Persisted action.
    pub action: ActivityAction,
    /// Persisted entity type.
    pub entity_type: String,
    /// Persisted entity identifier.
    pub entity_id: Uuid,
    /// Persisted acting user, if any.
    pub user_id: Option<UserId>,
    /// Persisted details payload.
    pub details: Value,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Activity {
    /// Entity type recorded for task audit entries.
    pub const TASK_ENTITY: &'static str = "task";
    /// Entity type recorded for board audit entries.
    pub const BOARD_ENTITY: &'static str = "board";

    /// Records a new activity.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyEntityType`] when the entity type
    /// is empty or whitespace-only.
    pub fn record(
        action: ActivityAction,
        entity_type: impl Into<String>,
        entity_id: Uuid,
        user_id: Option<UserId>,
        details: Value,
        clock: &dyn Clock,
    ) -> Result<Self, TrackerDomainError> {
        let entity_type = entity_type.into();
        if entity_type.trim().is_empty() {
            return Err(TrackerDomainError::EmptyEntityType);
        }
        Ok(Self {
            id: ActivityId::new(),
            action,
            entity_type,
            entity_id,
            user_id,
            details,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs an activity from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedActivityData) -> Self {
        Self {
            id: data.id,
            action: data.action,
            entity_type: data.entity_type,
            entity_id: data.entity_id,
            user_id: data.user_id,
            details: data.details,
            created_at: data.created_at,
        }
    }

    /// Returns the activity identifier.
    #[must_use]
    pub const fn id(&self) -> ActivityId {
        self.id
    }

    /// Returns the audited action.
    #[must_use]
    pub const fn action(&self) -> &ActivityAction {
        &self.action
    }

    /// Returns the entity type.
    #[must_use]
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Returns the audited entity identifier.
    #[must_use]
    pub const fn entity_id(&self) -> Uuid {
        self.entity_id
    }

    /// Returns the acting user, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Returns the structured details payload.
    #[must_use]
    pub const fn details(&self) -> &Value {
        &self.details
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

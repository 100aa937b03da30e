//! Activity log service: manual recording and filtered listing.

use super::ErrorKind;
use crate::tracker::{
    domain::{Activity, ActivityAction, ActivityId, TrackerDomainError, UserDisplay, UserId},
    ports::{
        ActivityFilter, ActivityRepository, ActivityRepositoryError, UserRepository,
        UserRepositoryError,
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Request payload for manually recording an activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordActivityRequest {
    /// Action name; unknown names are stored as custom actions.
    pub action: String,
    /// Audited entity type (e.g. `"task"`).
    pub entity_type: String,
    /// Audited entity identifier.
    pub entity_id: Uuid,
    /// Acting user; `None` falls back to the configured default actor.
    pub user_id: Option<UserId>,
    /// Free-form details payload; defaults to an empty object.
    pub details: Option<Value>,
}

/// Activity joined with the acting user's display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityView {
    /// Activity identifier.
    pub id: ActivityId,
    /// Action name.
    pub action: String,
    /// Audited entity type.
    pub entity_type: String,
    /// Audited entity identifier.
    pub entity_id: Uuid,
    /// Structured details payload.
    pub details: Value,
    /// Recording timestamp.
    pub created_at: DateTime<Utc>,
    /// Acting user display fields, if attributable.
    pub user: Option<UserDisplay>,
}

impl ActivityView {
    /// Builds a view from an activity and its resolved user.
    #[must_use]
    pub fn from_activity(activity: &Activity, user: Option<UserDisplay>) -> Self {
        Self {
            id: activity.id(),
            action: activity.action().as_str().to_owned(),
            entity_type: activity.entity_type().to_owned(),
            entity_id: activity.entity_id(),
            details: activity.details().clone(),
            created_at: activity.created_at(),
            user,
        }
    }
}

/// Service-level errors for activity operations.
#[derive(Debug, Error)]
pub enum ActivityServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Validation(#[from] TrackerDomainError),

    /// Activity persistence failed.
    #[error(transparent)]
    Activities(#[from] ActivityRepositoryError),

    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
}

impl ActivityServiceError {
    /// Classifies the error for boundary mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Activities(_) | Self::Users(_) => ErrorKind::Operation,
        }
    }
}

/// Result type for activity service operations.
pub type ActivityServiceResult<T> = Result<T, ActivityServiceError>;

/// Activity recording and lookup service.
#[derive(Clone)]
pub struct ActivityService {
    activities: Arc<dyn ActivityRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock + Send + Sync>,
    default_actor: Option<UserId>,
}

impl ActivityService {
    /// Creates an activity service.
    #[must_use]
    pub fn new(
        activities: Arc<dyn ActivityRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock + Send + Sync>,
        default_actor: Option<UserId>,
    ) -> Self {
        Self {
            activities,
            users,
            clock,
            default_actor,
        }
    }

    /// Records an externally supplied activity.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty action or entity type and an
    /// operation error when the append fails.
    pub async fn record(
        &self,
        request: RecordActivityRequest,
    ) -> ActivityServiceResult<ActivityView> {
        let action = ActivityAction::parse(&request.action)?;
        let user_id = request.user_id.or(self.default_actor);
        let details = request.details.unwrap_or_else(|| Value::Object(Default::default()));

        let activity = Activity::record(
            action,
            request.entity_type,
            request.entity_id,
            user_id,
            details,
            &*self.clock,
        )?;
        self.activities.append(&activity).await?;

        let user = match user_id {
            Some(id) => self.users.find_by_id(id).await?.map(|user| user.display()),
            None => None,
        };
        Ok(ActivityView::from_activity(&activity, user))
    }

    /// Lists activities matching the filter, newest-first, each joined
    /// with the acting user's display fields.
    ///
    /// # Errors
    ///
    /// Returns an operation error when the store fails.
    pub async fn list(&self, filter: &ActivityFilter) -> ActivityServiceResult<Vec<ActivityView>> {
        let activities = self.activities.list(filter).await?;

        let user_ids: Vec<UserId> = activities.iter().filter_map(Activity::user_id).collect();
        let users = self.users.find_by_ids(&user_ids).await?;
        let by_id: HashMap<UserId, UserDisplay> = users
            .into_iter()
            .map(|user| (user.id, user.display()))
            .collect();

        Ok(activities
            .iter()
            .map(|activity| {
                let user = activity.user_id().and_then(|id| by_id.get(&id).cloned());
                ActivityView::from_activity(activity, user)
            })
            .collect())
    }
}

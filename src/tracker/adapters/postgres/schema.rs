//! Diesel schema for tracker persistence.

diesel::table! {
    /// User accounts referenced by boards, tasks and activities.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Login name.
        #[max_length = 255]
        username -> Varchar,
        /// Contact email.
        #[max_length = 255]
        email -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Boards, each a named collection of tasks.
    boards (id) {
        /// Board identifier.
        id -> Uuid,
        /// Board name.
        #[max_length = 255]
        name -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Creating user.
        created_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning board.
        board_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Workflow status.
        #[max_length = 50]
        status -> Varchar,
        /// Priority level.
        #[max_length = 50]
        priority -> Varchar,
        /// Story point estimate.
        story_points -> Int4,
        /// Optional assignee.
        assignee_id -> Nullable<Uuid>,
        /// Creating user.
        created_by -> Uuid,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only activity audit log.
    activities (id) {
        /// Activity identifier.
        id -> Uuid,
        /// Audited action name.
        #[max_length = 100]
        action -> Varchar,
        /// Audited entity type.
        #[max_length = 100]
        entity_type -> Varchar,
        /// Audited entity identifier.
        entity_id -> Uuid,
        /// Acting user, if known.
        user_id -> Nullable<Uuid>,
        /// Structured details payload.
        details -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Sprint date windows.
    sprints (id) {
        /// Sprint identifier.
        id -> Uuid,
        /// Board the sprint belongs to.
        board_id -> Uuid,
        /// First day, inclusive.
        start_date -> Date,
        /// Last day, inclusive.
        end_date -> Date,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, boards, tasks, activities, sprints);

//! Diesel schema for board persistence.

diesel::table! {
    /// Board tasks, one row per card.
    tasks (id) {
        /// Task identifier assigned by the database.
        id -> Uuid,
        /// Display title.
        title -> Text,
        /// Optional free-text notes.
        notes -> Nullable<Text>,
        /// Optional collaborator name.
        #[max_length = 50]
        owner -> Nullable<Varchar>,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Priority name.
        #[max_length = 50]
        priority -> Varchar,
        /// Label strings as a JSON array.
        labels -> Jsonb,
        /// Checklist items as a JSON array.
        checklist -> Jsonb,
        /// Column name.
        #[max_length = 50]
        status -> Varchar,
        /// Ordinal within the column.
        position -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp, maintained by trigger.
        updated_at -> Timestamptz,
    }
}

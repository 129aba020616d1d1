//! Diesel schema for the allow-list.

diesel::table! {
    /// Emails admitted to the board.
    allowed_users (email) {
        /// Lower-cased email address.
        #[max_length = 320]
        email -> Varchar,
        /// When the entry was added.
        created_at -> Timestamptz,
    }
}

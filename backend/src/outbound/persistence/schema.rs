//! Diesel table definitions. Must match `migrations/` exactly.

diesel::table! {
    /// Registered accounts. `email` and `username` each carry a unique
    /// constraint (`accounts_email_key`, `accounts_username_key`).
    accounts (id) {
        id -> Uuid,
        username -> Text,
        email -> Text,
        password_hash -> Text,
        /// `landlord` or `customer`, enforced by a CHECK constraint.
        role -> Text,
        phone -> Text,
        whatsapp_number -> Text,
        created_at -> Timestamptz,
    }
}

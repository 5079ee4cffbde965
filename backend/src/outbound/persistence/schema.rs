// Mirrors migrations/2025-01-01-000000_create_users/up.sql.

diesel::table! {
    users (id) {
        id -> Integer,
        username -> Text,
        password_hash -> Text,
    }
}

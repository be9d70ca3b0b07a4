use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row shape for the `users` table. Pure data, no behavior; the username is
/// unique across all rows and `id` is assigned by the database.
///
/// The password column holds the value as given, unhashed (see DESIGN.md).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
}

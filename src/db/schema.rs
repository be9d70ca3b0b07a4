//! SQL DDL for initializing the expenses database.

/// PostgreSQL schema with:
/// - `id` BIGSERIAL primary key (system-assigned)
/// - `username` UNIQUE (creates an index implicitly)
/// - `password` stored verbatim, mirroring the deployed schema
pub const PG_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_declares_unique_usernames() {
        assert!(PG_INIT.contains("username TEXT NOT NULL UNIQUE"));
    }
}

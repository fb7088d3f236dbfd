//! Test helpers and fixtures for storage integration tests
//!
//! Database tests run through `#[sqlx::test]`: every test gets its own
//! freshly migrated MySQL database on the server named by `DATABASE_URL`,
//! seeded from `tests/fixtures/*.sql` when asked. They are ignored by
//! default; run them with `cargo test -- --ignored`.

#![allow(dead_code)]

use belajar_core::User;
use sqlx::MySqlPool;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging once per test binary
pub fn init_logging() {
    INIT.call_once(|| {
        belajar_storage::logging::init_tracing();
    });
}

/// Test fixture: user `i` as the batch exercise builds it
pub fn numbered_user(i: u32) -> User {
    User::new(i.to_string(), format!("User {i}"), format!("Rahasia{i}"))
}

/// Count all rows of `users`
pub async fn count_users(pool: &MySqlPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .expect("Failed to count users")
}

/// Count rows of `users` carrying `id`
pub async fn count_users_with_id(pool: &MySqlPool, id: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("Failed to count users by id")
}

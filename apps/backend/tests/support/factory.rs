//! Database seeding helpers.

use backend::repos::tasks::{self, Task, TaskCreate};
use backend::repos::users::{self, User};
use backend_test_support::unique_helpers::unique_email;
use sea_orm::ConnectionTrait;

/// Stored hash is never verified by the task suites.
const UNUSED_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2VlZHNhbHQ$unused";

/// Insert a user with a unique email; returns the stored user.
pub async fn seed_user<C: ConnectionTrait + Send + Sync>(conn: &C, prefix: &str) -> User {
    users::create_user(conn, &unique_email(prefix), UNUSED_HASH)
        .await
        .expect("seed user")
}

pub async fn seed_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    title: &str,
    position: i32,
) -> Task {
    tasks::create_task(
        conn,
        TaskCreate {
            user_id: user_id.to_string(),
            title: title.to_string(),
            description: None,
            position,
        },
    )
    .await
    .expect("seed task")
}

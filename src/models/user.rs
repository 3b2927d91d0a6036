use serde::{Deserialize, Serialize};

/// A user row. The password is stored exactly as provided at registration
/// and the admin dump endpoint returns it as stored — both behaviors carried
/// over from the legacy service.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
}

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;

/// One row of the `profiles` table. `data` holds the profile document in
/// whatever shape it was last written.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub uid: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

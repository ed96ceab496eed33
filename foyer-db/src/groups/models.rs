use chrono::{DateTime, Utc};
use uuid::Uuid;

///
/// Model to fetch a group from the database with.
///
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize, serde::Deserialize)]
pub struct GroupModel {
    pub id: Uuid,
    pub name: String,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

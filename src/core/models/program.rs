use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Program {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 答辩委员会实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/defense_board.ts")]
pub struct DefenseBoard {
    pub id: i64,
    pub name: String,
    pub room: Option<String>,
    pub scheduled_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

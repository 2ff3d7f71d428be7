use serde::Serialize;
use ts_rs::TS;

use super::entities::User;

// 用户摘要，用于名册/评价人展示
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserBrief {
    pub id: i64,
    pub username: String,
    pub profile_name: String,
}

impl From<&User> for UserBrief {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            profile_name: user.profile_name.clone(),
        }
    }
}

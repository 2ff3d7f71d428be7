use serde::Deserialize;
use ts_rs::TS;

use super::entities::UserRole;

// 创建用户请求（启动期账号种子与管理端使用）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    /// 已经过 argon2 哈希的密码
    pub password: String,
    pub role: UserRole,
    pub profile_name: Option<String>,
}

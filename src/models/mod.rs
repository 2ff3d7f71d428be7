pub mod auth;
pub mod common;
pub mod defense_boards;
pub mod evaluations;
pub mod proposals;
pub mod results;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间，用于统计预处理耗时
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

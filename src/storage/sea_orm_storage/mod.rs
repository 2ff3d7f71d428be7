//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod defense_boards;
mod evaluations;
mod proposals;
mod published_results;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, ThesisSystemError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| ThesisSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ThesisSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| ThesisSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ThesisSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ThesisSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    defense_boards::entities::DefenseBoard,
    evaluations::entities::{DefenseType, Evaluation, EvaluationType},
    proposals::{entities::Proposal, requests::ProposalListQuery, responses::ProposalListResponse},
    results::entities::PublishedResult,
    users::{entities::User, requests::CreateUserRequest},
};
use crate::storage::{NewPublishedResult, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 提案模块
    async fn get_proposal_by_id(&self, proposal_id: i64) -> Result<Option<Proposal>> {
        self.get_proposal_by_id_impl(proposal_id).await
    }

    async fn list_proposals_with_pagination(
        &self,
        query: ProposalListQuery,
    ) -> Result<ProposalListResponse> {
        self.list_proposals_with_pagination_impl(query).await
    }

    async fn list_proposal_members(&self, proposal_id: i64) -> Result<Vec<User>> {
        self.list_proposal_members_impl(proposal_id).await
    }

    async fn list_approved_proposals(&self) -> Result<Vec<Proposal>> {
        self.list_approved_proposals_impl().await
    }

    // 委员会模块
    async fn get_defense_board_by_id(&self, board_id: i64) -> Result<Option<DefenseBoard>> {
        self.get_defense_board_by_id_impl(board_id).await
    }

    async fn list_defense_boards(&self) -> Result<Vec<DefenseBoard>> {
        self.list_defense_boards_impl().await
    }

    async fn list_board_members(&self, board_id: i64) -> Result<Vec<User>> {
        self.list_board_members_impl(board_id).await
    }

    async fn is_board_member(&self, board_id: i64, user_id: i64) -> Result<bool> {
        self.is_board_member_impl(board_id, user_id).await
    }

    async fn list_board_proposals(&self, board_id: i64) -> Result<Vec<Proposal>> {
        self.list_board_proposals_impl(board_id).await
    }

    // 评价模块
    async fn upsert_evaluation(
        &self,
        student_id: i64,
        evaluator_id: i64,
        proposal_id: i64,
        defense_type: DefenseType,
        evaluation_type: EvaluationType,
        marks: f64,
        comments: Option<String>,
    ) -> Result<(Evaluation, bool)> {
        self.upsert_evaluation_impl(
            student_id,
            evaluator_id,
            proposal_id,
            defense_type,
            evaluation_type,
            marks,
            comments,
        )
        .await
    }

    async fn list_evaluations_by_proposal(
        &self,
        proposal_id: i64,
        defense_type: Option<DefenseType>,
    ) -> Result<Vec<Evaluation>> {
        self.list_evaluations_by_proposal_impl(proposal_id, defense_type)
            .await
    }

    async fn list_evaluations_by_student(&self, student_id: i64) -> Result<Vec<Evaluation>> {
        self.list_evaluations_by_student_impl(student_id).await
    }

    async fn list_evaluations_by_student_and_proposal(
        &self,
        student_id: i64,
        proposal_id: i64,
    ) -> Result<Vec<Evaluation>> {
        self.list_evaluations_by_student_and_proposal_impl(student_id, proposal_id)
            .await
    }

    // 发布成绩模块
    async fn get_published_result_by_student(
        &self,
        student_id: i64,
    ) -> Result<Option<PublishedResult>> {
        self.get_published_result_by_student_impl(student_id).await
    }

    async fn create_published_result(
        &self,
        record: NewPublishedResult,
    ) -> Result<Option<PublishedResult>> {
        self.create_published_result_impl(record).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! 测试用内存 SQLite 与种子数据

    use sea_orm::{ActiveModelTrait, Set};

    use super::*;
    use crate::models::proposals::entities::ProposalStatus;
    use crate::models::users::entities::UserRole;

    /// 连接内存数据库并跑全部迁移
    ///
    /// 单连接池：内存 SQLite 每条连接是独立数据库。
    pub(crate) async fn new_in_memory() -> SeaOrmStorage {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .expect("Failed to connect to in-memory sqlite");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        SeaOrmStorage { db }
    }

    pub(crate) async fn seed_user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> User {
        storage
            .create_user_impl(CreateUserRequest {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: "not-a-real-hash".to_string(),
                role,
                profile_name: None,
            })
            .await
            .expect("Failed to seed user")
    }

    pub(crate) async fn seed_board(storage: &SeaOrmStorage, name: &str) -> i64 {
        let now = chrono::Utc::now().timestamp();
        let model = crate::entity::defense_boards::ActiveModel {
            name: Set(name.to_string()),
            room: Set(None),
            scheduled_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        model.insert(&storage.db).await.expect("Failed to seed board").id
    }

    pub(crate) async fn add_board_member(storage: &SeaOrmStorage, board_id: i64, user_id: i64) {
        let model = crate::entity::board_members::ActiveModel {
            board_id: Set(board_id),
            user_id: Set(user_id),
            ..Default::default()
        };

        model
            .insert(&storage.db)
            .await
            .expect("Failed to seed board member");
    }

    pub(crate) async fn seed_approved_proposal(
        storage: &SeaOrmStorage,
        supervisor_id: i64,
        defense_board_id: Option<i64>,
    ) -> i64 {
        let now = chrono::Utc::now().timestamp();
        let model = crate::entity::proposals::ActiveModel {
            title: Set("Seeded proposal".to_string()),
            abstract_text: Set(None),
            supervisor_id: Set(supervisor_id),
            course_supervisor_id: Set(None),
            defense_board_id: Set(defense_board_id),
            status: Set(ProposalStatus::Approved.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .insert(&storage.db)
            .await
            .expect("Failed to seed proposal")
            .id
    }

    pub(crate) async fn add_proposal_member(
        storage: &SeaOrmStorage,
        proposal_id: i64,
        user_id: i64,
    ) {
        let model = crate::entity::proposal_members::ActiveModel {
            proposal_id: Set(proposal_id),
            user_id: Set(user_id),
            ..Default::default()
        };

        model
            .insert(&storage.db)
            .await
            .expect("Failed to seed proposal member");
    }
}

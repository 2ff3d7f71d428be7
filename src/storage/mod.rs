use std::sync::Arc;

use crate::models::{
    evaluations::entities::{DefenseType, Evaluation, EvaluationType},
    proposals::{entities::Proposal, requests::ProposalListQuery, responses::ProposalListResponse},
    results::entities::PublishedResult,
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 待发布的成绩记录，由发布批处理构造
#[derive(Debug, Clone)]
pub struct NewPublishedResult {
    pub student_id: i64,
    pub proposal_id: i64,
    pub grade: String,
    pub point: f64,
    pub total_marks: f64,
    pub course_code: String,
    pub course_title: String,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 批量获取用户（名册/评价人展示）
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 提案管理方法
    // 通过ID获取提案
    async fn get_proposal_by_id(&self, proposal_id: i64) -> Result<Option<Proposal>>;
    // 分页列出提案
    async fn list_proposals_with_pagination(
        &self,
        query: ProposalListQuery,
    ) -> Result<ProposalListResponse>;
    // 提案的学生名册
    async fn list_proposal_members(&self, proposal_id: i64) -> Result<Vec<User>>;
    // 全部已通过的提案（发布批处理使用）
    async fn list_approved_proposals(&self) -> Result<Vec<Proposal>>;

    /// 答辩委员会管理方法
    // 通过ID获取委员会
    async fn get_defense_board_by_id(
        &self,
        board_id: i64,
    ) -> Result<Option<crate::models::defense_boards::entities::DefenseBoard>>;
    // 列出全部委员会
    async fn list_defense_boards(
        &self,
    ) -> Result<Vec<crate::models::defense_boards::entities::DefenseBoard>>;
    // 委员会评委名单
    async fn list_board_members(&self, board_id: i64) -> Result<Vec<User>>;
    // 判断用户是否为某委员会评委
    async fn is_board_member(&self, board_id: i64, user_id: i64) -> Result<bool>;
    // 委员会下分配的提案
    async fn list_board_proposals(&self, board_id: i64) -> Result<Vec<Proposal>>;

    /// 评价管理方法
    // 按 (学生, 评价人, 提案, 阶段, 角色) 五元组插入或覆盖，返回是否新建
    #[allow(clippy::too_many_arguments)]
    async fn upsert_evaluation(
        &self,
        student_id: i64,
        evaluator_id: i64,
        proposal_id: i64,
        defense_type: DefenseType,
        evaluation_type: EvaluationType,
        marks: f64,
        comments: Option<String>,
    ) -> Result<(Evaluation, bool)>;
    // 提案下的全部评价，可按阶段筛选
    async fn list_evaluations_by_proposal(
        &self,
        proposal_id: i64,
        defense_type: Option<DefenseType>,
    ) -> Result<Vec<Evaluation>>;
    // 学生名下的全部评价
    async fn list_evaluations_by_student(&self, student_id: i64) -> Result<Vec<Evaluation>>;
    // 学生在某提案下的全部评价（发布批处理使用）
    async fn list_evaluations_by_student_and_proposal(
        &self,
        student_id: i64,
        proposal_id: i64,
    ) -> Result<Vec<Evaluation>>;

    /// 发布成绩方法
    // 学生的已发布成绩
    async fn get_published_result_by_student(
        &self,
        student_id: i64,
    ) -> Result<Option<PublishedResult>>;
    // 写入发布记录；撞上 student_id 唯一约束时返回 None（已发布过）
    async fn create_published_result(
        &self,
        record: NewPublishedResult,
    ) -> Result<Option<PublishedResult>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

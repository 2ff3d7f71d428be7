use serde::Serialize;
use ts_rs::TS;

use super::entities::{DefenseType, EvaluationType};
use crate::models::defense_boards::entities::DefenseBoard;
use crate::models::proposals::entities::Proposal;
use crate::models::users::responses::UserBrief;

// 单条评价的展示视图（附评价人信息）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationView {
    pub id: i64,
    pub evaluator: UserBrief,
    pub defense_type: DefenseType,
    pub evaluation_type: EvaluationType,
    pub marks: f64,
    pub comments: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 按学生分组的评价列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct StudentEvaluations {
    pub student: UserBrief,
    pub evaluations: Vec<EvaluationView>,
}

// GET /evaluations/proposal/{id} 响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct ProposalEvaluationsResponse {
    pub proposal_id: i64,
    pub students: Vec<StudentEvaluations>,
}

// 单阶段聚合结果
//
// committee_average 在没有任何委员会评分时为 0（不是 null、不是错误），
// 以便完成前的部分视图也能正常渲染。
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct PhaseResult {
    pub supervisor_mark: f64,
    pub committee_marks: Vec<f64>,
    pub committee_average: f64,
    pub phase_total: f64,
}

// 两阶段聚合 + 总分
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct AggregateResult {
    pub pre_defense: PhaseResult,
    pub final_defense: PhaseResult,
    pub overall_total: f64,
}

// 按角色拆分的评语视图（学生个人结果页）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct CommentView {
    pub evaluation_type: EvaluationType,
    pub comments: String,
}

// GET /evaluations/my-results 响应
//
// 无论是否发布都返回评语；成绩字段仅在发布后出现。
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct MyResultResponse {
    pub published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<f64>,
    pub pre_defense_comments: Vec<CommentView>,
    pub final_defense_comments: Vec<CommentView>,
}

// 委员会总览：委员会 → 提案 → 学生
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct StudentBreakdown {
    pub student: UserBrief,
    pub evaluations: Vec<EvaluationView>,
    pub aggregate: AggregateResult,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct ProposalBreakdown {
    pub proposal: Proposal,
    pub students: Vec<StudentBreakdown>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct BoardBreakdown {
    pub board: DefenseBoard,
    pub proposals: Vec<ProposalBreakdown>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct BoardResultsResponse {
    pub boards: Vec<BoardBreakdown>,
}

// POST /evaluations/publish-all-results 响应
#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct PublishSummary {
    pub published: i64,
    pub already_published: i64,
    pub not_published: i64,
}

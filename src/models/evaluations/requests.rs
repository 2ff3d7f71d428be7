use serde::Deserialize;
use ts_rs::TS;

// 提交评价请求
//
// defense_type 按原始字符串接收，由服务层宽松归一化；
// evaluation_type 反序列化即严格校验。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct SubmitEvaluationRequest {
    pub student_id: i64,
    pub proposal_id: i64,
    pub defense_type: String,
    pub evaluation_type: String,
    pub marks: f64,
    pub comments: Option<String>,
}

// 按提案查询评价的参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct ProposalEvaluationsQuery {
    /// 可选阶段筛选，接受宽松写法
    pub defense_type: Option<String>,
}

// 委员会总览查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct BoardResultsQuery {
    pub defense_type: Option<String>,
}

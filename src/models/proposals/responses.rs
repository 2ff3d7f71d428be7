use serde::Serialize;
use ts_rs::TS;

use super::entities::Proposal;
use crate::models::PaginationInfo;
use crate::models::users::responses::UserBrief;

// 提案列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/proposal.ts")]
pub struct ProposalListResponse {
    pub items: Vec<Proposal>,
    pub pagination: PaginationInfo,
}

// 提案详情（含学生名册）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/proposal.ts")]
pub struct ProposalDetailResponse {
    pub proposal: Proposal,
    pub members: Vec<UserBrief>,
}

use serde::Deserialize;
use ts_rs::TS;

use super::entities::ProposalStatus;

// 提案列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/proposal.ts")]
pub struct ProposalListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// 状态筛选
    pub status: Option<ProposalStatus>,
    /// 导师筛选
    pub supervisor_id: Option<i64>,
    /// 委员会筛选
    pub defense_board_id: Option<i64>,
}

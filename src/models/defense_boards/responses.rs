use serde::Serialize;
use ts_rs::TS;

use super::entities::DefenseBoard;
use crate::models::proposals::entities::Proposal;
use crate::models::users::responses::UserBrief;

// 委员会详情（含评委名单与分配的提案）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/defense_board.ts")]
pub struct DefenseBoardDetailResponse {
    pub board: DefenseBoard,
    pub members: Vec<UserBrief>,
    pub proposals: Vec<Proposal>,
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提案状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/proposal.ts")]
pub enum ProposalStatus {
    Pending,  // 待审批
    Approved, // 已批准
    Rejected, // 已驳回
}

impl<'de> Deserialize<'de> for ProposalStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "pending" => Ok(ProposalStatus::Pending),
            "approved" => Ok(ProposalStatus::Approved),
            "rejected" => Ok(ProposalStatus::Rejected),
            _ => Err(serde::de::Error::custom(format!(
                "无效的提案状态: '{s}'. 支持的状态: pending, approved, rejected"
            ))),
        }
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProposalStatus::Pending => write!(f, "pending"),
            ProposalStatus::Approved => write!(f, "approved"),
            ProposalStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ProposalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ProposalStatus::Pending),
            "approved" => Ok(ProposalStatus::Approved),
            "rejected" => Ok(ProposalStatus::Rejected),
            _ => Err(format!("Invalid proposal status: {s}")),
        }
    }
}

// 提案实体
//
// 评价核心只读取提案：状态流转（提交/转发/批准/驳回）由提案管理模块负责。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/proposal.ts")]
pub struct Proposal {
    pub id: i64,
    pub title: String,
    pub abstract_text: Option<String>,
    pub supervisor_id: i64,
    /// 课程副导师（可选的共同导师）
    pub course_supervisor_id: Option<i64>,
    /// 分配的答辩委员会；未分配时无法接受委员会评价
    pub defense_board_id: Option<i64>,
    pub status: ProposalStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

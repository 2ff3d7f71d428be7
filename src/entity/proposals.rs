//! 开题提案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "proposals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_name = "abstract", column_type = "Text", nullable)]
    pub abstract_text: Option<String>,
    pub supervisor_id: i64,
    pub course_supervisor_id: Option<i64>,
    pub defense_board_id: Option<i64>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SupervisorId",
        to = "super::users::Column::Id"
    )]
    Supervisor,
    #[sea_orm(
        belongs_to = "super::defense_boards::Entity",
        from = "Column::DefenseBoardId",
        to = "super::defense_boards::Column::Id"
    )]
    DefenseBoard,
    #[sea_orm(has_many = "super::proposal_members::Entity")]
    ProposalMembers,
    #[sea_orm(has_many = "super::evaluations::Entity")]
    Evaluations,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supervisor.def()
    }
}

impl Related<super::defense_boards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DefenseBoard.def()
    }
}

impl Related<super::proposal_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProposalMembers.def()
    }
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_proposal(self) -> crate::models::proposals::entities::Proposal {
        use crate::models::proposals::entities::{Proposal, ProposalStatus};
        use chrono::{DateTime, Utc};

        Proposal {
            id: self.id,
            title: self.title,
            abstract_text: self.abstract_text,
            supervisor_id: self.supervisor_id,
            course_supervisor_id: self.course_supervisor_id,
            defense_board_id: self.defense_board_id,
            status: self
                .status
                .parse::<ProposalStatus>()
                .unwrap_or(ProposalStatus::Pending),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}

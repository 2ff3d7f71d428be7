//! 评价记录实体
//!
//! (student_id, evaluator_id, proposal_id, defense_type, evaluation_type)
//! 五元组上有唯一索引，重复提交原地覆盖。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub evaluator_id: i64,
    pub proposal_id: i64,
    pub defense_type: String,
    pub evaluation_type: String,
    pub marks: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::proposals::Entity",
        from = "Column::ProposalId",
        to = "super::proposals::Column::Id"
    )]
    Proposal,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::EvaluatorId",
        to = "super::users::Column::Id"
    )]
    Evaluator,
}

impl Related<super::proposals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Proposal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_evaluation(self) -> crate::models::evaluations::entities::Evaluation {
        use crate::models::evaluations::entities::{DefenseType, Evaluation, EvaluationType};
        use chrono::{DateTime, Utc};

        Evaluation {
            id: self.id,
            student_id: self.student_id,
            evaluator_id: self.evaluator_id,
            proposal_id: self.proposal_id,
            defense_type: DefenseType::parse(&self.defense_type)
                .unwrap_or(DefenseType::PreDefense),
            evaluation_type: self
                .evaluation_type
                .parse::<EvaluationType>()
                .unwrap_or(EvaluationType::Committee),
            marks: self.marks,
            comments: self.comments,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}

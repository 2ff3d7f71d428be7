//! 发布成绩实体
//!
//! student_id 唯一：每名学生至多一条发布结果，写入后不再更新。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "published_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub student_id: i64,
    pub proposal_id: i64,
    pub grade: String,
    pub point: f64,
    pub total_marks: f64,
    pub course_code: String,
    pub course_title: String,
    pub published_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::proposals::Entity",
        from = "Column::ProposalId",
        to = "super::proposals::Column::Id"
    )]
    Proposal,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::proposals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Proposal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_published_result(self) -> crate::models::results::entities::PublishedResult {
        use crate::models::results::entities::PublishedResult;
        use chrono::{DateTime, Utc};

        PublishedResult {
            id: self.id,
            student_id: self.student_id,
            proposal_id: self.proposal_id,
            grade: self.grade,
            point: self.point,
            total_marks: self.total_marks,
            course_code: self.course_code,
            course_title: self.course_title,
            published_at: DateTime::<Utc>::from_timestamp(self.published_at, 0).unwrap_or_default(),
        }
    }
}

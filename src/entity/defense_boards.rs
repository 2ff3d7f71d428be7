//! 答辩委员会实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "defense_boards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub room: Option<String>,
    pub scheduled_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::board_members::Entity")]
    BoardMembers,
    #[sea_orm(has_many = "super::proposals::Entity")]
    Proposals,
}

impl Related<super::board_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BoardMembers.def()
    }
}

impl Related<super::proposals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Proposals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_defense_board(self) -> crate::models::defense_boards::entities::DefenseBoard {
        use crate::models::defense_boards::entities::DefenseBoard;
        use chrono::{DateTime, Utc};

        DefenseBoard {
            id: self.id,
            name: self.name,
            room: self.room,
            scheduled_at: self
                .scheduled_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}

//! 答辩委员会存储操作

use super::SeaOrmStorage;
use crate::entity::board_members::{Column as BoardMemberColumn, Entity as BoardMembers};
use crate::entity::defense_boards::{Column, Entity as DefenseBoards};
use crate::entity::proposals::{Column as ProposalColumn, Entity as Proposals};
use crate::errors::{Result, ThesisSystemError};
use crate::models::{
    defense_boards::entities::DefenseBoard, proposals::entities::Proposal, users::entities::User,
};
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 通过 ID 获取委员会
    pub async fn get_defense_board_by_id_impl(&self, board_id: i64) -> Result<Option<DefenseBoard>> {
        let result = DefenseBoards::find_by_id(board_id)
            .one(&self.db)
            .await
            .map_err(|e| ThesisSystemError::database_operation(format!("查询委员会失败: {e}")))?;

        Ok(result.map(|m| m.into_defense_board()))
    }

    /// 列出全部委员会
    pub async fn list_defense_boards_impl(&self) -> Result<Vec<DefenseBoard>> {
        let result = DefenseBoards::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                ThesisSystemError::database_operation(format!("查询委员会列表失败: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_defense_board()).collect())
    }

    /// 委员会评委名单
    pub async fn list_board_members_impl(&self, board_id: i64) -> Result<Vec<User>> {
        let members = BoardMembers::find()
            .filter(BoardMemberColumn::BoardId.eq(board_id))
            .all(&self.db)
            .await
            .map_err(|e| {
                ThesisSystemError::database_operation(format!("查询评委名单失败: {e}"))
            })?;

        let user_ids: Vec<i64> = members.into_iter().map(|m| m.user_id).collect();
        self.get_users_by_ids_impl(&user_ids).await
    }

    /// 判断用户是否为某委员会评委
    pub async fn is_board_member_impl(&self, board_id: i64, user_id: i64) -> Result<bool> {
        let count = BoardMembers::find()
            .filter(
                Condition::all()
                    .add(BoardMemberColumn::BoardId.eq(board_id))
                    .add(BoardMemberColumn::UserId.eq(user_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| {
                ThesisSystemError::database_operation(format!("查询评委资格失败: {e}"))
            })?;

        Ok(count > 0)
    }

    /// 委员会下分配的提案
    pub async fn list_board_proposals_impl(&self, board_id: i64) -> Result<Vec<Proposal>> {
        let result = Proposals::find()
            .filter(ProposalColumn::DefenseBoardId.eq(board_id))
            .order_by_asc(ProposalColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                ThesisSystemError::database_operation(format!("查询委员会提案失败: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_proposal()).collect())
    }
}

//! 提案存储操作

use super::SeaOrmStorage;
use crate::entity::proposal_members::{
    Column as ProposalMemberColumn, Entity as ProposalMembers,
};
use crate::entity::proposals::{Column, Entity as Proposals};
use crate::errors::{Result, ThesisSystemError};
use crate::models::{
    PaginationInfo,
    proposals::{entities::Proposal, requests::ProposalListQuery, responses::ProposalListResponse},
    users::entities::User,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 通过 ID 获取提案
    pub async fn get_proposal_by_id_impl(&self, proposal_id: i64) -> Result<Option<Proposal>> {
        let result = Proposals::find_by_id(proposal_id)
            .one(&self.db)
            .await
            .map_err(|e| ThesisSystemError::database_operation(format!("查询提案失败: {e}")))?;

        Ok(result.map(|m| m.into_proposal()))
    }

    /// 分页列出提案
    pub async fn list_proposals_with_pagination_impl(
        &self,
        query: ProposalListQuery,
    ) -> Result<ProposalListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Proposals::find();

        // 状态筛选
        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 导师筛选
        if let Some(supervisor_id) = query.supervisor_id {
            select = select.filter(Column::SupervisorId.eq(supervisor_id));
        }

        // 委员会筛选
        if let Some(board_id) = query.defense_board_id {
            select = select.filter(Column::DefenseBoardId.eq(board_id));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ThesisSystemError::database_operation(format!("查询提案总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ThesisSystemError::database_operation(format!("查询提案页数失败: {e}")))?;

        let proposals = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ThesisSystemError::database_operation(format!("查询提案列表失败: {e}")))?;

        Ok(ProposalListResponse {
            items: proposals.into_iter().map(|m| m.into_proposal()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 全部已通过的提案
    pub async fn list_approved_proposals_impl(&self) -> Result<Vec<Proposal>> {
        use crate::models::proposals::entities::ProposalStatus;

        let result = Proposals::find()
            .filter(Column::Status.eq(ProposalStatus::Approved.to_string()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                ThesisSystemError::database_operation(format!("查询已通过提案失败: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_proposal()).collect())
    }

    /// 提案的学生名册
    pub async fn list_proposal_members_impl(&self, proposal_id: i64) -> Result<Vec<User>> {
        let members = ProposalMembers::find()
            .filter(ProposalMemberColumn::ProposalId.eq(proposal_id))
            .all(&self.db)
            .await
            .map_err(|e| ThesisSystemError::database_operation(format!("查询提案名册失败: {e}")))?;

        let user_ids: Vec<i64> = members.into_iter().map(|m| m.user_id).collect();
        self.get_users_by_ids_impl(&user_ids).await
    }
}

//! 评价存储操作
//!
//! 写入以 (student_id, evaluator_id, proposal_id, defense_type, evaluation_type)
//! 五元组为键：已存在则原地覆盖分数与评语，否则新建。

use super::SeaOrmStorage;
use crate::entity::evaluations::{ActiveModel, Column, Entity as Evaluations};
use crate::errors::{Result, ThesisSystemError};
use crate::models::evaluations::entities::{DefenseType, Evaluation, EvaluationType};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 插入或覆盖评价，返回 (记录, 是否新建)
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert_evaluation_impl(
        &self,
        student_id: i64,
        evaluator_id: i64,
        proposal_id: i64,
        defense_type: DefenseType,
        evaluation_type: EvaluationType,
        marks: f64,
        comments: Option<String>,
    ) -> Result<(Evaluation, bool)> {
        let now = chrono::Utc::now().timestamp();

        let existing = Evaluations::find()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::EvaluatorId.eq(evaluator_id))
                    .add(Column::ProposalId.eq(proposal_id))
                    .add(Column::DefenseType.eq(defense_type.to_string()))
                    .add(Column::EvaluationType.eq(evaluation_type.to_string())),
            )
            .one(&self.db)
            .await
            .map_err(|e| ThesisSystemError::database_operation(format!("查询评价失败: {e}")))?;

        if let Some(record) = existing {
            let model = ActiveModel {
                id: Set(record.id),
                marks: Set(marks),
                comments: Set(comments),
                updated_at: Set(now),
                ..Default::default()
            };

            let result = model
                .update(&self.db)
                .await
                .map_err(|e| ThesisSystemError::database_operation(format!("覆盖评价失败: {e}")))?;

            return Ok((result.into_evaluation(), false));
        }

        let model = ActiveModel {
            student_id: Set(student_id),
            evaluator_id: Set(evaluator_id),
            proposal_id: Set(proposal_id),
            defense_type: Set(defense_type.to_string()),
            evaluation_type: Set(evaluation_type.to_string()),
            marks: Set(marks),
            comments: Set(comments),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ThesisSystemError::database_operation(format!("创建评价失败: {e}")))?;

        Ok((result.into_evaluation(), true))
    }

    /// 提案下的全部评价，可按阶段筛选
    pub async fn list_evaluations_by_proposal_impl(
        &self,
        proposal_id: i64,
        defense_type: Option<DefenseType>,
    ) -> Result<Vec<Evaluation>> {
        let mut select = Evaluations::find().filter(Column::ProposalId.eq(proposal_id));

        if let Some(dt) = defense_type {
            select = select.filter(Column::DefenseType.eq(dt.to_string()));
        }

        let result = select
            .order_by_asc(Column::StudentId)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ThesisSystemError::database_operation(format!("查询评价列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_evaluation()).collect())
    }

    /// 学生名下的全部评价
    pub async fn list_evaluations_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Evaluation>> {
        let result = Evaluations::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ThesisSystemError::database_operation(format!("查询评价列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_evaluation()).collect())
    }

    /// 学生在某提案下的全部评价
    pub async fn list_evaluations_by_student_and_proposal_impl(
        &self,
        student_id: i64,
        proposal_id: i64,
    ) -> Result<Vec<Evaluation>> {
        let result = Evaluations::find()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::ProposalId.eq(proposal_id)),
            )
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ThesisSystemError::database_operation(format!("查询评价列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_evaluation()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support;
    use super::*;
    use crate::models::users::entities::UserRole;

    #[tokio::test]
    async fn test_resubmission_overwrites_instead_of_appending() {
        let storage = test_support::new_in_memory().await;
        let supervisor = test_support::seed_user(&storage, "supervisor", UserRole::Supervisor).await;
        let judge = test_support::seed_user(&storage, "judge", UserRole::Committee).await;
        let student = test_support::seed_user(&storage, "student", UserRole::Student).await;
        let proposal_id =
            test_support::seed_approved_proposal(&storage, supervisor.id, None).await;

        let (first, created) = storage
            .upsert_evaluation_impl(
                student.id,
                supervisor.id,
                proposal_id,
                DefenseType::PreDefense,
                EvaluationType::Supervisor,
                15.0,
                Some("初稿".to_string()),
            )
            .await
            .unwrap();
        assert!(created);

        // 同五元组重交：覆盖原记录而不是追加
        let (second, created) = storage
            .upsert_evaluation_impl(
                student.id,
                supervisor.id,
                proposal_id,
                DefenseType::PreDefense,
                EvaluationType::Supervisor,
                18.0,
                None,
            )
            .await
            .unwrap();
        assert!(!created);
        assert_eq!(second.id, first.id);
        assert_eq!(second.marks, 18.0);
        assert_eq!(second.comments, None);

        let rows = storage
            .list_evaluations_by_student_and_proposal_impl(student.id, proposal_id)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].marks, 18.0);

        // 键的任一部分不同则是新记录
        let (_, created) = storage
            .upsert_evaluation_impl(
                student.id,
                judge.id,
                proposal_id,
                DefenseType::PreDefense,
                EvaluationType::Committee,
                8.0,
                None,
            )
            .await
            .unwrap();
        assert!(created);

        let (_, created) = storage
            .upsert_evaluation_impl(
                student.id,
                supervisor.id,
                proposal_id,
                DefenseType::FinalDefense,
                EvaluationType::Supervisor,
                35.0,
                None,
            )
            .await
            .unwrap();
        assert!(created);

        let rows = storage
            .list_evaluations_by_student_and_proposal_impl(student.id, proposal_id)
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
    }
}

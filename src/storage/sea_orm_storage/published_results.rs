//! 发布成绩存储操作

use super::SeaOrmStorage;
use crate::entity::published_results::{ActiveModel, Column, Entity as PublishedResults};
use crate::errors::{Result, ThesisSystemError};
use crate::models::results::entities::PublishedResult;
use crate::storage::NewPublishedResult;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr};

impl SeaOrmStorage {
    /// 学生的已发布成绩
    pub async fn get_published_result_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Option<PublishedResult>> {
        let result = PublishedResults::find()
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                ThesisSystemError::database_operation(format!("查询发布成绩失败: {e}"))
            })?;

        Ok(result.map(|m| m.into_published_result()))
    }

    /// 写入发布记录
    ///
    /// student_id 上有唯一约束，并发重复发布会撞约束；
    /// 这种情况返回 Ok(None)，由调用方按"已发布"处理。
    pub async fn create_published_result_impl(
        &self,
        record: NewPublishedResult,
    ) -> Result<Option<PublishedResult>> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(record.student_id),
            proposal_id: Set(record.proposal_id),
            grade: Set(record.grade),
            point: Set(record.point),
            total_marks: Set(record.total_marks),
            course_code: Set(record.course_code),
            course_title: Set(record.course_title),
            published_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(result) => Ok(Some(result.into_published_result())),
            Err(e) => {
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    return Ok(None);
                }
                Err(ThesisSystemError::database_operation(format!(
                    "写入发布成绩失败: {e}"
                )))
            }
        }
    }
}

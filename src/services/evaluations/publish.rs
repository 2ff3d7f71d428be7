//! 一次性成绩发布批处理
//!
//! 遍历全部已通过提案的学生名册，逐人判定：已发布跳过、记录不完整跳过、
//! 其余聚合算分并落库。单个学生的失败只记日志计数，不中断整批。

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use super::aggregate::{aggregate, is_complete_for_publication};
use crate::errors::Result;
use crate::models::evaluations::responses::PublishSummary;
use crate::models::results::entities::resolve_grade;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::{NewPublishedResult, Storage};

pub async fn handle_publish_all(
    service: &EvaluationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    let summary = match run_publish_batch(&storage, &config.course.code, &config.course.title).await
    {
        Ok(summary) => summary,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list approved proposals: {e}"),
                )),
            );
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        summary,
        "Publication batch finished",
    )))
}

/// 发布批处理本体，按学生计数：published / already_published / not_published
pub(crate) async fn run_publish_batch(
    storage: &Arc<dyn Storage>,
    course_code: &str,
    course_title: &str,
) -> Result<PublishSummary> {
    let proposals = storage.list_approved_proposals().await?;

    let mut summary = PublishSummary::default();

    for proposal in proposals {
        let members = match storage.list_proposal_members(proposal.id).await {
            Ok(members) => members,
            Err(e) => {
                tracing::warn!(
                    "Skipping proposal {} during publication: {}",
                    proposal.id,
                    e
                );
                continue;
            }
        };

        for student in members {
            // 1. 已发布的学生直接跳过
            match storage.get_published_result_by_student(student.id).await {
                Ok(Some(_)) => {
                    summary.already_published += 1;
                    continue;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        "Failed to check published result for student {}: {}",
                        student.id,
                        e
                    );
                    summary.not_published += 1;
                    continue;
                }
            }

            // 2. 完整性：每阶段恰好一条导师记录且至少一条委员会记录
            let evaluations = match storage
                .list_evaluations_by_student_and_proposal(student.id, proposal.id)
                .await
            {
                Ok(evaluations) => evaluations,
                Err(e) => {
                    tracing::warn!(
                        "Failed to load evaluations for student {}: {}",
                        student.id,
                        e
                    );
                    summary.not_published += 1;
                    continue;
                }
            };

            if !is_complete_for_publication(&evaluations) {
                summary.not_published += 1;
                continue;
            }

            // 3. 聚合、换算等级并落库
            let result = aggregate(&evaluations);
            let (grade, point) = resolve_grade(result.overall_total);

            let record = NewPublishedResult {
                student_id: student.id,
                proposal_id: proposal.id,
                grade: grade.to_string(),
                point,
                total_marks: result.overall_total,
                course_code: course_code.to_string(),
                course_title: course_title.to_string(),
            };

            match storage.create_published_result(record).await {
                Ok(Some(published)) => {
                    tracing::info!(
                        "Published result for student {}: {} ({})",
                        student.id,
                        published.grade,
                        published.total_marks
                    );
                    summary.published += 1;
                }
                // 唯一约束冲突，并发发布已经写过
                Ok(None) => summary.already_published += 1,
                Err(e) => {
                    tracing::warn!(
                        "Failed to publish result for student {}: {}",
                        student.id,
                        e
                    );
                    summary.not_published += 1;
                }
            }
        }
    }

    tracing::info!(
        "Publication batch finished: {} published, {} already published, {} not published",
        summary.published,
        summary.already_published,
        summary.not_published
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluations::entities::{DefenseType, EvaluationType};
    use crate::models::users::entities::UserRole;
    use crate::storage::sea_orm_storage::test_support;

    const COURSE_CODE: &str = "CSE-400";
    const COURSE_TITLE: &str = "Project / Thesis";

    #[tokio::test]
    async fn test_publish_batch_publishes_each_student_once() {
        let sea = test_support::new_in_memory().await;
        let supervisor = test_support::seed_user(&sea, "supervisor", UserRole::Supervisor).await;
        let judge = test_support::seed_user(&sea, "judge", UserRole::Committee).await;
        let complete = test_support::seed_user(&sea, "student_a", UserRole::Student).await;
        let partial = test_support::seed_user(&sea, "student_b", UserRole::Student).await;

        let proposal_id = test_support::seed_approved_proposal(&sea, supervisor.id, None).await;
        test_support::add_proposal_member(&sea, proposal_id, complete.id).await;
        test_support::add_proposal_member(&sea, proposal_id, partial.id).await;

        // complete 两阶段记录齐全 (18+8) + (35+25) = 86
        for (dt, et, evaluator, marks) in [
            (
                DefenseType::PreDefense,
                EvaluationType::Supervisor,
                supervisor.id,
                18.0,
            ),
            (
                DefenseType::PreDefense,
                EvaluationType::Committee,
                judge.id,
                8.0,
            ),
            (
                DefenseType::FinalDefense,
                EvaluationType::Supervisor,
                supervisor.id,
                35.0,
            ),
            (
                DefenseType::FinalDefense,
                EvaluationType::Committee,
                judge.id,
                25.0,
            ),
        ] {
            sea.upsert_evaluation_impl(complete.id, evaluator, proposal_id, dt, et, marks, None)
                .await
                .unwrap();
        }

        // partial 只有一条预答辩导师记录
        sea.upsert_evaluation_impl(
            partial.id,
            supervisor.id,
            proposal_id,
            DefenseType::PreDefense,
            EvaluationType::Supervisor,
            12.0,
            None,
        )
        .await
        .unwrap();

        let storage: Arc<dyn Storage> = Arc::new(sea);

        let first = run_publish_batch(&storage, COURSE_CODE, COURSE_TITLE)
            .await
            .unwrap();
        assert_eq!(first.published, 1);
        assert_eq!(first.already_published, 0);
        assert_eq!(first.not_published, 1);

        let before = storage
            .get_published_result_by_student(complete.id)
            .await
            .unwrap()
            .expect("result published on first run");
        assert_eq!(before.total_marks, 86.0);
        assert_eq!(before.grade, "A+");
        assert_eq!(before.point, 4.00);
        assert_eq!(before.course_code, COURSE_CODE);

        // 数据不变时重跑：不再新发布，已发布成绩原样保留
        let second = run_publish_batch(&storage, COURSE_CODE, COURSE_TITLE)
            .await
            .unwrap();
        assert_eq!(second.published, 0);
        assert_eq!(second.already_published, 1);
        assert_eq!(second.not_published, 1);

        let after = storage
            .get_published_result_by_student(complete.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.grade, before.grade);
        assert_eq!(after.total_marks, before.total_marks);
        assert_eq!(after.published_at, before.published_at);

        // 不完整的学生两轮都不发布
        assert!(
            storage
                .get_published_result_by_student(partial.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}

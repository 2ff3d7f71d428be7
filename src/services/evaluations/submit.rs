use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EvaluationService, authorize};
use crate::middlewares::require_jwt::RequireJWT;
use crate::models::evaluations::entities::{
    DefenseType, EvaluationType, max_marks, validate_marks,
};
use crate::models::evaluations::requests::SubmitEvaluationRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_submit(
    service: &EvaluationService,
    submit_request: SubmitEvaluationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 归一化答辩阶段（宽松）与评价角色（严格）
    let Some(defense_type) = DefenseType::parse(&submit_request.defense_type) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidDefenseType,
            format!(
                "Invalid defense type '{}', expected Pre-Defense or Final Defense",
                submit_request.defense_type
            ),
        )));
    };

    let Ok(evaluation_type) = submit_request.evaluation_type.parse::<EvaluationType>() else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidEvaluationType,
            format!(
                "Invalid evaluation type '{}', expected supervisor or committee",
                submit_request.evaluation_type
            ),
        )));
    };

    // 2. 分数上限校验，任何写入前完成
    if !validate_marks(defense_type, evaluation_type, submit_request.marks) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::MarksOutOfRange,
            format!(
                "Marks must be between 0 and {} for {} / {}",
                max_marks(defense_type, evaluation_type),
                defense_type,
                evaluation_type
            ),
        )));
    }

    // 3. 当前登录用户即评价人
    let Some(actor) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    // 4. 学生与提案必须存在
    let proposal = match storage.get_proposal_by_id(submit_request.proposal_id).await {
        Ok(Some(proposal)) => proposal,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProposalNotFound,
                "Proposal not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get proposal: {e}"),
                )),
            );
        }
    };

    match storage.get_user_by_id(submit_request.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Student not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get student: {e}"),
                )),
            );
        }
    }

    // 5. 权限判定
    match authorize::can_evaluate(&storage, &actor, &proposal, evaluation_type).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::EvaluationPermissionDenied,
                "You are not allowed to evaluate this proposal in this role",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check evaluation permission: {e}"),
                )),
            );
        }
    }

    // 6. 五元组插入或覆盖
    match storage
        .upsert_evaluation(
            submit_request.student_id,
            actor.id,
            submit_request.proposal_id,
            defense_type,
            evaluation_type,
            submit_request.marks,
            submit_request.comments,
        )
        .await
    {
        Ok((evaluation, created)) => {
            tracing::info!(
                "Evaluation {} for student {} by evaluator {} ({} / {})",
                if created { "created" } else { "updated" },
                evaluation.student_id,
                evaluation.evaluator_id,
                defense_type,
                evaluation_type,
            );

            if created {
                Ok(HttpResponse::Created().json(ApiResponse::success(
                    evaluation,
                    "Evaluation submitted successfully",
                )))
            } else {
                Ok(HttpResponse::Ok().json(ApiResponse::success(
                    evaluation,
                    "Evaluation updated successfully",
                )))
            }
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to submit evaluation: {e}"),
            )),
        ),
    }
}

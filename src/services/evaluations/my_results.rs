use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::middlewares::require_jwt::RequireJWT;
use crate::models::evaluations::entities::DefenseType;
use crate::models::evaluations::responses::{CommentView, MyResultResponse};
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_my_results(
    service: &EvaluationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(actor) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let published = match storage.get_published_result_by_student(actor.id).await {
        Ok(published) => published,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get published result: {e}"),
                )),
            );
        }
    };

    // 评语无论是否发布都返回，成绩字段仅在发布后出现
    let evaluations = match storage.list_evaluations_by_student(actor.id).await {
        Ok(evaluations) => evaluations,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list evaluations: {e}"),
                )),
            );
        }
    };

    let comments_for = |dt: DefenseType| -> Vec<CommentView> {
        evaluations
            .iter()
            .filter(|e| e.defense_type == dt)
            .filter_map(|e| {
                e.comments
                    .as_ref()
                    .filter(|c| !c.trim().is_empty())
                    .map(|c| CommentView {
                        evaluation_type: e.evaluation_type,
                        comments: c.clone(),
                    })
            })
            .collect()
    };

    let response = MyResultResponse {
        published: published.is_some(),
        grade: published.as_ref().map(|r| r.grade.clone()),
        point: published.as_ref().map(|r| r.point),
        pre_defense_comments: comments_for(DefenseType::PreDefense),
        final_defense_comments: comments_for(DefenseType::FinalDefense),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Results retrieved successfully",
    )))
}

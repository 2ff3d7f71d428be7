use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::models::evaluations::entities::{DefenseType, Evaluation};
use crate::models::evaluations::requests::ProposalEvaluationsQuery;
use crate::models::evaluations::responses::{
    EvaluationView, ProposalEvaluationsResponse, StudentEvaluations,
};
use crate::models::users::entities::User;
use crate::models::users::responses::UserBrief;
use crate::models::{ApiResponse, ErrorCode};

/// 按 ID 查用户摘要，用户已被删除时退化为占位摘要
pub(crate) fn brief_for(briefs: &HashMap<i64, UserBrief>, user_id: i64) -> UserBrief {
    briefs.get(&user_id).cloned().unwrap_or(UserBrief {
        id: user_id,
        username: String::new(),
        profile_name: String::new(),
    })
}

pub(crate) fn brief_map(users: &[User]) -> HashMap<i64, UserBrief> {
    users.iter().map(|u| (u.id, UserBrief::from(u))).collect()
}

pub(crate) fn evaluation_view(
    evaluation: &Evaluation,
    briefs: &HashMap<i64, UserBrief>,
) -> EvaluationView {
    EvaluationView {
        id: evaluation.id,
        evaluator: brief_for(briefs, evaluation.evaluator_id),
        defense_type: evaluation.defense_type,
        evaluation_type: evaluation.evaluation_type,
        marks: evaluation.marks,
        comments: evaluation.comments.clone(),
        updated_at: evaluation.updated_at,
    }
}

pub async fn handle_proposal_evaluations(
    service: &EvaluationService,
    proposal_id: i64,
    query: ProposalEvaluationsQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 阶段筛选参数宽松归一化，写错才报 400
    let defense_type = match query.defense_type.as_deref() {
        Some(raw) => match DefenseType::parse(raw) {
            Some(dt) => Some(dt),
            None => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::InvalidDefenseType,
                    format!("Invalid defense type '{raw}'"),
                )));
            }
        },
        None => None,
    };

    match storage.get_proposal_by_id(proposal_id).await {
        Ok(Some(_)) => {}
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
    }

    let evaluations = match storage
        .list_evaluations_by_proposal(proposal_id, defense_type)
        .await
    {
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

    let roster = match storage.list_proposal_members(proposal_id).await {
        Ok(roster) => roster,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list proposal members: {e}"),
                )),
            );
        }
    };

    // 名册学生 + 评价人一并查出摘要
    let mut lookup_ids: Vec<i64> = roster.iter().map(|u| u.id).collect();
    lookup_ids.extend(evaluations.iter().map(|e| e.evaluator_id));
    lookup_ids.extend(evaluations.iter().map(|e| e.student_id));
    lookup_ids.sort_unstable();
    lookup_ids.dedup();

    let briefs = match storage.get_users_by_ids(&lookup_ids).await {
        Ok(users) => brief_map(&users),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load user info: {e}"),
                )),
            );
        }
    };

    // 以名册为骨架分组，名册之外出现过评价的学生也追加进来
    let mut grouped: HashMap<i64, Vec<EvaluationView>> = HashMap::new();
    for evaluation in &evaluations {
        grouped
            .entry(evaluation.student_id)
            .or_default()
            .push(evaluation_view(evaluation, &briefs));
    }

    let mut student_ids: Vec<i64> = roster.iter().map(|u| u.id).collect();
    for evaluation in &evaluations {
        if !student_ids.contains(&evaluation.student_id) {
            student_ids.push(evaluation.student_id);
        }
    }

    let students = student_ids
        .into_iter()
        .map(|student_id| StudentEvaluations {
            student: brief_for(&briefs, student_id),
            evaluations: grouped.remove(&student_id).unwrap_or_default(),
        })
        .collect();

    let response = ProposalEvaluationsResponse {
        proposal_id,
        students,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Evaluations retrieved successfully",
    )))
}

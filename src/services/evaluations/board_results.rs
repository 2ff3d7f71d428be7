use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use super::aggregate::aggregate;
use super::proposal_results::{brief_for, brief_map, evaluation_view};
use crate::errors::Result;
use crate::models::evaluations::entities::{DefenseType, Evaluation};
use crate::models::evaluations::requests::BoardResultsQuery;
use crate::models::evaluations::responses::{
    BoardBreakdown, BoardResultsResponse, EvaluationView, ProposalBreakdown, StudentBreakdown,
};
use crate::models::proposals::entities::Proposal;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use std::sync::Arc;

pub async fn handle_board_results(
    service: &EvaluationService,
    query: BoardResultsQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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

    match build_board_results(&storage, defense_type).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Board results retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to build board results: {e}"),
            )),
        ),
    }
}

async fn build_board_results(
    storage: &Arc<dyn Storage>,
    defense_type: Option<DefenseType>,
) -> Result<BoardResultsResponse> {
    let mut boards = Vec::new();

    for board in storage.list_defense_boards().await? {
        let mut proposals = Vec::new();

        for proposal in storage.list_board_proposals(board.id).await? {
            let breakdown =
                build_proposal_breakdown(storage, proposal, defense_type).await?;
            proposals.push(breakdown);
        }

        boards.push(BoardBreakdown { board, proposals });
    }

    Ok(BoardResultsResponse { boards })
}

async fn build_proposal_breakdown(
    storage: &Arc<dyn Storage>,
    proposal: Proposal,
    defense_type: Option<DefenseType>,
) -> Result<ProposalBreakdown> {
    // 展示列表按阶段筛选，聚合始终基于全部记录
    let all_evaluations = storage
        .list_evaluations_by_proposal(proposal.id, None)
        .await?;
    let roster = storage.list_proposal_members(proposal.id).await?;

    let mut lookup_ids: Vec<i64> = roster.iter().map(|u| u.id).collect();
    lookup_ids.extend(all_evaluations.iter().map(|e| e.evaluator_id));
    lookup_ids.extend(all_evaluations.iter().map(|e| e.student_id));
    lookup_ids.sort_unstable();
    lookup_ids.dedup();
    let briefs = brief_map(&storage.get_users_by_ids(&lookup_ids).await?);

    let mut per_student: HashMap<i64, Vec<Evaluation>> = HashMap::new();
    for evaluation in all_evaluations {
        per_student
            .entry(evaluation.student_id)
            .or_default()
            .push(evaluation);
    }

    let mut student_ids: Vec<i64> = roster.iter().map(|u| u.id).collect();
    for student_id in per_student.keys() {
        if !student_ids.contains(student_id) {
            student_ids.push(*student_id);
        }
    }

    let mut students = Vec::new();
    for student_id in student_ids {
        let evaluations = per_student.remove(&student_id).unwrap_or_default();
        let aggregate = aggregate(&evaluations);

        let views: Vec<EvaluationView> = evaluations
            .iter()
            .filter(|e| defense_type.is_none_or(|dt| e.defense_type == dt))
            .map(|e| evaluation_view(e, &briefs))
            .collect();

        students.push(StudentBreakdown {
            student: brief_for(&briefs, student_id),
            evaluations: views,
            aggregate,
        });
    }

    Ok(ProposalBreakdown { proposal, students })
}

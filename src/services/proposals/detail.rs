use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProposalService;
use crate::models::proposals::responses::ProposalDetailResponse;
use crate::models::users::responses::UserBrief;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_proposal(
    service: &ProposalService,
    request: &HttpRequest,
    proposal_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let proposal = match storage.get_proposal_by_id(proposal_id).await {
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

    match storage.list_proposal_members(proposal_id).await {
        Ok(members) => {
            let response = ProposalDetailResponse {
                proposal,
                members: members.iter().map(UserBrief::from).collect(),
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Proposal retrieved successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get proposal members: {e}"),
            )),
        ),
    }
}

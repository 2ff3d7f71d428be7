use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProposalService;
use crate::models::proposals::requests::ProposalListQuery;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_proposals(
    service: &ProposalService,
    query: ProposalListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_proposals_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Proposal list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list proposals: {e}"),
            )),
        ),
    }
}

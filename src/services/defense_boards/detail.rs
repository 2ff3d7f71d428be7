use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DefenseBoardService;
use crate::models::defense_boards::responses::DefenseBoardDetailResponse;
use crate::models::users::responses::UserBrief;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_defense_board(
    service: &DefenseBoardService,
    request: &HttpRequest,
    board_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let board = match storage.get_defense_board_by_id(board_id).await {
        Ok(Some(board)) => board,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::BoardNotFound,
                "Defense board not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get defense board: {e}"),
                )),
            );
        }
    };

    let members = match storage.list_board_members(board_id).await {
        Ok(members) => members,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get board members: {e}"),
                )),
            );
        }
    };

    match storage.list_board_proposals(board_id).await {
        Ok(proposals) => {
            let response = DefenseBoardDetailResponse {
                board,
                members: members.iter().map(UserBrief::from).collect(),
                proposals,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Defense board retrieved successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get board proposals: {e}"),
            )),
        ),
    }
}

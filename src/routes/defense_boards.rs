use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::DefenseBoardService;

// 懒加载的全局 DefenseBoardService 实例
static DEFENSE_BOARD_SERVICE: Lazy<DefenseBoardService> =
    Lazy::new(DefenseBoardService::new_lazy);

pub async fn get_defense_board(
    req: HttpRequest,
    board_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    DEFENSE_BOARD_SERVICE
        .get_defense_board(board_id.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_defense_board_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/defense-boards")
            .wrap(middlewares::RequireJWT)
            .route("/{board_id}", web::get().to(get_defense_board)),
    );
}

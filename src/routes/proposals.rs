use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::proposals::requests::ProposalListQuery;
use crate::services::ProposalService;

// 懒加载的全局 ProposalService 实例
static PROPOSAL_SERVICE: Lazy<ProposalService> = Lazy::new(ProposalService::new_lazy);

// HTTP处理程序
pub async fn list_proposals(
    req: HttpRequest,
    query: web::Query<ProposalListQuery>,
) -> ActixResult<HttpResponse> {
    PROPOSAL_SERVICE
        .list_proposals(query.into_inner(), &req)
        .await
}

pub async fn get_proposal(
    req: HttpRequest,
    proposal_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    PROPOSAL_SERVICE
        .get_proposal(proposal_id.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_proposal_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/proposals")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_proposals))
            .route("/{proposal_id}", web::get().to(get_proposal)),
    );
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::evaluations::requests::{
    BoardResultsQuery, ProposalEvaluationsQuery, SubmitEvaluationRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::EvaluationService;

// 懒加载的全局 EvaluationService 实例
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

// HTTP处理程序
pub async fn submit_evaluation(
    req: HttpRequest,
    submit_data: web::Json<SubmitEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .submit_evaluation(submit_data.into_inner(), &req)
        .await
}

pub async fn get_proposal_evaluations(
    req: HttpRequest,
    proposal_id: web::Path<i64>,
    query: web::Query<ProposalEvaluationsQuery>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .get_proposal_evaluations(proposal_id.into_inner(), query.into_inner(), &req)
        .await
}

pub async fn get_my_results(req: HttpRequest) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.get_my_results(&req).await
}

pub async fn get_board_results(
    req: HttpRequest,
    query: web::Query<BoardResultsQuery>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .get_board_results(query.into_inner(), &req)
        .await
}

pub async fn publish_all_results(req: HttpRequest) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.publish_all_results(&req).await
}

// 配置路由
pub fn configure_evaluation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluations")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::post()
                        .to(submit_evaluation)
                        // 导师与答辩委员会提交评分，细粒度权限由服务层判定
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::evaluator_roles(),
                        )),
                ),
            )
            .route("/my-results", web::get().to(get_my_results))
            .route(
                "/proposal/{proposal_id}",
                web::get().to(get_proposal_evaluations),
            )
            .service(
                web::resource("/board-results").route(
                    web::get()
                        .to(get_board_results)
                        // 委员会与管理员查看总览
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::committee_roles(),
                        )),
                ),
            )
            .service(
                web::resource("/publish-all-results").route(
                    web::post()
                        .to(publish_all_results)
                        // 一次性发布，委员会与管理员可触发
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::committee_roles(),
                        )),
                ),
            ),
    );
}

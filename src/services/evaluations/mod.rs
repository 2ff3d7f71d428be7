pub mod aggregate;
pub mod authorize;
pub mod board_results;
pub mod my_results;
pub mod proposal_results;
pub mod publish;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::evaluations::requests::{
    BoardResultsQuery, ProposalEvaluationsQuery, SubmitEvaluationRequest,
};
use crate::storage::Storage;

pub struct EvaluationService {
    storage: Option<Arc<dyn Storage>>,
}

impl EvaluationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 提交/覆盖评价
    pub async fn submit_evaluation(
        &self,
        submit_request: SubmitEvaluationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::handle_submit(self, submit_request, request).await
    }

    // 提案下的评价明细（按学生分组）
    pub async fn get_proposal_evaluations(
        &self,
        proposal_id: i64,
        query: ProposalEvaluationsQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        proposal_results::handle_proposal_evaluations(self, proposal_id, query, request).await
    }

    // 学生本人的成绩与评语
    pub async fn get_my_results(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        my_results::handle_my_results(self, request).await
    }

    // 委员会总览（委员会 → 提案 → 学生）
    pub async fn get_board_results(
        &self,
        query: BoardResultsQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        board_results::handle_board_results(self, query, request).await
    }

    // 一次性发布全部成绩
    pub async fn publish_all_results(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        publish::handle_publish_all(self, request).await
    }
}

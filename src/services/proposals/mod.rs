pub mod detail;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::proposals::requests::ProposalListQuery;
use crate::storage::Storage;

pub struct ProposalService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProposalService {
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

    // 分页列出提案
    pub async fn list_proposals(
        &self,
        query: ProposalListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_proposals(self, query, request).await
    }

    // 提案详情（含学生名册）
    pub async fn get_proposal(
        &self,
        proposal_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::get_proposal(self, request, proposal_id).await
    }
}

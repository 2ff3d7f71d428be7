pub mod detail;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct DefenseBoardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DefenseBoardService {
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

    // 委员会详情（含评委名单与分配的提案）
    pub async fn get_defense_board(
        &self,
        board_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::get_defense_board(self, request, board_id).await
    }
}

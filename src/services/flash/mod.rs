mod store;

pub use store::FlashStore;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{ApiResponse, ErrorCode};
use crate::services::{actor_or_return, error_response};

pub struct FlashService {
    store: Arc<FlashStore>,
}

impl FlashService {
    pub fn new(store: Arc<FlashStore>) -> Self {
        Self { store }
    }

    // 取出提示消息（一次性）
    pub async fn take_flash(&self, request: &HttpRequest, token: &str) -> ActixResult<HttpResponse> {
        let _actor = actor_or_return!(request);

        match self.store.take(token).await {
            Ok(Some(message)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                message,
                "Flash message retrieved",
            ))),
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FlashNotFound,
                "Flash message not found or already consumed",
            ))),
            Err(e) => Ok(error_response(&e)),
        }
    }
}

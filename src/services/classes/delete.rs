use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::ApiResponse;
use crate::services::{actor_or_return, error_response};

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = actor_or_return!(request);

    match service.engine().delete_class(&actor, class_id).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            report,
            "Class deleted successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

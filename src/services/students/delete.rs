use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::ApiResponse;
use crate::services::{actor_or_return, error_response};

pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = actor_or_return!(request);

    match service.engine().delete_student(&actor, student_id).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            report,
            "Student deleted successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

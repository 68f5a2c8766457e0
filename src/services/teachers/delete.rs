use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::ApiResponse;
use crate::services::{actor_or_return, error_response};

pub async fn delete_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = actor_or_return!(request);

    match service.engine().delete_teacher(&actor, teacher_id).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            report,
            "Teacher deleted successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

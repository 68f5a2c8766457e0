use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::ApiResponse;
use crate::models::classes::requests::AssignTeacherRequest;
use crate::services::{actor_or_return, error_response};

pub async fn assign_teacher(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    assign_data: AssignTeacherRequest,
) -> ActixResult<HttpResponse> {
    let actor = actor_or_return!(request);

    match service
        .engine()
        .assign_teacher_to_class(&actor, assign_data.teacher_id, class_id)
        .await
    {
        Ok(class) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Teacher assigned successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn unassign_teacher(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = actor_or_return!(request);

    match service.engine().unassign_teacher(&actor, class_id).await {
        Ok(class) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Teacher unassigned successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

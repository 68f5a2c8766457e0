use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::ApiResponse;
use crate::models::teachers::requests::TeacherQueryParams;
use crate::services::{actor_or_return, error_response};

pub async fn list_teachers(
    service: &TeacherService,
    request: &HttpRequest,
    query: TeacherQueryParams,
) -> ActixResult<HttpResponse> {
    let _actor = actor_or_return!(request);

    match service
        .engine()
        .storage()
        .list_teachers_with_pagination(query.into())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Teacher list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

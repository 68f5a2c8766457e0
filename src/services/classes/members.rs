use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::memberships::entities::RemovalStatus;
use crate::models::students::requests::StudentListQuery;
use crate::models::{ApiResponse, ErrorCode, PaginationQuery};
use crate::services::{actor_or_return, error_response};

pub async fn list_members(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    query: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let _actor = actor_or_return!(request);
    let storage = service.engine().storage();

    match storage.class_exists(class_id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                format!("Class {class_id} not found"),
            )));
        }
        Err(e) => return Ok(error_response(&e)),
    }

    let list_query = StudentListQuery {
        page: Some(query.page),
        size: Some(query.size),
        ..Default::default()
    };

    match storage.list_class_members(class_id, list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Class members retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn assign_student(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = actor_or_return!(request);

    match service
        .engine()
        .assign_student_to_class(&actor, student_id, class_id)
        .await
    {
        Ok(outcome) => {
            let message = if outcome.changed {
                "Student added to class"
            } else {
                "Student is already a member of the class"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(outcome, message)))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn remove_student(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = actor_or_return!(request);

    match service
        .engine()
        .remove_student_from_class(&actor, student_id, class_id)
        .await
    {
        Ok(outcome) => {
            let message = match (outcome.status, &outcome.hook_error) {
                (RemovalStatus::NotMember, _) => "Student is not a member of the class",
                (RemovalStatus::Removed, Some(_)) => {
                    "Student removed from class, but the membership hook failed"
                }
                (RemovalStatus::Removed, None) => "Student removed from class",
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(outcome, message)))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

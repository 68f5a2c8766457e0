use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::errors::{Result, RosterError};
use crate::models::actors::entities::{ActorContext, Capability};
use crate::models::teachers::{entities::Teacher, requests::UpdateTeacherRequest};
use crate::models::ApiResponse;
use crate::services::{actor_or_return, error_response};

pub async fn update_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
    update_data: UpdateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let actor = actor_or_return!(request);

    match update(service, &actor, teacher_id, update_data).await {
        Ok(teacher) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            teacher,
            "Teacher updated successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn update(
    service: &TeacherService,
    actor: &ActorContext,
    teacher_id: i64,
    update_data: UpdateTeacherRequest,
) -> Result<Teacher> {
    service
        .engine()
        .authorize(actor, Capability::ManageTeachers)?;
    update_data.validate()?;
    service
        .engine()
        .storage()
        .update_teacher(teacher_id, update_data)
        .await?
        .ok_or_else(|| RosterError::not_found(format!("Teacher {teacher_id} not found")))
}

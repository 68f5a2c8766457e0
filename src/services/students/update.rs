use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::errors::{Result, RosterError};
use crate::models::actors::entities::{ActorContext, Capability};
use crate::models::students::{
    entities::Student,
    requests::{UpdateStudentRequest, UpdateStudentStatusRequest},
};
use crate::models::ApiResponse;
use crate::services::{actor_or_return, error_response};

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    update_data: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    let actor = actor_or_return!(request);

    match update(service, &actor, student_id, update_data).await {
        Ok(student) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student updated successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn update(
    service: &StudentService,
    actor: &ActorContext,
    student_id: i64,
    update_data: UpdateStudentRequest,
) -> Result<Student> {
    service
        .engine()
        .authorize(actor, Capability::ManageStudents)?;
    update_data.validate()?;
    service
        .engine()
        .storage()
        .update_student(student_id, update_data)
        .await?
        .ok_or_else(|| RosterError::not_found(format!("Student {student_id} not found")))
}

// 状态变更只走引擎，与成员关系无关
pub async fn update_student_status(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    status_data: UpdateStudentStatusRequest,
) -> ActixResult<HttpResponse> {
    let actor = actor_or_return!(request);

    match service
        .engine()
        .update_student_status(&actor, student_id, status_data.status)
        .await
    {
        Ok(student) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student status updated successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

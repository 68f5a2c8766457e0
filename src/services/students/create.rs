use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::errors::Result;
use crate::models::actors::entities::{ActorContext, Capability};
use crate::models::students::{entities::Student, requests::CreateStudentRequest};
use crate::models::ApiResponse;
use crate::services::{actor_or_return, error_response};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let actor = actor_or_return!(request);

    match create(service, &actor, student_data).await {
        Ok(student) => {
            info!("Student {} created by {}", student.id, actor.actor_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(student, "Student created successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

async fn create(
    service: &StudentService,
    actor: &ActorContext,
    student_data: CreateStudentRequest,
) -> Result<Student> {
    service
        .engine()
        .authorize(actor, Capability::ManageStudents)?;
    student_data.validate()?;
    service.engine().storage().create_student(student_data).await
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::errors::Result;
use crate::models::actors::entities::{ActorContext, Capability};
use crate::models::teachers::{entities::Teacher, requests::CreateTeacherRequest};
use crate::models::ApiResponse;
use crate::services::{actor_or_return, error_response};

pub async fn create_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_data: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let actor = actor_or_return!(request);

    match create(service, &actor, teacher_data).await {
        Ok(teacher) => {
            info!("Teacher {} created by {}", teacher.id, actor.actor_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(teacher, "Teacher created successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

async fn create(
    service: &TeacherService,
    actor: &ActorContext,
    teacher_data: CreateTeacherRequest,
) -> Result<Teacher> {
    service
        .engine()
        .authorize(actor, Capability::ManageTeachers)?;
    teacher_data.validate()?;
    service.engine().storage().create_teacher(teacher_data).await
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::errors::{Result, RosterError};
use crate::models::actors::entities::{ActorContext, Capability};
use crate::models::classes::{entities::Class, requests::CreateClassRequest};
use crate::models::ApiResponse;
use crate::services::{actor_or_return, error_response};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let actor = actor_or_return!(request);

    match create(service, &actor, class_data).await {
        Ok(class) => {
            info!("Class {} created by {}", class.id, actor.actor_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

async fn create(
    service: &ClassService,
    actor: &ActorContext,
    class_data: CreateClassRequest,
) -> Result<Class> {
    let engine = service.engine();
    engine.authorize(actor, Capability::ManageClasses)?;
    class_data.validate()?;

    // 创建时指定教师，需先确认教师存在
    if let Some(teacher_id) = class_data.teacher_id
        && !engine.storage().teacher_exists(teacher_id).await?
    {
        return Err(RosterError::not_found(format!(
            "Teacher {teacher_id} not found"
        )));
    }

    engine.storage().create_class(class_data).await
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::errors::{Result, RosterError};
use crate::models::actors::entities::{ActorContext, Capability};
use crate::models::classes::{entities::Class, requests::UpdateClassRequest};
use crate::models::ApiResponse;
use crate::services::{actor_or_return, error_response};

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    let actor = actor_or_return!(request);

    match update(service, &actor, class_id, update_data).await {
        Ok(class) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class updated successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn update(
    service: &ClassService,
    actor: &ActorContext,
    class_id: i64,
    update_data: UpdateClassRequest,
) -> Result<Class> {
    service
        .engine()
        .authorize(actor, Capability::ManageClasses)?;
    update_data.validate()?;
    service
        .engine()
        .storage()
        .update_class(class_id, update_data)
        .await?
        .ok_or_else(|| RosterError::not_found(format!("Class {class_id} not found")))
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::warn;

use crate::engine::BulkCoordinator;
use crate::errors::Result;
use crate::models::bulk::{
    entities::BulkResult,
    requests::{
        BulkAssignStudentsRequest, BulkAssignTeacherRequest, BulkDeleteKind, BulkDeleteRequest,
        BulkRemoveStudentsRequest,
    },
    responses::BulkResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{FlashStore, actor_or_return, error_response};

pub struct BulkService {
    coordinator: Arc<BulkCoordinator>,
    flash: Arc<FlashStore>,
}

impl BulkService {
    pub fn new(coordinator: Arc<BulkCoordinator>, flash: Arc<FlashStore>) -> Self {
        Self { coordinator, flash }
    }

    // 批量分配教师
    pub async fn assign_teacher(
        &self,
        request: &HttpRequest,
        body: BulkAssignTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = actor_or_return!(request);
        let result = self
            .coordinator
            .bulk_assign_teacher(&actor, body.teacher_id, &body.class_ids)
            .await;
        self.respond(result).await
    }

    // 批量加入学生
    pub async fn assign_students(
        &self,
        request: &HttpRequest,
        body: BulkAssignStudentsRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = actor_or_return!(request);
        let result = self
            .coordinator
            .bulk_assign_students(&actor, body.class_id, &body.student_ids)
            .await;
        self.respond(result).await
    }

    // 批量移出学生
    pub async fn remove_students(
        &self,
        request: &HttpRequest,
        body: BulkRemoveStudentsRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = actor_or_return!(request);
        let result = self
            .coordinator
            .bulk_remove_students(&actor, body.class_id, &body.student_ids)
            .await;
        self.respond(result).await
    }

    // 批量删除
    pub async fn delete(
        &self,
        request: &HttpRequest,
        kind: BulkDeleteKind,
        body: BulkDeleteRequest,
    ) -> ActixResult<HttpResponse> {
        let actor = actor_or_return!(request);
        let result = self.coordinator.bulk_delete(&actor, kind, &body.ids).await;
        self.respond(result).await
    }

    async fn respond(&self, result: Result<BulkResult>) -> ActixResult<HttpResponse> {
        let result = match result {
            Ok(result) => result,
            Err(e) => return Ok(error_response(&e)),
        };

        // 提示消息写入失败不影响批量结果本身
        let flash_token = match self.flash.publish(&result).await {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("Failed to publish flash message: {}", e);
                None
            }
        };

        let message = format!(
            "Bulk {} completed: {} succeeded, {} failed",
            result.operation, result.success_count, result.failure_count
        );
        let partial = !result.is_complete_success();
        let mut response = ApiResponse::success(
            BulkResponse {
                result,
                flash_token,
            },
            message,
        );
        if partial {
            response = response.with_code(ErrorCode::BulkPartialFailure);
        }

        Ok(HttpResponse::Ok().json(response))
    }
}

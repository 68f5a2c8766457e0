//! 业务服务层
//!
//! 服务在启动时构造并以 `web::Data` 注入，负责：取出操作者、请求参数校验、
//! 调用引擎或存储、把 `errors::Result` 转成统一的 HTTP 响应。

pub mod bulk;
pub mod classes;
pub mod flash;
pub mod students;
pub mod teachers;

pub use bulk::BulkService;
pub use classes::ClassService;
pub use flash::{FlashService, FlashStore};
pub use students::StudentService;
pub use teachers::TeacherService;

use actix_web::{HttpRequest, HttpResponse};
use tracing::error;

use crate::errors::RosterError;
use crate::middlewares::RequireJWT;
use crate::models::actors::entities::ActorContext;
use crate::models::{ApiResponse, ErrorCode};

/// 业务错误转为 HTTP 响应
pub(crate) fn error_response(err: &RosterError) -> HttpResponse {
    if err.status_code().is_server_error() {
        error!("{}", err.format_simple());
    }
    HttpResponse::build(err.status_code()).json(ApiResponse::from_error(err))
}

/// 从请求扩展中取出操作者，缺失时返回 401 响应
pub(crate) fn require_actor(request: &HttpRequest) -> Result<ActorContext, HttpResponse> {
    RequireJWT::extract_actor(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing actor",
        ))
    })
}

/// 取出操作者或提前返回
macro_rules! actor_or_return {
    ($request:expr) => {
        match $crate::services::require_actor($request) {
            Ok(actor) => actor,
            Err(resp) => return Ok(resp),
        }
    };
}

pub(crate) use actor_or_return;

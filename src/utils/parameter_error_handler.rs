use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::errors::RosterError;
use crate::models::ApiResponse;

fn bad_request(err: impl std::fmt::Display, what: &str) -> actix_web::Error {
    let roster_err = RosterError::validation(format!("Invalid {what}: {err}"));
    debug!("{}", roster_err.format_simple());
    InternalError::from_response(
        roster_err.message().to_string(),
        HttpResponse::BadRequest().json(ApiResponse::from_error(&roster_err)),
    )
    .into()
}

/// JSON 请求体解析失败时返回统一格式的 400
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(err, "request body")
}

/// 查询参数解析失败时返回统一格式的 400
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(err, "query parameters")
}

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::errors::RosterError;
use crate::models::ApiResponse;

fn reject(message: String) -> actix_web::Error {
    let err = RosterError::validation(message);
    InternalError::from_response(
        err.message().to_string(),
        HttpResponse::BadRequest().json(ApiResponse::from_error(&err)),
    )
    .into()
}

/// 从路径参数中解析正整数 ID
fn parse_positive_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| reject(format!("Missing path parameter '{name}'")))?;

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(reject(format!(
            "Path parameter '{name}' must be a positive integer, got '{raw}'"
        ))),
    }
}

/// 定义按名称读取路径参数的安全 ID 提取器
macro_rules! define_safe_i64_extractor {
    ($(#[$meta:meta])* $name:ident, $param:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(parse_positive_id(req, $param).map($name))
            }
        }
    };
}

define_safe_i64_extractor!(
    /// `{teacher_id}`
    SafeTeacherIdI64,
    "teacher_id"
);
define_safe_i64_extractor!(
    /// `{class_id}`
    SafeClassIdI64,
    "class_id"
);
define_safe_i64_extractor!(
    /// `{student_id}`
    SafeStudentIdI64,
    "student_id"
);

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_valid_id_is_extracted() {
        let req = TestRequest::default()
            .param("class_id", "42")
            .to_http_request();
        let id = SafeClassIdI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn test_non_positive_or_garbage_rejected() {
        for raw in ["0", "-5", "abc", "9999999999999999999999"] {
            let req = TestRequest::default()
                .param("student_id", raw)
                .to_http_request();
            assert!(SafeStudentIdI64::extract(&req).await.is_err(), "{raw}");
        }
    }

    #[actix_web::test]
    async fn test_missing_param_rejected() {
        let req = TestRequest::default().to_http_request();
        assert!(SafeTeacherIdI64::extract(&req).await.is_err());
    }
}

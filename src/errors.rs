//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、错误种类名称以及 HTTP 状态码映射。
//! `AlreadyAssigned` / `NotMember` 属于结果状态而非错误，见 `models::memberships`。

use std::fmt;

use actix_web::http::StatusCode;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_kind() 方法 - 返回对外暴露的错误种类
/// - status_code() 方法 - 返回对应的 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_roster_errors {
    ($(
        $variant:ident($code:literal, $kind:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum RosterError {
            $($variant(String),)*
        }

        impl RosterError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(RosterError::$variant(_) => $code,)*
                }
            }

            /// 获取错误种类名称
            pub fn error_kind(&self) -> &'static str {
                match self {
                    $(RosterError::$variant(_) => $kind,)*
                }
            }

            /// 获取对应的 HTTP 状态码
            pub fn status_code(&self) -> StatusCode {
                match self {
                    $(RosterError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(RosterError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl RosterError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        RosterError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_roster_errors! {
    NotFound("E001", "NotFound", NOT_FOUND),
    Validation("E002", "ValidationError", BAD_REQUEST),
    PermissionDenied("E003", "PermissionDenied", FORBIDDEN),
    Store("E004", "StoreError", INTERNAL_SERVER_ERROR),
    ExternalHook("E005", "ExternalHookError", BAD_GATEWAY),
    Authentication("E006", "AuthenticationError", UNAUTHORIZED),
    DatabaseConfig("E007", "DatabaseConfigError", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E008", "DatabaseConnectionError", INTERNAL_SERVER_ERROR),
    Serialization("E009", "SerializationError", INTERNAL_SERVER_ERROR),
    CacheConnection("E010", "CacheConnectionError", INTERNAL_SERVER_ERROR),
}

impl RosterError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_kind(), self.message())
    }

    /// 是否为单条目失败（批量操作中记录为 not_found / error，而不是中止整个调用）
    pub fn is_not_found(&self) -> bool {
        matches!(self, RosterError::NotFound(_))
    }
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for RosterError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for RosterError {
    fn from(err: sea_orm::DbErr) -> Self {
        RosterError::Store(err.to_string())
    }
}

impl From<std::io::Error> for RosterError {
    fn from(err: std::io::Error) -> Self {
        RosterError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        RosterError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;

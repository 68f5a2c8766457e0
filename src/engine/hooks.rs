//! 成员关系钩子
//!
//! 成员关系删除成功后同步调用；失败只作为警告返回，不回滚删除。

use async_trait::async_trait;
use tracing::info;

use crate::errors::{Result, RosterError};

#[async_trait]
pub trait MembershipHook: Send + Sync {
    async fn on_membership_removed(&self, student_id: i64, class_id: i64) -> Result<()>;
}

/// 写一条结构化日志（默认实现）
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMembershipHook;

#[async_trait]
impl MembershipHook for LoggingMembershipHook {
    async fn on_membership_removed(&self, student_id: i64, class_id: i64) -> Result<()> {
        info!(
            target: "roster::membership",
            student_id,
            class_id,
            "membership removed"
        );
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMembershipHook;

#[async_trait]
impl MembershipHook for NoopMembershipHook {
    async fn on_membership_removed(&self, _student_id: i64, _class_id: i64) -> Result<()> {
        Ok(())
    }
}

/// 根据 `hooks.membership_removed` 配置选择实现
pub fn membership_hook_from_config(name: &str) -> Result<std::sync::Arc<dyn MembershipHook>> {
    match name {
        "log" => Ok(std::sync::Arc::new(LoggingMembershipHook)),
        "noop" | "none" => Ok(std::sync::Arc::new(NoopMembershipHook)),
        other => Err(RosterError::validation(format!(
            "Unknown membership hook '{other}'. Supported: log, noop"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builtin_hooks_succeed() {
        assert!(LoggingMembershipHook.on_membership_removed(1, 2).await.is_ok());
        assert!(NoopMembershipHook.on_membership_removed(1, 2).await.is_ok());
    }

    #[test]
    fn test_hook_from_config() {
        assert!(membership_hook_from_config("log").is_ok());
        assert!(membership_hook_from_config("noop").is_ok());
        let err = membership_hook_from_config("webhook").err().unwrap();
        assert_eq!(err.error_kind(), "ValidationError");
    }
}

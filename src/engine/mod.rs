//! 关系分配引擎与批量协调器
//!
//! 调用链：权限门控 → 批量协调器 → 分配引擎 → 存储层。

pub mod access;
pub mod assignment;
pub mod bulk;
pub mod hooks;
pub mod locks;

#[cfg(test)]
pub(crate) mod test_utils;

pub use access::{PermissionGate, RolePermissionGate};
pub use assignment::AssignmentEngine;
pub use bulk::BulkCoordinator;
pub use hooks::{
    LoggingMembershipHook, MembershipHook, NoopMembershipHook, membership_hook_from_config,
};
pub use locks::ClassLocks;

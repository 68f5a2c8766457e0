use actix_web::web;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::{ObjectCache, create_cache};
use crate::config::AppConfig;
use crate::engine::{
    AssignmentEngine, BulkCoordinator, MembershipHook, RolePermissionGate,
    membership_hook_from_config,
};
use crate::services::{
    BulkService, ClassService, FlashService, FlashStore, StudentService, TeacherService,
};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

/// 注入到 actix `App` 的全部服务
#[derive(Clone)]
pub struct ServiceContext {
    pub teachers: web::Data<TeacherService>,
    pub classes: web::Data<ClassService>,
    pub students: web::Data<StudentService>,
    pub bulk: web::Data<BulkService>,
    pub flash: web::Data<FlashService>,
}

impl ServiceContext {
    /// 组装引擎与服务，各服务共享同一个引擎实例
    pub fn assemble(
        storage: Arc<dyn Storage>,
        cache: Arc<dyn ObjectCache>,
        hook: Arc<dyn MembershipHook>,
        max_batch_size: usize,
        flash_ttl_secs: u64,
    ) -> Self {
        let engine = Arc::new(AssignmentEngine::new(
            storage,
            Arc::new(RolePermissionGate),
            hook,
        ));
        let coordinator = Arc::new(BulkCoordinator::new(engine.clone(), max_batch_size));
        let flash_store = Arc::new(FlashStore::new(cache, flash_ttl_secs));

        Self {
            teachers: web::Data::new(TeacherService::new(engine.clone())),
            classes: web::Data::new(ClassService::new(engine.clone())),
            students: web::Data::new(StudentService::new(engine)),
            bulk: web::Data::new(BulkService::new(coordinator, flash_store.clone())),
            flash: web::Data::new(FlashService::new(flash_store)),
        }
    }
}

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub services: ServiceContext,
    pub jwt: web::Data<JwtUtils>,
}

/// 准备服务器启动的上下文
/// 包括存储、缓存、引擎与服务
pub async fn prepare_server_startup(config: &AppConfig) -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let cache = create_cache(config);
    warn!("Cache backend initialized");

    let hook = membership_hook_from_config(&config.hooks.membership_removed)
        .expect("Failed to create membership hook");
    debug!(
        "Membership removal hook: {}",
        config.hooks.membership_removed
    );

    let services = ServiceContext::assemble(
        storage.clone(),
        cache.clone(),
        hook,
        config.bulk.max_batch_size,
        config.flash.ttl_secs,
    );
    warn!(
        "Assignment engine ready (max batch size {})",
        config.bulk.max_batch_size
    );

    StartupContext {
        storage,
        cache,
        services,
        jwt: web::Data::new(JwtUtils::from_config(config)),
    }
}

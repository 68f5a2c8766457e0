//! Roster - 班级名册管理后端服务
//!
//! 基于 Actix Web 构建，负责教师、班级、学生之间的分配关系与批量操作。
//!
//! # 架构
//! - `cache`: 缓存层（Moka），承载一次性提示消息
//! - `config`: 配置管理
//! - `engine`: 分配引擎与批量协调器
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: HTTP 服务层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod engine;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;

use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    #[serde(default)]
    pub bulk: BulkConfig,
    #[serde(default)]
    pub hooks: HooksConfig,
    #[serde(default)]
    pub flash: FlashConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub secret: String,
    pub access_token_expiry: i64,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// 缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub default_ttl: u64,
    pub max_capacity: u64,
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub max_age: usize,
}

/// 批量操作配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkConfig {
    pub max_batch_size: usize, // 单次批量请求允许的最大目标数
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 500,
        }
    }
}

/// 外部钩子配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HooksConfig {
    pub membership_removed: String, // "log" | "noop" | "none"
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            membership_removed: "log".to_string(),
        }
    }
}

/// 一次性提示消息配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashConfig {
    pub ttl_secs: u64, // 过期前未取出即丢弃
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self { ttl_secs: 120 }
    }
}

use config::{
    Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, builder::DefaultState,
};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

// 成员移除钩子的可选实现
const KNOWN_MEMBERSHIP_HOOKS: &[&str] = &["log", "noop", "none"];

impl AppConfig {
    /// 加载配置：config.toml → config.{APP_ENV}.toml → ROSTER__* → 常用环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{app_env}")).required(false))
            .add_source(
                Environment::with_prefix("ROSTER")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::finish(Self::with_env_overrides(builder)?)
    }

    /// 从 TOML 文本加载（不读取环境变量）
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::finish(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn with_env_overrides(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let overrides = [
            ("app.environment", "APP_ENV"),
            ("app.log_level", "RUST_LOG"),
            ("server.host", "SERVER_HOST"),
            ("server.port", "SERVER_PORT"),
            ("server.unix_socket_path", "UNIX_SOCKET"),
            ("server.workers", "CPU_COUNT"),
            ("jwt.secret", "JWT_SECRET"),
            ("database.url", "DATABASE_URL"),
            ("bulk.max_batch_size", "BULK_MAX_BATCH_SIZE"),
        ];

        overrides
            .into_iter()
            .try_fold(builder, |builder, (key, var)| {
                builder.set_override_option(key, std::env::var(var).ok())
            })
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;

        // 0 表示按 CPU 核数，且不超过 max_workers
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        app_config.validate()?;
        Ok(app_config)
    }

    /// 校验与业务相关的取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bulk.max_batch_size == 0 {
            return Err(ConfigError::Message(
                "bulk.max_batch_size must be greater than zero".to_string(),
            ));
        }
        if self.flash.ttl_secs == 0 {
            return Err(ConfigError::Message(
                "flash.ttl_secs must be greater than zero".to_string(),
            ));
        }
        if !KNOWN_MEMBERSHIP_HOOKS.contains(&self.hooks.membership_removed.as_str()) {
            return Err(ConfigError::Message(format!(
                "Unknown hooks.membership_removed '{}', expected one of: {}",
                self.hooks.membership_removed,
                KNOWN_MEMBERSHIP_HOOKS.join(", ")
            )));
        }
        if self.jwt.access_token_expiry <= 0 {
            return Err(ConfigError::Message(
                "jwt.access_token_expiry must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

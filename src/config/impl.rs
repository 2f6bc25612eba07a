use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 默认向量后端：启用 fastembed 特性时使用真实模型
const DEFAULT_EMBEDDING_BACKEND: &str = if cfg!(feature = "fastembed") {
    "fastembed"
} else {
    "hashing"
};

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 内置默认值，保证没有配置文件时也能运行
            .set_default("app.system_name", "LMS AI Pipeline")?
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("database.url", "lms.db")?
            .set_default("database.pool_size", 10_i64)?
            .set_default("database.timeout", 30_i64)?
            .set_default("cache.default_ttl", 3600_i64)?
            .set_default("cache.memory.max_capacity", 10_000_i64)?
            .set_default("embedding.backend", DEFAULT_EMBEDDING_BACKEND)?
            .set_default("embedding.model_cache_dir", "")?
            .set_default("embedding.max_input_chars", 512_i64)?
            .set_default("embedding.timeout_ms", 30_000_i64)?
            .set_default("embedding.load_timeout_ms", 120_000_i64)?
            .set_default("embedding.dimension", 384_i64)?
            .set_default("embedding.warm_up", false)?
            .set_default("plagiarism.match_threshold", 0.75)?
            .set_default("plagiarism.flag_threshold", 85_i64)?
            .set_default("plagiarism.snippet_chars", 200_i64)?
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("LMSAI")
                    .separator("__")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option(
                "embedding.backend",
                std::env::var("EMBEDDING_BACKEND").ok(),
            )?
            .set_override_option(
                "embedding.model_cache_dir",
                std::env::var("EMBEDDING_CACHE_DIR").ok(),
            )?;

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// 校验取值范围
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.plagiarism.match_threshold) {
            return Err(ConfigError::Message(format!(
                "plagiarism.match_threshold must be within [0, 1], got {}",
                self.plagiarism.match_threshold
            )));
        }
        if !(0..=100).contains(&self.plagiarism.flag_threshold) {
            return Err(ConfigError::Message(format!(
                "plagiarism.flag_threshold must be within [0, 100], got {}",
                self.plagiarism.flag_threshold
            )));
        }
        if self.embedding.timeout_ms == 0 || self.embedding.load_timeout_ms == 0 {
            return Err(ConfigError::Message(
                "embedding.timeout_ms and embedding.load_timeout_ms must be positive".to_string(),
            ));
        }
        if self.embedding.max_input_chars == 0 {
            return Err(ConfigError::Message(
                "embedding.max_input_chars must be positive".to_string(),
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
        dotenv::dotenv().ok();
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }
}

use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub embedding: EmbeddingConfig,
    pub plagiarism: PlagiarismConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型，memory:// 为内存存储）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// 缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub default_ttl: u64,
    pub memory: MemoryConfig,
}

/// 内存缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub max_capacity: u64,
}

/// 向量模型配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub backend: String,         // 后端名称：fastembed / hashing
    pub model_cache_dir: String, // 模型文件缓存目录，空字符串表示使用默认目录
    pub max_input_chars: usize,  // 编码前截断的字符数
    pub timeout_ms: u64,         // 单次编码超时 (毫秒)
    pub load_timeout_ms: u64,    // 模型加载超时 (毫秒)，首次运行可能需要下载
    pub dimension: usize,        // hashing 后端的向量维度
    pub warm_up: bool,           // 启动时是否预加载模型
}

/// 查重配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlagiarismConfig {
    pub match_threshold: f64, // 进入报告的相似度下限（0..1）
    pub flag_threshold: i32,  // 标记为疑似抄袭的百分比下限（0..100）
    pub snippet_chars: usize, // 报告中保留的匹配内容长度
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: "hashing".to_string(),
            model_cache_dir: String::new(),
            max_input_chars: 512,
            timeout_ms: 30_000,
            load_timeout_ms: 120_000,
            dimension: 384,
            warm_up: false,
        }
    }
}

impl Default for PlagiarismConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.75,
            flag_threshold: 85,
            snippet_chars: 200,
        }
    }
}

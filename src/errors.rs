//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 同时区分「基础设施错误」（存储/配置不可用，需要向调用方传播）
//! 与「流水线逻辑错误」（空输入、模型失败等，只影响单个分支）。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_pipeline_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum PipelineError {
            $($variant(String),)*
        }

        impl PipelineError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PipelineError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PipelineError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PipelineError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PipelineError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PipelineError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_pipeline_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Serialization("E004", "Serialization Error"),
    Configuration("E005", "Configuration Error"),
    Validation("E007", "Validation Error"),
    EmbeddingBackendNotFound("E009", "Embedding Backend Not Found"),
    EmptyInput("E101", "Empty Input Error"),
    EmbeddingGeneration("E102", "Embedding Generation Error"),
    DimensionMismatch("E103", "Dimension Mismatch Error"),
    VectorDecode("E104", "Vector Decode Error"),
    AssignmentNotFound("E105", "Assignment Not Found"),
}

impl PipelineError {
    /// 是否为基础设施错误
    ///
    /// 基础设施错误会从 `process()` 向上传播；其余错误在分支内部吸收。
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            PipelineError::DatabaseConfig(_)
                | PipelineError::DatabaseConnection(_)
                | PipelineError::DatabaseOperation(_)
                | PipelineError::Serialization(_)
                | PipelineError::Configuration(_)
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PipelineError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PipelineError {
    fn from(err: sea_orm::DbErr) -> Self {
        PipelineError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for PipelineError {
    fn from(err: config::ConfigError) -> Self {
        PipelineError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

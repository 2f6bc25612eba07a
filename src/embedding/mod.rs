//! 文本向量化
//!
//! - `service`: 对外入口 `EmbeddingService`，负责预处理、懒加载模型、超时控制
//! - `backend`/`register`: 模型后端 trait 与按名称注册的加载器
//! - `codec`: 向量的持久化格式
//! - `backends`: fastembed（ONNX 句向量模型）与 hashing（离线确定性实现）

pub mod backend;
pub mod backends;
pub mod codec;
pub mod preprocess;
pub mod register;
pub mod service;
pub mod vector;

pub use backend::EmbeddingBackend;
pub use service::EmbeddingService;
pub use vector::EmbeddingVector;

//! 缓存
//!
//! 目前只缓存解码后的提交向量。向量写入后不再变化，
//! 重新向量化同一提交时由编排器负责失效。

pub mod vector_cache;

pub use vector_cache::VectorCache;

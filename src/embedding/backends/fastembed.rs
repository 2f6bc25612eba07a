//! fastembed 句向量后端
//!
//! 使用 AllMiniLML6V2（384 维，mean pooling 后单位化）。
//! `TextEmbedding::embed` 需要 `&mut self`，因此放在 Mutex 中。

use std::path::PathBuf;
use std::sync::Mutex;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::{info, warn};

use crate::config::EmbeddingConfig;
use crate::embedding::EmbeddingBackend;
use crate::errors::{PipelineError, Result};

pub const BACKEND_NAME: &str = "fastembed";

pub struct FastEmbedBackend {
    model: Mutex<TextEmbedding>,
}

impl FastEmbedBackend {
    /// 加载模型（首次使用时可能需要下载模型文件）
    pub fn load(config: &EmbeddingConfig) -> Result<Self> {
        let mut options =
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false);
        if !config.model_cache_dir.is_empty() {
            options = options.with_cache_dir(PathBuf::from(&config.model_cache_dir));
        }

        let started = std::time::Instant::now();
        let model = TextEmbedding::try_new(options).map_err(|e| {
            warn!("Failed to load AllMiniLML6V2: {}", e);
            PipelineError::embedding_generation(format!("模型加载失败: {e}"))
        })?;
        info!(
            "AllMiniLML6V2 loaded in {} ms",
            started.elapsed().as_millis()
        );

        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl EmbeddingBackend for FastEmbedBackend {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| PipelineError::embedding_generation("embedding model mutex poisoned"))?;
        let mut embeddings = model
            .embed(vec![text], None)
            .map_err(|e| PipelineError::embedding_generation(format!("模型推理失败: {e}")))?;
        embeddings
            .pop()
            .ok_or_else(|| PipelineError::embedding_generation("model returned no embedding"))
    }
}

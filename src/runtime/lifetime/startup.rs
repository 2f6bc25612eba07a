use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::VectorCache;
use crate::config::AppConfig;
use crate::embedding::{EmbeddingService, register::debug_embedding_backend_registry};
use crate::errors::Result;
use crate::services::SubmissionAiService;
use crate::storage::{Storage, create_storage};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub embedder: Arc<EmbeddingService>,
    pub service: Arc<SubmissionAiService>,
}

/// 创建向量服务，按配置预加载模型
async fn create_embedder(config: &AppConfig) -> Result<Arc<EmbeddingService>> {
    let embedding = &config.embedding;
    warn!("Attempting to create {} embedding backend", embedding.backend);

    let embedder = EmbeddingService::from_config(embedding)?;
    if embedding.warm_up {
        embedder.warm_up().await?;
        warn!("Embedding backend '{}' loaded", embedding.backend);
    } else {
        debug!(
            "Embedding backend '{}' will be loaded on first use",
            embedding.backend
        );
    }
    Ok(Arc::new(embedder))
}

/// 按给定配置组装流水线
pub async fn prepare_pipeline_startup_with(config: &AppConfig) -> Result<StartupContext> {
    if cfg!(debug_assertions) {
        debug_embedding_backend_registry();
        debug!("Debug mode: Embedding backend registry is enabled");
    }

    let storage = create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    let embedder = create_embedder(config).await?;

    let vector_cache = VectorCache::new(&config.cache);
    let service = Arc::new(SubmissionAiService::new(
        storage.clone(),
        embedder.clone(),
        vector_cache,
        config.plagiarism.clone(),
    ));
    warn!(
        "Submission AI pipeline ready (match threshold {}, flag threshold {}%)",
        config.plagiarism.match_threshold, config.plagiarism.flag_threshold
    );

    Ok(StartupContext {
        storage,
        embedder,
        service,
    })
}

/// 使用全局配置组装流水线
pub async fn prepare_pipeline_startup() -> Result<StartupContext> {
    prepare_pipeline_startup_with(AppConfig::get()).await
}

//! 向量服务
//!
//! 应用启动时构造一次并注入编排器。模型在第一次调用时加载，
//! 之后在整个进程内共享；并发的首次调用只会触发一次加载。

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::{debug, warn};

use super::register::{EmbeddingBackendLoader, get_embedding_backend_loader};
use super::{EmbeddingBackend, EmbeddingVector, preprocess::preprocess};
use crate::config::EmbeddingConfig;
use crate::errors::{PipelineError, Result};

pub struct EmbeddingService {
    config: EmbeddingConfig,
    loader: EmbeddingBackendLoader,
    backend: OnceCell<Arc<dyn EmbeddingBackend>>,
}

impl EmbeddingService {
    /// 根据配置中的后端名称创建服务（不加载模型）
    pub fn from_config(config: &EmbeddingConfig) -> Result<Self> {
        let loader = get_embedding_backend_loader(&config.backend).ok_or_else(|| {
            PipelineError::embedding_backend_not_found(format!(
                "Embedding backend '{}' not found in registry",
                config.backend
            ))
        })?;
        Ok(Self::with_loader(config.clone(), loader))
    }

    pub fn with_loader(config: EmbeddingConfig, loader: EmbeddingBackendLoader) -> Self {
        Self {
            config,
            loader,
            backend: OnceCell::new(),
        }
    }

    /// 使用已加载的后端
    pub fn with_backend(config: EmbeddingConfig, backend: Arc<dyn EmbeddingBackend>) -> Self {
        let preloaded = backend.clone();
        Self {
            config,
            loader: Arc::new(move |_: &EmbeddingConfig| -> Result<Arc<dyn EmbeddingBackend>> {
                Ok(preloaded.clone())
            }),
            backend: OnceCell::new_with(Some(backend)),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.backend.initialized()
    }

    /// 预加载模型
    pub async fn warm_up(&self) -> Result<()> {
        self.backend().await.map(|_| ())
    }

    /// 获取（必要时加载）模型后端
    async fn backend(&self) -> Result<Arc<dyn EmbeddingBackend>> {
        let backend = self.backend.get_or_try_init(|| self.load_backend()).await?;
        Ok(backend.clone())
    }

    async fn load_backend(&self) -> Result<Arc<dyn EmbeddingBackend>> {
        let loader = self.loader.clone();
        let config = self.config.clone();
        warn!("Loading embedding backend '{}'", config.backend);

        // 模型加载是阻塞操作；超时后阻塞线程仍会跑完，但结果被丢弃，下次调用重新加载
        let timeout = Duration::from_millis(self.config.load_timeout_ms);
        let task = tokio::task::spawn_blocking(move || loader(&config));
        match tokio::time::timeout(timeout, task).await {
            Err(_) => Err(PipelineError::embedding_generation(format!(
                "loading embedding backend '{}' timed out after {} ms",
                self.config.backend, self.config.load_timeout_ms
            ))),
            Ok(Err(join_error)) => Err(PipelineError::embedding_generation(format!(
                "模型加载任务异常: {join_error}"
            ))),
            Ok(Ok(loaded)) => loaded.map_err(into_generation_error),
        }
    }

    /// 生成文本向量
    ///
    /// - 预处理后为空：`EmptyInput`
    /// - 模型加载/推理失败或超时：`EmbeddingGeneration`（加载与推理各有独立的超时）
    pub async fn embed(&self, text: &str) -> Result<EmbeddingVector> {
        let prepared = preprocess(text, self.config.max_input_chars);
        if prepared.is_empty() {
            return Err(PipelineError::empty_input(
                "text is empty after whitespace normalization",
            ));
        }

        let backend = self.backend().await?;
        let backend_name = backend.name().to_string();
        let timeout = Duration::from_millis(self.config.timeout_ms);
        let task = tokio::task::spawn_blocking(move || backend.encode(&prepared));

        let raw = match tokio::time::timeout(timeout, task).await {
            Err(_) => {
                return Err(PipelineError::embedding_generation(format!(
                    "embedding backend '{backend_name}' timed out after {} ms",
                    self.config.timeout_ms
                )));
            }
            Ok(Err(join_error)) => {
                return Err(PipelineError::embedding_generation(format!(
                    "embedding task failed: {join_error}"
                )));
            }
            Ok(Ok(result)) => result.map_err(into_generation_error)?,
        };

        if raw.is_empty() || raw.iter().any(|x| !x.is_finite()) {
            return Err(PipelineError::embedding_generation(format!(
                "embedding backend '{backend_name}' returned an invalid vector"
            )));
        }

        let vector = EmbeddingVector::new(raw).normalized();
        debug!(
            "Generated {}-dimensional embedding with backend '{}'",
            vector.dimension(),
            backend_name
        );
        Ok(vector)
    }
}

/// 模型相关的失败统一归为 `EmbeddingGeneration`
fn into_generation_error(e: PipelineError) -> PipelineError {
    match e {
        PipelineError::EmbeddingGeneration(_) => e,
        other => PipelineError::embedding_generation(other.to_string()),
    }
}

impl std::fmt::Debug for EmbeddingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingService")
            .field("backend", &self.config.backend)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::backends::hashing::HashingBackend;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_config() -> EmbeddingConfig {
        EmbeddingConfig {
            backend: "hashing".to_string(),
            dimension: 32,
            timeout_ms: 2_000,
            ..EmbeddingConfig::default()
        }
    }

    struct FailingBackend;

    impl EmbeddingBackend for FailingBackend {
        fn name(&self) -> &str {
            "failing"
        }

        fn encode(&self, _text: &str) -> Result<Vec<f32>> {
            Err(PipelineError::validation("onnx session crashed"))
        }
    }

    struct SlowBackend;

    impl EmbeddingBackend for SlowBackend {
        fn name(&self) -> &str {
            "slow"
        }

        fn encode(&self, _text: &str) -> Result<Vec<f32>> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(vec![1.0])
        }
    }

    struct NanBackend;

    impl EmbeddingBackend for NanBackend {
        fn name(&self) -> &str {
            "nan"
        }

        fn encode(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![f32::NAN, 1.0])
        }
    }

    #[tokio::test]
    async fn test_empty_input_rejected() {
        let service = EmbeddingService::from_config(&test_config()).unwrap();
        for input in ["", "   ", "\n\t  \n"] {
            let err = service.embed(input).await.unwrap_err();
            assert!(matches!(err, PipelineError::EmptyInput(_)));
        }
        // 空输入不会触发模型加载
        assert!(!service.is_loaded());
    }

    #[tokio::test]
    async fn test_same_text_same_vector() {
        let service = EmbeddingService::from_config(&test_config()).unwrap();
        let a = service.embed("Rust ownership rules").await.unwrap();
        let b = service.embed("  Rust   ownership\nrules ").await.unwrap();
        assert_eq!(a, b);
        assert!((a.norm() - 1.0).abs() < 1e-5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_calls_load_once() {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = loads.clone();
        let loader: EmbeddingBackendLoader =
            Arc::new(move |config: &EmbeddingConfig| -> Result<Arc<dyn EmbeddingBackend>> {
                counter.fetch_add(1, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(50));
                Ok(Arc::new(HashingBackend::new(config.dimension)?))
            });
        let service = Arc::new(EmbeddingService::with_loader(test_config(), loader));

        let mut handles = Vec::new();
        for i in 0..8 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.embed(&format!("submission number {i}")).await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_backend_failure_is_wrapped() {
        let service = EmbeddingService::with_backend(test_config(), Arc::new(FailingBackend));
        let err = service.embed("some text").await.unwrap_err();
        assert!(matches!(err, PipelineError::EmbeddingGeneration(_)));
        assert!(err.message().contains("onnx session crashed"));
    }

    #[tokio::test]
    async fn test_timeout_is_embedding_failure() {
        let config = EmbeddingConfig {
            timeout_ms: 20,
            ..test_config()
        };
        let service = EmbeddingService::with_backend(config, Arc::new(SlowBackend));
        let err = service.embed("some text").await.unwrap_err();
        assert!(matches!(err, PipelineError::EmbeddingGeneration(_)));
        assert!(err.message().contains("timed out"));
    }

    #[tokio::test]
    async fn test_non_finite_output_rejected() {
        let service = EmbeddingService::with_backend(test_config(), Arc::new(NanBackend));
        assert!(matches!(
            service.embed("text").await.unwrap_err(),
            PipelineError::EmbeddingGeneration(_)
        ));
    }

    #[tokio::test]
    async fn test_load_failure_retried_on_next_call() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();
        let loader: EmbeddingBackendLoader =
            Arc::new(move |config: &EmbeddingConfig| -> Result<Arc<dyn EmbeddingBackend>> {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    return Err(PipelineError::database_connection("model hub unreachable"));
                }
                Ok(Arc::new(HashingBackend::new(config.dimension)?))
            });
        let service = EmbeddingService::with_loader(test_config(), loader);

        let err = service.embed("first").await.unwrap_err();
        assert!(matches!(err, PipelineError::EmbeddingGeneration(_)));
        assert!(service.embed("second").await.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_load_timeout_is_embedding_failure() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();
        let loader: EmbeddingBackendLoader =
            Arc::new(move |config: &EmbeddingConfig| -> Result<Arc<dyn EmbeddingBackend>> {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    std::thread::sleep(Duration::from_millis(500));
                }
                Ok(Arc::new(HashingBackend::new(config.dimension)?))
            });
        let config = EmbeddingConfig {
            load_timeout_ms: 50,
            ..test_config()
        };
        let service = EmbeddingService::with_loader(config, loader);

        let started = std::time::Instant::now();
        let err = service.embed("some text").await.unwrap_err();
        assert!(started.elapsed() < Duration::from_millis(400));
        assert!(matches!(err, PipelineError::EmbeddingGeneration(_)));
        assert!(err.message().contains("timed out"));
        assert!(!service.is_loaded());

        // 下一次调用重新加载
        assert!(service.embed("some text").await.is_ok());
        assert!(service.is_loaded());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unknown_backend() {
        let config = EmbeddingConfig {
            backend: "word2vec".to_string(),
            ..EmbeddingConfig::default()
        };
        let err = EmbeddingService::from_config(&config).unwrap_err();
        assert!(matches!(err, PipelineError::EmbeddingBackendNotFound(_)));
    }
}

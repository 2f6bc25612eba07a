use crate::config::EmbeddingConfig;
use crate::embedding::EmbeddingBackend;
use crate::errors::Result;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

pub type EmbeddingBackendLoader =
    Arc<dyn Fn(&EmbeddingConfig) -> Result<Arc<dyn EmbeddingBackend>> + Send + Sync>;

static EMBEDDING_BACKEND_REGISTRY: Lazy<RwLock<HashMap<String, EmbeddingBackendLoader>>> =
    Lazy::new(|| RwLock::new(builtin_backends()));

/// 内置后端
fn builtin_backends() -> HashMap<String, EmbeddingBackendLoader> {
    let mut registry: HashMap<String, EmbeddingBackendLoader> = HashMap::new();

    registry.insert(
        super::backends::hashing::BACKEND_NAME.to_string(),
        Arc::new(|config: &EmbeddingConfig| -> Result<Arc<dyn EmbeddingBackend>> {
            let backend = super::backends::hashing::HashingBackend::load(config)?;
            Ok(Arc::new(backend))
        }),
    );

    #[cfg(feature = "fastembed")]
    registry.insert(
        super::backends::fastembed::BACKEND_NAME.to_string(),
        Arc::new(|config: &EmbeddingConfig| -> Result<Arc<dyn EmbeddingBackend>> {
            let backend = super::backends::fastembed::FastEmbedBackend::load(config)?;
            Ok(Arc::new(backend))
        }),
    );

    registry
}

pub fn register_embedding_backend<S: Into<String>>(name: S, loader: EmbeddingBackendLoader) {
    let name = name.into();
    let mut registry = EMBEDDING_BACKEND_REGISTRY
        .write()
        .expect("Embedding backend registry lock poisoned");
    registry.insert(name, loader);
}

pub fn get_embedding_backend_loader(name: &str) -> Option<EmbeddingBackendLoader> {
    EMBEDDING_BACKEND_REGISTRY
        .read()
        .expect("Embedding backend registry lock poisoned")
        .get(name)
        .cloned()
}

pub fn debug_embedding_backend_registry() {
    let registry = EMBEDDING_BACKEND_REGISTRY
        .read()
        .expect("Embedding backend registry lock poisoned");
    if registry.is_empty() {
        tracing::debug!("No embedding backends registered.");
    } else {
        tracing::debug!("Registered embedding backends:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantBackend;

    impl EmbeddingBackend for ConstantBackend {
        fn name(&self) -> &str {
            "constant"
        }

        fn encode(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }
    }

    #[test]
    fn test_hashing_backend_is_builtin() {
        assert!(get_embedding_backend_loader("hashing").is_some());
        assert!(get_embedding_backend_loader("does-not-exist").is_none());
    }

    #[test]
    fn test_register_custom_backend() {
        register_embedding_backend(
            "constant-test",
            Arc::new(|_: &EmbeddingConfig| -> Result<Arc<dyn EmbeddingBackend>> {
                Ok(Arc::new(ConstantBackend))
            }),
        );
        let loader = get_embedding_backend_loader("constant-test").unwrap();
        let backend = loader(&EmbeddingConfig::default()).unwrap();
        assert_eq!(backend.encode("anything").unwrap(), vec![1.0, 0.0]);
    }
}

use crate::errors::Result;

/// 向量模型后端
///
/// `encode` 是阻塞调用，由 `EmbeddingService` 放到阻塞线程池执行。
pub trait EmbeddingBackend: Send + Sync {
    /// 后端名称，用于日志
    fn name(&self) -> &str;

    /// 编码单段已预处理的文本
    fn encode(&self, text: &str) -> Result<Vec<f32>>;
}

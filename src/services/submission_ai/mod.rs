//! 提交 AI 处理编排
//!
//! 每份提交调用一次 `process`：
//! - 查重分支：向量化 → 写入向量 → 与同作业其他提交比较 → 写入查重报告
//! - 评分分支：读取作业评分细则 → 启发式评分 → 写入 AI 评分
//!
//! 两个分支互不依赖，并发执行。分支内的逻辑失败（空内容、模型失败、作业不存在）
//! 只会让对应字段缺失；存储失败向调用方传播。

mod grading;
mod plagiarism;

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::cache::VectorCache;
use crate::config::PlagiarismConfig;
use crate::embedding::EmbeddingService;
use crate::errors::Result;
use crate::models::ai::responses::SubmissionAiResult;
use crate::storage::Storage;

pub struct SubmissionAiService {
    storage: Arc<dyn Storage>,
    embedder: Arc<EmbeddingService>,
    vector_cache: VectorCache,
    settings: PlagiarismConfig,
}

impl SubmissionAiService {
    pub fn new(
        storage: Arc<dyn Storage>,
        embedder: Arc<EmbeddingService>,
        vector_cache: VectorCache,
        settings: PlagiarismConfig,
    ) -> Self {
        Self {
            storage,
            embedder,
            vector_cache,
            settings,
        }
    }

    pub(crate) fn get_storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }

    pub fn settings(&self) -> &PlagiarismConfig {
        &self.settings
    }

    /// 处理一份提交，返回查重报告与 AI 评分（均可缺失）
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    pub async fn process(
        &self,
        submission_id: i64,
        content: &str,
        assignment_id: i64,
    ) -> Result<SubmissionAiResult> {
        let (plagiarism_report, ai_grade) = futures_util::future::join(
            plagiarism::check_plagiarism(self, submission_id, content, assignment_id),
            grading::grade_submission(self, submission_id, content, assignment_id),
        )
        .await;

        let result = SubmissionAiResult {
            plagiarism_report: settle("plagiarism", submission_id, plagiarism_report)?,
            ai_grade: settle("grading", submission_id, ai_grade)?,
        };

        info!(
            "Submission {} processed: plagiarism report {}, AI grade {}",
            submission_id,
            if result.plagiarism_report.is_some() { "created" } else { "skipped" },
            if result.ai_grade.is_some() { "created" } else { "skipped" },
        );
        Ok(result)
    }
}

/// 基础设施错误向上传播，其余错误只让该分支的结果缺失
fn settle<T>(branch: &str, submission_id: i64, outcome: Result<Option<T>>) -> Result<Option<T>> {
    match outcome {
        Ok(value) => Ok(value),
        Err(e) if e.is_infrastructure() => Err(e),
        Err(e) => {
            warn!(
                "Skipping {} result for submission {}: [{}] {}",
                branch,
                submission_id,
                e.code(),
                e.message()
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PipelineError;

    #[test]
    fn test_settle_propagates_only_infrastructure_errors() {
        let absorbed: Result<Option<i32>> = Err(PipelineError::validation("score out of range"));
        assert_eq!(settle("grading", 1, absorbed).unwrap(), None);

        let propagated: Result<Option<i32>> = Err(PipelineError::database_operation("disk full"));
        assert!(matches!(
            settle("grading", 1, propagated),
            Err(PipelineError::DatabaseOperation(_))
        ));

        assert_eq!(settle("plagiarism", 1, Ok(Some(7))).unwrap(), Some(7));
    }
}

use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    grades::{entities::Grade, requests::CreateGradeRequest},
    plagiarism::{entities::PlagiarismReport, requests::CreatePlagiarismReportRequest},
    submissions::{
        entities::{EmbeddedSubmission, Submission},
        requests::CreateSubmissionRequest,
    },
};

use crate::errors::Result;

pub mod memory_storage;
pub mod sea_orm_storage;

/// 内存存储的 URL
pub const MEMORY_STORAGE_URL: &str = "memory://";

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 作业管理方法
    // 创建作业
    async fn create_assignment(&self, req: CreateAssignmentRequest) -> Result<Assignment>;
    // 通过ID获取作业（含评分细则与满分）
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;

    /// 提交管理方法
    // 创建提交
    async fn create_submission(&self, req: CreateSubmissionRequest) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 写入提交的向量，返回提交是否存在
    async fn update_submission_embedding(
        &self,
        submission_id: i64,
        embedding: Vec<u8>,
    ) -> Result<bool>;
    // 列出同一作业下其他已有向量的提交（按 ID 升序）
    async fn list_submissions_with_embedding(
        &self,
        assignment_id: i64,
        exclude_submission_id: i64,
    ) -> Result<Vec<EmbeddedSubmission>>;

    /// 查重报告方法
    // 创建查重报告（报告与匹配明细一起写入）
    async fn create_plagiarism_report(
        &self,
        req: CreatePlagiarismReportRequest,
    ) -> Result<PlagiarismReport>;
    // 列出提交的全部查重报告（新的在前）
    async fn list_plagiarism_reports_by_submission(
        &self,
        submission_id: i64,
    ) -> Result<Vec<PlagiarismReport>>;

    /// 评分方法
    // 创建评分
    async fn create_grade(&self, req: CreateGradeRequest) -> Result<Grade>;
    // 列出提交的全部评分（新的在前）
    async fn list_grades_by_submission(&self, submission_id: i64) -> Result<Vec<Grade>>;
}

/// 根据配置创建存储后端
pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    if config.url == MEMORY_STORAGE_URL {
        return Ok(Arc::new(memory_storage::MemoryStorage::new()));
    }
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}

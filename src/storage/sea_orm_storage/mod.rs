//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod grades;
mod plagiarism_reports;
mod submissions;

use crate::config::DatabaseConfig;
use crate::errors::{PipelineError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按配置连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| PipelineError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PipelineError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("wal_autocheckpoint", "1000");

        // 内存库的数据只存在于单个连接中，连接不能被回收
        let in_memory = url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| PipelineError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| PipelineError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PipelineError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, memory://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    grades::{entities::Grade, requests::CreateGradeRequest},
    plagiarism::{entities::PlagiarismReport, requests::CreatePlagiarismReportRequest},
    submissions::{
        entities::{EmbeddedSubmission, Submission},
        requests::CreateSubmissionRequest,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 作业模块
    async fn create_assignment(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        self.create_assignment_impl(req).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    // 提交模块
    async fn create_submission(&self, req: CreateSubmissionRequest) -> Result<Submission> {
        self.create_submission_impl(req).await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn update_submission_embedding(
        &self,
        submission_id: i64,
        embedding: Vec<u8>,
    ) -> Result<bool> {
        self.update_submission_embedding_impl(submission_id, embedding)
            .await
    }

    async fn list_submissions_with_embedding(
        &self,
        assignment_id: i64,
        exclude_submission_id: i64,
    ) -> Result<Vec<EmbeddedSubmission>> {
        self.list_submissions_with_embedding_impl(assignment_id, exclude_submission_id)
            .await
    }

    // 查重模块
    async fn create_plagiarism_report(
        &self,
        req: CreatePlagiarismReportRequest,
    ) -> Result<PlagiarismReport> {
        self.create_plagiarism_report_impl(req).await
    }

    async fn list_plagiarism_reports_by_submission(
        &self,
        submission_id: i64,
    ) -> Result<Vec<PlagiarismReport>> {
        self.list_plagiarism_reports_by_submission_impl(submission_id)
            .await
    }

    // 评分模块
    async fn create_grade(&self, req: CreateGradeRequest) -> Result<Grade> {
        self.create_grade_impl(req).await
    }

    async fn list_grades_by_submission(&self, submission_id: i64) -> Result<Vec<Grade>> {
        self.list_grades_by_submission_impl(submission_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("lms.db").unwrap(),
            "sqlite://lms.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/lms").unwrap(),
            "postgres://u:p@localhost/lms"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://nowhere").is_err());
    }
}

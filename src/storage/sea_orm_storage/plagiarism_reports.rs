//! 查重报告存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::plagiarism_matches::{
    ActiveModel as MatchActiveModel, Column as MatchColumn, Entity as PlagiarismMatches,
    Model as MatchModel,
};
use crate::entity::plagiarism_reports::{ActiveModel, Column, Entity as PlagiarismReports};
use crate::errors::{PipelineError, Result};
use crate::models::plagiarism::{
    entities::PlagiarismReport, requests::CreatePlagiarismReportRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建查重报告（同一事务内写入匹配明细）
    pub async fn create_plagiarism_report_impl(
        &self,
        req: CreatePlagiarismReportRequest,
    ) -> Result<PlagiarismReport> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PipelineError::database_operation(format!("开启事务失败: {e}")))?;

        let report = ActiveModel {
            submission_id: Set(req.submission_id),
            highest_similarity: Set(req.highest_similarity),
            is_flagged: Set(req.is_flagged),
            checked_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| PipelineError::database_operation(format!("创建查重报告失败: {e}")))?;

        let mut matches = Vec::with_capacity(req.matches.len());
        for (position, m) in req.matches.into_iter().enumerate() {
            let inserted = MatchActiveModel {
                report_id: Set(report.id),
                position: Set(position as i32),
                matched_submission_id: Set(m.submission_id),
                matched_student_id: Set(m.student_id),
                similarity: Set(m.similarity),
                content_snippet: Set(m.content),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| PipelineError::database_operation(format!("写入查重匹配失败: {e}")))?;
            matches.push(inserted);
        }

        txn.commit()
            .await
            .map_err(|e| PipelineError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(report.into_report(matches))
    }

    /// 列出提交的查重报告
    pub async fn list_plagiarism_reports_by_submission_impl(
        &self,
        submission_id: i64,
    ) -> Result<Vec<PlagiarismReport>> {
        let reports = PlagiarismReports::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PipelineError::database_operation(format!("查询查重报告失败: {e}")))?;

        if reports.is_empty() {
            return Ok(Vec::new());
        }

        // 批量查询匹配明细
        let report_ids: Vec<i64> = reports.iter().map(|r| r.id).collect();
        let matches = PlagiarismMatches::find()
            .filter(MatchColumn::ReportId.is_in(report_ids))
            .order_by_asc(MatchColumn::ReportId)
            .order_by_asc(MatchColumn::Position)
            .all(&self.db)
            .await
            .map_err(|e| PipelineError::database_operation(format!("查询查重匹配失败: {e}")))?;

        let mut match_map: HashMap<i64, Vec<MatchModel>> = HashMap::new();
        for m in matches {
            match_map.entry(m.report_id).or_default().push(m);
        }

        Ok(reports
            .into_iter()
            .map(|r| {
                let matches = match_map.remove(&r.id).unwrap_or_default();
                r.into_report(matches)
            })
            .collect())
    }
}

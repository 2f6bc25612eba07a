use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::grades::entities::Grade;
use crate::models::plagiarism::entities::{PlagiarismMatch, PlagiarismReport};

/// 查重报告中的单条匹配
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlagiarismMatchView {
    pub id: i64,
    pub similarity: i32,
    pub student_id: i64,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlagiarismReportView {
    pub id: i64,
    pub matches: Vec<PlagiarismMatchView>,
    pub highest_similarity: i32,
    pub is_flagged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeView {
    pub id: i64,
    pub score: i64,
    pub max_score: i64,
    pub feedback: String,
    pub rubric_scores: BTreeMap<String, u32>,
    pub reasoning: Vec<String>,
}

/// 一次 AI 处理的结果，缺失的字段表示该分支未能完成
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAiResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plagiarism_report: Option<PlagiarismReportView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_grade: Option<GradeView>,
}

impl From<PlagiarismMatch> for PlagiarismMatchView {
    fn from(m: PlagiarismMatch) -> Self {
        Self {
            id: m.submission_id,
            similarity: m.similarity,
            student_id: m.student_id,
            content: m.content,
        }
    }
}

impl From<PlagiarismReport> for PlagiarismReportView {
    fn from(report: PlagiarismReport) -> Self {
        Self {
            id: report.id,
            matches: report.matches.into_iter().map(Into::into).collect(),
            highest_similarity: report.highest_similarity,
            is_flagged: report.is_flagged,
        }
    }
}

impl From<Grade> for GradeView {
    fn from(grade: Grade) -> Self {
        Self {
            id: grade.id,
            score: grade.score,
            max_score: grade.max_score,
            feedback: grade.feedback,
            rubric_scores: grade.rubric_scores,
            reasoning: grade.reasoning,
        }
    }
}

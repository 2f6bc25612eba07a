//! 内存存储实现
//!
//! 基于 DashMap，进程退出即丢失。用于测试以及嵌入式场景（`database.url = "memory://"`）。

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::errors::Result;
use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    grades::{entities::Grade, requests::CreateGradeRequest},
    plagiarism::{entities::PlagiarismReport, requests::CreatePlagiarismReportRequest},
    submissions::{
        entities::{EmbeddedSubmission, Submission, SubmissionStatus},
        requests::CreateSubmissionRequest,
    },
};
use crate::storage::Storage;

/// 内存存储
#[derive(Default)]
pub struct MemoryStorage {
    assignments: DashMap<i64, Assignment>,
    submissions: DashMap<i64, Submission>,
    reports: DashMap<i64, PlagiarismReport>,
    grades: DashMap<i64, Grade>,
    next_id: AtomicI64,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_assignment(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        req.validate()?;

        let now = chrono::Utc::now();
        let assignment = Assignment {
            id: self.allocate_id(),
            course_id: req.course_id,
            title: req.title,
            max_score: req.max_score,
            rubric: req.rubric,
            created_at: now,
            updated_at: now,
        };
        self.assignments.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        Ok(self
            .assignments
            .get(&assignment_id)
            .map(|entry| entry.value().clone()))
    }

    async fn create_submission(&self, req: CreateSubmissionRequest) -> Result<Submission> {
        let submission = Submission {
            id: self.allocate_id(),
            assignment_id: req.assignment_id,
            creator_id: req.creator_id,
            content: req.content,
            embedding: None,
            status: SubmissionStatus::Pending,
            submitted_at: chrono::Utc::now(),
        };
        self.submissions.insert(submission.id, submission.clone());
        Ok(submission)
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        Ok(self
            .submissions
            .get(&submission_id)
            .map(|entry| entry.value().clone()))
    }

    async fn update_submission_embedding(
        &self,
        submission_id: i64,
        embedding: Vec<u8>,
    ) -> Result<bool> {
        match self.submissions.get_mut(&submission_id) {
            Some(mut entry) => {
                entry.embedding = Some(embedding);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_submissions_with_embedding(
        &self,
        assignment_id: i64,
        exclude_submission_id: i64,
    ) -> Result<Vec<EmbeddedSubmission>> {
        let mut siblings: Vec<EmbeddedSubmission> = self
            .submissions
            .iter()
            .filter(|entry| {
                entry.assignment_id == assignment_id && entry.id != exclude_submission_id
            })
            .filter_map(|entry| {
                entry.embedding.as_ref().map(|embedding| EmbeddedSubmission {
                    id: entry.id,
                    creator_id: entry.creator_id,
                    content: entry.content.clone(),
                    embedding: embedding.clone(),
                })
            })
            .collect();
        // DashMap 迭代无序，按 ID 排序与数据库实现保持一致
        siblings.sort_by_key(|s| s.id);
        Ok(siblings)
    }

    async fn create_plagiarism_report(
        &self,
        req: CreatePlagiarismReportRequest,
    ) -> Result<PlagiarismReport> {
        let report = PlagiarismReport {
            id: self.allocate_id(),
            submission_id: req.submission_id,
            matches: req.matches,
            highest_similarity: req.highest_similarity,
            is_flagged: req.is_flagged,
            checked_at: chrono::Utc::now(),
        };
        self.reports.insert(report.id, report.clone());
        Ok(report)
    }

    async fn list_plagiarism_reports_by_submission(
        &self,
        submission_id: i64,
    ) -> Result<Vec<PlagiarismReport>> {
        let mut reports: Vec<PlagiarismReport> = self
            .reports
            .iter()
            .filter(|entry| entry.submission_id == submission_id)
            .map(|entry| entry.value().clone())
            .collect();
        reports.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(reports)
    }

    async fn create_grade(&self, req: CreateGradeRequest) -> Result<Grade> {
        let grade = Grade {
            id: self.allocate_id(),
            submission_id: req.submission_id,
            grader: req.grader,
            score: req.score,
            max_score: req.max_score,
            feedback: req.feedback,
            rubric_scores: req.rubric_scores,
            reasoning: req.reasoning,
            graded_at: chrono::Utc::now(),
        };
        self.grades.insert(grade.id, grade.clone());
        Ok(grade)
    }

    async fn list_grades_by_submission(&self, submission_id: i64) -> Result<Vec<Grade>> {
        let mut grades: Vec<Grade> = self
            .grades
            .iter()
            .filter(|entry| entry.submission_id == submission_id)
            .map(|entry| entry.value().clone())
            .collect();
        grades.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(grades)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::rubric::Rubric;

    #[tokio::test]
    async fn test_list_submissions_with_embedding_filters_and_orders() {
        let storage = MemoryStorage::new();
        let assignment = storage
            .create_assignment(CreateAssignmentRequest {
                course_id: 1,
                title: "Essay".to_string(),
                max_score: 100,
                rubric: Rubric::new(),
            })
            .await
            .unwrap();

        let mut ids = Vec::new();
        for student in 0..4 {
            let submission = storage
                .create_submission(CreateSubmissionRequest {
                    assignment_id: assignment.id,
                    creator_id: 100 + student,
                    content: format!("essay {student}"),
                })
                .await
                .unwrap();
            ids.push(submission.id);
        }

        // 第 2 份没有向量，第 0 份是被排除的自身
        for &id in [ids[0], ids[1], ids[3]].iter().rev() {
            assert!(storage
                .update_submission_embedding(id, vec![1, 2, 3])
                .await
                .unwrap());
        }

        let siblings = storage
            .list_submissions_with_embedding(assignment.id, ids[0])
            .await
            .unwrap();
        let sibling_ids: Vec<i64> = siblings.iter().map(|s| s.id).collect();
        assert_eq!(sibling_ids, vec![ids[1], ids[3]]);
    }

    #[tokio::test]
    async fn test_update_embedding_unknown_submission() {
        let storage = MemoryStorage::new();
        assert!(!storage.update_submission_embedding(42, vec![0]).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_assignment_rejects_non_positive_max_score() {
        let storage = MemoryStorage::new();
        let err = storage
            .create_assignment(CreateAssignmentRequest {
                course_id: 1,
                title: "Broken".to_string(),
                max_score: 0,
                rubric: Rubric::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");
    }

    #[tokio::test]
    async fn test_create_assignment_rejects_negative_weight() {
        let storage = MemoryStorage::new();
        let err = storage
            .create_assignment(CreateAssignmentRequest {
                course_id: 1,
                title: "Essay".to_string(),
                max_score: 100,
                rubric: Rubric::new()
                    .with_criterion("Content Quality", 1.0)
                    .with_criterion("Style", -1.0),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");
        assert!(storage.get_assignment_by_id(1).await.unwrap().is_none());
    }
}

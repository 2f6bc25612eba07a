use tracing::{info, warn};

use super::SubmissionAiService;
use crate::errors::{PipelineError, Result};
use crate::grading::grade;
use crate::models::ai::responses::GradeView;
use crate::models::grades::{entities::GraderIdentity, requests::CreateGradeRequest};

pub async fn grade_submission(
    service: &SubmissionAiService,
    submission_id: i64,
    content: &str,
    assignment_id: i64,
) -> Result<Option<GradeView>> {
    let storage = service.get_storage();

    let Some(assignment) = storage.get_assignment_by_id(assignment_id).await? else {
        let e = PipelineError::assignment_not_found(format!(
            "Assignment {assignment_id} does not exist"
        ));
        warn!(
            "Skipping AI grading for submission {}: [{}] {}",
            submission_id,
            e.code(),
            e.message()
        );
        return Ok(None);
    };

    let outcome = grade(content, &assignment.rubric, assignment.max_score);

    let grade = storage
        .create_grade(CreateGradeRequest {
            submission_id,
            grader: GraderIdentity::Ai,
            score: outcome.score,
            max_score: outcome.max_score,
            feedback: outcome.feedback,
            rubric_scores: outcome.rubric_scores,
            reasoning: outcome.reasoning,
        })
        .await?;

    info!(
        "AI grade {} created for submission {}: {}/{}",
        grade.id, submission_id, grade.score, grade.max_score
    );
    Ok(Some(grade.into()))
}

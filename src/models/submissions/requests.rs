use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionRequest {
    pub assignment_id: i64,
    pub creator_id: i64,
    pub content: String,
}

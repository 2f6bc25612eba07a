use super::entities::PlagiarismMatch;

#[derive(Debug, Clone)]
pub struct CreatePlagiarismReportRequest {
    pub submission_id: i64,
    pub matches: Vec<PlagiarismMatch>,
    pub highest_similarity: i32,
    pub is_flagged: bool,
}

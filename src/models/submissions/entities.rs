use serde::{Deserialize, Serialize};

// 提交状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending, // 待评分
    Graded,  // 已评分
    Late,    // 迟交
}

impl SubmissionStatus {
    pub const PENDING: &'static str = "pending";
    pub const GRADED: &'static str = "graded";
    pub const LATE: &'static str = "late";
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "{}", Self::PENDING),
            SubmissionStatus::Graded => write!(f, "{}", Self::GRADED),
            SubmissionStatus::Late => write!(f, "{}", Self::LATE),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PENDING => Ok(SubmissionStatus::Pending),
            Self::GRADED => Ok(SubmissionStatus::Graded),
            Self::LATE => Ok(SubmissionStatus::Late),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    // 提交学生 ID
    pub creator_id: i64,
    pub content: String,
    // 编码后的向量（见 embedding::codec），尚未生成时为空
    #[serde(skip)]
    pub embedding: Option<Vec<u8>>,
    pub status: SubmissionStatus,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// 已生成向量的兄弟提交，供查重比对使用
#[derive(Debug, Clone)]
pub struct EmbeddedSubmission {
    pub id: i64,
    pub creator_id: i64,
    pub content: String,
    pub embedding: Vec<u8>,
}

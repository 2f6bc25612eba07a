use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 评分来源，流水线只写入 `Ai`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraderIdentity {
    Ai,
}

impl GraderIdentity {
    pub const AI: &'static str = "ai";
}

impl std::fmt::Display for GraderIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraderIdentity::Ai => write!(f, "{}", Self::AI),
        }
    }
}

impl std::str::FromStr for GraderIdentity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::AI => Ok(GraderIdentity::Ai),
            _ => Err(format!("Invalid grader identity: {s}")),
        }
    }
}

impl Serialize for GraderIdentity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GraderIdentity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub id: i64,
    pub submission_id: i64,
    pub grader: GraderIdentity,
    pub score: i64,
    pub max_score: i64,
    pub feedback: String,
    // 各评分标准得分（0..100）
    pub rubric_scores: BTreeMap<String, u32>,
    pub reasoning: Vec<String>,
    pub graded_at: chrono::DateTime<chrono::Utc>,
}

use tracing::{debug, error, info, warn};

use super::SubmissionAiService;
use crate::embedding::codec;
use crate::errors::Result;
use crate::models::ai::responses::PlagiarismReportView;
use crate::models::plagiarism::{
    entities::PlagiarismMatch, requests::CreatePlagiarismReportRequest,
};
use crate::similarity::{MatchCandidate, find_matches};
use crate::utils::truncate_chars;

/// 相似度（0..1）换算为百分比
fn to_percent(similarity: f64) -> i32 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as i32
}

pub async fn check_plagiarism(
    service: &SubmissionAiService,
    submission_id: i64,
    content: &str,
    assignment_id: i64,
) -> Result<Option<PlagiarismReportView>> {
    let vector = match service.embedder.embed(content).await {
        Ok(vector) => vector,
        Err(e) => {
            warn!(
                "Skipping plagiarism check for submission {}: [{}] {}",
                submission_id,
                e.code(),
                e.message()
            );
            return Ok(None);
        }
    };

    let storage = service.get_storage();

    if !storage
        .update_submission_embedding(submission_id, codec::encode(&vector))
        .await?
    {
        warn!(
            "Submission {} not found while storing its embedding",
            submission_id
        );
    }
    service.vector_cache.invalidate(submission_id).await;

    let siblings = storage
        .list_submissions_with_embedding(assignment_id, submission_id)
        .await?;

    let mut candidates = Vec::with_capacity(siblings.len());
    for sibling in siblings {
        match service
            .vector_cache
            .get_or_decode(sibling.id, &sibling.embedding)
            .await
        {
            Ok(decoded) => candidates.push(MatchCandidate {
                id: sibling.id,
                vector: (*decoded).clone(),
                student_id: sibling.creator_id,
                content: sibling.content,
            }),
            Err(e) => error!(
                "Stored embedding of submission {} is unreadable, skipping: {}",
                sibling.id, e
            ),
        }
    }
    debug!(
        "Comparing submission {} against {} sibling submissions",
        submission_id,
        candidates.len()
    );

    let settings = service.settings();
    let matches = find_matches(&vector, &candidates, settings.match_threshold);
    let Some(best) = matches.first() else {
        debug!("No similar submissions found for submission {}", submission_id);
        return Ok(None);
    };

    let highest_similarity = to_percent(best.similarity);
    let is_flagged = highest_similarity >= settings.flag_threshold;
    let matches = matches
        .iter()
        .map(|m| PlagiarismMatch {
            submission_id: m.id,
            student_id: m.student_id,
            similarity: to_percent(m.similarity),
            content: truncate_chars(&m.content, settings.snippet_chars).to_string(),
        })
        .collect();

    let report = storage
        .create_plagiarism_report(CreatePlagiarismReportRequest {
            submission_id,
            matches,
            highest_similarity,
            is_flagged,
        })
        .await?;

    if is_flagged {
        warn!(
            "Submission {} flagged for plagiarism review (highest similarity {}%)",
            submission_id, highest_similarity
        );
    } else {
        info!(
            "Plagiarism report {} created for submission {} with {} matches",
            report.id,
            submission_id,
            report.matches.len()
        );
    }

    Ok(Some(report.into()))
}

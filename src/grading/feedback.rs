//! 评语生成
//!
//! 只依赖字数、句数、段落数与总分百分比，与各标准得分无关。

use super::features::TextFeatures;

const MIN_WORDS: usize = 50;
const MAX_WORDS: usize = 800;
const MIN_SENTENCES: usize = 3;
const MIN_PARAGRAPHS: usize = 2;

/// 总分百分比，满分为 0 时为 0
pub fn percentage(score: i64, max_score: i64) -> i64 {
    if max_score <= 0 {
        return 0;
    }
    (score as f64 / max_score as f64 * 100.0).round() as i64
}

pub fn build_feedback(score: i64, max_score: i64, features: &TextFeatures) -> String {
    let percent = percentage(score, max_score);
    let mut lines = vec![
        format!("AI Preliminary Grade: {score}/{max_score} ({percent}%)"),
        String::new(),
    ];

    lines.push(match features.word_count {
        n if n < MIN_WORDS => format!(
            "• Length: The submission is quite short ({n} words). Consider expanding your ideas with more detail."
        ),
        n if n > MAX_WORDS => format!(
            "• Length: The submission is very long ({n} words). Consider making your points more concisely."
        ),
        n => format!("• Length: Good length ({n} words)."),
    });

    lines.push(if features.sentence_count < MIN_SENTENCES {
        "• Structure: Very few complete sentences. Develop your points in full sentences.".to_string()
    } else {
        "• Structure: Sentence structure is adequate.".to_string()
    });

    lines.push(if features.paragraph_count < MIN_PARAGRAPHS {
        "• Organization: Consider organizing your work into multiple paragraphs.".to_string()
    } else {
        format!(
            "• Organization: Work is organized into {} paragraphs.",
            features.paragraph_count
        )
    });

    lines.push(String::new());
    lines.push(closing_remark(percent).to_string());
    lines.join("\n")
}

fn closing_remark(percent: i64) -> &'static str {
    match percent {
        p if p >= 90 => "Excellent work! Your submission meets the assignment expectations very well.",
        p if p >= 80 => "Good work! A few refinements would make your submission even stronger.",
        p if p >= 70 => "Satisfactory work. Review the points above to improve your submission.",
        p if p >= 60 => "Your submission needs improvement. Please address the points above.",
        _ => "Significant improvement is needed. Please revisit the assignment requirements.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(word_count: usize, sentence_count: usize, paragraph_count: usize) -> TextFeatures {
        TextFeatures {
            word_count,
            sentence_count,
            paragraph_count,
            char_count: 0,
        }
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(95, 100), 95);
        assert_eq!(percentage(7, 8), 88);
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(10, 10), 100);
    }

    #[test]
    fn test_feedback_header_and_closing() {
        let feedback = build_feedback(95, 100, &features(520, 20, 3));
        let lines: Vec<&str> = feedback.lines().collect();
        assert_eq!(lines[0], "AI Preliminary Grade: 95/100 (95%)");
        assert!(lines.contains(&"• Length: Good length (520 words)."));
        assert!(lines.contains(&"• Structure: Sentence structure is adequate."));
        assert!(lines.contains(&"• Organization: Work is organized into 3 paragraphs."));
        assert!(lines.last().unwrap().starts_with("Excellent work!"));
    }

    #[test]
    fn test_feedback_flags_short_and_unstructured() {
        let feedback = build_feedback(3, 10, &features(12, 1, 1));
        assert!(feedback.starts_with("AI Preliminary Grade: 3/10 (30%)"));
        assert!(feedback.contains("quite short (12 words)"));
        assert!(feedback.contains("Very few complete sentences"));
        assert!(feedback.contains("multiple paragraphs"));
        assert!(feedback.ends_with("Significant improvement is needed. Please revisit the assignment requirements."));
    }

    #[test]
    fn test_feedback_long_submission() {
        let feedback = build_feedback(16, 20, &features(900, 30, 6));
        assert!(feedback.contains("very long (900 words)"));
        assert!(feedback.ends_with("Good work! A few refinements would make your submission even stronger."));
    }

    #[test]
    fn test_closing_bands() {
        assert!(closing_remark(70).starts_with("Satisfactory"));
        assert!(closing_remark(69).contains("needs improvement"));
        assert!(closing_remark(59).starts_with("Significant"));
    }
}

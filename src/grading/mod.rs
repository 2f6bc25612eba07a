//! 基于评分细则的启发式自动评分
//!
//! 1. 提取文本特征（字数、句数、段落数）
//! 2. 每条标准按名称归类并打分（0..=100）
//! 3. 按权重加权平均后换算到作业满分
//!
//! 整个过程是确定性的纯函数。

pub mod criteria;
pub mod feedback;
pub mod features;

use std::collections::BTreeMap;

use crate::models::assignments::rubric::Rubric;
pub use criteria::{CriterionKind, score_label};
pub use features::TextFeatures;

/// 自动评分结果
#[derive(Debug, Clone, PartialEq)]
pub struct GradingOutcome {
    pub score: i64,
    pub max_score: i64,
    pub feedback: String,
    pub rubric_scores: BTreeMap<String, u32>,
    pub reasoning: Vec<String>,
}

/// 对提交内容评分
///
/// 权重为负或非有限值的标准按权重 0 处理；权重总和为 0（包括空细则）时总分为 0。
pub fn grade(content: &str, rubric: &Rubric, max_score: i64) -> GradingOutcome {
    let features = TextFeatures::extract(content);
    let max_score = max_score.max(0);

    let mut rubric_scores = BTreeMap::new();
    let mut reasoning = Vec::with_capacity(rubric.len());
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for criterion in rubric.criteria() {
        let kind = CriterionKind::classify(&criterion.name);
        let score = kind.score(content, &features);
        let weight = effective_weight(criterion.weight);

        weighted_sum += f64::from(score) * weight;
        total_weight += weight;
        reasoning.push(format!(
            "{}: {}/100 - {}",
            criterion.name,
            score,
            score_label(score)
        ));
        rubric_scores.insert(criterion.name.clone(), score);
    }

    let score = combine(weighted_sum, total_weight, max_score);
    GradingOutcome {
        score,
        max_score,
        feedback: feedback::build_feedback(score, max_score, &features),
        rubric_scores,
        reasoning,
    }
}

fn effective_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

fn combine(weighted_sum: f64, total_weight: f64, max_score: i64) -> i64 {
    if total_weight <= 0.0 {
        return 0;
    }
    let score = (weighted_sum / total_weight * max_score as f64 / 100.0).round() as i64;
    score.clamp(0, max_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 520 个单词、20 个句子、3 个段落
    fn long_essay() -> String {
        let mut paragraphs = Vec::new();
        // 每段 7 句，最后一段 6 句；每句 26 个单词
        for sentences in [7usize, 7, 6] {
            let text = (0..sentences)
                .map(|_| {
                    let words = vec!["word"; 26].join(" ");
                    format!("{words}.")
                })
                .collect::<Vec<_>>()
                .join(" ");
            paragraphs.push(text);
        }
        paragraphs.join("\n\n")
    }

    #[test]
    fn test_long_essay_fixture() {
        let features = TextFeatures::extract(&long_essay());
        assert_eq!(features.word_count, 520);
        assert_eq!(features.sentence_count, 20);
        assert_eq!(features.paragraph_count, 3);
    }

    #[test]
    fn test_content_quality_rubric_scores_95() {
        let rubric = Rubric::new().with_criterion("Content Quality", 1.0);
        let outcome = grade(&long_essay(), &rubric, 100);
        assert_eq!(outcome.score, 95);
        assert_eq!(outcome.max_score, 100);
        assert_eq!(outcome.rubric_scores.get("Content Quality"), Some(&95));
        assert_eq!(outcome.reasoning, vec!["Content Quality: 95/100 - Excellent"]);
        assert!(outcome.feedback.starts_with("AI Preliminary Grade: 95/100 (95%)"));
    }

    #[test]
    fn test_empty_rubric_scores_zero() {
        let outcome = grade(&long_essay(), &Rubric::new(), 100);
        assert_eq!(outcome.score, 0);
        assert!(outcome.rubric_scores.is_empty());
        assert!(outcome.reasoning.is_empty());
        assert!(outcome.feedback.starts_with("AI Preliminary Grade: 0/100 (0%)"));
    }

    #[test]
    fn test_zero_weights_score_zero() {
        let rubric = Rubric::new()
            .with_criterion("Content Quality", 0.0)
            .with_criterion("Style", 0.0);
        let outcome = grade(&long_essay(), &rubric, 50);
        assert_eq!(outcome.score, 0);
        // 各标准仍然给出分数
        assert_eq!(outcome.rubric_scores.len(), 2);
    }

    #[test]
    fn test_weighted_combination_scaled_to_max_score() {
        // Content Quality = 95, Creativity(default) = 100
        let rubric = Rubric::new()
            .with_criterion("Content Quality", 3.0)
            .with_criterion("Creativity", 1.0);
        let outcome = grade(&long_essay(), &rubric, 20);
        assert_eq!(outcome.rubric_scores["Creativity"], 100);
        // (95*3 + 100) / 4 = 96.25 → 19.25 → 19
        assert_eq!(outcome.score, 19);
        assert_eq!(
            outcome.reasoning,
            vec![
                "Content Quality: 95/100 - Excellent".to_string(),
                "Creativity: 100/100 - Excellent".to_string(),
            ]
        );
    }

    #[test]
    fn test_deterministic() {
        let rubric = Rubric::new()
            .with_criterion("Correctness", 2.0)
            .with_criterion("Documentation", 1.0)
            .with_criterion("Code Style", 1.5);
        let content = "// sum helper\nfunction sum(a, b) {\n  return a + b;\n}\n";
        let first = grade(content, &rubric, 10);
        for _ in 0..5 {
            assert_eq!(grade(content, &rubric, 10), first);
        }
    }

    #[test]
    fn test_score_within_bounds() {
        let essay = long_essay();
        let contents: [&str; 5] = [
            "",
            "x",
            "if { } else { } while for let const var",
            "// c\n// d\n/* e */",
            &essay,
        ];
        let rubrics = [
            Rubric::new().with_criterion("Correctness", 1.0),
            Rubric::new()
                .with_criterion("Documentation", 5.0)
                .with_criterion("Formatting", 0.5),
            Rubric::new()
                .with_criterion("Content", 1e9)
                .with_criterion("Other", 1e-9),
            Rubric::new().with_criterion("Style", -3.0),
        ];
        for content in contents {
            for rubric in &rubrics {
                for max_score in [0, 1, 7, 100, 1000] {
                    let outcome = grade(content, rubric, max_score);
                    assert!(outcome.score >= 0 && outcome.score <= max_score);
                    assert!(outcome.rubric_scores.values().all(|s| *s <= 100));
                }
            }
        }
    }
}

//! 文本特征提取

use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence boundary regex"));
static PARAGRAPH_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph boundary regex"));

/// 一次评分中各标准共享的文本统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFeatures {
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub char_count: usize,
}

impl TextFeatures {
    pub fn extract(content: &str) -> Self {
        Self {
            word_count: content.split_whitespace().count(),
            sentence_count: count_fragments(&SENTENCE_BOUNDARY, content),
            paragraph_count: count_fragments(&PARAGRAPH_BOUNDARY, content),
            char_count: content.chars().count(),
        }
    }
}

// 空白片段不计数
fn count_fragments(boundary: &Regex, content: &str) -> usize {
    boundary
        .split(content)
        .filter(|fragment| !fragment.trim().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let text = "First sentence. Second one!\n\nThird?! And a trailing fragment";
        let features = TextFeatures::extract(text);
        assert_eq!(features.word_count, 9);
        assert_eq!(features.sentence_count, 4);
        assert_eq!(features.paragraph_count, 2);
        assert_eq!(features.char_count, text.chars().count());
    }

    #[test]
    fn test_whitespace_only_paragraphs_ignored() {
        let features = TextFeatures::extract("\n\n   \n\t\nOnly paragraph.\n \n");
        assert_eq!(features.paragraph_count, 1);
        assert_eq!(features.sentence_count, 1);
    }

    #[test]
    fn test_empty() {
        let features = TextFeatures::extract("");
        assert_eq!(
            features,
            TextFeatures {
                word_count: 0,
                sentence_count: 0,
                paragraph_count: 0,
                char_count: 0,
            }
        );
    }

    #[test]
    fn test_punctuation_runs() {
        // "..." 只算一个分隔
        assert_eq!(TextFeatures::extract("Wait... what?!").sentence_count, 2);
    }
}

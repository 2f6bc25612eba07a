//! 评分标准分类与打分规则
//!
//! 标准名称按大小写不敏感的子串匹配归类，按下面的顺序取第一个命中的类别。
//! 每类规则都是文本特征上的纯函数，得分 0..=100。

use once_cell::sync::Lazy;
use regex::Regex;

use super::features::TextFeatures;

const MAX_CRITERION_SCORE: f64 = 100.0;

/// 编程关键字表，以子串方式在小写内容中查找
const PROGRAMMING_KEYWORDS: [&str; 20] = [
    "function", "variable", "loop", "condition", "array", "object", "class", "method", "return",
    "if", "else", "for", "while", "try", "catch", "import", "export", "const", "let", "var",
];

static NAMING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[a-z][a-z0-9]*(?:[A-Z][a-zA-Z0-9]*|_[a-z0-9]+)+\b").expect("naming regex")
});
static OPERATOR_SPACING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S\s*[=+\-*/<>]\s*\S").expect("operator regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionKind {
    ContentQuality,
    Correctness,
    Documentation,
    Style,
    Default,
}

impl CriterionKind {
    /// 根据标准名称归类
    pub fn classify(name: &str) -> Self {
        let name = name.to_lowercase();
        let contains_any = |needles: &[&str]| needles.iter().any(|n| name.contains(n));

        if contains_any(&["content", "quality"]) {
            CriterionKind::ContentQuality
        } else if contains_any(&["correctness", "accuracy"]) {
            CriterionKind::Correctness
        } else if contains_any(&["documentation", "comments"]) {
            CriterionKind::Documentation
        } else if contains_any(&["style", "formatting"]) {
            CriterionKind::Style
        } else {
            CriterionKind::Default
        }
    }

    /// 按类别打分，结果四舍五入为整数
    pub fn score(self, content: &str, features: &TextFeatures) -> u32 {
        let raw = match self {
            CriterionKind::ContentQuality => score_content_quality(features),
            CriterionKind::Correctness => score_correctness(content),
            CriterionKind::Documentation => score_documentation(content),
            CriterionKind::Style => score_style(content),
            CriterionKind::Default => score_default(features),
        };
        raw.clamp(0.0, MAX_CRITERION_SCORE).round() as u32
    }
}

fn score_content_quality(features: &TextFeatures) -> f64 {
    let length_points = match features.word_count {
        150..=500 => 40.0,
        100..=149 => 30.0,
        501..=800 => 35.0,
        0..=99 => 15.0,
        _ => 20.0,
    };
    let sentence_points = match features.sentence_count {
        n if n >= 5 => 30.0,
        n if n >= 3 => 20.0,
        _ => 10.0,
    };
    let paragraph_points = match features.paragraph_count {
        n if n >= 2 => 30.0,
        1 => 20.0,
        _ => 10.0,
    };
    length_points + sentence_points + paragraph_points
}

fn score_correctness(content: &str) -> f64 {
    let lowered = content.to_lowercase();
    let found = PROGRAMMING_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .count();
    let mut score = found as f64 / PROGRAMMING_KEYWORDS.len() as f64 * 100.0;
    if content.contains('{') && content.contains('}') {
        score += 20.0;
    }
    score
}

fn score_documentation(content: &str) -> f64 {
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return 0.0;
    }

    let comment_lines = lines
        .iter()
        .map(|line| line.trim_start())
        .filter(|line| {
            line.starts_with("//")
                || line.starts_with("/*")
                || line.starts_with('*')
                || line.starts_with('#')
        })
        .count();
    let mut score = comment_lines as f64 / lines.len() as f64 * 100.0;
    if content.contains("//") || content.contains("/*") {
        score += 20.0;
    }
    score
}

fn score_style(content: &str) -> f64 {
    let lines: Vec<&str> = content.lines().collect();
    let mut score = 0.0;

    if !lines.is_empty() {
        let well_formed = lines
            .iter()
            .filter(|line| {
                line.starts_with("  ") || line.starts_with('\t') || line.trim().is_empty()
            })
            .count();
        score += well_formed as f64 / lines.len() as f64 * 30.0;
    }
    if NAMING_PATTERN.is_match(content) {
        score += 30.0;
    }
    if OPERATOR_SPACING.is_match(content) {
        score += 20.0;
    }
    if content.contains(';') {
        score += 20.0;
    }
    score
}

fn score_default(features: &TextFeatures) -> f64 {
    let mut score = 0.0;
    if features.word_count >= 50 {
        score += 30.0;
    }
    if features.sentence_count >= 3 {
        score += 30.0;
    }
    if features.paragraph_count >= 1 {
        score += 20.0;
    }
    if features.char_count > 100 {
        score += 20.0;
    }
    score
}

/// 分数对应的评语等级
pub fn score_label(score: u32) -> &'static str {
    match score {
        90.. => "Excellent",
        80..=89 => "Good",
        70..=79 => "Satisfactory",
        60..=69 => "Needs Improvement",
        _ => "Poor",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(kind: CriterionKind, content: &str) -> u32 {
        kind.score(content, &TextFeatures::extract(content))
    }

    #[test]
    fn test_classify() {
        assert_eq!(CriterionKind::classify("Content Quality"), CriterionKind::ContentQuality);
        assert_eq!(CriterionKind::classify("QUALITY of argument"), CriterionKind::ContentQuality);
        assert_eq!(CriterionKind::classify("Correctness"), CriterionKind::Correctness);
        assert_eq!(CriterionKind::classify("Factual accuracy"), CriterionKind::Correctness);
        assert_eq!(CriterionKind::classify("Code Comments"), CriterionKind::Documentation);
        assert_eq!(CriterionKind::classify("documentation"), CriterionKind::Documentation);
        assert_eq!(CriterionKind::classify("Formatting"), CriterionKind::Style);
        assert_eq!(CriterionKind::classify("Creativity"), CriterionKind::Default);
        assert_eq!(CriterionKind::classify(""), CriterionKind::Default);
    }

    #[test]
    fn test_classify_first_rule_wins() {
        // 同时包含 content 与 style
        assert_eq!(CriterionKind::classify("Style of content"), CriterionKind::ContentQuality);
        assert_eq!(
            CriterionKind::classify("Accuracy of comments"),
            CriterionKind::Correctness
        );
    }

    #[test]
    fn test_content_quality_bands() {
        let features = |word_count, sentence_count, paragraph_count| TextFeatures {
            word_count,
            sentence_count,
            paragraph_count,
            char_count: 0,
        };
        let kind = CriterionKind::ContentQuality;
        assert_eq!(kind.score("", &features(520, 20, 3)), 95);
        assert_eq!(kind.score("", &features(300, 5, 2)), 100);
        assert_eq!(kind.score("", &features(120, 3, 1)), 70);
        assert_eq!(kind.score("", &features(50, 1, 0)), 35);
        assert_eq!(kind.score("", &features(900, 4, 1)), 60);
        assert_eq!(kind.score("", &features(149, 2, 2)), 70);
        assert_eq!(kind.score("", &features(150, 2, 2)), 80);
    }

    #[test]
    fn test_correctness() {
        assert_eq!(score(CriterionKind::Correctness, "nothing relevant here"), 0);
        // "function" 命中 function；"return" 命中 return
        assert_eq!(score(CriterionKind::Correctness, "function and return"), 10);
        assert_eq!(score(CriterionKind::Correctness, "FUNCTION { }"), 25);
        let all = PROGRAMMING_KEYWORDS.join(" ");
        assert_eq!(score(CriterionKind::Correctness, &format!("{all} {{}}")), 100);
    }

    #[test]
    fn test_documentation() {
        let code = "// add numbers\nfn add() {}\n# note\nlet x = 1;";
        // 2/4 行为注释，另有 // 奖励
        assert_eq!(score(CriterionKind::Documentation, code), 70);
        assert_eq!(score(CriterionKind::Documentation, "plain text"), 0);
        assert_eq!(score(CriterionKind::Documentation, ""), 0);
        assert_eq!(score(CriterionKind::Documentation, "/* a */\n * b"), 100);
    }

    #[test]
    fn test_style() {
        let code = "fn main() {\n  let total_sum = a + b;\n}";
        // 缩进 1/3 → 10，命名 30，运算符 20，分号 20
        assert_eq!(score(CriterionKind::Style, code), 80);
        assert_eq!(score(CriterionKind::Style, "hello"), 0);
        assert_eq!(score(CriterionKind::Style, "myValue"), 30);
    }

    #[test]
    fn test_default_rule() {
        assert_eq!(score(CriterionKind::Default, ""), 0);
        assert_eq!(score(CriterionKind::Default, "One line."), 20);
        let long = "This is a sentence with several words in it. ".repeat(6);
        assert_eq!(score(CriterionKind::Default, &long), 100);
    }

    #[test]
    fn test_score_label() {
        assert_eq!(score_label(100), "Excellent");
        assert_eq!(score_label(90), "Excellent");
        assert_eq!(score_label(89), "Good");
        assert_eq!(score_label(70), "Satisfactory");
        assert_eq!(score_label(60), "Needs Improvement");
        assert_eq!(score_label(59), "Poor");
        assert_eq!(score_label(0), "Poor");
    }
}

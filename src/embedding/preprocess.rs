/// 折叠连续空白、去除首尾空白，并截取前 `max_chars` 个字符
///
/// 截断按字符计数，只是近似的 token 预算。
pub fn preprocess(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            preprocess("  hello \n\n\t world  ", 512),
            "hello world"
        );
    }

    #[test]
    fn test_truncates_by_chars() {
        let text = "é".repeat(600);
        let out = preprocess(&text, 512);
        assert_eq!(out.chars().count(), 512);
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        assert!(preprocess(" \n\t ", 512).is_empty());
    }
}

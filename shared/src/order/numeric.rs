//! 数量输入框的过滤规则
//!
//! 数量只能是非负整数。按键阶段拦截会产生负号、小数点或科学计数法的字符，
//! 粘贴阶段拒绝任何非数字内容，值变化时再做一次兜底过滤。

const REJECTED_KEYS: [&str; 5] = ["e", "E", "+", "-", "."];

/// 是否应当拦截该按键（`KeyboardEvent.key`）
pub fn is_rejected_key(key: &str) -> bool {
    REJECTED_KEYS.contains(&key)
}

/// 粘贴内容是否全部为数字（空内容允许）
pub fn paste_is_numeric(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit())
}

/// 只保留数字字符
pub fn sanitize_count(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// 解析输入框的值：空为 `None`，超出范围时取上限
pub fn parse_count(raw: &str) -> Option<u32> {
    let digits = sanitize_count(raw);
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_sign_decimal_and_exponent_keys() {
        for key in ["e", "E", "+", "-", "."] {
            assert!(is_rejected_key(key), "{key} should be blocked");
        }
        for key in ["0", "9", "Backspace", "ArrowLeft", "Tab"] {
            assert!(!is_rejected_key(key), "{key} should pass");
        }
    }

    #[test]
    fn paste_must_be_digits_only() {
        assert!(paste_is_numeric("120"));
        assert!(paste_is_numeric(""));
        assert!(!paste_is_numeric("1e3"));
        assert!(!paste_is_numeric("-4"));
        assert!(!paste_is_numeric("2.5"));
        assert!(!paste_is_numeric(" 7"));
    }

    #[test]
    fn sanitized_values_never_keep_rejected_characters() {
        let typed = ["1e5", "-3", "+4", "2.50", "E7", "..", "12"];
        for raw in typed {
            let clean = sanitize_count(raw);
            assert!(
                !clean.contains(['e', 'E', '+', '-', '.']),
                "{raw} -> {clean}"
            );
        }
    }

    #[test]
    fn parse_count_handles_empty_and_overflow() {
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("-"), None);
        assert_eq!(parse_count("007"), Some(7));
        assert_eq!(parse_count("1e3"), Some(13));
        assert_eq!(parse_count("99999999999"), Some(u32::MAX));
    }
}

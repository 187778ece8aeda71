//! Language names - locale 代码到可读语言名的静态映射

const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("de", "German"),
    ("en", "English"),
    ("en_US", "US English"),
    ("en_GB", "British English"),
    ("tib", "Tibetan"),
    ("it", "Italian"),
    ("fr", "French"),
    ("sv", "Swedish"),
    ("te", "Telugu"),
    ("tr", "Turkish"),
    ("ru", "Russian"),
];

/// 查找 locale 对应的语言名，未知时返回 locale 本身
pub fn language_name(locale: &str) -> &str {
    LANGUAGE_NAMES
        .iter()
        .find(|(code, _)| *code == locale)
        .map(|(_, name)| *name)
        .unwrap_or(locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_locale() {
        assert_eq!(language_name("de"), "German");
        assert_eq!(language_name("en_US"), "US English");
        assert_eq!(language_name("lb"), "lb");
    }
}

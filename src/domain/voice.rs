//! Voice - 服务器上的合成音色
//!
//! `MARY LIST VOICES` 的每一行形如 `NAME LOCALE GENDER [DOMAIN]`

use super::language::language_name;

/// 通用领域的名称
pub const GENERAL_DOMAIN: &str = "general";

/// 合成音色
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    name: String,
    locale: String,
    gender: String,
    domain: String,
}

impl Voice {
    pub fn new(
        name: impl Into<String>,
        locale: impl Into<String>,
        gender: impl Into<String>,
        domain: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            locale: locale.into(),
            gender: gender.into(),
            domain: domain.unwrap_or_else(|| GENERAL_DOMAIN.to_string()),
        }
    }

    /// 解析一行音色描述，少于 3 个 token 的行返回 `None`
    pub fn parse_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            return None;
        }
        let domain = parts.get(3).map(|d| d.to_string());
        Some(Self::new(parts[0], parts[1], parts[2], domain))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// 领域为空或为 `general` 时不是受限领域音色
    pub fn is_limited_domain(&self) -> bool {
        !(self.domain.is_empty() || self.domain == GENERAL_DOMAIN)
    }
}

impl std::fmt::Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let language = language_name(&self.locale);
        if self.is_limited_domain() {
            write!(
                f,
                "{} ({}, {} {})",
                self.name, self.domain, language, self.gender
            )
        } else {
            write!(f, "{} ({} {})", self.name, language, self.gender)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_domain_voice() {
        let voice = Voice::parse_line("dfki-prudence-hsmm de female").unwrap();
        assert_eq!(voice.name(), "dfki-prudence-hsmm");
        assert_eq!(voice.locale(), "de");
        assert_eq!(voice.gender(), "female");
        assert_eq!(voice.domain(), GENERAL_DOMAIN);
        assert!(!voice.is_limited_domain());
    }

    #[test]
    fn test_limited_domain_voice() {
        let voice = Voice::parse_line("dfki-stadium-emo de male limited").unwrap();
        assert_eq!(voice.domain(), "limited");
        assert!(voice.is_limited_domain());
    }

    #[test]
    fn test_explicit_general_and_empty_domain() {
        let voice = Voice::parse_line("us2 en male general").unwrap();
        assert!(!voice.is_limited_domain());

        let voice = Voice::new("x", "en", "male", Some(String::new()));
        assert!(!voice.is_limited_domain());
    }

    #[test]
    fn test_short_line_is_rejected() {
        assert!(Voice::parse_line("de7 de").is_none());
        assert!(Voice::parse_line("").is_none());
    }

    #[test]
    fn test_display() {
        let voice = Voice::parse_line("de7 de female").unwrap();
        assert_eq!(voice.to_string(), "de7 (German female)");

        let voice = Voice::parse_line("dfki-stadium-emo de male limited").unwrap();
        assert_eq!(voice.to_string(), "dfki-stadium-emo (limited, German male)");
    }
}

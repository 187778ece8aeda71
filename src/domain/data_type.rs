//! Data Type - MARY 服务器支持的数据类型
//!
//! 服务器对 `MARY LIST DATATYPES` 的每一行应答形如：
//! `NAME [LOCALE=xx] [INPUT] [OUTPUT]`

/// 音频数据类型的保留名称
pub const AUDIO_TYPE_NAME: &str = "AUDIO";

const LOCALE_PREFIX: &str = "LOCALE=";

/// 数据类型
///
/// 不变量: 构造后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataType {
    name: String,
    locale: Option<String>,
    is_input: bool,
    is_output: bool,
}

impl DataType {
    pub fn new(
        name: impl Into<String>,
        locale: Option<String>,
        is_input: bool,
        is_output: bool,
    ) -> Self {
        Self {
            name: name.into(),
            locale,
            is_input,
            is_output,
        }
    }

    /// 解析一行数据类型描述
    ///
    /// 第一个 token 为名称；其余 token 顺序任意，未识别的 token 被忽略。
    /// 空行返回 `None`。
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let name = parts.next()?;

        let mut locale = None;
        let mut is_input = false;
        let mut is_output = false;
        for part in parts {
            if let Some(value) = part.strip_prefix(LOCALE_PREFIX) {
                locale = Some(value.to_string());
            } else if part == "INPUT" {
                is_input = true;
            } else if part == "OUTPUT" {
                is_output = true;
            }
        }

        Some(Self::new(name, locale, is_input, is_output))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn is_input(&self) -> bool {
        self.is_input
    }

    pub fn is_output(&self) -> bool {
        self.is_output
    }

    /// 除 `AUDIO` 以外的所有类型都是文本类型
    pub fn is_text_type(&self) -> bool {
        self.name != AUDIO_TYPE_NAME
    }

    /// 是否适用于指定 locale（未声明 locale 的类型适用于所有 locale）
    pub fn matches_locale(&self, locale: &str) -> bool {
        match &self.locale {
            None => true,
            Some(own) => own == locale,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

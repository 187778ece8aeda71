//! Audio Type - 音频格式与 HTTP Content-Type 映射

use super::data_type::AUDIO_TYPE_NAME;

/// 非音频输出的 Content-Type
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// 未知音频格式的 Content-Type
pub const FALLBACK_AUDIO_CONTENT_TYPE: &str = "application/octet-stream";

/// 已知的音频格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioType {
    Au,
    Aiff,
    Wave,
    Mp3,
}

impl AudioType {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Au => "audio/basic",
            Self::Aiff => "audio/x-aiff",
            Self::Wave => "audio/x-wav",
            Self::Mp3 => "audio/mp3",
        }
    }
}

impl std::fmt::Display for AudioType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioType::Au => write!(f, "AU"),
            AudioType::Aiff => write!(f, "AIFF"),
            AudioType::Wave => write!(f, "WAVE"),
            AudioType::Mp3 => write!(f, "MP3"),
        }
    }
}

impl std::str::FromStr for AudioType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AU" => Ok(AudioType::Au),
            "AIFF" => Ok(AudioType::Aiff),
            "WAVE" => Ok(AudioType::Wave),
            "MP3" => Ok(AudioType::Mp3),
            _ => Err(format!("Unknown audio type: {}", s)),
        }
    }
}

/// 根据输出类型和音频格式推导响应的 Content-Type
pub fn content_type_for(output_type: &str, audio_type: Option<&str>) -> &'static str {
    if output_type != AUDIO_TYPE_NAME {
        return TEXT_CONTENT_TYPE;
    }
    audio_type
        .and_then(|t| t.parse::<AudioType>().ok())
        .map(|t| t.content_type())
        .unwrap_or(FALLBACK_AUDIO_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_content_types() {
        assert_eq!(content_type_for("AUDIO", Some("AU")), "audio/basic");
        assert_eq!(content_type_for("AUDIO", Some("AIFF")), "audio/x-aiff");
        assert_eq!(content_type_for("AUDIO", Some("WAVE")), "audio/x-wav");
        assert_eq!(content_type_for("AUDIO", Some("MP3")), "audio/mp3");
    }

    #[test]
    fn test_unknown_or_missing_audio_type() {
        assert_eq!(
            content_type_for("AUDIO", Some("VORBIS")),
            FALLBACK_AUDIO_CONTENT_TYPE
        );
        assert_eq!(content_type_for("AUDIO", None), FALLBACK_AUDIO_CONTENT_TYPE);
    }

    #[test]
    fn test_text_output() {
        assert_eq!(content_type_for("RAWMARYXML", Some("WAVE")), TEXT_CONTENT_TYPE);
    }

    #[test]
    fn test_round_trip_display() {
        let t: AudioType = "wave".parse().unwrap();
        assert_eq!(t, AudioType::Wave);
        assert_eq!(t.to_string(), "WAVE");
    }
}

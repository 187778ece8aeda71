//! Synthesis Request - 一次合成请求的参数

/// 合成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    /// 输入文本（文本类型输入按 UTF-8 发送）
    pub input: String,
    pub input_type: String,
    pub output_type: String,
    pub audio_type: Option<String>,
    pub voice: Option<String>,
}

impl SynthesisRequest {
    pub fn new(
        input: impl Into<String>,
        input_type: impl Into<String>,
        output_type: impl Into<String>,
    ) -> Self {
        Self {
            input: input.into(),
            input_type: input_type.into(),
            output_type: output_type.into(),
            audio_type: None,
            voice: None,
        }
    }

    pub fn with_audio_type(mut self, audio_type: impl Into<String>) -> Self {
        self.audio_type = Some(audio_type.into());
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    /// 协商行：`MARY IN=<in> OUT=<out> [AUDIO=<audio>] [VOICE=<voice>]`，不含换行
    pub fn request_line(&self) -> String {
        let mut line = format!("MARY IN={} OUT={}", self.input_type, self.output_type);
        if let Some(audio) = self.audio_type.as_deref().filter(|a| !a.is_empty()) {
            line.push_str(" AUDIO=");
            line.push_str(audio);
        }
        if let Some(voice) = self.voice.as_deref().filter(|v| !v.is_empty()) {
            line.push_str(" VOICE=");
            line.push_str(voice);
        }
        line
    }

    /// 协议参数都是单个 token，不能为空也不能含空白
    pub fn validate(&self) -> Result<(), &'static str> {
        if !is_token(&self.input_type) {
            return Err("input type must be a single non-empty token");
        }
        if !is_token(&self.output_type) {
            return Err("output type must be a single non-empty token");
        }
        if let Some(audio) = &self.audio_type {
            if !audio.is_empty() && !is_token(audio) {
                return Err("audio type must be a single token");
            }
        }
        if let Some(voice) = &self.voice {
            if !voice.is_empty() && !is_token(voice) {
                return Err("voice name must be a single token");
            }
        }
        Ok(())
    }
}

/// 协议行里的单个参数：非空且不含空白（包括换行）
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && !s.chars().any(char::is_whitespace)
}

//! Capability Cache - 服务器能力的惰性缓存
//!
//! 数据类型、音色和各类示例文本在第一次访问时从服务器获取，
//! 之后在缓存的生命周期内复用（除非显式 reset）。
//!
//! 每一类数据的获取都由各自的锁保护：并发调用者等待同一次获取，
//! 不会产生重复的网络往返。

use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

use crate::application::error::MaryError;
use crate::application::ports::{
    ControlChannelPort, CMD_EXAMPLE_TEXT, CMD_LIST_AUDIO_FILE_FORMAT_TYPES, CMD_LIST_DATATYPES,
    CMD_LIST_VOICES, CMD_VERSION, CMD_VOICE_AUDIO_EFFECTS, CMD_VOICE_EXAMPLE_TEXT,
};
use crate::domain::{is_token, language_name, DataType, Voice};

/// 已获取的数据类型
#[derive(Debug, Clone)]
struct DataTypeCatalog {
    all: Vec<DataType>,
    input: Vec<DataType>,
    output: Vec<DataType>,
}

/// 已获取的音色
#[derive(Debug, Clone)]
struct VoiceCatalog {
    all: Vec<Voice>,
    by_locale: HashMap<String, Vec<Voice>>,
    /// locale 按首次出现的顺序
    locales: Vec<String>,
}

type TextMemo = DashMap<String, Arc<OnceCell<String>>>;

/// 能力缓存
pub struct CapabilityCache {
    channel: Arc<dyn ControlChannelPort>,
    version: Mutex<Option<String>>,
    data_types: Mutex<Option<Arc<DataTypeCatalog>>>,
    voices: Mutex<Option<Arc<VoiceCatalog>>>,
    audio_file_format_types: Mutex<Option<Arc<Vec<String>>>>,
    example_texts: TextMemo,
    voice_example_texts: TextMemo,
    audio_effects: TextMemo,
}

impl CapabilityCache {
    pub fn new(channel: Arc<dyn ControlChannelPort>) -> Self {
        Self {
            channel,
            version: Mutex::new(None),
            data_types: Mutex::new(None),
            voices: Mutex::new(None),
            audio_file_format_types: Mutex::new(None),
            example_texts: DashMap::new(),
            voice_example_texts: DashMap::new(),
            audio_effects: DashMap::new(),
        }
    }

    /// 清空所有缓存，下一次访问重新向服务器查询
    pub async fn reset(&self) {
        *self.version.lock().await = None;
        *self.data_types.lock().await = None;
        *self.voices.lock().await = None;
        *self.audio_file_format_types.lock().await = None;
        self.example_texts.clear();
        self.voice_example_texts.clear();
        self.audio_effects.clear();
        tracing::debug!("Capability cache reset");
    }

    // ========== Version ==========

    /// 服务器版本信息，多行以换行连接；仅在成功后缓存
    pub async fn server_version_info(&self) -> Result<String, MaryError> {
        let mut guard = self.version.lock().await;
        if let Some(version) = guard.as_ref() {
            return Ok(version.clone());
        }
        let version = self.channel.query(CMD_VERSION).await?.join("\n");
        *guard = Some(version.clone());
        Ok(version)
    }

    // ========== Data types ==========

    async fn data_type_catalog(&self) -> Result<Arc<DataTypeCatalog>, MaryError> {
        let mut guard = self.data_types.lock().await;
        if let Some(catalog) = guard.as_ref() {
            return Ok(catalog.clone());
        }
        let catalog = Arc::new(self.fetch_data_types().await?);
        *guard = Some(catalog.clone());
        Ok(catalog)
    }

    async fn fetch_data_types(&self) -> Result<DataTypeCatalog, MaryError> {
        let lines = self.channel.query(CMD_LIST_DATATYPES).await?;
        let all: Vec<DataType> = lines.iter().filter_map(|l| DataType::parse_line(l)).collect();
        if all.is_empty() {
            return Err(MaryError::protocol(
                "could not get list of data types from MARY server",
            ));
        }

        let input = all.iter().filter(|d| d.is_input()).cloned().collect();
        let output = all.iter().filter(|d| d.is_output()).cloned().collect();

        tracing::debug!(count = all.len(), "Fetched data types");
        Ok(DataTypeCatalog { all, input, output })
    }

    pub async fn all_data_types(&self, locale: Option<&str>) -> Result<Vec<DataType>, MaryError> {
        let catalog = self.data_type_catalog().await?;
        Ok(filter_by_locale(&catalog.all, locale))
    }

    pub async fn input_data_types(
        &self,
        locale: Option<&str>,
    ) -> Result<Vec<DataType>, MaryError> {
        let catalog = self.data_type_catalog().await?;
        Ok(filter_by_locale(&catalog.input, locale))
    }

    pub async fn output_data_types(
        &self,
        locale: Option<&str>,
    ) -> Result<Vec<DataType>, MaryError> {
        let catalog = self.data_type_catalog().await?;
        Ok(filter_by_locale(&catalog.output, locale))
    }

    // ========== Voices ==========

    async fn voice_catalog(&self) -> Result<Arc<VoiceCatalog>, MaryError> {
        let mut guard = self.voices.lock().await;
        if let Some(catalog) = guard.as_ref() {
            return Ok(catalog.clone());
        }
        let catalog = Arc::new(self.fetch_voices().await?);
        *guard = Some(catalog.clone());
        Ok(catalog)
    }

    async fn fetch_voices(&self) -> Result<VoiceCatalog, MaryError> {
        let lines = self.channel.query(CMD_LIST_VOICES).await?;

        let mut all = Vec::new();
        let mut by_locale: HashMap<String, Vec<Voice>> = HashMap::new();
        let mut locales = Vec::new();
        for line in &lines {
            let Some(voice) = Voice::parse_line(line) else {
                tracing::warn!(line = %line, "Skipping malformed voice entry");
                continue;
            };
            if !by_locale.contains_key(voice.locale()) {
                locales.push(voice.locale().to_string());
            }
            by_locale
                .entry(voice.locale().to_string())
                .or_default()
                .push(voice.clone());
            all.push(voice);
        }

        if all.is_empty() {
            return Err(MaryError::protocol(
                "could not get list of voices from MARY server",
            ));
        }

        tracing::debug!(count = all.len(), locales = locales.len(), "Fetched voices");
        Ok(VoiceCatalog {
            all,
            by_locale,
            locales,
        })
    }

    /// 无 locale 时返回全部音色；指定 locale 时该 locale 必须有音色
    pub async fn voices(&self, locale: Option<&str>) -> Result<Vec<Voice>, MaryError> {
        let catalog = self.voice_catalog().await?;
        match locale {
            None => Ok(catalog.all.clone()),
            Some(locale) => catalog
                .by_locale
                .get(locale)
                .cloned()
                .ok_or_else(|| MaryError::not_found(format!("no voices for locale '{}'", locale))),
        }
    }

    pub async fn general_domain_voices(
        &self,
        locale: Option<&str>,
    ) -> Result<Vec<Voice>, MaryError> {
        let voices = self.voices(locale).await?;
        Ok(voices.into_iter().filter(|v| !v.is_limited_domain()).collect())
    }

    pub async fn limited_domain_voices(
        &self,
        locale: Option<&str>,
    ) -> Result<Vec<Voice>, MaryError> {
        let voices = self.voices(locale).await?;
        Ok(voices.into_iter().filter(|v| v.is_limited_domain()).collect())
    }

    /// `(locale, 语言名)` 列表，按 locale 首次出现顺序
    pub async fn available_languages(&self) -> Result<Vec<(String, String)>, MaryError> {
        let catalog = self.voice_catalog().await?;
        Ok(catalog
            .locales
            .iter()
            .map(|l| (l.clone(), language_name(l).to_string()))
            .collect())
    }

    // ========== Example texts ==========

    pub async fn server_example_text(&self, data_type: &str) -> Result<String, MaryError> {
        let command = named_command(CMD_EXAMPLE_TEXT, "data type", data_type)?;
        self.memoized_text(&self.example_texts, data_type, &command, true)
            .await
    }

    pub async fn voice_example_text(&self, voice: &str) -> Result<String, MaryError> {
        let command = named_command(CMD_VOICE_EXAMPLE_TEXT, "voice name", voice)?;
        self.memoized_text(&self.voice_example_texts, voice, &command, true)
            .await
    }

    /// 音色支持的音频效果；服务器不返回内容时为空字符串
    pub async fn audio_effects(&self, voice: &str) -> Result<String, MaryError> {
        let command = named_command(CMD_VOICE_AUDIO_EFFECTS, "voice name", voice)?;
        self.memoized_text(&self.audio_effects, voice, &command, false)
            .await
    }

    pub async fn audio_file_format_types(&self) -> Result<Vec<String>, MaryError> {
        let mut guard = self.audio_file_format_types.lock().await;
        if let Some(types) = guard.as_ref() {
            return Ok(types.as_ref().clone());
        }
        let types = Arc::new(self.channel.query(CMD_LIST_AUDIO_FILE_FORMAT_TYPES).await?);
        *guard = Some(types.clone());
        Ok(types.as_ref().clone())
    }

    async fn memoized_text(
        &self,
        memo: &TextMemo,
        key: &str,
        command: &str,
        require_lines: bool,
    ) -> Result<String, MaryError> {
        // 先克隆出 cell 再 await，避免持有 DashMap 的分片锁
        let cell = memo
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        let text = cell
            .get_or_try_init(|| async {
                let lines = self.channel.query(command).await?;
                if require_lines && lines.is_empty() {
                    return Err(MaryError::protocol(format!(
                        "no answer from MARY server to '{}'",
                        command
                    )));
                }
                Ok::<_, MaryError>(lines.join("\n"))
            })
            .await?;
        Ok(text.clone())
    }
}

/// 带名称参数的命令；名称必须是单个 token，否则会破坏单行请求
fn named_command(command: &str, what: &str, name: &str) -> Result<String, MaryError> {
    if !is_token(name) {
        return Err(MaryError::invalid_request(format!(
            "{} must be a single non-empty token: {:?}",
            what, name
        )));
    }
    Ok(format!("{} {}", command, name))
}

fn filter_by_locale(types: &[DataType], locale: Option<&str>) -> Vec<DataType> {
    match locale {
        None => types.to_vec(),
        Some(locale) => types
            .iter()
            .filter(|d| d.matches_locale(locale))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 按命令返回固定应答并统计调用次数的控制通道
    pub(crate) struct MockChannel {
        answers: HashMap<String, Vec<String>>,
        calls: DashMap<String, usize>,
        total: AtomicUsize,
    }

    impl MockChannel {
        pub(crate) fn new() -> Self {
            Self {
                answers: HashMap::new(),
                calls: DashMap::new(),
                total: AtomicUsize::new(0),
            }
        }

        pub(crate) fn answer(mut self, command: &str, lines: &[&str]) -> Self {
            self.answers.insert(
                command.to_string(),
                lines.iter().map(|l| l.to_string()).collect(),
            );
            self
        }

        pub(crate) fn calls(&self, command: &str) -> usize {
            self.calls.get(command).map(|c| *c).unwrap_or(0)
        }

        pub(crate) fn total_calls(&self) -> usize {
            self.total.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ControlChannelPort for MockChannel {
        async fn query(&self, command: &str) -> Result<Vec<String>, MaryError> {
            self.total.fetch_add(1, Ordering::SeqCst);
            *self.calls.entry(command.to_string()).or_insert(0) += 1;
            Ok(self.answers.get(command).cloned().unwrap_or_default())
        }
    }

    fn voices_channel() -> MockChannel {
        MockChannel::new().answer(
            CMD_LIST_VOICES,
            &["de7 de female", "us2 en male", "dfki-stadium-emo de male limited"],
        )
    }

    fn data_types_channel() -> MockChannel {
        MockChannel::new().answer(
            CMD_LIST_DATATYPES,
            &[
                "TEXT INPUT",
                "TEXT_DE LOCALE=de INPUT",
                "TEXT_EN LOCALE=en INPUT",
                "RAWMARYXML INPUT OUTPUT",
                "AUDIO OUTPUT",
            ],
        )
    }

    fn names<T, F: Fn(&T) -> &str>(items: &[T], f: F) -> Vec<String> {
        items.iter().map(|i| f(i).to_string()).collect()
    }

    #[tokio::test]
    async fn test_voices_round_trip() {
        let cache = CapabilityCache::new(Arc::new(voices_channel()));

        let all = cache.voices(None).await.unwrap();
        assert_eq!(
            names(&all, Voice::name),
            vec!["de7", "us2", "dfki-stadium-emo"]
        );

        let de = cache.voices(Some("de")).await.unwrap();
        assert_eq!(names(&de, Voice::name), vec!["de7", "dfki-stadium-emo"]);

        let limited = cache.limited_domain_voices(Some("de")).await.unwrap();
        assert_eq!(names(&limited, Voice::name), vec!["dfki-stadium-emo"]);

        let general = cache.general_domain_voices(None).await.unwrap();
        assert_eq!(names(&general, Voice::name), vec!["de7", "us2"]);
    }

    #[tokio::test]
    async fn test_unknown_locale_is_not_found() {
        let cache = CapabilityCache::new(Arc::new(voices_channel()));
        let err = cache.voices(Some("fr")).await.unwrap_err();
        assert!(matches!(err, MaryError::NotFound(_)));
        assert!(cache.voices(None).await.is_ok());
    }

    #[tokio::test]
    async fn test_malformed_voice_lines_are_skipped() {
        let channel = MockChannel::new().answer(CMD_LIST_VOICES, &["broken de", "de7 de female"]);
        let cache = CapabilityCache::new(Arc::new(channel));
        let all = cache.voices(None).await.unwrap();
        assert_eq!(names(&all, Voice::name), vec!["de7"]);
    }

    #[tokio::test]
    async fn test_no_usable_voices_is_protocol_error() {
        let channel = MockChannel::new().answer(CMD_LIST_VOICES, &["broken"]);
        let cache = CapabilityCache::new(Arc::new(channel));
        let err = cache.voices(None).await.unwrap_err();
        assert!(matches!(err, MaryError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_data_type_fetch_is_memoized() {
        let channel = Arc::new(data_types_channel());
        let cache = CapabilityCache::new(channel.clone());

        let first = cache.all_data_types(None).await.unwrap();
        let second = cache.all_data_types(None).await.unwrap();
        let _ = cache.input_data_types(None).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(channel.calls(CMD_LIST_DATATYPES), 1);
    }

    #[tokio::test]
    async fn test_concurrent_fetch_issues_one_query() {
        let channel = Arc::new(data_types_channel());
        let cache = Arc::new(CapabilityCache::new(channel.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.output_data_types(None).await })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        assert_eq!(channel.calls(CMD_LIST_DATATYPES), 1);
    }

    #[tokio::test]
    async fn test_input_only_type_is_not_output() {
        let cache = CapabilityCache::new(Arc::new(data_types_channel()));
        let input = cache.input_data_types(None).await.unwrap();
        let output = cache.output_data_types(None).await.unwrap();

        assert!(input.iter().any(|d| d.name() == "TEXT"));
        assert!(!output.iter().any(|d| d.name() == "TEXT"));
        assert_eq!(names(&output, DataType::name), vec!["RAWMARYXML", "AUDIO"]);
    }

    #[tokio::test]
    async fn test_data_types_filtered_by_locale() {
        let cache = CapabilityCache::new(Arc::new(data_types_channel()));
        let de = cache.input_data_types(Some("de")).await.unwrap();
        assert_eq!(names(&de, DataType::name), vec!["TEXT", "TEXT_DE", "RAWMARYXML"]);
    }

    #[tokio::test]
    async fn test_zero_data_types_is_protocol_error() {
        let cache = CapabilityCache::new(Arc::new(MockChannel::new()));
        let err = cache.all_data_types(None).await.unwrap_err();
        assert!(matches!(err, MaryError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_example_text_is_memoized_and_joined() {
        let command = "MARY EXAMPLETEXT TEXT_EN";
        let channel = Arc::new(MockChannel::new().answer(command, &["Hello.", "How are you?"]));
        let cache = CapabilityCache::new(channel.clone());

        let text = cache.server_example_text("TEXT_EN").await.unwrap();
        assert_eq!(text, "Hello.\nHow are you?");
        let _ = cache.server_example_text("TEXT_EN").await.unwrap();
        assert_eq!(channel.calls(command), 1);
    }

    #[tokio::test]
    async fn test_missing_example_text_is_protocol_error_and_not_cached() {
        let channel = Arc::new(MockChannel::new());
        let cache = CapabilityCache::new(channel.clone());

        assert!(matches!(
            cache.server_example_text("NOPE").await,
            Err(MaryError::Protocol(_))
        ));
        assert!(cache.server_example_text("NOPE").await.is_err());
        assert_eq!(channel.calls("MARY EXAMPLETEXT NOPE"), 2);
    }

    #[tokio::test]
    async fn test_audio_effects_may_be_empty() {
        let cache = CapabilityCache::new(Arc::new(MockChannel::new()));
        assert_eq!(cache.audio_effects("de7").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_available_languages() {
        let channel = MockChannel::new().answer(
            CMD_LIST_VOICES,
            &["de7 de female", "x lb male", "us2 en male"],
        );
        let cache = CapabilityCache::new(Arc::new(channel));
        let languages = cache.available_languages().await.unwrap();
        assert_eq!(
            languages,
            vec![
                ("de".to_string(), "German".to_string()),
                ("lb".to_string(), "lb".to_string()),
                ("en".to_string(), "English".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_reset_forces_refetch() {
        let channel = Arc::new(voices_channel());
        let cache = CapabilityCache::new(channel.clone());

        cache.voices(None).await.unwrap();
        cache.reset().await;
        cache.voices(None).await.unwrap();
        assert_eq!(channel.calls(CMD_LIST_VOICES), 2);
    }

    #[tokio::test]
    async fn test_version_is_memoized() {
        let channel = Arc::new(
            MockChannel::new().answer(CMD_VERSION, &["Mary TTS server 3.6", "(c) DFKI"]),
        );
        let cache = CapabilityCache::new(channel.clone());

        assert_eq!(
            cache.server_version_info().await.unwrap(),
            "Mary TTS server 3.6\n(c) DFKI"
        );
        cache.server_version_info().await.unwrap();
        assert_eq!(channel.total_calls(), 1);
    }

    #[tokio::test]
    async fn test_names_with_line_breaks_are_rejected() {
        let channel = Arc::new(
            MockChannel::new()
                .answer("MARY EXAMPLETEXT TEXT\nMARY LIST VOICES", &["hello"])
                .answer("MARY EXAMPLETEXT TEXT", &["hello"]),
        );
        let cache = CapabilityCache::new(channel.clone());

        let err = cache
            .server_example_text("TEXT\nMARY LIST VOICES")
            .await
            .unwrap_err();
        assert!(matches!(err, MaryError::InvalidRequest(_)));
        assert!(matches!(
            cache.voice_example_text("de7 x").await,
            Err(MaryError::InvalidRequest(_))
        ));
        assert!(matches!(
            cache.audio_effects("").await,
            Err(MaryError::InvalidRequest(_))
        ));
        assert_eq!(channel.total_calls(), 0);

        // 合法名称不受影响，且拒绝的请求没有留下缓存项
        assert_eq!(cache.server_example_text("TEXT").await.unwrap(), "hello");
        assert_eq!(cache.example_texts.len(), 1);
    }
}

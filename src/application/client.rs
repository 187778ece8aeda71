//! MARY Client - 客户端门面
//!
//! 组合控制通道、能力缓存与合成会话，对外提供统一的 API

use std::sync::Arc;

use crate::application::capability_cache::CapabilityCache;
use crate::application::error::MaryError;
use crate::application::ports::{ControlChannelPort, OutputSink, SynthesisPort, SynthesisReport};
use crate::domain::{DataType, SynthesisRequest, Voice};

/// MARY 客户端
///
/// 缓存随客户端实例存在，客户端释放即释放缓存
pub struct MaryClient {
    cache: CapabilityCache,
    synthesis: Arc<dyn SynthesisPort>,
}

impl MaryClient {
    pub fn new(channel: Arc<dyn ControlChannelPort>, synthesis: Arc<dyn SynthesisPort>) -> Self {
        Self {
            cache: CapabilityCache::new(channel),
            synthesis,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 丢弃已缓存的服务器能力，下一次访问重新查询
    pub async fn reset_cache(&self) {
        self.cache.reset().await;
    }

    pub async fn server_version_info(&self) -> Result<String, MaryError> {
        self.cache.server_version_info().await
    }

    pub async fn all_data_types(&self, locale: Option<&str>) -> Result<Vec<DataType>, MaryError> {
        self.cache.all_data_types(locale).await
    }

    pub async fn input_data_types(
        &self,
        locale: Option<&str>,
    ) -> Result<Vec<DataType>, MaryError> {
        self.cache.input_data_types(locale).await
    }

    pub async fn output_data_types(
        &self,
        locale: Option<&str>,
    ) -> Result<Vec<DataType>, MaryError> {
        self.cache.output_data_types(locale).await
    }

    pub async fn voices(&self, locale: Option<&str>) -> Result<Vec<Voice>, MaryError> {
        self.cache.voices(locale).await
    }

    pub async fn general_domain_voices(
        &self,
        locale: Option<&str>,
    ) -> Result<Vec<Voice>, MaryError> {
        self.cache.general_domain_voices(locale).await
    }

    pub async fn limited_domain_voices(
        &self,
        locale: Option<&str>,
    ) -> Result<Vec<Voice>, MaryError> {
        self.cache.limited_domain_voices(locale).await
    }

    pub async fn available_languages(&self) -> Result<Vec<(String, String)>, MaryError> {
        self.cache.available_languages().await
    }

    pub async fn server_example_text(&self, data_type: &str) -> Result<String, MaryError> {
        self.cache.server_example_text(data_type).await
    }

    pub async fn voice_example_text(&self, voice: &str) -> Result<String, MaryError> {
        self.cache.voice_example_text(voice).await
    }

    pub async fn audio_effects(&self, voice: &str) -> Result<String, MaryError> {
        self.cache.audio_effects(voice).await
    }

    pub async fn audio_file_format_types(&self) -> Result<Vec<String>, MaryError> {
        self.cache.audio_file_format_types().await
    }

    /// 执行一次合成，输出按接收顺序写入 `output`，诊断文本写入 `diagnostics`
    ///
    /// 已写入 `output` 的部分在出错时保持原样，不会重试
    pub async fn process(
        &self,
        request: &SynthesisRequest,
        output: OutputSink<'_>,
        diagnostics: OutputSink<'_>,
    ) -> Result<SynthesisReport, MaryError> {
        request.validate().map_err(MaryError::invalid_request)?;
        self.synthesis.synthesize(request, output, diagnostics).await
    }
}

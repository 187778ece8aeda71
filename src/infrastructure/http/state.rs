//! Application State

use std::sync::Arc;

use crate::application::MaryClient;
use crate::config::RequestConfig;
use crate::domain::SynthesisRequest;

use super::dto::ProcessRequest;

/// 应用状态
pub struct AppState {
    pub client: Arc<MaryClient>,
    /// `/api/process` 未指定字段时使用的默认值；`locale` 同时是能力查询的默认过滤条件
    pub defaults: RequestConfig,
    /// MARY 服务器地址 `host:port`
    pub server_addr: String,
}

impl AppState {
    pub fn new(client: Arc<MaryClient>, defaults: RequestConfig, server_addr: String) -> Self {
        Self {
            client,
            defaults,
            server_addr,
        }
    }

    /// 查询参数中的 locale 优先，否则使用配置的默认 locale
    pub fn locale<'a>(&'a self, requested: &'a Option<String>) -> Option<&'a str> {
        requested.as_deref().or(self.defaults.locale.as_deref())
    }

    /// 把请求体与默认值合并为一个合成请求
    pub fn synthesis_request(&self, req: ProcessRequest) -> SynthesisRequest {
        let mut request = self.defaults.build(req.text);
        if let Some(input_type) = req.input_type {
            request.input_type = input_type;
        }
        if let Some(output_type) = req.output_type {
            request.output_type = output_type;
        }
        if req.audio_type.is_some() {
            request.audio_type = req.audio_type;
        }
        if req.voice.is_some() {
            request.voice = req.voice;
        }
        request
    }
}

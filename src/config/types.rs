//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::time::Duration;

use crate::domain::SynthesisRequest;
use crate::infrastructure::tcp::MaryConnectorConfig;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// MARY 服务器配置
    #[serde(default)]
    pub server: MaryServerConfig,

    /// 合成请求默认值
    #[serde(default)]
    pub request: RequestConfig,

    /// HTTP 网关配置
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// MARY 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct MaryServerConfig {
    /// 服务器地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 服务器端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 建立连接超时（秒），不设置则一直等待
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,

    /// 单次读写超时（秒），不设置则一直等待
    #[serde(default)]
    pub io_timeout_secs: Option<u64>,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    59125
}

impl Default for MaryServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            connect_timeout_secs: None,
            io_timeout_secs: None,
        }
    }
}

impl MaryServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connector_config(&self) -> MaryConnectorConfig {
        let mut config = MaryConnectorConfig::new(&self.host, self.port);
        if let Some(secs) = self.connect_timeout_secs {
            config = config.with_connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.io_timeout_secs {
            config = config.with_io_timeout(Duration::from_secs(secs));
        }
        config
    }
}

/// 合成请求默认值
#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    #[serde(default = "default_input_type")]
    pub input_type: String,

    #[serde(default = "default_output_type")]
    pub output_type: String,

    /// 输出为 AUDIO 时的音频格式
    #[serde(default = "default_audio_type")]
    pub audio_type: Option<String>,

    /// 网关 `/api/datatypes` 与 `/api/voices` 未给出 locale 时的默认过滤条件
    #[serde(default)]
    pub locale: Option<String>,

    #[serde(default)]
    pub voice: Option<String>,
}

fn default_input_type() -> String {
    "TEXT".to_string()
}

fn default_output_type() -> String {
    "AUDIO".to_string()
}

fn default_audio_type() -> Option<String> {
    Some("WAVE".to_string())
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            input_type: default_input_type(),
            output_type: default_output_type(),
            audio_type: default_audio_type(),
            locale: None,
            voice: None,
        }
    }
}

impl RequestConfig {
    /// 用默认值构造一个合成请求
    pub fn build(&self, input: impl Into<String>) -> SynthesisRequest {
        SynthesisRequest {
            input: input.into(),
            input_type: self.input_type.clone(),
            output_type: self.output_type.clone(),
            audio_type: self.audio_type.clone(),
            voice: self.voice.clone(),
        }
    }
}

/// HTTP 网关配置
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_host")]
    pub host: String,

    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

fn default_gateway_host() -> String {
    "0.0.0.0".to_string()
}

fn default_gateway_port() -> u16 {
    8088
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

impl GatewayConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（maryclient.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["maryclient", "maryclient.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `MARY_SERVER__HOST=mary.example.org`
/// - `MARY_SERVER__PORT=59125`
/// - `MARY_REQUEST__VOICE=dfki-prudence-hsmm`
/// - `MARY_GATEWAY__PORT=8088`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "localhost")?
        .set_default("server.port", 59125)?
        .set_default("request.input_type", "TEXT")?
        .set_default("request.output_type", "AUDIO")?
        .set_default("request.audio_type", "WAVE")?
        .set_default("gateway.host", "0.0.0.0")?
        .set_default("gateway.port", 8088)?
        .set_default("log.level", "info")?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），前缀 MARY_，层级分隔符 __
    builder = builder.add_source(
        Environment::with_prefix("MARY")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.host.is_empty() {
        return Err(ConfigError::ValidationError(
            "MARY server host cannot be empty".to_string(),
        ));
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "MARY server port cannot be 0".to_string(),
        ));
    }

    if config.gateway.port == 0 {
        return Err(ConfigError::ValidationError(
            "Gateway port cannot be 0".to_string(),
        ));
    }

    if config.request.input_type.is_empty() || config.request.output_type.is_empty() {
        return Err(ConfigError::ValidationError(
            "Input and output type cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== MARY Client Configuration ===");
    tracing::info!("MARY Server: {}", config.server.addr());
    if let Some(secs) = config.server.connect_timeout_secs {
        tracing::info!("Connect Timeout: {}s", secs);
    }
    if let Some(secs) = config.server.io_timeout_secs {
        tracing::info!("I/O Timeout: {}s", secs);
    }
    tracing::info!(
        "Request: IN={} OUT={} AUDIO={} VOICE={}",
        config.request.input_type,
        config.request.output_type,
        config.request.audio_type.as_deref().unwrap_or("-"),
        config.request.voice.as_deref().unwrap_or("-")
    );
    if let Some(locale) = &config.request.locale {
        tracing::info!("Locale: {}", locale);
    }
    tracing::info!("Gateway: {}", config.gateway.addr());
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_host() {
        let mut config = AppConfig::default();
        config.server.host = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_output_type() {
        let mut config = AppConfig::default();
        config.request.output_type = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maryclient.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nhost = \"mary.example.org\"\nport = 59200\nio_timeout_secs = 10\n\n[request]\nvoice = \"de7\""
        )
        .unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();
        assert_eq!(config.server.host, "mary.example.org");
        assert_eq!(config.server.port, 59200);
        assert_eq!(config.server.io_timeout_secs, Some(10));
        assert_eq!(config.request.voice.as_deref(), Some("de7"));
        assert_eq!(config.request.input_type, "TEXT");
    }

    #[test]
    fn test_missing_required_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load_config_from_path(Some(&path)).is_err());
    }
}

//! 应用层错误定义
//!
//! MARY 客户端所有操作共用的错误类型

use thiserror::Error;

/// MARY 客户端错误
#[derive(Debug, Error)]
pub enum MaryError {
    /// 无法建立或维持到服务器的连接
    #[error("Connection error: {0}")]
    Connection(String),

    /// 服务器在至少应返回一行时返回了零行，或应答不符合协议
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// 请求的资源不存在（例如某 locale 没有音色）
    #[error("Not found: {0}")]
    NotFound(String),

    /// 配置的超时时间已到
    #[error("Timed out: {0}")]
    Timeout(String),

    /// 写入调用方提供的输出失败
    #[error("Output error: {0}")]
    Output(String),

    /// 请求参数无效
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl MaryError {
    /// 连接建立失败
    pub fn connect(addr: &str, err: impl std::fmt::Display) -> Self {
        Self::Connection(format!("cannot connect to MARY server at {}: {}", addr, err))
    }

    /// 已建立的连接上读写失败
    pub fn socket(context: &str, err: impl std::fmt::Display) -> Self {
        Self::Connection(format!("{}: {}", context, err))
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn output(err: impl std::fmt::Display) -> Self {
        Self::Output(err.to_string())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

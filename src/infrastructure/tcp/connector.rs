//! MARY Connector - 到 MARY 服务器的 TCP 连接
//!
//! 默认行为与参考客户端一致：没有超时，一直阻塞到对端应答或关闭。
//! 配置超时后，超时以 `MaryError::Timeout` 返回。

use std::future::Future;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::application::MaryError;

/// 连接配置
#[derive(Debug, Clone)]
pub struct MaryConnectorConfig {
    pub host: String,
    pub port: u16,
    /// 建立连接的超时，None 表示不限
    pub connect_timeout: Option<Duration>,
    /// 单次读写的超时，None 表示不限
    pub io_timeout: Option<Duration>,
}

impl Default for MaryConnectorConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 59125,
            connect_timeout: None,
            io_timeout: None,
        }
    }
}

impl MaryConnectorConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = Some(timeout);
        self
    }
}

/// 连接器
#[derive(Debug, Clone)]
pub struct MaryConnector {
    config: MaryConnectorConfig,
}

impl MaryConnector {
    pub fn new(config: MaryConnectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MaryConnectorConfig {
        &self.config
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// 打开一个新连接，失败不重试
    pub async fn connect(&self) -> Result<TcpStream, MaryError> {
        let addr = self.addr();
        let connect = TcpStream::connect((self.config.host.as_str(), self.config.port));

        let stream = match self.config.connect_timeout {
            None => connect.await,
            Some(limit) => tokio::time::timeout(limit, connect).await.map_err(|_| {
                MaryError::Timeout(format!("connecting to {} after {:?}", addr, limit))
            })?,
        }
        .map_err(|e| MaryError::connect(&addr, e))?;

        tracing::trace!(addr = %addr, "Connected to MARY server");
        Ok(stream)
    }

    /// 在 I/O 超时限制下执行一次 socket 操作
    pub async fn io<T, F>(&self, what: &str, fut: F) -> Result<T, MaryError>
    where
        F: Future<Output = std::io::Result<T>>,
    {
        let result = match self.config.io_timeout {
            None => fut.await,
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| MaryError::Timeout(format!("{} after {:?}", what, limit)))?,
        };
        result.map_err(|e| MaryError::socket(what, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[test]
    fn test_config_default() {
        let config = MaryConnectorConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 59125);
        assert!(config.connect_timeout.is_none());
        assert!(config.io_timeout.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = MaryConnectorConfig::new("mary.example.org", 59126)
            .with_io_timeout(Duration::from_secs(5));
        let connector = MaryConnector::new(config);
        assert_eq!(connector.addr(), "mary.example.org:59126");
        assert_eq!(connector.config().io_timeout, Some(Duration::from_secs(5)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let connector = MaryConnector::new(MaryConnectorConfig::new("127.0.0.1", port));
        let err = connector.connect().await.unwrap_err();
        assert!(matches!(err, MaryError::Connection(_)));
    }

    #[tokio::test]
    async fn test_io_timeout() {
        let connector = MaryConnector::new(
            MaryConnectorConfig::default().with_io_timeout(Duration::from_millis(20)),
        );
        let err = connector
            .io("reading", std::future::pending::<std::io::Result<()>>())
            .await
            .unwrap_err();
        assert!(matches!(err, MaryError::Timeout(_)));
    }
}

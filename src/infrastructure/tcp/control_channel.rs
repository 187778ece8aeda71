//! TCP Control Channel - 行式请求/应答
//!
//! 实现 ControlChannelPort：每次查询打开一个新连接，读完应答后关闭。
//! 调用方已有连接时可以用 [`query_on`] 复用，连接生命周期由调用方负责。

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::application::ports::ControlChannelPort;
use crate::application::MaryError;

use super::connector::MaryConnector;

/// 在已有连接上发送一行命令并读取应答
///
/// 命令以单个 `\n` 结束，UTF-8 编码。应答逐行读取，直到空行或 EOF；
/// 空行本身不计入结果。服务器在空行之后发送的数据会被丢弃。
pub async fn query_on<S>(
    connector: &MaryConnector,
    stream: &mut S,
    command: &str,
) -> Result<Vec<String>, MaryError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let request = format!("{}\n", command);
    connector
        .io("sending request", stream.write_all(request.as_bytes()))
        .await?;
    connector.io("sending request", stream.flush()).await?;

    let mut reader = BufReader::new(stream);
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = connector
            .io("reading response", reader.read_until(b'\n', &mut buf))
            .await?;
        if n == 0 {
            break;
        }
        let line = std::str::from_utf8(&buf)
            .map_err(|e| MaryError::protocol(format!("response is not valid UTF-8: {}", e)))?
            .trim_end_matches('\n')
            .trim_end_matches('\r');
        if line.is_empty() {
            break;
        }
        lines.push(line.to_string());
    }

    tracing::debug!(command = %command, lines = lines.len(), "MARY query answered");
    Ok(lines)
}

/// TCP 控制通道
pub struct TcpControlChannel {
    connector: Arc<MaryConnector>,
}

impl TcpControlChannel {
    pub fn new(connector: Arc<MaryConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl ControlChannelPort for TcpControlChannel {
    async fn query(&self, command: &str) -> Result<Vec<String>, MaryError> {
        let mut stream = self.connector.connect().await?;
        let lines = query_on(&self.connector, &mut stream, command).await?;
        // 连接由本次查询打开，读完即关闭
        drop(stream);
        Ok(lines)
    }
}

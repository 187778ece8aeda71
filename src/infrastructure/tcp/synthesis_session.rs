//! Synthesis Session - 双连接流式合成
//!
//! 一次合成使用两个连接：
//! 1. Negotiate: info 连接发送 `MARY IN=.. OUT=..` 请求行，读回一行请求 ID
//! 2. Submit: data 连接先写 ID 行，再写 UTF-8 输入文本，然后半关闭写方向
//! 3. Drain: 从 data 连接按块读取并原样转发给输出；同时尽力读取 info 连接上的诊断文本
//! 4. Finalize: data 连接 EOF 后继续读完 info 连接直到 EOF，然后关闭两个连接
//!
//! Drain 阶段两个读操作在同一个任务里通过 `select!` 并发等待，
//! info 连接上没有数据时不会阻塞 data 连接的转发。

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::application::ports::{OutputSink, SynthesisPort, SynthesisReport};
use crate::application::MaryError;
use crate::domain::SynthesisRequest;

use super::connector::MaryConnector;

const CHUNK_SIZE: usize = 8192;

/// 单次合成会话
pub struct SynthesisSession<'a> {
    connector: &'a MaryConnector,
    request: &'a SynthesisRequest,
}

impl<'a> SynthesisSession<'a> {
    pub fn new(connector: &'a MaryConnector, request: &'a SynthesisRequest) -> Self {
        Self { connector, request }
    }

    /// 执行完整的合成流程
    pub async fn run(
        self,
        output: OutputSink<'_>,
        diagnostics: OutputSink<'_>,
    ) -> Result<SynthesisReport, MaryError> {
        let (mut info, request_id) = self.negotiate().await?;
        let mut data = self.submit(&request_id).await?;

        let mut report = SynthesisReport {
            request_id,
            ..Default::default()
        };
        let mut diag_bytes = Vec::new();
        let info_open = self
            .drain(&mut data, &mut info, output, diagnostics, &mut report, &mut diag_bytes)
            .await?;
        if info_open {
            self.finalize(&mut info, diagnostics, &mut diag_bytes).await?;
        }
        report.diagnostics = String::from_utf8_lossy(&diag_bytes).into_owned();

        tracing::info!(
            request_id = %report.request_id,
            bytes = report.bytes_written,
            diagnostics_len = report.diagnostics.len(),
            "MARY synthesis completed"
        );
        Ok(report)
    }

    /// 发送请求行并读取请求 ID
    async fn negotiate(&self) -> Result<(BufReader<TcpStream>, String), MaryError> {
        let request_line = format!("{}\n", self.request.request_line());
        tracing::debug!(request = %request_line.trim_end(), "Negotiating MARY request");

        let mut info = BufReader::new(self.connector.connect().await?);
        self.connector
            .io("sending request", info.get_mut().write_all(request_line.as_bytes()))
            .await?;

        let mut reply = String::new();
        self.connector
            .io("reading request id", info.read_line(&mut reply))
            .await?;
        let request_id = reply.trim();

        if request_id.is_empty() {
            return Err(MaryError::protocol(
                "server closed the connection without a request id",
            ));
        }
        if request_id.parse::<u64>().is_err() {
            // 服务器没有给出 ID，而是一段错误说明：读完后整体返回
            let mut rest = String::new();
            if let Err(e) = self
                .connector
                .io("reading server reply", info.read_to_string(&mut rest))
                .await
            {
                tracing::debug!(error = %e, read = rest.len(), "Server reply truncated");
            }
            let message = format!("{}\n{}", request_id, rest.trim_end());
            return Err(MaryError::protocol(format!(
                "server replied: {}",
                message.trim_end()
            )));
        }

        Ok((info, request_id.to_string()))
    }

    /// 在 data 连接上提交输入文本，完成后半关闭写方向
    async fn submit(&self, request_id: &str) -> Result<TcpStream, MaryError> {
        let mut data = self.connector.connect().await?;

        let header = format!("{}\n", request_id);
        self.connector
            .io("sending request id", data.write_all(header.as_bytes()))
            .await?;
        self.connector
            .io("sending input", data.write_all(self.request.input.as_bytes()))
            .await?;
        self.connector
            .io("closing input", data.shutdown())
            .await?;

        tracing::debug!(
            request_id = %request_id,
            input_len = self.request.input.len(),
            "Input submitted"
        );
        Ok(data)
    }

    /// 转发 data 连接上的输出，同时尽力转发诊断文本
    ///
    /// 返回 info 连接是否仍然打开
    async fn drain(
        &self,
        data: &mut TcpStream,
        info: &mut BufReader<TcpStream>,
        output: OutputSink<'_>,
        diagnostics: OutputSink<'_>,
        report: &mut SynthesisReport,
        diag_bytes: &mut Vec<u8>,
    ) -> Result<bool, MaryError> {
        let mut chunk = vec![0u8; CHUNK_SIZE];
        let mut diag_chunk = vec![0u8; CHUNK_SIZE];
        let mut info_open = true;

        loop {
            tokio::select! {
                read = self.connector.io("reading output", data.read(&mut chunk)) => {
                    let n = read?;
                    if n == 0 {
                        break;
                    }
                    output.write_all(&chunk[..n]).await.map_err(MaryError::output)?;
                    report.bytes_written += n as u64;
                }
                read = info.read(&mut diag_chunk), if info_open => {
                    match read {
                        Ok(0) => info_open = false,
                        Ok(n) => {
                            forward_diagnostics(&diag_chunk[..n], diagnostics, diag_bytes).await
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Reading server diagnostics failed");
                            info_open = false;
                        }
                    }
                }
            }
        }

        output.flush().await.map_err(MaryError::output)?;
        Ok(info_open)
    }

    /// 读完 info 连接上剩余的诊断文本
    async fn finalize(
        &self,
        info: &mut BufReader<TcpStream>,
        diagnostics: OutputSink<'_>,
        diag_bytes: &mut Vec<u8>,
    ) -> Result<(), MaryError> {
        let mut diag_chunk = vec![0u8; CHUNK_SIZE];
        loop {
            let n = self
                .connector
                .io("reading diagnostics", info.read(&mut diag_chunk))
                .await?;
            if n == 0 {
                return Ok(());
            }
            forward_diagnostics(&diag_chunk[..n], diagnostics, diag_bytes).await;
        }
    }
}

async fn forward_diagnostics(bytes: &[u8], diagnostics: OutputSink<'_>, collected: &mut Vec<u8>) {
    tracing::warn!(
        text = %String::from_utf8_lossy(bytes).trim_end(),
        "MARY server diagnostics"
    );
    collected.extend_from_slice(bytes);
    if let Err(e) = diagnostics.write_all(bytes).await {
        tracing::warn!(error = %e, "Forwarding diagnostics failed");
    }
}

/// 基于 TCP 的 SynthesisPort 实现
pub struct TcpSynthesis {
    connector: Arc<MaryConnector>,
}

impl TcpSynthesis {
    pub fn new(connector: Arc<MaryConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl SynthesisPort for TcpSynthesis {
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        output: OutputSink<'_>,
        diagnostics: OutputSink<'_>,
    ) -> Result<SynthesisReport, MaryError> {
        SynthesisSession::new(&self.connector, request)
            .run(output, diagnostics)
            .await
    }
}

//! Synthesis Port - 双连接流式合成
//!
//! 具体实现在 infrastructure/tcp 层

use async_trait::async_trait;
use tokio::io::AsyncWrite;

use crate::application::error::MaryError;
use crate::domain::SynthesisRequest;

/// 合成输出与诊断信息的写入目标
pub type OutputSink<'a> = &'a mut (dyn AsyncWrite + Unpin + Send);

/// 一次合成的结果摘要
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisReport {
    /// 服务器分配的请求 ID
    pub request_id: String,
    /// 转发到输出的字节数
    pub bytes_written: u64,
    /// 控制连接上收到的诊断文本
    pub diagnostics: String,
}

/// Synthesis Port
///
/// 输出字节按接收顺序原样转发；诊断文本尽力转发，与输出的相对顺序不作保证。
#[async_trait]
pub trait SynthesisPort: Send + Sync {
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        output: OutputSink<'_>,
        diagnostics: OutputSink<'_>,
    ) -> Result<SynthesisReport, MaryError>;
}

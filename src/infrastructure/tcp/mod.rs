//! TCP Layer - MARY 行式协议的 socket 实现
//!
//! - connector: 连接建立与超时
//! - control_channel: 单连接请求/应答
//! - synthesis_session: 双连接流式合成

mod connector;
mod control_channel;
mod synthesis_session;

use std::sync::Arc;

use crate::application::MaryClient;

pub use connector::{MaryConnector, MaryConnectorConfig};
pub use control_channel::{query_on, TcpControlChannel};
pub use synthesis_session::{SynthesisSession, TcpSynthesis};

/// 创建通过 TCP 访问 MARY 服务器的客户端
pub fn connect_client(config: MaryConnectorConfig) -> MaryClient {
    let connector = Arc::new(MaryConnector::new(config));
    MaryClient::new(
        Arc::new(TcpControlChannel::new(connector.clone())),
        Arc::new(TcpSynthesis::new(connector)),
    )
}

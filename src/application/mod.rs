//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 端口定义（ControlChannel、Synthesis）
//! - capability_cache: 服务器能力的惰性缓存
//! - client: 对外的客户端门面
//! - error: 错误定义

pub mod capability_cache;
pub mod client;
pub mod error;
pub mod ports;

pub use capability_cache::CapabilityCache;
pub use client::MaryClient;
pub use error::MaryError;
pub use ports::{ControlChannelPort, OutputSink, SynthesisPort, SynthesisReport};

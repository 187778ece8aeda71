//! maryclient - MARY TTS 服务器客户端
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - DataType、Voice、SynthesisRequest 等协议值对象
//! - 语言名称表与音频 Content-Type 映射
//!
//! 应用层 (application/):
//! - Ports: ControlChannel、Synthesis
//! - CapabilityCache: 服务器能力的惰性单次加载
//! - MaryClient: 对外门面
//!
//! 基础设施层 (infrastructure/):
//! - TCP: 行式控制通道与双 socket 合成会话
//! - HTTP: 暴露客户端能力的 REST 网关

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{MaryClient, MaryError, SynthesisReport};
pub use config::{load_config, AppConfig};
pub use domain::{DataType, SynthesisRequest, Voice};
pub use infrastructure::tcp::{connect_client, MaryConnectorConfig};
